pub mod config;
pub mod file;
pub mod memory;

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{validation, CreateTaskDto, DueDatePolicy, Task, TaskPatch};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Task 持久化接口
///
/// 四个操作彼此独立，每个都是单条记录上的原子操作。
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// 全部任务，按 created_at 倒序
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// 校验并插入，返回带 ID 与时间戳的完整记录
    async fn create_task(&self, input: CreateTaskDto) -> Result<Task>;

    /// 部分字段合并；记录不存在时返回 NotFound
    async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Task>;

    /// 删除；记录不存在时返回 NotFound
    async fn delete_task(&self, id: Uuid) -> Result<()>;
}

/// 获取数据目录：$TASKTRACK_HOME 或 ~/.tasktrack/
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("TASKTRACK_HOME") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tasktrack")
}

/// 确保目录存在
pub fn ensure_dir(path: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(path)?;
    Ok(path.to_path_buf())
}

/// 从 TOML 文件加载反序列化数据
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// 将数据序列化后保存到 TOML 文件
pub fn save_toml<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = toml::to_string_pretty(data)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// 校验 DTO 并生成新记录
pub(crate) fn build_task(input: CreateTaskDto, now: DateTime<Utc>) -> Result<Task> {
    validation::validate_new_task(&input, DueDatePolicy::Any).map_err(validation::into_error)?;
    Ok(Task::from_dto(input, now))
}

/// 合并 patch 并重新校验；失败时原记录保持不变
pub(crate) fn apply_patch(current: &Task, patch: &TaskPatch, now: DateTime<Utc>) -> Result<Task> {
    let mut next = current.merged(patch);
    validation::validate_task(&next).map_err(validation::into_error)?;
    next.updated_at = now;
    Ok(next)
}

pub(crate) fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

pub(crate) fn task_not_found(id: Uuid) -> crate::error::TrackerError {
    crate::error::TrackerError::not_found(format!("task {}", id))
}
