//! tasks.toml 持久化
//!
//! 每次操作都重新读取文件，写操作整体重写；进程内由一把锁串行化。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{
    apply_patch, build_task, ensure_dir, load_toml, save_toml, sort_newest_first, task_not_found,
    TaskStore,
};
use crate::error::Result;
use crate::model::{CreateTaskDto, Task, TaskPatch};

/// 任务列表容器 (用于 TOML 序列化)
#[derive(Debug, Default, Serialize, Deserialize)]
struct TasksFile {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// 在 dir 下使用 tasks.toml，目录不存在则创建
    pub fn open(dir: &Path) -> Result<Self> {
        let dir = ensure_dir(dir)?;
        Ok(Self {
            path: dir.join("tasks.toml"),
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 加载任务列表（文件不存在视为空）
    fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file: TasksFile = load_toml(&self.path)?;
        Ok(file.tasks)
    }

    /// 保存任务列表
    fn save(&self, tasks: Vec<Task>) -> Result<()> {
        save_toml(&self.path, &TasksFile { tasks })
    }
}

#[async_trait]
impl TaskStore for FileStore {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.load()?;
        sort_newest_first(&mut tasks);
        Ok(tasks)
    }

    async fn create_task(&self, input: CreateTaskDto) -> Result<Task> {
        let task = build_task(input, Utc::now())?;

        let _guard = self.lock.lock().await;
        let mut tasks = self.load()?;
        tasks.push(task.clone());
        self.save(tasks)?;
        Ok(task)
    }

    async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Task> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.load()?;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| task_not_found(id))?;
        let next = apply_patch(slot, &patch, Utc::now())?;
        *slot = next.clone();
        self.save(tasks)?;
        Ok(next)
    }

    async fn delete_task(&self, id: Uuid) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.load()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(task_not_found(id));
        }
        self.save(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::model::TaskStatus;
    use crate::storage::contract;
    use chrono::NaiveDate;

    fn store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(&dir.path().join("data")).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn create_then_list() {
        let (_dir, store) = store();
        contract::create_then_list(&store).await;
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let (_dir, store) = store();
        contract::list_is_newest_first(&store).await;
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let (_dir, store) = store();
        contract::create_rejects_blank_title(&store).await;
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let (_dir, store) = store();
        contract::update_merges_fields(&store).await;
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let (_dir, store) = store();
        contract::missing_ids_are_not_found(&store).await;
    }

    #[tokio::test]
    async fn delete_twice_fails_second_time() {
        let (_dir, store) = store();
        contract::delete_twice_fails_second_time(&store).await;
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let (dir, store) = store();
        let due = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let created = store
            .create_task(CreateTaskDto::new("persist me", due))
            .await
            .unwrap();
        store
            .update_task(created.id, TaskPatch::status(TaskStatus::Completed))
            .await
            .unwrap();
        drop(store);

        let reopened = FileStore::open(&dir.path().join("data")).unwrap();
        let tasks = reopened.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, created.id);
        assert_eq!(tasks[0].status, TaskStatus::Completed);
        assert_eq!(tasks[0].due_date, due);
        assert_eq!(tasks[0].created_at, created.created_at);
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let (_dir, store) = store();
        std::fs::write(store.path(), "tasks = 42").unwrap();
        let err = store.list_tasks().await.unwrap_err();
        assert!(matches!(err, TrackerError::TomlParse(_)));
    }
}
