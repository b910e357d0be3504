//! In-memory task store, used by tests and `serve --memory`

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{apply_patch, build_task, sort_newest_first, task_not_found, TaskStore};
use crate::error::Result;
use crate::model::{CreateTaskDto, Task, TaskPatch};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let mut tasks = self.tasks.read().await.clone();
        sort_newest_first(&mut tasks);
        Ok(tasks)
    }

    async fn create_task(&self, input: CreateTaskDto) -> Result<Task> {
        let task = build_task(input, Utc::now())?;
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| task_not_found(id))?;
        let next = apply_patch(slot, &patch, Utc::now())?;
        *slot = next.clone();
        Ok(next)
    }

    async fn delete_task(&self, id: Uuid) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        let idx = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| task_not_found(id))?;
        tasks.remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::contract;

    #[tokio::test]
    async fn create_then_list() {
        contract::create_then_list(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        contract::list_is_newest_first(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        contract::create_rejects_blank_title(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn update_merges_fields() {
        contract::update_merges_fields(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        contract::missing_ids_are_not_found(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn delete_twice_fails_second_time() {
        contract::delete_twice_fails_second_time(&MemoryStore::new()).await;
    }
}
