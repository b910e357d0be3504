//! Local task board
//!
//! Holds the fetched list and patches it after every successful call, so the
//! view does not need a refetch. A failed call leaves the list untouched and
//! posts an error toast on the bus.

use chrono::NaiveDate;
use uuid::Uuid;

use super::filter::{apply_filters, TaskFilters};
use super::stats::TaskStats;
use crate::client::TaskClient;
use crate::error::{Result, TrackerError};
use crate::model::{validation, CreateTaskDto, DueDatePolicy, Task, TaskPatch, TaskStatus};
use crate::notify::{NewToast, NotificationBus};

/// Last computed view, reused while neither the list nor the filters change
#[derive(Debug)]
struct CachedView {
    revision: u64,
    filters: TaskFilters,
    tasks: Vec<Task>,
}

pub struct TaskBoard<B: NotificationBus> {
    client: TaskClient,
    bus: B,
    tasks: Vec<Task>,
    /// Bumped on every change to `tasks`
    revision: u64,
    cache: Option<CachedView>,
}

impl<B: NotificationBus> TaskBoard<B> {
    pub fn new(client: TaskClient, bus: B) -> Self {
        Self {
            client,
            bus,
            tasks: Vec::new(),
            revision: 0,
            cache: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.revision += 1;
    }

    /// Fetch the full list from the server
    pub async fn refresh(&mut self) -> Result<()> {
        match self.client.list_tasks().await {
            Ok(tasks) => {
                self.replace_tasks(tasks);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "fetching tasks failed");
                self.bus
                    .add_toast(NewToast::error("Load Failed", "Unable to fetch tasks"));
                Err(e)
            }
        }
    }

    /// Validate locally, then create. The new task goes to the front.
    pub async fn create(&mut self, dto: CreateTaskDto, today: NaiveDate) -> Result<Task> {
        if let Err(errors) = validation::validate_new_task(&dto, DueDatePolicy::NotBefore(today)) {
            self.bus.add_toast(NewToast::error(
                "Validation Error",
                "Please fill in all required fields correctly",
            ));
            return Err(validation::into_error(errors));
        }

        match self.client.create_task(&dto).await {
            Ok(task) => {
                let mut tasks = std::mem::take(&mut self.tasks);
                tasks.insert(0, task.clone());
                self.replace_tasks(tasks);
                self.bus
                    .add_toast(NewToast::success("Success", "Task created successfully"));
                Ok(task)
            }
            Err(e) => {
                tracing::warn!(error = %e, "creating task failed");
                self.bus
                    .add_toast(NewToast::error("Create Failed", "Unable to create task"));
                Err(e)
            }
        }
    }

    pub async fn set_status(&mut self, id: Uuid, status: TaskStatus) -> Result<Task> {
        match self.client.update_task(id, &TaskPatch::status(status)).await {
            Ok(updated) => {
                let mut tasks = std::mem::take(&mut self.tasks);
                if let Some(slot) = tasks.iter_mut().find(|t| t.id == id) {
                    *slot = updated.clone();
                }
                self.replace_tasks(tasks);
                self.bus.add_toast(NewToast::success(
                    "Task Updated",
                    format!("Task marked as {}", status),
                ));
                Ok(updated)
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "updating task failed");
                self.bus
                    .add_toast(NewToast::error("Update Failed", "Unable to update task"));
                Err(e)
            }
        }
    }

    /// Pending <-> Completed for a task already on the board
    pub async fn toggle_status(&mut self, id: Uuid) -> Result<Task> {
        let current = self
            .tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.status)
            .ok_or_else(|| TrackerError::not_found(format!("task {}", id)))?;
        self.set_status(id, current.toggled()).await
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        match self.client.delete_task(id).await {
            Ok(()) => {
                let mut tasks = std::mem::take(&mut self.tasks);
                tasks.retain(|t| t.id != id);
                self.replace_tasks(tasks);
                self.bus.add_toast(NewToast::success(
                    "Task Deleted",
                    "Task has been permanently removed",
                ));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "deleting task failed");
                self.bus.add_toast(NewToast::error(
                    "Delete Failed",
                    "Unable to delete task. Please try again.",
                ));
                Err(e)
            }
        }
    }

    /// Filtered and sorted view; recomputed only when the list or filters change
    pub fn view(&mut self, filters: &TaskFilters) -> &[Task] {
        let stale = match &self.cache {
            Some(c) => c.revision != self.revision || &c.filters != filters,
            None => true,
        };
        if stale {
            self.cache = Some(CachedView {
                revision: self.revision,
                filters: filters.clone(),
                tasks: apply_filters(&self.tasks, filters),
            });
        }
        match &self.cache {
            Some(c) => &c.tasks,
            None => &[],
        }
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Resolve a full id or a unique prefix of one among the loaded tasks
    pub fn resolve_id(&self, raw: &str) -> Result<Uuid> {
        if let Ok(id) = Uuid::parse_str(raw) {
            return Ok(id);
        }
        let prefix = raw.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(TrackerError::invalid_id("empty id"));
        }
        let mut matches = self
            .tasks
            .iter()
            .filter(|t| t.id.to_string().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Ok(task.id),
            (Some(_), Some(_)) => Err(TrackerError::invalid_id(format!(
                "'{}' matches more than one task",
                raw
            ))),
            (None, _) => Err(TrackerError::not_found(format!("no task matching '{}'", raw))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{create_router, AppState};
    use crate::model::Priority;
    use crate::notify::{ToastQueue, ToastVariant};
    use crate::storage::MemoryStore;
    use crate::view::SortBy;
    use tokio::net::TcpListener;

    async fn spawn_client() -> TaskClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = create_router(AppState::new(MemoryStore::new()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        TaskClient::new(&format!("http://{}", addr))
    }

    async fn dead_client() -> TaskClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        TaskClient::new(&format!("http://{}", addr))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 8).unwrap()
    }

    fn dto(title: &str, due: (u32, u32), priority: Priority) -> CreateTaskDto {
        let mut dto = CreateTaskDto::new(title, NaiveDate::from_ymd_opt(2026, due.0, due.1).unwrap());
        dto.priority = priority;
        dto
    }

    fn last_variant(board: &TaskBoard<ToastQueue>) -> ToastVariant {
        board.bus().last().unwrap().variant
    }

    #[tokio::test]
    async fn create_prepends_and_toasts() {
        let mut board = TaskBoard::new(spawn_client().await, ToastQueue::new());
        board.create(dto("first", (1, 20), Priority::Low), today()).await.unwrap();
        let second = board
            .create(dto("second", (1, 10), Priority::High), today())
            .await
            .unwrap();

        assert_eq!(board.tasks()[0].id, second.id);
        assert_eq!(board.bus().toasts().len(), 2);
        assert_eq!(last_variant(&board), ToastVariant::Success);

        board.refresh().await.unwrap();
        assert_eq!(board.tasks()[0].id, second.id);
        assert_eq!(board.tasks().len(), 2);
    }

    #[tokio::test]
    async fn past_due_date_is_rejected_before_sending() {
        let mut board = TaskBoard::new(spawn_client().await, ToastQueue::new());
        let err = board
            .create(dto("late", (1, 1), Priority::Medium), today())
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert_eq!(board.bus().last().unwrap().title, "Validation Error");

        board.refresh().await.unwrap();
        assert!(board.tasks().is_empty());
    }

    #[tokio::test]
    async fn toggle_and_delete_patch_local_state() {
        let mut board = TaskBoard::new(spawn_client().await, ToastQueue::new());
        let task = board
            .create(dto("flip", (2, 1), Priority::Medium), today())
            .await
            .unwrap();

        let updated = board.toggle_status(task.id).await.unwrap();
        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(board.tasks()[0].status, TaskStatus::Completed);
        assert_eq!(
            board.bus().last().unwrap().description.as_deref(),
            Some("Task marked as Completed")
        );
        assert_eq!(board.stats().completion_rate, 100);

        board.delete(task.id).await.unwrap();
        assert!(board.tasks().is_empty());

        let err = board.delete(task.id).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(board.bus().last().unwrap().title, "Delete Failed");
    }

    #[tokio::test]
    async fn failures_leave_state_unchanged() {
        let mut board = TaskBoard::new(spawn_client().await, ToastQueue::new());
        let task = board
            .create(dto("keep", (2, 1), Priority::Medium), today())
            .await
            .unwrap();
        let snapshot = board.tasks().to_vec();

        board.client = dead_client().await;
        assert!(board.set_status(task.id, TaskStatus::Completed).await.is_err());
        assert!(board.delete(task.id).await.is_err());
        assert!(board.create(dto("new", (2, 2), Priority::Low), today()).await.is_err());
        assert!(board.refresh().await.is_err());

        assert_eq!(board.tasks(), snapshot.as_slice());
        assert_eq!(last_variant(&board), ToastVariant::Error);
    }

    #[tokio::test]
    async fn view_is_recomputed_on_change() {
        let mut board = TaskBoard::new(spawn_client().await, ToastQueue::new());
        board.create(dto("low", (1, 10), Priority::Low), today()).await.unwrap();
        board.create(dto("high", (1, 20), Priority::High), today()).await.unwrap();

        let by_due = TaskFilters::default();
        let by_priority = TaskFilters {
            sort_by: SortBy::Priority,
            ..TaskFilters::default()
        };

        let titles = |tasks: &[Task]| tasks.iter().map(|t| t.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(board.view(&by_due)), vec!["low", "high"]);
        assert_eq!(titles(board.view(&by_priority)), vec!["high", "low"]);

        board.create(dto("medium", (1, 15), Priority::Medium), today()).await.unwrap();
        assert_eq!(titles(board.view(&by_priority)), vec!["high", "medium", "low"]);
    }

    #[tokio::test]
    async fn resolve_id_accepts_unique_prefix() {
        let mut board = TaskBoard::new(spawn_client().await, ToastQueue::new());
        let task = board
            .create(dto("find me", (2, 1), Priority::Medium), today())
            .await
            .unwrap();

        let full = task.id.to_string();
        assert_eq!(board.resolve_id(&full).unwrap(), task.id);
        assert_eq!(board.resolve_id(&full[..8]).unwrap(), task.id);
        assert!(board.resolve_id("zzzz").unwrap_err().is_not_found());
        assert!(matches!(
            board.resolve_id(" ").unwrap_err(),
            TrackerError::InvalidId(_)
        ));
    }
}
