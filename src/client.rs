//! HTTP client for the task API

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::api::handlers::tasks::DeleteResponse;
use crate::api::handlers::MessageResponse;
use crate::error::{Result, TrackerError};
use crate::model::{CreateTaskDto, Task, TaskPatch};

#[derive(Debug, Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    base: String,
}

impl TaskClient {
    /// `server_url` is the origin, e.g. `http://127.0.0.1:3001`
    pub fn new(server_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("{}/api/v1", server_url.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// GET /tasks
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let resp = self.http.get(format!("{}/tasks", self.base)).send().await?;
        decode(resp).await
    }

    /// POST /tasks
    pub async fn create_task(&self, dto: &CreateTaskDto) -> Result<Task> {
        let resp = self
            .http
            .post(format!("{}/tasks", self.base))
            .json(dto)
            .send()
            .await?;
        decode(resp).await
    }

    /// PUT /tasks/{id}
    pub async fn update_task(&self, id: Uuid, patch: &TaskPatch) -> Result<Task> {
        let resp = self
            .http
            .put(format!("{}/tasks/{}", self.base, id))
            .json(patch)
            .send()
            .await?;
        decode(resp).await
    }

    /// DELETE /tasks/{id}
    pub async fn delete_task(&self, id: Uuid) -> Result<()> {
        let resp = self
            .http
            .delete(format!("{}/tasks/{}", self.base, id))
            .send()
            .await?;
        let ack: DeleteResponse = decode(resp).await?;
        if ack.success {
            Ok(())
        } else {
            Err(TrackerError::Api {
                status: StatusCode::OK.as_u16(),
                message: "delete was not acknowledged".to_string(),
            })
        }
    }
}

/// Decode a 2xx body, or turn the `{message}` error body into `TrackerError::Api`
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let message = match resp.json::<MessageResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(TrackerError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{create_router, AppState};
    use crate::model::TaskStatus;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;
    use tokio::net::TcpListener;

    async fn spawn() -> TaskClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = create_router(AppState::new(MemoryStore::new()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        TaskClient::new(&format!("http://{}/", addr))
    }

    #[tokio::test]
    async fn round_trip_through_server() {
        let client = spawn().await;
        assert!(client.base_url().ends_with("/api/v1"));

        let due = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
        let created = client
            .create_task(&CreateTaskDto::new("Write report", due))
            .await
            .unwrap();
        assert_eq!(created.title, "Write report");

        let updated = client
            .update_task(created.id, &TaskPatch::status(TaskStatus::Completed))
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Completed);

        let listed = client.list_tasks().await.unwrap();
        assert_eq!(listed, vec![updated]);

        client.delete_task(created.id).await.unwrap();
        assert!(client.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn error_bodies_become_api_errors() {
        let client = spawn().await;
        let err = client.delete_task(Uuid::new_v4()).await.unwrap_err();
        match err {
            TrackerError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Task not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = TaskClient::new(&format!("http://{}", addr));
        let err = client.list_tasks().await.unwrap_err();
        assert!(matches!(err, TrackerError::Http(_)));
    }
}
