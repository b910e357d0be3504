//! API handlers

pub mod tasks;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Body of every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub(crate) fn error_response(status: StatusCode, msg: &str) -> impl IntoResponse {
    (
        status,
        Json(MessageResponse {
            message: msg.to_string(),
        }),
    )
}
