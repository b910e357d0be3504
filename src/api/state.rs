//! Shared state for the Web API server.

use std::sync::Arc;

use crate::storage::TaskStore;

/// Handed to every handler through axum `State`; the store is the only
/// resource shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: impl TaskStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
