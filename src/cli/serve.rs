//! API server CLI command

use super::ServeArgs;
use crate::api::{self, AppState};
use crate::error::Result;
use crate::storage::{config, FileStore, MemoryStore};

/// Execute the API server; flags override config.toml
pub async fn execute(args: ServeArgs) -> Result<()> {
    let server = config::load_config().server;
    let host = args.host.unwrap_or(server.host.clone());
    let port = args.port.unwrap_or(server.port);

    let state = if args.memory {
        println!("Storage: in-memory (tasks are lost on exit)");
        AppState::new(MemoryStore::new())
    } else {
        let dir = args.data_dir.unwrap_or_else(|| server.resolved_data_dir());
        let store = FileStore::open(&dir)?;
        println!("Storage: {}", store.path().display());
        AppState::new(store)
    };

    println!("Press Ctrl+C to stop");
    api::start_server(&host, port, state).await?;
    Ok(())
}
