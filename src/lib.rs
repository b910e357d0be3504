//! tasktrack: personal task tracker
//!
//! A JSON task API (axum) over a pluggable [`storage::TaskStore`], plus the
//! client-side pieces that drive the command-line board: an HTTP client,
//! the filter/sort view, overview stats and a toast bus.

pub mod api;
pub mod cli;
pub mod client;
pub mod error;
pub mod model;
pub mod notify;
pub mod storage;
pub mod view;
