//! List view logic: filter/sort, overview stats and the local board

pub mod board;
pub mod filter;
pub mod stats;

pub use board::TaskBoard;
pub use filter::{apply_filters, SortBy, TaskFilters};
pub use stats::TaskStats;
