//! CLI 模块

pub mod serve;
pub mod tasks;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::model::{Priority, TaskStatus};
use crate::view::SortBy;

#[derive(Parser)]
#[command(name = "tasktrack")]
#[command(version)]
#[command(about = "Personal task tracker: JSON API server and command-line board")]
pub struct Cli {
    /// API origin for client commands (overrides config.toml)
    #[arg(long, global = true, env = "TASKTRACK_SERVER")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the task API server
    Serve(ServeArgs),
    /// List tasks with optional filters
    List(ListArgs),
    /// Create a task
    Add(AddArgs),
    /// Flip a task between Pending and Completed
    Toggle {
        /// Task id or a unique prefix of it
        id: String,
    },
    /// Set a task's status explicitly
    SetStatus {
        /// Task id or a unique prefix of it
        id: String,
        /// Pending | Completed
        status: TaskStatus,
    },
    /// Delete a task
    Delete {
        /// Task id or a unique prefix of it
        id: String,
    },
    /// Show total / completed / pending counts and completion rate
    Stats,
    /// Show the effective configuration
    Config {
        /// Write the current configuration to config.toml
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Directory holding tasks.toml
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Keep tasks in memory only
    #[arg(long, conflicts_with = "data_dir")]
    pub memory: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Pending | Completed
    #[arg(long)]
    pub status: Option<TaskStatus>,
    /// Low | Medium | High
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Case-insensitive match on title or description
    #[arg(short, long)]
    pub search: Option<String>,
    /// dueDate | priority | createdAt
    #[arg(long, default_value_t = SortBy::DueDate)]
    pub sort_by: SortBy,
}

#[derive(Args)]
pub struct AddArgs {
    pub title: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: NaiveDate,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(long, default_value_t = Priority::Medium)]
    pub priority: Priority,
    #[arg(long, default_value_t = TaskStatus::Pending)]
    pub status: TaskStatus,
}
