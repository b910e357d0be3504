//! Client-side task commands

use chrono::{Local, NaiveDate};

use super::{AddArgs, ListArgs};
use crate::client::TaskClient;
use crate::error::Result;
use crate::model::{format_due, format_relative_time, CreateTaskDto, Task, TaskStatus};
use crate::notify::ConsoleBus;
use crate::storage::config;
use crate::view::{TaskBoard, TaskFilters, TaskStats};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Board connected to `--server` or the configured origin, already loaded
async fn open_board(server: Option<String>) -> Result<TaskBoard<ConsoleBus>> {
    let url = server.unwrap_or_else(|| config::load_config().client.server_url);
    tracing::debug!(%url, "connecting");
    let mut board = TaskBoard::new(TaskClient::new(&url), ConsoleBus);
    board.refresh().await?;
    Ok(board)
}

fn short_id(task: &Task) -> String {
    task.id.to_string()[..8].to_string()
}

/// One line per task: icon, short id, priority, title, due
fn render_row(task: &Task, today: NaiveDate) -> String {
    let due = if task.status == TaskStatus::Completed {
        task.due_date.format("%b %-d, %Y").to_string()
    } else {
        format!("{} ({})", task.due_date.format("%b %-d, %Y"), format_due(task.due_date, today))
    };
    let overdue = if task.is_overdue(today) { " !" } else { "" };
    format!(
        "{} {}  {:<6}  {}  {}{}",
        task.status.icon(),
        short_id(task),
        task.priority.as_str(),
        task.title,
        due,
        overdue
    )
}

fn render_stats(stats: &TaskStats) -> String {
    let mut out = format!(
        "Total Tasks: {}\nCompleted:   {}\nPending:     {}",
        stats.total, stats.completed, stats.pending
    );
    if stats.total > 0 {
        out.push_str(&format!("\nCompletion Rate: {}%", stats.completion_rate));
    }
    out
}

pub async fn list(server: Option<String>, args: ListArgs) -> Result<()> {
    let mut board = open_board(server).await?;
    let has_tasks = !board.tasks().is_empty();
    let filters = TaskFilters {
        status: args.status,
        priority: args.priority,
        search: args.search,
        sort_by: args.sort_by,
    };

    let today = today();
    let view = board.view(&filters);
    if view.is_empty() {
        if has_tasks {
            println!("No tasks match your filters");
        } else {
            println!("No tasks found. Create your first task with `tasktrack add`.");
        }
        return Ok(());
    }

    for task in view {
        println!("{}", render_row(task, today));
        if let Some(desc) = &task.description {
            println!("           {}", desc);
        }
    }
    Ok(())
}

pub async fn add(server: Option<String>, args: AddArgs) -> Result<()> {
    let mut board = open_board(server).await?;
    let dto = CreateTaskDto {
        title: args.title,
        description: args.description,
        priority: args.priority,
        due_date: args.due,
        status: args.status,
    };
    let task = board.create(dto, today()).await?;
    println!("{}", render_row(&task, today()));
    Ok(())
}

pub async fn toggle(server: Option<String>, id: &str) -> Result<()> {
    let mut board = open_board(server).await?;
    let id = board.resolve_id(id)?;
    board.toggle_status(id).await?;
    Ok(())
}

pub async fn set_status(server: Option<String>, id: &str, status: TaskStatus) -> Result<()> {
    let mut board = open_board(server).await?;
    let id = board.resolve_id(id)?;
    board.set_status(id, status).await?;
    Ok(())
}

pub async fn delete(server: Option<String>, id: &str) -> Result<()> {
    let mut board = open_board(server).await?;
    let id = board.resolve_id(id)?;
    board.delete(id).await
}

pub async fn stats(server: Option<String>) -> Result<()> {
    let board = open_board(server).await?;
    println!("{}", render_stats(&board.stats()));
    if let Some(latest) = board.tasks().first() {
        println!("Last added:  {}", format_relative_time(latest.created_at));
    }
    Ok(())
}

/// Print (and optionally write) the effective configuration
pub fn show_config(init: bool) -> Result<()> {
    let cfg = config::load_config();
    if init {
        config::save_config(&cfg)?;
        println!("Wrote {}", config::config_path().display());
    }
    println!("{}", toml::to_string_pretty(&cfg)?);
    Ok(())
}
