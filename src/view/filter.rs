//! Filter and sort over the local task list

use std::fmt;
use std::str::FromStr;

use crate::model::{Priority, Task, TaskStatus};

/// Sort key for the list view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortBy {
    /// Soonest due first
    #[default]
    DueDate,
    /// High, Medium, Low
    Priority,
    /// Most recently created first
    CreatedAt,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortBy::DueDate => "dueDate",
            SortBy::Priority => "priority",
            SortBy::CreatedAt => "createdAt",
        })
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "duedate" | "due" => Ok(SortBy::DueDate),
            "priority" => Ok(SortBy::Priority),
            "createdat" | "created" => Ok(SortBy::CreatedAt),
            _ => Err(format!(
                "invalid sort key '{}', expected one of: dueDate, priority, createdAt",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TaskFilters {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
    pub sort_by: SortBy,
}

/// Apply status, priority and search filters in that order, then sort.
pub fn apply_filters(tasks: &[Task], filters: &TaskFilters) -> Vec<Task> {
    let needle = filters
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut result: Vec<Task> = tasks
        .iter()
        .filter(|t| filters.status.map_or(true, |s| t.status == s))
        .filter(|t| filters.priority.map_or(true, |p| t.priority == p))
        .filter(|t| needle.as_deref().map_or(true, |n| t.matches_search(n)))
        .cloned()
        .collect();

    match filters.sort_by {
        SortBy::Priority => result.sort_by_key(|t| t.priority.rank()),
        SortBy::CreatedAt => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::DueDate => result.sort_by_key(|t| t.due_date),
    }

    result
}
