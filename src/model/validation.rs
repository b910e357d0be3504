//! Field validation shared by the store and the command-line board.
//!
//! The store runs it with [`DueDatePolicy::Any`]; the board runs it with
//! [`DueDatePolicy::NotBefore`] before anything is sent to the server.

use chrono::NaiveDate;

use super::{CreateTaskDto, Task};
use crate::error::TrackerError;

/// How the due date is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDatePolicy {
    /// Server side: any calendar date is accepted
    Any,
    /// Client side at creation time: must not be before the given day
    NotBefore(NaiveDate),
}

/// A single failed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

pub fn validate_new_task(dto: &CreateTaskDto, policy: DueDatePolicy) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_title(&dto.title, &mut errors);
    check_due_date(dto.due_date, policy, &mut errors);
    finish(errors)
}

/// Re-check a record after a partial merge
pub fn validate_task(task: &Task) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_title(&task.title, &mut errors);
    finish(errors)
}

/// Collapse field errors into a single crate error
pub fn into_error(errors: Vec<FieldError>) -> TrackerError {
    let joined = errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");
    TrackerError::validation(joined)
}

fn check_title(title: &str, errors: &mut Vec<FieldError>) {
    if title.trim().is_empty() {
        errors.push(FieldError {
            field: "title",
            message: "Title is required",
        });
    }
}

fn check_due_date(due: NaiveDate, policy: DueDatePolicy, errors: &mut Vec<FieldError>) {
    if let DueDatePolicy::NotBefore(today) = policy {
        if due < today {
            errors.push(FieldError {
                field: "dueDate",
                message: "Due date cannot be in the past",
            });
        }
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_blank_title_rejected() {
        let dto = CreateTaskDto::new("   ", date("2026-01-10"));
        let errors = validate_new_task(&dto, DueDatePolicy::Any).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn test_past_due_date_only_rejected_client_side() {
        let dto = CreateTaskDto::new("Write report", date("2026-01-09"));
        assert!(validate_new_task(&dto, DueDatePolicy::Any).is_ok());

        let errors =
            validate_new_task(&dto, DueDatePolicy::NotBefore(date("2026-01-10"))).unwrap_err();
        assert_eq!(errors[0].field, "dueDate");

        let today_ok = CreateTaskDto::new("Write report", date("2026-01-10"));
        assert!(validate_new_task(&today_ok, DueDatePolicy::NotBefore(date("2026-01-10"))).is_ok());
    }

    #[test]
    fn test_errors_are_collected() {
        let dto = CreateTaskDto::new("", date("2026-01-01"));
        let errors =
            validate_new_task(&dto, DueDatePolicy::NotBefore(date("2026-01-10"))).unwrap_err();
        assert_eq!(errors.len(), 2);

        let err = into_error(errors);
        assert_eq!(
            err.to_string(),
            "Validation error: title: Title is required; dueDate: Due date cannot be in the past"
        );
    }
}
