pub mod task;
pub mod validation;

pub use task::{
    format_due, format_relative_time, CreateTaskDto, Priority, Task, TaskPatch, TaskStatus,
};
pub use validation::{validate_new_task, validate_task, DueDatePolicy, FieldError};
