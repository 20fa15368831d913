//! Validation rules for due dates and status changes
//!
//! Every comparison is on calendar days; times are truncated to midnight.

use chrono::NaiveDate;

use crate::errors::{Result, VeilaError};
use crate::schemas::{ProgressStatus, Task};

use super::states::{get_allowed_next_statuses, is_terminal_status};

/// Form field names used in validation errors
pub const FIELD_DUE_DATE: &str = "dueDate";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_STATUS: &str = "status";
/// Errors about the form as a whole rather than one field
pub const FIELD_FORM: &str = "form";

/// Result of a validation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// Reason for failure (if valid is false)
    pub reason: Option<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            reason: None,
        }
    }

    /// Create a failed validation result
    pub fn failure(reason: impl Into<String>) -> Self {
        ValidationResult {
            valid: false,
            reason: Some(reason.into()),
        }
    }

    /// Turn a failure into a field error
    pub fn into_result(self, field: &'static str) -> Result<()> {
        if self.valid {
            return Ok(());
        }
        Err(VeilaError::validation(
            field,
            self.reason.unwrap_or_else(|| "Invalid value".to_string()),
        ))
    }
}

/// Whether `day` lies strictly before `today`
pub fn is_in_past(day: NaiveDate, today: NaiveDate) -> bool {
    day < today
}

/// Validate a new due date for a milestone.
///
/// Rejects a day before today, and a day on or before the previous
/// milestone's due date when there is a previous milestone.
pub fn validate_milestone_due_date(
    new_due: NaiveDate,
    previous_due: Option<NaiveDate>,
    today: NaiveDate,
) -> ValidationResult {
    if is_in_past(new_due, today) {
        return ValidationResult::failure("Due date cannot be in the past");
    }
    if let Some(previous) = previous_due {
        if new_due <= previous {
            return ValidationResult::failure(format!(
                "Due date must be after the previous milestone's due date ({})",
                previous
            ));
        }
    }
    ValidationResult::success()
}

/// Validate the due date of a task about to be appended to a milestone.
///
/// `existing` is the milestone's current task list; the last task by index
/// is the one the new date must come after.
pub fn validate_new_task_due_date(
    new_due: Option<NaiveDate>,
    existing: &[Task],
    today: NaiveDate,
) -> ValidationResult {
    let Some(new_due) = new_due else {
        return ValidationResult::failure("Due date is required");
    };
    if is_in_past(new_due, today) {
        return ValidationResult::failure("Due date cannot be in the past");
    }
    if let Some(last) = existing.iter().max_by_key(|t| t.index) {
        if new_due <= last.due_day() {
            return ValidationResult::failure(format!(
                "Due date must be after the last task's due date ({})",
                last.due_day()
            ));
        }
    }
    ValidationResult::success()
}

/// Validate moving an existing task to a new due date.
///
/// The task must stay strictly between its neighbours by index.
pub fn validate_task_due_date_edit(
    task_id: &str,
    new_due: NaiveDate,
    tasks: &[Task],
    today: NaiveDate,
) -> ValidationResult {
    let Some(current) = tasks.iter().find(|t| t.id == task_id) else {
        return ValidationResult::failure(format!("Task {} is not part of this milestone", task_id));
    };
    if is_in_past(new_due, today) {
        return ValidationResult::failure("Due date cannot be in the past");
    }

    let previous = tasks
        .iter()
        .filter(|t| t.index < current.index)
        .max_by_key(|t| t.index);
    if let Some(previous) = previous {
        if new_due <= previous.due_day() {
            return ValidationResult::failure(format!(
                "Due date must be after the previous task's due date ({})",
                previous.due_day()
            ));
        }
    }

    let next = tasks
        .iter()
        .filter(|t| t.index > current.index)
        .min_by_key(|t| t.index);
    if let Some(next) = next {
        if new_due >= next.due_day() {
            return ValidationResult::failure(format!(
                "Due date must be before the next task's due date ({})",
                next.due_day()
            ));
        }
    }

    ValidationResult::success()
}

/// Validate a task title
pub fn validate_task_title(title: &str) -> ValidationResult {
    if title.trim().is_empty() {
        return ValidationResult::failure("Title is required");
    }
    ValidationResult::success()
}

/// Completed and cancelled tasks are read-only
pub fn can_edit_task(status: ProgressStatus) -> ValidationResult {
    if is_terminal_status(status) {
        return ValidationResult::failure(format!("A {} task can no longer be edited", status));
    }
    ValidationResult::success()
}

/// Validate a status change
pub fn validate_status_transition(
    current: ProgressStatus,
    target: ProgressStatus,
) -> ValidationResult {
    if is_terminal_status(current) {
        return ValidationResult::failure(format!(
            "cannot transition from terminal status {}",
            current
        ));
    }
    if !get_allowed_next_statuses(current).contains(&target) {
        return ValidationResult::failure(format!(
            "cannot transition from {} to {}",
            current, target
        ));
    }
    ValidationResult::success()
}

/// Whether tasks, taken in index order, have strictly increasing due dates
pub fn is_chronological(tasks: &[Task]) -> bool {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by_key(|t| t.index);
    ordered.windows(2).all(|w| w[0].due_day() < w[1].due_day())
}
