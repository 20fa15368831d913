//! Order fulfillment workflow surfaces
//!
//! Each surface validates input locally, calls the API only when the input
//! passes, and reports the result as a [`SubmitOutcome`]. None of them keep
//! state the API owns: after a successful submit the caller re-fetches.

mod due_date_editor;
mod milestone_list;
mod status_transition;
mod task_creation;
mod task_editor;

use chrono::{Local, NaiveDate};

use crate::errors::{Result, VeilaError};

pub use due_date_editor::{reschedule_milestone, MilestoneDueDateEditor};
pub use milestone_list::{load_milestone_board, MilestoneEntry, MilestoneListView, SKELETON_ROWS};
pub use status_transition::{find_task, transition_milestone, transition_task};
pub use task_creation::{TaskCreationDialog, TaskDraft};
pub use task_editor::{edit_task, TaskEdit};

/// Today's date on the local clock, the reference for "not in the past"
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// An inline error attached to one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Kind of transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient notification shown after a remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// Server rejections keep their message; anything else becomes a generic notice
    pub fn from_error(error: &VeilaError) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: error.user_message(),
        }
    }
}

/// What happened when a surface was submitted
#[derive(Debug)]
pub enum SubmitOutcome<T> {
    /// The API accepted the change; the caller should refresh
    Saved(T),
    /// Local validation failed; nothing was sent
    Invalid(FieldError),
    /// The request was sent and failed; local state is unchanged
    Failed(VeilaError),
}

impl<T> SubmitOutcome<T> {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }

    /// Fold into the crate error type
    pub fn into_result(self) -> Result<T> {
        match self {
            SubmitOutcome::Saved(value) => Ok(value),
            SubmitOutcome::Invalid(FieldError { field, message }) => {
                Err(VeilaError::Validation { field, message })
            }
            SubmitOutcome::Failed(error) => Err(error),
        }
    }

    pub(crate) fn from_error(error: VeilaError) -> Self {
        match error {
            VeilaError::Validation { field, message } => {
                SubmitOutcome::Invalid(FieldError { field, message })
            }
            other => SubmitOutcome::Failed(other),
        }
    }
}
