//! Status transition logic
//!
//! Pure functions for applying a status action to a milestone or task.

use crate::schemas::{Milestone, ProgressStatus, Task};

use super::states::StatusAction;
use super::validation::validate_status_transition;

/// Something that carries a fulfillment status
pub trait Tracked: Clone {
    /// Noun used in messages ("milestone", "task")
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn status(&self) -> ProgressStatus;
    fn with_status(self, status: ProgressStatus) -> Self;
}

impl Tracked for Milestone {
    const KIND: &'static str = "milestone";

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> ProgressStatus {
        self.status
    }

    fn with_status(self, status: ProgressStatus) -> Self {
        Milestone::with_status(self, status)
    }
}

impl Tracked for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> ProgressStatus {
        self.status
    }

    fn with_status(self, status: ProgressStatus) -> Self {
        Task::with_status(self, status)
    }
}

/// Result of a status transition attempt
#[derive(Debug)]
pub enum TransitionResult<T> {
    /// The item as it would look after the transition
    Success { next: T },
    /// Failed transition with error message
    Error { error: String },
}

impl<T> TransitionResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, TransitionResult::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TransitionResult::Error { .. })
    }

    pub fn item(self) -> Option<T> {
        match self {
            TransitionResult::Success { next } => Some(next),
            TransitionResult::Error { .. } => None,
        }
    }

    pub fn error(self) -> Option<String> {
        match self {
            TransitionResult::Success { .. } => None,
            TransitionResult::Error { error } => Some(error),
        }
    }
}

/// Pure function that applies a status action to an item.
///
/// Never mutates the input. The returned item is only a preview: the
/// remote API decides, and the display copy is re-fetched afterwards.
pub fn apply_status_action<T: Tracked>(item: &T, action: StatusAction) -> TransitionResult<T> {
    let target = action.target();
    let validation = validate_status_transition(item.status(), target);
    if !validation.valid {
        return TransitionResult::Error {
            error: format!(
                "Cannot {} {} {}: {}",
                action,
                T::KIND,
                item.id(),
                validation
                    .reason
                    .unwrap_or_else(|| "transition not allowed".to_string())
            ),
        };
    }

    TransitionResult::Success {
        next: item.clone().with_status(target),
    }
}
