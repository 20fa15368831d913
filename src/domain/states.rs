//! Status state machine definitions
//!
//! Milestones and tasks share one progression:
//! pending → in_progress → completed, with cancelled reachable from
//! pending or in_progress. Completed and cancelled are terminal.

use crate::schemas::ProgressStatus;

/// An action a user can take on a milestone or task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusAction {
    Start,
    Complete,
    Cancel,
}

impl StatusAction {
    /// The status this action moves to
    pub fn target(&self) -> ProgressStatus {
        match self {
            StatusAction::Start => ProgressStatus::InProgress,
            StatusAction::Complete => ProgressStatus::Completed,
            StatusAction::Cancel => ProgressStatus::Cancelled,
        }
    }
}

impl std::fmt::Display for StatusAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusAction::Start => write!(f, "start"),
            StatusAction::Complete => write!(f, "complete"),
            StatusAction::Cancel => write!(f, "cancel"),
        }
    }
}

impl std::str::FromStr for StatusAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(StatusAction::Start),
            "complete" => Ok(StatusAction::Complete),
            "cancel" => Ok(StatusAction::Cancel),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

/// Check if a status is terminal (completed or cancelled).
pub fn is_terminal_status(status: ProgressStatus) -> bool {
    matches!(status, ProgressStatus::Completed | ProgressStatus::Cancelled)
}

/// Returns the statuses reachable in one step from `current`.
pub fn get_allowed_next_statuses(current: ProgressStatus) -> Vec<ProgressStatus> {
    match current {
        ProgressStatus::Pending => vec![ProgressStatus::InProgress, ProgressStatus::Cancelled],
        ProgressStatus::InProgress => vec![ProgressStatus::Completed, ProgressStatus::Cancelled],
        ProgressStatus::Completed | ProgressStatus::Cancelled => vec![],
    }
}

/// Returns the actions offered for an item in `current` status, in display order.
pub fn available_actions(current: ProgressStatus) -> Vec<StatusAction> {
    [StatusAction::Start, StatusAction::Complete, StatusAction::Cancel]
        .into_iter()
        .filter(|action| get_allowed_next_statuses(current).contains(&action.target()))
        .collect()
}
