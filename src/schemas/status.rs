//! Progress status shared by milestones and tasks

use serde::{Deserialize, Serialize};

/// Fulfillment status of a milestone or task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    /// Not started yet
    Pending,
    /// Work underway
    InProgress,
    /// Finished (terminal)
    Completed,
    /// Abandoned (terminal)
    Cancelled,
}

impl ProgressStatus {
    /// The upper snake case form used on the wire
    pub fn as_wire(&self) -> &'static str {
        match self {
            ProgressStatus::Pending => "PENDING",
            ProgressStatus::InProgress => "IN_PROGRESS",
            ProgressStatus::Completed => "COMPLETED",
            ProgressStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressStatus::Pending => write!(f, "pending"),
            ProgressStatus::InProgress => write!(f, "in progress"),
            ProgressStatus::Completed => write!(f, "completed"),
            ProgressStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for ProgressStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "PENDING" => Ok(ProgressStatus::Pending),
            "IN_PROGRESS" => Ok(ProgressStatus::InProgress),
            "COMPLETED" => Ok(ProgressStatus::Completed),
            "CANCELLED" => Ok(ProgressStatus::Cancelled),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}
