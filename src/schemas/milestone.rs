//! Milestone schema - a staged phase of order fulfillment

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::dates::{self, day_start};
use super::ProgressStatus;

/// A milestone of an order, as held by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Unique identifier
    pub id: String,

    /// Owning order
    pub order_id: String,

    /// Ordinal position within the order, 1-based
    pub index: u32,

    /// Human-readable title
    pub title: String,

    /// Longer description (may be empty)
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub description: String,

    /// When the milestone is due
    #[serde(with = "dates::wire")]
    pub due_date: DateTime<Utc>,

    /// Current status
    pub status: ProgressStatus,

    /// ISO 8601 creation timestamp, when the server sends one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// ISO 8601 last update timestamp, when the server sends one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Milestone {
    /// Create a pending milestone due on the given day
    pub fn new(
        id: impl Into<String>,
        order_id: impl Into<String>,
        index: u32,
        title: impl Into<String>,
        due: NaiveDate,
    ) -> Self {
        Milestone {
            id: id.into(),
            order_id: order_id.into(),
            index,
            title: title.into(),
            description: String::new(),
            due_date: day_start(due),
            status: ProgressStatus::Pending,
            created_at: None,
            updated_at: None,
        }
    }

    /// The calendar day (UTC) this milestone is due
    pub fn due_day(&self) -> NaiveDate {
        self.due_date.date_naive()
    }

    pub fn with_status(mut self, status: ProgressStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Find the milestone that precedes `milestone_id` by index, if any.
///
/// Returns `None` both when the milestone is first and when it is not in the list.
pub fn previous_milestone<'a>(
    milestones: &'a [Milestone],
    milestone_id: &str,
) -> Option<&'a Milestone> {
    let current = milestones.iter().find(|m| m.id == milestone_id)?;
    milestones
        .iter()
        .filter(|m| m.index < current.index)
        .max_by_key(|m| m.index)
}
