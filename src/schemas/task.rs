//! Task schema - a dated work item inside a milestone

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::dates::{self, day_start};
use super::ProgressStatus;

/// A task belonging to a milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,

    /// Owning milestone
    pub milestone_id: String,

    /// Ordinal position within the milestone
    pub index: u32,

    pub title: String,

    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub description: String,

    #[serde(with = "dates::wire")]
    pub due_date: DateTime<Utc>,

    pub status: ProgressStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Task {
    /// Create a pending task due on the given day
    pub fn new(
        id: impl Into<String>,
        milestone_id: impl Into<String>,
        index: u32,
        title: impl Into<String>,
        due: NaiveDate,
    ) -> Self {
        Task {
            id: id.into(),
            milestone_id: milestone_id.into(),
            index,
            title: title.into(),
            description: String::new(),
            due_date: day_start(due),
            status: ProgressStatus::Pending,
            created_at: None,
            updated_at: None,
        }
    }

    /// The calendar day (UTC) this task is due
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

/// Body of a task creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub milestone_id: String,
    pub title: String,
    pub description: String,
    /// Already in wire form, see [`dates::format_due_date`]
    pub due_date: String,
}

/// Body of a task edit request; absent fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.due_date.is_none()
    }
}

/// Sort tasks into index order, the order they are displayed and validated in
pub fn sort_by_index(tasks: &mut [Task]) {
    tasks.sort_by_key(|t| t.index);
}
