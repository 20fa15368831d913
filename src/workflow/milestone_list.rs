//! Milestone list for an order, each with its nested tasks

use serde::Serialize;

use crate::api::{list_all_milestones, list_all_tasks, MilestoneApi};
use crate::errors::Result;
use crate::schemas::{Milestone, ProgressStatus, Task};

/// Placeholder rows shown while the list loads
pub const SKELETON_ROWS: usize = 3;

/// A milestone together with its tasks in index order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneEntry {
    #[serde(flatten)]
    pub milestone: Milestone,
    pub tasks: Vec<Task>,
}

impl MilestoneEntry {
    /// Completed tasks over all non-cancelled ones
    pub fn progress(&self) -> (usize, usize) {
        let counted = self
            .tasks
            .iter()
            .filter(|t| t.status != ProgressStatus::Cancelled);
        let total = counted.clone().count();
        let done = counted.filter(|t| t.status == ProgressStatus::Completed).count();
        (done, total)
    }
}

/// What the milestone list shows
#[derive(Debug, Clone, PartialEq)]
pub enum MilestoneListView {
    Loading,
    Empty,
    Loaded(Vec<MilestoneEntry>),
}

impl MilestoneListView {
    pub fn from_entries(entries: Vec<MilestoneEntry>) -> Self {
        if entries.is_empty() {
            MilestoneListView::Empty
        } else {
            MilestoneListView::Loaded(entries)
        }
    }

    pub fn entries(&self) -> &[MilestoneEntry] {
        match self {
            MilestoneListView::Loaded(entries) => entries,
            _ => &[],
        }
    }
}

/// Fetch an order's milestones in index order, then each milestone's tasks.
pub async fn load_milestone_board(
    api: &dyn MilestoneApi,
    order_id: &str,
    page_size: u32,
) -> Result<Vec<MilestoneEntry>> {
    let milestones = list_all_milestones(api, order_id, page_size).await?;
    let mut entries = Vec::with_capacity(milestones.len());
    for milestone in milestones {
        let tasks = list_all_tasks(api, &milestone.id, page_size).await?;
        entries.push(MilestoneEntry { milestone, tasks });
    }
    Ok(entries)
}
