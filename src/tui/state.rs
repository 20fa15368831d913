//! TUI state management

use chrono::NaiveDate;

use crate::errors::VeilaError;
use crate::workflow::{MilestoneEntry, MilestoneListView, Notice};

/// Main TUI state for the milestone board
#[derive(Debug, Clone)]
pub struct BoardState {
    pub order_id: String,
    pub today: NaiveDate,
    pub view: MilestoneListView,
    pub selected: usize,
    pub notice: Option<Notice>,
}

impl BoardState {
    /// Create a board that is waiting for its first fetch
    pub fn new(order_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            order_id: order_id.into(),
            today,
            view: MilestoneListView::Loading,
            selected: 0,
            notice: None,
        }
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new BoardState waiting on a (re)fetch; the error line is kept
    pub fn with_loading(mut self) -> Self {
        self.view = MilestoneListView::Loading;
        self
    }

    /// Return a new BoardState showing fetched entries
    pub fn with_entries(mut self, entries: Vec<MilestoneEntry>) -> Self {
        self.view = MilestoneListView::from_entries(entries);
        self.notice = None;
        self.selected = self.selected.min(self.len().saturating_sub(1));
        self
    }

    /// Return a new BoardState after a failed fetch.
    ///
    /// The list shows as empty and the failure goes to the notice line.
    pub fn with_error(mut self, error: &VeilaError) -> Self {
        self.view = MilestoneListView::Empty;
        self.notice = Some(Notice::from_error(error));
        self.selected = 0;
        self
    }

    /// Number of milestones on the board
    pub fn len(&self) -> usize {
        self.view.entries().len()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, MilestoneListView::Loading)
    }

    /// Move the selection down, stopping at the last milestone
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.len() {
            self.selected += 1;
        }
    }

    /// Move the selection up, stopping at the first milestone
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_entry(&self) -> Option<&MilestoneEntry> {
        self.view.entries().get(self.selected)
    }

    /// Completed milestones over all non-cancelled ones
    pub fn completed_count(&self) -> (usize, usize) {
        use crate::schemas::ProgressStatus;

        let counted = self
            .view
            .entries()
            .iter()
            .filter(|e| e.milestone.status != ProgressStatus::Cancelled);
        let total = counted.clone().count();
        let done = counted
            .filter(|e| e.milestone.status == ProgressStatus::Completed)
            .count();
        (done, total)
    }
}
