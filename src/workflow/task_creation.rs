//! Task creation dialog
//!
//! Loads the milestone's tasks on open so a new task can be checked against
//! the last one before anything is sent.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::{list_all_tasks, MilestoneApi};
use crate::domain::{validate_new_task_due_date, validate_task_title, FIELD_DUE_DATE, FIELD_TITLE};
use crate::errors::Result;
use crate::schemas::dates::format_due_date;
use crate::schemas::{NewTask, Task};

use super::{FieldError, Notice, SubmitOutcome};

/// What the user typed into the creation form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// `None` when the date field was left empty
    pub due_date: Option<NaiveDate>,
}

/// State of the "new task" dialog for one milestone
#[derive(Debug, Clone)]
pub struct TaskCreationDialog {
    milestone_id: String,
    existing: Vec<Task>,
    open: bool,
    field_error: Option<FieldError>,
    notice: Option<Notice>,
}

impl TaskCreationDialog {
    /// Open the dialog, fetching the milestone's tasks in index order
    pub async fn open(api: &dyn MilestoneApi, milestone_id: &str, page_size: u32) -> Result<Self> {
        let existing = list_all_tasks(api, milestone_id, page_size).await?;
        Ok(Self::with_tasks(milestone_id, existing))
    }

    /// Open the dialog over an already fetched task list
    pub fn with_tasks(milestone_id: impl Into<String>, mut existing: Vec<Task>) -> Self {
        crate::schemas::sort_by_index(&mut existing);
        Self {
            milestone_id: milestone_id.into(),
            existing,
            open: true,
            field_error: None,
            notice: None,
        }
    }

    pub fn milestone_id(&self) -> &str {
        &self.milestone_id
    }

    pub fn existing_tasks(&self) -> &[Task] {
        &self.existing
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn field_error(&self) -> Option<&FieldError> {
        self.field_error.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Earliest day the next task may be due on
    pub fn earliest_allowed(&self, today: NaiveDate) -> NaiveDate {
        match self.existing.last().and_then(|t| t.due_day().succ_opt()) {
            Some(after_last) if after_last > today => after_last,
            _ => today,
        }
    }

    /// Turn a draft into a request body, or the first field error found
    pub fn validate(
        &self,
        draft: &TaskDraft,
        today: NaiveDate,
    ) -> std::result::Result<NewTask, FieldError> {
        let title = validate_task_title(&draft.title);
        if !title.valid {
            return Err(FieldError {
                field: FIELD_TITLE,
                message: title.reason.unwrap_or_default(),
            });
        }

        let due = validate_new_task_due_date(draft.due_date, &self.existing, today);
        let due_date = match draft.due_date {
            Some(day) if due.valid => day,
            _ => {
                return Err(FieldError {
                    field: FIELD_DUE_DATE,
                    message: due.reason.unwrap_or_default(),
                })
            }
        };

        Ok(NewTask {
            milestone_id: self.milestone_id.clone(),
            title: draft.title.trim().to_string(),
            description: draft.description.clone(),
            due_date: format_due_date(due_date),
        })
    }

    /// Validate the draft and, if it passes, create the task.
    ///
    /// On success the dialog closes; on a failed request it stays open with
    /// the server's message so the user can correct and resubmit.
    pub async fn submit(
        &mut self,
        api: &dyn MilestoneApi,
        draft: &TaskDraft,
        today: NaiveDate,
    ) -> SubmitOutcome<Task> {
        self.field_error = None;
        self.notice = None;

        let body = match self.validate(draft, today) {
            Ok(body) => body,
            Err(field_error) => {
                self.field_error = Some(field_error.clone());
                return SubmitOutcome::Invalid(field_error);
            }
        };

        match api.create_task(&body).await {
            Ok(task) => {
                info!(milestone_id = %self.milestone_id, task_id = %task.id, "task created");
                self.close();
                self.notice = Some(Notice::success("Task created"));
                SubmitOutcome::Saved(task)
            }
            Err(e) => {
                warn!(milestone_id = %self.milestone_id, error = %e, "task creation failed");
                self.notice = Some(Notice::from_error(&e));
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Dismiss the dialog without creating anything
    pub fn close(&mut self) {
        self.open = false;
    }
}
