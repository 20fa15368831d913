//! Milestone due date editor

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::{list_all_milestones, MilestoneApi};
use crate::domain::{validate_milestone_due_date, FIELD_DUE_DATE};
use crate::errors::{Result, VeilaError};
use crate::schemas::{previous_milestone, Milestone};

use super::{FieldError, Notice, SubmitOutcome};

/// Edits one milestone's due date against its predecessor's
#[derive(Debug, Clone)]
pub struct MilestoneDueDateEditor {
    milestone_id: String,
    previous_due: Option<NaiveDate>,
    field_error: Option<FieldError>,
    notice: Option<Notice>,
}

impl MilestoneDueDateEditor {
    /// `previous_due` is the due date of the milestone before this one, if any
    pub fn new(milestone_id: impl Into<String>, previous_due: Option<NaiveDate>) -> Self {
        Self {
            milestone_id: milestone_id.into(),
            previous_due,
            field_error: None,
            notice: None,
        }
    }

    /// Build an editor for `milestone_id` from the full list of its order
    pub fn for_milestone(milestones: &[Milestone], milestone_id: &str) -> Result<Self> {
        if !milestones.iter().any(|m| m.id == milestone_id) {
            return Err(VeilaError::NotFound(format!(
                "Milestone {} not found",
                milestone_id
            )));
        }
        let previous = previous_milestone(milestones, milestone_id).map(|m| m.due_day());
        Ok(Self::new(milestone_id, previous))
    }

    pub fn field_error(&self) -> Option<&FieldError> {
        self.field_error.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Check a candidate date without sending anything
    pub fn validate(&self, new_due: Option<NaiveDate>, today: NaiveDate) -> Result<NaiveDate> {
        let new_due = new_due
            .ok_or_else(|| VeilaError::validation(FIELD_DUE_DATE, "Due date is required"))?;
        validate_milestone_due_date(new_due, self.previous_due, today).into_result(FIELD_DUE_DATE)?;
        Ok(new_due)
    }

    /// Validate and, if valid, send the new due date.
    pub async fn submit(
        &mut self,
        api: &dyn MilestoneApi,
        new_due: Option<NaiveDate>,
        today: NaiveDate,
    ) -> SubmitOutcome<Milestone> {
        self.field_error = None;
        self.notice = None;

        let new_due = match self.validate(new_due, today) {
            Ok(day) => day,
            Err(e) => {
                let outcome = SubmitOutcome::from_error(e);
                if let SubmitOutcome::Invalid(field_error) = &outcome {
                    self.field_error = Some(field_error.clone());
                }
                return outcome;
            }
        };

        match api.update_milestone_due_date(&self.milestone_id, new_due).await {
            Ok(milestone) => {
                info!(milestone_id = %self.milestone_id, due = %new_due, "milestone rescheduled");
                self.notice = Some(Notice::success("Due date updated"));
                SubmitOutcome::Saved(milestone)
            }
            Err(e) => {
                warn!(milestone_id = %self.milestone_id, error = %e, "milestone reschedule failed");
                self.notice = Some(Notice::from_error(&e));
                SubmitOutcome::Failed(e)
            }
        }
    }
}

/// Reschedule a milestone knowing only its order, deriving the predecessor by index.
pub async fn reschedule_milestone(
    api: &dyn MilestoneApi,
    order_id: &str,
    milestone_id: &str,
    new_due: NaiveDate,
    today: NaiveDate,
    page_size: u32,
) -> SubmitOutcome<Milestone> {
    let milestones = match list_all_milestones(api, order_id, page_size).await {
        Ok(list) => list,
        Err(e) => return SubmitOutcome::Failed(e),
    };
    let mut editor = match MilestoneDueDateEditor::for_milestone(&milestones, milestone_id) {
        Ok(editor) => editor,
        Err(e) => return SubmitOutcome::Failed(e),
    };
    editor.submit(api, Some(new_due), today).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded() -> FakeApi {
        let api = FakeApi::new();
        api.add_milestone(Milestone::new("m-1", "o-1", 1, "Deposit", day(2024, 6, 1)));
        api.add_milestone(Milestone::new("m-2", "o-1", 2, "Fitting", day(2024, 6, 15)));
        api
    }

    #[tokio::test]
    async fn test_past_date_blocks_remote_call() {
        let api = seeded();
        let mut editor = MilestoneDueDateEditor::new("m-1", None);

        let outcome = editor.submit(&api, Some(day(2024, 5, 1)), day(2024, 5, 10)).await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(
            editor.field_error().unwrap().message,
            "Due date cannot be in the past"
        );
        assert_eq!(api.calls_named("update_milestone_due_date"), 0);
    }

    #[tokio::test]
    async fn test_must_follow_previous_milestone() {
        let api = seeded();
        let mut editor = MilestoneDueDateEditor::new("m-2", Some(day(2024, 6, 1)));

        let outcome = editor.submit(&api, Some(day(2024, 6, 1)), day(2024, 5, 1)).await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(api.calls().len(), 0);

        let outcome = editor.submit(&api, Some(day(2024, 6, 2)), day(2024, 5, 1)).await;
        assert!(outcome.is_saved());
        assert!(editor.field_error().is_none());
        assert_eq!(api.milestone("m-2").unwrap().due_day(), day(2024, 6, 2));
    }

    #[tokio::test]
    async fn test_missing_date_is_invalid() {
        let api = seeded();
        let mut editor = MilestoneDueDateEditor::new("m-1", None);
        let outcome = editor.submit(&api, None, day(2024, 5, 1)).await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(FieldError { field: "dueDate", .. })));
    }

    #[tokio::test]
    async fn test_remote_rejection_surfaces_message() {
        let api = seeded();
        api.reject("update_milestone_due_date", 403, "Only the shop can edit milestones");
        let mut editor = MilestoneDueDateEditor::new("m-1", None);

        let outcome = editor.submit(&api, Some(day(2024, 7, 1)), day(2024, 5, 1)).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(VeilaError::Remote { status: 403, .. })));
        assert_eq!(
            editor.notice().unwrap().message,
            "Only the shop can edit milestones"
        );
        assert_eq!(api.milestone("m-1").unwrap().due_day(), day(2024, 6, 1));
    }

    #[tokio::test]
    async fn test_reschedule_derives_previous_milestone() {
        let api = seeded();
        let today = day(2024, 5, 1);

        let outcome = reschedule_milestone(&api, "o-1", "m-2", day(2024, 5, 20), today, 100).await;
        match outcome {
            SubmitOutcome::Invalid(error) => assert!(error.message.contains("2024-06-01")),
            other => panic!("unexpected outcome: {other:?}"),
        }

        let outcome = reschedule_milestone(&api, "o-1", "m-1", day(2024, 5, 20), today, 100).await;
        assert!(outcome.is_saved());
    }

    #[tokio::test]
    async fn test_reschedule_unknown_milestone() {
        let api = seeded();
        let outcome =
            reschedule_milestone(&api, "o-1", "m-9", day(2024, 7, 1), day(2024, 5, 1), 100).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(VeilaError::NotFound(_))));
        assert_eq!(api.calls_named("update_milestone_due_date"), 0);
    }
}
