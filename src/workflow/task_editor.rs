//! Task editing

use chrono::NaiveDate;
use tracing::info;

use crate::api::{list_all_tasks, MilestoneApi};
use crate::domain::{
    can_edit_task, validate_task_due_date_edit, validate_task_title, FIELD_DUE_DATE, FIELD_FORM,
    FIELD_STATUS, FIELD_TITLE,
};
use crate::errors::{Result, VeilaError};
use crate::schemas::dates::format_due_date;
use crate::schemas::{Task, TaskPatch};

use super::SubmitOutcome;

/// Fields to change on an existing task; `None` leaves a field as is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

fn build_patch(
    task_id: &str,
    edit: &TaskEdit,
    tasks: &[Task],
    today: NaiveDate,
) -> Result<TaskPatch> {
    let task = tasks
        .iter()
        .find(|t| t.id == task_id)
        .ok_or_else(|| VeilaError::NotFound(format!("Task {} not found", task_id)))?;
    can_edit_task(task.status).into_result(FIELD_STATUS)?;

    if let Some(title) = &edit.title {
        validate_task_title(title).into_result(FIELD_TITLE)?;
    }
    if let Some(due) = edit.due_date {
        validate_task_due_date_edit(task_id, due, tasks, today).into_result(FIELD_DUE_DATE)?;
    }

    let patch = TaskPatch {
        title: edit.title.as_ref().map(|t| t.trim().to_string()),
        description: edit.description.clone(),
        due_date: edit.due_date.map(format_due_date),
    };
    if patch.is_empty() {
        return Err(VeilaError::validation(FIELD_FORM, "Nothing to change"));
    }
    Ok(patch)
}

/// Edit a task, keeping due dates strictly increasing by index.
pub async fn edit_task(
    api: &dyn MilestoneApi,
    milestone_id: &str,
    task_id: &str,
    edit: &TaskEdit,
    today: NaiveDate,
    page_size: u32,
) -> SubmitOutcome<Task> {
    let tasks = match list_all_tasks(api, milestone_id, page_size).await {
        Ok(tasks) => tasks,
        Err(e) => return SubmitOutcome::Failed(e),
    };
    let patch = match build_patch(task_id, edit, &tasks, today) {
        Ok(patch) => patch,
        Err(e) => return SubmitOutcome::from_error(e),
    };

    match api.update_task(milestone_id, task_id, &patch).await {
        Ok(task) => {
            info!(milestone_id, task_id, "task updated");
            SubmitOutcome::Saved(task)
        }
        Err(e) => SubmitOutcome::Failed(e),
    }
}
