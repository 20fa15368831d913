//! Status transitions for milestones and tasks
//!
//! Actions are checked against the status machine first; anything that gets
//! past the gate is still up to the API, whose verdict wins.

use tracing::{info, warn};

use crate::api::{list_all_tasks, MilestoneApi};
use crate::domain::{apply_status_action, StatusAction, Tracked, TransitionResult};
use crate::errors::{Result, VeilaError};
use crate::schemas::{Milestone, ProgressStatus, Task};

fn gate<T: Tracked>(item: &T, action: StatusAction) -> Result<ProgressStatus> {
    match apply_status_action(item, action) {
        TransitionResult::Success { next } => Ok(next.status()),
        TransitionResult::Error { error } => Err(VeilaError::StateTransition(error)),
    }
}

/// Apply `action` to a task. Returns the status the API accepted.
pub async fn transition_task(
    api: &dyn MilestoneApi,
    task: &Task,
    action: StatusAction,
) -> Result<ProgressStatus> {
    let target = gate(task, action)?;
    match api
        .transition_task_status(&task.milestone_id, &task.id, target)
        .await
    {
        Ok(()) => {
            info!(task_id = %task.id, status = %target, "task status changed");
            Ok(target)
        }
        Err(e) => {
            warn!(task_id = %task.id, error = %e, "task status change failed");
            Err(e)
        }
    }
}

/// Apply `action` to a milestone. Returns the status the API accepted.
pub async fn transition_milestone(
    api: &dyn MilestoneApi,
    milestone: &Milestone,
    action: StatusAction,
) -> Result<ProgressStatus> {
    let target = gate(milestone, action)?;
    match api.transition_milestone_status(&milestone.id, target).await {
        Ok(()) => {
            info!(milestone_id = %milestone.id, status = %target, "milestone status changed");
            Ok(target)
        }
        Err(e) => {
            warn!(milestone_id = %milestone.id, error = %e, "milestone status change failed");
            Err(e)
        }
    }
}

/// Look a task up by id within its milestone
pub async fn find_task(
    api: &dyn MilestoneApi,
    milestone_id: &str,
    task_id: &str,
    page_size: u32,
) -> Result<Task> {
    list_all_tasks(api, milestone_id, page_size)
        .await?
        .into_iter()
        .find(|t| t.id == task_id)
        .ok_or_else(|| {
            VeilaError::NotFound(format!(
                "Task {} not found in milestone {}",
                task_id, milestone_id
            ))
        })
}
