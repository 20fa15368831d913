//! Remote marketplace API
//!
//! The API is the only source of truth for milestones and tasks. Everything
//! in this crate that reads or changes them goes through [`MilestoneApi`].

mod client;
pub mod envelope;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::errors::Result;
use crate::schemas::{Milestone, NewTask, Page, PageRequest, ProgressStatus, Task, TaskPatch};

pub use client::{ApiSettings, HttpMilestoneApi};
pub use envelope::ApiOutcome;

/// Operations the order fulfillment workflow needs from the API
#[async_trait]
pub trait MilestoneApi: Send + Sync {
    /// List the milestones of an order
    async fn list_milestones(&self, order_id: &str, page: &PageRequest) -> Result<Page<Milestone>>;

    /// Move a milestone to a new due date
    async fn update_milestone_due_date(
        &self,
        milestone_id: &str,
        due: NaiveDate,
    ) -> Result<Milestone>;

    /// Ask the API to move a milestone to `status`
    async fn transition_milestone_status(
        &self,
        milestone_id: &str,
        status: ProgressStatus,
    ) -> Result<()>;

    /// List the tasks of a milestone
    async fn list_milestone_tasks(
        &self,
        milestone_id: &str,
        page: &PageRequest,
    ) -> Result<Page<Task>>;

    /// Create a task under the milestone named in `task`
    async fn create_task(&self, task: &NewTask) -> Result<Task>;

    /// Edit a task's title, description or due date
    async fn update_task(
        &self,
        milestone_id: &str,
        task_id: &str,
        patch: &TaskPatch,
    ) -> Result<Task>;

    /// Ask the API to move a task to `status`
    async fn transition_task_status(
        &self,
        milestone_id: &str,
        task_id: &str,
        status: ProgressStatus,
    ) -> Result<()>;
}

/// Fetch every milestone of an order, following pages, in index order.
pub async fn list_all_milestones(
    api: &dyn MilestoneApi,
    order_id: &str,
    page_size: u32,
) -> Result<Vec<Milestone>> {
    let mut request = PageRequest::by_index(page_size);
    let mut all = Vec::new();
    loop {
        let page = api.list_milestones(order_id, &request).await?;
        let fetched = page.items.len();
        let more = page.has_page_after(request.page);
        all.extend(page.items);
        if !more || fetched == 0 {
            break;
        }
        request = request.clone().with_page(request.page + 1);
    }
    debug!(order_id, count = all.len(), "fetched milestones");
    all.sort_by_key(|m| m.index);
    Ok(all)
}

/// Fetch every task of a milestone, following pages, in index order.
pub async fn list_all_tasks(
    api: &dyn MilestoneApi,
    milestone_id: &str,
    page_size: u32,
) -> Result<Vec<Task>> {
    let mut request = PageRequest::by_index(page_size);
    let mut all = Vec::new();
    loop {
        let page = api.list_milestone_tasks(milestone_id, &request).await?;
        let fetched = page.items.len();
        let more = page.has_page_after(request.page);
        all.extend(page.items);
        if !more || fetched == 0 {
            break;
        }
        request = request.clone().with_page(request.page + 1);
    }
    debug!(milestone_id, count = all.len(), "fetched tasks");
    crate::schemas::sort_by_index(&mut all);
    Ok(all)
}
