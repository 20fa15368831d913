//! In-memory stand-in for the marketplace API used by unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::{Result, VeilaError};
use crate::schemas::dates::{day_start, parse_day};
use crate::schemas::{
    Milestone, NewTask, Page, PageRequest, Pagination, ProgressStatus, Task, TaskPatch,
};

use super::MilestoneApi;

/// A recorded call: operation name plus its arguments rendered as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: &'static str,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
enum Failure {
    Remote { status: u16, message: String },
    Network(String),
}

#[derive(Default)]
struct Store {
    milestones: Vec<Milestone>,
    tasks: Vec<Task>,
    calls: Vec<Call>,
    failures: HashMap<&'static str, Failure>,
    next_id: u32,
}

/// Records every call and serves milestones and tasks from memory.
#[derive(Default)]
pub struct FakeApi {
    store: Mutex<Store>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_milestone(&self, milestone: Milestone) {
        self.store.lock().unwrap().milestones.push(milestone);
    }

    pub fn add_task(&self, task: Task) {
        self.store.lock().unwrap().tasks.push(task);
    }

    /// Make every later call to `op` fail with an API rejection
    pub fn reject(&self, op: &'static str, status: u16, message: &str) {
        self.store.lock().unwrap().failures.insert(
            op,
            Failure::Remote {
                status,
                message: message.to_string(),
            },
        );
    }

    /// Make every later call to `op` fail before reaching the API
    pub fn disconnect(&self, op: &'static str) {
        self.store
            .lock()
            .unwrap()
            .failures
            .insert(op, Failure::Network("connection refused".to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.store.lock().unwrap().calls.clone()
    }

    pub fn calls_named(&self, op: &str) -> usize {
        self.calls().iter().filter(|c| c.op == op).count()
    }

    pub fn tasks_of(&self, milestone_id: &str) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .store
            .lock()
            .unwrap()
            .tasks
            .iter()
            .filter(|t| t.milestone_id == milestone_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.index);
        tasks
    }

    pub fn milestone(&self, id: &str) -> Option<Milestone> {
        self.store
            .lock()
            .unwrap()
            .milestones
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    fn record(&self, op: &'static str, args: Vec<String>) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(Call { op, args });
        match store.failures.get(op).cloned() {
            Some(Failure::Remote { status, message }) => {
                Err(VeilaError::Remote { status, message })
            }
            Some(Failure::Network(message)) => Err(VeilaError::Network(message)),
            None => Ok(()),
        }
    }
}

fn paginate<T: Clone>(mut items: Vec<T>, request: &PageRequest) -> Page<T> {
    let total = items.len();
    let size = request.size.max(1) as usize;
    let start = (request.page as usize * size).min(total);
    let end = (start + size).min(total);
    let slice: Vec<T> = items.drain(start..end).collect();
    Page {
        items: slice,
        pagination: Pagination {
            total: total as u64,
            page: request.page,
            size: request.size,
            total_pages: total.div_ceil(size) as u32,
        },
    }
}

fn not_found(what: &str, id: &str) -> VeilaError {
    VeilaError::Remote {
        status: 404,
        message: format!("{} {} not found", what, id),
    }
}

#[async_trait]
impl MilestoneApi for FakeApi {
    async fn list_milestones(&self, order_id: &str, page: &PageRequest) -> Result<Page<Milestone>> {
        self.record(
            "list_milestones",
            vec![order_id.to_string(), page.sort.to_string(), page.page.to_string()],
        )?;
        let mut milestones: Vec<Milestone> = self
            .store
            .lock()
            .unwrap()
            .milestones
            .iter()
            .filter(|m| m.order_id == order_id)
            .cloned()
            .collect();
        milestones.sort_by_key(|m| m.index);
        Ok(paginate(milestones, page))
    }

    async fn update_milestone_due_date(
        &self,
        milestone_id: &str,
        due: NaiveDate,
    ) -> Result<Milestone> {
        self.record(
            "update_milestone_due_date",
            vec![milestone_id.to_string(), due.to_string()],
        )?;
        let mut store = self.store.lock().unwrap();
        let milestone = store
            .milestones
            .iter_mut()
            .find(|m| m.id == milestone_id)
            .ok_or_else(|| not_found("Milestone", milestone_id))?;
        milestone.due_date = day_start(due);
        Ok(milestone.clone())
    }

    async fn transition_milestone_status(
        &self,
        milestone_id: &str,
        status: ProgressStatus,
    ) -> Result<()> {
        self.record(
            "transition_milestone_status",
            vec![milestone_id.to_string(), status.as_wire().to_string()],
        )?;
        let mut store = self.store.lock().unwrap();
        let milestone = store
            .milestones
            .iter_mut()
            .find(|m| m.id == milestone_id)
            .ok_or_else(|| not_found("Milestone", milestone_id))?;
        milestone.status = status;
        Ok(())
    }

    async fn list_milestone_tasks(
        &self,
        milestone_id: &str,
        page: &PageRequest,
    ) -> Result<Page<Task>> {
        self.record(
            "list_milestone_tasks",
            vec![milestone_id.to_string(), page.sort.to_string(), page.page.to_string()],
        )?;
        Ok(paginate(self.tasks_of(milestone_id), page))
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        self.record(
            "create_task",
            vec![
                task.milestone_id.clone(),
                task.title.clone(),
                task.description.clone(),
                task.due_date.clone(),
            ],
        )?;
        let due = parse_day(&task.due_date).map_err(|e| VeilaError::Remote {
            status: 400,
            message: e,
        })?;
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let index = store
            .tasks
            .iter()
            .filter(|t| t.milestone_id == task.milestone_id)
            .map(|t| t.index)
            .max()
            .unwrap_or(0)
            + 1;
        let created = Task::new(
            format!("new-{}", store.next_id),
            task.milestone_id.clone(),
            index,
            task.title.clone(),
            due,
        )
        .with_description(task.description.clone());
        store.tasks.push(created.clone());
        Ok(created)
    }

    async fn update_task(
        &self,
        milestone_id: &str,
        task_id: &str,
        patch: &TaskPatch,
    ) -> Result<Task> {
        self.record(
            "update_task",
            vec![
                milestone_id.to_string(),
                task_id.to_string(),
                serde_json::to_string(patch).unwrap_or_default(),
            ],
        )?;
        let mut store = self.store.lock().unwrap();
        let task = store
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id && t.milestone_id == milestone_id)
            .ok_or_else(|| not_found("Task", task_id))?;
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }
        if let Some(due) = &patch.due_date {
            let day = parse_day(due).map_err(|e| VeilaError::Remote {
                status: 400,
                message: e,
            })?;
            task.due_date = day_start(day);
        }
        Ok(task.clone())
    }

    async fn transition_task_status(
        &self,
        milestone_id: &str,
        task_id: &str,
        status: ProgressStatus,
    ) -> Result<()> {
        self.record(
            "transition_task_status",
            vec![
                milestone_id.to_string(),
                task_id.to_string(),
                status.as_wire().to_string(),
            ],
        )?;
        let mut store = self.store.lock().unwrap();
        let task = store
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id && t.milestone_id == milestone_id)
            .ok_or_else(|| not_found("Task", task_id))?;
        task.status = status;
        Ok(())
    }
}
