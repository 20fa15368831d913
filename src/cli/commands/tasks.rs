//! Task commands - list, create, edit and change status

use std::io::Write;

use chrono::NaiveDate;
use serde_json::json;

use crate::api::{list_all_tasks, MilestoneApi};
use crate::cli::{write_json_output, CommandContext};
use crate::domain::{StatusAction, FIELD_DUE_DATE};
use crate::errors::{Result, VeilaError};
use crate::schemas::Task;
use crate::tui::widgets::status_icon;
use crate::workflow::{
    edit_task, find_task, transition_task, TaskCreationDialog, TaskDraft, TaskEdit,
};

/// List a milestone's tasks in index order
pub async fn list(
    api: &dyn MilestoneApi,
    ctx: &CommandContext,
    milestone_id: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let tasks = list_all_tasks(api, milestone_id, ctx.page_size).await?;

    if ctx.json {
        return write_json_output(out, &tasks);
    }
    if tasks.is_empty() {
        writeln!(out, "No tasks yet")?;
        return Ok(());
    }
    for task in &tasks {
        write_task(out, task)?;
    }
    Ok(())
}

fn write_task(out: &mut dyn Write, task: &Task) -> Result<()> {
    writeln!(
        out,
        "{} {}. {} [{}]  due {}  {}",
        status_icon(task.status),
        task.index,
        task.title,
        task.id,
        task.due_day(),
        task.status
    )?;
    if !task.description.is_empty() {
        writeln!(out, "     {}", task.description)?;
    }
    Ok(())
}

/// Create a task after the milestone's last one
pub async fn create(
    api: &dyn MilestoneApi,
    ctx: &CommandContext,
    milestone_id: &str,
    draft: TaskDraft,
    out: &mut dyn Write,
) -> Result<()> {
    let mut dialog = TaskCreationDialog::open(api, milestone_id, ctx.page_size).await?;
    let task = match dialog.submit(api, &draft, ctx.today).await.into_result() {
        Err(VeilaError::Validation {
            field: FIELD_DUE_DATE,
            message,
        }) => {
            return Err(VeilaError::validation(
                FIELD_DUE_DATE,
                format!(
                    "{} (earliest allowed: {})",
                    message,
                    dialog.earliest_allowed(ctx.today)
                ),
            ))
        }
        other => other?,
    };

    if ctx.json {
        return write_json_output(out, &task);
    }
    writeln!(
        out,
        "Created task {} [{}] due {}",
        task.title,
        task.id,
        task.due_day()
    )?;
    Ok(())
}

/// Edit a task's fields
pub async fn edit(
    api: &dyn MilestoneApi,
    ctx: &CommandContext,
    milestone_id: &str,
    task_id: &str,
    changes: TaskEdit,
    out: &mut dyn Write,
) -> Result<()> {
    let task = edit_task(api, milestone_id, task_id, &changes, ctx.today, ctx.page_size)
        .await
        .into_result()?;

    if ctx.json {
        return write_json_output(out, &task);
    }
    writeln!(out, "Updated task {} [{}]", task.title, task.id)?;
    Ok(())
}

/// Apply a status action to a task
pub async fn transition(
    api: &dyn MilestoneApi,
    ctx: &CommandContext,
    milestone_id: &str,
    task_id: &str,
    action: StatusAction,
    out: &mut dyn Write,
) -> Result<()> {
    let task = find_task(api, milestone_id, task_id, ctx.page_size).await?;
    let status = transition_task(api, &task, action).await?;

    if ctx.json {
        return write_json_output(out, &json!({ "id": task.id, "status": status }));
    }
    writeln!(out, "Task {} is now {}", task.title, status)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::schemas::ProgressStatus;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx(json: bool) -> CommandContext {
        CommandContext {
            json,
            today: day(2024, 6, 1),
            page_size: 100,
        }
    }

    fn seeded() -> FakeApi {
        let api = FakeApi::new();
        api.add_task(Task::new("t-1", "m-1", 1, "Measure", day(2024, 6, 5)));
        api.add_task(
            Task::new("t-2", "m-1", 2, "Cut fabric", day(2024, 6, 10))
                .with_description("Silk and lace"),
        );
        api
    }

    fn draft(title: &str, due: Option<NaiveDate>) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: String::new(),
            due_date: due,
        }
    }

    #[tokio::test]
    async fn test_list_text() {
        let api = seeded();
        let mut out = Vec::new();
        list(&api, &ctx(false), "m-1", &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("○ 1. Measure [t-1]  due 2024-06-05  pending\n"));
        assert!(text.contains("Silk and lace"));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let api = FakeApi::new();
        let mut out = Vec::new();
        list(&api, &ctx(false), "m-1", &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No tasks yet\n");
    }

    #[tokio::test]
    async fn test_create_after_last_task() {
        let api = seeded();
        let mut out = Vec::new();
        create(&api, &ctx(true), "m-1", draft("Hem", Some(day(2024, 6, 11))), &mut out)
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["title"], "Hem");
        assert_eq!(value["dueDate"], "2024-06-11T00:00:00.000Z");
        assert_eq!(api.tasks_of("m-1").len(), 3);
    }

    #[tokio::test]
    async fn test_create_on_last_due_date_rejected() {
        let api = seeded();
        let mut out = Vec::new();
        let err = create(&api, &ctx(false), "m-1", draft("Hem", Some(day(2024, 6, 10))), &mut out)
            .await
            .unwrap_err();
        match err {
            VeilaError::Validation { field, message } => {
                assert_eq!(field, "dueDate");
                assert!(message.ends_with("(earliest allowed: 2024-06-11)"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(api.calls_named("create_task"), 0);
    }

    #[tokio::test]
    async fn test_create_without_due_date_suggests_day() {
        let api = FakeApi::new();
        let mut out = Vec::new();
        let err = create(&api, &ctx(false), "m-1", draft("Hem", None), &mut out)
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Due date is required (earliest allowed: 2024-06-01)"
        );
    }

    #[tokio::test]
    async fn test_create_server_message_passed_through() {
        let api = seeded();
        api.reject("create_task", 400, "Invalid milestone");
        let mut out = Vec::new();
        let err = create(&api, &ctx(false), "m-1", draft("Hem", Some(day(2024, 6, 11))), &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Invalid milestone");
    }

    #[tokio::test]
    async fn test_edit_title() {
        let api = seeded();
        let mut out = Vec::new();
        let changes = TaskEdit {
            title: Some("Measure twice".to_string()),
            ..Default::default()
        };
        edit(&api, &ctx(false), "m-1", "t-1", changes, &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Updated task Measure twice [t-1]\n");
    }

    #[tokio::test]
    async fn test_transition_complete_from_pending_blocked() {
        let api = seeded();
        let mut out = Vec::new();
        let err = transition(&api, &ctx(false), "m-1", "t-1", StatusAction::Complete, &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "STATE_TRANSITION");
        assert_eq!(api.calls_named("transition_task_status"), 0);
    }

    #[tokio::test]
    async fn test_transition_start_json() {
        let api = seeded();
        let mut out = Vec::new();
        transition(&api, &ctx(true), "m-1", "t-2", StatusAction::Start, &mut out)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["id"], "t-2");
        assert_eq!(value["status"], ProgressStatus::InProgress.as_wire());
    }
}
