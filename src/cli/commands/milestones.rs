//! Milestone commands - list, reschedule and change status

use std::io::Write;

use chrono::NaiveDate;
use serde_json::json;

use crate::api::{list_all_milestones, MilestoneApi};
use crate::cli::{write_json_output, CommandContext};
use crate::domain::{available_actions, StatusAction};
use crate::errors::{Result, VeilaError};
use crate::tui::widgets::status_icon;
use crate::workflow::{
    load_milestone_board, reschedule_milestone, transition_milestone, MilestoneEntry,
};

/// List an order's milestones with their nested tasks
pub async fn list(
    api: &dyn MilestoneApi,
    ctx: &CommandContext,
    order_id: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let entries = load_milestone_board(api, order_id, ctx.page_size).await?;

    if ctx.json {
        return write_json_output(out, &entries);
    }

    if entries.is_empty() {
        writeln!(out, "No milestones yet")?;
        return Ok(());
    }

    for entry in &entries {
        write_entry(out, entry)?;
    }
    Ok(())
}

fn write_entry(out: &mut dyn Write, entry: &MilestoneEntry) -> Result<()> {
    let milestone = &entry.milestone;
    let (done, total) = entry.progress();
    writeln!(
        out,
        "{} {}. {} [{}]  due {}  {}  ({}/{} tasks)",
        status_icon(milestone.status),
        milestone.index,
        milestone.title,
        milestone.id,
        milestone.due_day(),
        milestone.status,
        done,
        total
    )?;
    if !milestone.description.is_empty() {
        writeln!(out, "     {}", milestone.description)?;
    }
    for task in &entry.tasks {
        writeln!(
            out,
            "     {} {} [{}]  due {}  {}",
            status_icon(task.status),
            task.title,
            task.id,
            task.due_day(),
            task.status
        )?;
    }

    let actions = available_actions(milestone.status);
    if !actions.is_empty() {
        let labels: Vec<String> = actions.iter().map(|a| a.to_string()).collect();
        writeln!(out, "     actions: {}", labels.join(", "))?;
    }
    Ok(())
}

/// Change a milestone's due date
pub async fn set_due(
    api: &dyn MilestoneApi,
    ctx: &CommandContext,
    order_id: &str,
    milestone_id: &str,
    due: NaiveDate,
    out: &mut dyn Write,
) -> Result<()> {
    let milestone =
        reschedule_milestone(api, order_id, milestone_id, due, ctx.today, ctx.page_size)
            .await
            .into_result()?;

    if ctx.json {
        return write_json_output(out, &milestone);
    }
    writeln!(
        out,
        "Milestone {} is now due {}",
        milestone.title,
        milestone.due_day()
    )?;
    Ok(())
}

/// Apply a status action to a milestone
pub async fn transition(
    api: &dyn MilestoneApi,
    ctx: &CommandContext,
    order_id: &str,
    milestone_id: &str,
    action: StatusAction,
    out: &mut dyn Write,
) -> Result<()> {
    let milestone = list_all_milestones(api, order_id, ctx.page_size)
        .await?
        .into_iter()
        .find(|m| m.id == milestone_id)
        .ok_or_else(|| VeilaError::NotFound(format!("Milestone {} not found", milestone_id)))?;

    let status = transition_milestone(api, &milestone, action).await?;

    if ctx.json {
        return write_json_output(out, &json!({ "id": milestone.id, "status": status }));
    }
    writeln!(out, "Milestone {} is now {}", milestone.title, status)?;
    Ok(())
}
