//! CLI module for veila
//!
//! Provides the command-line interface using clap.

pub mod commands;

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::errors::{Result, VeilaError};
use crate::fs::CONFIG_ENV_VAR;
use crate::schemas::dates::parse_day;

/// Veila - order milestone and task workflow client
#[derive(Parser, Debug)]
#[command(name = "veila")]
#[command(version)]
#[command(about = "Track an order's milestones and tasks against the Veila API")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH", env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Treat this date as today when checking due dates
    #[arg(long, global = true, value_name = "YYYY-MM-DD", value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and update an order's milestones
    Milestones {
        #[command(subcommand)]
        command: MilestoneCommands,
    },

    /// Inspect and update a milestone's tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Interactive board of an order's milestones and tasks
    Board {
        /// Order ID
        order_id: String,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum MilestoneCommands {
    /// List an order's milestones with their tasks
    List {
        /// Order ID
        order_id: String,
    },

    /// Change a milestone's due date
    SetDue {
        /// Order ID
        order_id: String,

        /// Milestone ID
        milestone_id: String,

        /// New due date
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date_arg)]
        due: NaiveDate,
    },

    /// Move a pending milestone to in progress
    Start {
        /// Order ID
        order_id: String,

        /// Milestone ID
        milestone_id: String,
    },

    /// Mark an in-progress milestone as completed
    Complete {
        /// Order ID
        order_id: String,

        /// Milestone ID
        milestone_id: String,
    },

    /// Cancel a milestone that is not yet finished
    Cancel {
        /// Order ID
        order_id: String,

        /// Milestone ID
        milestone_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List a milestone's tasks
    List {
        /// Milestone ID
        milestone_id: String,
    },

    /// Create a task at the end of a milestone
    Create {
        /// Milestone ID
        milestone_id: String,

        /// Task title
        #[arg(long)]
        title: String,

        /// Task description
        #[arg(long, default_value = "")]
        description: String,

        /// Due date, after the milestone's last task
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date_arg)]
        due: Option<NaiveDate>,
    },

    /// Edit a task's title, description or due date
    Edit {
        /// Milestone ID
        milestone_id: String,

        /// Task ID
        task_id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New due date
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date_arg)]
        due: Option<NaiveDate>,
    },

    /// Move a pending task to in progress
    Start {
        /// Milestone ID
        milestone_id: String,

        /// Task ID
        task_id: String,
    },

    /// Mark an in-progress task as completed
    Complete {
        /// Milestone ID
        milestone_id: String,

        /// Task ID
        task_id: String,
    },

    /// Cancel a task that is not yet finished
    Cancel {
        /// Milestone ID
        milestone_id: String,

        /// Task ID
        task_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved config (token redacted)
    Show,
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub json: bool,
    pub today: NaiveDate,
    pub page_size: u32,
}

fn parse_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_day(value)
}

/// Write `value` as pretty JSON followed by a newline
pub(crate) fn write_json_output<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| VeilaError::InvalidJson(e.to_string()))?;
    writeln!(out, "{}", text)?;
    Ok(())
}
