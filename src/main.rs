//! Veila CLI - track an order's milestones and tasks

use std::io;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use veila::api::{HttpMilestoneApi, MilestoneApi};
use veila::cli::commands;
use veila::cli::{Cli, CommandContext, Commands, ConfigCommands, MilestoneCommands, TaskCommands};
use veila::config::load_config;
use veila::domain::StatusAction;
use veila::errors::{to_exit_code, VeilaError};
use veila::fs::resolve_config_path;
use veila::workflow::{today_local, TaskDraft, TaskEdit};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The board draws on the terminal, so it gets no log output
    if !matches!(cli.command, Commands::Board { .. }) {
        init_tracing(cli.verbose, cli.quiet);
    }

    let result = tokio::select! {
        result = run(cli) => result,
        _ = tokio::signal::ctrl_c() => Err(VeilaError::Interrupted),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            debug!(code = e.code(), client_side = e.is_client_side(), error = %e, "command failed");
            eprintln!("Error: {}", error_text(&e));
            std::process::exit(to_exit_code(&e));
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Local file problems are shown in full; remote and network failures use the user-facing text
fn error_text(error: &VeilaError) -> String {
    match error {
        VeilaError::InvalidJson(_)
        | VeilaError::FileNotFound(_)
        | VeilaError::Io(_)
        | VeilaError::Wrapped { .. } => {
            error.to_string()
        }
        _ => error.user_message(),
    }
}

async fn run(cli: Cli) -> veila::Result<()> {
    let Cli {
        command,
        json,
        config,
        today,
        ..
    } = cli;

    let config_path = resolve_config_path(config.as_deref())?;
    let mut stdout = io::stdout();

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Init { force } => {
                commands::config::init(&config_path, force, &mut stdout)
            }
            ConfigCommands::Show => {
                let config = load_config(&config_path)?;
                commands::config::show(&config_path, &config, json, &mut stdout)
            }
        },
        Commands::Milestones { command } => {
            use commands::milestones;
            let (api, ctx) = connect(&config_path, json, today)?;
            match command {
                MilestoneCommands::List { order_id } => {
                    milestones::list(api.as_ref(), &ctx, &order_id, &mut stdout).await
                }
                MilestoneCommands::SetDue {
                    order_id,
                    milestone_id,
                    due,
                } => {
                    milestones::set_due(
                        api.as_ref(),
                        &ctx,
                        &order_id,
                        &milestone_id,
                        due,
                        &mut stdout,
                    )
                    .await
                }
                MilestoneCommands::Start {
                    order_id,
                    milestone_id,
                } => {
                    milestones::transition(
                        api.as_ref(),
                        &ctx,
                        &order_id,
                        &milestone_id,
                        StatusAction::Start,
                        &mut stdout,
                    )
                    .await
                }
                MilestoneCommands::Complete {
                    order_id,
                    milestone_id,
                } => {
                    milestones::transition(
                        api.as_ref(),
                        &ctx,
                        &order_id,
                        &milestone_id,
                        StatusAction::Complete,
                        &mut stdout,
                    )
                    .await
                }
                MilestoneCommands::Cancel {
                    order_id,
                    milestone_id,
                } => {
                    milestones::transition(
                        api.as_ref(),
                        &ctx,
                        &order_id,
                        &milestone_id,
                        StatusAction::Cancel,
                        &mut stdout,
                    )
                    .await
                }
            }
        }
        Commands::Tasks { command } => {
            use commands::tasks;
            let (api, ctx) = connect(&config_path, json, today)?;
            match command {
                TaskCommands::List { milestone_id } => {
                    tasks::list(api.as_ref(), &ctx, &milestone_id, &mut stdout).await
                }
                TaskCommands::Create {
                    milestone_id,
                    title,
                    description,
                    due,
                } => {
                    let draft = TaskDraft {
                        title,
                        description,
                        due_date: due,
                    };
                    tasks::create(api.as_ref(), &ctx, &milestone_id, draft, &mut stdout).await
                }
                TaskCommands::Edit {
                    milestone_id,
                    task_id,
                    title,
                    description,
                    due,
                } => {
                    let changes = TaskEdit {
                        title,
                        description,
                        due_date: due,
                    };
                    tasks::edit(api.as_ref(), &ctx, &milestone_id, &task_id, changes, &mut stdout)
                        .await
                }
                TaskCommands::Start {
                    milestone_id,
                    task_id,
                } => {
                    tasks::transition(
                        api.as_ref(),
                        &ctx,
                        &milestone_id,
                        &task_id,
                        StatusAction::Start,
                        &mut stdout,
                    )
                    .await
                }
                TaskCommands::Complete {
                    milestone_id,
                    task_id,
                } => {
                    tasks::transition(
                        api.as_ref(),
                        &ctx,
                        &milestone_id,
                        &task_id,
                        StatusAction::Complete,
                        &mut stdout,
                    )
                    .await
                }
                TaskCommands::Cancel {
                    milestone_id,
                    task_id,
                } => {
                    tasks::transition(
                        api.as_ref(),
                        &ctx,
                        &milestone_id,
                        &task_id,
                        StatusAction::Cancel,
                        &mut stdout,
                    )
                    .await
                }
            }
        }
        Commands::Board { order_id } => {
            let (api, ctx) = connect(&config_path, json, today)?;
            commands::board::run(api, &ctx, &order_id).await
        }
    }
}

/// Load config and build the API client for commands that talk to the server
fn connect(
    config_path: &Path,
    json: bool,
    today: Option<NaiveDate>,
) -> veila::Result<(Arc<dyn MilestoneApi>, CommandContext)> {
    let config = load_config(config_path)?;
    let api: Arc<dyn MilestoneApi> = Arc::new(HttpMilestoneApi::from_config(&config)?);
    let ctx = CommandContext {
        json,
        today: today.unwrap_or_else(today_local),
        page_size: config.page_size,
    };
    debug!(base_url = %config.api_base_url, today = %ctx.today, "connecting");
    Ok((api, ctx))
}
