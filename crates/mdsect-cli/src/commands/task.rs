//! Task bookkeeping commands: `task init|show|log|checkpoint|status`.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Subcommand};
use mdsect_tasks::TaskStatus;

use super::{load_raw, print_json, read_content, store};

/// `mdsect task` command group.
#[derive(Debug, Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub subcommand: TaskSubcommand,
}

/// Task subcommands.
#[derive(Debug, Subcommand)]
pub enum TaskSubcommand {
    /// Create a new task file.
    Init {
        /// Path for the new file; must not already exist.
        file: PathBuf,
        /// Task title.
        #[arg(long)]
        title: String,
    },
    /// Validate a task file and print its summary.
    Show {
        /// Task file.
        file: PathBuf,
    },
    /// Append a dated log entry.
    Log {
        /// Task file.
        file: PathBuf,
        /// Entry text; read from stdin when omitted.
        #[arg(long)]
        message: Option<String>,
    },
    /// Append a structured checkpoint.
    Checkpoint {
        /// Task file.
        file: PathBuf,
        /// Checkpoint name.
        name: String,
        /// Optional note.
        #[arg(long)]
        note: Option<String>,
    },
    /// Set the task status.
    Status {
        /// Task file.
        file: PathBuf,
        /// New lifecycle status.
        status: StatusArg,
    },
}

/// Status argument values.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StatusArg {
    /// Created, not yet started.
    Open,
    /// Being worked on.
    Active,
    /// Waiting on something external.
    Blocked,
    /// Finished.
    Done,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Open => Self::Open,
            StatusArg::Active => Self::Active,
            StatusArg::Blocked => Self::Blocked,
            StatusArg::Done => Self::Done,
        }
    }
}

/// Execute a `task` subcommand.
pub fn run(cmd: TaskCommand, json: bool) -> anyhow::Result<()> {
    let now = Utc::now();
    match cmd.subcommand {
        TaskSubcommand::Init { file, title } => {
            if file.exists() {
                anyhow::bail!("refusing to overwrite existing file {}", file.display());
            }
            let text = mdsect_tasks::init(&title, now);
            store(&file, &text)?;
            if json {
                print_json(&serde_json::json!({ "action": "created", "title": title }))?;
            } else {
                println!("created {}", file.display());
            }
            Ok(())
        }
        TaskSubcommand::Show { file } => {
            let raw = load_raw(&file)?;
            let summary = mdsect_tasks::validate(&raw)
                .with_context(|| format!("validating {}", file.display()))?;
            if json {
                return print_json(&summary);
            }
            if let Some(title) = &summary.title {
                println!("{title}");
            }
            println!("status: {}", summary.status);
            if let Some(created) = &summary.created {
                println!("created: {created}");
            }
            if let Some(updated) = &summary.updated {
                println!("updated: {updated}");
            }
            println!(
                "{} entries, {} checkpoints",
                summary.entries, summary.checkpoints
            );
            Ok(())
        }
        TaskSubcommand::Log { file, message } => {
            let raw = load_raw(&file)?;
            let message = read_content(message)?;
            let text = mdsect_tasks::append_entry(&raw, &message, now)?;
            store(&file, &text)?;
            if json {
                print_json(&serde_json::json!({ "action": "logged" }))?;
            } else {
                println!("logged entry");
            }
            Ok(())
        }
        TaskSubcommand::Checkpoint { file, name, note } => {
            let raw = load_raw(&file)?;
            let text = mdsect_tasks::add_checkpoint(&raw, &name, note.as_deref(), now)?;
            store(&file, &text)?;
            if json {
                print_json(&serde_json::json!({ "action": "checkpoint", "name": name }))?;
            } else {
                println!("checkpoint {name}");
            }
            Ok(())
        }
        TaskSubcommand::Status { file, status } => {
            let raw = load_raw(&file)?;
            let status = TaskStatus::from(status);
            let text = mdsect_tasks::set_status(&raw, status, now)?;
            store(&file, &text)?;
            if json {
                print_json(&serde_json::json!({ "action": "status", "status": status }))?;
            } else {
                println!("status {status}");
            }
            Ok(())
        }
    }
}
