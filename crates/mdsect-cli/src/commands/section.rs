//! Section mutation commands: `read`, `write`, `append`, `empty`, `remove`.

use std::path::PathBuf;

use clap::Args;
use mdsect_core::{mutate, AppendOptions, MutationResult};

use super::{load, parse_id, read_content, print_json, store};

/// Arguments shared by every section-addressed command.
#[derive(Debug, Args)]
pub struct Target {
    /// Document file.
    pub file: PathBuf,

    /// Section id (from `mdsect parse` or `mdsect hash`).
    pub id: String,

    /// Operate on the section's whole subtree instead of its shallow body.
    #[arg(long)]
    pub deep: bool,
}

/// `mdsect read` arguments.
#[derive(Debug, Args)]
pub struct ReadArgs {
    #[command(flatten)]
    pub target: Target,
}

/// `mdsect write` arguments.
#[derive(Debug, Args)]
pub struct WriteArgs {
    #[command(flatten)]
    pub target: Target,

    /// New body text; read from stdin when omitted.
    #[arg(long)]
    pub content: Option<String>,
}

/// `mdsect append` arguments.
#[derive(Debug, Args)]
pub struct AppendArgs {
    #[command(flatten)]
    pub target: Target,

    /// Text to insert; read from stdin when omitted.
    #[arg(long)]
    pub content: Option<String>,

    /// Insert immediately before the heading line instead of after the
    /// body, e.g. to add a new sibling section ahead of this one.
    #[arg(long)]
    pub before: bool,
}

/// `mdsect empty` arguments.
#[derive(Debug, Args)]
pub struct EmptyArgs {
    #[command(flatten)]
    pub target: Target,
}

/// `mdsect remove` arguments. Removal is always deep: the section's whole
/// subtree goes with it.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Document file.
    pub file: PathBuf,

    /// Section id.
    pub id: String,
}

/// Print a section's body.
pub fn run_read(args: ReadArgs, json: bool) -> anyhow::Result<()> {
    let doc = load(&args.target.file)?;
    let id = parse_id(&args.target.id)?;
    let body = mutate::read(&doc, &id, args.target.deep)?;
    if json {
        print_json(&serde_json::json!({ "id": id, "content": body }))?;
    } else {
        println!("{body}");
    }
    Ok(())
}

/// Replace a section's body and persist the file.
pub fn run_write(args: WriteArgs, json: bool) -> anyhow::Result<()> {
    let doc = load(&args.target.file)?;
    let id = parse_id(&args.target.id)?;
    let content = read_content(args.content)?;
    let (text, result) = mutate::write(&doc, &id, &content, args.target.deep)?;
    store(&args.target.file, &text)?;
    report(&result, json)
}

/// Insert content relative to a section and persist the file.
pub fn run_append(args: AppendArgs, json: bool) -> anyhow::Result<()> {
    let doc = load(&args.target.file)?;
    let id = parse_id(&args.target.id)?;
    let content = read_content(args.content)?;
    let options = AppendOptions {
        deep: args.target.deep,
        before: args.before,
    };
    let (text, result) = mutate::append(&doc, &id, &content, options)?;
    store(&args.target.file, &text)?;
    report(&result, json)
}

/// Clear a section's body and persist the file.
pub fn run_empty(args: EmptyArgs, json: bool) -> anyhow::Result<()> {
    let doc = load(&args.target.file)?;
    let id = parse_id(&args.target.id)?;
    let (text, result) = mutate::empty(&doc, &id, args.target.deep)?;
    store(&args.target.file, &text)?;
    report(&result, json)
}

/// Delete a section and its subtree, and persist the file.
pub fn run_remove(args: RemoveArgs, json: bool) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let id = parse_id(&args.id)?;
    let (text, result) = mutate::remove(&doc, &id)?;
    store(&args.file, &text)?;
    report(&result, json)
}

fn report(result: &MutationResult, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(result);
    }
    let action = match result.action {
        mdsect_core::MutationAction::Updated => "updated",
        mdsect_core::MutationAction::Appended => "appended",
        mdsect_core::MutationAction::Emptied => "emptied",
        mdsect_core::MutationAction::Removed => "removed",
    };
    println!(
        "{action} {} (+{} -{} lines)",
        result.id, result.lines_added, result.lines_removed
    );
    Ok(())
}
