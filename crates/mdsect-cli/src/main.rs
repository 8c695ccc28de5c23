//! `mdsect` - surgical command-line editor for heading-structured text.
//!
//! Every command reads a file, operates on a fresh parse, and (for
//! mutations) writes the whole new text back. Output is human text by
//! default or JSON with `--json`; errors map to deterministic exit codes
//! so scripted callers never have to parse stderr.

mod commands;
mod exit_codes;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{frontmatter, inspect, section, task};

/// Surgical section editor for Markdown-like documents.
#[derive(Debug, Parser)]
#[command(name = "mdsect", version, about)]
struct Cli {
    /// Emit machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a document's outline and metadata.
    Parse(inspect::ParseArgs),
    /// Print a section's body.
    Read(section::ReadArgs),
    /// Replace a section's body.
    Write(section::WriteArgs),
    /// Insert content relative to a section.
    Append(section::AppendArgs),
    /// Clear a section's body, keeping the heading.
    Empty(section::EmptyArgs),
    /// Delete a section and its whole subtree.
    Remove(section::RemoveArgs),
    /// Get, set, or delete frontmatter values.
    Fm(frontmatter::FmCommand),
    /// Search document content.
    Search(inspect::SearchArgs),
    /// Concatenate documents.
    Cat(inspect::CatArgs),
    /// Print the id a heading would receive.
    Hash(inspect::HashArgs),
    /// Task-file bookkeeping.
    Task(task::TaskCommand),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Parse(args) => inspect::run_parse(args, cli.json),
        Command::Read(args) => section::run_read(args, cli.json),
        Command::Write(args) => section::run_write(args, cli.json),
        Command::Append(args) => section::run_append(args, cli.json),
        Command::Empty(args) => section::run_empty(args, cli.json),
        Command::Remove(args) => section::run_remove(args, cli.json),
        Command::Fm(cmd) => frontmatter::run(cmd, cli.json),
        Command::Search(args) => inspect::run_search(args, cli.json),
        Command::Cat(args) => inspect::run_cat(args),
        Command::Hash(args) => inspect::run_hash(args, cli.json),
        Command::Task(cmd) => task::run(cmd, cli.json),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        let code = exit_codes::map_error(&err);
        eprintln!("error: {err:#}");
        std::process::exit(code as i32);
    }
}
