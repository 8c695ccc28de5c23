//! Frontmatter commands: `fm get`, `fm set`, `fm delete`.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use mdsect_core::{fm, frontmatter};

use super::{load, print_json, store};

/// `mdsect fm` command group.
#[derive(Debug, Args)]
pub struct FmCommand {
    #[command(subcommand)]
    pub subcommand: FmSubcommand,
}

/// Frontmatter subcommands.
#[derive(Debug, Subcommand)]
pub enum FmSubcommand {
    /// Print a value by dot-separated path, or the whole block.
    Get {
        /// Document file.
        file: PathBuf,
        /// Dot-separated path (e.g. `meta.priority`); whole raw block when
        /// omitted.
        path: Option<String>,
    },
    /// Set a value by dot-separated path, creating intermediate maps (and
    /// the frontmatter block itself) as needed.
    Set {
        /// Document file.
        file: PathBuf,
        /// Dot-separated path.
        path: String,
        /// Value. `true`/`false`, numbers, and `null` are stored typed;
        /// everything else is a string.
        value: String,
    },
    /// Delete the value at a dot-separated path. Emptied parent maps are
    /// kept, not pruned.
    Delete {
        /// Document file.
        file: PathBuf,
        /// Dot-separated path.
        path: String,
    },
}

/// Execute an `fm` subcommand.
pub fn run(cmd: FmCommand, json: bool) -> anyhow::Result<()> {
    match cmd.subcommand {
        FmSubcommand::Get { file, path } => {
            let doc = load(&file)?;
            match path {
                None => {
                    let block = fm::get_content(&doc);
                    if json {
                        print_json(&serde_json::json!({ "frontmatter": block }))?;
                    } else {
                        println!("{block}");
                    }
                }
                Some(path) => {
                    let value = fm::get(&doc, &path)?;
                    if json {
                        print_json(&serde_json::json!({ "path": path, "value": value }))?;
                    } else {
                        match value {
                            Some(v) => println!("{}", frontmatter::display_value(&v)),
                            None => println!(),
                        }
                    }
                }
            }
            Ok(())
        }
        FmSubcommand::Set { file, path, value } => {
            let doc = load(&file)?;
            let text = fm::set(&doc, &path, frontmatter::coerce_scalar(&value))?;
            store(&file, &text)?;
            if json {
                print_json(&serde_json::json!({ "action": "set", "path": path }))?;
            } else {
                println!("set {path}");
            }
            Ok(())
        }
        FmSubcommand::Delete { file, path } => {
            let doc = load(&file)?;
            let text = fm::delete(&doc, &path)?;
            store(&file, &text)?;
            if json {
                print_json(&serde_json::json!({ "action": "deleted", "path": path }))?;
            } else {
                println!("deleted {path}");
            }
            Ok(())
        }
    }
}
