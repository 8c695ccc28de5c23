//! Command implementations.
//!
//! Each submodule owns one command group: argument types (clap derive),
//! execution, and output rendering. The core is pure, so every command
//! follows the same shape: read the file, parse, transform, write the new
//! text back, report. All file I/O in the binary lives in this module's
//! helpers.

pub mod frontmatter;
pub mod inspect;
pub mod section;
pub mod task;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use mdsect_core::{Document, SectionId};

/// Read and parse a document file.
pub fn load(path: &Path) -> anyhow::Result<Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(Document::parse(&text))
}

/// Read a document file as raw text.
pub fn load_raw(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Write mutated text back to the file.
pub fn store(path: &Path, text: &str) -> anyhow::Result<()> {
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote document");
    Ok(())
}

/// Validate a section id argument.
pub fn parse_id(raw: &str) -> anyhow::Result<SectionId> {
    Ok(SectionId::parse(raw)?)
}

/// Mutation content: `--content` wins, otherwise stdin is read to EOF.
pub fn read_content(content: Option<String>) -> anyhow::Result<String> {
    match content {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading content from stdin")?;
            Ok(buf)
        }
    }
}

/// Serialize any value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
