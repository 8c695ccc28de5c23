#![warn(missing_docs)]
//! `mdsect-tasks` - Task-file bookkeeping on top of `mdsect-core`.
//!
//! A task file is an ordinary heading-structured document with a small,
//! well-known shape: YAML frontmatter carrying `status`, `created` and
//! `updated` fields, a level-1 `Entries` section holding dated narrative
//! log entries, and a level-1 `Checkpoints` section holding structured
//! checkpoints. Because section ids are pure functions of
//! `(level, title, occurrence)`, the two well-known sections are located
//! by precomputed hash, never by line number.
//!
//! This crate is a *client* of the core: it consumes only the public parse,
//! locate, mutate, and frontmatter operations, and it never reaches into
//! the line buffer. All functions are pure text transforms; timestamps are
//! injected so callers own the clock, and file I/O belongs to the caller.

use chrono::{DateTime, SecondsFormat, Utc};
use mdsect_core::{fm, mutate, AppendOptions, CoreError, Document, SectionId};
use thiserror::Error;

/// Title of the well-known log-entry section.
pub const ENTRIES_TITLE: &str = "Entries";

/// Title of the well-known checkpoint section.
pub const CHECKPOINTS_TITLE: &str = "Checkpoints";

/// Errors produced by task-file operations.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The document does not have the structural shape of a task file.
    #[error("invalid task file: {0}")]
    InvalidTaskFile(String),

    /// A core document operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Task lifecycle status stored in frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, not yet started.
    Open,
    /// Being worked on.
    Active,
    /// Waiting on something external.
    Blocked,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// The frontmatter string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Active => "active",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            "done" => Ok(Self::Done),
            other => Err(TaskError::InvalidTaskFile(format!(
                "unknown status '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated summary of one task file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TaskSummary {
    /// The task title (first level-1 heading that is not a well-known
    /// section), if any.
    pub title: Option<String>,
    /// Current status string from frontmatter.
    pub status: String,
    /// Creation timestamp string from frontmatter, if present.
    pub created: Option<String>,
    /// Last-updated timestamp string from frontmatter, if present.
    pub updated: Option<String>,
    /// Number of log entries (level-2 headings under `Entries`).
    pub entries: usize,
    /// Number of checkpoints (level-2 headings under `Checkpoints`).
    pub checkpoints: usize,
}

/// Id of the `Entries` section (level 1, occurrence 0).
pub fn entries_id() -> SectionId {
    SectionId::compute(1, ENTRIES_TITLE, 0)
}

/// Id of the `Checkpoints` section (level 1, occurrence 0).
pub fn checkpoints_id() -> SectionId {
    SectionId::compute(1, CHECKPOINTS_TITLE, 0)
}

/// Render a fresh task file.
pub fn init(title: &str, now: DateTime<Utc>) -> String {
    let stamp = rfc3339(now);
    format!(
        "---\nstatus: open\ncreated: {stamp}\nupdated: {stamp}\n---\n\
         # {title}\n\n# {ENTRIES_TITLE}\n\n# {CHECKPOINTS_TITLE}\n"
    )
}

/// Strictly validate a task file and summarize it.
///
/// This is the opt-in strict path: a missing frontmatter block, a missing
/// `status` field, or a missing `Entries` section — all tolerated by the
/// core's permissive parser — are hard errors here.
pub fn validate(raw: &str) -> Result<TaskSummary, TaskError> {
    let doc = Document::parse(raw);
    if doc.frontmatter.is_none() {
        return Err(TaskError::InvalidTaskFile(
            "missing frontmatter block".to_string(),
        ));
    }
    let status = fm::get(&doc, "status")?
        .and_then(|v| v.as_str().map(str::to_string))
        .ok_or_else(|| TaskError::InvalidTaskFile("missing 'status' field".to_string()))?;
    if mdsect_core::find_section(&doc, &entries_id()).is_none() {
        return Err(TaskError::InvalidTaskFile(format!(
            "missing '{ENTRIES_TITLE}' section"
        )));
    }

    Ok(TaskSummary {
        title: doc
            .sections
            .iter()
            .find(|s| {
                s.level == 1 && s.title != ENTRIES_TITLE && s.title != CHECKPOINTS_TITLE
            })
            .map(|s| s.title.clone()),
        status,
        created: string_field(&doc, "created")?,
        updated: string_field(&doc, "updated")?,
        entries: subsection_count(&doc, &entries_id()),
        checkpoints: subsection_count(&doc, &checkpoints_id()),
    })
}

/// Append a dated narrative log entry and bump the `updated` timestamp.
///
/// The entry is a level-2 heading (`## YYYY-MM-DD HH:MM` UTC) deep-appended
/// to `Entries`, so it lands after every existing entry and before the next
/// level-1 heading, whatever that section is.
pub fn append_entry(raw: &str, text: &str, now: DateTime<Utc>) -> Result<String, TaskError> {
    validate(raw)?;
    let doc = Document::parse(raw);

    let entry = format!("## {}\n\n{}", now.format("%Y-%m-%d %H:%M"), text.trim_end());
    let options = AppendOptions {
        deep: true,
        before: false,
    };
    let (next, _) = mutate::append(&doc, &entries_id(), &entry, options)?;
    touch(&next, now)
}

/// Append a structured checkpoint and bump the `updated` timestamp.
///
/// Checkpoints are level-2 sections under `Checkpoints` with a
/// `key: value` body; the section is created at the end of the document if
/// the task file predates it.
pub fn add_checkpoint(
    raw: &str,
    name: &str,
    note: Option<&str>,
    now: DateTime<Utc>,
) -> Result<String, TaskError> {
    validate(raw)?;
    let mut doc = Document::parse(raw);

    if mdsect_core::find_section(&doc, &checkpoints_id()).is_none() {
        let last = doc
            .sections
            .last()
            .expect("validated task file has sections")
            .id
            .clone();
        let options = AppendOptions {
            deep: true,
            before: false,
        };
        let (with_section, _) =
            mutate::append(&doc, &last, &format!("# {CHECKPOINTS_TITLE}"), options)?;
        doc = Document::parse(&with_section);
    }

    let mut body = format!("## {name}\nat: {}", rfc3339(now));
    if let Some(note) = note {
        body.push_str("\nnote: ");
        body.push_str(note);
    }
    let options = AppendOptions {
        deep: true,
        before: false,
    };
    let (next, _) = mutate::append(&doc, &checkpoints_id(), &body, options)?;
    touch(&next, now)
}

/// Set the task status and bump the `updated` timestamp.
pub fn set_status(raw: &str, status: TaskStatus, now: DateTime<Utc>) -> Result<String, TaskError> {
    validate(raw)?;
    let doc = Document::parse(raw);
    let next = fm::set(&doc, "status", serde_yaml::Value::from(status.as_str()))?;
    touch(&next, now)
}

/// Patch the `updated` frontmatter field on already-transformed text.
fn touch(raw: &str, now: DateTime<Utc>) -> Result<String, TaskError> {
    let doc = Document::parse(raw);
    Ok(fm::set(&doc, "updated", serde_yaml::Value::from(rfc3339(now)))?)
}

fn rfc3339(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn string_field(doc: &Document, path: &str) -> Result<Option<String>, TaskError> {
    Ok(fm::get(doc, path)?.and_then(|v| match v {
        serde_yaml::Value::String(s) => Some(s),
        other => Some(mdsect_core::frontmatter::display_value(&other)),
    }))
}

fn subsection_count(doc: &Document, id: &SectionId) -> usize {
    let Some(section) = mdsect_core::find_section(doc, id) else {
        return 0;
    };
    let end = mdsect_core::section_end_line(doc, section, true);
    doc.sections
        .iter()
        .filter(|s| s.line > section.line && s.line < end && s.level == section.level + 1)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_init_is_valid() {
        let text = init("Ship the feature", now());
        let summary = validate(&text).unwrap();
        assert_eq!(summary.status, "open");
        assert_eq!(summary.title.as_deref(), Some("Ship the feature"));
        assert_eq!(summary.entries, 0);
        assert_eq!(summary.checkpoints, 0);
    }

    #[test]
    fn test_validate_rejects_plain_document() {
        assert!(matches!(
            validate("# Just a doc\n"),
            Err(TaskError::InvalidTaskFile(_))
        ));
        assert!(matches!(
            validate("---\nstatus: open\n---\n# No entries here\n"),
            Err(TaskError::InvalidTaskFile(_))
        ));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!("finished".parse::<TaskStatus>().is_err());
    }
}
