//! Error taxonomy shared by the core and its calling layers.
//!
//! Every failure is non-retryable and is surfaced to the caller exactly
//! once. Structurally ambiguous input that still permits a best-effort
//! result (a frontmatter fence with no closing fence, say) degrades
//! gracefully instead of failing; strict validation is opt-in at the call
//! site, not the default.

use thiserror::Error;

/// Errors produced by document parsing, lookup, and mutation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The id does not resolve to any section in the current document.
    #[error("section not found: {0}")]
    SectionNotFound(String),

    /// A malformed identifier string was passed to a lookup.
    #[error("invalid section id: '{0}'")]
    InvalidId(String),

    /// Content does not have the structural shape an operation requires
    /// (e.g. frontmatter demanded by a strict caller but absent).
    #[error("parse error: {0}")]
    Parse(String),

    /// Filesystem failure. Raised by the I/O layer, never by the core;
    /// carried here so callers share one taxonomy.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
