#![warn(missing_docs)]
//! `mdsect-core` - Headless Surgical Editor for Heading-Structured Text
//!
//! # Overview
//!
//! `mdsect-core` parses a Markdown-like document into an addressable tree of
//! sections, gives each section a content-derived stable identifier, and
//! exposes precise read/write/append/empty/remove operations that splice the
//! underlying line buffer while preserving the identity and boundaries of
//! every other section. A companion facade manages the leading frontmatter
//! block with nested-path get/set/delete.
//!
//! It performs no I/O: every operation is a pure function from a parsed
//! snapshot to new raw text, and the caller owns persistence.
//!
//! # Core Properties
//!
//! - **Stable Identity**: section ids are a pure function of
//!   `(level, title, occurrence index)`, never of line position
//! - **Re-parse, Never Patch**: the section list is re-derived from the
//!   line buffer after every mutation, so boundaries cannot go stale
//! - **Shallow/Deep Boundaries**: one rule, parameterized by `deep`,
//!   scopes every operation to a body or a whole subtree
//! - **Exact Deltas**: every mutation reports lines added/removed
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Mutations & Frontmatter Facade             │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Search / Outline / Concatenation           │  ← Derived Views
//! ├─────────────────────────────────────────────┤
//! │  Section Locator (shallow/deep boundaries)  │  ← Region Computation
//! ├─────────────────────────────────────────────┤
//! │  Document Parser & Identity Service         │  ← Structure
//! ├─────────────────────────────────────────────┤
//! │  Line Buffer (Vec of lines)                 │  ← Source of Truth
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use mdsect_core::{Document, SectionId, mutate};
//!
//! let doc = Document::parse("# Notes\nold body\n## Details\nkeep\n");
//! let id = SectionId::compute(1, "Notes", 0);
//!
//! // Replace only the shallow body; the nested section is untouched.
//! let (text, result) = mutate::write(&doc, &id, "new body", false).unwrap();
//! assert_eq!(text, "# Notes\nnew body\n## Details\nkeep\n");
//! assert_eq!(result.lines_added, 1);
//! ```
//!
//! # Module Description
//!
//! - [`document`] - document model and parser
//! - [`hash`] - content-derived section identity
//! - [`locate`] - section lookup and shallow/deep boundary computation
//! - [`mutate`] - read/write/append/empty/remove mutation engine
//! - [`frontmatter`] - YAML frontmatter codec with nested paths
//! - [`fm`] - frontmatter mutation facade over the line buffer
//! - [`search`] - plain/regex/whole-word search with section context
//! - [`outline`] - outline tree, metadata summary, concatenation
//! - [`error`] - shared error taxonomy

pub mod document;
pub mod error;
pub mod fm;
pub mod frontmatter;
pub mod hash;
pub mod locate;
pub mod mutate;
pub mod outline;
pub mod search;

pub use document::{Document, Section};
pub use error::CoreError;
pub use hash::SectionId;
pub use locate::{find_section, find_section_at_line, section_end_line};
pub use mutate::{AppendOptions, MutationAction, MutationResult};
pub use outline::{DocumentInfo, DocumentOutline, OutlineNode};
pub use search::{SearchError, SearchMatch, SearchOptions};
