//! Section lookup and boundary computation.
//!
//! The boundary rule here is the crux of every mutation's scope:
//!
//! - **shallow**: a section's own body only — it ends at the next heading
//!   of *any* level, so nested subsections are excluded.
//! - **deep**: the section's whole subtree — it ends at the next heading
//!   whose level is less than or equal to the section's own.
//!
//! Both default to end-of-document when no terminating heading exists. The
//! boundary is always computed, never stored, so it cannot disagree with
//! the line buffer.

use crate::document::{Document, Section};
use crate::hash::SectionId;

/// Find a section by id.
pub fn find_section<'a>(doc: &'a Document, id: &SectionId) -> Option<&'a Section> {
    doc.sections.iter().find(|s| &s.id == id)
}

/// Find the section whose region contains `line`: the nearest section whose
/// heading line is at or above `line`, with no closer heading in between.
///
/// Returns `None` for lines above the first heading (frontmatter, preamble).
pub fn find_section_at_line(doc: &Document, line: usize) -> Option<&Section> {
    doc.sections
        .iter()
        .take_while(|s| s.line <= line)
        .last()
}

/// Compute a section's exclusive content end boundary.
///
/// With `deep = false` the region stops at the next heading of any level;
/// with `deep = true` it stops at the next heading with
/// `level <= section.level`, so the whole subtree is included.
pub fn section_end_line(doc: &Document, section: &Section, deep: bool) -> usize {
    doc.sections
        .iter()
        .filter(|s| s.line > section.line)
        .find(|s| !deep || s.level <= section.level)
        .map(|s| s.line)
        .unwrap_or(doc.line_count())
}
