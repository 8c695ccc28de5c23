//! Section mutation engine.
//!
//! Every operation takes a parsed snapshot, expresses its effect as a
//! single splice of the line buffer, and returns the new raw text plus a
//! [`MutationResult`] delta summary. Nothing mutates in place: the caller
//! owns persistence and must re-parse between successive edits.
//!
//! Scope rules:
//!
//! - `read`/`write`/`append`/`empty` take a `deep` flag and use the
//!   boundary from [`crate::locate::section_end_line`].
//! - `remove` is always deep: deleting a heading while leaving orphaned
//!   subsections under it would break the heading hierarchy, so there is
//!   no shallow removal.

use crate::document::Document;
use crate::error::CoreError;
use crate::hash::SectionId;
use crate::locate::{find_section, section_end_line};

/// What a mutation did, for callers reporting results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationAction {
    /// Body replaced.
    Updated,
    /// Content inserted.
    Appended,
    /// Body cleared.
    Emptied,
    /// Section and subtree deleted.
    Removed,
}

/// Delta summary returned by every mutation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MutationResult {
    /// What happened.
    pub action: MutationAction,
    /// The section the mutation addressed.
    pub id: SectionId,
    /// Post-mutation heading line of the affected section. `None` when the
    /// section no longer exists (remove).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_start: Option<usize>,
    /// Post-mutation exclusive end boundary of the affected section.
    /// `None` when the section no longer exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_end: Option<usize>,
    /// Exact number of lines inserted.
    pub lines_added: usize,
    /// Exact number of lines deleted.
    pub lines_removed: usize,
}

/// Options for [`append`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendOptions {
    /// Insert after the whole subtree instead of after the shallow body.
    pub deep: bool,
    /// Insert immediately before the heading line itself, e.g. to add a
    /// new sibling section ahead of an existing one.
    pub before: bool,
}

/// Read a section's body text (heading line excluded).
pub fn read(doc: &Document, id: &SectionId, deep: bool) -> Result<String, CoreError> {
    let section = resolve(doc, id)?;
    let end = section_end_line(doc, section, deep);
    Ok(doc.lines[section.line + 1..end].join("\n"))
}

/// Replace a section's body with `content`.
pub fn write(
    doc: &Document,
    id: &SectionId,
    content: &str,
    deep: bool,
) -> Result<(String, MutationResult), CoreError> {
    let section = resolve(doc, id)?;
    let start = section.line + 1;
    let end = section_end_line(doc, section, deep);
    let replacement = content_lines(content);

    let added = replacement.len();
    let removed = end - start;
    let action = if content.is_empty() {
        MutationAction::Emptied
    } else {
        MutationAction::Updated
    };
    Ok(finish(id, action, deep, splice(doc, start, end, replacement), added, removed))
}

/// Insert `content` relative to a section.
///
/// With `before = false` the content lands at the section's end boundary
/// (after the existing body, before the next sibling or terminator). With
/// `before = true` it lands immediately above the heading line.
pub fn append(
    doc: &Document,
    id: &SectionId,
    content: &str,
    options: AppendOptions,
) -> Result<(String, MutationResult), CoreError> {
    let section = resolve(doc, id)?;
    let at = if options.before {
        section.line
    } else {
        section_end_line(doc, section, options.deep)
    };
    let insertion = content_lines(content);
    let added = insertion.len();
    Ok(finish(
        id,
        MutationAction::Appended,
        options.deep,
        splice(doc, at, at, insertion),
        added,
        0,
    ))
}

/// Clear a section's body, leaving the heading line untouched.
///
/// Equivalent to writing empty content with the same `deep` flag.
pub fn empty(
    doc: &Document,
    id: &SectionId,
    deep: bool,
) -> Result<(String, MutationResult), CoreError> {
    write(doc, id, "", deep)
}

/// Delete a section: its heading line through the end of its subtree.
pub fn remove(doc: &Document, id: &SectionId) -> Result<(String, MutationResult), CoreError> {
    let section = resolve(doc, id)?;
    let start = section.line;
    let end = section_end_line(doc, section, true);
    let removed = end - start;

    let new_lines = splice(doc, start, end, Vec::new());
    let text = render_lines(&new_lines);
    let result = MutationResult {
        action: MutationAction::Removed,
        id: id.clone(),
        line_start: None,
        line_end: None,
        lines_added: 0,
        lines_removed: removed,
    };
    Ok((text, result))
}

fn resolve<'a>(
    doc: &'a Document,
    id: &SectionId,
) -> Result<&'a crate::document::Section, CoreError> {
    find_section(doc, id).ok_or_else(|| CoreError::SectionNotFound(id.to_string()))
}

/// Split mutation content into buffer lines. Empty content splices in zero
/// lines, so emptying a section leaves no blank line behind.
fn content_lines(content: &str) -> Vec<String> {
    if content.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<String> = content
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect();
    if content.ends_with('\n') {
        lines.pop();
    }
    lines
}

fn splice(doc: &Document, start: usize, end: usize, replacement: Vec<String>) -> Vec<String> {
    let mut lines = Vec::with_capacity(doc.lines.len() - (end - start) + replacement.len());
    lines.extend_from_slice(&doc.lines[..start]);
    lines.extend(replacement);
    lines.extend_from_slice(&doc.lines[end..]);
    lines
}

fn render_lines(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Build the result by re-parsing the new text and reporting the affected
/// section's post-mutation boundary from the fresh snapshot.
fn finish(
    id: &SectionId,
    action: MutationAction,
    deep: bool,
    new_lines: Vec<String>,
    added: usize,
    removed: usize,
) -> (String, MutationResult) {
    let text = render_lines(&new_lines);
    let reparsed = Document::parse(&text);
    let (line_start, line_end) = match find_section(&reparsed, id) {
        Some(s) => (Some(s.line), Some(section_end_line(&reparsed, s, deep))),
        None => (None, None),
    };
    let result = MutationResult {
        action,
        id: id.clone(),
        line_start,
        line_end,
        lines_added: added,
        lines_removed: removed,
    };
    (text, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id_of(level: u8, title: &str) -> SectionId {
        SectionId::compute(level, title, 0)
    }

    #[test]
    fn test_read_shallow_and_deep() {
        let doc = Document::parse("# A\nold\n## B\nkeep\n");
        assert_eq!(read(&doc, &id_of(1, "A"), false).unwrap(), "old");
        assert_eq!(read(&doc, &id_of(1, "A"), true).unwrap(), "old\n## B\nkeep");
    }

    #[test]
    fn test_read_unknown_id() {
        let doc = Document::parse("# A\n");
        let err = read(&doc, &id_of(1, "Nope"), false).unwrap_err();
        assert!(matches!(err, CoreError::SectionNotFound(_)));
    }

    #[test]
    fn test_shallow_write_preserves_nested() {
        let doc = Document::parse("# A\nold\n## B\nkeep\n");
        let (text, result) = write(&doc, &id_of(1, "A"), "new", false).unwrap();
        assert_eq!(text, "# A\nnew\n## B\nkeep\n");
        assert_eq!(result.action, MutationAction::Updated);
        assert_eq!(result.lines_added, 1);
        assert_eq!(result.lines_removed, 1);
        assert_eq!(result.line_start, Some(0));
        assert_eq!(result.line_end, Some(2));
    }

    #[test]
    fn test_deep_write_replaces_subtree() {
        let doc = Document::parse("# A\nold\n## B\ngone\n# C\nz\n");
        let (text, result) = write(&doc, &id_of(1, "A"), "new", true).unwrap();
        assert_eq!(text, "# A\nnew\n# C\nz\n");
        assert_eq!(result.lines_removed, 3);
        assert_eq!(result.lines_added, 1);
    }

    #[test]
    fn test_deep_empty() {
        let doc = Document::parse("# A\nx\n## B\ny\n");
        let (text, result) = empty(&doc, &id_of(1, "A"), true).unwrap();
        assert_eq!(text, "# A\n");
        assert_eq!(result.action, MutationAction::Emptied);
        assert_eq!(result.lines_removed, 3);
        assert_eq!(result.lines_added, 0);
        assert_eq!(result.line_end, Some(1));
    }

    #[test]
    fn test_append_after_shallow_body() {
        let doc = Document::parse("# A\nbody\n## B\nkeep\n");
        let (text, result) =
            append(&doc, &id_of(1, "A"), "tail", AppendOptions::default()).unwrap();
        assert_eq!(text, "# A\nbody\ntail\n## B\nkeep\n");
        assert_eq!(result.action, MutationAction::Appended);
        assert_eq!(result.lines_added, 1);
        assert_eq!(result.lines_removed, 0);
    }

    #[test]
    fn test_append_deep_lands_after_subtree() {
        let doc = Document::parse("# A\nbody\n## B\nkeep\n# C\n");
        let options = AppendOptions { deep: true, before: false };
        let (text, _) = append(&doc, &id_of(1, "A"), "tail", options).unwrap();
        assert_eq!(text, "# A\nbody\n## B\nkeep\ntail\n# C\n");
    }

    #[test]
    fn test_append_before_heading() {
        let doc = Document::parse("# A\nbody\n");
        let options = AppendOptions { deep: false, before: true };
        let (text, _) = append(&doc, &id_of(1, "A"), "# Z\nzs", options).unwrap();
        assert_eq!(text, "# Z\nzs\n# A\nbody\n");
    }

    #[test]
    fn test_remove_is_always_deep() {
        let doc = Document::parse("# A\nx\n## B\ny\n# C\nz\n");
        let (text, result) = remove(&doc, &id_of(1, "A")).unwrap();
        assert_eq!(text, "# C\nz\n");
        assert_eq!(result.action, MutationAction::Removed);
        assert_eq!(result.lines_removed, 4);
        assert_eq!(result.line_start, None);
        assert_eq!(result.line_end, None);
    }

    #[test]
    fn test_round_trip_write_of_read() {
        let text = "# A\nline one\n\nline two\n## B\nnested\n";
        let doc = Document::parse(text);
        let body = read(&doc, &id_of(1, "A"), true).unwrap();
        let (new_text, _) = write(&doc, &id_of(1, "A"), &body, true).unwrap();
        assert_eq!(new_text, text);
    }

    #[test]
    fn test_identity_stable_for_untouched_sections() {
        let doc = Document::parse("# A\nold\n# B\nb\n## C\nc\n");
        let before: Vec<_> = doc
            .sections
            .iter()
            .filter(|s| s.title != "A")
            .map(|s| s.id.clone())
            .collect();

        let (text, _) = write(&doc, &id_of(1, "A"), "entirely new\ncontent", false).unwrap();
        let after_doc = Document::parse(&text);
        let after: Vec<_> = after_doc
            .sections
            .iter()
            .filter(|s| s.title != "A")
            .map(|s| s.id.clone())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_delta_accounting() {
        let doc = Document::parse("# A\none\ntwo\n# B\nb\n");
        let (text, result) = write(&doc, &id_of(1, "A"), "single", false).unwrap();
        let new_doc = Document::parse(&text);
        let delta = result.lines_added as isize - result.lines_removed as isize;
        assert_eq!(
            delta,
            new_doc.line_count() as isize - doc.line_count() as isize
        );
    }

    #[test]
    fn test_write_multiline_content() {
        let doc = Document::parse("# A\nold\n");
        let (text, result) = write(&doc, &id_of(1, "A"), "one\ntwo\nthree", false).unwrap();
        assert_eq!(text, "# A\none\ntwo\nthree\n");
        assert_eq!(result.lines_added, 3);
    }
}
