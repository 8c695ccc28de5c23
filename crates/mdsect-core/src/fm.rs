//! Frontmatter mutation façade.
//!
//! Applies nested-path `get`/`set`/`delete` on top of the
//! [`crate::frontmatter`] codec and splices the re-serialized block over
//! the document's leading lines, adding the fences when the document had
//! no frontmatter before.

use serde_yaml::Value;

use crate::document::{Document, FRONTMATTER_FENCE};
use crate::error::CoreError;
use crate::frontmatter;

/// The document's raw frontmatter block, or an empty string if absent.
pub fn get_content(doc: &Document) -> &str {
    doc.frontmatter_raw()
}

/// Look up a frontmatter value by dot-separated path.
///
/// Returns `Ok(None)` both when the path is missing and when the document
/// has no frontmatter at all; a malformed block is a [`CoreError::Parse`].
pub fn get(doc: &Document, path: &str) -> Result<Option<Value>, CoreError> {
    let root = frontmatter::parse_block(doc.frontmatter_raw())?;
    Ok(frontmatter::get_path(&root, path).cloned())
}

/// Set a frontmatter value, creating intermediate mappings (and the whole
/// block, fences included) as needed. Returns the new raw document text.
pub fn set(doc: &Document, path: &str, value: Value) -> Result<String, CoreError> {
    let mut root = frontmatter::parse_block(doc.frontmatter_raw())?;
    frontmatter::set_path(&mut root, path, value)?;
    splice_block(doc, &root)
}

/// Delete a frontmatter leaf. Emptied parent maps are kept, not pruned.
/// Returns the new raw document text.
///
/// Unlike [`set`], deleting never creates a block: a document without
/// frontmatter comes back unchanged when the path removed nothing.
pub fn delete(doc: &Document, path: &str) -> Result<String, CoreError> {
    let mut root = frontmatter::parse_block(doc.frontmatter_raw())?;
    let removed = frontmatter::delete_path(&mut root, path)?;
    if !removed && doc.frontmatter.is_none() {
        return Ok(doc.render());
    }
    splice_block(doc, &root)
}

/// Replace lines `[0, frontmatter_end_line)` with the serialized block.
fn splice_block(doc: &Document, root: &Value) -> Result<String, CoreError> {
    let block = frontmatter::serialize_block(root)?;

    let mut lines: Vec<String> = Vec::with_capacity(doc.lines.len() + 4);
    lines.push(FRONTMATTER_FENCE.to_string());
    if !block.is_empty() {
        lines.extend(block.split('\n').map(str::to_string));
    }
    lines.push(FRONTMATTER_FENCE.to_string());
    lines.extend_from_slice(&doc.lines[doc.frontmatter_end_line..]);

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_content() {
        let doc = Document::parse("---\nstatus: open\n---\nbody\n");
        assert_eq!(get_content(&doc), "status: open");
        assert_eq!(get_content(&Document::parse("body\n")), "");
    }

    #[test]
    fn test_get_value() {
        let doc = Document::parse("---\na:\n  b: x\n---\n");
        assert_eq!(get(&doc, "a.b").unwrap(), Some(Value::from("x")));
        assert_eq!(get(&doc, "a.z").unwrap(), None);
        assert_eq!(get(&Document::parse("no fm\n"), "a").unwrap(), None);
    }

    #[test]
    fn test_set_updates_existing_block() {
        let doc = Document::parse("---\nstatus: open\n---\n# A\n");
        let text = set(&doc, "status", Value::from("done")).unwrap();
        assert_eq!(text, "---\nstatus: done\n---\n# A\n");
    }

    #[test]
    fn test_set_creates_block_when_absent() {
        let doc = Document::parse("# A\nbody\n");
        let text = set(&doc, "status", Value::from("open")).unwrap();
        assert_eq!(text, "---\nstatus: open\n---\n# A\nbody\n");
    }

    #[test]
    fn test_set_nested_path_round_trip() {
        let doc = Document::parse("# A\n");
        let text = set(&doc, "a.b", Value::from("x")).unwrap();
        let reparsed = Document::parse(&text);
        assert_eq!(get(&reparsed, "a.b").unwrap(), Some(Value::from("x")));
    }

    #[test]
    fn test_delete_leaf() {
        let doc = Document::parse("---\na: 1\nb: 2\n---\nbody\n");
        let text = delete(&doc, "a").unwrap();
        assert_eq!(text, "---\nb: 2\n---\nbody\n");
    }

    #[test]
    fn test_delete_last_key_keeps_empty_fences() {
        let doc = Document::parse("---\na: 1\n---\nbody\n");
        let text = delete(&doc, "a").unwrap();
        assert_eq!(text, "---\n---\nbody\n");
    }

    #[test]
    fn test_delete_without_frontmatter_is_a_no_op() {
        let doc = Document::parse("# A\nbody\n");
        let text = delete(&doc, "missing").unwrap();
        assert_eq!(text, "# A\nbody\n");
    }

    #[test]
    fn test_delete_missing_path_keeps_existing_block() {
        let doc = Document::parse("---\na: 1\n---\nbody\n");
        let text = delete(&doc, "nope").unwrap();
        assert_eq!(text, "---\na: 1\n---\nbody\n");
    }

    #[test]
    fn test_sections_untouched_by_frontmatter_edits() {
        let doc = Document::parse("---\nstatus: open\n---\n# A\nbody\n# B\n");
        let ids: Vec<_> = doc.sections.iter().map(|s| s.id.clone()).collect();

        let text = set(&doc, "extra.key", Value::from(true)).unwrap();
        let after = Document::parse(&text);
        let after_ids: Vec<_> = after.sections.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, after_ids);
    }

    #[test]
    fn test_malformed_frontmatter_is_parse_error() {
        let doc = Document::parse("---\n: [unbalanced\n---\n");
        assert!(matches!(get(&doc, "a"), Err(CoreError::Parse(_))));
    }
}
