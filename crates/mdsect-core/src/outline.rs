//! Document outline, metadata summary, and concatenation.
//!
//! This module provides UI-agnostic types layered on a parsed document:
//!
//! - a hierarchical outline built from the flat section list
//! - a flat metadata summary (title, counts, frontmatter presence)
//! - concatenation of several documents into one, with an optional
//!   heading-level shift for the appended parts
//!
//! The goal is to give hosts a stable schema to build outline trees,
//! tables of contents, and document-joining commands.

use crate::document::Document;
use crate::hash::SectionId;

/// A single outline node (hierarchical).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OutlineNode {
    /// Section id.
    pub id: SectionId,
    /// Heading depth, 1 = top-level.
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Zero-based heading line.
    pub line: usize,
    /// Child sections nested under this heading.
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Collect this node and all descendants in pre-order.
    pub fn flatten_preorder<'a>(&'a self, out: &mut Vec<&'a OutlineNode>) {
        out.push(self);
        for child in &self.children {
            child.flatten_preorder(out);
        }
    }
}

/// A document outline (top-level node list).
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct DocumentOutline {
    /// Top-level nodes.
    pub nodes: Vec<OutlineNode>,
}

impl DocumentOutline {
    /// Build the outline tree from a parsed document.
    ///
    /// A section becomes a child of the nearest preceding section with a
    /// smaller level; skipped levels (`#` followed directly by `###`) still
    /// nest under the shallower heading.
    pub fn build(doc: &Document) -> Self {
        let mut nodes: Vec<OutlineNode> = Vec::new();
        let mut iter = doc.sections.iter().peekable();
        while iter.peek().is_some() {
            nodes.push(build_node(&mut iter));
        }
        Self { nodes }
    }

    /// Returns `true` if there are no sections.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Flatten all nodes in pre-order (document order).
    pub fn flatten_preorder(&self) -> Vec<&OutlineNode> {
        let mut out = Vec::new();
        for node in &self.nodes {
            node.flatten_preorder(&mut out);
        }
        out
    }
}

fn build_node<'a, I>(iter: &mut std::iter::Peekable<I>) -> OutlineNode
where
    I: Iterator<Item = &'a crate::document::Section>,
{
    let section = iter.next().expect("peeked before call");
    let mut node = OutlineNode {
        id: section.id.clone(),
        level: section.level,
        title: section.title.clone(),
        line: section.line,
        children: Vec::new(),
    };
    while let Some(next) = iter.peek() {
        if next.level <= section.level {
            break;
        }
        node.children.push(build_node(iter));
    }
    node
}

/// A flat metadata summary of one document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DocumentInfo {
    /// Title: the first level-1 heading, if any.
    pub title: Option<String>,
    /// Total line count.
    pub lines: usize,
    /// Total section count.
    pub sections: usize,
    /// Whether the document carries a frontmatter block.
    pub has_frontmatter: bool,
}

impl DocumentInfo {
    /// Summarize a parsed document.
    pub fn of(doc: &Document) -> Self {
        Self {
            title: doc
                .sections
                .iter()
                .find(|s| s.level == 1)
                .map(|s| s.title.clone()),
            lines: doc.line_count(),
            sections: doc.sections.len(),
            has_frontmatter: doc.frontmatter.is_some(),
        }
    }
}

/// Concatenate documents into one raw text.
///
/// The first document keeps its frontmatter; frontmatter blocks of the
/// appended documents are dropped. `level_shift` deepens every heading of
/// the appended documents by that many levels (clamped at 6), so a joined
/// file can nest its parts under the first document's structure.
pub fn concat(docs: &[Document], level_shift: u8) -> String {
    let mut out: Vec<String> = Vec::new();

    for (i, doc) in docs.iter().enumerate() {
        let body = &doc.lines[doc.frontmatter_end_line..];
        if i == 0 {
            out.extend_from_slice(&doc.lines[..doc.frontmatter_end_line]);
            out.extend_from_slice(body);
            continue;
        }
        if !out.is_empty() && !out.last().is_some_and(String::is_empty) {
            out.push(String::new());
        }
        if level_shift == 0 {
            out.extend_from_slice(body);
        } else {
            out.extend(shift_headings(doc, level_shift));
        }
    }

    if out.is_empty() {
        return String::new();
    }
    let mut text = out.join("\n");
    text.push('\n');
    text
}

/// Deepen each heading line of a document's body by `shift` levels.
fn shift_headings(doc: &Document, shift: u8) -> Vec<String> {
    let heading_lines: std::collections::HashSet<usize> =
        doc.sections.iter().map(|s| s.line).collect();

    doc.lines[doc.frontmatter_end_line..]
        .iter()
        .enumerate()
        .map(|(offset, line)| {
            let line_no = doc.frontmatter_end_line + offset;
            if !heading_lines.contains(&line_no) {
                return line.clone();
            }
            let current = line.bytes().take_while(|&b| b == b'#').count() as u8;
            let target = current.saturating_add(shift).min(6);
            let extra = target.saturating_sub(current) as usize;
            format!("{}{}", "#".repeat(extra), line)
        })
        .collect()
}
