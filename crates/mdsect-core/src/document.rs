//! Document model and parser.
//!
//! A [`Document`] is a parsed snapshot of raw text: the line buffer is the
//! single source of truth, and the section list is derived from it by a
//! full scan. Nothing here is ever patched incrementally — every mutation
//! elsewhere in the crate re-parses, so identifiers and boundaries can
//! never go stale.

use std::collections::HashMap;

use crate::hash::SectionId;

/// The frontmatter fence line.
pub const FRONTMATTER_FENCE: &str = "---";

/// A heading and its position, derived from one parse pass.
///
/// Sections are pure values: they are recomputed on every parse and never
/// individually persisted. The end boundary is deliberately *not* stored;
/// [`crate::locate::section_end_line`] computes it on demand so there is a
/// single source of truth.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Section {
    /// Stable content-derived identifier.
    pub id: SectionId,
    /// Heading depth, 1 = top-level.
    pub level: u8,
    /// Heading text, whitespace-trimmed.
    pub title: String,
    /// Zero-based line index of the heading line itself.
    pub line: usize,
}

/// A parsed document snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Raw text lines, without newline characters. The single source of
    /// truth; everything else is derived.
    pub lines: Vec<String>,
    /// Raw frontmatter block text (fences stripped), if present.
    pub frontmatter: Option<String>,
    /// Index of the first line after the frontmatter block; 0 if absent.
    pub frontmatter_end_line: usize,
    /// Sections in document order.
    pub sections: Vec<Section>,
}

impl Document {
    /// Parse raw text into a document snapshot.
    ///
    /// Never fails: a frontmatter fence with no closing fence is treated as
    /// ordinary content, and a document with no headings simply has no
    /// sections. Line endings are normalized to LF.
    pub fn parse(text: &str) -> Self {
        let lines = split_lines(text);
        let (frontmatter, frontmatter_end_line) = scan_frontmatter(&lines);
        let sections = scan_sections(&lines, frontmatter_end_line);
        Self {
            lines,
            frontmatter,
            frontmatter_end_line,
            sections,
        }
    }

    /// Render the line buffer back to raw text.
    ///
    /// A non-empty document always ends with exactly one newline; callers
    /// relying on byte-identical round trips get it modulo that
    /// normalization.
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The raw frontmatter block, or an empty string if the document has
    /// none.
    pub fn frontmatter_raw(&self) -> &str {
        self.frontmatter.as_deref().unwrap_or("")
    }
}

/// Split text into lines, normalizing CRLF and dropping the phantom empty
/// element produced by a trailing newline.
fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect();
    if lines.last().is_some_and(String::is_empty) && text.ends_with('\n') {
        lines.pop();
    }
    lines
}

/// Detect the leading frontmatter block.
///
/// Returns the enclosed raw text plus the index of the first line after the
/// closing fence. A missing closing fence degrades to "no frontmatter".
fn scan_frontmatter(lines: &[String]) -> (Option<String>, usize) {
    if lines.first().map(|l| l.trim_end()) != Some(FRONTMATTER_FENCE) {
        return (None, 0);
    }
    for (i, line) in lines.iter().enumerate().skip(1) {
        if line.trim_end() == FRONTMATTER_FENCE {
            return (Some(lines[1..i].join("\n")), i + 1);
        }
    }
    (None, 0)
}

/// Parse a heading line into `(level, title)`.
///
/// ATX style: one to six `#` markers followed by at least one space (or
/// nothing, for a bare heading). Seven or more markers is plain text.
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.is_empty() && !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    Some((hashes as u8, rest.trim()))
}

/// Returns `true` if this line opens or closes a fenced code block.
fn is_code_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// Scan for headings, assigning each section its occurrence-indexed id.
///
/// The occurrence counter is a per-parse local map, so the Nth section
/// sharing a `(level, title)` pair always gets occurrence N-1 in document
/// order. Headings inside fenced code blocks are skipped.
fn scan_sections(lines: &[String], start: usize) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut occurrences: HashMap<(u8, String), usize> = HashMap::new();
    let mut in_fence = false;

    for (i, line) in lines.iter().enumerate().skip(start) {
        if is_code_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        let Some((level, title)) = parse_heading(line) else {
            continue;
        };
        let occurrence = occurrences
            .entry((level, title.to_string()))
            .and_modify(|n| *n += 1)
            .or_insert(0);
        sections.push(Section {
            id: SectionId::compute(level, title, *occurrence),
            level,
            title: title.to_string(),
            line: i,
        });
    }
    sections
}
