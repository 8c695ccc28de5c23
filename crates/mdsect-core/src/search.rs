//! Document search helpers.
//!
//! Line-oriented search over a parsed document, using **character offsets**
//! within each line for match ranges. Supports:
//!
//! - plain substring search (escaped and compiled into a regex)
//! - regex search
//! - optional whole-word matching
//!
//! Each match also carries the id of its enclosing section, so callers can
//! jump from a hit straight to a mutation.

use regex::{Regex, RegexBuilder};

use crate::document::Document;
use crate::hash::SectionId;
use crate::locate::find_section_at_line;

/// Options that control how search is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, matches only whole words (ASCII-alphanumeric and `_`).
    pub whole_word: bool,
    /// If `true`, treats the query as a regex pattern.
    pub regex: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
            regex: false,
        }
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SearchMatch {
    /// Zero-based line number of the hit.
    pub line: usize,
    /// Inclusive start character offset within the line.
    pub start: usize,
    /// Exclusive end character offset within the line.
    pub end: usize,
    /// Id of the section whose region contains the line, if any.
    pub section: Option<SectionId>,
    /// The full text of the matched line, for display.
    pub line_text: String,
}

/// Search errors.
#[derive(Debug)]
pub enum SearchError {
    /// The provided regex pattern failed to compile.
    InvalidRegex(regex::Error),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRegex(err) => write!(f, "Invalid regex: {}", err),
        }
    }
}

impl std::error::Error for SearchError {}

fn compile_search_regex(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .build()
        .map_err(SearchError::InvalidRegex)
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn is_whole_word(line: &str, start_byte: usize, end_byte: usize) -> bool {
    let before = line[..start_byte].chars().next_back();
    let after = line[end_byte..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Find all occurrences of `query` in the document.
///
/// - Returns an empty list if `query` is empty.
/// - Match ranges are character offsets within their line, half-open
///   (`[start, end)`). Empty matches are skipped.
pub fn find_all(
    doc: &Document,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<SearchMatch>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let re = compile_search_regex(query, options)?;

    let mut matches = Vec::new();
    for (line_no, line) in doc.lines.iter().enumerate() {
        for m in re.find_iter(line) {
            if m.start() == m.end() {
                continue;
            }
            if options.whole_word && !is_whole_word(line, m.start(), m.end()) {
                continue;
            }
            matches.push(SearchMatch {
                line: line_no,
                start: line[..m.start()].chars().count(),
                end: line[..m.end()].chars().count(),
                section: find_section_at_line(doc, line_no).map(|s| s.id.clone()),
                line_text: line.clone(),
            });
        }
    }
    Ok(matches)
}

/// Find all occurrences of `query` within one section's region.
///
/// `deep` widens the region to the section's whole subtree, mirroring the
/// read/write scope rules.
pub fn find_in_section(
    doc: &Document,
    id: &SectionId,
    query: &str,
    options: SearchOptions,
    deep: bool,
) -> Result<Vec<SearchMatch>, SearchError> {
    use crate::locate::{find_section, section_end_line};

    let Some(section) = find_section(doc, id) else {
        return Ok(Vec::new());
    };
    let end = section_end_line(doc, section, deep);

    let all = find_all(doc, query, options)?;
    Ok(all
        .into_iter()
        .filter(|m| m.line >= section.line && m.line < end)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_search_reports_lines_and_sections() {
        let doc = Document::parse("# Alpha\nneedle here\n# Beta\nno match\nneedle again\n");
        let matches = find_all(&doc, "needle", SearchOptions::default()).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line, 1);
        assert_eq!(
            matches[0].section,
            Some(SectionId::compute(1, "Alpha", 0))
        );
        assert_eq!(matches[1].line, 4);
        assert_eq!(matches[1].section, Some(SectionId::compute(1, "Beta", 0)));
    }

    #[test]
    fn test_char_offsets_not_bytes() {
        let doc = Document::parse("héllo needle\n");
        let matches = find_all(&doc, "needle", SearchOptions::default()).unwrap();
        assert_eq!(matches[0].start, 6);
        assert_eq!(matches[0].end, 12);
    }

    #[test]
    fn test_case_insensitive() {
        let doc = Document::parse("NEEDLE\n");
        let options = SearchOptions {
            case_sensitive: false,
            ..SearchOptions::default()
        };
        assert_eq!(find_all(&doc, "needle", options).unwrap().len(), 1);
        assert!(find_all(&doc, "needle", SearchOptions::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_whole_word() {
        let doc = Document::parse("cat category\n");
        let options = SearchOptions {
            whole_word: true,
            ..SearchOptions::default()
        };
        let matches = find_all(&doc, "cat", options).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start, 0);
    }

    #[test]
    fn test_regex_search() {
        let doc = Document::parse("item-12\nitem-x\n");
        let options = SearchOptions {
            regex: true,
            ..SearchOptions::default()
        };
        let matches = find_all(&doc, r"item-\d+", options).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line, 0);
    }

    #[test]
    fn test_invalid_regex() {
        let doc = Document::parse("x\n");
        let options = SearchOptions {
            regex: true,
            ..SearchOptions::default()
        };
        assert!(find_all(&doc, "(unclosed", options).is_err());
    }

    #[test]
    fn test_find_in_section_scopes() {
        let doc = Document::parse("# A\nhit\n## B\nhit\n# C\nhit\n");
        let a = SectionId::compute(1, "A", 0);

        let shallow =
            find_in_section(&doc, &a, "hit", SearchOptions::default(), false).unwrap();
        assert_eq!(shallow.len(), 1);

        let deep = find_in_section(&doc, &a, "hit", SearchOptions::default(), true).unwrap();
        assert_eq!(deep.len(), 2);
    }

    #[test]
    fn test_empty_query() {
        let doc = Document::parse("anything\n");
        assert!(find_all(&doc, "", SearchOptions::default())
            .unwrap()
            .is_empty());
    }
}
