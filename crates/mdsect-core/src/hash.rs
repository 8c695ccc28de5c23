//! Stable section identity.
//!
//! A section is identified by a content-derived hash of `(level, title,
//! occurrence index)`, never by its position in the document. Editing one
//! section therefore never changes the id of any other section, as long as
//! the other section's heading and its rank among identical headings are
//! untouched.

use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Number of hex characters kept from the SHA-256 digest.
const ID_LEN: usize = 16;

/// An opaque, content-derived section identifier.
///
/// Ids are a pure function of `(level, title, occurrence)` and are therefore
/// stable across edits elsewhere in the document. Use [`SectionId::compute`]
/// to derive one and [`SectionId::parse`] to validate an externally supplied
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Derive the id for the `occurrence`-th heading with this `level` and
    /// `title` (zero-based, in document order).
    pub fn compute(level: u8, title: &str, occurrence: usize) -> Self {
        let mut hasher = Sha256::new();
        hasher.update([level]);
        hasher.update([0u8]);
        hasher.update(title.as_bytes());
        hasher.update([0u8]);
        hasher.update((occurrence as u64).to_le_bytes());
        let digest = hasher.finalize();

        let mut hex = String::with_capacity(ID_LEN);
        for byte in digest.iter().take(ID_LEN / 2) {
            use std::fmt::Write;
            let _ = write!(hex, "{byte:02x}");
        }
        Self(hex)
    }

    /// Validate an externally supplied id string.
    ///
    /// Returns [`CoreError::InvalidId`] unless the input has the exact shape
    /// this module produces (16 lowercase hex characters).
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let well_formed = raw.len() == ID_LEN
            && raw
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        if !well_formed {
            return Err(CoreError::InvalidId(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// The id as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
