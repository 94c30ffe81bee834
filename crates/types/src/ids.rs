//! Newtype wrappers for semantic IDs
//!
//! These types keep the different kinds of identifiers that flow between the
//! renderer and the serializer apart at compile time (header part ids,
//! bookmark names, footnote numbers).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// The relationship id of a page header part (e.g. `rId3`).
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderId(Arc<str>);

impl HeaderId {
    /// Creates a new HeaderId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Builds the header id for the n-th allocated header.
    pub fn numbered(n: u32) -> Self {
        Self(format!("rId{n}").into())
    }

    /// Returns the string representation of this header ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HeaderId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for HeaderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HeaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The name of a bookmark that a table-of-contents row points at (e.g. `_Toc1`).
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkName(Arc<str>);

impl BookmarkName {
    /// Builds the TOC bookmark name for the n-th bookmark.
    pub fn toc(n: u32) -> Self {
        Self(format!("_Toc{n}").into())
    }

    /// Returns the string representation of this bookmark name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BookmarkName {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<String> for BookmarkName {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for BookmarkName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookmarkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A footnote number. Numbering restarts with every book, so a footnote is
/// only unique together with the ordinal of the book it belongs to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FootnoteId(pub u32);

impl FootnoteId {
    pub const FIRST: FootnoteId = FootnoteId(1);

    pub fn next(self) -> Self {
        FootnoteId(self.0 + 1)
    }
}

impl fmt::Display for FootnoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_id_creation() {
        let id1 = HeaderId::numbered(1);
        let id2 = HeaderId::from("rId1");
        let id3 = HeaderId::new(String::from("rId1"));

        assert_eq!(id1, id2);
        assert_eq!(id2, id3);
        assert_eq!(id1.as_str(), "rId1");
    }

    #[test]
    fn test_bookmark_name_creation() {
        let b1 = BookmarkName::toc(7);
        let b2 = BookmarkName::from("_Toc7");

        assert_eq!(b1, b2);
        assert_eq!(b1.to_string(), "_Toc7");
    }

    #[test]
    fn test_footnote_id_sequence() {
        let first = FootnoteId::FIRST;
        assert_eq!(first.next(), FootnoteId(2));
        assert!(first < first.next());
        assert_eq!(first.to_string(), "1");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&HeaderId::numbered(4)).unwrap();
        assert_eq!(json, "\"rId4\"");

        let id: FootnoteId = serde_json::from_str("3").unwrap();
        assert_eq!(id, FootnoteId(3));
    }
}
