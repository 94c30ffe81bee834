use crate::ids::BookmarkName;
use serde::{Deserialize, Serialize};

/// An entry in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    /// The text shown in the table of contents row.
    pub title: String,
    /// The bookmark placed where the entry's title appeared in the text.
    pub bookmark: BookmarkName,
}

impl TocEntry {
    pub fn new(title: impl Into<String>, bookmark: BookmarkName) -> Self {
        Self {
            title: title.into(),
            bookmark,
        }
    }
}
