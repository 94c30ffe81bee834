use indexmap::IndexMap;
use vellum_idf::{Field, TocBlock, TocRow};
use vellum_types::{BookmarkName, TocEntry};

pub const TOC_HEADING: &str = "Table of Contents";
pub const TOC_INSTRUCTION: &str = " TOC \\h \\z";

/// Collects book titles and the bookmarks placed at them.
///
/// Titles keep the order in which they were first seen; a repeated title
/// keeps its first bookmark.
#[derive(Debug, Default)]
pub struct TocBuilder {
    titles: IndexMap<String, BookmarkName>,
    next_bookmark: u32,
}

impl TocBuilder {
    pub fn new() -> Self {
        Self {
            titles: IndexMap::new(),
            next_bookmark: 1,
        }
    }

    /// Allocates a bookmark for an occurrence of `title` and registers the
    /// title if it is new. Returns the numeric bookmark id and its name.
    pub fn add_bookmark(&mut self, title: &str) -> (u32, BookmarkName) {
        let n = self.next_bookmark;
        self.next_bookmark += 1;
        let name = BookmarkName::toc(n);
        self.titles
            .entry(title.to_string())
            .or_insert_with(|| name.clone());
        (n, name)
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn entries(&self) -> Vec<TocEntry> {
        self.titles
            .iter()
            .map(|(title, bookmark)| TocEntry::new(title.clone(), bookmark.clone()))
            .collect()
    }

    /// A table of contents with a row per entry. Page numbers are fields the
    /// viewer fills in.
    pub fn build(entries: &[TocEntry]) -> TocBlock {
        TocBlock {
            heading: TOC_HEADING.to_string(),
            instruction: TOC_INSTRUCTION.to_string(),
            rows: entries
                .iter()
                .map(|entry| TocRow {
                    title: entry.title.clone(),
                    bookmark: entry.bookmark.clone(),
                    page_field: Field::page_ref(&entry.bookmark),
                })
                .collect(),
        }
    }
}
