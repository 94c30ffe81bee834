//! The marker tree handed over by the markup parser.
//!
//! A [`Marker`] is a tagged node with an ordered list of children. The order of
//! `contents` is the reading order of the text and is never changed by the
//! renderer.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A node of the parsed marker tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(flatten)]
    pub kind: MarkerKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<Marker>,
}

/// The kind of a marker, together with the data the markup attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MarkerKind {
    /// Root of a parsed document.
    Document,
    /// `\id`: start of a new book.
    BookId { code: String },
    /// `\ide`: file encoding declaration.
    Encoding { encoding: String },
    /// `\h`: running header title of the book.
    Header { title: String },
    /// `\toc2`: short book title used for the table of contents.
    ShortTocTitle { title: String },
    /// `\mt#`: major title.
    MajorTitle { title: String, weight: u8 },
    /// `\cl`: chapter label, document-wide before the first chapter or
    /// chapter-local inside a chapter.
    ChapterLabel { label: String },
    /// `\c`
    Chapter { number: i32 },
    /// `\v`; the number is kept as written (`"1"`, `"3-4"`).
    Verse { number: String },
    /// `\p`
    Paragraph,
    /// `\ip`
    IntroParagraph,
    /// `\q#`
    Poetry { depth: u32 },
    /// Plain text content.
    Text { text: String },
    /// `\bd`
    Bold,
    /// `\it`
    Italic,
    /// `\bdit`
    BoldItalic,
    /// `\sc`
    SmallCaps,
    /// `\b`
    LineBreak,
    /// `\f`
    Footnote { caller: String },
    /// `\ft`
    FootnoteText,
    /// `\fp`
    FootnoteParagraph,
    /// `\fr`
    FootnoteReference { reference: String },
    /// `\fk`
    FootnoteKeyword { keyword: String },
    /// `\fq`
    FootnoteQuote,
    /// `\fqa`
    FootnoteAltQuote,
    /// `\f*`
    FootnoteEnd,
    /// `\x`
    CrossRef { caller: String },
    /// `\xo`
    CrossRefOrigin { reference: String },
    /// `\xt`
    CrossRefText,
    /// `\xq`
    CrossRefQuote,
    /// `\x*`
    CrossRefEnd,
    /// `\vp`
    PublishedVerse,
    /// `\vp*`
    PublishedVerseEnd,
    /// `\tb`: implicit table wrapping consecutive `\tr` rows.
    Table,
    /// `\tr`
    TableRow,
    /// `\th#`
    TableHeaderCell { column: u32 },
    /// `\thr#`
    TableHeaderCellRight { column: u32 },
    /// `\tc#`
    TableCell { column: u32 },
    /// `\tcr#`
    TableCellRight { column: u32 },
    /// Any marker the parser recognised but this model does not describe.
    Unknown { identifier: String },
}

impl Marker {
    pub fn new(kind: MarkerKind) -> Self {
        Self {
            kind,
            contents: Vec::new(),
        }
    }

    /// Replaces the children of this marker.
    pub fn with_contents(mut self, contents: Vec<Marker>) -> Self {
        self.contents = contents;
        self
    }

    /// Appends a single child.
    pub fn push(mut self, child: Marker) -> Self {
        self.contents.push(child);
        self
    }

    pub fn document(contents: Vec<Marker>) -> Self {
        Self::new(MarkerKind::Document).with_contents(contents)
    }

    pub fn book_id(code: impl Into<String>) -> Self {
        Self::new(MarkerKind::BookId { code: code.into() })
    }

    pub fn header(title: impl Into<String>) -> Self {
        Self::new(MarkerKind::Header {
            title: title.into(),
        })
    }

    pub fn short_toc_title(title: impl Into<String>) -> Self {
        Self::new(MarkerKind::ShortTocTitle {
            title: title.into(),
        })
    }

    pub fn major_title(title: impl Into<String>, weight: u8) -> Self {
        Self::new(MarkerKind::MajorTitle {
            title: title.into(),
            weight,
        })
    }

    pub fn chapter_label(label: impl Into<String>) -> Self {
        Self::new(MarkerKind::ChapterLabel {
            label: label.into(),
        })
    }

    pub fn chapter(number: i32) -> Self {
        Self::new(MarkerKind::Chapter { number })
    }

    pub fn verse(number: impl Into<String>) -> Self {
        Self::new(MarkerKind::Verse {
            number: number.into(),
        })
    }

    pub fn paragraph() -> Self {
        Self::new(MarkerKind::Paragraph)
    }

    pub fn poetry(depth: u32) -> Self {
        Self::new(MarkerKind::Poetry { depth })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(MarkerKind::Text { text: text.into() })
    }

    pub fn footnote(caller: impl Into<String>) -> Self {
        Self::new(MarkerKind::Footnote {
            caller: caller.into(),
        })
    }

    pub fn cross_ref(caller: impl Into<String>) -> Self {
        Self::new(MarkerKind::CrossRef {
            caller: caller.into(),
        })
    }

    pub fn unknown(identifier: impl Into<String>) -> Self {
        Self::new(MarkerKind::Unknown {
            identifier: identifier.into(),
        })
    }

    /// The label given by a `\cl` child of this marker, if any.
    ///
    /// Only meaningful for chapters: a chapter-local label replaces the
    /// generated "Chapter n" text.
    pub fn chapter_label_override(&self) -> Option<&str> {
        self.contents.iter().find_map(|child| match &child.kind {
            MarkerKind::ChapterLabel { label } => Some(label.as_str()),
            _ => None,
        })
    }

    /// The markup identifier of this marker (`"c"`, `"q2"`, `"tcr1"`).
    pub fn identifier(&self) -> Cow<'static, str> {
        self.kind.identifier()
    }
}

impl MarkerKind {
    pub fn identifier(&self) -> Cow<'static, str> {
        let id = match self {
            MarkerKind::Document => "",
            MarkerKind::BookId { .. } => "id",
            MarkerKind::Encoding { .. } => "ide",
            MarkerKind::Header { .. } => "h",
            MarkerKind::ShortTocTitle { .. } => "toc2",
            MarkerKind::MajorTitle { weight, .. } => return Cow::Owned(format!("mt{weight}")),
            MarkerKind::ChapterLabel { .. } => "cl",
            MarkerKind::Chapter { .. } => "c",
            MarkerKind::Verse { .. } => "v",
            MarkerKind::Paragraph => "p",
            MarkerKind::IntroParagraph => "ip",
            MarkerKind::Poetry { depth } => return Cow::Owned(format!("q{depth}")),
            MarkerKind::Text { .. } => "",
            MarkerKind::Bold => "bd",
            MarkerKind::Italic => "it",
            MarkerKind::BoldItalic => "bdit",
            MarkerKind::SmallCaps => "sc",
            MarkerKind::LineBreak => "b",
            MarkerKind::Footnote { .. } => "f",
            MarkerKind::FootnoteText => "ft",
            MarkerKind::FootnoteParagraph => "fp",
            MarkerKind::FootnoteReference { .. } => "fr",
            MarkerKind::FootnoteKeyword { .. } => "fk",
            MarkerKind::FootnoteQuote => "fq",
            MarkerKind::FootnoteAltQuote => "fqa",
            MarkerKind::FootnoteEnd => "f*",
            MarkerKind::CrossRef { .. } => "x",
            MarkerKind::CrossRefOrigin { .. } => "xo",
            MarkerKind::CrossRefText => "xt",
            MarkerKind::CrossRefQuote => "xq",
            MarkerKind::CrossRefEnd => "x*",
            MarkerKind::PublishedVerse => "vp",
            MarkerKind::PublishedVerseEnd => "vp*",
            MarkerKind::Table => "tb",
            MarkerKind::TableRow => "tr",
            MarkerKind::TableHeaderCell { column } => return Cow::Owned(format!("th{column}")),
            MarkerKind::TableHeaderCellRight { column } => {
                return Cow::Owned(format!("thr{column}"));
            }
            MarkerKind::TableCell { column } => return Cow::Owned(format!("tc{column}")),
            MarkerKind::TableCellRight { column } => return Cow::Owned(format!("tcr{column}")),
            MarkerKind::Unknown { identifier } => return Cow::Owned(identifier.clone()),
        };
        Cow::Borrowed(id)
    }

    /// True for the four table cell variants.
    pub fn is_table_cell(&self) -> bool {
        matches!(
            self,
            MarkerKind::TableHeaderCell { .. }
                | MarkerKind::TableHeaderCellRight { .. }
                | MarkerKind::TableCell { .. }
                | MarkerKind::TableCellRight { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        assert_eq!(Marker::chapter(3).identifier(), "c");
        assert_eq!(Marker::poetry(2).identifier(), "q2");
        assert_eq!(Marker::major_title("Genesis", 1).identifier(), "mt1");
        assert_eq!(
            Marker::new(MarkerKind::TableCellRight { column: 2 }).identifier(),
            "tcr2"
        );
        assert_eq!(Marker::unknown("zzz").identifier(), "zzz");
    }

    #[test]
    fn test_chapter_label_override_uses_first_label_child() {
        let chapter = Marker::chapter(1).with_contents(vec![
            Marker::chapter_label("Psalm One"),
            Marker::verse("1"),
            Marker::chapter_label("ignored"),
        ]);
        assert_eq!(chapter.chapter_label_override(), Some("Psalm One"));
        assert_eq!(Marker::chapter(2).chapter_label_override(), None);
    }

    #[test]
    fn test_marker_tree_from_json() {
        let json = r#"{
            "type": "Document",
            "contents": [
                { "type": "Chapter", "number": 1, "contents": [
                    { "type": "Verse", "number": "1", "contents": [
                        { "type": "Text", "text": "In the beginning" }
                    ]}
                ]}
            ]
        }"#;
        let tree: Marker = serde_json::from_str(json).unwrap();

        let expected = Marker::document(vec![Marker::chapter(1).push(
            Marker::verse("1").push(Marker::text("In the beginning")),
        )]);
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_table_cell_detection() {
        assert!(MarkerKind::TableHeaderCell { column: 1 }.is_table_cell());
        assert!(MarkerKind::TableCellRight { column: 1 }.is_table_cell());
        assert!(!MarkerKind::TableRow.is_table_cell());
    }
}
