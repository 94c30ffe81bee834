//! Intermediate Document Format (IDF)
//! This crate defines the in-memory representation of a rendered scripture
//! document: paragraphs of styled runs, section breaks with page headers,
//! footnotes, tables and a table-of-contents placeholder. It is the hand-off
//! point to a word-processing serializer and carries no format-specific
//! encoding itself.

use serde::{Deserialize, Serialize};
use vellum_style::{PageMargins, StyleContext, TextAlign, VerticalAlign};
use vellum_types::{BookmarkName, FootnoteId, HeaderId};

/// Spacing after a paragraph, in twips, unless a caller asks for another value.
pub const DEFAULT_SPACING_AFTER: u32 = 200;

// --- Document ---

/// A complete rendered document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Body content in reading order.
    pub body: Vec<BodyBlock>,
    /// Footnote part entries, in the order their references appear.
    pub footnotes: Vec<Footnote>,
    /// Header parts referenced by section breaks.
    pub headers: Vec<PageHeader>,
    /// Properties of the last section, which in the output format belong to
    /// the body itself rather than to a paragraph.
    pub final_section: SectionProperties,
    pub settings: DocumentSettings,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block and returns its index in `body`.
    pub fn push_block(&mut self, block: BodyBlock) -> usize {
        self.body.push(block);
        self.body.len() - 1
    }

    /// Appends a paragraph and returns its index in `body`.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) -> usize {
        self.push_block(BodyBlock::Paragraph(paragraph))
    }

    pub fn paragraph_at(&self, index: usize) -> Option<&Paragraph> {
        match self.body.get(index) {
            Some(BodyBlock::Paragraph(p)) => Some(p),
            _ => None,
        }
    }

    pub fn paragraph_at_mut(&mut self, index: usize) -> Option<&mut Paragraph> {
        match self.body.get_mut(index) {
            Some(BodyBlock::Paragraph(p)) => Some(p),
            _ => None,
        }
    }

    /// All body paragraphs in order, skipping tables, section breaks and the
    /// table of contents.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|block| match block {
            BodyBlock::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Section breaks within the body, in order. The final section is not
    /// included.
    pub fn section_breaks(&self) -> impl Iterator<Item = &SectionProperties> {
        self.body.iter().filter_map(|block| match block {
            BodyBlock::SectionBreak(s) => Some(s),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|block| match block {
            BodyBlock::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn header(&self, id: &HeaderId) -> Option<&PageHeader> {
        self.headers.iter().find(|h| &h.id == id)
    }

    pub fn footnote(&self, book_index: usize, id: FootnoteId) -> Option<&Footnote> {
        self.footnotes
            .iter()
            .find(|f| f.book_index == book_index && f.id == id)
    }
}

/// Document-wide settings that a serializer writes into the settings part.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSettings {
    /// Ask the viewer to refresh fields (TOC page numbers) on open.
    pub update_fields_on_open: bool,
    /// Language tag for right-to-left runs, e.g. `ar-SA`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_to_left_lang: Option<String>,
}

// --- Main Block Enum ---

/// A block-level element of the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BodyBlock {
    Paragraph(Paragraph),
    Table(Table),
    /// End of a section. Serialized as an empty paragraph carrying the
    /// section properties, because the format binds a section to its last
    /// paragraph.
    SectionBreak(SectionProperties),
    TableOfContents(TocBlock),
}

impl BodyBlock {
    /// Returns a string identifier for the block type.
    pub fn kind(&self) -> &'static str {
        match self {
            BodyBlock::Paragraph(_) => "paragraph",
            BodyBlock::Table(_) => "table",
            BodyBlock::SectionBreak(_) => "section-break",
            BodyBlock::TableOfContents(_) => "table-of-contents",
        }
    }
}

// --- Paragraphs and Runs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphProperties {
    pub alignment: TextAlign,
    /// Left indentation in twips.
    pub indent_left: u32,
    /// Spacing after the paragraph in twips.
    pub spacing_after: u32,
    /// Line spacing as a multiple of single spacing.
    pub line_spacing: f32,
    /// Right-to-left paragraph direction.
    pub bidi: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    /// Top border, set on the line separating note blocks from the text.
    pub border_top: BorderStyle,
}

impl Default for ParagraphProperties {
    fn default() -> Self {
        Self {
            alignment: TextAlign::Left,
            indent_left: 0,
            spacing_after: DEFAULT_SPACING_AFTER,
            line_spacing: 1.0,
            bidi: false,
            style_id: None,
            border_top: BorderStyle::None,
        }
    }
}

/// A paragraph, containing only inline content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    pub props: ParagraphProperties,
    pub children: Vec<Inline>,
}

impl Paragraph {
    pub fn new(props: ParagraphProperties) -> Self {
        Self {
            props,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, inline: Inline) {
        self.children.push(inline);
    }

    pub fn push_run(&mut self, run: Run) {
        self.children.push(Inline::Run(run));
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// All runs of the paragraph in order.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.children.iter().filter_map(|inline| match inline {
            Inline::Run(r) => Some(r),
            _ => None,
        })
    }

    /// The visible text of the paragraph. Breaks become newlines and fields
    /// show their placeholder result.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for inline in &self.children {
            match inline {
                Inline::Run(run) => out.push_str(&run.text),
                Inline::Break(_) => out.push('\n'),
                Inline::FootnoteReference(r) => out.push_str(&r.text),
                Inline::Field(field) => out.push_str(&field.placeholder),
                Inline::BookmarkStart { .. } | Inline::BookmarkEnd { .. } => {}
            }
        }
        out
    }

    /// True when the paragraph's text ends in whitespace (including the
    /// non-breaking space) or a break.
    pub fn ends_with_whitespace(&self) -> bool {
        let last_visible = self.children.iter().rev().find(|inline| {
            !matches!(inline, Inline::BookmarkStart { .. } | Inline::BookmarkEnd { .. })
        });
        match last_visible {
            Some(Inline::Break(_)) => true,
            Some(other) => {
                let text = match other {
                    Inline::Run(run) => run.text.as_str(),
                    Inline::FootnoteReference(r) => r.text.as_str(),
                    Inline::Field(field) => field.placeholder.as_str(),
                    _ => "",
                };
                text.chars().next_back().is_some_and(char::is_whitespace)
            }
            None => false,
        }
    }
}

/// Represents an inline-level element within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    Run(Run),
    Break(BreakKind),
    /// The call-site mark of a footnote, correlated with a [`Footnote`] by id.
    FootnoteReference(FootnoteReference),
    Field(Field),
    BookmarkStart { id: u32, name: BookmarkName },
    BookmarkEnd { id: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakKind {
    /// Text-wrapping line break.
    Line,
    Page,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunProperties {
    pub bold: bool,
    pub italic: bool,
    pub small_caps: bool,
    /// Font size in points; `None` inherits the paragraph default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    pub vertical: VerticalAlign,
    pub underline: bool,
    pub right_to_left: bool,
}

impl RunProperties {
    /// Run formatting for text written under the given style.
    pub fn from_style(style: &StyleContext) -> Self {
        Self {
            bold: style.is_bold(),
            italic: style.is_italic(),
            small_caps: style.is_small_caps(),
            font_size: Some(style.font_size()),
            ..Default::default()
        }
    }

    pub fn superscript(mut self) -> Self {
        self.vertical = VerticalAlign::Superscript;
        self
    }

    pub fn right_to_left(mut self, rtl: bool) -> Self {
        self.right_to_left = rtl;
        self
    }
}

/// A run of uniformly formatted text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub props: RunProperties,
}

impl Run {
    pub fn new(text: impl Into<String>, props: RunProperties) -> Self {
        Self {
            text: text.into(),
            props,
        }
    }

    /// A run with no formatting of its own.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, RunProperties::default())
    }

    pub fn is_superscript(&self) -> bool {
        self.props.vertical == VerticalAlign::Superscript
    }
}

/// A field whose result is computed by the viewer (page numbers, TOC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub instruction: String,
    /// Result shown until the viewer updates the field.
    pub placeholder: String,
}

impl Field {
    pub fn new(instruction: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            placeholder: placeholder.into(),
        }
    }

    /// The current page number.
    pub fn page() -> Self {
        Self::new(" PAGE ", "1")
    }

    /// The page number of a bookmark.
    pub fn page_ref(bookmark: &BookmarkName) -> Self {
        Self::new(format!(" PAGEREF {bookmark} \\h "), "1")
    }
}

// --- Footnotes ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootnoteReference {
    pub id: FootnoteId,
    /// Ordinal of the book (counted by book-id markers) the note belongs to.
    pub book_index: usize,
    pub text: String,
    pub props: RunProperties,
}

/// An entry of the footnote part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footnote {
    pub id: FootnoteId,
    pub book_index: usize,
    pub paragraphs: Vec<Paragraph>,
}

impl Footnote {
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// --- Sections and Headers ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionBreakType {
    /// The next section starts on the same page.
    #[default]
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberFormat {
    #[default]
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChapterSeparator {
    Hyphen,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionProperties {
    pub break_type: SectionBreakType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderId>,
    pub column_count: u32,
    pub page_number_format: NumberFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_separator: Option<ChapterSeparator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<PageMargins>,
}

impl Default for SectionProperties {
    fn default() -> Self {
        Self {
            break_type: SectionBreakType::Continuous,
            header: None,
            column_count: 1,
            page_number_format: NumberFormat::Decimal,
            chapter_separator: None,
            margins: None,
        }
    }
}

/// A header part: the page region shown on every page of the sections that
/// reference it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageHeader {
    pub id: HeaderId,
    pub paragraphs: Vec<Paragraph>,
}

impl PageHeader {
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// --- Table-specific Structures ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderStyle {
    #[default]
    None,
    Single,
}

/// Outer and inside borders of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBorders {
    pub top: BorderStyle,
    pub bottom: BorderStyle,
    pub left: BorderStyle,
    pub right: BorderStyle,
    pub inside_horizontal: BorderStyle,
    pub inside_vertical: BorderStyle,
}

impl TableBorders {
    pub fn none() -> Self {
        Self {
            top: BorderStyle::None,
            bottom: BorderStyle::None,
            left: BorderStyle::None,
            right: BorderStyle::None,
            inside_horizontal: BorderStyle::None,
            inside_vertical: BorderStyle::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
    pub borders: TableBorders,
}

impl Table {
    /// A table without any visible grid lines.
    pub fn borderless(rows: Vec<TableRow>) -> Self {
        Self {
            rows,
            borders: TableBorders::none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub paragraph: Paragraph,
}

// --- Table of Contents ---

/// A table-of-contents placeholder. The viewer replaces the field result
/// with real page numbers when fields are updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocBlock {
    pub heading: String,
    pub instruction: String,
    pub rows: Vec<TocRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocRow {
    pub title: String,
    pub bookmark: BookmarkName,
    pub page_field: Field,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph_with(children: Vec<Inline>) -> Paragraph {
        Paragraph {
            props: ParagraphProperties::default(),
            children,
        }
    }

    #[test]
    fn test_paragraph_text() {
        let p = paragraph_with(vec![
            Inline::Run(Run::plain("1")),
            Inline::Run(Run::plain("\u{a0}")),
            Inline::Run(Run::plain("Text")),
            Inline::Break(BreakKind::Line),
            Inline::Field(Field::page()),
        ]);
        assert_eq!(p.text(), "1\u{a0}Text\n1");
    }

    #[test]
    fn test_ends_with_whitespace() {
        assert!(!paragraph_with(vec![]).ends_with_whitespace());
        assert!(!paragraph_with(vec![Inline::Run(Run::plain("word"))]).ends_with_whitespace());
        assert!(paragraph_with(vec![Inline::Run(Run::plain("word "))]).ends_with_whitespace());
        assert!(paragraph_with(vec![Inline::Run(Run::plain("\u{a0}"))]).ends_with_whitespace());
        assert!(paragraph_with(vec![Inline::Break(BreakKind::Line)]).ends_with_whitespace());
        assert!(
            paragraph_with(vec![
                Inline::Run(Run::plain("end ")),
                Inline::BookmarkStart { id: 1, name: BookmarkName::toc(1) },
                Inline::BookmarkEnd { id: 1 },
            ])
            .ends_with_whitespace()
        );
    }

    #[test]
    fn test_run_properties_from_style() {
        let style = StyleContext::new(12).with_bold(true).with_small_caps(true);
        let props = RunProperties::from_style(&style).superscript();

        assert!(props.bold);
        assert!(!props.italic);
        assert!(props.small_caps);
        assert_eq!(props.font_size, Some(12));
        assert_eq!(props.vertical, VerticalAlign::Superscript);
    }

    #[test]
    fn test_document_paragraph_indexing() {
        let mut doc = Document::new();
        let first = doc.push_paragraph(Paragraph::default());
        let section = doc.push_block(BodyBlock::SectionBreak(SectionProperties::default()));
        let second = doc.push_paragraph(Paragraph::default());

        assert_eq!((first, section, second), (0, 1, 2));
        assert!(doc.paragraph_at(section).is_none());
        doc.paragraph_at_mut(second).unwrap().push_run(Run::plain("x"));

        assert_eq!(doc.paragraphs().count(), 2);
        assert_eq!(doc.section_breaks().count(), 1);
        assert_eq!(doc.paragraphs().last().unwrap().text(), "x");
    }

    #[test]
    fn test_borderless_table() {
        let table = Table::borderless(vec![TableRow::default()]);
        assert_eq!(table.borders.inside_vertical, BorderStyle::None);
        assert_eq!(table.borders.top, BorderStyle::None);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_page_ref_field() {
        let field = Field::page_ref(&BookmarkName::toc(3));
        assert_eq!(field.instruction, " PAGEREF _Toc3 \\h ");
        assert_eq!(field.placeholder, "1");
    }
}
