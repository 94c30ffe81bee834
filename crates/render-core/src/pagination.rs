//! Book sections and their running page headers.
//!
//! A section's properties belong at the *end* of the section, but a book's
//! header title is known at its start. [`BookHeaders`] bridges the two: the
//! title is scheduled when a `\h` marker is seen and committed once the
//! book's content is complete, i.e. when the next book begins or the document
//! ends.

use crate::config::RenderConfig;
use vellum_idf::{
    BodyBlock, ChapterSeparator, Document, Field, Inline, NumberFormat, PageHeader, Paragraph,
    ParagraphProperties, Run, SectionBreakType, SectionProperties,
};
use vellum_style::TextAlign;
use vellum_types::HeaderId;

/// Position of the traversal within the current book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookPhase {
    /// After a book-id marker (or at the start of the document) and before
    /// the book's first chapter.
    BeforeFirstChapter,
    InChapter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingHeader {
    title: String,
    /// Set when the book ended (a book-id marker was seen). Holds the chapter
    /// label current at that point.
    closed_label: Option<String>,
}

/// The deferred-commit queue of book headers, plus the header id allocator.
#[derive(Debug)]
pub struct BookHeaders {
    next_id: u32,
    pending: Option<PendingHeader>,
}

impl Default for BookHeaders {
    fn default() -> Self {
        Self::new()
    }
}

impl BookHeaders {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: None,
        }
    }

    /// True when a book title is waiting to be committed.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// True when the pending book has ended and its header is due at the next
    /// chapter.
    pub fn is_closed(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.closed_label.is_some())
    }

    /// Schedules the header of the book that is starting.
    pub fn schedule(&mut self, title: impl Into<String>) {
        if let Some(previous) = &self.pending {
            log::warn!(
                "Book header '{}' replaced before it was committed",
                previous.title
            );
        }
        self.pending = Some(PendingHeader {
            title: title.into(),
            closed_label: None,
        });
    }

    /// Marks the pending book as finished, remembering its last chapter label.
    pub fn close(&mut self, chapter_label: &str) {
        if let Some(pending) = self.pending.as_mut() {
            pending
                .closed_label
                .get_or_insert_with(|| chapter_label.to_string());
        }
    }

    /// Allocates the next header id. Ids are never reused within a document.
    pub fn allocate_id(&mut self) -> HeaderId {
        let id = HeaderId::numbered(self.next_id);
        self.next_id += 1;
        id
    }

    /// Writes the pending book header, if any, as a section break at the end
    /// of the body. `current_label` is used when the book was not closed by a
    /// book-id marker.
    pub fn commit(
        &mut self,
        document: &mut Document,
        config: &RenderConfig,
        current_label: &str,
    ) -> Option<HeaderId> {
        let pending = self.pending.take()?;
        let label = pending.closed_label.as_deref().unwrap_or(current_label);
        let id = self.allocate_id();
        let (header, section) = create_book_header(id.clone(), &pending.title, label, config);
        log::debug!(
            "Committing book header {} for '{}' (label '{}')",
            id,
            pending.title,
            label
        );
        document.headers.push(header);
        document.push_block(BodyBlock::SectionBreak(section));
        Some(id)
    }

    /// Writes a section with an empty header, closing front matter or the
    /// table of contents.
    pub fn commit_blank(&mut self, document: &mut Document) -> HeaderId {
        let id = self.allocate_id();
        let (header, section) = create_blank_header(id.clone());
        log::debug!("Committing blank header {}", id);
        document.headers.push(header);
        document.push_block(BodyBlock::SectionBreak(section));
        id
    }
}

/// Builds the centred running header of a book and the section that uses it.
///
/// The header reads `PAGE - title  -  label`; the page field is left out when
/// page numbers are disabled and the label part when no chapter label is
/// known.
pub fn create_book_header(
    id: HeaderId,
    title: &str,
    chapter_label: &str,
    config: &RenderConfig,
) -> (PageHeader, SectionProperties) {
    let mut paragraph = Paragraph::new(ParagraphProperties {
        alignment: TextAlign::Center,
        ..Default::default()
    });

    if config.show_page_numbers {
        paragraph.push(Inline::Field(Field::page()));
        paragraph.push_run(Run::plain(" - "));
    }
    paragraph.push_run(Run::plain(title));
    if !chapter_label.is_empty() {
        paragraph.push_run(Run::plain("  -  "));
        paragraph.push_run(Run::plain(chapter_label));
    }

    let section = SectionProperties {
        break_type: SectionBreakType::Continuous,
        header: Some(id.clone()),
        column_count: config.column_count,
        page_number_format: NumberFormat::Decimal,
        chapter_separator: Some(ChapterSeparator::Hyphen),
        margins: config.page_margins(),
    };

    (
        PageHeader {
            id,
            paragraphs: vec![paragraph],
        },
        section,
    )
}

/// Builds an empty header and the single-column section that uses it.
pub fn create_blank_header(id: HeaderId) -> (PageHeader, SectionProperties) {
    let section = SectionProperties {
        header: Some(id.clone()),
        ..Default::default()
    };
    (
        PageHeader {
            id,
            paragraphs: vec![Paragraph::default()],
        },
        section,
    )
}
