//! Per-call rendering state.

use crate::notes::NoteCollector;
use crate::pagination::{BookHeaders, BookPhase};
use crate::toc::TocBuilder;
use vellum_idf::Paragraph;
use vellum_types::{BookmarkName, FootnoteId, MarkerKind};

/// Label used in front of the chapter number unless a `\cl` before the first
/// chapter replaces it.
pub const DEFAULT_CHAPTER_LABEL: &str = "Chapter";

/// Where inline content of the marker being rendered goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphHandle {
    /// A paragraph in `Document::body`, by block index.
    Body(usize),
    /// A paragraph of an entry in `Document::footnotes`.
    Footnote { note: usize, paragraph: usize },
    /// A paragraph not yet placed in the document, such as a table cell
    /// being filled. Indexes the session's detached stack.
    Detached(usize),
}

/// State threaded through one render call and dropped afterwards.
///
/// A fresh session is built for every call, so rendering the same tree twice
/// never observes state from the previous run.
#[derive(Debug)]
pub(crate) struct RenderSession<'a> {
    current_is_chapter: bool,
    previous_was_chapter: bool,
    pub(crate) phase: BookPhase,
    /// Replacement for the word "Chapter", from a `\cl` before the first
    /// chapter of the book.
    pub(crate) chapter_label_override: Option<String>,
    /// The label of the chapter being rendered (`"Chapter 3"`, `"Psalm One"`).
    pub(crate) current_chapter_label: String,
    pub(crate) next_footnote_id: FootnoteId,
    /// Number of book-id markers seen so far.
    pub(crate) book_index: usize,
    pub(crate) headers: BookHeaders,
    pub(crate) cross_refs: NoteCollector<'a>,
    pub(crate) toc: TocBuilder,
    /// Bookmarks placed where no paragraph was open. They go to the start of
    /// the next heading or body paragraph.
    pub(crate) pending_bookmarks: Vec<(u32, BookmarkName)>,
    pub(crate) detached: Vec<Paragraph>,
    pub(crate) unrenderable: Vec<String>,
}

impl<'a> RenderSession<'a> {
    pub(crate) fn new() -> Self {
        Self {
            current_is_chapter: false,
            previous_was_chapter: false,
            phase: BookPhase::BeforeFirstChapter,
            chapter_label_override: None,
            current_chapter_label: String::new(),
            next_footnote_id: FootnoteId::FIRST,
            book_index: 0,
            headers: BookHeaders::new(),
            cross_refs: NoteCollector::new(),
            toc: TocBuilder::new(),
            pending_bookmarks: Vec::new(),
            detached: Vec::new(),
            unrenderable: Vec::new(),
        }
    }

    /// Records that `kind` is the marker now being rendered. Must be called
    /// once per marker in traversal order.
    pub(crate) fn visit(&mut self, kind: &MarkerKind) {
        self.previous_was_chapter = self.current_is_chapter;
        self.current_is_chapter = matches!(kind, MarkerKind::Chapter { .. });
    }

    /// True when the marker visited just before the current one was a chapter.
    pub(crate) fn previous_was_chapter(&self) -> bool {
        self.previous_was_chapter
    }

    /// Hands out the next footnote number of the current book.
    pub(crate) fn allocate_footnote_id(&mut self) -> FootnoteId {
        let id = self.next_footnote_id;
        self.next_footnote_id = id.next();
        id
    }

    /// Resets the per-book state at a book-id marker.
    pub(crate) fn start_book(&mut self) {
        self.headers.close(&self.current_chapter_label);
        self.phase = BookPhase::BeforeFirstChapter;
        self.chapter_label_override = None;
        self.current_chapter_label.clear();
        self.next_footnote_id = FootnoteId::FIRST;
        self.book_index += 1;
    }

    /// The label of chapter `number`, honouring a chapter-local label first
    /// and the book-level override second.
    pub(crate) fn chapter_label(&self, number: i32, local: Option<&str>) -> String {
        match local {
            Some(label) => label.to_string(),
            None => {
                let word = self
                    .chapter_label_override
                    .as_deref()
                    .unwrap_or(DEFAULT_CHAPTER_LABEL);
                format!("{word} {number}")
            }
        }
    }

    pub(crate) fn record_unrenderable(&mut self, identifier: impl Into<String>) {
        self.unrenderable.push(identifier.into());
    }
}
