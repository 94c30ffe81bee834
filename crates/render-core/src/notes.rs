//! Footnotes and cross references.
//!
//! Footnotes go straight to the footnote part of the document with a
//! reference at the call site. Cross references are collected per chapter
//! and written as a block of note paragraphs when the chapter ends.

use crate::config::FootnoteCallerPolicy;
use crate::engine::RenderContext;
use crate::error::RenderError;
use crate::session::ParagraphHandle;
use vellum_idf::{
    BorderStyle, Footnote, FootnoteReference, Inline, Paragraph, ParagraphProperties, RunProperties,
};
use vellum_style::StyleContext;
use vellum_types::Marker;

/// Resolves a markup caller to the text shown for it.
///
/// `-` suppresses the caller, `+` is replaced by `number`, and anything else
/// is shown as written.
pub fn resolve_caller(caller: &str, number: usize) -> String {
    match caller {
        "-" => String::new(),
        "+" => number.to_string(),
        other => other.to_string(),
    }
}

/// A note waiting to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedNote<'a> {
    /// The caller as displayed, already resolved.
    pub caller: String,
    pub marker: &'a Marker,
}

/// Notes in the order they were added. Draining empties the collector, so
/// every note is written at most once.
#[derive(Debug, Default)]
pub struct NoteCollector<'a> {
    notes: Vec<CollectedNote<'a>>,
}

impl<'a> NoteCollector<'a> {
    pub fn new() -> Self {
        Self { notes: Vec::new() }
    }

    pub fn add(&mut self, caller: impl Into<String>, marker: &'a Marker) {
        self.notes.push(CollectedNote {
            caller: caller.into(),
            marker,
        });
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The number a `+` caller added now would receive.
    pub fn next_number(&self) -> usize {
        self.notes.len() + 1
    }

    pub fn drain(&mut self) -> Vec<CollectedNote<'a>> {
        std::mem::take(&mut self.notes)
    }
}

impl<'a> RenderContext<'a> {
    pub(crate) fn render_footnote(
        &mut self,
        marker: &'a Marker,
        caller: &str,
        style: StyleContext,
        paragraph: Option<ParagraphHandle>,
    ) -> Result<(), RenderError> {
        let id = self.session.allocate_footnote_id();
        let book_index = self.session.book_index;
        let display = resolve_caller(caller, id.0 as usize);
        let note_style = style.with_font_size(self.config.note_font_size);

        let (reference_text, prefix) = match self.config.footnote_callers {
            FootnoteCallerPolicy::NoteMarker => ("F".to_string(), Some(format!("F{id} "))),
            FootnoteCallerPolicy::Caller => {
                let prefix = (!display.is_empty()).then(|| format!("{display} "));
                (display, prefix)
            }
        };

        let mut body = Paragraph::new(self.note_paragraph_props());
        if let Some(prefix) = prefix {
            body.push_run(self.run(prefix, &note_style));
        }
        let note = self.document.footnotes.len();
        self.document.footnotes.push(Footnote {
            id,
            book_index,
            paragraphs: vec![body],
        });
        log::debug!("Registered footnote {} of book {}", id, book_index);

        self.render_children(
            marker,
            note_style,
            Some(ParagraphHandle::Footnote { note, paragraph: 0 }),
        )?;

        let call_site = self.ensure_paragraph(paragraph, marker);
        let props = RunProperties {
            underline: true,
            ..Default::default()
        }
        .superscript()
        .right_to_left(self.config.right_to_left);
        self.paragraph_mut(call_site)?
            .push(Inline::FootnoteReference(FootnoteReference {
                id,
                book_index,
                text: reference_text,
                props,
            }));
        Ok(())
    }

    pub(crate) fn render_cross_ref_caller(
        &mut self,
        marker: &'a Marker,
        caller: &str,
        style: StyleContext,
        paragraph: Option<ParagraphHandle>,
    ) -> Result<(), RenderError> {
        let display = resolve_caller(caller, self.session.cross_refs.next_number());
        if !display.is_empty() {
            let handle = self.ensure_paragraph(paragraph, marker);
            let run = self.superscript_run(display.clone(), &style);
            self.paragraph_mut(handle)?.push_run(run);
        }
        self.session.cross_refs.add(display, marker);
        Ok(())
    }

    /// Writes the collected cross references below a separator line and
    /// clears the collector.
    pub(crate) fn flush_cross_refs(&mut self, style: StyleContext) -> Result<(), RenderError> {
        let notes = self.session.cross_refs.drain();
        if notes.is_empty() {
            return Ok(());
        }
        log::debug!("Flushing {} cross references", notes.len());

        let separator = ParagraphProperties {
            border_top: BorderStyle::Single,
            ..self.body_paragraph_props()
        };
        self.document.push_paragraph(Paragraph::new(separator));

        let note_style = style.with_font_size(self.config.note_font_size);
        for note in notes {
            let mut paragraph = Paragraph::new(self.note_paragraph_props());
            paragraph.push_run(self.superscript_run(note.caller, &note_style));
            let index = self.document.push_paragraph(paragraph);
            self.render_children(note.marker, note_style, Some(ParagraphHandle::Body(index)))?;
        }
        Ok(())
    }

    fn note_paragraph_props(&self) -> ParagraphProperties {
        ParagraphProperties {
            bidi: self.config.right_to_left,
            ..Default::default()
        }
    }
}
