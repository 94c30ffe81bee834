//! The recursive marker-tree renderer.

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::pagination::BookPhase;
use crate::session::{ParagraphHandle, RenderSession};
use crate::toc::TocBuilder;
use serde::{Deserialize, Serialize};
use vellum_idf::{
    BodyBlock, BreakKind, Document, Inline, Paragraph, ParagraphProperties, Run, RunProperties,
    SectionProperties,
};
use vellum_style::{StyleContext, TextAlign};
use vellum_types::{Marker, MarkerKind};

/// Left indentation per poetry level, in twips.
const POETRY_INDENT: u32 = 500;
const NBSP: &str = "\u{a0}";

/// The result of one render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    pub document: Document,
    /// Identifiers of markers that were skipped, in traversal order.
    pub unrenderable: Vec<String>,
}

/// Renders marker trees with a fixed configuration.
///
/// A `Renderer` holds no per-document state; every call to [`render`]
/// starts from scratch, so one renderer can be reused for many documents.
///
/// [`render`]: Renderer::render
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
    front_matter: Option<Marker>,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Self {
            config,
            front_matter: None,
        })
    }

    /// Sets a tree rendered before the main document, with the default
    /// configuration and its own blank-header section.
    pub fn with_front_matter(mut self, front_matter: Marker) -> Self {
        self.front_matter = Some(front_matter);
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render(&self, tree: &Marker) -> Result<RenderOutput, RenderError> {
        let mut ctx = RenderContext::new(self.config.clone());

        if let Some(front_matter) = &self.front_matter {
            ctx.render_front_matter(front_matter)?;
        }
        let toc_slot = self
            .config
            .render_table_of_contents
            .then(|| ctx.reserve_table_of_contents());

        ctx.render_marker(tree, StyleContext::new(self.config.font_size), None)?;
        ctx.finish(toc_slot)
    }
}

/// Everything one render call works on: the active configuration, the
/// session state and the document being built.
pub(crate) struct RenderContext<'a> {
    pub(crate) config: RenderConfig,
    pub(crate) session: RenderSession<'a>,
    pub(crate) document: Document,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(config: RenderConfig) -> Self {
        Self {
            config,
            session: RenderSession::new(),
            document: Document::new(),
        }
    }

    pub(crate) fn render_marker(
        &mut self,
        marker: &'a Marker,
        style: StyleContext,
        paragraph: Option<ParagraphHandle>,
    ) -> Result<(), RenderError> {
        self.session.visit(&marker.kind);

        match &marker.kind {
            MarkerKind::Document
            | MarkerKind::FootnoteText
            | MarkerKind::FootnoteParagraph
            | MarkerKind::CrossRefText => self.render_children(marker, style, paragraph),

            MarkerKind::Encoding { .. }
            | MarkerKind::FootnoteEnd
            | MarkerKind::CrossRefEnd
            | MarkerKind::PublishedVerse
            | MarkerKind::PublishedVerseEnd => Ok(()),

            MarkerKind::BookId { code } => {
                log::debug!("Starting book {}", code);
                self.session.start_book();
                Ok(())
            }
            MarkerKind::Header { title } => self.render_header(title, style),
            MarkerKind::ShortTocTitle { title } => self.render_toc_bookmark(title, paragraph),
            MarkerKind::MajorTitle { title, .. } => {
                let title_style = style
                    .with_bold(true)
                    .with_font_size(self.config.font_size.saturating_mul(2));
                let mut p = Paragraph::new(ParagraphProperties {
                    alignment: TextAlign::Center,
                    style_id: Some("Title".to_string()),
                    ..self.body_paragraph_props()
                });
                p.push_run(self.run(title.clone(), &title_style));
                let handle = self.push_content_paragraph(p);
                self.render_children(marker, title_style, Some(handle))
            }
            MarkerKind::ChapterLabel { label } => {
                if self.session.phase == BookPhase::BeforeFirstChapter {
                    self.session.chapter_label_override = Some(label.clone());
                }
                Ok(())
            }
            MarkerKind::Chapter { number } => self.render_chapter(marker, *number, style),
            MarkerKind::Verse { number } => self.render_verse(marker, number, style, paragraph),

            MarkerKind::Paragraph | MarkerKind::IntroParagraph => {
                let handle = match paragraph {
                    Some(handle) if self.session.previous_was_chapter() => handle,
                    _ => {
                        let props = self.paragraph_props(&style);
                        self.push_body_paragraph(props)
                    }
                };
                self.render_children(marker, style, Some(handle))
            }
            MarkerKind::Poetry { depth } => {
                let style = style.with_font_size(self.config.font_size);
                let props = ParagraphProperties {
                    indent_left: depth.saturating_mul(POETRY_INDENT),
                    ..self.paragraph_props(&style)
                };
                let handle = self.push_body_paragraph(props);
                self.render_children(marker, style, Some(handle))
            }

            MarkerKind::Text { text } => {
                let handle = self.ensure_paragraph(paragraph, marker);
                let run = self.run(text.clone(), &style);
                self.paragraph_mut(handle)?.push_run(run);
                Ok(())
            }
            MarkerKind::Bold => self.render_children(marker, style.with_bold(true), paragraph),
            MarkerKind::Italic
            | MarkerKind::FootnoteQuote
            | MarkerKind::FootnoteAltQuote
            | MarkerKind::CrossRefQuote => {
                self.render_children(marker, style.with_italic(true), paragraph)
            }
            MarkerKind::BoldItalic => self.render_children(
                marker,
                style.with_bold(true).with_italic(true),
                paragraph,
            ),
            MarkerKind::SmallCaps => {
                self.render_children(marker, style.with_small_caps(true), paragraph)
            }
            MarkerKind::LineBreak => {
                let handle = self.ensure_paragraph(paragraph, marker);
                self.paragraph_mut(handle)?
                    .push(Inline::Break(BreakKind::Line));
                Ok(())
            }

            MarkerKind::Footnote { caller } => {
                self.render_footnote(marker, caller, style, paragraph)
            }
            MarkerKind::FootnoteReference { reference } => {
                self.push_text(reference.clone(), &style.with_bold(true), paragraph, marker)
            }
            MarkerKind::FootnoteKeyword { keyword } => {
                let text = format!(" {}: ", keyword.to_uppercase());
                self.push_text(text, &style, paragraph, marker)
            }
            MarkerKind::CrossRef { caller } => {
                self.render_cross_ref_caller(marker, caller, style, paragraph)
            }
            MarkerKind::CrossRefOrigin { reference } => {
                let text = format!(" {reference} ");
                self.push_text(text, &style.with_bold(true), paragraph, marker)
            }

            MarkerKind::Table if matches!(paragraph, Some(ParagraphHandle::Detached(_))) => {
                self.record_unrenderable(marker);
                Ok(())
            }
            MarkerKind::Table => {
                let table = self.render_table(marker, style)?;
                self.document.push_block(BodyBlock::Table(table));
                Ok(())
            }
            MarkerKind::TableRow
            | MarkerKind::TableHeaderCell { .. }
            | MarkerKind::TableHeaderCellRight { .. }
            | MarkerKind::TableCell { .. }
            | MarkerKind::TableCellRight { .. }
            | MarkerKind::Unknown { .. } => {
                self.record_unrenderable(marker);
                Ok(())
            }
        }
    }

    pub(crate) fn render_children(
        &mut self,
        marker: &'a Marker,
        style: StyleContext,
        paragraph: Option<ParagraphHandle>,
    ) -> Result<(), RenderError> {
        for child in &marker.contents {
            self.render_marker(child, style, paragraph)?;
        }
        Ok(())
    }

    fn render_header(&mut self, title: &str, style: StyleContext) -> Result<(), RenderError> {
        if self.session.headers.has_pending() {
            self.session.headers.commit(
                &mut self.document,
                &self.config,
                &self.session.current_chapter_label,
            );
            self.push_page_break();
        }
        self.session.headers.schedule(title);

        let heading_style = style.with_font_size(self.config.font_size);
        let mut heading = Paragraph::new(ParagraphProperties {
            style_id: Some("Heading1".to_string()),
            ..self.paragraph_props(&heading_style)
        });
        heading.push_run(self.run(title, &heading_style));
        self.push_content_paragraph(heading);
        Ok(())
    }

    fn render_chapter(
        &mut self,
        marker: &'a Marker,
        number: i32,
        style: StyleContext,
    ) -> Result<(), RenderError> {
        match self.session.phase {
            BookPhase::BeforeFirstChapter => self.session.phase = BookPhase::InChapter,
            BookPhase::InChapter => {
                if self.config.separate_chapters {
                    self.push_page_break();
                }
            }
        }

        if self.session.headers.is_closed() {
            self.session.headers.commit(
                &mut self.document,
                &self.config,
                &self.session.current_chapter_label,
            );
        }

        let label = self
            .session
            .chapter_label(number, marker.chapter_label_override());
        self.session.current_chapter_label = label.clone();

        let label_props = RunProperties {
            font_size: Some(self.config.font_size.saturating_mul(3)),
            ..Default::default()
        }
        .right_to_left(self.config.right_to_left);
        let mut label_paragraph = Paragraph::new(self.body_paragraph_props());
        label_paragraph.push_run(Run::new(label, label_props));
        self.push_content_paragraph(label_paragraph);

        let verses = self.push_body_paragraph(self.paragraph_props(&style));
        self.render_children(marker, style, Some(verses))?;

        self.flush_cross_refs(style)
    }

    fn render_verse(
        &mut self,
        marker: &'a Marker,
        number: &str,
        style: StyleContext,
        paragraph: Option<ParagraphHandle>,
    ) -> Result<(), RenderError> {
        let handle = self.ensure_paragraph(paragraph, marker);
        let style = style.with_font_size(self.config.font_size);
        let number_run = self.superscript_run(number, &style);
        let space_run = self.run(NBSP, &style);
        let separator_run = self.run(" ", &style);
        let separate_verses = self.config.separate_verses;

        let p = self.paragraph_mut(handle)?;
        if !p.is_empty() {
            if separate_verses {
                p.push(Inline::Break(BreakKind::Line));
            } else if !p.ends_with_whitespace() {
                p.push_run(separator_run);
            }
        }
        p.push_run(number_run);
        p.push_run(space_run);

        self.render_children(marker, style, Some(handle))
    }

    fn render_toc_bookmark(
        &mut self,
        title: &str,
        paragraph: Option<ParagraphHandle>,
    ) -> Result<(), RenderError> {
        if !self.config.render_table_of_contents {
            return Ok(());
        }
        let (id, name) = self.session.toc.add_bookmark(title);
        log::debug!("Placed bookmark {} for '{}'", name, title);

        match paragraph {
            Some(handle) => {
                let p = self.paragraph_mut(handle)?;
                p.push(Inline::BookmarkStart { id, name });
                p.push(Inline::BookmarkEnd { id });
            }
            None => self.session.pending_bookmarks.push((id, name)),
        }
        Ok(())
    }

    fn render_front_matter(&mut self, front_matter: &'a Marker) -> Result<(), RenderError> {
        let user_config = std::mem::take(&mut self.config);
        let style = StyleContext::new(self.config.font_size);
        let rendered = self
            .render_marker(front_matter, style, None)
            .and_then(|()| self.flush_cross_refs(style));
        self.config = user_config;
        rendered?;

        self.session.headers.commit_blank(&mut self.document);
        self.push_page_break();
        Ok(())
    }

    /// Reserves the body slot of the table of contents; it is filled in
    /// [`finish`](Self::finish) once all titles are known.
    fn reserve_table_of_contents(&mut self) -> usize {
        let slot = self
            .document
            .push_block(BodyBlock::TableOfContents(TocBuilder::build(&[])));
        self.session.headers.commit_blank(&mut self.document);
        self.push_page_break();
        self.document.settings.update_fields_on_open = true;
        slot
    }

    fn finish(mut self, toc_slot: Option<usize>) -> Result<RenderOutput, RenderError> {
        self.flush_cross_refs(StyleContext::new(self.config.font_size))?;
        if !self.session.pending_bookmarks.is_empty() {
            self.push_body_paragraph(self.body_paragraph_props());
        }
        self.session.headers.commit(
            &mut self.document,
            &self.config,
            &self.session.current_chapter_label,
        );

        if let Some(slot) = toc_slot {
            let toc = TocBuilder::build(&self.session.toc.entries());
            if let Some(block) = self.document.body.get_mut(slot) {
                *block = BodyBlock::TableOfContents(toc);
            }
        }

        self.document.final_section = SectionProperties {
            column_count: self.config.column_count,
            margins: self.config.page_margins(),
            ..Default::default()
        };
        if self.config.right_to_left {
            self.document.settings.right_to_left_lang = self.config.right_to_left_lang_code.clone();
        }

        log::info!(
            "Rendered {} body blocks, {} footnotes and {} headers ({} unrenderable markers)",
            self.document.body.len(),
            self.document.footnotes.len(),
            self.document.headers.len(),
            self.session.unrenderable.len()
        );

        Ok(RenderOutput {
            document: self.document,
            unrenderable: self.session.unrenderable,
        })
    }

    // --- Paragraph and run helpers ---

    /// Properties of a plain body paragraph under the current configuration.
    pub(crate) fn body_paragraph_props(&self) -> ParagraphProperties {
        ParagraphProperties {
            alignment: self.config.text_align,
            line_spacing: self.config.line_spacing,
            bidi: self.config.right_to_left,
            ..Default::default()
        }
    }

    /// Like [`body_paragraph_props`](Self::body_paragraph_props), honouring
    /// right alignment requested by the style.
    pub(crate) fn paragraph_props(&self, style: &StyleContext) -> ParagraphProperties {
        let mut props = self.body_paragraph_props();
        if style.is_align_right() {
            props.alignment = TextAlign::Right;
        }
        props
    }

    pub(crate) fn run(&self, text: impl Into<String>, style: &StyleContext) -> Run {
        Run::new(
            text,
            RunProperties::from_style(style).right_to_left(self.config.right_to_left),
        )
    }

    pub(crate) fn superscript_run(&self, text: impl Into<String>, style: &StyleContext) -> Run {
        let mut run = self.run(text, style);
        run.props = run.props.superscript();
        run
    }

    fn push_body_paragraph(&mut self, props: ParagraphProperties) -> ParagraphHandle {
        self.push_content_paragraph(Paragraph::new(props))
    }

    /// Appends a paragraph that carries text, opening it with any bookmarks
    /// still waiting for a paragraph.
    fn push_content_paragraph(&mut self, mut paragraph: Paragraph) -> ParagraphHandle {
        if !self.session.pending_bookmarks.is_empty() {
            let mut children: Vec<Inline> = self
                .session
                .pending_bookmarks
                .drain(..)
                .flat_map(|(id, name)| {
                    [Inline::BookmarkStart { id, name }, Inline::BookmarkEnd { id }]
                })
                .collect();
            children.append(&mut paragraph.children);
            paragraph.children = children;
        }
        ParagraphHandle::Body(self.document.push_paragraph(paragraph))
    }

    fn push_page_break(&mut self) {
        let mut p = Paragraph::new(self.body_paragraph_props());
        p.push(Inline::Break(BreakKind::Page));
        self.document.push_paragraph(p);
    }

    fn push_text(
        &mut self,
        text: String,
        style: &StyleContext,
        paragraph: Option<ParagraphHandle>,
        marker: &Marker,
    ) -> Result<(), RenderError> {
        let handle = self.ensure_paragraph(paragraph, marker);
        let run = self.run(text, style);
        self.paragraph_mut(handle)?.push_run(run);
        Ok(())
    }

    /// Returns `paragraph`, or starts a new body paragraph when the marker
    /// has nowhere to write to.
    pub(crate) fn ensure_paragraph(
        &mut self,
        paragraph: Option<ParagraphHandle>,
        marker: &Marker,
    ) -> ParagraphHandle {
        match paragraph {
            Some(handle) => handle,
            None => {
                let identifier = marker.identifier();
                let name: &str = if identifier.is_empty() { "text" } else { &identifier };
                log::warn!("No open paragraph for '{}', starting a new one", name);
                self.push_body_paragraph(self.body_paragraph_props())
            }
        }
    }

    pub(crate) fn paragraph_mut(
        &mut self,
        handle: ParagraphHandle,
    ) -> Result<&mut Paragraph, RenderError> {
        let found = match handle {
            ParagraphHandle::Body(index) => self.document.paragraph_at_mut(index),
            ParagraphHandle::Footnote { note, paragraph } => self
                .document
                .footnotes
                .get_mut(note)
                .and_then(|f| f.paragraphs.get_mut(paragraph)),
            ParagraphHandle::Detached(index) => self.session.detached.get_mut(index),
        };
        found.ok_or_else(|| RenderError::ParagraphMissing(format!("{handle:?}")))
    }

    pub(crate) fn record_unrenderable(&mut self, marker: &Marker) {
        let identifier = marker.identifier();
        log::warn!("Skipping unrenderable marker '{}'", identifier);
        self.session.record_unrenderable(identifier);
    }
}
