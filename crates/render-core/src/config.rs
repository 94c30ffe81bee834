use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use vellum_style::{PageMargins, TextAlign};

/// Largest font size, in points, a word processor accepts.
pub const MAX_FONT_SIZE: u32 = 1638;

/// How a footnote's call site and note body are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FootnoteCallerPolicy {
    /// The call site shows a fixed `F` and the note body starts with
    /// `F{number} `.
    #[default]
    NoteMarker,
    /// The call site and the note body show the caller resolved from the
    /// markup (`+` numbers, `-` suppresses, anything else is literal).
    Caller,
}

/// Options for a single render call.
///
/// Every field has a default, so a JSON document only needs to list the
/// options it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Number of text columns per section.
    ///
    /// Defaults to `1`.
    pub column_count: u32,
    /// Alignment of body paragraphs.
    pub text_align: TextAlign,
    /// Line spacing as a multiple of single spacing.
    ///
    /// Defaults to `1.0`.
    pub line_spacing: f32,
    /// Left page margin in centimetres.
    pub margin_left: f32,
    /// Right page margin in centimetres.
    pub margin_right: f32,
    pub right_to_left: bool,
    /// Language tag written to the document settings when `right_to_left`
    /// is set, e.g. `he-IL`.
    pub right_to_left_lang_code: Option<String>,
    /// Body font size in points.
    ///
    /// Defaults to `12`. Chapter labels use three times this size.
    pub font_size: u32,
    /// Font size in points of footnote and cross-reference content.
    ///
    /// Defaults to `12`.
    pub note_font_size: u32,
    /// Start every chapter after the first of a book on a new page.
    pub separate_chapters: bool,
    /// Start every verse on a new line.
    pub separate_verses: bool,
    /// Show the page number in book headers.
    ///
    /// Defaults to `true`.
    pub show_page_numbers: bool,
    /// Reserve a table of contents at the start of the document.
    pub render_table_of_contents: bool,
    pub footnote_callers: FootnoteCallerPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            column_count: 1,
            text_align: TextAlign::Left,
            line_spacing: 1.0,
            margin_left: 0.0,
            margin_right: 0.0,
            right_to_left: false,
            right_to_left_lang_code: None,
            font_size: 12,
            note_font_size: 12,
            separate_chapters: false,
            separate_verses: false,
            show_page_numbers: true,
            render_table_of_contents: false,
            footnote_callers: FootnoteCallerPolicy::NoteMarker,
        }
    }
}

impl RenderConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.column_count == 0 {
            return Err(RenderError::InvalidConfig(
                "columnCount must be at least 1".to_string(),
            ));
        }
        check_font_size("fontSize", self.font_size)?;
        check_font_size("noteFontSize", self.note_font_size)?;
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "lineSpacing must be a positive number, got {}",
                self.line_spacing
            )));
        }
        if !self.margin_left.is_finite() || !self.margin_right.is_finite() {
            return Err(RenderError::InvalidConfig(
                "page margins must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Page margins in twips, or `None` when both margins are zero.
    pub fn page_margins(&self) -> Option<PageMargins> {
        let margins = PageMargins::from_cm(self.margin_left, self.margin_right);
        (!margins.is_zero()).then_some(margins)
    }
}

fn check_font_size(name: &str, size: u32) -> Result<(), RenderError> {
    if size == 0 || size > MAX_FONT_SIZE {
        return Err(RenderError::InvalidConfig(format!(
            "{name} must be between 1 and {MAX_FONT_SIZE}, got {size}"
        )));
    }
    Ok(())
}
