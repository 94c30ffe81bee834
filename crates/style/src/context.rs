//! The inherited formatting state of the render traversal.

use serde::{Deserialize, Serialize};

/// Formatting active at one point of the marker tree.
///
/// `StyleContext` is a small `Copy` value. A wrapper marker derives the style
/// for its subtree with one of the `with_*` methods, so a change made inside a
/// subtree can never leak into siblings or ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleContext {
    font_size: u32,
    bold: bool,
    italic: bool,
    small_caps: bool,
    align_right: bool,
}

impl StyleContext {
    pub const DEFAULT_FONT_SIZE: u32 = 14;

    /// A plain style with the given font size in points.
    pub fn new(font_size: u32) -> Self {
        Self {
            font_size,
            bold: false,
            italic: false,
            small_caps: false,
            align_right: false,
        }
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub fn is_small_caps(&self) -> bool {
        self.small_caps
    }

    pub fn is_align_right(&self) -> bool {
        self.align_right
    }

    pub fn with_font_size(self, font_size: u32) -> Self {
        Self { font_size, ..self }
    }

    pub fn with_bold(self, bold: bool) -> Self {
        Self { bold, ..self }
    }

    pub fn with_italic(self, italic: bool) -> Self {
        Self { italic, ..self }
    }

    pub fn with_small_caps(self, small_caps: bool) -> Self {
        Self { small_caps, ..self }
    }

    pub fn with_align_right(self, align_right: bool) -> Self {
        Self {
            align_right,
            ..self
        }
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FONT_SIZE)
    }
}
