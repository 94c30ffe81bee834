//! Render engine for scripture marker trees.
//!
//! This crate walks a parsed marker tree once, depth first, and builds the
//! intermediate document model defined by `vellum-idf`:
//! - `Renderer` and `RenderOutput`, the entry point and its result
//! - `RenderConfig` for page layout and numbering options
//! - book header sections, footnotes, cross references, tables and the
//!   table of contents

mod config;
mod engine;
mod error;
pub mod notes;
pub mod pagination;
mod session;
mod table;
pub mod toc;

pub use config::{FootnoteCallerPolicy, MAX_FONT_SIZE, RenderConfig};
pub use engine::{RenderOutput, Renderer};
pub use error::RenderError;
pub use notes::{NoteCollector, resolve_caller};
pub use pagination::{BookHeaders, BookPhase, create_blank_header, create_book_header};
pub use session::ParagraphHandle;
pub use toc::TocBuilder;

#[cfg(test)]
mod table_test;
#[cfg(test)]
mod test_utils;
