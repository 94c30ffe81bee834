//! Foundation types shared by the vellum crates: the marker tree handed over by
//! the markup parser and the semantic ids used in the output document.

pub mod document;
pub mod ids;
pub mod marker;

pub use document::TocEntry;
pub use ids::{BookmarkName, FootnoteId, HeaderId};
pub use marker::{Marker, MarkerKind};
