pub mod context;
pub mod dimension;
pub mod text;

pub use context::StyleContext;
pub use dimension::{PageMargins, twips_from_cm};
pub use text::{TextAlign, VerticalAlign};
