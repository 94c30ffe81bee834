//! vellum renders parsed scripture markup (books, chapters, verses, notes and
//! tables) into an in-memory word-processing document.
//!
//! The marker tree comes from an external markup parser and the resulting
//! [`Document`] is handed to an external serializer; this crate wires the
//! two ends to the render engine.
//!
//! ```no_run
//! use vellum::{Marker, RenderConfig};
//!
//! let tree = Marker::document(vec![
//!     Marker::chapter(1).push(Marker::verse("1").push(Marker::text("In the beginning"))),
//! ]);
//! let output = vellum::render(&tree, RenderConfig::default())?;
//! assert_eq!(output.document.paragraphs().count(), 2);
//! # Ok::<(), vellum::PipelineError>(())
//! ```

pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::PipelineBuilder;

pub use vellum_idf::Document;
pub use vellum_render_core::{FootnoteCallerPolicy, RenderConfig, RenderError, RenderOutput, Renderer};
pub use vellum_style::TextAlign;
pub use vellum_types::{Marker, MarkerKind};

/// Renders a marker tree with the given configuration.
pub fn render(tree: &Marker, config: RenderConfig) -> Result<RenderOutput, PipelineError> {
    let renderer = PipelineBuilder::new().with_config(config).build()?;
    Ok(renderer.render(tree)?)
}

/// Renders a marker tree given as JSON. `config_json` may list only the
/// options that differ from the defaults; `"{}"` renders with defaults.
pub fn render_json(tree_json: &str, config_json: &str) -> Result<RenderOutput, PipelineError> {
    let tree: Marker = serde_json::from_str(tree_json)?;
    let renderer = PipelineBuilder::new().with_config_json(config_json)?.build()?;
    let output = renderer.render(&tree)?;
    log::debug!(
        "Rendered JSON tree into {} body blocks",
        output.document.body.len()
    );
    Ok(output)
}
