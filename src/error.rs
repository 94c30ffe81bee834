use thiserror::Error;
use vellum_render_core::RenderError;

/// Errors from the JSON-in, document-out entry points.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
