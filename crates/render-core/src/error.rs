use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
    /// A paragraph handle no longer resolved to a paragraph. This is an
    /// internal invariant violation, not a problem with the input tree.
    #[error("Paragraph not found: {0}")]
    ParagraphMissing(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
