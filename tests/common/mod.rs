pub mod document_assertions;
pub mod fixtures;

use serde_json::Value;
use vellum::{Marker, PipelineError, RenderConfig, RenderOutput};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Render a marker tree given as a JSON value with the given config
pub fn render_tree(tree: &Value, config: RenderConfig) -> Result<RenderOutput, PipelineError> {
    init_logger();
    let tree: Marker = serde_json::from_value(tree.clone())?;
    vellum::render(&tree, config)
}

/// Render a marker tree given as a JSON value with the default config
pub fn render_tree_default(tree: &Value) -> Result<RenderOutput, PipelineError> {
    render_tree(tree, RenderConfig::default())
}
