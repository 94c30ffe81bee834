use crate::{RenderConfig, RenderOutput, Renderer};
use vellum_idf::{BodyBlock, Document, Paragraph};
use vellum_types::Marker;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Renders `contents` wrapped in a document marker with the given config.
pub fn render_with(config: RenderConfig, contents: Vec<Marker>) -> RenderOutput {
    init_logger();
    Renderer::new(config)
        .expect("test config should be valid")
        .render(&Marker::document(contents))
        .expect("rendering should succeed")
}

pub fn render_default(contents: Vec<Marker>) -> RenderOutput {
    render_with(RenderConfig::default(), contents)
}

pub fn paragraph_texts(document: &Document) -> Vec<String> {
    document.paragraphs().map(Paragraph::text).collect()
}

/// One short tag per body block, for asserting on document shape.
pub fn block_kinds(document: &Document) -> Vec<&'static str> {
    document.body.iter().map(BodyBlock::kind).collect()
}
