use vellum::Document;
use vellum_idf::{BodyBlock, Inline, Paragraph};

/// Text of every body paragraph, in order
pub fn paragraph_texts(document: &Document) -> Vec<String> {
    document.paragraphs().map(Paragraph::text).collect()
}

/// Text of every header part, in order
pub fn header_texts(document: &Document) -> Vec<String> {
    document.headers.iter().map(|h| h.text()).collect()
}

pub fn block_kinds(document: &Document) -> Vec<&'static str> {
    document.body.iter().map(BodyBlock::kind).collect()
}

/// Index of every section break in the body
pub fn section_break_positions(document: &Document) -> Vec<usize> {
    document
        .body
        .iter()
        .enumerate()
        .filter(|(_, block)| matches!(block, BodyBlock::SectionBreak(_)))
        .map(|(i, _)| i)
        .collect()
}

/// Footnote reference texts found at call sites in body paragraphs
pub fn footnote_reference_texts(document: &Document) -> Vec<String> {
    document
        .paragraphs()
        .flat_map(|p| p.children.iter())
        .filter_map(|inline| match inline {
            Inline::FootnoteReference(r) => Some(r.text.clone()),
            _ => None,
        })
        .collect()
}

pub fn is_page_break(paragraph: &Paragraph) -> bool {
    matches!(paragraph.children.as_slice(), [Inline::Break(vellum_idf::BreakKind::Page)])
}
