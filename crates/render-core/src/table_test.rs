use crate::test_utils::{block_kinds, render_default};
use vellum_idf::{BodyBlock, BorderStyle, Inline, Table};
use vellum_style::TextAlign;
use vellum_types::{Marker, MarkerKind};

fn cell(kind: MarkerKind, text: &str) -> Marker {
    Marker::new(kind).push(Marker::text(text))
}

fn only_table(blocks: &[BodyBlock]) -> &Table {
    match blocks {
        [BodyBlock::Table(table)] => table,
        other => panic!("expected a single table, got {other:?}"),
    }
}

#[test]
fn test_header_and_body_cells() {
    let output = render_default(vec![Marker::new(MarkerKind::Table).with_contents(vec![
        Marker::new(MarkerKind::TableRow).with_contents(vec![
            cell(MarkerKind::TableHeaderCell { column: 1 }, "Name"),
            cell(MarkerKind::TableHeaderCellRight { column: 2 }, "Count"),
        ]),
        Marker::new(MarkerKind::TableRow).with_contents(vec![
            cell(MarkerKind::TableCell { column: 1 }, "Levi"),
            cell(MarkerKind::TableCellRight { column: 2 }, "22000"),
        ]),
    ])]);
    let table = only_table(&output.document.body);

    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.borders.top, BorderStyle::None);
    assert_eq!(table.borders.inside_horizontal, BorderStyle::None);

    let header = &table.rows[0].cells;
    assert_eq!(header[0].paragraph.text(), "Name");
    assert!(header[0].paragraph.runs().all(|r| r.props.bold));
    assert_eq!(header[0].paragraph.props.alignment, TextAlign::Left);
    assert!(header[1].paragraph.runs().all(|r| r.props.bold));
    assert_eq!(header[1].paragraph.props.alignment, TextAlign::Right);

    let body = &table.rows[1].cells;
    assert_eq!(body[0].paragraph.text(), "Levi");
    assert!(body[0].paragraph.runs().all(|r| !r.props.bold));
    assert_eq!(body[0].paragraph.props.alignment, TextAlign::Left);
    assert_eq!(body[1].paragraph.text(), "22000");
    assert_eq!(body[1].paragraph.props.alignment, TextAlign::Right);
    assert!(output.unrenderable.is_empty());
}

#[test]
fn test_misplaced_children_are_unrenderable() {
    let output = render_default(vec![Marker::new(MarkerKind::Table).with_contents(vec![
        Marker::unknown("zz"),
        Marker::new(MarkerKind::TableRow).with_contents(vec![
            Marker::unknown("yy"),
            cell(MarkerKind::TableCell { column: 1 }, "kept"),
        ]),
    ])]);
    let table = only_table(&output.document.body);

    assert_eq!(output.unrenderable, vec!["zz", "yy"]);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].cells.len(), 1);
    assert_eq!(table.rows[0].cells[0].paragraph.text(), "kept");
}

#[test]
fn test_footnote_inside_cell() {
    let output = render_default(vec![Marker::new(MarkerKind::Table).push(
        Marker::new(MarkerKind::TableRow).push(
            Marker::new(MarkerKind::TableCell { column: 1 }).with_contents(vec![
                Marker::text("total"),
                Marker::footnote("+").push(Marker::text("rounded")),
            ]),
        ),
    )]);
    let table = only_table(&output.document.body);
    let paragraph = &table.rows[0].cells[0].paragraph;

    assert!(matches!(
        paragraph.children.last(),
        Some(Inline::FootnoteReference(_))
    ));
    assert_eq!(output.document.footnotes.len(), 1);
    assert_eq!(output.document.footnotes[0].text(), "F1 rounded");
}

#[test]
fn test_table_keeps_document_order() {
    let output = render_default(vec![
        Marker::chapter(1),
        Marker::new(MarkerKind::Table).push(
            Marker::new(MarkerKind::TableRow)
                .push(cell(MarkerKind::TableCell { column: 1 }, "x")),
        ),
        Marker::chapter(2),
    ]);

    assert_eq!(
        block_kinds(&output.document),
        vec!["paragraph", "paragraph", "table", "paragraph", "paragraph"]
    );
}

#[test]
fn test_table_inside_cell_is_unrenderable() {
    let inner = Marker::new(MarkerKind::Table).push(
        Marker::new(MarkerKind::TableRow).push(cell(MarkerKind::TableCell { column: 1 }, "inner")),
    );
    let output = render_default(vec![Marker::new(MarkerKind::Table).push(
        Marker::new(MarkerKind::TableRow).push(
            Marker::new(MarkerKind::TableCell { column: 1 })
                .with_contents(vec![Marker::text("outer"), inner]),
        ),
    )]);
    let table = only_table(&output.document.body);

    assert_eq!(table.rows[0].cells[0].paragraph.text(), "outer");
    assert_eq!(output.unrenderable, vec!["tb"]);
}
