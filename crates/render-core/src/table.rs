use crate::engine::RenderContext;
use crate::error::RenderError;
use crate::session::ParagraphHandle;
use vellum_idf::{Paragraph, Table, TableCell, TableRow};
use vellum_style::StyleContext;
use vellum_types::{Marker, MarkerKind};

impl<'a> RenderContext<'a> {
    /// Renders a `\tb` block into a borderless table.
    ///
    /// Children that are not rows, and row children that are not cells, are
    /// reported as unrenderable.
    pub(crate) fn render_table(
        &mut self,
        table: &'a Marker,
        style: StyleContext,
    ) -> Result<Table, RenderError> {
        let mut rows = Vec::with_capacity(table.contents.len());
        for child in &table.contents {
            self.session.visit(&child.kind);
            match child.kind {
                MarkerKind::TableRow => rows.push(self.render_row(child, style)?),
                _ => self.record_unrenderable(child),
            }
        }
        Ok(Table::borderless(rows))
    }

    fn render_row(&mut self, row: &'a Marker, style: StyleContext) -> Result<TableRow, RenderError> {
        let mut cells = Vec::with_capacity(row.contents.len());
        for child in &row.contents {
            self.session.visit(&child.kind);
            if child.kind.is_table_cell() {
                cells.push(self.render_cell(child, style)?);
            } else {
                self.record_unrenderable(child);
            }
        }
        Ok(TableRow { cells })
    }

    fn render_cell(&mut self, cell: &'a Marker, style: StyleContext) -> Result<TableCell, RenderError> {
        let style = match cell.kind {
            MarkerKind::TableHeaderCell { .. } => style.with_bold(true),
            MarkerKind::TableHeaderCellRight { .. } => style.with_bold(true).with_align_right(true),
            MarkerKind::TableCellRight { .. } => style.with_align_right(true),
            _ => style,
        };

        let props = self.paragraph_props(&style);
        self.session.detached.push(Paragraph::new(props));
        let handle = ParagraphHandle::Detached(self.session.detached.len() - 1);
        let rendered = self.render_children(cell, style, Some(handle));
        let paragraph = self
            .session
            .detached
            .pop()
            .ok_or_else(|| RenderError::ParagraphMissing(format!("{handle:?}")))?;
        rendered?;

        Ok(TableCell { paragraph })
    }
}
