use super::{MeasuredCell, MeasuredRow, MeasuredTable, TableSolver};
use crate::elements::{ImageElement, LayoutElement, PositionedElement};
use crate::engine::MeasureContext;
use crate::style::ComputedStyle;
use crate::text::{LineBox, LineWrapper, StyledRun, line_boxes, natural_width, styled_runs};
use crate::LayoutError;
use quire_idf::{CellContent, ImageBlock, Run, TableBlock};
use quire_style::{ElementStyle, TextAlign};
use quire_types::Rect;

/// A cell before its column width is known.
enum CellSource<'t> {
    Runs(Vec<StyledRun>),
    Image(&'t ImageBlock),
    Empty,
}

struct PreparedCell<'t> {
    style: ComputedStyle,
    source: CellSource<'t>,
}

impl PreparedCell<'_> {
    /// Natural width of the cell's content. Padding is taken out of the
    /// column it ends up in.
    fn content_width(&self, ctx: &MeasureContext) -> f32 {
        match &self.source {
            CellSource::Runs(runs) => natural_width(runs, ctx.metrics),
            CellSource::Image(image) => image.width,
            CellSource::Empty => 0.0,
        }
    }
}

/// Lays a [`TableBlock`] out at a given width.
pub struct TableLayouter<'a> {
    ctx: MeasureContext<'a>,
    label: Option<String>,
}

impl<'a> TableLayouter<'a> {
    pub fn new(ctx: MeasureContext<'a>) -> Self {
        Self { ctx, label: None }
    }

    /// Name used in errors and warnings; defaults to the table's own name.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Resolves column widths and measures every row at `available_width`.
    pub fn layout(&self, table: &TableBlock, available_width: f32) -> Result<MeasuredTable, LayoutError> {
        let label = self
            .label
            .clone()
            .or_else(|| table.name.clone())
            .unwrap_or_else(|| "table".to_string());
        let columns = table.column_count();

        let table_style = match &table.style {
            Some(name) => Some(self.ctx.element_style(name)?),
            None => None,
        };

        let mut prepared: Vec<Vec<PreparedCell>> = Vec::with_capacity(table.rows.len());
        for (r, row) in table.rows.iter().enumerate() {
            let mut cells = Vec::with_capacity(columns);
            for c in 0..columns {
                let content = row.cells.get(c).unwrap_or(&CellContent::Empty);
                cells.push(self.prepare_cell(table, table_style.as_deref(), content, r, c)?);
            }
            prepared.push(cells);
        }

        let mut preferred = vec![0.0f32; columns];
        for row in &prepared {
            for (c, cell) in row.iter().enumerate() {
                preferred[c] = preferred[c].max(cell.content_width(&self.ctx));
            }
        }

        let col_widths =
            TableSolver::new(&table.col_widths, columns).resolve_widths(available_width, &preferred, &label)?;
        let col_x: Vec<f32> = col_widths
            .iter()
            .scan(0.0, |x, w| {
                let start = *x;
                *x += w;
                Some(start)
            })
            .collect();

        let rows: Vec<MeasuredRow> = prepared
            .into_iter()
            .enumerate()
            .map(|(index, cells)| {
                let cells: Vec<MeasuredCell> = cells
                    .into_iter()
                    .enumerate()
                    .map(|(c, cell)| self.measure_cell(cell, col_x[c], col_widths[c]))
                    .collect();
                let height = cells
                    .iter()
                    .map(|cell| cell.items.iter().map(|i| i.height).sum::<f32>() + cell.style.padding_y())
                    .fold(0.0, f32::max);
                MeasuredRow {
                    index,
                    height,
                    splittable: table.rows[index].splittable,
                    cells,
                }
            })
            .collect();

        let (space_before, space_after) = table_style
            .as_deref()
            .map_or((0.0, 0.0), |s| (s.space_before.unwrap_or(0.0), s.space_after.unwrap_or(0.0)));

        log::debug!(
            "Measured table '{}': {} rows, {} columns, {:.2}pt tall",
            label,
            rows.len(),
            columns,
            rows.iter().map(|r| r.height).sum::<f32>()
        );

        Ok(MeasuredTable {
            label,
            col_widths,
            header_rows: table.repeat_header_rows.min(rows.len()),
            rows,
            space_before,
            space_after,
        })
    }

    /// Resolves a cell's style (its own style or the table style, then the
    /// matching rules in order) and its runs.
    fn prepare_cell<'t>(
        &self,
        table: &TableBlock,
        table_style: Option<&ElementStyle>,
        content: &'t CellContent,
        row: usize,
        col: usize,
    ) -> Result<PreparedCell<'t>, LayoutError> {
        let mut element = match content.style() {
            Some(name) => (*self.ctx.element_style(name)?).clone(),
            None => table_style.cloned().unwrap_or_default(),
        };
        element.apply(&table.cell_overrides(row, col));
        let style = ComputedStyle::for_cell(&element, self.ctx.config.cell_padding);

        let resolve = |runs: &[Run]| styled_runs(runs, &style, self.ctx.anchors, self.ctx.placeholder());
        let source = match content {
            CellContent::Empty => CellSource::Empty,
            CellContent::Plain(text) => CellSource::Runs(resolve(&[Run::plain(text.as_str())])),
            CellContent::Text(text) => CellSource::Runs(resolve(&text.runs)),
            CellContent::Reference(r) => CellSource::Runs(resolve(&[Run::page_ref(r.target.clone())])),
            CellContent::Image(image) => CellSource::Image(image),
        };
        Ok(PreparedCell { style, source })
    }

    fn measure_cell(&self, cell: PreparedCell, x: f32, width: f32) -> MeasuredCell {
        let inner = (width - cell.style.padding_x()).max(1.0);
        let items = match &cell.source {
            CellSource::Runs(runs) => {
                let lines = LineWrapper::new(runs, self.ctx.metrics, inner, cell.style.text_align);
                line_boxes(lines, runs, cell.style.leading, 0.0)
            }
            CellSource::Image(image) => {
                let dx = match cell.style.text_align {
                    TextAlign::Right => inner - image.width,
                    TextAlign::Center => (inner - image.width) / 2.0,
                    TextAlign::Left | TextAlign::Justify => 0.0,
                };
                vec![LineBox {
                    height: image.height,
                    elements: vec![PositionedElement::new(
                        Rect::new(dx.max(0.0), 0.0, image.width, image.height),
                        LayoutElement::Image(ImageElement {
                            src: image.src.clone(),
                        }),
                    )],
                    references: Vec::new(),
                }]
            }
            CellSource::Empty => Vec::new(),
        };
        MeasuredCell {
            x,
            width,
            style: cell.style,
            items,
        }
    }
}
