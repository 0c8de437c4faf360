//! Table measurement and row pagination.

mod node;
mod pagination;
mod solver;

pub use node::TableLayouter;
pub use pagination::{TablePagination, TableSlice, TableWarning};
pub use solver::TableSolver;

use crate::elements::PositionedElement;
use crate::fragment::{Fragment, RowRef};
use crate::painting::box_painter::paint_box;
use crate::style::ComputedStyle;
use crate::text::LineBox;
use crate::util::EPSILON;
use quire_style::VerticalAlign;
use quire_types::Rect;

/// One cell at its resolved column width, content already wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredCell {
    pub x: f32,
    pub width: f32,
    pub style: ComputedStyle,
    /// Lines of text, or a single image box.
    pub items: Vec<LineBox>,
}

impl MeasuredCell {
    fn items_height(&self, from: usize, to: usize) -> f32 {
        self.items[from..to].iter().map(|i| i.height).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredRow {
    pub index: usize,
    pub height: f32,
    pub splittable: bool,
    pub cells: Vec<MeasuredCell>,
}

impl MeasuredRow {
    fn start(&self) -> Vec<usize> {
        vec![0; self.cells.len()]
    }

    fn end(&self) -> Vec<usize> {
        self.cells.iter().map(|c| c.items.len()).collect()
    }

    /// Height of what is left of the row once `from[c]` items of each cell are placed.
    fn remaining_height(&self, from: &[usize]) -> f32 {
        self.cells
            .iter()
            .zip(from)
            .map(|(cell, &start)| cell.items_height(start, cell.items.len()) + cell.style.padding_y())
            .fold(0.0, f32::max)
    }

    /// The largest piece of the row, starting at `from`, that fits in
    /// `available`. `None` if not even one line of any cell fits.
    fn take_piece(&self, from: &[usize], available: f32) -> Option<(Vec<usize>, f32)> {
        let mut to = Vec::with_capacity(self.cells.len());
        let mut height = 0.0f32;
        let mut progressed = false;
        for (cell, &start) in self.cells.iter().zip(from) {
            let cap = available - cell.style.padding_y();
            let mut used = 0.0;
            let mut end = start;
            while end < cell.items.len() && used + cell.items[end].height <= cap + EPSILON {
                used += cell.items[end].height;
                end += 1;
            }
            progressed |= end > start;
            height = height.max(used + cell.style.padding_y());
            to.push(end);
        }
        progressed.then_some((to, height))
    }
}

/// A table laid out at a fixed width: column widths resolved and every row
/// measured, ready to be cut into page-sized slices.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredTable {
    pub label: String,
    pub col_widths: Vec<f32>,
    pub rows: Vec<MeasuredRow>,
    pub header_rows: usize,
    pub space_before: f32,
    pub space_after: f32,
}

impl MeasuredTable {
    pub fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }

    pub fn total_height(&self) -> f32 {
        self.rows.iter().map(|r| r.height).sum()
    }

    pub fn header_height(&self) -> f32 {
        self.rows[..self.header_rows].iter().map(|r| r.height).sum()
    }

    /// Header rows plus the smallest piece of the first body row that can
    /// start a page.
    pub fn first_fragment_height(&self) -> Option<f32> {
        let body = self.rows.get(self.header_rows);
        let first_body = match body {
            Some(row) if row.splittable => row
                .cells
                .iter()
                .map(|c| c.items.first().map_or(0.0, |i| i.height) + c.style.padding_y())
                .fold(0.0, f32::max),
            Some(row) => row.height,
            None => 0.0,
        };
        let height = self.header_height() + first_body;
        (!self.rows.is_empty()).then_some(height)
    }

    /// Every row as a whole fragment, header rows once.
    pub fn full_fragments(&self) -> Vec<Fragment> {
        self.rows
            .iter()
            .map(|row| self.row_fragment(row, &row.start(), &row.end(), row.height, false))
            .collect()
    }

    /// Builds the fragment for items `from..to` of each cell of `row`,
    /// `height` tall.
    fn row_fragment(
        &self,
        row: &MeasuredRow,
        from: &[usize],
        to: &[usize],
        height: f32,
        repeated: bool,
    ) -> Fragment {
        let mut fragment = Fragment::new(self.width(), height);
        fragment.row = Some(RowRef {
            index: row.index,
            repeated,
        });

        for ((cell, &start), &end) in row.cells.iter().zip(from).zip(to) {
            let content_height = cell.items_height(start, end);
            let free = (height - cell.style.padding_y() - content_height).max(0.0);
            let mut y = cell.style.padding.top
                + match cell.style.vertical_align {
                    VerticalAlign::Top => 0.0,
                    VerticalAlign::Middle => free / 2.0,
                    VerticalAlign::Bottom => free,
                };

            let mut content: Vec<PositionedElement> = Vec::new();
            for item in &cell.items[start..end] {
                content.extend(item.elements.iter().cloned().map(|mut el| {
                    el.translate(cell.x + cell.style.padding.left, y);
                    el
                }));
                fragment.references.extend(item.references.iter().cloned());
                y += item.height;
            }

            let bounds = Rect::new(cell.x, 0.0, cell.width, height);
            fragment.elements.extend(paint_box(bounds, &cell.style, content));
        }
        fragment
    }
}
