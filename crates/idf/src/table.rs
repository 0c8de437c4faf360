//! Tables: rows of cells, explicit column widths and ranged style rules.

use crate::{ImageBlock, ReferenceBlock, TextBlock};
use quire_style::ElementStyle;
use quire_types::{Color, StyleName};

/// The content of a single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Empty,
    /// Text set in the table style.
    Plain(String),
    Text(TextBlock),
    Image(ImageBlock),
    Reference(ReferenceBlock),
}

impl CellContent {
    pub fn plain(text: impl Into<String>) -> Self {
        CellContent::Plain(text.into())
    }

    pub fn text(style: impl Into<StyleName>, text: impl Into<String>) -> Self {
        CellContent::Text(TextBlock::new(style, text))
    }

    /// The style the cell names itself, if any.
    pub fn style(&self) -> Option<&StyleName> {
        match self {
            CellContent::Text(t) => Some(&t.style),
            CellContent::Reference(r) => Some(&r.style),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<CellContent>,
    /// Whether the row may be divided across a page boundary.
    pub splittable: bool,
}

impl TableRow {
    pub fn new(cells: Vec<CellContent>) -> Self {
        Self {
            cells,
            splittable: false,
        }
    }

    pub fn splittable(mut self) -> Self {
        self.splittable = true;
        self
    }
}

/// An inclusive index range; negative bounds count from the end (`-1` is the last).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: isize,
    pub end: isize,
}

impl CellRange {
    pub fn new(start: isize, end: isize) -> Self {
        Self { start, end }
    }

    pub fn all() -> Self {
        Self::new(0, -1)
    }

    pub fn single(index: isize) -> Self {
        Self::new(index, index)
    }

    /// Concrete `(first, last)` indexes for a dimension of `len`, or `None`
    /// when the range selects nothing.
    pub fn resolve(&self, len: usize) -> Option<(usize, usize)> {
        let len = len as isize;
        let norm = |i: isize| if i < 0 { len + i } else { i };
        let start = norm(self.start).max(0);
        let end = norm(self.end).min(len - 1);
        if len == 0 || start > end {
            return None;
        }
        Some((start as usize, end as usize))
    }

    pub fn contains(&self, index: usize, len: usize) -> bool {
        self.resolve(len)
            .is_some_and(|(start, end)| (start..=end).contains(&index))
    }
}

/// Attributes applied to every cell in `rows` × `cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyleRule {
    pub rows: CellRange,
    pub cols: CellRange,
    pub style: ElementStyle,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableBlock {
    pub name: Option<String>,
    pub rows: Vec<TableRow>,
    /// Explicit widths in points; `None` columns share the remaining width.
    pub col_widths: Vec<Option<f32>>,
    /// Applied in declaration order, later rules winning per attribute.
    pub rules: Vec<CellStyleRule>,
    pub repeat_header_rows: usize,
    /// Base style for every cell that does not name its own.
    pub style: Option<StyleName>,
}

impl TableBlock {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_col_widths(mut self, widths: Vec<Option<f32>>) -> Self {
        self.col_widths = widths;
        self
    }

    pub fn with_style(mut self, style: impl Into<StyleName>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_rule(mut self, rows: CellRange, cols: CellRange, style: ElementStyle) -> Self {
        self.rules.push(CellStyleRule { rows, cols, style });
        self
    }

    /// Alternating row backgrounds over `rows`, one rule per row.
    pub fn with_row_bands(mut self, rows: CellRange, colors: &[Color]) -> Self {
        if colors.is_empty() {
            return self;
        }
        if let Some((start, end)) = rows.resolve(self.rows.len()) {
            for (offset, row) in (start..=end).enumerate() {
                let color = colors[offset % colors.len()];
                self.rules.push(CellStyleRule {
                    rows: CellRange::single(row as isize),
                    cols: CellRange::all(),
                    style: ElementStyle::new().with_background(color),
                });
            }
        }
        self
    }

    pub fn with_repeat_header_rows(mut self, n: usize) -> Self {
        self.repeat_header_rows = n;
        self
    }

    pub fn column_count(&self) -> usize {
        let widest_row = self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
        widest_row.max(self.col_widths.len())
    }

    pub fn explicit_width_total(&self) -> f32 {
        self.col_widths.iter().flatten().sum()
    }

    /// The rule attributes that apply to one cell, merged in declaration order.
    pub fn cell_overrides(&self, row: usize, col: usize) -> ElementStyle {
        let (rows, cols) = (self.rows.len(), self.column_count());
        let mut merged = ElementStyle::default();
        for rule in &self.rules {
            if rule.rows.contains(row, rows) && rule.cols.contains(col, cols) {
                merged.apply(&rule.style);
            }
        }
        merged
    }

    pub fn style_names(&self) -> impl Iterator<Item = &StyleName> {
        self.style.iter().chain(
            self.rows
                .iter()
                .flat_map(|row| row.cells.iter().filter_map(CellContent::style)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> TableBlock {
        TableBlock::new(
            (0..rows)
                .map(|r| TableRow::new((0..cols).map(|c| CellContent::plain(format!("{r}.{c}"))).collect()))
                .collect(),
        )
    }

    #[test]
    fn test_negative_ranges() {
        assert_eq!(CellRange::all().resolve(4), Some((0, 3)));
        assert_eq!(CellRange::new(1, -1).resolve(4), Some((1, 3)));
        assert_eq!(CellRange::single(-1).resolve(4), Some((3, 3)));
        assert_eq!(CellRange::new(2, 1).resolve(4), None);
        assert_eq!(CellRange::all().resolve(0), None);
    }

    #[test]
    fn test_later_rules_win_per_attribute() {
        let table = grid(3, 2)
            .with_rule(
                CellRange::all(),
                CellRange::all(),
                ElementStyle::new().with_font_size(9.0).with_background(Color::WHITE),
            )
            .with_rule(
                CellRange::single(0),
                CellRange::all(),
                ElementStyle::new().with_background(Color::GRAY),
            );

        let header = table.cell_overrides(0, 1);
        assert_eq!(header.background_color, Some(Color::GRAY));
        assert_eq!(header.font_size, Some(9.0));

        let body = table.cell_overrides(2, 0);
        assert_eq!(body.background_color, Some(Color::WHITE));
    }

    #[test]
    fn test_row_bands_expand_to_one_rule_per_row() {
        let stripe = Color::rgb(0xf1, 0xf5, 0xf9);
        let table = grid(5, 2).with_row_bands(CellRange::new(1, -1), &[Color::WHITE, stripe]);
        assert_eq!(table.rules.len(), 4);
        assert_eq!(table.cell_overrides(0, 0).background_color, None);
        assert_eq!(table.cell_overrides(1, 0).background_color, Some(Color::WHITE));
        assert_eq!(table.cell_overrides(2, 1).background_color, Some(stripe));
        assert_eq!(table.cell_overrides(4, 1).background_color, Some(stripe));
    }

    #[test]
    fn test_column_count_covers_widths_and_cells() {
        let table = grid(2, 2).with_col_widths(vec![Some(10.0), None, None]);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.explicit_width_total(), 10.0);
    }
}
