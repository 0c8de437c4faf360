use super::{MeasuredRow, MeasuredTable};
use crate::algorithms::pagination::check_child_fit;
use crate::fragment::Fragment;

/// The rows placed on one page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSlice {
    pub fragments: Vec<Fragment>,
    pub height: f32,
}

impl TableSlice {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn push(&mut self, fragment: Fragment) {
        self.height += fragment.height();
        self.fragments.push(fragment);
    }
}

/// A row forced onto a page too short for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableWarning {
    pub slice: usize,
    pub row: usize,
    pub height: f32,
    pub available: f32,
}

/// A table cut into page-sized slices. Slice 0 goes in the space left on the
/// current page and may be empty; every later slice starts a new page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TablePagination {
    pub slices: Vec<TableSlice>,
    pub warnings: Vec<TableWarning>,
}

struct SliceState {
    slice: TableSlice,
    available: f32,
    at_page_top: bool,
    body_rows: usize,
}

impl SliceState {
    fn new(available: f32, at_page_top: bool) -> Self {
        Self {
            slice: TableSlice::default(),
            available,
            at_page_top,
            body_rows: 0,
        }
    }

    fn fits(&self, height: f32) -> bool {
        !check_child_fit(0.0, height, self.available).should_break
    }

    /// Nothing but (repeated) header rows at the top of a page: deferring
    /// the next row cannot help it.
    fn is_fresh(&self) -> bool {
        self.at_page_top && self.body_rows == 0
    }

    fn place(&mut self, fragment: Fragment, is_body: bool) {
        self.available -= fragment.height();
        self.slice.push(fragment);
        if is_body {
            self.body_rows += 1;
        }
    }
}

impl MeasuredTable {
    /// Cuts the rows into slices: the first gets `first_available` points,
    /// the rest a full page of `full_height`.
    ///
    /// Rows move whole to the next page unless they are splittable, in which
    /// case they are divided between lines. Header rows are repeated at the
    /// top of every continuation page, unless they alone would fill it. A
    /// row taller than a page is forced onto a fresh page and reported.
    pub fn paginate(&self, first_available: f32, full_height: f32, at_page_top: bool) -> TablePagination {
        let mut out = TablePagination::default();
        let header_height = self.header_height();
        let repeat_headers = self.header_rows > 0 && header_height < full_height;
        if self.header_rows > 0 && !repeat_headers {
            log::warn!(
                "Header rows of table '{}' ({:.2}pt) fill a whole page and are not repeated",
                self.label,
                header_height
            );
        }

        let mut state = SliceState::new(first_available, at_page_top);
        let mut index = 0;
        let mut progress: Option<Vec<usize>> = None;

        while index < self.rows.len() {
            let row = &self.rows[index];
            let is_body = index >= self.header_rows;
            let from = progress.take().unwrap_or_else(|| row.start());
            let needed = row.remaining_height(&from);

            if state.fits(needed) {
                state.place(self.row_fragment(row, &from, &row.end(), needed, false), is_body);
                index += 1;
                continue;
            }

            if row.splittable {
                if let Some((to, height)) = row.take_piece(&from, state.available) {
                    log::debug!("Splitting row {} of table '{}' at {:.2}pt", row.index, self.label, height);
                    state.place(self.row_fragment(row, &from, &to, height, false), is_body);
                    progress = Some(to);
                } else if state.is_fresh() {
                    self.force_row(&mut out, &mut state, row, &from, needed, is_body);
                    index += 1;
                    continue;
                } else {
                    progress = Some(from);
                }
            } else if state.is_fresh() {
                self.force_row(&mut out, &mut state, row, &from, needed, is_body);
                index += 1;
                continue;
            }

            // Header rows never end the first slice on their own.
            if out.slices.is_empty() && state.body_rows == 0 && !state.slice.is_empty() {
                log::debug!("Moving header rows of table '{}' to the next page", self.label);
                state.slice = TableSlice::default();
                index = 0;
                progress = None;
            }

            out.slices.push(std::mem::take(&mut state.slice));
            state = SliceState::new(full_height, true);
            if repeat_headers && index >= self.header_rows {
                for header in &self.rows[..self.header_rows] {
                    state.place(
                        self.row_fragment(header, &header.start(), &header.end(), header.height, true),
                        false,
                    );
                }
            }
        }

        out.slices.push(state.slice);
        out
    }

    fn force_row(
        &self,
        out: &mut TablePagination,
        state: &mut SliceState,
        row: &MeasuredRow,
        from: &[usize],
        needed: f32,
        is_body: bool,
    ) {
        log::debug!(
            "Forcing row {} of table '{}' ({:.2}pt) into {:.2}pt",
            row.index,
            self.label,
            needed,
            state.available
        );
        out.warnings.push(TableWarning {
            slice: out.slices.len(),
            row: row.index,
            height: needed,
            available: state.available.max(0.0),
        });
        state.place(self.row_fragment(row, from, &row.end(), needed, false), is_body);
    }
}
