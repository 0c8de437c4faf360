use crate::algorithms::pagination::check_child_fit;
use crate::fragment::{Fragment, FragmentRun, MeasuredBlock, MeasuredGroup};
use crate::nodes::table::MeasuredTable;
use crate::output::{LayoutOutput, LayoutWarning, Page, PlacedFragment, PlacedReference, WarningKind};
use crate::util::EPSILON;
use crate::AnchorMap;
use quire_style::PageGeometry;
use quire_types::AnchorId;

/// Places measured blocks onto pages in document order.
///
/// Pages are opened lazily, when the first fragment lands on them, so a
/// break with nothing after it never leaves a blank page behind.
pub(crate) struct PageCursor {
    page_width: f32,
    page_height: f32,
    origin_x: f32,
    origin_y: f32,
    content_width: f32,
    content_height: f32,

    pages: Vec<Page>,
    /// 0-based index of the page being filled; it may not be opened yet.
    page_index: usize,
    y: f32,
    has_content: bool,
    /// `space_after` of the last placed block, collapsed with the next `space_before`.
    pending_space: f32,
    /// Anchors waiting for the next placed fragment.
    pending_anchors: Vec<AnchorId>,

    anchors: AnchorMap,
    references: Vec<PlacedReference>,
    warnings: Vec<LayoutWarning>,
}

impl PageCursor {
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            page_width: geometry.page_width(),
            page_height: geometry.page_height(),
            origin_x: geometry.margins.left,
            origin_y: geometry.margins.top,
            content_width: geometry.content_width(),
            content_height: geometry.content_height(),
            pages: Vec::new(),
            page_index: 0,
            y: 0.0,
            has_content: false,
            pending_space: 0.0,
            pending_anchors: Vec::new(),
            anchors: AnchorMap::new(),
            references: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }

    fn at_top(&self) -> bool {
        !self.has_content
    }

    fn remaining(&self) -> f32 {
        (self.content_height - self.y).max(0.0)
    }

    fn fits(&self, height: f32) -> bool {
        !check_child_fit(self.y, height, self.content_height).should_break
    }

    /// Space to leave before a block: none at the top of a page, otherwise
    /// the larger of the previous block's `space_after` and `space_before`.
    fn gap(&self, space_before: f32) -> f32 {
        if self.at_top() {
            0.0
        } else {
            self.pending_space.max(space_before)
        }
    }

    /// Ends the current page. A no-op on a page with nothing on it yet.
    pub fn break_page(&mut self) {
        if self.has_content {
            log::debug!("Page {} ends at {:.2}pt", self.page_number(), self.y);
            self.page_index += 1;
            self.y = 0.0;
            self.has_content = false;
        }
        self.pending_space = 0.0;
    }

    fn warn(&mut self, kind: WarningKind, block: &str, height: f32, available: f32) {
        let warning = LayoutWarning {
            kind,
            page: self.page_number(),
            block: block.to_string(),
            height,
            available,
        };
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn place(&mut self, fragment: Fragment, gap: f32, block: &str) {
        while self.pages.len() <= self.page_index {
            let number = self.pages.len() + 1;
            self.pages.push(Page::new(number, self.page_width, self.page_height));
        }
        self.y += gap;
        let page = self.page_number();

        let Fragment {
            size,
            mut elements,
            anchors,
            references,
            row,
        } = fragment;

        let pending = std::mem::take(&mut self.pending_anchors);
        for anchor in pending.into_iter().chain(anchors) {
            log::trace!("Anchor '{}' bound to page {}", anchor, page);
            self.anchors.entry(anchor).or_insert(page);
        }
        self.references.extend(references.into_iter().map(|r| PlacedReference {
            target: r.target,
            rendered: r.rendered,
            page,
        }));

        let (dx, dy) = (self.origin_x, self.origin_y + self.y);
        for element in &mut elements {
            element.translate(dx, dy);
        }
        self.pages[self.page_index].fragments.push(PlacedFragment {
            block: block.to_string(),
            y: self.y,
            size,
            elements,
            row,
        });

        self.y += size.height;
        self.has_content = true;
        self.pending_space = 0.0;
    }

    /// Places a fragment that may move to the next page but cannot be split.
    fn place_breakable(&mut self, fragment: Fragment, space_before: f32, block: &str) {
        let height = fragment.height();
        let mut gap = self.gap(space_before);
        if !self.fits(gap + height) && !self.at_top() {
            self.break_page();
            gap = 0.0;
        }
        if !self.fits(gap + height) {
            let available = self.remaining();
            self.warn(WarningKind::Oversize, block, height, available);
        }
        self.place(fragment, gap, block);
    }

    pub fn place_sequence(&mut self, blocks: &[MeasuredBlock]) {
        for (i, block) in blocks.iter().enumerate() {
            // Anchors take no space, so the lookahead reads past them.
            let next = blocks[i + 1..]
                .iter()
                .find(|b| !matches!(b, MeasuredBlock::Anchor(_)));
            self.place_block(block, next);
        }
    }

    fn place_block(&mut self, block: &MeasuredBlock, next: Option<&MeasuredBlock>) {
        match block {
            MeasuredBlock::Flow(run) => self.place_flow(run, next),
            MeasuredBlock::Table(table) => self.place_table(table),
            MeasuredBlock::Group(group) => self.place_group(group),
            MeasuredBlock::Spacer { label, height } => self.place_spacer(*height, label),
            MeasuredBlock::PageBreak => self.break_page(),
            MeasuredBlock::Anchor(id) => self.pending_anchors.push(id.clone()),
        }
    }

    fn place_flow(&mut self, run: &FragmentRun, next: Option<&MeasuredBlock>) {
        if run.fragments.is_empty() {
            return;
        }

        if run.keep_with_next
            && !self.at_top()
            && let Some(next) = next
            && let Some(next_height) = next.first_fragment_height(self.content_height)
        {
            let own: f32 = run.fragments.iter().map(Fragment::height).sum();
            let needed = self.gap(run.space_before)
                + own
                + run.space_after.max(next.space_before())
                + next_height;
            if !self.fits(needed) {
                log::debug!(
                    "'{}' would be stranded at the bottom of page {}; moving it to the next page",
                    run.label,
                    self.page_number()
                );
                self.break_page();
            }
        }

        for (i, fragment) in run.fragments.iter().enumerate() {
            let space_before = if i == 0 { run.space_before } else { 0.0 };
            self.place_breakable(fragment.clone(), space_before, &run.label);
        }
        self.pending_space = run.space_after;
    }

    fn place_table(&mut self, table: &MeasuredTable) {
        if table.rows.is_empty() {
            return;
        }
        let gap = self.gap(table.space_before);
        let first_available = self.remaining() - gap;
        let pagination = table.paginate(first_available, self.content_height, self.at_top());
        if pagination.slices.len() > 1 {
            log::debug!(
                "Table '{}' spans {} page slices",
                table.label,
                pagination.slices.len()
            );
        }

        for (i, slice) in pagination.slices.into_iter().enumerate() {
            if i > 0 {
                self.break_page();
            }
            for (j, fragment) in slice.fragments.into_iter().enumerate() {
                let gap = if i == 0 && j == 0 { gap } else { 0.0 };
                self.place(fragment, gap, &table.label);
            }
            for warning in pagination.warnings.iter().filter(|w| w.slice == i) {
                let block = format!("{} (row {})", table.label, warning.row);
                self.warn(WarningKind::Oversize, &block, warning.height, warning.available);
            }
        }
        self.pending_space = table.space_after;
    }

    fn place_group(&mut self, group: &MeasuredGroup) {
        match &group.stacked {
            Some(stacked) if stacked.height() <= self.content_height + EPSILON => {
                self.place_breakable(stacked.clone(), group.space_before, &group.label);
                self.pending_space = group.space_after;
            }
            Some(stacked) => {
                let (height, available) = (stacked.height(), self.content_height);
                self.warn(WarningKind::ForcedSplit, &group.label, height, available);
                self.place_sequence(&group.children);
            }
            None => self.place_sequence(&group.children),
        }
    }

    /// Spacers that do not fit end the page and are dropped.
    fn place_spacer(&mut self, height: f32, label: &str) {
        let gap = if self.at_top() { 0.0 } else { self.pending_space };
        if self.fits(gap + height) {
            self.place(Fragment::new(self.content_width, height), gap, label);
        } else {
            log::debug!("Spacer of {:.2}pt dropped at the end of page {}", height, self.page_number());
            self.break_page();
        }
    }

    pub fn finish(mut self) -> LayoutOutput {
        if self.pages.is_empty() {
            self.pages.push(Page::new(1, self.page_width, self.page_height));
        }
        let last = self.pages.len();
        for anchor in std::mem::take(&mut self.pending_anchors) {
            self.anchors.entry(anchor).or_insert(last);
        }
        LayoutOutput {
            pages: self.pages,
            anchors: self.anchors,
            references: self.references,
            warnings: self.warnings,
        }
    }
}
