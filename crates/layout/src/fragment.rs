//! Measured content: sized fragments ready to be placed on pages.

use crate::elements::PositionedElement;
use crate::nodes::table::MeasuredTable;
use crate::text::LineBox;
use quire_types::{AnchorId, Size};

/// A page reference as it was rendered in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    pub target: AnchorId,
    pub rendered: String,
}

/// Identifies the table row a fragment was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef {
    pub index: usize,
    /// Set on header rows repeated at the top of a continuation page.
    pub repeated: bool,
}

/// An indivisible box of placed content. Element coordinates are relative
/// to the fragment's top-left corner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    pub size: Size,
    pub elements: Vec<PositionedElement>,
    /// Anchors inside the fragment; they bind to the page it lands on.
    pub anchors: Vec<AnchorId>,
    pub references: Vec<ResolvedReference>,
    pub row: Option<RowRef>,
}

impl Fragment {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            ..Default::default()
        }
    }

    pub fn from_line(line: LineBox, width: f32) -> Self {
        Self {
            size: Size::new(width, line.height),
            elements: line.elements,
            references: line.references,
            ..Default::default()
        }
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Appends `other` below the current content, `gap` points further down.
    pub fn stack(&mut self, other: Fragment, gap: f32) {
        let dy = self.size.height + gap;
        self.elements.extend(other.elements.into_iter().map(|mut el| {
            el.translate(0.0, dy);
            el
        }));
        self.anchors.extend(other.anchors);
        self.references.extend(other.references);
        self.size.width = self.size.width.max(other.size.width);
        self.size.height = dy + other.size.height;
    }
}

/// The fragments of a flowing block (paragraph, image, reference line),
/// placed top to bottom and breakable between any two fragments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FragmentRun {
    pub label: String,
    pub fragments: Vec<Fragment>,
    pub space_before: f32,
    pub space_after: f32,
    pub keep_with_next: bool,
}

/// A keep-together group, measured both ways: stacked into one atomic
/// fragment and as its individual children. Placement uses `stacked`
/// whenever it fits on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredGroup {
    pub label: String,
    /// `None` when the group cannot be held together at all, e.g. it
    /// contains a hard page break.
    pub stacked: Option<Fragment>,
    pub children: Vec<MeasuredBlock>,
    pub space_before: f32,
    pub space_after: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MeasuredBlock {
    Flow(FragmentRun),
    Table(MeasuredTable),
    Group(MeasuredGroup),
    Spacer { label: String, height: f32 },
    PageBreak,
    Anchor(AnchorId),
}

impl MeasuredBlock {
    /// `(width, height)` of every fragment the block would place, groups
    /// counted as their single stacked fragment.
    pub fn fragment_sizes(&self) -> Vec<Size> {
        match self {
            MeasuredBlock::Flow(run) => run.fragments.iter().map(|f| f.size).collect(),
            MeasuredBlock::Table(table) => table.rows.iter().map(|r| Size::new(table.width(), r.height)).collect(),
            MeasuredBlock::Group(group) => match &group.stacked {
                Some(stacked) => vec![stacked.size],
                None => group.children.iter().flat_map(|c| c.fragment_sizes()).collect(),
            },
            MeasuredBlock::Spacer { height, .. } => vec![Size::new(0.0, *height)],
            MeasuredBlock::PageBreak | MeasuredBlock::Anchor(_) => Vec::new(),
        }
    }

    pub fn space_before(&self) -> f32 {
        match self {
            MeasuredBlock::Flow(run) => run.space_before,
            MeasuredBlock::Table(table) => table.space_before,
            MeasuredBlock::Group(group) => group.space_before,
            _ => 0.0,
        }
    }

    pub fn space_after(&self) -> f32 {
        match self {
            MeasuredBlock::Flow(run) => run.space_after,
            MeasuredBlock::Table(table) => table.space_after,
            MeasuredBlock::Group(group) => group.space_after,
            _ => 0.0,
        }
    }

    /// Height of the first thing this block would place, used as the
    /// one-block lookahead of keep-with-next.
    pub fn first_fragment_height(&self, page_height: f32) -> Option<f32> {
        match self {
            MeasuredBlock::Flow(run) => run.fragments.first().map(Fragment::height),
            MeasuredBlock::Table(table) => table.first_fragment_height(),
            MeasuredBlock::Group(group) => match &group.stacked {
                Some(stacked) if stacked.height() <= page_height => Some(stacked.height()),
                _ => group
                    .children
                    .iter()
                    .find_map(|c| c.first_fragment_height(page_height)),
            },
            MeasuredBlock::Spacer { height, .. } => Some(*height),
            MeasuredBlock::PageBreak | MeasuredBlock::Anchor(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MeasuredBlock::Flow(run) => run.fragments.is_empty(),
            MeasuredBlock::Table(table) => table.rows.is_empty(),
            MeasuredBlock::Group(group) => group.stacked.is_none() && group.children.is_empty(),
            _ => false,
        }
    }
}
