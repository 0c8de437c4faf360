//! Output types from the layout engine.
//!
//! A pass produces [`LayoutOutput`]: pages of placed fragments with absolute
//! coordinates, the page every anchor landed on, every page reference as
//! rendered, and the non-fatal warnings raised along the way.

use crate::elements::PositionedElement;
use crate::fragment::RowRef;
use crate::AnchorMap;
use quire_types::{AnchorId, Size};
use std::fmt;

/// A fragment as placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedFragment {
    /// Name of the block the fragment came from.
    pub block: String,
    /// Offset from the top of the content area.
    pub y: f32,
    pub size: Size,
    /// Absolute page coordinates.
    pub elements: Vec<PositionedElement>,
    pub row: Option<RowRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub width: f32,
    pub height: f32,
    pub fragments: Vec<PlacedFragment>,
}

impl Page {
    pub fn new(number: usize, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            fragments: Vec::new(),
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = &PositionedElement> {
        self.fragments.iter().flat_map(|f| f.elements.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Bottom edge of the lowest fragment, relative to the content area.
    pub fn used_height(&self) -> f32 {
        self.fragments.iter().map(|f| f.y + f.size.height).fold(0.0, f32::max)
    }

    /// All text on the page, one element per line, in placement order.
    pub fn text(&self) -> Vec<&str> {
        self.elements().filter_map(PositionedElement::text).collect()
    }
}

/// A page reference as rendered in a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedReference {
    pub target: AnchorId,
    pub rendered: String,
    /// Page the reference itself was placed on.
    pub page: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// An atomic fragment taller than the space of a fresh page was placed anyway.
    Oversize,
    /// A keep-together group taller than a page was split.
    ForcedSplit,
}

/// A layout compromise that does not fail the compile.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutWarning {
    pub kind: WarningKind,
    pub page: usize,
    pub block: String,
    pub height: f32,
    pub available: f32,
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::Oversize => write!(
                f,
                "{} on page {} is {:.2}pt tall but only {:.2}pt is available; placed anyway",
                self.block, self.page, self.height, self.available
            ),
            WarningKind::ForcedSplit => write!(
                f,
                "{} starting on page {} is {:.2}pt tall, more than a full page of {:.2}pt; split across pages",
                self.block, self.page, self.height, self.available
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutOutput {
    pub pages: Vec<Page>,
    pub anchors: AnchorMap,
    pub references: Vec<PlacedReference>,
    pub warnings: Vec<LayoutWarning>,
}

impl LayoutOutput {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages on which fragments of `block` were placed, in order.
    pub fn pages_of(&self, block: &str) -> Vec<usize> {
        let mut pages: Vec<usize> = self
            .pages
            .iter()
            .filter(|p| p.fragments.iter().any(|f| f.block == block))
            .map(|p| p.number)
            .collect();
        pages.dedup();
        pages
    }
}
