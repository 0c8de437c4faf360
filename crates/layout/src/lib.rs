use quire_types::AnchorId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error(
        "Table '{table}' needs {required:.2}pt of explicit column widths but only {available:.2}pt is available."
    )]
    TableOverflow {
        table: String,
        required: f32,
        available: f32,
    },
    #[error(transparent)]
    Style(#[from] quire_style::StyleError),
    #[error("Font error: {0}")]
    Font(String),
    #[error("Generic layout error: {0}")]
    Generic(String),
}

pub mod algorithms;
pub mod config;
pub mod elements;
pub mod engine;
pub mod fonts;
pub mod fragment;
pub mod nodes;
pub mod output;
pub mod painting;
pub mod style;
pub mod text;
pub mod util;

pub use self::config::LayoutConfig;
pub use self::elements::{ImageElement, LayoutElement, PositionedElement, RectElement, TextElement};
pub use self::engine::LayoutEngine;
pub use self::fonts::{BuiltinMetrics, FixedAdvanceMetrics, FontFace, FontLibrary, FontMetrics};
pub use self::fragment::{Fragment, FragmentRun, MeasuredBlock, ResolvedReference, RowRef};
pub use self::nodes::table::{MeasuredTable, TableLayouter, TablePagination};
pub use self::output::{LayoutOutput, LayoutWarning, Page, PlacedFragment, PlacedReference, WarningKind};
pub use self::style::ComputedStyle;

pub use quire_types::{Rect, Size};

/// Anchor id → 1-based page number.
pub type AnchorMap = std::collections::BTreeMap<AnchorId, usize>;

#[cfg(test)]
mod style_test;
#[cfg(test)]
mod test_utils;
