//! Inline text: styled runs, greedy line breaking and line boxes.

pub mod builder;
pub mod wrapper;

pub use builder::{LineBox, line_boxes};
pub use wrapper::{Line, LineSegment, LineWrapper, natural_width};

use crate::AnchorMap;
use crate::fonts::FontFace;
use crate::style::ComputedStyle;
use quire_idf::{Run, RunContent};
use quire_types::{AnchorId, Color};

/// A run of text with its face resolved. Page references are already
/// substituted with their page number (or the placeholder).
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub font: FontFace,
    pub size: f32,
    pub color: Color,
    pub reference: Option<AnchorId>,
}

/// Resolves the inline runs of a paragraph against its style and the
/// current anchor map.
pub fn styled_runs(
    runs: &[Run],
    style: &ComputedStyle,
    anchors: &AnchorMap,
    placeholder: &str,
) -> Vec<StyledRun> {
    runs.iter()
        .map(|run| {
            let (text, reference) = match &run.content {
                RunContent::Text(text) => (text.clone(), None),
                RunContent::PageRef(target) => (
                    anchors
                        .get(target)
                        .map(|page| page.to_string())
                        .unwrap_or_else(|| placeholder.to_string()),
                    Some(target.clone()),
                ),
            };
            StyledRun {
                text,
                font: style.font.with_emphasis(run.emphasis),
                size: style.font_size,
                color: style.color,
                reference,
            }
        })
        .collect()
}
