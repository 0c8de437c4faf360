use crate::config::LayoutConfig;
use crate::engine::LayoutEngine;
use crate::fonts::{FixedAdvanceMetrics, FontFace};
use crate::output::LayoutOutput;
use crate::text::StyledRun;
use crate::AnchorMap;
use quire_idf::Document;
use quire_style::{ElementStyle, Margins, PageGeometry, PageSize, StyleRegistry};
use quire_types::Color;
use std::sync::Arc;

/// Every glyph advances 5pt at the 10pt `Normal` size, so "word" is 20pt
/// wide and a space 5pt.
pub fn create_test_engine(registry: &StyleRegistry) -> LayoutEngine<'_> {
    LayoutEngine::new(
        registry,
        Arc::new(FixedAdvanceMetrics::default()),
        LayoutConfig::default(),
    )
}

/// Base styles plus `Plain` (10pt on 12pt leading, no spacing) and `Keep`
/// (`Plain` that keeps with the next block).
pub fn test_registry() -> StyleRegistry {
    let mut registry = StyleRegistry::with_base_styles();
    registry
        .define("Plain", ElementStyle::new(), Some("Normal"))
        .unwrap();
    registry
        .define(
            "Keep",
            ElementStyle::new().with_keep_with_next(true),
            Some("Plain"),
        )
        .unwrap();
    registry
}

/// A page whose content area is `width` x `height` points.
pub fn content_area(width: f32, height: f32) -> PageGeometry {
    let margin = 10.0;
    PageGeometry::new(
        PageSize::Custom {
            width: width + 2.0 * margin,
            height: height + 2.0 * margin,
        },
        Margins::all(margin),
    )
}

pub fn layout(registry: &StyleRegistry, document: &Document, geometry: &PageGeometry) -> LayoutOutput {
    create_test_engine(registry)
        .layout(document, geometry, &AnchorMap::new())
        .unwrap()
}

/// `n` copies of "word" separated by single spaces.
pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

pub fn plain_run(text: &str) -> StyledRun {
    StyledRun {
        text: text.to_string(),
        font: FontFace::regular("Helvetica"),
        size: 10.0,
        color: Color::BLACK,
        reference: None,
    }
}

/// Block labels of the fragments on each page.
pub fn blocks_per_page(output: &LayoutOutput) -> Vec<Vec<String>> {
    output
        .pages
        .iter()
        .map(|p| {
            let mut labels: Vec<String> = p.fragments.iter().map(|f| f.block.clone()).collect();
            labels.dedup();
            labels
        })
        .collect()
}
