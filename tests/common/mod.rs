pub mod fixtures;

use quire::layout::{FixedAdvanceMetrics, LayoutConfig, LayoutEngine};
use quire::style::{ElementStyle, Margins, PageGeometry, PageSize, StyleRegistry};
use quire::{CompileConfig, Compiler};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A page whose content area is `width` x `height` points, inside 10pt margins.
pub fn content_area(width: f32, height: f32) -> PageGeometry {
    PageGeometry::new(
        PageSize::Custom {
            width: width + 20.0,
            height: height + 20.0,
        },
        Margins::all(10.0),
    )
}

/// A compiler that measures every glyph as half an em, so a 10pt line of
/// `n` characters is `5n` points wide.
pub fn test_compiler(geometry: PageGeometry) -> Compiler {
    let config = CompileConfig::builder()
        .geometry(geometry)
        .build()
        .expect("valid test config");
    Compiler::new(config).with_metrics(Arc::new(FixedAdvanceMetrics::default()))
}

pub fn test_engine(registry: &StyleRegistry) -> LayoutEngine<'_> {
    LayoutEngine::new(
        registry,
        Arc::new(FixedAdvanceMetrics::default()),
        LayoutConfig::default(),
    )
}

/// Base styles plus `Plain` (10pt on 12pt leading, no spacing) and `Keep`.
pub fn test_registry() -> StyleRegistry {
    let mut registry = StyleRegistry::with_base_styles();
    registry
        .define("Plain", ElementStyle::new(), Some("Normal"))
        .expect("Plain");
    registry
        .define(
            "Keep",
            ElementStyle::new().with_keep_with_next(true),
            Some("Plain"),
        )
        .expect("Keep");
    registry
}

pub fn read_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::from_slice(&std::fs::read(path)?)?)
}

/// Names of the entries in `dir`, sorted.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
