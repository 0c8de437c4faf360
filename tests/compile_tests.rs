mod common;

use common::fixtures::{para, plain_rows, toc_document};
use common::{TestResult, content_area, dir_entries, init_logger, read_json, test_compiler, test_registry};
use quire::idf::{ContentBlock, Document, ImageBlock, TableBlock};
use quire::layout::LayoutError;
use quire::style::{ElementStyle, Margins, PageGeometry, PageSize, StyleError, StyleRegistry};
use quire::types::{AnchorId, cm};
use quire::layout::Page;
use quire::render::{DocumentRenderer, RenderError};
use quire::{CompileConfig, CompileError, Compiler, WarningKind};
use std::io::Write;

/// Writes half a document, then fails.
struct BrokenRenderer;

impl DocumentRenderer for BrokenRenderer {
    fn format(&self) -> &'static str {
        "broken"
    }

    fn render(&self, pages: &[Page], writer: &mut dyn Write) -> Result<(), RenderError> {
        writeln!(writer, "{} pages", pages.len())?;
        Err(RenderError::Backend {
            format: self.format().to_string(),
            message: "out of ink".to_string(),
        })
    }
}

#[test]
fn test_compile_writes_rendered_pages() -> TestResult {
    init_logger();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.json");
    let registry = test_registry();

    let report = test_compiler(content_area(200.0, 100.0)).compile(&toc_document(3, 4), &registry, &path)?;

    assert_eq!(report.path, path);
    assert_eq!(report.pages, 4);
    assert_eq!(report.passes, 2);
    assert_eq!(report.anchors[&AnchorId::from("ch-3")], 4);
    assert!(report.warnings.is_empty());

    let json = read_json(&path)?;
    assert_eq!(json["page_count"], 4);
    assert_eq!(json["pages"].as_array().map(Vec::len), Some(4));
    let first_page_text: Vec<&str> = json["pages"][0]["elements"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|el| el["text"].as_str())
        .collect();
    assert!(first_page_text.contains(&"Contents"));
    assert!(first_page_text.contains(&"4"));
    assert_eq!(dir_entries(dir.path()), vec!["report.json"]);
    Ok(())
}

#[test]
fn test_free_compile_with_builtin_fonts() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out.json");
    let registry = StyleRegistry::with_base_styles();
    let document = Document::default()
        .with(ContentBlock::text("Title", "Quire"))
        .with(ContentBlock::text("Heading1", "Introduction"))
        .with(ContentBlock::text("BodyText", "Pages are laid out in document order."));

    let geometry = PageGeometry::new(PageSize::A4, Margins::all(cm(2.0)));
    let report = quire::compile(&document, &registry, geometry, &path)?;

    assert_eq!(report.pages, 1);
    assert_eq!(report.passes, 1);
    assert!(path.exists());
    Ok(())
}

#[test]
fn test_style_error_leaves_no_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.json");
    let registry = test_registry();
    let document = Document::new(vec![para(2), ContentBlock::text("Missing", "x")]);

    let err = test_compiler(content_area(200.0, 100.0))
        .compile(&document, &registry, &path)
        .unwrap_err();

    assert!(matches!(err, CompileError::Style(StyleError::UnknownStyle(ref name)) if name.as_str() == "Missing"));
    assert!(!path.exists());
    assert!(dir_entries(dir.path()).is_empty());
    Ok(())
}

#[test]
fn test_failed_compile_keeps_existing_destination() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.json");
    std::fs::write(&path, "previous")?;

    let registry = test_registry();
    let document = Document::new(vec![ContentBlock::reference("nowhere", "Plain")]);
    let err = test_compiler(content_area(200.0, 100.0))
        .compile(&document, &registry, &path)
        .unwrap_err();

    assert!(matches!(err, CompileError::DanglingReference(_)));
    assert_eq!(std::fs::read_to_string(&path)?, "previous");
    assert_eq!(dir_entries(dir.path()), vec!["report.json"]);
    Ok(())
}

#[test]
fn test_successful_compile_replaces_destination() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.json");
    std::fs::write(&path, "previous")?;

    let registry = test_registry();
    test_compiler(content_area(200.0, 100.0)).compile(&Document::new(vec![para(1)]), &registry, &path)?;

    assert_eq!(read_json(&path)?["page_count"], 1);
    assert_eq!(dir_entries(dir.path()), vec!["report.json"]);
    Ok(())
}

#[test]
fn test_unresolved_references_leave_no_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.json");
    let config = CompileConfig::builder()
        .geometry(content_area(200.0, 100.0))
        .max_passes(1)
        .build()?;
    let compiler = Compiler::new(config)
        .with_metrics(std::sync::Arc::new(quire::layout::FixedAdvanceMetrics::default()));

    let err = compiler
        .compile(&toc_document(2, 1), &test_registry(), &path)
        .unwrap_err();
    assert!(matches!(err, CompileError::UnresolvedReference { passes: 1, .. }));
    assert!(dir_entries(dir.path()).is_empty());
    Ok(())
}

#[test]
fn test_duplicate_anchor_is_rejected() {
    let registry = test_registry();
    let document = Document::new(vec![
        ContentBlock::anchor("x"),
        para(1),
        ContentBlock::keep_together(vec![ContentBlock::anchor("x"), para(1)]),
    ]);
    let err = test_compiler(content_area(200.0, 100.0))
        .resolve(&document, &registry)
        .unwrap_err();
    match err {
        CompileError::DuplicateAnchor(id) => assert_eq!(id.as_str(), "x"),
        other => panic!("expected DuplicateAnchor, got {other:?}"),
    }
}

#[test]
fn test_table_overflow_is_caught_before_layout() {
    let registry = test_registry();
    let table = TableBlock::new(plain_rows(2)).with_col_widths(vec![Some(150.0), Some(100.0)]);
    let document = Document::new(vec![para(1), table.into()]);
    let err = test_compiler(content_area(200.0, 100.0))
        .resolve(&document, &registry)
        .unwrap_err();

    match err {
        CompileError::Layout(LayoutError::TableOverflow {
            table,
            required,
            available,
        }) => {
            assert_eq!(table, "block #1");
            assert_eq!(required, 250.0);
            assert_eq!(available, 200.0);
        }
        other => panic!("expected TableOverflow, got {other:?}"),
    }
}

#[test]
fn test_registry_is_frozen_by_compile() -> TestResult {
    let mut registry = test_registry();
    test_compiler(content_area(200.0, 100.0)).resolve(&Document::new(vec![para(1)]), &registry)?;
    assert!(registry.is_frozen());

    let err = registry
        .define("Late", ElementStyle::new(), Some("Normal"))
        .unwrap_err();
    assert!(matches!(err, StyleError::RegistryFrozen(_)));
    Ok(())
}

#[test]
fn test_warnings_are_reported_with_success() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.json");
    let registry = test_registry();
    let document = Document::new(vec![
        para(2),
        ImageBlock::new("plate.png", 100.0, 250.0).into(),
    ]);

    let report = test_compiler(content_area(200.0, 100.0)).compile(&document, &registry, &path)?;

    assert_eq!(report.pages, 2);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].kind, WarningKind::Oversize);
    assert_eq!(report.warnings[0].page, 2);
    assert_eq!(report.warnings[0].block, "block #1");
    Ok(())
}

#[test]
fn test_zero_pass_budget_is_a_config_error() {
    let err = CompileConfig::builder().max_passes(0).build().unwrap_err();
    assert!(matches!(err, CompileError::Config(_)));
}

#[test]
fn test_render_failure_leaves_no_partial_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.json");
    let registry = test_registry();

    let err = test_compiler(content_area(200.0, 100.0))
        .with_renderer(BrokenRenderer)
        .compile(&Document::new(vec![para(1)]), &registry, &path)
        .unwrap_err();

    assert!(matches!(err, CompileError::Render(RenderError::Backend { .. })));
    assert!(err.to_string().contains("out of ink"));
    assert!(dir_entries(dir.path()).is_empty());
    Ok(())
}
