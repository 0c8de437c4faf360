mod common;

use common::fixtures::{chapter_id, para, toc_document, toc_table};
use common::{TestResult, content_area, init_logger, test_engine, test_registry};
use quire::idf::{ContentBlock, Document, Run, TextBlock};
use quire::layout::AnchorMap;
use quire::types::AnchorId;
use quire::{CompileError, ReferenceResolver, Resolution};

fn resolver<'a>(registry: &'a quire::StyleRegistry) -> ReferenceResolver<'a> {
    ReferenceResolver::new(test_engine(registry), content_area(200.0, 100.0))
}

fn assert_references_match_anchors(resolution: &Resolution) {
    let output = &resolution.output;
    assert!(!output.references.is_empty());
    for reference in &output.references {
        let page = output.anchors[&reference.target];
        assert_eq!(reference.rendered, page.to_string(), "reference to {}", reference.target);
    }
}

#[test]
fn test_forward_references_settle_in_two_passes() -> TestResult {
    init_logger();
    let registry = test_registry();
    let document = toc_document(5, 3);

    let resolution = resolver(&registry).resolve(&document)?;

    assert_eq!(resolution.passes, 2);
    assert_eq!(resolution.output.page_count(), 6);
    for i in 1..=5 {
        assert_eq!(resolution.anchors()[&AnchorId::from(chapter_id(i))], i + 1);
    }
    assert_references_match_anchors(&resolution);
    Ok(())
}

#[test]
fn test_document_without_anchors_takes_one_pass() -> TestResult {
    let registry = test_registry();
    let document = Document::new(vec![para(20)]);
    let resolution = resolver(&registry).resolve(&document)?;
    assert_eq!(resolution.passes, 1);
    assert!(resolution.anchors().is_empty());
    Ok(())
}

#[test]
fn test_backward_references_resolve() -> TestResult {
    let registry = test_registry();
    let document = Document::new(vec![
        ContentBlock::anchor("start"),
        para(3),
        ContentBlock::PageBreak,
        TextBlock::from_runs("Plain", vec![Run::plain("back to page "), Run::page_ref("start")]).into(),
    ]);
    let resolution = resolver(&registry).resolve(&document)?;
    assert_eq!(resolution.output.references[0].rendered, "1");
    assert_eq!(resolution.output.references[0].page, 2);
    assert_references_match_anchors(&resolution);
    Ok(())
}

#[test]
fn test_references_in_table_cells_resolve() -> TestResult {
    let registry = test_registry();
    let mut document = Document::new(vec![toc_table(3).into()]);
    for i in 1..=3 {
        document.push(ContentBlock::PageBreak);
        document.push(ContentBlock::anchor(chapter_id(i)));
        document.push(para(2));
    }
    let resolution = resolver(&registry).resolve(&document)?;
    assert_eq!(resolution.passes, 2);
    let rendered: Vec<&str> = resolution
        .output
        .references
        .iter()
        .map(|r| r.rendered.as_str())
        .collect();
    assert_eq!(rendered, vec!["2", "3", "4"]);
    Ok(())
}

#[test]
fn test_resolving_from_a_settled_map_is_a_fixed_point() -> TestResult {
    let registry = test_registry();
    let document = toc_document(4, 5);
    let resolver = resolver(&registry);

    let first = resolver.resolve(&document)?;
    let second = resolver.resolve_from(&document, first.anchors())?;

    assert_eq!(second.passes, 1);
    assert_eq!(second.anchors(), first.anchors());
    assert_eq!(second.output, first.output);
    Ok(())
}

#[test]
fn test_pass_budget_exhausted_names_moving_anchors() {
    let registry = test_registry();
    let document = toc_document(3, 2);
    let err = resolver(&registry)
        .with_max_passes(1)
        .resolve(&document)
        .unwrap_err();

    match err {
        CompileError::UnresolvedReference { passes, anchors } => {
            assert_eq!(passes, 1);
            let expected: Vec<AnchorId> = (1..=3).map(|i| AnchorId::from(chapter_id(i))).collect();
            assert_eq!(anchors, expected);
        }
        other => panic!("expected UnresolvedReference, got {other:?}"),
    }
}

/// A contents entry that fills its 100pt line exactly while the page number
/// is one character wide, followed by 78 lines of filler. Once the number
/// grows to two digits the entry wraps, and the anchor drops from page 10
/// onto page 11.
fn wrapping_entry_document() -> Document {
    Document::new(vec![
        TextBlock::from_runs(
            "Plain",
            vec![Run::plain("abcdefghijklmnopqr "), Run::page_ref("target")],
        )
        .into(),
        para(78),
        ContentBlock::anchor("target"),
        para(1),
    ])
}

fn narrow_resolver(registry: &quire::StyleRegistry, max_passes: usize) -> ReferenceResolver<'_> {
    ReferenceResolver::new(test_engine(registry), content_area(100.0, 96.0)).with_max_passes(max_passes)
}

#[test]
fn test_wider_page_number_moves_the_anchor_and_needs_a_third_pass() -> TestResult {
    let registry = test_registry();
    let resolution = narrow_resolver(&registry, 3).resolve(&wrapping_entry_document())?;

    assert_eq!(resolution.passes, 3);
    assert_eq!(resolution.anchors()[&AnchorId::from("target")], 11);
    let first_page = resolution.output.pages[0].text();
    assert_eq!(&first_page[..2], ["abcdefghijklmnopqr", "11"]);
    assert_references_match_anchors(&resolution);
    Ok(())
}

#[test]
fn test_wrap_shift_exhausts_a_two_pass_budget() {
    let registry = test_registry();
    let err = narrow_resolver(&registry, 2)
        .resolve(&wrapping_entry_document())
        .unwrap_err();

    match err {
        CompileError::UnresolvedReference { passes, anchors } => {
            assert_eq!(passes, 2);
            assert_eq!(anchors, vec![AnchorId::from("target")]);
        }
        other => panic!("expected UnresolvedReference, got {other:?}"),
    }
}

#[test]
fn test_reference_to_undeclared_anchor_is_dangling() {
    let registry = test_registry();
    let document = Document::new(vec![
        ContentBlock::reference("nowhere", "Plain"),
        ContentBlock::anchor("somewhere"),
        para(1),
    ]);
    let err = resolver(&registry).resolve(&document).unwrap_err();
    match err {
        CompileError::DanglingReference(id) => assert_eq!(id, AnchorId::from("nowhere")),
        other => panic!("expected DanglingReference, got {other:?}"),
    }
}

#[test]
fn test_seeded_map_with_stale_anchor_reconverges() -> TestResult {
    let registry = test_registry();
    let document = toc_document(2, 1);
    let mut seed = AnchorMap::new();
    seed.insert(AnchorId::from("ch-1"), 9);
    seed.insert(AnchorId::from("removed"), 4);

    let resolution = resolver(&registry).resolve_from(&document, &seed)?;
    assert_eq!(resolution.passes, 2);
    assert!(!resolution.anchors().contains_key("removed"));
    assert_references_match_anchors(&resolution);
    Ok(())
}
