use quire::idf::{CellContent, CellRange, ContentBlock, Document, KeepTogetherBlock, ReferenceBlock, TableBlock, TableRow};
use quire::style::{ElementStyle, FontWeight, Margins, PageSize, StyleRegistry, TextAlign};
use quire::types::{Color, cm};
use quire::{CompileConfig, CompileError, Compiler};
use std::env;

const CHAPTERS: [&str; 4] = ["Introduction", "Background", "Method", "Results"];

const SENTENCE: &str = "Paginated layout places each block in document order, breaking pages \
    where the next fragment no longer fits and keeping headings with the text they introduce.";

fn styles() -> Result<StyleRegistry, CompileError> {
    let mut registry = StyleRegistry::with_base_styles();
    registry.define("TocEntry", ElementStyle::new().with_left_indent(12.0), Some("Normal"))?;
    registry.define(
        "TableHeader",
        ElementStyle::new()
            .with_font_weight(FontWeight::Bold)
            .with_background(Color::rgb(226, 232, 240)),
        Some("Normal"),
    )?;
    Ok(registry)
}

fn contents_table(entries: &[(String, String)]) -> TableBlock {
    let rows = entries
        .iter()
        .map(|(title, anchor)| {
            TableRow::new(vec![
                CellContent::text("TocEntry", title.as_str()),
                CellContent::Reference(ReferenceBlock::new(anchor.as_str(), "Normal")),
            ])
        })
        .collect();
    TableBlock::new(rows)
        .with_col_widths(vec![None, Some(cm(2.0))])
        .with_rule(
            CellRange::all(),
            CellRange::single(-1),
            ElementStyle::new().with_text_align(TextAlign::Right),
        )
}

fn results_table(chapter: usize) -> ContentBlock {
    let header = TableRow::new(vec![
        CellContent::text("TableHeader", "Sample"),
        CellContent::text("TableHeader", "Pages"),
        CellContent::text("TableHeader", "Passes"),
    ]);
    let mut rows = vec![header];
    rows.extend((1..=12).map(|i| {
        TableRow::new(vec![
            CellContent::plain(format!("Run {chapter}.{i}")),
            CellContent::plain((i * 3).to_string()),
            CellContent::plain(if i % 4 == 0 { "3" } else { "2" }),
        ])
    }));

    let table = TableBlock::new(rows)
        .named(format!("table {chapter}"))
        .with_repeat_header_rows(1)
        .with_row_bands(CellRange::new(1, -1), &[Color::WHITE, Color::rgb(248, 250, 252)]);

    KeepTogetherBlock::new(vec![
        ContentBlock::anchor(format!("tbl-{chapter}")),
        ContentBlock::text("Heading3", format!("Table {chapter}: measured runs")),
        table.into(),
    ])
    .named(format!("results {chapter}"))
    .into()
}

fn build_document() -> Document {
    let chapters: Vec<(String, String)> = CHAPTERS
        .iter()
        .enumerate()
        .map(|(i, title)| (format!("{}. {}", i + 1, title), format!("ch-{}", i + 1)))
        .collect();
    let tables: Vec<(String, String)> = (1..=CHAPTERS.len())
        .map(|i| (format!("Table {i}: measured runs"), format!("tbl-{i}")))
        .collect();

    let mut document = Document::default()
        .with(ContentBlock::text("Title", "A Study of Paginated Layout"))
        .with(ContentBlock::text("Heading1", "Contents"))
        .with(contents_table(&chapters))
        .with(ContentBlock::text("Heading1", "List of Tables"))
        .with(contents_table(&tables));

    for (i, (title, anchor)) in chapters.iter().enumerate() {
        document.push(ContentBlock::PageBreak);
        document.push(ContentBlock::anchor(anchor.as_str()));
        document.push(ContentBlock::text("Heading1", title.as_str()));
        for paragraph in 0..6 {
            if paragraph == 3 {
                document.push(ContentBlock::text("Heading2", format!("{}.1 Discussion", i + 1)));
            }
            document.push(ContentBlock::text("BodyText", vec![SENTENCE; 4].join(" ")));
        }
        document.push(results_table(i + 1));
    }
    document
}

/// Builds a sample report with a table of contents and writes its page
/// geometry as JSON.
fn main() -> Result<(), CompileError> {
    env_logger::init();

    let output = env::args().nth(1).unwrap_or_else(|| "quire-demo.json".to_string());
    let registry = styles()?;
    let document = build_document();

    let config = CompileConfig::builder()
        .page_size(PageSize::A4)
        .margins(Margins::all(cm(2.0)))
        .build()?;

    println!("Compiling {} blocks to {}...", document.blocks.len(), output);
    let report = Compiler::new(config).compile(&document, &registry, &output)?;

    println!(
        "Wrote {} pages in {} passes to {}",
        report.pages,
        report.passes,
        report.path.display()
    );
    for (anchor, page) in &report.anchors {
        println!("  {anchor}: page {page}");
    }
    for warning in &report.warnings {
        println!("  warning: {warning}");
    }
    Ok(())
}
