use quire::idf::{
    CellContent, ContentBlock, Document, ReferenceBlock, Run, TableBlock, TableRow, TextBlock,
};

/// A paragraph of `lines` hard-broken lines in `Plain`.
pub fn para(lines: usize) -> ContentBlock {
    let text = (1..=lines)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    ContentBlock::text("Plain", text)
}

pub fn chapter_id(i: usize) -> String {
    format!("ch-{i}")
}

/// One TOC line per chapter, then each chapter on its own page, its anchor
/// first.
pub fn toc_document(chapters: usize, lines_per_chapter: usize) -> Document {
    let mut document = Document::default().with(ContentBlock::text("Keep", "Contents"));
    for i in 1..=chapters {
        document.push(TextBlock::from_runs(
            "Plain",
            vec![Run::plain(format!("Chapter {i} ")), Run::page_ref(chapter_id(i))],
        ));
    }
    for i in 1..=chapters {
        document.push(ContentBlock::PageBreak);
        document.push(ContentBlock::anchor(chapter_id(i)));
        document.push(ContentBlock::text("Keep", format!("Chapter {i}")));
        document.push(para(lines_per_chapter));
    }
    document
}

/// The same contents as a two-column table whose right cells are references.
pub fn toc_table(chapters: usize) -> TableBlock {
    let rows = (1..=chapters)
        .map(|i| {
            TableRow::new(vec![
                CellContent::plain(format!("Chapter {i}")),
                CellContent::Reference(ReferenceBlock::new(chapter_id(i), "Plain")),
            ])
        })
        .collect();
    TableBlock::new(rows).named("contents")
}

/// `n` rows of one plain cell each, every row 18pt tall.
pub fn plain_rows(n: usize) -> Vec<TableRow> {
    (0..n)
        .map(|i| TableRow::new(vec![CellContent::plain(format!("row {i}"))]))
        .collect()
}
