//! Intermediate Document Format (IDF)
//! The immutable block tree handed to the compiler. It is built once by the
//! authoring layer and can be laid out any number of times.

pub mod table;

pub use table::{CellContent, CellRange, CellStyleRule, TableBlock, TableRow};

use quire_types::{AnchorId, StyleName};
use std::collections::BTreeSet;

/// An ordered top-level sequence of blocks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub blocks: Vec<ContentBlock>,
}

impl Document {
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    pub fn push(&mut self, block: impl Into<ContentBlock>) {
        self.blocks.push(block.into());
    }

    pub fn with(mut self, block: impl Into<ContentBlock>) -> Self {
        self.push(block);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Visits every block depth-first, descending into keep-together groups.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a ContentBlock)) {
        for block in &self.blocks {
            block.visit(f);
        }
    }

    /// Anchor ids in document order, duplicates included.
    pub fn anchors(&self) -> Vec<&AnchorId> {
        let mut out = Vec::new();
        self.visit(&mut |block| {
            if let ContentBlock::Anchor(id) = block {
                out.push(id);
            }
        });
        out
    }

    /// Every anchor id a block, run or table cell refers to, in document order.
    pub fn references(&self) -> Vec<&AnchorId> {
        let mut out = Vec::new();
        self.visit(&mut |block| match block {
            ContentBlock::Text(text) => out.extend(text.page_refs()),
            ContentBlock::Reference(r) => out.push(&r.target),
            ContentBlock::Table(table) => {
                for row in &table.rows {
                    for cell in &row.cells {
                        match cell {
                            CellContent::Text(text) => out.extend(text.page_refs()),
                            CellContent::Reference(r) => out.push(&r.target),
                            _ => {}
                        }
                    }
                }
            }
            _ => {}
        });
        out
    }

    /// Every style name the document uses.
    pub fn style_names(&self) -> BTreeSet<&StyleName> {
        let mut out = BTreeSet::new();
        self.visit(&mut |block| match block {
            ContentBlock::Text(text) => {
                out.insert(&text.style);
            }
            ContentBlock::Reference(r) => {
                out.insert(&r.style);
            }
            ContentBlock::Table(table) => out.extend(table.style_names()),
            _ => {}
        });
        out
    }
}

/// A unit of content the layout engine can measure and place.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(TextBlock),
    Table(TableBlock),
    Image(ImageBlock),
    /// Fixed vertical whitespace.
    Spacer { height: f32 },
    PageBreak,
    KeepTogether(KeepTogetherBlock),
    /// Marks a position whose page number becomes known during layout.
    Anchor(AnchorId),
    /// Renders the page number of the anchor it targets.
    Reference(ReferenceBlock),
}

impl ContentBlock {
    pub fn text(style: impl Into<StyleName>, text: impl Into<String>) -> Self {
        ContentBlock::Text(TextBlock::new(style, text))
    }

    pub fn spacer(height: f32) -> Self {
        ContentBlock::Spacer { height }
    }

    pub fn anchor(id: impl Into<AnchorId>) -> Self {
        ContentBlock::Anchor(id.into())
    }

    pub fn reference(target: impl Into<AnchorId>, style: impl Into<StyleName>) -> Self {
        ContentBlock::Reference(ReferenceBlock::new(target, style))
    }

    pub fn keep_together(children: Vec<ContentBlock>) -> Self {
        ContentBlock::KeepTogether(KeepTogetherBlock::new(children))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Text(_) => "text",
            ContentBlock::Table(_) => "table",
            ContentBlock::Image(_) => "image",
            ContentBlock::Spacer { .. } => "spacer",
            ContentBlock::PageBreak => "page-break",
            ContentBlock::KeepTogether(_) => "keep-together",
            ContentBlock::Anchor(_) => "anchor",
            ContentBlock::Reference(_) => "reference",
        }
    }

    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a ContentBlock)) {
        f(self);
        if let ContentBlock::KeepTogether(group) = self {
            for child in &group.children {
                child.visit(f);
            }
        }
    }
}

impl From<TextBlock> for ContentBlock {
    fn from(block: TextBlock) -> Self {
        ContentBlock::Text(block)
    }
}

impl From<TableBlock> for ContentBlock {
    fn from(block: TableBlock) -> Self {
        ContentBlock::Table(block)
    }
}

impl From<ImageBlock> for ContentBlock {
    fn from(block: ImageBlock) -> Self {
        ContentBlock::Image(block)
    }
}

impl From<KeepTogetherBlock> for ContentBlock {
    fn from(block: KeepTogetherBlock) -> Self {
        ContentBlock::KeepTogether(block)
    }
}

impl From<ReferenceBlock> for ContentBlock {
    fn from(block: ReferenceBlock) -> Self {
        ContentBlock::Reference(block)
    }
}

/// A paragraph: a named style and a sequence of inline runs.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub style: StyleName,
    pub runs: Vec<Run>,
    /// Overrides the style's `keep_with_next` when set.
    pub keep_with_next: Option<bool>,
}

impl TextBlock {
    /// A paragraph with a single plain run. `\n` forces a line break.
    pub fn new(style: impl Into<StyleName>, text: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            runs: vec![Run::plain(text)],
            keep_with_next: None,
        }
    }

    pub fn from_runs(style: impl Into<StyleName>, runs: Vec<Run>) -> Self {
        Self {
            style: style.into(),
            runs,
            keep_with_next: None,
        }
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn keep_with_next(mut self, keep: bool) -> Self {
        self.keep_with_next = Some(keep);
        self
    }

    pub fn page_refs(&self) -> impl Iterator<Item = &AnchorId> {
        self.runs.iter().filter_map(|run| match &run.content {
            RunContent::PageRef(id) => Some(id),
            RunContent::Text(_) => None,
        })
    }

    /// The concatenated run text, page references shown as `placeholder`.
    pub fn plain_text(&self, placeholder: &str) -> String {
        self.runs
            .iter()
            .map(|run| match &run.content {
                RunContent::Text(t) => t.as_str(),
                RunContent::PageRef(_) => placeholder,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

impl Emphasis {
    pub fn is_bold(self) -> bool {
        matches!(self, Emphasis::Bold | Emphasis::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Emphasis::Italic | Emphasis::BoldItalic)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunContent {
    Text(String),
    /// Replaced by the target anchor's page number at layout time.
    PageRef(AnchorId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub content: RunContent,
    pub emphasis: Emphasis,
}

impl Run {
    pub fn new(content: RunContent, emphasis: Emphasis) -> Self {
        Self { content, emphasis }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(RunContent::Text(text.into()), Emphasis::Plain)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(RunContent::Text(text.into()), Emphasis::Bold)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(RunContent::Text(text.into()), Emphasis::Italic)
    }

    pub fn bold_italic(text: impl Into<String>) -> Self {
        Self::new(RunContent::Text(text.into()), Emphasis::BoldItalic)
    }

    pub fn page_ref(target: impl Into<AnchorId>) -> Self {
        Self::new(RunContent::PageRef(target.into()), Emphasis::Plain)
    }
}

/// A fixed-size image. Only its box takes part in layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub src: String,
    pub width: f32,
    pub height: f32,
}

impl ImageBlock {
    pub fn new(src: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            src: src.into(),
            width,
            height,
        }
    }
}

/// Children placed on a single page unless they cannot fit on any page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeepTogetherBlock {
    pub name: Option<String>,
    pub children: Vec<ContentBlock>,
}

impl KeepTogetherBlock {
    pub fn new(children: Vec<ContentBlock>) -> Self {
        Self {
            name: None,
            children,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A standalone page number for `target`, set in `style`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceBlock {
    pub target: AnchorId,
    pub style: StyleName,
}

impl ReferenceBlock {
    pub fn new(target: impl Into<AnchorId>, style: impl Into<StyleName>) -> Self {
        Self {
            target: target.into(),
            style: style.into(),
        }
    }
}

/// Display name of a top-level block in warnings and errors.
pub fn block_label(name: Option<&str>, index: usize) -> String {
    match name {
        Some(name) => name.to_string(),
        None => format!("block #{}", index),
    }
}
