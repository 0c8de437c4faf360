//! Measurement of each kind of content block.

pub mod group;
pub mod image;
pub mod paragraph;
pub mod table;

use crate::engine::MeasureContext;
use crate::fragment::MeasuredBlock;
use crate::LayoutError;
use quire_idf::ContentBlock;
use table::TableLayouter;

/// Measures `block` at `width`. `label` names the block in warnings unless
/// the block carries a name of its own.
pub fn measure_block(
    ctx: &MeasureContext,
    block: &ContentBlock,
    label: &str,
    width: f32,
) -> Result<MeasuredBlock, LayoutError> {
    match block {
        ContentBlock::Text(text) => paragraph::measure_text(ctx, text, label, width),
        ContentBlock::Reference(reference) => {
            paragraph::measure_reference(ctx, reference, label, width)
        }
        ContentBlock::Image(image) => Ok(image::measure_image(image, label, width)),
        ContentBlock::Spacer { height } => Ok(MeasuredBlock::Spacer {
            label: label.to_string(),
            height: height.max(0.0),
        }),
        ContentBlock::PageBreak => Ok(MeasuredBlock::PageBreak),
        ContentBlock::Anchor(id) => Ok(MeasuredBlock::Anchor(id.clone())),
        ContentBlock::Table(table) => {
            let label = table.name.as_deref().unwrap_or(label);
            TableLayouter::new(*ctx)
                .with_label(label)
                .layout(table, width)
                .map(MeasuredBlock::Table)
        }
        ContentBlock::KeepTogether(group) => group::measure_group(ctx, group, label, width),
    }
}
