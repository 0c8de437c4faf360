use crate::engine::MeasureContext;
use crate::fragment::{Fragment, FragmentRun, MeasuredBlock};
use crate::painting::box_painter::paint_box;
use crate::style::ComputedStyle;
use crate::text::{LineWrapper, line_boxes, styled_runs};
use crate::LayoutError;
use quire_idf::{ReferenceBlock, Run, TextBlock};
use quire_types::Rect;

/// Wraps a paragraph into one fragment per line.
pub fn measure_text(
    ctx: &MeasureContext,
    block: &TextBlock,
    label: &str,
    width: f32,
) -> Result<MeasuredBlock, LayoutError> {
    let style = ctx.computed(&block.style)?;
    let keep_with_next = block.keep_with_next.unwrap_or(style.keep_with_next);
    Ok(MeasuredBlock::Flow(lay_out_runs(
        ctx,
        &block.runs,
        &style,
        label,
        width,
        keep_with_next,
    )))
}

/// A standalone page number, set like a one-run paragraph.
pub fn measure_reference(
    ctx: &MeasureContext,
    block: &ReferenceBlock,
    label: &str,
    width: f32,
) -> Result<MeasuredBlock, LayoutError> {
    let style = ctx.computed(&block.style)?;
    let runs = [Run::page_ref(block.target.clone())];
    Ok(MeasuredBlock::Flow(lay_out_runs(
        ctx,
        &runs,
        &style,
        label,
        width,
        style.keep_with_next,
    )))
}

fn lay_out_runs(
    ctx: &MeasureContext,
    runs: &[Run],
    style: &ComputedStyle,
    label: &str,
    width: f32,
    keep_with_next: bool,
) -> FragmentRun {
    let runs = styled_runs(runs, style, ctx.anchors, ctx.placeholder());
    let text_width = (width - style.indent_x()).max(1.0);
    let lines = LineWrapper::new(&runs, ctx.metrics, text_width, style.text_align);

    let mut background = style.clone();
    background.border = None;

    let fragments = line_boxes(lines, &runs, style.leading, style.left_indent)
        .into_iter()
        .map(|line| {
            let mut fragment = Fragment::from_line(line, width);
            if background.background_color.is_some() {
                let bounds = Rect::new(0.0, 0.0, width, fragment.height());
                fragment.elements = paint_box(bounds, &background, std::mem::take(&mut fragment.elements));
            }
            fragment
        })
        .collect();

    FragmentRun {
        label: label.to_string(),
        fragments,
        space_before: style.space_before,
        space_after: style.space_after,
        keep_with_next,
    }
}
