use super::measure_block;
use crate::engine::MeasureContext;
use crate::fragment::{Fragment, MeasuredBlock, MeasuredGroup};
use crate::LayoutError;
use quire_idf::KeepTogetherBlock;

/// Measures a keep-together group's children and stacks them into one
/// fragment with the same spacing rules the page cursor applies.
pub fn measure_group(
    ctx: &MeasureContext,
    group: &KeepTogetherBlock,
    label: &str,
    width: f32,
) -> Result<MeasuredBlock, LayoutError> {
    let label = group.name.as_deref().unwrap_or(label);
    let children = group
        .children
        .iter()
        .map(|child| measure_block(ctx, child, label, width))
        .collect::<Result<Vec<_>, _>>()?;

    let placed: Vec<&MeasuredBlock> = children
        .iter()
        .filter(|c| !matches!(c, MeasuredBlock::Anchor(_)) && !c.is_empty())
        .collect();
    let space_before = placed.first().map_or(0.0, |c| c.space_before());
    let space_after = placed.last().map_or(0.0, |c| c.space_after());

    let stacked = stack_children(&children, width);
    if stacked.is_none() {
        log::debug!("Group '{}' contains a page break and is placed child by child", label);
    }

    Ok(MeasuredBlock::Group(MeasuredGroup {
        label: label.to_string(),
        stacked,
        children,
        space_before,
        space_after,
    }))
}

/// Stacks measured blocks into a single fragment, or `None` if one of them
/// forces a page break.
pub fn stack_children(children: &[MeasuredBlock], width: f32) -> Option<Fragment> {
    let mut stacked: Option<Fragment> = None;
    let mut pending_after = 0.0f32;
    let mut anchors = Vec::new();

    for child in children {
        match child {
            MeasuredBlock::PageBreak => return None,
            MeasuredBlock::Anchor(id) => anchors.push(id.clone()),
            MeasuredBlock::Spacer { height, .. } => {
                push(Fragment::new(width, *height), pending_after, &mut stacked);
                pending_after = 0.0;
            }
            MeasuredBlock::Flow(run) => {
                if run.fragments.is_empty() {
                    continue;
                }
                let gap = pending_after.max(run.space_before);
                for (i, fragment) in run.fragments.iter().enumerate() {
                    push(fragment.clone(), if i == 0 { gap } else { 0.0 }, &mut stacked);
                }
                pending_after = run.space_after;
            }
            MeasuredBlock::Table(table) => {
                if table.rows.is_empty() {
                    continue;
                }
                let gap = pending_after.max(table.space_before);
                for (i, fragment) in table.full_fragments().into_iter().enumerate() {
                    push(fragment, if i == 0 { gap } else { 0.0 }, &mut stacked);
                }
                pending_after = table.space_after;
            }
            MeasuredBlock::Group(group) => {
                let inner = group.stacked.clone()?;
                push(inner, pending_after.max(group.space_before), &mut stacked);
                pending_after = group.space_after;
            }
        }
    }

    let mut fragment = stacked.unwrap_or_else(|| Fragment::new(width, 0.0));
    fragment.anchors.extend(anchors);
    Some(fragment)
}

fn push(fragment: Fragment, gap: f32, stacked: &mut Option<Fragment>) {
    match stacked {
        Some(acc) => acc.stack(fragment, gap),
        None => *stacked = Some(fragment),
    }
}
