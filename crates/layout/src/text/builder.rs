use super::{Line, StyledRun};
use crate::elements::{LayoutElement, PositionedElement, TextElement};
use crate::fragment::ResolvedReference;
use quire_types::Rect;

/// One wrapped line turned into drawable text, `height` tall.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
    pub height: f32,
    pub elements: Vec<PositionedElement>,
    pub references: Vec<ResolvedReference>,
}

/// Converts wrapped lines into line boxes of uniform `leading`, shifting
/// every segment right by `x_offset`.
pub fn line_boxes(
    lines: impl IntoIterator<Item = Line>,
    runs: &[StyledRun],
    leading: f32,
    x_offset: f32,
) -> Vec<LineBox> {
    lines
        .into_iter()
        .map(|line| {
            let mut references: Vec<ResolvedReference> = Vec::new();
            let elements = line
                .segments
                .into_iter()
                .map(|segment| {
                    let run = &runs[segment.run];
                    if let Some(target) = &run.reference
                        && !references.iter().any(|r| &r.target == target)
                    {
                        references.push(ResolvedReference {
                            target: target.clone(),
                            rendered: run.text.clone(),
                        });
                    }
                    PositionedElement::new(
                        Rect::new(x_offset + segment.x, 0.0, segment.width, leading),
                        LayoutElement::Text(TextElement {
                            content: segment.text,
                            font: run.font.clone(),
                            font_size: run.size,
                            color: run.color,
                        }),
                    )
                })
                .collect();
            LineBox {
                height: leading,
                elements,
                references,
            }
        })
        .collect()
}
