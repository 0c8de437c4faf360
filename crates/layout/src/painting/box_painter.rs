use crate::elements::{LayoutElement, PositionedElement, RectElement};
use crate::style::ComputedStyle;
use quire_types::Rect;

/// Wraps `content` with the background and border of `style` over `bounds`.
///
/// The background is emitted first and the border last, so renderers that
/// paint in order draw grid lines over cell content.
pub fn paint_box(
    bounds: Rect,
    style: &ComputedStyle,
    content: Vec<PositionedElement>,
) -> Vec<PositionedElement> {
    let mut elements = Vec::with_capacity(content.len() + 2);

    if bounds.height > 0.0
        && let Some(fill) = style.background_color
    {
        elements.push(PositionedElement::new(
            bounds,
            LayoutElement::Rectangle(RectElement {
                fill: Some(fill),
                stroke: None,
            }),
        ));
    }

    elements.extend(content);

    if let Some(border) = &style.border
        && border.width > 0.0
        && bounds.height > 0.0
    {
        elements.push(PositionedElement::new(
            bounds,
            LayoutElement::Rectangle(RectElement {
                fill: None,
                stroke: Some(border.clone()),
            }),
        ));
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_style::{Border, ElementStyle};
    use quire_types::Color;

    #[test]
    fn test_background_before_content_border_after() {
        let style = ComputedStyle::from_element(
            &ElementStyle::new()
                .with_background(Color::GRAY)
                .with_border(Border::new(0.5, Color::BLACK)),
        );
        let content = vec![PositionedElement::new(
            Rect::new(1.0, 1.0, 5.0, 5.0),
            LayoutElement::Rectangle(RectElement {
                fill: Some(Color::WHITE),
                stroke: None,
            }),
        )];
        let elements = paint_box(Rect::new(0.0, 0.0, 20.0, 10.0), &style, content);

        assert_eq!(elements.len(), 3);
        assert!(matches!(&elements[0].element, LayoutElement::Rectangle(r) if r.fill == Some(Color::GRAY)));
        assert!(matches!(&elements[2].element, LayoutElement::Rectangle(r) if r.stroke.is_some()));
    }

    #[test]
    fn test_plain_style_adds_nothing() {
        let elements = paint_box(Rect::new(0.0, 0.0, 20.0, 10.0), &ComputedStyle::default(), Vec::new());
        assert!(elements.is_empty());
    }
}
