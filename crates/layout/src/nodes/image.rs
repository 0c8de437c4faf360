use crate::elements::{ImageElement, LayoutElement, PositionedElement};
use crate::fragment::{Fragment, FragmentRun, MeasuredBlock};
use quire_idf::ImageBlock;
use quire_types::Rect;

/// An image is a single fixed-size fragment. It is never scaled; one wider
/// than the content area overhangs the right margin.
pub fn measure_image(image: &ImageBlock, label: &str, width: f32) -> MeasuredBlock {
    if image.width > width {
        log::warn!(
            "Image '{}' in {} is {:.2}pt wide, wider than the {:.2}pt content area",
            image.src,
            label,
            image.width,
            width
        );
    }
    let mut fragment = Fragment::new(width, image.height.max(0.0));
    fragment.elements.push(PositionedElement::new(
        Rect::new(0.0, 0.0, image.width, image.height),
        LayoutElement::Image(ImageElement {
            src: image.src.clone(),
        }),
    ));
    MeasuredBlock::Flow(FragmentRun {
        label: label.to_string(),
        fragments: vec![fragment],
        ..Default::default()
    })
}
