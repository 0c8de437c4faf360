use crate::style::{ComputedStyle, DEFAULT_FONT_FAMILY};
use quire_style::{ElementStyle, Margins, StyleRegistry, TextAlign, VerticalAlign};
use quire_types::Color;

#[test]
fn test_defaults_fill_unset_attributes() {
    let style = ComputedStyle::from_element(&ElementStyle::new().with_font_size(20.0));
    assert_eq!(style.font.family.as_ref(), DEFAULT_FONT_FAMILY);
    assert_eq!(style.font_size, 20.0);
    assert!((style.leading - 24.0).abs() < 1e-4);
    assert_eq!(style.color, Color::BLACK);
    assert_eq!(style.text_align, TextAlign::Left);
    assert_eq!(style.vertical_align, VerticalAlign::Top);
    assert_eq!(style.padding, Margins::default());
    assert!(!style.keep_with_next);
}

#[test]
fn test_cell_padding_default_only_when_unset() {
    let default_padding = Margins::symmetric(3.0, 6.0);
    let plain = ComputedStyle::for_cell(&ElementStyle::new(), default_padding);
    assert_eq!(plain.padding, default_padding);
    assert_eq!(plain.padding_x(), 12.0);

    let explicit = ComputedStyle::for_cell(
        &ElementStyle::new().with_padding(Margins::all(1.0)),
        default_padding,
    );
    assert_eq!(explicit.padding_y(), 2.0);
}

#[test]
fn test_resolved_heading_computes_bold_face() {
    let registry = StyleRegistry::with_base_styles();
    let heading = ComputedStyle::from_element(&registry.resolve("Heading1").unwrap());
    assert!(heading.font.is_bold());
    assert_eq!(heading.font.postscript_name(), "Helvetica-Bold");
    assert!(heading.keep_with_next);
    assert_eq!(heading.leading, 22.0);
}
