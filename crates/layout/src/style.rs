//! Concrete style values used during layout.

use crate::fonts::FontFace;
use quire_style::{Border, ElementStyle, FontStyle, FontWeight, Margins, TextAlign, VerticalAlign};
use quire_types::Color;

pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";
pub const DEFAULT_FONT_SIZE: f32 = 10.0;
/// Leading as a multiple of the font size when a style sets none.
pub const DEFAULT_LEADING_RATIO: f32 = 1.2;

/// An [`ElementStyle`] with every attribute filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub font: FontFace,
    pub font_size: f32,
    pub leading: f32,
    pub color: Color,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub right_indent: f32,
    pub keep_with_next: bool,
    pub background_color: Option<Color>,
    pub border: Option<Border>,
    pub padding: Margins,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self::from_element(&ElementStyle::default())
    }
}

impl ComputedStyle {
    pub fn from_element(style: &ElementStyle) -> Self {
        let font_size = style.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        Self {
            font: FontFace::new(
                style.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY),
                style.font_weight.unwrap_or(FontWeight::Regular),
                style.font_style.unwrap_or(FontStyle::Normal),
            ),
            font_size,
            leading: style.leading.unwrap_or(font_size * DEFAULT_LEADING_RATIO),
            color: style.color.unwrap_or(Color::BLACK),
            text_align: style.text_align.unwrap_or_default(),
            vertical_align: style.vertical_align.unwrap_or_default(),
            space_before: style.space_before.unwrap_or(0.0),
            space_after: style.space_after.unwrap_or(0.0),
            left_indent: style.left_indent.unwrap_or(0.0),
            right_indent: style.right_indent.unwrap_or(0.0),
            keep_with_next: style.keep_with_next.unwrap_or(false),
            background_color: style.background_color,
            border: style.border.clone(),
            padding: style.padding.unwrap_or_default(),
        }
    }

    /// Like [`from_element`](Self::from_element) but with `default_padding`
    /// where the style sets no padding, as table cells need.
    pub fn for_cell(style: &ElementStyle, default_padding: Margins) -> Self {
        let mut computed = Self::from_element(style);
        computed.padding = style.padding.unwrap_or(default_padding);
        computed
    }

    pub fn padding_x(&self) -> f32 {
        self.padding.horizontal()
    }

    pub fn padding_y(&self) -> f32 {
        self.padding.vertical()
    }

    pub fn indent_x(&self) -> f32 {
        self.left_indent + self.right_indent
    }

    pub fn border_width(&self) -> f32 {
        self.border.as_ref().map_or(0.0, |b| b.width)
    }
}
