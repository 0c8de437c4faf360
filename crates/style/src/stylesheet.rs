//! The attribute set carried by a named style.

use super::border::Border;
use super::dimension::Margins;
use super::font::{FontStyle, FontWeight, parse_font_name};
use super::text::{TextAlign, VerticalAlign};
use quire_types::Color;
use serde::{Deserialize, Serialize};

/// A partial set of style attributes. Unset fields inherit from the parent
/// style, or fall back to layout defaults once fully resolved.
#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    // Font & Text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    /// Baseline-to-baseline distance in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,

    // Block spacing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_before: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_after: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_indent: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_indent: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_with_next: Option<bool>,

    // Box Model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Margins>,
}

macro_rules! merge_fields {
    ($dst:ident, $src:ident, $($field:ident),+ $(,)?) => {
        $(
            if $src.$field.is_some() {
                $dst.$field = $src.$field.clone();
            }
        )+
    };
}

impl ElementStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays every attribute set in `other` onto `self`.
    pub fn apply(&mut self, other: &ElementStyle) {
        merge_fields!(
            self,
            other,
            font_family,
            font_size,
            font_weight,
            font_style,
            leading,
            color,
            text_align,
            vertical_align,
            space_before,
            space_after,
            left_indent,
            right_indent,
            keep_with_next,
            background_color,
            border,
            padding,
        );
    }

    /// Returns a copy of `self` with `other` overlaid.
    pub fn merged(&self, other: &ElementStyle) -> ElementStyle {
        let mut out = self.clone();
        out.apply(other);
        out
    }

    pub fn is_empty(&self) -> bool {
        *self == ElementStyle::default()
    }

    /// Sets family, weight and slant from a name like `Helvetica-Bold`.
    pub fn with_font_name(mut self, name: &str) -> Self {
        let (family, weight, style) = parse_font_name(name);
        self.font_family = Some(family);
        self.font_weight = Some(weight);
        self.font_style = Some(style);
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_leading(mut self, leading: f32) -> Self {
        self.leading = Some(leading);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn with_vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = Some(align);
        self
    }

    pub fn with_space_before(mut self, space: f32) -> Self {
        self.space_before = Some(space);
        self
    }

    pub fn with_space_after(mut self, space: f32) -> Self {
        self.space_after = Some(space);
        self
    }

    pub fn with_left_indent(mut self, indent: f32) -> Self {
        self.left_indent = Some(indent);
        self
    }

    pub fn with_right_indent(mut self, indent: f32) -> Self {
        self.right_indent = Some(indent);
        self
    }

    pub fn with_keep_with_next(mut self, keep: bool) -> Self {
        self.keep_with_next = Some(keep);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_padding(mut self, padding: Margins) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides_only_set_fields() {
        let mut base = ElementStyle::new()
            .with_font_name("Helvetica")
            .with_font_size(10.0)
            .with_leading(12.0);
        let overlay = ElementStyle::new().with_font_size(18.0).with_text_align(TextAlign::Center);

        base.apply(&overlay);

        assert_eq!(base.font_family.as_deref(), Some("Helvetica"));
        assert_eq!(base.font_size, Some(18.0));
        assert_eq!(base.leading, Some(12.0));
        assert_eq!(base.text_align, Some(TextAlign::Center));
    }

    #[test]
    fn test_deserialize_from_json() {
        let style: ElementStyle = serde_json::from_str(
            r##"{ "fontSize": 9, "textAlign": "right", "border": "0.5pt #1e293b", "padding": "3 6" }"##,
        )
        .unwrap();
        assert_eq!(style.font_size, Some(9.0));
        assert_eq!(style.text_align, Some(TextAlign::Right));
        assert_eq!(style.border.map(|b| b.width), Some(0.5));
        assert_eq!(style.padding, Some(Margins::symmetric(3.0, 6.0)));
    }
}
