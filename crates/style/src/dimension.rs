//! Page sizes, margins and the page geometry handed to the layout engine.
use crate::parsers::{parse_page_size, parse_shorthand_margins};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeMap};
use std::hash::{Hash, Hasher};

#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Hash for Margins {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.top.to_bits().hash(state);
        self.right.to_bits().hash(state);
        self.bottom.to_bits().hash(state);
        self.left.to_bits().hash(state);
    }
}

impl Eq for Margins {}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Vertical and horizontal values, CSS two-value shorthand order.
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MarginsVisitor;
        impl<'de> de::Visitor<'de> for MarginsVisitor {
            type Value = Margins;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string like '2cm' or '1cm 2cm', a number, or a map")
            }

            fn visit_str<E>(self, value: &str) -> Result<Margins, E>
            where
                E: de::Error,
            {
                parse_shorthand_margins(value).map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Margins, E>
            where
                E: de::Error,
            {
                Ok(Margins::all(value as f32))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Margins, E>
            where
                E: de::Error,
            {
                Ok(Margins::all(value as f32))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Margins, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut margins = Margins::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "top" => margins.top = map.next_value()?,
                        "right" => margins.right = map.next_value()?,
                        "bottom" => margins.bottom = map.next_value()?,
                        "left" => margins.left = map.next_value()?,
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(margins)
            }
        }
        deserializer.deserialize_any(MarginsVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageSize::A4 => serializer.serialize_str("A4"),
            PageSize::Letter => serializer.serialize_str("Letter"),
            PageSize::Legal => serializer.serialize_str("Legal"),
            PageSize::Custom { width, height } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", width)?;
                map.serialize_entry("height", height)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Str(String),
            Map { width: f32, height: f32 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Str(s) => parse_page_size(&s).map_err(de::Error::custom),
            PageSizeDef::Map { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}

/// Physical page size plus the margins that bound the content area.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    #[serde(default)]
    pub size: PageSize,
    #[serde(default)]
    pub margins: Margins,
}

impl PageGeometry {
    pub fn new(size: PageSize, margins: Margins) -> Self {
        Self { size, margins }
    }

    pub fn page_width(&self) -> f32 {
        self.size.dimensions_pt().0
    }

    pub fn page_height(&self) -> f32 {
        self.size.dimensions_pt().1
    }

    /// Usable width between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.page_width() - self.margins.horizontal()
    }

    /// Usable height between the top and bottom margins.
    pub fn content_height(&self) -> f32 {
        self.page_height() - self.margins.vertical()
    }

    /// Checks that the margins leave a content area to lay out into.
    pub fn validate(&self) -> Result<(), String> {
        if self.content_width() <= 0.0 || self.content_height() <= 0.0 {
            return Err(format!(
                "margins leave no content area ({:.2} x {:.2}pt)",
                self.content_width(),
                self.content_height()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_types::cm;

    #[test]
    fn test_a4_with_two_cm_margins() {
        let geometry = PageGeometry::new(PageSize::A4, Margins::all(cm(2.0)));
        assert!((geometry.content_width() - (595.28 - 2.0 * cm(2.0))).abs() < 0.01);
        assert!((geometry.content_height() - (841.89 - 2.0 * cm(2.0))).abs() < 0.01);
        assert!(geometry.validate().is_ok());
    }

    #[test]
    fn test_degenerate_margins_rejected() {
        let geometry = PageGeometry::new(
            PageSize::Custom {
                width: 100.0,
                height: 100.0,
            },
            Margins::all(60.0),
        );
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_deserialize_geometry_with_shorthand() {
        let geometry: PageGeometry =
            serde_json::from_str(r#"{ "size": "Letter", "margins": "1in 2cm" }"#).unwrap();
        assert_eq!(geometry.size, PageSize::Letter);
        assert!((geometry.margins.top - 72.0).abs() < 0.01);
        assert!((geometry.margins.left - cm(2.0)).abs() < 0.01);
    }
}
