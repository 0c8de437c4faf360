use crate::parsers::parse_border;
use quire_types::Color;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::hash::{Hash, Hasher};

/// A solid stroke drawn around a box (a table cell grid line in practice).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

impl Eq for Border {}

impl Hash for Border {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.to_bits().hash(state);
        self.color.hash(state);
    }
}

impl<'de> Deserialize<'de> for Border {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum BorderDef {
            Str(String),
            Map { width: f32, #[serde(default)] color: Color },
        }

        match BorderDef::deserialize(deserializer)? {
            BorderDef::Str(s) => parse_border(&s).map_err(de::Error::custom),
            BorderDef::Map { width, color } => Ok(Border { width, color }),
        }
    }
}
