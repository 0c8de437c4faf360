use serde::{Deserialize, Deserializer, Serialize, de};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Bold,
    Numeric(u16),
}

impl FontWeight {
    /// Returns the weight on the 100-900 scale.
    pub fn numeric_value(&self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Bold => 700,
            FontWeight::Numeric(n) => *n,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.numeric_value() >= 600
    }

    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "light" => Ok(FontWeight::Light),
            "regular" | "normal" => Ok(FontWeight::Regular),
            "bold" => Ok(FontWeight::Bold),
            _ => s
                .parse::<u16>()
                .map(FontWeight::Numeric)
                .map_err(|_| format!("Invalid font weight: '{}'", s)),
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FontWeightDef {
            Str(String),
            Num(u16),
        }

        match FontWeightDef::deserialize(deserializer)? {
            FontWeightDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            FontWeightDef::Num(n) => Ok(FontWeight::Numeric(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    pub fn is_slanted(&self) -> bool {
        !matches!(self, FontStyle::Normal)
    }
}

/// Splits a PostScript-like font name such as `Helvetica-BoldOblique` into
/// family, weight and style.
pub fn parse_font_name(name: &str) -> (String, FontWeight, FontStyle) {
    let Some((family, variant)) = name.split_once('-') else {
        return (name.to_string(), FontWeight::Regular, FontStyle::Normal);
    };

    let lower = variant.to_ascii_lowercase();
    let weight = if lower.contains("bold") {
        FontWeight::Bold
    } else {
        FontWeight::Regular
    };
    let style = if lower.contains("italic") {
        FontStyle::Italic
    } else if lower.contains("oblique") {
        FontStyle::Oblique
    } else {
        FontStyle::Normal
    };

    (family.to_string(), weight, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_font_name_variants() {
        assert_eq!(
            parse_font_name("Helvetica"),
            ("Helvetica".to_string(), FontWeight::Regular, FontStyle::Normal)
        );
        assert_eq!(
            parse_font_name("Helvetica-Bold"),
            ("Helvetica".to_string(), FontWeight::Bold, FontStyle::Normal)
        );
        assert_eq!(
            parse_font_name("Helvetica-BoldOblique"),
            ("Helvetica".to_string(), FontWeight::Bold, FontStyle::Oblique)
        );
        assert_eq!(
            parse_font_name("Times-Roman"),
            ("Times".to_string(), FontWeight::Regular, FontStyle::Normal)
        );
    }

    #[test]
    fn test_weight_boldness() {
        assert!(FontWeight::Bold.is_bold());
        assert!(FontWeight::Numeric(800).is_bold());
        assert!(!FontWeight::Regular.is_bold());
    }
}
