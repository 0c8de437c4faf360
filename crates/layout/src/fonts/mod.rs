//! Font metrics for line breaking and column sizing.
//!
//! Layout only needs advance widths. [`FontLibrary`] answers them from
//! registered TrueType faces and falls back to the built-in standard font
//! tables, so a document lays out without any font files.

mod builtin;
mod ttf;

pub use builtin::BuiltinMetrics;
pub use ttf::TrueTypeFace;

use crate::LayoutError;
use quire_idf::Emphasis;
use quire_style::{FontStyle, FontWeight};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A font family plus the weight and slant selected from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontFace {
    pub family: Arc<str>,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl FontFace {
    pub fn new(family: impl Into<Arc<str>>, weight: FontWeight, style: FontStyle) -> Self {
        Self {
            family: family.into(),
            weight,
            style,
        }
    }

    pub fn regular(family: impl Into<Arc<str>>) -> Self {
        Self::new(family, FontWeight::Regular, FontStyle::Normal)
    }

    pub fn is_bold(&self) -> bool {
        self.weight.is_bold()
    }

    pub fn is_slanted(&self) -> bool {
        self.style.is_slanted()
    }

    /// Applies inline emphasis on top of the paragraph face. Emphasis only
    /// ever adds weight or slant.
    pub fn with_emphasis(&self, emphasis: Emphasis) -> Self {
        let mut face = self.clone();
        if emphasis.is_bold() {
            face.weight = FontWeight::Bold;
        }
        if emphasis.is_italic() && !face.style.is_slanted() {
            face.style = FontStyle::Italic;
        }
        face
    }

    /// PostScript-style name, e.g. `Helvetica-BoldOblique` or `Times-Roman`.
    pub fn postscript_name(&self) -> String {
        let family = self.family.as_ref();
        let slant = match (family.to_ascii_lowercase().as_str(), self.is_slanted()) {
            (_, false) => "",
            ("times", true) => "Italic",
            (_, true) => "Oblique",
        };
        match (self.is_bold(), slant) {
            (false, "") if family.eq_ignore_ascii_case("times") => format!("{family}-Roman"),
            (false, "") => family.to_string(),
            (true, "") => format!("{family}-Bold"),
            (false, slant) => format!("{family}-{slant}"),
            (true, slant) => format!("{family}-Bold{slant}"),
        }
    }
}

/// Advance widths in points.
pub trait FontMetrics: Send + Sync {
    fn char_width(&self, face: &FontFace, c: char, size: f32) -> f32;

    fn text_width(&self, face: &FontFace, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.char_width(face, c, size)).sum()
    }
}

/// Every character advances by the same fraction of the font size.
/// Makes line counts predictable in tests and benchmarks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMetrics {
    pub advance_em: f32,
}

impl FixedAdvanceMetrics {
    pub fn new(advance_em: f32) -> Self {
        Self { advance_em }
    }
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl FontMetrics for FixedAdvanceMetrics {
    fn char_width(&self, _face: &FontFace, c: char, size: f32) -> f32 {
        if c == '\n' { 0.0 } else { self.advance_em * size }
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FaceKey {
    family: String,
    bold: bool,
    slanted: bool,
}

impl FaceKey {
    fn of(face: &FontFace) -> Self {
        Self {
            family: face.family.to_lowercase(),
            bold: face.is_bold(),
            slanted: face.is_slanted(),
        }
    }
}

/// Registered TrueType faces with the built-in tables as fallback.
#[derive(Debug, Clone, Default)]
pub struct FontLibrary {
    faces: Arc<RwLock<HashMap<FaceKey, Arc<TrueTypeFace>>>>,
    fallback: BuiltinMetrics,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers TrueType or OpenType data under `face`. Text set in that
    /// face is measured with the font's own advances from then on.
    pub fn register_font(&self, face: &FontFace, data: Vec<u8>) -> Result<(), LayoutError> {
        let ttf = TrueTypeFace::from_data(data)?;
        log::debug!(
            "Registered font '{}' ({} units/em)",
            face.postscript_name(),
            ttf.units_per_em()
        );
        let mut faces = self
            .faces
            .write()
            .map_err(|_| LayoutError::Font("font library lock poisoned".to_string()))?;
        faces.insert(FaceKey::of(face), Arc::new(ttf));
        Ok(())
    }

    pub fn has_font(&self, face: &FontFace) -> bool {
        self.faces
            .read()
            .map(|faces| faces.contains_key(&FaceKey::of(face)))
            .unwrap_or(false)
    }

    fn lookup(&self, face: &FontFace) -> Option<Arc<TrueTypeFace>> {
        let faces = self.faces.read().ok()?;
        if faces.is_empty() {
            return None;
        }
        faces.get(&FaceKey::of(face)).cloned()
    }
}

impl FontMetrics for FontLibrary {
    fn char_width(&self, face: &FontFace, c: char, size: f32) -> f32 {
        self.lookup(face)
            .and_then(|ttf| ttf.advance_em(c))
            .map(|em| em * size)
            .unwrap_or_else(|| self.fallback.char_width(face, c, size))
    }

    fn text_width(&self, face: &FontFace, text: &str, size: f32) -> f32 {
        match self.lookup(face) {
            Some(ttf) => text
                .chars()
                .map(|c| {
                    ttf.advance_em(c)
                        .map(|em| em * size)
                        .unwrap_or_else(|| self.fallback.char_width(face, c, size))
                })
                .sum(),
            None => self.fallback.text_width(face, text, size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postscript_names() {
        let helv = FontFace::regular("Helvetica");
        assert_eq!(helv.postscript_name(), "Helvetica");
        assert_eq!(helv.with_emphasis(Emphasis::Bold).postscript_name(), "Helvetica-Bold");
        assert_eq!(
            helv.with_emphasis(Emphasis::BoldItalic).postscript_name(),
            "Helvetica-BoldOblique"
        );
        let times = FontFace::regular("Times");
        assert_eq!(times.postscript_name(), "Times-Roman");
        assert_eq!(times.with_emphasis(Emphasis::Italic).postscript_name(), "Times-Italic");
    }

    #[test]
    fn test_fixed_advance() {
        let metrics = FixedAdvanceMetrics::new(0.5);
        let face = FontFace::regular("Helvetica");
        assert_eq!(metrics.text_width(&face, "abcd", 10.0), 20.0);
    }

    #[test]
    fn test_library_falls_back_to_builtin_tables() {
        let library = FontLibrary::new();
        let face = FontFace::regular("Helvetica");
        assert!(!library.has_font(&face));
        let expected = BuiltinMetrics.text_width(&face, "Hello", 12.0);
        assert_eq!(library.text_width(&face, "Hello", 12.0), expected);
    }

    #[test]
    fn test_invalid_font_data_rejected() {
        let library = FontLibrary::new();
        let err = library
            .register_font(&FontFace::regular("Broken"), vec![0, 1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, LayoutError::Font(_)));
    }
}
