use crate::LayoutError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Raw font data plus a per-character advance cache.
///
/// `ttf_parser::Face` borrows the data, so a face view is parsed on demand
/// for cache misses only.
#[derive(Debug)]
pub struct TrueTypeFace {
    data: Arc<Vec<u8>>,
    units_per_em: u16,
    advances: RwLock<HashMap<char, Option<f32>>>,
}

impl TrueTypeFace {
    pub fn from_data(data: Vec<u8>) -> Result<Self, LayoutError> {
        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| LayoutError::Font(format!("invalid font data: {}", e)))?;
        let units_per_em = face.units_per_em();
        Ok(Self {
            data: Arc::new(data),
            units_per_em,
            advances: RwLock::new(HashMap::new()),
        })
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Advance of `c` as a fraction of the em, or `None` if the font has no glyph for it.
    pub fn advance_em(&self, c: char) -> Option<f32> {
        if let Ok(cache) = self.advances.read()
            && let Some(hit) = cache.get(&c)
        {
            return *hit;
        }

        let advance = ttf_parser::Face::parse(&self.data, 0).ok().and_then(|face| {
            let glyph = face.glyph_index(c)?;
            let units = face.glyph_hor_advance(glyph)?;
            Some(units as f32 / self.units_per_em.max(1) as f32)
        });

        if let Ok(mut cache) = self.advances.write() {
            cache.insert(c, advance);
        }
        advance
    }
}
