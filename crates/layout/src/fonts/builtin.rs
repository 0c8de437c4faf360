//! Advance widths of the standard PDF base fonts, in 1/1000 em, for the
//! printable ASCII range (0x20..=0x7E).

use super::{FontFace, FontMetrics};

const FIRST: u32 = 0x20;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

const COURIER_ADVANCE: u16 = 600;

/// Metrics of the standard Helvetica, Times and Courier faces. Oblique and
/// italic faces use the upright widths; unknown families measure as
/// Helvetica; characters outside ASCII use the face's average advance.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Helvetica,
    Times,
    Courier,
}

impl Family {
    fn of(face: &FontFace) -> Self {
        let family = face.family.to_ascii_lowercase();
        if family.starts_with("times") {
            Family::Times
        } else if family.starts_with("courier") {
            Family::Courier
        } else {
            Family::Helvetica
        }
    }
}

fn table(family: Family, bold: bool) -> Option<&'static [u16; 95]> {
    match (family, bold) {
        (Family::Helvetica, false) => Some(&HELVETICA),
        (Family::Helvetica, true) => Some(&HELVETICA_BOLD),
        (Family::Times, false) => Some(&TIMES_ROMAN),
        (Family::Times, true) => Some(&TIMES_BOLD),
        (Family::Courier, _) => None,
    }
}

fn average(widths: &[u16; 95]) -> u16 {
    let letters = &widths[(b'a' as usize - FIRST as usize)..=(b'z' as usize - FIRST as usize)];
    (letters.iter().map(|w| *w as u32).sum::<u32>() / letters.len() as u32) as u16
}

impl BuiltinMetrics {
    /// Advance of `c` in 1/1000 em.
    pub fn advance_units(&self, face: &FontFace, c: char) -> u16 {
        if c == '\n' {
            return 0;
        }
        let Some(widths) = table(Family::of(face), face.is_bold()) else {
            return COURIER_ADVANCE;
        };
        let code = c as u32;
        if (FIRST..FIRST + 95).contains(&code) {
            widths[(code - FIRST) as usize]
        } else if c == '\u{a0}' {
            widths[0]
        } else {
            average(widths)
        }
    }
}

impl FontMetrics for BuiltinMetrics {
    fn char_width(&self, face: &FontFace, c: char, size: f32) -> f32 {
        self.advance_units(face, c) as f32 * size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_idf::Emphasis;

    #[test]
    fn test_known_advances() {
        let helv = FontFace::regular("Helvetica");
        assert_eq!(BuiltinMetrics.advance_units(&helv, ' '), 278);
        assert_eq!(BuiltinMetrics.advance_units(&helv, 'W'), 944);
        assert_eq!(BuiltinMetrics.advance_units(&helv, 'i'), 222);

        let bold = helv.with_emphasis(Emphasis::Bold);
        assert_eq!(BuiltinMetrics.advance_units(&bold, 'i'), 278);

        let times = FontFace::regular("Times");
        assert_eq!(BuiltinMetrics.advance_units(&times, 'a'), 444);
    }

    #[test]
    fn test_courier_is_monospaced() {
        let courier = FontFace::regular("Courier");
        let w = BuiltinMetrics.text_width(&courier, "iiii", 10.0);
        let m = BuiltinMetrics.text_width(&courier, "MMMM", 10.0);
        assert_eq!(w, m);
        assert!((w - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_non_ascii_uses_average() {
        let helv = FontFace::regular("Helvetica");
        let avg = BuiltinMetrics.advance_units(&helv, 'é');
        assert!(avg > 300 && avg < 600);
    }
}
