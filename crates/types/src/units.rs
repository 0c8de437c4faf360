//! Conversions from physical units to PDF points (1/72 inch).

pub const POINTS_PER_INCH: f32 = 72.0;
pub const POINTS_PER_CM: f32 = POINTS_PER_INCH / 2.54;
pub const POINTS_PER_MM: f32 = POINTS_PER_CM / 10.0;

pub fn cm(value: f32) -> f32 {
    value * POINTS_PER_CM
}

pub fn mm(value: f32) -> f32 {
    value * POINTS_PER_MM
}

pub fn inch(value: f32) -> f32 {
    value * POINTS_PER_INCH
}
