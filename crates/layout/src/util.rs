/// Tolerance for floating point comparisons of page offsets.
pub const EPSILON: f32 = 0.01;

/// Robust floating point comparison for layout calculations.
pub fn floats_fuzzy_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Helper for comparing slices of floats (e.g., column widths).
pub fn float_slices_fuzzy_eq(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| floats_fuzzy_eq(*x, *y))
}
