/// Converts a layout `y` (top-left origin, growing down) to a bottom-left
/// origin `y`.
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Bottom edge of a box at `y` with `height`, in bottom-left coordinates.
pub fn flip_box_y(y: f32, height: f32, page_height: f32) -> f32 {
    flip_y(y + height, page_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_box_y() {
        assert_eq!(flip_y(0.0, 842.0), 842.0);
        assert_eq!(flip_box_y(10.0, 12.0, 100.0), 78.0);
    }
}
