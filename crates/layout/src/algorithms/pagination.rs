use crate::util::EPSILON;

pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Centralized logic to check if a fragment fits in the remaining space.
///
/// * `cursor_y`: The current offset from the top of the content area.
/// * `child_height`: The required height, including any spacing before it.
/// * `content_height`: The usable height of the page.
pub fn check_child_fit(cursor_y: f32, child_height: f32, content_height: f32) -> BreakAnalysis {
    let available = (content_height - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: child_height > available + EPSILON,
        remaining_height: available,
    }
}
