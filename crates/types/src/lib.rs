pub mod color;
pub mod geometry;
pub mod ids;
pub mod units;

pub use color::Color;
pub use geometry::{Rect, Size};
pub use ids::{AnchorId, StyleName};
pub use units::{cm, inch, mm};
