pub mod border;
pub mod dimension;
pub mod error;
pub mod font;
pub mod parsers;
pub mod registry;
pub mod stylesheet;
pub mod text;

pub use border::Border;
pub use dimension::{Margins, PageGeometry, PageSize};
pub use error::StyleError;
pub use font::{FontStyle, FontWeight};
pub use parsers::StyleParseError;
pub use registry::StyleRegistry;
pub use stylesheet::ElementStyle;
pub use text::{TextAlign, VerticalAlign};
