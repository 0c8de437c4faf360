use crate::error::RenderError;
use quire_layout::Page;
use std::io::Write;

/// Turns laid-out pages into bytes.
///
/// Renderers see only the final pages: every element already carries
/// absolute page coordinates, and nothing a renderer does feeds back into
/// layout.
pub trait DocumentRenderer: Send + Sync {
    /// Short name of the output format, used in logs.
    fn format(&self) -> &'static str;

    fn render(&self, pages: &[Page], writer: &mut dyn Write) -> Result<(), RenderError>;
}
