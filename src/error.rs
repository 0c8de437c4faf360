use quire_layout::LayoutError;
use quire_render_core::RenderError;
use quire_style::StyleError;
use quire_types::AnchorId;
use thiserror::Error;

/// Everything that can stop a compile. No variant leaves a file behind.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Layout failed: {0}")]
    Layout(#[source] LayoutError),

    #[error("Anchor '{0}' is declared more than once.")]
    DuplicateAnchor(AnchorId),

    #[error(
        "Page references did not settle after {passes} passes; anchors still moving: {}",
        .anchors.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(", ")
    )]
    UnresolvedReference { passes: usize, anchors: Vec<AnchorId> },

    #[error("Reference to anchor '{0}', which is never declared.")]
    DanglingReference(AnchorId),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<LayoutError> for CompileError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::Style(style) => CompileError::Style(style),
            other => CompileError::Layout(other),
        }
    }
}
