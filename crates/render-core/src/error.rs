use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write rendered pages: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode pages as JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// For renderers outside this crate.
    #[error("Renderer '{format}' failed: {message}")]
    Backend { format: String, message: String },
}
