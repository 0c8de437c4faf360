//! Rendering abstractions for quire.
//!
//! This crate provides the boundary between layout and byte encoding:
//! - `DocumentRenderer`, the trait every output backend implements
//! - `RenderError` for rendering failures
//! - `JsonRenderer`, which writes the placed page geometry as JSON
//! - coordinate helpers shared by backends

mod error;
mod json;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use json::{JsonRenderer, Origin};
pub use traits::DocumentRenderer;
