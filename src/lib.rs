//! quire: a paginating document compiler.
//!
//! A [`Document`] of text, tables, images and keep-together groups is laid
//! out onto fixed-size pages with styles from a [`StyleRegistry`]. Page
//! references (a table of contents, lists of figures) are resolved by
//! repeating layout until every anchor's page number is stable, and the
//! final pages are written atomically by a renderer.
//!
//! ```no_run
//! use quire::idf::{ContentBlock, Document, Run, TextBlock};
//! use quire::style::{Margins, PageGeometry, PageSize, StyleRegistry};
//!
//! let registry = StyleRegistry::with_base_styles();
//! let document = Document::default()
//!     .with(TextBlock::from_runs("Normal", vec![Run::plain("Introduction, page "), Run::page_ref("intro")]))
//!     .with(ContentBlock::PageBreak)
//!     .with(ContentBlock::anchor("intro"))
//!     .with(ContentBlock::text("Heading1", "Introduction"));
//!
//! let geometry = PageGeometry::new(PageSize::A4, Margins::all(quire::types::cm(2.0)));
//! let report = quire::compile(&document, &registry, geometry, "report.json")?;
//! assert_eq!(report.anchors[&quire::types::AnchorId::from("intro")], 2);
//! # Ok::<(), quire::CompileError>(())
//! ```

mod compiler;
pub mod config;
pub mod error;
pub mod resolver;

pub use compiler::{CompileReport, Compiler, compile};
pub use config::{CompileConfig, CompileConfigBuilder};
pub use error::CompileError;
pub use resolver::{ReferenceResolver, Resolution};

pub use quire_idf as idf;
pub use quire_layout as layout;
pub use quire_render_core as render;
pub use quire_style as style;
pub use quire_types as types;

pub use quire_idf::{ContentBlock, Document};
pub use quire_layout::{LayoutWarning, WarningKind};
pub use quire_style::{PageGeometry, StyleRegistry};
