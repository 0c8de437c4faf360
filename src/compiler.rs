use crate::config::CompileConfig;
use crate::error::CompileError;
use crate::resolver::{ReferenceResolver, Resolution};
use quire_idf::{ContentBlock, Document, block_label};
use quire_layout::util::EPSILON;
use quire_layout::{AnchorMap, FontLibrary, FontMetrics, LayoutEngine, LayoutError, LayoutWarning, Page};
use quire_render_core::{DocumentRenderer, JsonRenderer};
use quire_style::{PageGeometry, StyleRegistry};
use std::collections::BTreeSet;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// What a successful compile produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileReport {
    pub path: PathBuf,
    pub pages: usize,
    pub passes: usize,
    pub anchors: AnchorMap,
    pub warnings: Vec<LayoutWarning>,
}

/// Compiles documents into paginated output files.
pub struct Compiler {
    config: CompileConfig,
    metrics: Arc<dyn FontMetrics>,
    renderer: Box<dyn DocumentRenderer>,
}

impl Compiler {
    /// A compiler measuring with the built-in font tables and writing JSON.
    pub fn new(config: CompileConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(FontLibrary::new()),
            renderer: Box::new(JsonRenderer::new()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn FontMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_renderer(mut self, renderer: impl DocumentRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Checks everything that can be known to fail before layout starts:
    /// styles that do not resolve, tables whose explicit widths overflow the
    /// page, and anchors declared twice.
    pub fn preflight(&self, document: &Document, registry: &StyleRegistry) -> Result<(), CompileError> {
        self.config.validate()?;

        for name in document.style_names() {
            registry.resolve(name.as_str())?;
        }

        check_table_widths(&document.blocks, self.config.geometry.content_width(), None)?;

        let mut seen = BTreeSet::new();
        for anchor in document.anchors() {
            if !seen.insert(anchor) {
                return Err(CompileError::DuplicateAnchor(anchor.clone()));
            }
        }
        Ok(())
    }

    /// Lays the document out until its page references settle, without
    /// writing anything. Freezes `registry`.
    pub fn resolve(&self, document: &Document, registry: &StyleRegistry) -> Result<Resolution, CompileError> {
        self.preflight(document, registry)?;
        registry.finalize();

        let engine = LayoutEngine::new(registry, Arc::clone(&self.metrics), self.config.layout.clone());
        ReferenceResolver::new(engine, self.config.geometry)
            .with_max_passes(self.config.max_passes)
            .resolve(document)
    }

    /// Compiles `document` into a file at `path`.
    ///
    /// The output is written to a temporary file in the destination's
    /// directory and renamed over `path` once complete. On any error nothing
    /// is left behind and an existing file at `path` is untouched.
    pub fn compile(
        &self,
        document: &Document,
        registry: &StyleRegistry,
        path: impl AsRef<Path>,
    ) -> Result<CompileReport, CompileError> {
        let path = path.as_ref();
        let resolution = self.resolve(document, registry)?;
        self.write_atomically(&resolution.output.pages, path)?;

        for warning in &resolution.output.warnings {
            log::warn!("{}", warning);
        }
        log::info!(
            "Wrote {} pages to {} ({} passes, {} warnings)",
            resolution.output.pages.len(),
            path.display(),
            resolution.passes,
            resolution.output.warnings.len()
        );

        let Resolution { output, passes } = resolution;
        Ok(CompileReport {
            path: path.to_path_buf(),
            pages: output.pages.len(),
            passes,
            anchors: output.anchors,
            warnings: output.warnings,
        })
    }

    fn write_atomically(&self, pages: &[Page], path: &Path) -> Result<(), CompileError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        log::debug!(
            "Rendering {} pages as {} into {}",
            pages.len(),
            self.renderer.format(),
            file.path().display()
        );
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            self.renderer.render(pages, &mut writer)?;
            writer.flush()?;
        }
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| CompileError::Io(e.error))?;
        Ok(())
    }
}

fn check_table_widths(blocks: &[ContentBlock], width: f32, group: Option<&str>) -> Result<(), LayoutError> {
    for (i, block) in blocks.iter().enumerate() {
        let label = group.map_or_else(|| block_label(None, i), str::to_string);
        match block {
            ContentBlock::Table(table) => {
                let required = table.explicit_width_total();
                if required > width + EPSILON {
                    return Err(LayoutError::TableOverflow {
                        table: table.name.clone().unwrap_or(label),
                        required,
                        available: width,
                    });
                }
            }
            ContentBlock::KeepTogether(inner) => {
                check_table_widths(&inner.children, width, Some(inner.name.as_deref().unwrap_or(&label)))?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Compiles `document` onto pages of `geometry` and writes the result to
/// `path`, using the default compiler settings otherwise.
pub fn compile(
    document: &Document,
    registry: &StyleRegistry,
    geometry: PageGeometry,
    path: impl AsRef<Path>,
) -> Result<CompileReport, CompileError> {
    Compiler::new(CompileConfig::with_geometry(geometry)).compile(document, registry, path)
}
