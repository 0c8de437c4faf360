//! The two-phase layout engine: measure every block at the content width,
//! then place the measured fragments onto pages.

pub mod context;
mod cursor;

pub use context::MeasureContext;

use crate::config::LayoutConfig;
use crate::fonts::{FontLibrary, FontMetrics};
use crate::fragment::MeasuredBlock;
use crate::nodes::measure_block;
use crate::output::LayoutOutput;
use crate::{AnchorMap, LayoutError};
use cursor::PageCursor;
use quire_idf::{ContentBlock, Document, block_label};
use quire_style::{PageGeometry, StyleRegistry};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub struct LayoutEngine<'a> {
    registry: &'a StyleRegistry,
    metrics: Arc<dyn FontMetrics>,
    config: LayoutConfig,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(registry: &'a StyleRegistry, metrics: Arc<dyn FontMetrics>, config: LayoutConfig) -> Self {
        Self {
            registry,
            metrics,
            config,
        }
    }

    /// An engine measuring with the built-in standard font tables.
    pub fn with_builtin_fonts(registry: &'a StyleRegistry) -> Self {
        Self::new(registry, Arc::new(FontLibrary::new()), LayoutConfig::default())
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn registry(&self) -> &StyleRegistry {
        self.registry
    }

    fn context<'c>(&'c self, anchors: &'c AnchorMap) -> MeasureContext<'c> {
        MeasureContext {
            registry: self.registry,
            metrics: self.metrics.as_ref(),
            config: &self.config,
            anchors,
        }
    }

    /// Measures a single block with no page numbers known.
    pub fn measure(&self, block: &ContentBlock, available_width: f32) -> Result<MeasuredBlock, LayoutError> {
        self.measure_with(block, &block_label(None, 0), available_width, &AnchorMap::new())
    }

    pub fn measure_with(
        &self,
        block: &ContentBlock,
        label: &str,
        available_width: f32,
        anchors: &AnchorMap,
    ) -> Result<MeasuredBlock, LayoutError> {
        measure_block(&self.context(anchors), block, label, available_width)
    }

    fn measure_blocks(
        &self,
        blocks: &[ContentBlock],
        width: f32,
        anchors: &AnchorMap,
    ) -> Result<Vec<MeasuredBlock>, LayoutError> {
        let ctx = self.context(anchors);
        let measure = |(i, block): (usize, &ContentBlock)| {
            measure_block(&ctx, block, &block_label(None, i), width)
        };

        #[cfg(feature = "parallel")]
        if blocks.len() >= self.config.parallel_threshold {
            log::debug!("Measuring {} blocks in parallel", blocks.len());
            return blocks.par_iter().enumerate().map(measure).collect();
        }

        blocks.iter().enumerate().map(measure).collect()
    }

    /// Lays out `document` on pages of `geometry`. Page references render
    /// the page numbers in `anchors`, or the placeholder for anchors missing
    /// from it.
    pub fn layout(
        &self,
        document: &Document,
        geometry: &PageGeometry,
        anchors: &AnchorMap,
    ) -> Result<LayoutOutput, LayoutError> {
        geometry.validate().map_err(LayoutError::Generic)?;

        let measured = self.measure_blocks(&document.blocks, geometry.content_width(), anchors)?;

        let mut cursor = PageCursor::new(geometry);
        cursor.place_sequence(&measured);
        let output = cursor.finish();

        log::info!(
            "Laid out {} blocks on {} pages ({} warnings)",
            document.blocks.len(),
            output.pages.len(),
            output.warnings.len()
        );
        Ok(output)
    }
}
