use crate::config::LayoutConfig;
use crate::fonts::FontMetrics;
use crate::style::ComputedStyle;
use crate::{AnchorMap, LayoutError};
use quire_style::{ElementStyle, StyleRegistry};
use std::sync::Arc;

/// Everything measurement reads. Shared by reference across measuring
/// threads, so it holds no mutable state.
#[derive(Clone, Copy)]
pub struct MeasureContext<'a> {
    pub registry: &'a StyleRegistry,
    pub metrics: &'a dyn FontMetrics,
    pub config: &'a LayoutConfig,
    /// Page numbers known from the previous pass.
    pub anchors: &'a AnchorMap,
}

impl<'a> MeasureContext<'a> {
    pub fn element_style(&self, name: &str) -> Result<Arc<ElementStyle>, LayoutError> {
        Ok(self.registry.resolve(name)?)
    }

    pub fn computed(&self, name: &str) -> Result<ComputedStyle, LayoutError> {
        let style = self.element_style(name)?;
        Ok(ComputedStyle::from_element(&style))
    }

    pub fn placeholder(&self) -> &'a str {
        &self.config.unresolved_placeholder
    }
}
