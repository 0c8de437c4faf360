use crate::error::CompileError;
use quire_layout::LayoutConfig;
use quire_style::{Margins, PageGeometry, PageSize};
use quire_types::cm;

pub const DEFAULT_MAX_PASSES: usize = 3;

/// Settings for a compile: page geometry, the pass budget of reference
/// resolution, and the layout engine's own knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileConfig {
    pub geometry: PageGeometry,
    /// Layout passes allowed before page references are declared unresolvable.
    pub max_passes: usize,
    pub layout: LayoutConfig,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::new(PageSize::A4, Margins::all(cm(2.0))),
            max_passes: DEFAULT_MAX_PASSES,
            layout: LayoutConfig::default(),
        }
    }
}

impl CompileConfig {
    pub fn builder() -> CompileConfigBuilder {
        CompileConfigBuilder::new()
    }

    pub fn with_geometry(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), CompileError> {
        if self.max_passes == 0 {
            return Err(CompileError::Config("max_passes must be at least 1".to_string()));
        }
        self.geometry.validate().map_err(CompileError::Config)
    }
}

/// A builder for [`CompileConfig`].
#[derive(Debug, Clone, Default)]
pub struct CompileConfigBuilder {
    config: CompileConfig,
}

impl CompileConfigBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn geometry(mut self, geometry: PageGeometry) -> Self {
        self.config.geometry = geometry;
        self
    }

    pub fn page_size(mut self, size: PageSize) -> Self {
        self.config.geometry.size = size;
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.config.geometry.margins = margins;
        self
    }

    pub fn max_passes(mut self, passes: usize) -> Self {
        self.config.max_passes = passes;
        self
    }

    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    /// Text shown for page references that have no page yet.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.layout.unresolved_placeholder = placeholder.into();
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<CompileConfig, CompileError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompileConfig::builder().build().unwrap();
        assert_eq!(config.max_passes, 3);
        assert_eq!(config.geometry.size, PageSize::A4);
        assert_eq!(config.layout.unresolved_placeholder, "?");
    }

    #[test]
    fn test_zero_passes_rejected() {
        let err = CompileConfig::builder().max_passes(0).build().unwrap_err();
        assert!(matches!(err, CompileError::Config(_)));
    }

    #[test]
    fn test_margins_must_leave_content_area() {
        let err = CompileConfig::builder()
            .page_size(PageSize::Custom {
                width: 100.0,
                height: 100.0,
            })
            .margins(Margins::all(50.0))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("no content area"));
    }
}
