use quire_style::Margins;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Text shown for a page reference whose anchor has no page yet.
    ///
    /// Defaults to `"?"`.
    pub unresolved_placeholder: String,
    /// Padding of table cells whose style sets none.
    ///
    /// Defaults to 3pt vertical and 6pt horizontal.
    pub cell_padding: Margins,
    /// Documents with fewer top-level blocks than this are measured on the
    /// calling thread even when the `parallel` feature is enabled.
    ///
    /// Defaults to `32`.
    pub parallel_threshold: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            unresolved_placeholder: "?".to_string(),
            cell_padding: Margins::symmetric(3.0, 6.0),
            parallel_threshold: 32,
        }
    }
}
