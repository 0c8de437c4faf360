use crate::util::EPSILON;
use crate::LayoutError;

/// A dedicated solver for calculating table column widths.
pub struct TableSolver<'a> {
    explicit: &'a [Option<f32>],
    columns: usize,
}

impl<'a> TableSolver<'a> {
    pub fn new(explicit: &'a [Option<f32>], columns: usize) -> Self {
        Self { explicit, columns }
    }

    /// Resolves the width of every column.
    ///
    /// Explicit widths are used verbatim. The width they leave over is shared
    /// by the remaining columns in proportion to `preferred` (each column's
    /// widest content), or equally when no column has any content. Fails with
    /// `TableOverflow` if the explicit widths alone exceed `available_width`.
    pub fn resolve_widths(
        &self,
        available_width: f32,
        preferred: &[f32],
        label: &str,
    ) -> Result<Vec<f32>, LayoutError> {
        let mut widths = vec![0.0f32; self.columns];
        let mut auto_indices = Vec::new();
        let mut explicit_total = 0.0f32;

        for (i, width) in widths.iter_mut().enumerate() {
            match self.explicit.get(i).copied().flatten() {
                Some(w) => {
                    *width = w.max(0.0);
                    explicit_total += *width;
                }
                None => auto_indices.push(i),
            }
        }

        if explicit_total > available_width + EPSILON {
            return Err(LayoutError::TableOverflow {
                table: label.to_string(),
                required: explicit_total,
                available: available_width,
            });
        }

        if auto_indices.is_empty() {
            return Ok(widths);
        }

        let remaining_width = (available_width - explicit_total).max(0.0);
        let preferred_of = |i: usize| preferred.get(i).copied().unwrap_or(0.0).max(0.0);
        let total_preferred: f32 = auto_indices.iter().map(|&i| preferred_of(i)).sum();

        if total_preferred > 0.0 {
            for &i in &auto_indices {
                widths[i] = remaining_width * preferred_of(i) / total_preferred;
            }
        } else {
            let width_per_auto = remaining_width / auto_indices.len() as f32;
            for i in auto_indices {
                widths[i] = width_per_auto;
            }
        }

        log::trace!("Table '{}' column widths: {:?}", label, widths);
        Ok(widths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::float_slices_fuzzy_eq;

    #[test]
    fn test_remainder_shared_by_content_width() {
        let explicit = [Some(100.0), None, None];
        let widths = TableSolver::new(&explicit, 3)
            .resolve_widths(400.0, &[0.0, 30.0, 90.0], "t")
            .unwrap();
        assert!(float_slices_fuzzy_eq(&widths, &[100.0, 75.0, 225.0]));
    }

    #[test]
    fn test_empty_columns_split_equally() {
        let widths = TableSolver::new(&[], 4)
            .resolve_widths(400.0, &[0.0; 4], "t")
            .unwrap();
        assert!(float_slices_fuzzy_eq(&widths, &[100.0; 4]));
    }

    #[test]
    fn test_explicit_overflow_fails() {
        let explicit = [Some(300.0), Some(200.0)];
        let err = TableSolver::new(&explicit, 2)
            .resolve_widths(400.0, &[10.0, 10.0], "Budget")
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::TableOverflow {
                table: "Budget".to_string(),
                required: 500.0,
                available: 400.0
            }
        );
    }

    #[test]
    fn test_all_explicit_widths_kept_verbatim() {
        let explicit = [Some(50.0), Some(60.0)];
        let widths = TableSolver::new(&explicit, 2)
            .resolve_widths(400.0, &[500.0, 500.0], "t")
            .unwrap();
        assert_eq!(widths, vec![50.0, 60.0]);
    }
}
