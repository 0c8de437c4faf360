//! Fixed-point resolution of page references.
//!
//! A reference may precede the anchor it points to (a table of contents
//! always does), so its page number is only known after a layout pass has
//! placed the anchor. The resolver repeats layout, feeding each pass the
//! anchor map of the previous one, until the map stops changing.

use crate::error::CompileError;
use quire_idf::Document;
use quire_layout::{AnchorMap, LayoutEngine, LayoutOutput};
use quire_style::PageGeometry;
use quire_types::AnchorId;

/// The converged layout and how many passes it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub output: LayoutOutput,
    pub passes: usize,
}

impl Resolution {
    pub fn anchors(&self) -> &AnchorMap {
        &self.output.anchors
    }
}

pub struct ReferenceResolver<'a> {
    engine: LayoutEngine<'a>,
    geometry: PageGeometry,
    max_passes: usize,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(engine: LayoutEngine<'a>, geometry: PageGeometry) -> Self {
        Self {
            engine,
            geometry,
            max_passes: crate::config::DEFAULT_MAX_PASSES,
        }
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn resolve(&self, document: &Document) -> Result<Resolution, CompileError> {
        self.resolve_from(document, &AnchorMap::new())
    }

    /// Resolves starting from `seed` instead of an empty map. Seeding with a
    /// converged map settles in a single pass.
    pub fn resolve_from(&self, document: &Document, seed: &AnchorMap) -> Result<Resolution, CompileError> {
        if self.max_passes == 0 {
            return Err(CompileError::Config("max_passes must be at least 1".to_string()));
        }

        let mut known = seed.clone();
        let mut moving = Vec::new();

        for pass in 1..=self.max_passes {
            let output = self.engine.layout(document, &self.geometry, &known)?;
            moving = changed_anchors(&known, &output.anchors);

            if moving.is_empty() {
                log::info!(
                    "References settled after {} pass(es): {} pages, {} anchors",
                    pass,
                    output.pages.len(),
                    output.anchors.len()
                );
                check_references(document, &output)?;
                return Ok(Resolution { output, passes: pass });
            }

            log::debug!(
                "Pass {}: {} anchor(s) moved ({})",
                pass,
                moving.len(),
                join(&moving)
            );
            known = output.anchors;
        }

        log::warn!(
            "Page references still moving after {} passes: {}",
            self.max_passes,
            join(&moving)
        );
        Err(CompileError::UnresolvedReference {
            passes: self.max_passes,
            anchors: moving,
        })
    }
}

/// Anchors whose page differs between the two maps, including anchors
/// present in only one of them.
fn changed_anchors(previous: &AnchorMap, current: &AnchorMap) -> Vec<AnchorId> {
    let mut changed: Vec<AnchorId> = current
        .iter()
        .filter(|(id, page)| previous.get(*id) != Some(*page))
        .map(|(id, _)| id.clone())
        .collect();
    changed.extend(
        previous
            .keys()
            .filter(|id| !current.contains_key(*id))
            .cloned(),
    );
    changed.sort();
    changed
}

/// Every reference must point at a placed anchor and show its page.
fn check_references(document: &Document, output: &LayoutOutput) -> Result<(), CompileError> {
    if let Some(missing) = document
        .references()
        .into_iter()
        .find(|target| !output.anchors.contains_key(*target))
    {
        return Err(CompileError::DanglingReference(missing.clone()));
    }

    debug_assert!(output.references.iter().all(|r| {
        output.anchors.get(&r.target).map(|p| p.to_string()).as_deref() == Some(r.rendered.as_str())
    }));
    Ok(())
}

fn join(ids: &[AnchorId]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, usize)]) -> AnchorMap {
        entries.iter().map(|(id, page)| (AnchorId::from(*id), *page)).collect()
    }

    #[test]
    fn test_changed_anchors() {
        let previous = map(&[("a", 1), ("b", 2), ("gone", 3)]);
        let current = map(&[("a", 1), ("b", 3), ("new", 4)]);
        let changed = changed_anchors(&previous, &current);
        assert_eq!(
            changed,
            vec![AnchorId::from("b"), AnchorId::from("gone"), AnchorId::from("new")]
        );
        assert!(changed_anchors(&current, &current).is_empty());
    }
}
