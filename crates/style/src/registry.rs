//! Named, inheritable style sets.
//!
//! Styles are declared once with an optional parent and flattened lazily on
//! first use. A flattened style is cached for the lifetime of the registry, so
//! every layout pass sees the same `Arc<ElementStyle>` for a given name.

use crate::error::StyleError;
use crate::stylesheet::ElementStyle;
use crate::text::TextAlign;
use quire_types::{Color, StyleName};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone)]
struct StyleEntry {
    attrs: ElementStyle,
    parent: Option<StyleName>,
}

#[derive(Debug, Default)]
pub struct StyleRegistry {
    entries: HashMap<StyleName, StyleEntry>,
    resolved: RwLock<HashMap<StyleName, Arc<ElementStyle>>>,
    frozen: AtomicBool,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the usual report styles: `Normal`,
    /// `BodyText`, `Title`, `Heading1`..`Heading3` and `Code`.
    pub fn with_base_styles() -> Self {
        let mut registry = Self::new();
        let defs: Vec<(&str, ElementStyle, Option<&str>)> = vec![
            (
                "Normal",
                ElementStyle::new()
                    .with_font_name("Helvetica")
                    .with_font_size(10.0)
                    .with_leading(12.0)
                    .with_color(Color::BLACK),
                None,
            ),
            (
                "BodyText",
                ElementStyle::new().with_space_before(6.0),
                Some("Normal"),
            ),
            (
                "Title",
                ElementStyle::new()
                    .with_font_name("Helvetica-Bold")
                    .with_font_size(18.0)
                    .with_leading(22.0)
                    .with_text_align(TextAlign::Center)
                    .with_space_after(6.0),
                Some("Normal"),
            ),
            (
                "Heading1",
                ElementStyle::new()
                    .with_font_name("Helvetica-Bold")
                    .with_font_size(18.0)
                    .with_leading(22.0)
                    .with_space_after(6.0)
                    .with_keep_with_next(true),
                Some("Normal"),
            ),
            (
                "Heading2",
                ElementStyle::new()
                    .with_font_name("Helvetica-Bold")
                    .with_font_size(14.0)
                    .with_leading(18.0)
                    .with_space_before(12.0)
                    .with_space_after(6.0)
                    .with_keep_with_next(true),
                Some("Normal"),
            ),
            (
                "Heading3",
                ElementStyle::new()
                    .with_font_name("Helvetica-BoldOblique")
                    .with_font_size(12.0)
                    .with_leading(14.4)
                    .with_space_before(12.0)
                    .with_space_after(6.0)
                    .with_keep_with_next(true),
                Some("Normal"),
            ),
            (
                "Code",
                ElementStyle::new()
                    .with_font_name("Courier")
                    .with_font_size(8.8)
                    .with_leading(10.6)
                    .with_left_indent(36.0),
                Some("Normal"),
            ),
        ];

        for (name, attrs, parent) in defs {
            if let Err(e) = registry.define(name, attrs, parent) {
                log::error!("Base style '{}' rejected: {}", name, e);
            }
        }
        registry
    }

    /// Declares a new style.
    ///
    /// Fails with `RegistryFrozen` after [`finalize`](Self::finalize), with
    /// `DuplicateStyle` if the name is taken, with `UnknownParent` if the parent
    /// has not been declared yet, and with `CyclicParent` if the parent chain
    /// would loop back to `name`.
    pub fn define(
        &mut self,
        name: impl Into<StyleName>,
        attrs: ElementStyle,
        parent: Option<&str>,
    ) -> Result<(), StyleError> {
        let name = name.into();
        if self.is_frozen() {
            return Err(StyleError::RegistryFrozen(name));
        }
        if self.entries.contains_key(&name) {
            return Err(StyleError::DuplicateStyle(name));
        }

        let parent = match parent {
            Some(p) => {
                let parent = StyleName::from(p);
                if parent == name {
                    return Err(StyleError::CyclicParent {
                        style: name.clone(),
                        chain: vec![name.to_string(), name.to_string()],
                    });
                }
                if !self.entries.contains_key(&parent) {
                    return Err(StyleError::UnknownParent { style: name, parent });
                }
                self.check_chain(&name, &parent)?;
                Some(parent)
            }
            None => None,
        };

        log::debug!("Defined style '{}' (parent: {:?})", name, parent.as_ref().map(|p| p.as_str()));
        self.entries.insert(name, StyleEntry { attrs, parent });
        Ok(())
    }

    /// Walks the parent chain starting at `parent`, failing if it reaches `name`.
    fn check_chain(&self, name: &StyleName, parent: &StyleName) -> Result<(), StyleError> {
        let mut chain = vec![name.to_string()];
        let mut current = Some(parent.clone());
        while let Some(p) = current {
            chain.push(p.to_string());
            if &p == name || chain.len() > self.entries.len() + 1 {
                return Err(StyleError::CyclicParent {
                    style: name.clone(),
                    chain,
                });
            }
            current = self.entries.get(&p).and_then(|e| e.parent.clone());
        }
        Ok(())
    }

    /// Returns the fully merged attributes of `name`: the root ancestor first,
    /// each descendant overriding what it sets.
    pub fn resolve(&self, name: &str) -> Result<Arc<ElementStyle>, StyleError> {
        if let Ok(cache) = self.resolved.read()
            && let Some(style) = cache.get(name)
        {
            return Ok(Arc::clone(style));
        }

        let mut lineage = Vec::new();
        let mut current = Some(
            self.entries
                .get_key_value(name)
                .map(|(k, _)| k.clone())
                .ok_or_else(|| StyleError::UnknownStyle(StyleName::from(name)))?,
        );
        while let Some(key) = current {
            let entry = self
                .entries
                .get(&key)
                .ok_or_else(|| StyleError::UnknownStyle(key.clone()))?;
            lineage.push(&entry.attrs);
            current = entry.parent.clone();
        }

        let mut merged = ElementStyle::default();
        for attrs in lineage.iter().rev() {
            merged.apply(attrs);
        }
        let merged = Arc::new(merged);

        if let Ok(mut cache) = self.resolved.write() {
            let entry = cache
                .entry(StyleName::from(name))
                .or_insert_with(|| Arc::clone(&merged));
            return Ok(Arc::clone(entry));
        }
        Ok(merged)
    }

    /// Marks the registry read-only. Calling it again is a no-op.
    pub fn finalize(&self) {
        if !self.frozen.swap(true, Ordering::SeqCst) {
            log::debug!("Style registry finalized with {} styles", self.entries.len());
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::SeqCst)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &StyleName> {
        self.entries.keys()
    }
}
