//! Template registry: the ordered, startup-built template list.
//!
//! Explicitly constructed and passed in by the caller (no process-wide
//! singleton), so tests and multi-tenant hosts can hold several registries
//! side by side. Written once, read-only thereafter; safe to share across
//! concurrent print jobs without locking.

use super::{article, package, LabelTemplate};
use tracing::debug;

/// An ordered collection of named templates with deterministic fallback.
pub struct TemplateRegistry {
    templates: Vec<LabelTemplate>,
}

impl TemplateRegistry {
    /// Build a registry from an ordered template list. Registration order is
    /// significant only for the fallback: an unknown or omitted id resolves
    /// to the first registered template.
    ///
    /// Panics if the list is empty; a registry without a fallback target is
    /// an authoring error.
    pub fn new(templates: Vec<LabelTemplate>) -> Self {
        assert!(
            !templates.is_empty(),
            "a template registry needs at least one template"
        );
        TemplateRegistry { templates }
    }

    /// The five shelf-label templates, standard format first.
    pub fn standard() -> Self {
        Self::new(vec![
            article::standard_69x25(),
            article::small_50x25(),
            article::compact_25x25(),
            article::mousetail_63x12(),
            article::small_38x25(),
        ])
    }

    /// The shelf templates plus the parcel template, for hosts that drive
    /// both the inventory and the shipping flow.
    pub fn with_package() -> Self {
        let mut registry = Self::standard();
        registry.templates.push(package::package_4x6());
        registry
    }

    /// Look up a template by id. An omitted or unknown id resolves to the
    /// first registered template; callers that need strict matching compare
    /// the resolved id themselves.
    pub fn get(&self, id: Option<&str>) -> &LabelTemplate {
        match id.and_then(|id| self.templates.iter().find(|t| t.id == id)) {
            Some(template) => template,
            None => {
                let fallback = &self.templates[0];
                if let Some(requested) = id {
                    debug!(requested, resolved = fallback.id, "template fallback");
                }
                fallback
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
