use std::collections::{HashMap, HashSet};

use super::parser::QueryDescriptor;

/// Process-wide registry of the field names each resource permits filtering
/// on.
///
/// Populated once during startup, before the listener accepts requests, and
/// read-only afterwards. Lists are declared statically next to each
/// resource's DTO so the exposed surface is auditable: internal columns
/// (password hashes, search index columns) are simply never listed.
#[derive(Debug, Default)]
pub struct FilterFieldRegistry {
    fields: HashMap<&'static str, HashSet<&'static str>>,
}

impl FilterFieldRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the filterable fields for a resource. The first
    /// registration wins; calling again for the same resource is a no-op.
    pub fn register(&mut self, resource: &'static str, fields: &[&'static str]) {
        self.fields
            .entry(resource)
            .or_insert_with(|| fields.iter().copied().collect());
    }

    #[must_use]
    pub fn allowed_fields(&self, resource: &str) -> Option<&HashSet<&'static str>> {
        self.fields.get(resource)
    }
}

/// Returns `false` iff any filter clause names a field outside the allowed
/// set. An empty filter list always validates; the caller decides how to
/// react to a rejection.
#[must_use]
pub fn validate_filters(descriptor: &QueryDescriptor, allowed: &HashSet<&'static str>) -> bool {
    descriptor
        .filters
        .iter()
        .all(|filter| allowed.contains(filter.field.as_str()))
}
