//! Shared application state: cheap `Clone` handles only.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::api;
use crate::config::Config;
use crate::query::FilterFieldRegistry;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub filter_fields: Arc<FilterFieldRegistry>,
}

impl AppState {
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        config: Arc<Config>,
        filter_fields: Arc<FilterFieldRegistry>,
    ) -> Self {
        Self {
            db,
            config,
            filter_fields,
        }
    }
}

/// Registers the filter whitelist of every resource. Called once during
/// startup; population must complete before the listener accepts requests.
#[must_use]
pub fn default_filter_registry() -> FilterFieldRegistry {
    let mut registry = FilterFieldRegistry::new();
    registry.register(api::users::RESOURCE, api::users::FILTER_FIELDS);
    registry.register(api::pets::RESOURCE, api::pets::FILTER_FIELDS);
    registry.register(api::clients::RESOURCE, api::clients::FILTER_FIELDS);
    registry.register(api::fosters::RESOURCE, api::fosters::FILTER_FIELDS);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_resource_is_registered() {
        let registry = default_filter_registry();
        for resource in ["users", "pets", "clients", "fosters"] {
            assert!(
                registry.allowed_fields(resource).is_some(),
                "{resource} missing from registry"
            );
        }
    }

    #[test]
    fn test_sensitive_user_columns_are_not_filterable() {
        let registry = default_filter_registry();
        let allowed = registry.allowed_fields("users").unwrap();
        assert!(!allowed.contains("password"));
        assert!(!allowed.contains("search_vector"));
        assert!(allowed.contains("email"));
    }
}
