use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query parameters accepted by every collection endpoint.
///
/// Beyond the fixed keys below, any other key is a filter of the form
/// `field=value` or `field__operation=value`, where `operation` is one of
/// `eq`, `is_null`, `in`, `not_in`, `gt`, `gte`, `lt`, `lte`:
///
/// - `age__gte=3` — comparison against a column
/// - `species__in=cat,dog` — membership in a comma-separated list
/// - `end_date__is_null=true` — null check (`true`/`false`)
///
/// Filterable fields are limited to the resource's public attributes;
/// anything else is rejected with a 400.
#[derive(Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Free-text search term matched against the resource's search index.
    pub search: Option<String>,
    /// Sort order: `field__asc`, `field__desc`, or bare `field` (ascending).
    pub order: Option<String>,
    /// Maximum number of rows to return. Defaults to 10.
    pub limit: Option<u64>,
    /// Number of rows to skip.
    pub offset: Option<u64>,
}
