//! Query-string translation for collection endpoints.
//!
//! Every collection `GET` accepts the same grammar:
//!
//! - `search=term` — free-text search against the resource's search index
//! - `order=field__asc`, `order=field__desc`, or `order=field` (implicit
//!   ascending)
//! - `limit=n` / `offset=n` — pagination
//! - anything else is a filter: `field__operation=value`, e.g. `age__gte=3`,
//!   `species__in=cat,dog`, `end_date__is_null=true`, or bare `field=value`
//!   meaning equality
//!
//! [`parser`] turns the raw pairs into a [`QueryDescriptor`], [`whitelist`]
//! decides whether the named fields may be filtered on at all, and
//! [`conditions`] translates the descriptor into Sea-ORM terms. The parser
//! and whitelist are pure and backend-agnostic; only [`conditions`] knows
//! about SQL.

pub mod conditions;
pub mod parser;
pub mod whitelist;

pub use conditions::{DEFAULT_PAGE_SIZE, apply_query, build_condition};
pub use parser::{
    FilterClause, FilterOperation, FilterValue, OrderClause, OrderDirection, QueryDescriptor,
    QueryError, QueryErrorCode, parse_query_params, parse_query_string,
};
pub use whitelist::{FilterFieldRegistry, validate_filters};
