use std::fmt;

/// Error codes surfaced to clients when a query string cannot be translated.
///
/// The code strings are part of the HTTP contract: they appear verbatim in
/// 400 response bodies alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    InvalidOrderQuery,
    InvalidFilterQuery,
    InvalidFilterValue,
    InvalidPaginationValue,
    InvalidFilterField,
}

impl QueryErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidOrderQuery => "InvalidOrderQuery",
            Self::InvalidFilterQuery => "InvalidFilterQuery",
            Self::InvalidFilterValue => "InvalidFilterValue",
            Self::InvalidPaginationValue => "InvalidPaginationValue",
            Self::InvalidFilterField => "InvalidFilterField",
        }
    }
}

/// A malformed or unauthorized query. Always a client error, never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub code: QueryErrorCode,
    pub message: String,
}

impl QueryError {
    pub fn new(code: QueryErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The rejection raised when a filter names a field outside the
    /// resource's whitelist.
    #[must_use]
    pub fn filter_field_not_allowed() -> Self {
        Self::new(
            QueryErrorCode::InvalidFilterField,
            "Filter Field does not belong to Entity",
        )
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for QueryError {}

/// Comparison applied by a single filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperation {
    Eq,
    IsNull,
    In,
    NotIn,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterOperation {
    /// Maps an operation token case-insensitively. Unrecognized tokens fall
    /// back to equality rather than failing.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "is_null" => Self::IsNull,
            "in" => Self::In,
            "not_in" => Self::NotIn,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            _ => Self::Eq,
        }
    }
}

/// Sort direction for the `order` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    /// Maps a direction token case-insensitively. `dsc` is accepted as a
    /// spelling of descending; unrecognized tokens fall back to ascending.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "desc" | "dsc" => Self::Desc,
            _ => Self::Asc,
        }
    }
}

/// Filter value, shaped by the operation that carries it.
///
/// The translator performs no numeric or date coercion; scalar values stay
/// strings and the data layer decides how to bind them.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    List(Vec<String>),
    Bool(bool),
}

/// One `field`/`operation`/`value` constraint. The field name is raw and
/// unvalidated; the whitelist gate decides whether it may be used.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub field: String,
    pub operation: FilterOperation,
    pub value: FilterValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderClause {
    pub field: String,
    pub direction: OrderDirection,
}

/// Structured search/filter/sort/paginate intent for one request.
///
/// Transient: built per request, handed to the data layer, discarded.
/// `filters` preserves the order the keys arrived in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDescriptor {
    pub search: Option<String>,
    pub filters: Vec<FilterClause>,
    pub order: Option<OrderClause>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

const KEY_SEPARATOR: &str = "__";

/// Parses an ordered sequence of decoded query pairs into a descriptor.
///
/// Repeated `search`/`limit`/`offset`/`order` keys overwrite (last wins);
/// repeated filter keys accumulate in arrival order.
///
/// # Errors
///
/// Returns a [`QueryError`] when the `order` value or a filter key contains
/// more than one `__` separator, when an `is_null` value is not a boolean
/// literal, or when `limit`/`offset` is not a non-negative decimal integer.
pub fn parse_query_params<'a, I>(pairs: I) -> Result<QueryDescriptor, QueryError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut descriptor = QueryDescriptor::default();

    for (key, value) in pairs {
        match key {
            "search" => descriptor.search = Some(value.to_string()),
            "limit" => descriptor.limit = Some(parse_page_bound("limit", value)?),
            "offset" => descriptor.offset = Some(parse_page_bound("offset", value)?),
            "order" => descriptor.order = Some(parse_order_clause(value)?),
            _ => descriptor.filters.push(parse_filter_clause(key, value)?),
        }
    }

    Ok(descriptor)
}

/// Decodes a raw query string and feeds the pairs to [`parse_query_params`]
/// in wire order.
///
/// # Errors
///
/// Propagates any [`QueryError`] from [`parse_query_params`].
pub fn parse_query_string(raw: &str) -> Result<QueryDescriptor, QueryError> {
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(raw.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    parse_query_params(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

fn parse_page_bound(key: &str, value: &str) -> Result<u64, QueryError> {
    value.parse().map_err(|_| {
        QueryError::new(
            QueryErrorCode::InvalidPaginationValue,
            format!("Expected non-negative integer for {key}"),
        )
    })
}

fn parse_order_clause(value: &str) -> Result<OrderClause, QueryError> {
    let parts: Vec<&str> = value.split(KEY_SEPARATOR).collect();
    if parts.len() > 2 {
        return Err(QueryError::new(
            QueryErrorCode::InvalidOrderQuery,
            "Too many arguments",
        ));
    }

    // An empty direction token ("name__") behaves like an absent one.
    let direction = match parts.get(1) {
        Some(token) if !token.is_empty() => OrderDirection::from_token(token),
        _ => OrderDirection::Asc,
    };

    Ok(OrderClause {
        field: parts[0].to_string(),
        direction,
    })
}

fn parse_filter_clause(key: &str, value: &str) -> Result<FilterClause, QueryError> {
    let parts: Vec<&str> = key.split(KEY_SEPARATOR).collect();
    if parts.len() > 2 {
        return Err(QueryError::new(
            QueryErrorCode::InvalidFilterQuery,
            "Too many arguments",
        ));
    }

    let field = parts[0].to_string();
    let operation = match parts.get(1) {
        Some(token) if !token.is_empty() => FilterOperation::from_token(token),
        _ => {
            // Bare key: plain equality on the raw value.
            return Ok(FilterClause {
                field,
                operation: FilterOperation::Eq,
                value: FilterValue::Text(value.to_string()),
            });
        }
    };

    let value = match operation {
        FilterOperation::IsNull => match value.to_lowercase().as_str() {
            "true" => FilterValue::Bool(true),
            "false" => FilterValue::Bool(false),
            _ => {
                return Err(QueryError::new(
                    QueryErrorCode::InvalidFilterValue,
                    format!("Expected Filter Value true/false for {key}"),
                ));
            }
        },
        FilterOperation::In | FilterOperation::NotIn => {
            // No trimming, no dedup: the list is passed through as-is.
            FilterValue::List(value.split(',').map(str::to_string).collect())
        }
        _ => FilterValue::Text(value.to_string()),
    };

    Ok(FilterClause {
        field,
        operation,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pairs: &[(&str, &str)]) -> Result<QueryDescriptor, QueryError> {
        parse_query_params(pairs.iter().copied())
    }

    #[test]
    fn test_empty_input_yields_default_descriptor() {
        let descriptor = parse(&[]).unwrap();
        assert_eq!(descriptor, QueryDescriptor::default());
    }

    #[test]
    fn test_search_is_kept_verbatim() {
        let descriptor = parse(&[("search", "fluffy the 3rd")]).unwrap();
        assert_eq!(descriptor.search.as_deref(), Some("fluffy the 3rd"));
    }

    #[test]
    fn test_limit_and_offset_parse_decimal_values() {
        let descriptor = parse(&[("limit", "25"), ("offset", "50")]).unwrap();
        assert_eq!(descriptor.limit, Some(25));
        assert_eq!(descriptor.offset, Some(50));
    }

    #[test]
    fn test_invalid_limit_is_rejected() {
        let err = parse(&[("limit", "abc")]).unwrap_err();
        assert_eq!(err.code, QueryErrorCode::InvalidPaginationValue);

        let err = parse(&[("offset", "-3")]).unwrap_err();
        assert_eq!(err.code, QueryErrorCode::InvalidPaginationValue);
    }

    #[test]
    fn test_order_with_direction() {
        let descriptor = parse(&[("order", "name__desc")]).unwrap();
        let order = descriptor.order.unwrap();
        assert_eq!(order.field, "name");
        assert_eq!(order.direction, OrderDirection::Desc);
    }

    #[test]
    fn test_order_without_direction_defaults_to_asc() {
        let descriptor = parse(&[("order", "name")]).unwrap();
        let order = descriptor.order.unwrap();
        assert_eq!(order.field, "name");
        assert_eq!(order.direction, OrderDirection::Asc);
    }

    #[test]
    fn test_order_direction_tokens_are_case_insensitive() {
        for token in ["asc", "ASC", "Asc"] {
            let descriptor = parse(&[("order", &*format!("name__{token}"))]).unwrap();
            assert_eq!(descriptor.order.unwrap().direction, OrderDirection::Asc);
        }
        for token in ["desc", "DESC", "dsc", "DSC"] {
            let descriptor = parse(&[("order", &*format!("name__{token}"))]).unwrap();
            assert_eq!(descriptor.order.unwrap().direction, OrderDirection::Desc);
        }
    }

    #[test]
    fn test_unknown_order_direction_defaults_to_asc() {
        let descriptor = parse(&[("order", "name__sideways")]).unwrap();
        assert_eq!(descriptor.order.unwrap().direction, OrderDirection::Asc);
    }

    #[test]
    fn test_order_with_too_many_separators_is_rejected() {
        let err = parse(&[("order", "a__b__c")]).unwrap_err();
        assert_eq!(err.code, QueryErrorCode::InvalidOrderQuery);
        assert_eq!(err.message, "Too many arguments");
    }

    #[test]
    fn test_bare_filter_key_means_equality() {
        let descriptor = parse(&[("name", "Rex")]).unwrap();
        assert_eq!(
            descriptor.filters,
            vec![FilterClause {
                field: "name".to_string(),
                operation: FilterOperation::Eq,
                value: FilterValue::Text("Rex".to_string()),
            }]
        );
    }

    #[test]
    fn test_comparison_filter() {
        let descriptor = parse(&[("age__gt", "3")]).unwrap();
        assert_eq!(
            descriptor.filters,
            vec![FilterClause {
                field: "age".to_string(),
                operation: FilterOperation::Gt,
                value: FilterValue::Text("3".to_string()),
            }]
        );
    }

    #[test]
    fn test_all_operation_tokens_map_case_insensitively() {
        let cases = [
            ("eq", FilterOperation::Eq),
            ("is_null", FilterOperation::IsNull),
            ("in", FilterOperation::In),
            ("not_in", FilterOperation::NotIn),
            ("gt", FilterOperation::Gt),
            ("gte", FilterOperation::Gte),
            ("lt", FilterOperation::Lt),
            ("lte", FilterOperation::Lte),
        ];
        for (token, expected) in cases {
            assert_eq!(FilterOperation::from_token(token), expected);
            assert_eq!(
                FilterOperation::from_token(&token.to_uppercase()),
                expected
            );
        }
    }

    #[test]
    fn test_unknown_operation_token_defaults_to_eq() {
        let descriptor = parse(&[("name__like", "Rex")]).unwrap();
        assert_eq!(descriptor.filters[0].operation, FilterOperation::Eq);
        assert_eq!(
            descriptor.filters[0].value,
            FilterValue::Text("Rex".to_string())
        );
    }

    #[test]
    fn test_in_filter_splits_on_commas_without_trimming() {
        let descriptor = parse(&[("species__in", "cat,dog, bird")]).unwrap();
        assert_eq!(
            descriptor.filters[0].value,
            FilterValue::List(vec![
                "cat".to_string(),
                "dog".to_string(),
                " bird".to_string(),
            ])
        );
    }

    #[test]
    fn test_is_null_filter_requires_boolean_literal() {
        let descriptor = parse(&[("end_date__is_null", "true")]).unwrap();
        assert_eq!(descriptor.filters[0].value, FilterValue::Bool(true));

        let descriptor = parse(&[("end_date__is_null", "FALSE")]).unwrap();
        assert_eq!(descriptor.filters[0].value, FilterValue::Bool(false));

        let err = parse(&[("end_date__is_null", "maybe")]).unwrap_err();
        assert_eq!(err.code, QueryErrorCode::InvalidFilterValue);
        assert_eq!(
            err.message,
            "Expected Filter Value true/false for end_date__is_null"
        );
    }

    #[test]
    fn test_filter_key_with_too_many_separators_is_rejected() {
        let err = parse(&[("name__eq__extra", "x")]).unwrap_err();
        assert_eq!(err.code, QueryErrorCode::InvalidFilterQuery);
        assert_eq!(err.message, "Too many arguments");
    }

    #[test]
    fn test_filters_preserve_input_order() {
        let descriptor = parse(&[
            ("species", "cat"),
            ("age__gte", "1"),
            ("name__in", "a,b"),
        ])
        .unwrap();
        let fields: Vec<&str> = descriptor
            .filters
            .iter()
            .map(|f| f.field.as_str())
            .collect();
        assert_eq!(fields, vec!["species", "age", "name"]);
    }

    #[test]
    fn test_mixed_query_with_all_key_kinds() {
        let descriptor = parse(&[
            ("search", "terrier"),
            ("age__lte", "7"),
            ("order", "age__desc"),
            ("limit", "5"),
            ("offset", "10"),
        ])
        .unwrap();
        assert_eq!(descriptor.search.as_deref(), Some("terrier"));
        assert_eq!(descriptor.filters.len(), 1);
        assert_eq!(descriptor.order.unwrap().field, "age");
        assert_eq!(descriptor.limit, Some(5));
        assert_eq!(descriptor.offset, Some(10));
    }

    #[test]
    fn test_repeated_scalar_keys_last_wins() {
        let descriptor = parse(&[("limit", "5"), ("limit", "20")]).unwrap();
        assert_eq!(descriptor.limit, Some(20));
    }

    #[test]
    fn test_parse_query_string_decodes_and_preserves_order() {
        let descriptor =
            parse_query_string("search=big%20dog&species__in=cat,dog&age__gt=2").unwrap();
        assert_eq!(descriptor.search.as_deref(), Some("big dog"));
        let fields: Vec<&str> = descriptor
            .filters
            .iter()
            .map(|f| f.field.as_str())
            .collect();
        assert_eq!(fields, vec!["species", "age"]);
    }

    #[test]
    fn test_parse_query_string_empty() {
        assert_eq!(parse_query_string("").unwrap(), QueryDescriptor::default());
    }
}
