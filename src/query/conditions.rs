use sea_orm::{
    Condition, DatabaseBackend, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select, Value,
    sea_query::{Alias, Expr, Order, SimpleExpr},
};

use super::parser::{
    FilterClause, FilterOperation, FilterValue, OrderDirection, QueryDescriptor,
};

/// Rows returned when a request does not name a limit.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

impl From<OrderDirection> for Order {
    fn from(direction: OrderDirection) -> Self {
        match direction {
            OrderDirection::Asc => Self::Asc,
            OrderDirection::Desc => Self::Desc,
        }
    }
}

/// Escape LIKE wildcards so user input cannot widen a pattern.
fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Search predicate for the free-text `search` term.
///
/// On Postgres this matches the prefix-extended term against the
/// database-maintained `search_vector` column. Other backends (tests run on
/// SQLite) fall back to a case-insensitive LIKE over the resource's public
/// text columns.
fn search_expr(term: &str, backend: DatabaseBackend, search_columns: &[&str]) -> SimpleExpr {
    if backend == DatabaseBackend::Postgres {
        return Expr::cust_with_values(
            "search_vector @@ to_tsquery('simple', ? || ':*')",
            [term.to_string()],
        );
    }

    let concat_sql = search_columns
        .iter()
        .map(|name| format!("CAST({name} AS TEXT)"))
        .collect::<Vec<_>>()
        .join(" || ' ' || ");
    let escaped_term = escape_like_wildcards(term).replace('\'', "''");
    SimpleExpr::Custom(format!(
        "UPPER({concat_sql}) LIKE UPPER('%{escaped_term}%') ESCAPE '\\'"
    ))
}

/// Binds a scalar filter value, sniffing the type the way the raw string
/// reads: integer, then float, then boolean, otherwise text. The translator
/// deliberately leaves values as strings; this is where they meet column
/// types.
fn bind_scalar(raw: &str) -> Value {
    if let Ok(int_value) = raw.parse::<i64>() {
        return int_value.into();
    }
    if let Ok(float_value) = raw.parse::<f64>() {
        return float_value.into();
    }
    match raw.to_lowercase().as_str() {
        "true" => true.into(),
        "false" => false.into(),
        _ => raw.to_string().into(),
    }
}

/// Binds an `IN`/`NOT IN` list: all-integer when every element parses,
/// otherwise text.
fn bind_list(items: &[String]) -> Vec<Value> {
    let ints: Option<Vec<i64>> = items.iter().map(|item| item.parse().ok()).collect();
    match ints {
        Some(ints) => ints.into_iter().map(Value::from).collect(),
        None => items.iter().map(|item| item.clone().into()).collect(),
    }
}

fn filter_expr(clause: &FilterClause) -> SimpleExpr {
    // Field names have passed the whitelist gate before reaching this point;
    // they are emitted as quoted identifiers, never interpolated.
    let column = Expr::col(Alias::new(clause.field.as_str()));

    match (&clause.operation, &clause.value) {
        (FilterOperation::IsNull, FilterValue::Bool(true)) => column.is_null(),
        (FilterOperation::IsNull, FilterValue::Bool(_)) => column.is_not_null(),
        (FilterOperation::In, FilterValue::List(items)) => column.is_in(bind_list(items)),
        (FilterOperation::NotIn, FilterValue::List(items)) => column.is_not_in(bind_list(items)),
        (operation, FilterValue::Text(raw)) => {
            let value = bind_scalar(raw);
            match operation {
                FilterOperation::Gt => column.gt(value),
                FilterOperation::Gte => column.gte(value),
                FilterOperation::Lt => column.lt(value),
                FilterOperation::Lte => column.lte(value),
                _ => column.eq(value),
            }
        }
        // Operation/value shape mismatches cannot be produced by the parser.
        _ => column.eq(clause.field.clone()),
    }
}

/// Builds the WHERE condition for a validated descriptor. Filters combine
/// with AND, in input order.
#[must_use]
pub fn build_condition(
    descriptor: &QueryDescriptor,
    backend: DatabaseBackend,
    search_columns: &[&str],
) -> Condition {
    let mut condition = Condition::all();

    if let Some(term) = &descriptor.search {
        condition = condition.add(search_expr(term, backend, search_columns));
    }
    for clause in &descriptor.filters {
        condition = condition.add(filter_expr(clause));
    }

    condition
}

/// Applies a validated descriptor to a select: filters, sort, and
/// pagination. `search_columns` names the public text columns used by the
/// non-Postgres search fallback.
#[must_use]
pub fn apply_query<E: EntityTrait>(
    select: Select<E>,
    descriptor: &QueryDescriptor,
    backend: DatabaseBackend,
    search_columns: &[&str],
) -> Select<E> {
    let mut select = select.filter(build_condition(descriptor, backend, search_columns));

    if let Some(order) = &descriptor.order {
        let column: SimpleExpr = Expr::col(Alias::new(order.field.as_str())).into();
        select = select.order_by(column, order.direction.into());
    }
    if let Some(offset) = descriptor.offset {
        select = select.offset(offset);
    }

    select.limit(descriptor.limit.unwrap_or(DEFAULT_PAGE_SIZE))
}
