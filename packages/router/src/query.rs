//! Query string handling.
//!
//! Query strings are parsed with `application/x-www-form-urlencoded` rules (the same rules
//! `URLSearchParams` uses). When a key appears more than once, the **last** occurrence wins.

use std::collections::BTreeMap;

/// Parsed query parameters.
pub type Query = BTreeMap<String, String>;

/// Parse a query string, with or without its leading `?`.
///
/// ```rust
/// # use rsv_router::query::parse_query;
/// let query = parse_query("?bar=baz&n=1&n=2");
/// assert_eq!(query["bar"], "baz");
/// assert_eq!(query["n"], "2");
/// ```
#[must_use]
pub fn parse_query(query: &str) -> Query {
    let query = query.strip_prefix('?').unwrap_or(query);

    form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Serialize query parameters back into a query string without the leading `?`.
#[must_use]
pub fn to_query_string(query: &Query) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query)
        .finish()
}

/// Split a route such as `/foo?bar=baz` into its path and query parts.
pub(crate) fn split_route(route: &str) -> (&str, &str) {
    route.split_once('?').unwrap_or((route, ""))
}

/// Normalize a path: always a leading `/`, no trailing `/` except for the root.
pub(crate) fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        String::from("/")
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Join a path and a query into a route, omitting the `?` when the query is empty.
pub(crate) fn join_route(path: &str, query: &Query) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", to_query_string(query))
    }
}
