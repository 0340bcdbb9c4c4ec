use tracing::{trace, warn};

use super::{Params, RoutePattern};

/// The outcome of testing a path against a pattern.
///
/// `params` is only meaningful when `matched` is [`true`]; it is empty otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    /// Whether the path matched the pattern.
    pub matched: bool,
    /// The values bound by the pattern's dynamic segments.
    pub params: Params,
}

impl RouteMatch {
    pub(crate) fn miss() -> Self {
        Self::default()
    }
}

/// Test `path` against the pattern string `pattern`.
///
/// An invalid pattern never matches; the problem is logged instead of raised.
///
/// ```rust
/// # use rsv_router::prelude::*;
/// let m = match_route("/baz/123", "/baz/:id");
/// assert!(m.matched);
/// assert_eq!(m.params["id"], "123");
///
/// assert!(!match_route("/baz/123", "/baz/:").matched);
/// ```
#[must_use]
pub fn match_route(path: &str, pattern: &str) -> RouteMatch {
    match RoutePattern::parse(pattern) {
        Ok(pattern) => match_pattern(path, &pattern),
        Err(err) => {
            warn!(%err, "treating invalid route pattern as a non-match");
            RouteMatch::miss()
        }
    }
}

/// Test `path` against an already parsed pattern.
#[must_use]
pub fn match_pattern(path: &str, pattern: &RoutePattern) -> RouteMatch {
    let outcome = match pattern.matches(path) {
        Some(params) => RouteMatch {
            matched: true,
            params,
        },
        None => RouteMatch::miss(),
    };

    trace!(path, pattern = %pattern, matched = outcome.matched, "matched route");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_patterns_match_themselves() {
        for pattern in ["/", "/foo", "/foo/bar", "/a/b/c/d"] {
            let m = match_route(pattern, pattern);
            assert!(m.matched, "{pattern} should match itself");
            assert!(m.params.is_empty());
        }
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert!(match_route("/foo/", "/foo").matched);
        assert!(match_route("/foo", "/foo/").matched);
    }

    #[test]
    fn binds_a_single_dynamic_segment() {
        for value in ["1", "abc", "hello-world", "%20"] {
            let m = match_route(&format!("/item/{value}"), "/item/:x");
            assert!(m.matched);
            assert_eq!(m.params["x"], value);
        }
    }

    #[test]
    fn segment_count_must_agree() {
        assert!(!match_route("/", "/foo").matched);
        assert!(!match_route("/foo/bar", "/foo").matched);
        assert!(!match_route("/foo", "/foo/:id").matched);
        assert!(!match_route("/foo/1/2", "/foo/:id").matched);
    }

    #[test]
    fn misses_carry_no_params() {
        let m = match_route("/other/1", "/item/:x");
        assert_eq!(m, RouteMatch::default());
    }

    #[test]
    fn binds_several_segments() {
        let m = match_route("/users/7/posts/42", "/users/:user/posts/:post");
        assert!(m.matched);
        assert_eq!(m.params.len(), 2);
        assert_eq!(m.params["user"], "7");
        assert_eq!(m.params["post"], "42");
    }
}
