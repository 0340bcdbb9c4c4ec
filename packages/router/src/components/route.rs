use std::{fmt, rc::Rc};

use crate::{
    contexts::RouterContext,
    route_definition::{match_route, RouteMatch},
};

/// The pattern that marks a [`Route`] as a fallback.
pub const FALLBACK_PATTERN: &str = "*";

/// A route: a pattern and the content to render while it is active.
///
/// Content is produced by a closure receiving the [`RouterContext`], so any view type works:
///
/// ```rust
/// # use rsv_router::prelude::*;
/// let route: Route<String> = Route::new("/baz/:id", |ctx| {
///     format!("item {}", ctx.get_param("id").unwrap_or_default())
/// });
/// let fallback: Route<String> = Route::fallback(|_| String::from("Fallback route"));
/// assert!(fallback.is_fallback());
/// ```
pub struct Route<V> {
    pattern: String,
    fallback: bool,
    view: Rc<dyn Fn(&RouterContext) -> V>,
}

impl<V> Route<V> {
    /// Create a route that renders `view` when `pattern` matches.
    ///
    /// The pattern `*` creates a fallback route, like [`Route::fallback`].
    pub fn new(pattern: impl Into<String>, view: impl Fn(&RouterContext) -> V + 'static) -> Self {
        let pattern = pattern.into();

        Self {
            fallback: pattern == FALLBACK_PATTERN,
            pattern,
            view: Rc::new(view),
        }
    }

    /// Create a route that renders `view` only when no sibling route matches.
    pub fn fallback(view: impl Fn(&RouterContext) -> V + 'static) -> Self {
        Self::new(FALLBACK_PATTERN, view)
    }

    /// The declared pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether this is a fallback route.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Test this route's own pattern against the context's current path.
    ///
    /// Fallback routes never match on their own; the router activates them when no sibling does.
    pub fn evaluate(&self, ctx: &RouterContext) -> RouteMatch {
        match self.fallback {
            true => RouteMatch::default(),
            false => match_route(&ctx.path(), &self.pattern),
        }
    }

    /// Render the route's content.
    pub fn render(&self, ctx: &RouterContext) -> V {
        (self.view)(ctx)
    }
}

impl<V> Clone for Route<V> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            fallback: self.fallback,
            view: self.view.clone(),
        }
    }
}

impl<V> fmt::Debug for Route<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}
