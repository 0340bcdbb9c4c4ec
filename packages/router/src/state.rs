use tracing::warn;

use crate::{
    query::{normalize_path, Query},
    route_definition::{Params, RoutePattern},
};

/// Identifies a route registered with a [`Router`](crate::components::Router).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteId(pub(crate) usize);

/// Which registered route the current path selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActiveRoute {
    /// Nothing matched and no fallback is registered.
    #[default]
    None,
    /// The first route, in declaration order, whose pattern matched.
    Matched(RouteId),
    /// No route matched; the first fallback route is active.
    Fallback(RouteId),
}

impl ActiveRoute {
    /// The id of the active route, if any.
    pub fn id(&self) -> Option<RouteId> {
        match self {
            Self::Matched(id) | Self::Fallback(id) => Some(*id),
            Self::None => None,
        }
    }
}

/// A pattern registered by a mounted route.
#[derive(Clone, Debug)]
pub(crate) struct RouteEntry {
    pub(crate) id: RouteId,
    pub(crate) pattern: String,
    /// [`None`] for fallback routes and for patterns that failed to parse.
    pub(crate) parsed: Option<RoutePattern>,
    pub(crate) fallback: bool,
}

impl RouteEntry {
    pub(crate) fn new(id: RouteId, pattern: &str, fallback: bool) -> Self {
        let parsed = match fallback {
            true => None,
            false => RoutePattern::parse(pattern)
                .map_err(|err| warn!(%err, "registered route can never match"))
                .ok(),
        };

        Self {
            id,
            pattern: pattern.to_string(),
            parsed,
            fallback,
        }
    }
}

/// The current routing information.
#[derive(Clone, Debug)]
pub struct RouterState {
    /// The current path, normalized and without the query.
    pub path: String,

    /// The parsed query parameters.
    pub query: Query,

    /// The parameters bound by the active route. Empty unless a dynamic route is active.
    pub params: Params,

    /// The route selected for the current path.
    pub active: ActiveRoute,

    pub(crate) routes: Vec<RouteEntry>,
}

impl Default for RouterState {
    fn default() -> Self {
        Self {
            path: String::from("/"),
            query: Query::new(),
            params: Params::new(),
            active: ActiveRoute::None,
            routes: Vec::new(),
        }
    }
}

impl RouterState {
    /// The patterns of all registered routes, in declaration order.
    pub fn routes(&self) -> Vec<String> {
        self.routes.iter().map(|r| r.pattern.clone()).collect()
    }

    /// Checks if the provided `target` path is currently active.
    ///
    /// If `exact` is [`true`], the current path must equal `target` after normalization.
    ///
    /// If `exact` is [`false`], `target` must be the current path or one of its ancestors, so
    /// `/users` is active for `/users/1` but not for `/users-admin`.
    ///
    /// The query is ignored.
    #[must_use]
    pub fn is_active(&self, target: &str, exact: bool) -> bool {
        let target = target.split_once('?').map_or(target, |(path, _)| path);
        let target = normalize_path(target);

        if exact {
            return self.path == target;
        }
        if target == "/" {
            return true;
        }

        self.path == target
            || self
                .path
                .strip_prefix(&target)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}
