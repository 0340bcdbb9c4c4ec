//! Deciding which registered route renders for a path.
//!
//! Resolution runs in two passes so that a fallback can depend on its siblings: the first pass
//! tests every pattern, the second picks the first match in declaration order, or the first
//! fallback when nothing matched.

use tracing::trace;

use crate::{
    route_definition::Params,
    state::{ActiveRoute, RouteEntry, RouteId},
};

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub(crate) active: ActiveRoute,
    pub(crate) params: Params,
}

pub(crate) fn resolve(path: &str, routes: &[RouteEntry]) -> Resolution {
    let outcomes: Vec<(RouteId, Option<Params>)> = routes
        .iter()
        .filter(|route| !route.fallback)
        .map(|route| {
            let params = route.parsed.as_ref().and_then(|p| p.matches(path));
            trace!(path, pattern = route.pattern.as_str(), matched = params.is_some());
            (route.id, params)
        })
        .collect();

    if let Some((id, params)) = outcomes
        .into_iter()
        .find_map(|(id, params)| params.map(|params| (id, params)))
    {
        return Resolution {
            active: ActiveRoute::Matched(id),
            params,
        };
    }

    match routes.iter().find(|route| route.fallback) {
        Some(fallback) => Resolution {
            active: ActiveRoute::Fallback(fallback.id),
            params: Params::new(),
        },
        None => Resolution::default(),
    }
}
