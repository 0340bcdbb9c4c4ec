use std::{fmt, rc::Rc};

use rsv_history::{History, ListenerId};
use tracing::debug;

use crate::{
    components::Route,
    contexts::{RouterContext, RouterPhase},
    error::RouterError,
    router_cfg::RouterConfig,
    state::RouteId,
};

/// The root of the routing tree.
///
/// A [`Router`] owns its [`Route`]s and the [`RouterContext`] they read from. Once
/// [mounted](Router::mount) it listens for navigation notifications on its [`History`], re-reads
/// the location, resolves the routes and republishes the context. [`Router::render`] renders the
/// first matching route, or the fallback when nothing matched.
///
/// ```rust
/// # use rsv_router::prelude::*;
/// # use rsv_history::MemoryHistory;
/// let mut router = Router::new(MemoryHistory::default().shared())
///     .route(Route::new("/", |_| "Home"))
///     .route(Route::new("/about", |_| "About"))
///     .route(Route::fallback(|_| "Not found"));
/// router.mount().unwrap();
///
/// assert_eq!(router.render(), Some("Home"));
///
/// router.context().navigate("/about", NavigateOptions::default());
/// assert_eq!(router.render(), Some("About"));
///
/// router.context().navigate("/nowhere", NavigateOptions::default());
/// assert_eq!(router.render(), Some("Not found"));
/// ```
pub struct Router<V> {
    context: RouterContext,
    routes: Vec<(RouteId, Route<V>)>,
    next_id: usize,
    listener: Option<ListenerId>,
}

impl<V> Router<V> {
    /// Create a router with the default [`RouterConfig`].
    pub fn new(history: Rc<dyn History>) -> Self {
        Self::with_config(history, RouterConfig::default())
    }

    /// Create a router with a custom [`RouterConfig`].
    pub fn with_config(history: Rc<dyn History>, cfg: RouterConfig) -> Self {
        Self {
            context: RouterContext::new(history, cfg),
            routes: Vec::new(),
            next_id: 0,
            listener: None,
        }
    }

    /// Declare a route. Routes are evaluated in declaration order.
    pub fn route(mut self, route: Route<V>) -> Self {
        self.add_route(route);
        self
    }

    /// Declare a route, mounting it right away if the router is active.
    pub fn add_route(&mut self, route: Route<V>) -> RouteId {
        let id = RouteId(self.next_id);
        self.next_id += 1;

        if self.phase() == RouterPhase::Active {
            self.context
                .register_route(id, route.pattern(), route.is_fallback());
            self.routes.push((id, route));
            self.context.refresh();
        } else {
            self.routes.push((id, route));
        }

        id
    }

    /// Remove a route, unmounting it if the router is active.
    pub fn remove_route(&mut self, id: RouteId) -> Option<Route<V>> {
        let index = self.routes.iter().position(|(rid, _)| *rid == id)?;
        let (_, route) = self.routes.remove(index);

        if self.phase() == RouterPhase::Active {
            self.context.unregister_route(id);
            self.context.refresh();
        }

        Some(route)
    }

    /// Start listening for navigations and route the current location.
    pub fn mount(&mut self) -> Result<(), RouterError> {
        match self.phase() {
            RouterPhase::Uninitialized => {}
            RouterPhase::Active => return Err(RouterError::AlreadyMounted),
            RouterPhase::TornDown => return Err(RouterError::TornDown),
        }

        for (id, route) in &self.routes {
            self.context
                .register_route(*id, route.pattern(), route.is_fallback());
        }

        let listener = self.context.history().listen(self.context.listener());
        self.listener = Some(listener);
        self.context.set_phase(RouterPhase::Active);
        debug!(routes = self.routes.len(), mode = %self.context.mode(), "router mounted");

        self.context.refresh();
        Ok(())
    }

    /// Stop listening for navigations. The context keeps its last state.
    pub fn unmount(&mut self) -> Result<(), RouterError> {
        match self.phase() {
            RouterPhase::Active => {}
            RouterPhase::Uninitialized => return Err(RouterError::NotMounted),
            RouterPhase::TornDown => return Err(RouterError::TornDown),
        }

        if let Some(listener) = self.listener.take() {
            self.context.history().unlisten(listener);
        }
        self.context.set_phase(RouterPhase::TornDown);
        debug!("router unmounted");

        Ok(())
    }

    /// The lifecycle phase.
    pub fn phase(&self) -> RouterPhase {
        self.context.phase()
    }

    /// The context shared with the routes.
    pub fn context(&self) -> RouterContext {
        self.context.clone()
    }

    /// The declared routes, in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<V>> {
        self.routes.iter().map(|(_, route)| route)
    }

    /// Render the active route, if any.
    ///
    /// Returns [`None`] before the router is mounted, and when no route matched and no fallback
    /// is declared.
    pub fn render(&self) -> Option<V> {
        let id = self.context.active().id()?;
        let (_, route) = self.routes.iter().find(|(rid, _)| *rid == id)?;

        Some(route.render(&self.context))
    }
}

impl<V> Drop for Router<V> {
    fn drop(&mut self) {
        if self.phase() == RouterPhase::Active {
            let _ = self.unmount();
        }
    }
}

impl<V> fmt::Debug for Router<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("context", &self.context)
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}
