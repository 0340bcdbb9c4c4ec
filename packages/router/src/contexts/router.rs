use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use rsv_history::{History, ListenerId, Listeners};
use tracing::{debug, warn};

use crate::{
    navigation::{NavigateOptions, Navigator},
    query::{join_route, normalize_path, parse_query, split_route, Query},
    resolve::resolve,
    route_definition::Params,
    router_cfg::{RouterConfig, RouterMode},
    state::{ActiveRoute, RouteEntry, RouteId, RouterState},
};

/// How many times an `on_update` callback may redirect during a single update.
const MAX_REDIRECTS: usize = 8;

/// The lifecycle of a [`Router`](crate::components::Router).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RouterPhase {
    /// Created but not listening for navigations yet.
    #[default]
    Uninitialized,
    /// Listening for navigations and updating the context.
    Active,
    /// Unmounted. The context stays readable but no longer changes.
    TornDown,
}

struct RouterInner {
    state: RefCell<RouterState>,
    history: Rc<dyn History>,
    cfg: RouterConfig,
    phase: Cell<RouterPhase>,
    subscribers: RefCell<Listeners>,
}

/// The state a [`Router`](crate::components::Router) shares with everything below it.
///
/// A [`RouterContext`] is a cheap handle: clones observe the same state. The router is the only
/// writer; routes and any other consumer read from it and may [`subscribe`](Self::subscribe) to be
/// told after every update.
#[derive(Clone)]
pub struct RouterContext {
    inner: Rc<RouterInner>,
}

impl RouterContext {
    pub(crate) fn new(history: Rc<dyn History>, cfg: RouterConfig) -> Self {
        Self {
            inner: Rc::new(RouterInner {
                state: RefCell::default(),
                history,
                cfg,
                phase: Cell::default(),
                subscribers: RefCell::default(),
            }),
        }
    }

    /// The current path, normalized and without the query.
    pub fn path(&self) -> String {
        self.inner.state.borrow().path.clone()
    }

    /// The patterns of all mounted routes, in declaration order.
    pub fn routes(&self) -> Vec<String> {
        self.inner.state.borrow().routes()
    }

    /// The current query parameters.
    pub fn query(&self) -> Query {
        self.inner.state.borrow().query.clone()
    }

    /// The parameters bound by the active route.
    pub fn params(&self) -> Params {
        self.inner.state.borrow().params.clone()
    }

    /// The route selected for the current path.
    pub fn active(&self) -> ActiveRoute {
        self.inner.state.borrow().active
    }

    /// A copy of the complete routing state.
    pub fn snapshot(&self) -> RouterState {
        self.inner.state.borrow().clone()
    }

    /// The lifecycle phase of the owning router.
    pub fn phase(&self) -> RouterPhase {
        self.inner.phase.get()
    }

    /// The configured routing mode.
    pub fn mode(&self) -> RouterMode {
        self.inner.cfg.mode
    }

    /// The history the router reads its location from.
    pub fn history(&self) -> &Rc<dyn History> {
        &self.inner.history
    }

    /// Get the value of a query parameter.
    pub fn get_query_param(&self, key: &str) -> Option<String> {
        self.inner.state.borrow().query.get(key).cloned()
    }

    /// Whether a query parameter is present.
    pub fn has_query_param(&self, key: &str) -> bool {
        self.inner.state.borrow().query.contains_key(key)
    }

    /// Get the value a dynamic segment of the active route bound.
    pub fn get_param(&self, key: &str) -> Option<String> {
        self.inner.state.borrow().params.get(key).cloned()
    }

    /// Remove query parameters from the current location.
    ///
    /// The new query string replaces the current history entry (no entry is added) and the
    /// context is updated. Does nothing unless the router is mounted.
    pub fn remove_query_params<K: AsRef<str>>(&self, keys: impl IntoIterator<Item = K>) {
        if self.phase() != RouterPhase::Active {
            debug!(phase = ?self.phase(), "ignoring query removal on an inactive router");
            return;
        }

        let route = {
            let state = self.inner.state.borrow();
            let mut query = state.query.clone();
            for key in keys {
                query.remove(key.as_ref());
            }
            join_route(&state.path, &query)
        };

        debug!(%route, "removing query parameters");
        self.inner.history.replace(self.href(&route));
        self.refresh();
    }

    /// Navigate to `to`. See [`Navigator::navigate`].
    pub fn navigate(&self, to: &str, options: NavigateOptions) {
        self.navigator().navigate(to, options);
    }

    /// A [`Navigator`] bound to this router's history and mode.
    pub fn navigator(&self) -> Navigator {
        Navigator::new(self.inner.history.clone())
            .with_mode(self.inner.cfg.mode)
            .with_prefix(self.inner.cfg.prefix.clone())
    }

    /// The URL a link to `route` should carry, e.g. `#/about` in hash mode.
    pub fn href(&self, route: &str) -> String {
        self.inner
            .cfg
            .mode
            .url_for(route, self.inner.cfg.prefix.as_deref())
    }

    /// Checks if `target` is the current path (`exact`) or one of its ancestors.
    pub fn is_active(&self, target: &str, exact: bool) -> bool {
        self.inner.state.borrow().is_active(target, exact)
    }

    /// Register a callback that runs after every update of the context.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> ListenerId {
        self.inner.subscribers.borrow_mut().insert(Rc::new(callback))
    }

    /// Remove a callback registered with [`RouterContext::subscribe`].
    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner.subscribers.borrow_mut().remove(id);
    }

    pub(crate) fn set_phase(&self, phase: RouterPhase) {
        self.inner.phase.set(phase);
    }

    pub(crate) fn listener(&self) -> Rc<dyn Fn()> {
        let weak = Rc::downgrade(&self.inner);
        Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                RouterContext { inner }.refresh();
            }
        })
    }

    pub(crate) fn register_route(&self, id: RouteId, pattern: &str, fallback: bool) {
        self.inner
            .state
            .borrow_mut()
            .routes
            .push(RouteEntry::new(id, pattern, fallback));
    }

    pub(crate) fn unregister_route(&self, id: RouteId) {
        self.inner.state.borrow_mut().routes.retain(|r| r.id != id);
    }

    /// Re-read the location, route it and notify subscribers.
    ///
    /// Every field is updated before any subscriber runs.
    pub(crate) fn refresh(&self) {
        if self.phase() != RouterPhase::Active {
            return;
        }

        let mut redirects = 0;
        loop {
            self.update_state();

            let redirect = match &self.inner.cfg.on_update {
                Some(on_update) => on_update(self),
                None => None,
            };
            let Some(redirect_to) = redirect else {
                break;
            };

            if redirects == MAX_REDIRECTS {
                warn!(%redirect_to, "on_update keeps redirecting, giving up");
                break;
            }
            redirects += 1;

            debug!(%redirect_to, "on_update redirected");
            self.inner.history.replace(self.href(&redirect_to));
        }

        let subscribers = self.inner.subscribers.borrow().snapshot();
        for subscriber in subscribers {
            subscriber();
        }
    }

    fn update_state(&self) {
        let location = self.inner.history.location();
        let route = self
            .inner
            .cfg
            .mode
            .route_from_location(&location, self.inner.cfg.prefix.as_deref());
        let (path, query) = split_route(&route);

        let mut state = self.inner.state.borrow_mut();
        state.path = normalize_path(path);
        state.query = parse_query(query);

        let resolution = resolve(&state.path, &state.routes);
        state.active = resolution.active;
        state.params = resolution.params;

        debug!(path = %state.path, active = ?state.active, "routing updated");
    }
}

impl fmt::Debug for RouterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterContext")
            .field("state", &self.inner.state.borrow())
            .field("phase", &self.inner.phase.get())
            .field("cfg", &self.inner.cfg)
            .finish_non_exhaustive()
    }
}
