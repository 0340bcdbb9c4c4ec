//! Programmatic navigation.

use std::{fmt, rc::Rc};

use rsv_history::History;
use tracing::debug;

use crate::router_cfg::RouterMode;

/// Options for [`navigate`] and [`Navigator::navigate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    /// Options that replace the current history entry.
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// Navigate the browser window to `to`.
///
/// `to` is handed to the History API unchanged, then a `popstate` event is dispatched so every
/// mounted [`Router`](crate::components::Router) observes the change.
///
/// When there is no window (a headless environment, or the `web` feature is disabled) this does
/// nothing.
///
/// ```rust
/// # use rsv_router::prelude::*;
/// // without a browser this is a no-op rather than an error
/// navigate("/about", NavigateOptions::default());
/// navigate("/login", NavigateOptions::replace());
/// ```
pub fn navigate(to: &str, options: NavigateOptions) {
    match browser_navigator() {
        Some(navigator) => navigator.navigate(to, options),
        None => debug!(to, replace = options.replace, "no browser location, ignoring navigation"),
    }
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
fn browser_navigator() -> Option<Navigator> {
    rsv_history::WebHistory::new().map(|history| Navigator::new(Rc::new(history)))
}

#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
fn browser_navigator() -> Option<Navigator> {
    None
}

/// A handle for programmatic navigation on a specific [`History`].
///
/// Obtain one from [`RouterContext::navigator`](crate::contexts::RouterContext::navigator) to
/// navigate in the router's mode, or build one directly around a history.
#[derive(Clone)]
pub struct Navigator {
    history: Rc<dyn History>,
    mode: RouterMode,
    prefix: Option<String>,
}

impl Navigator {
    /// Create a [`Navigator`] that writes routes as document paths.
    pub fn new(history: Rc<dyn History>) -> Self {
        Self {
            history,
            mode: RouterMode::History,
            prefix: None,
        }
    }

    /// Write routes the way `mode` expects them.
    pub fn with_mode(self, mode: RouterMode) -> Self {
        Self { mode, ..self }
    }

    pub(crate) fn with_prefix(self, prefix: Option<String>) -> Self {
        Self { prefix, ..self }
    }

    /// Navigate to `to`, then emit a single navigation notification.
    ///
    /// `to` is not validated; in hash mode it is written into the fragment.
    pub fn navigate(&self, to: &str, options: NavigateOptions) {
        let url = self.mode.url_for(to, self.prefix.as_deref());
        debug!(%url, replace = options.replace, "navigating");

        if options.replace {
            self.history.replace(url);
        } else {
            self.history.push(url);
        }
        self.history.notify();
    }

    /// Push a new entry. The previous route stays available to go back to.
    pub fn push(&self, to: &str) {
        self.navigate(to, NavigateOptions::default());
    }

    /// Replace the current entry. The previous route is **not** available to go back to.
    pub fn replace(&self, to: &str) {
        self.navigate(to, NavigateOptions::replace());
    }

    /// Go back to the previous route. Fails silently if there is none.
    pub fn go_back(&self) {
        self.history.go_back();
    }

    /// Go forward to a future route. Fails silently if there is none.
    pub fn go_forward(&self) {
        self.history.go_forward();
    }

    /// Whether there is a previous route.
    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    /// Whether there is a future route.
    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("mode", &self.mode)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
