use std::{cell::RefCell, rc::Rc};

use gloo_events::EventListener;
use slab::Slab;
use tracing::error;
use wasm_bindgen::JsValue;
use web_sys::{Event, Window};

use crate::{History, ListenerId, Location};

/// A [`History`] that integrates with a browser via the
/// [History API](https://developer.mozilla.org/en-US/docs/Web/API/History_API).
///
/// Navigation notifications are `popstate` events on the window. The browser fires them on
/// back/forward traversal and [`History::notify`] dispatches a synthetic one, so both reach the
/// same listeners.
pub struct WebHistory {
    window: Window,
    history: web_sys::History,
    listeners: RefCell<Slab<EventListener>>,
}

impl WebHistory {
    /// Create a new [`WebHistory`].
    ///
    /// Returns [`None`] when there is no `window` (e.g. inside a worker), so callers can fall back to
    /// a no-op instead of failing.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let history = window.history().ok()?;

        Some(Self {
            window,
            history,
            listeners: RefCell::default(),
        })
    }
}

impl History for WebHistory {
    fn location(&self) -> Location {
        let location = self.window.location();

        Location {
            pathname: location.pathname().unwrap_or_else(|_| String::from("/")),
            search: location.search().unwrap_or_default(),
            hash: location.hash().unwrap_or_default(),
        }
    }

    fn length(&self) -> usize {
        self.history.length().unwrap_or(1) as usize
    }

    fn go_back(&self) {
        if let Err(err) = self.history.back() {
            error!(?err, "failed to go back");
        }
    }

    fn go_forward(&self) {
        if let Err(err) = self.history.forward() {
            error!(?err, "failed to go forward");
        }
    }

    fn push(&self, url: String) {
        if let Err(err) = self
            .history
            .push_state_with_url(&JsValue::NULL, "", Some(&url))
        {
            error!(%url, ?err, "failed to push state");
        }
    }

    fn replace(&self, url: String) {
        if let Err(err) = self
            .history
            .replace_state_with_url(&JsValue::NULL, "", Some(&url))
        {
            error!(%url, ?err, "failed to replace state");
        }
    }

    fn listen(&self, callback: Rc<dyn Fn()>) -> ListenerId {
        let listener = EventListener::new(&self.window, "popstate", move |_| callback());
        ListenerId::from_key(self.listeners.borrow_mut().insert(listener))
    }

    fn unlisten(&self, id: ListenerId) {
        // dropping the listener detaches it from the window
        self.listeners.borrow_mut().try_remove(id.key());
    }

    fn notify(&self) {
        let event = match Event::new("popstate") {
            Ok(event) => event,
            Err(err) => {
                error!(?err, "failed to create popstate event");
                return;
            }
        };

        if let Err(err) = self.window.dispatch_event(&event) {
            error!(?err, "failed to dispatch popstate event");
        }
    }
}
