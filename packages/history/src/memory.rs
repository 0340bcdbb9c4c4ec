use std::{cell::RefCell, rc::Rc};

use tracing::error;
use url::Url;

use crate::{History, ListenerId, Listeners, Location};

/// The origin every in-memory location is resolved against.
const MEMORY_ORIGIN: &str = "rsv://index.html/";

struct MemoryHistoryState {
    current: Url,
    past: Vec<Url>,
    future: Vec<Url>,
}

/// A [`History`] that stores all navigation information in memory.
///
/// Navigation targets are resolved like a browser resolves them against `location.href`, so
/// `"/about"`, `"?page=2"` and `"#/settings"` all behave as they would with `history.pushState`.
pub struct MemoryHistory {
    state: RefCell<MemoryHistoryState>,
    listeners: RefCell<Listeners>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_initial_path("/")
    }
}

impl MemoryHistory {
    /// Create a [`MemoryHistory`] starting at `path`.
    ///
    /// ```rust
    /// # use rsv_history::{History, MemoryHistory};
    /// let history = MemoryHistory::with_initial_path("/blog/1?draft=true");
    /// assert_eq!(history.location().pathname, "/blog/1");
    /// assert_eq!(history.can_go_back(), false);
    /// ```
    ///
    /// A path that cannot be resolved is logged and the history starts at `/` instead.
    pub fn with_initial_path(path: impl AsRef<str>) -> Self {
        let origin = origin();
        let path = path.as_ref();
        let current = origin.join(path).unwrap_or_else(|err| {
            error!(path, %err, "invalid initial path, starting at `/`");
            origin
        });

        Self {
            state: RefCell::new(MemoryHistoryState {
                current,
                past: Vec::new(),
                future: Vec::new(),
            }),
            listeners: RefCell::default(),
        }
    }

    /// Wrap the history in an [`Rc`], the form the router consumes.
    pub fn shared(self) -> Rc<dyn History> {
        Rc::new(self)
    }

    fn resolve(&self, url: &str) -> Option<Url> {
        if url.starts_with("//") {
            error!(url, r#"cannot navigate to urls starting with "//""#);
            return None;
        }

        match self.state.borrow().current.join(url) {
            Ok(resolved) => Some(resolved),
            Err(err) => {
                error!(url, %err, "failed to resolve navigation target");
                None
            }
        }
    }
}

fn origin() -> Url {
    Url::parse(MEMORY_ORIGIN).expect("the memory origin is a valid url")
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        let state = self.state.borrow();
        let current = &state.current;

        Location {
            pathname: current.path().to_string(),
            search: match current.query() {
                Some(query) if !query.is_empty() => format!("?{query}"),
                _ => String::new(),
            },
            hash: match current.fragment() {
                Some(fragment) if !fragment.is_empty() => format!("#{fragment}"),
                _ => String::new(),
            },
        }
    }

    fn length(&self) -> usize {
        let state = self.state.borrow();
        state.past.len() + 1 + state.future.len()
    }

    fn can_go_back(&self) -> bool {
        !self.state.borrow().past.is_empty()
    }

    fn go_back(&self) {
        {
            let mut state = self.state.borrow_mut();
            let Some(previous) = state.past.pop() else {
                return;
            };
            let current = std::mem::replace(&mut state.current, previous);
            state.future.push(current);
        }
        self.notify();
    }

    fn can_go_forward(&self) -> bool {
        !self.state.borrow().future.is_empty()
    }

    fn go_forward(&self) {
        {
            let mut state = self.state.borrow_mut();
            let Some(next) = state.future.pop() else {
                return;
            };
            let current = std::mem::replace(&mut state.current, next);
            state.past.push(current);
        }
        self.notify();
    }

    fn push(&self, url: String) {
        let Some(next) = self.resolve(&url) else {
            return;
        };

        let mut state = self.state.borrow_mut();
        let previous = std::mem::replace(&mut state.current, next);
        state.past.push(previous);
        state.future.clear();
    }

    fn replace(&self, url: String) {
        if let Some(next) = self.resolve(&url) {
            self.state.borrow_mut().current = next;
        }
    }

    fn listen(&self, callback: Rc<dyn Fn()>) -> ListenerId {
        self.listeners.borrow_mut().insert(callback)
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(id);
    }

    fn notify(&self) {
        let callbacks = self.listeners.borrow().snapshot();
        for callback in callbacks {
            callback();
        }
    }
}
