//! Location sources for the rsv router.
//!
//! The router never touches the browser directly. Everything it needs from the outside world goes
//! through a [`History`]: reading the current [`Location`], pushing and replacing entries, walking
//! back and forward, and the navigation notifications that tell a mounted router to recompute its
//! state.
//!
//! Two implementations ship with this crate:
//! - [`MemoryHistory`], which keeps the whole stack in memory and works everywhere (tests, native,
//!   headless).
//! - `WebHistory` (behind the `web` feature), which wraps the browser
//!   [History API](https://developer.mozilla.org/en-US/docs/Web/API/History_API) and the
//!   `popstate` event.

use std::rc::Rc;

mod listeners;
pub use listeners::*;

mod memory;
pub use memory::*;

#[cfg(feature = "web")]
mod web;
#[cfg(feature = "web")]
pub use web::*;

/// A snapshot of the current location, split the way `window.location` splits it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    /// The path of the URL. Always starts with `/`.
    pub pathname: String,
    /// The query string including the leading `?`, or an empty string.
    pub search: String,
    /// The fragment including the leading `#`, or an empty string.
    pub hash: String,
}

impl Location {
    /// The fragment without its leading `#`.
    pub fn fragment(&self) -> &str {
        self.hash.strip_prefix('#').unwrap_or(&self.hash)
    }

    /// The query string without its leading `?`.
    pub fn query(&self) -> &str {
        self.search.strip_prefix('?').unwrap_or(&self.search)
    }
}

/// An integration with some kind of navigation history.
///
/// Implementations should behave like a web browser: `push` and `replace` change the location
/// silently, while `go_back` and `go_forward` emit a navigation notification (the equivalent of
/// `popstate`). Code that changes the location programmatically is expected to call
/// [`History::notify`] afterwards so every listener observes the change exactly once.
pub trait History {
    /// Get the current location.
    ///
    /// ```rust
    /// # use rsv_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default();
    /// assert_eq!(history.location().pathname, "/");
    ///
    /// history.push(String::from("/path?query=1"));
    /// assert_eq!(history.location().pathname, "/path");
    /// assert_eq!(history.location().search, "?query=1");
    /// ```
    #[must_use]
    fn location(&self) -> Location;

    /// The number of entries in the history stack, including the current one and any entries that
    /// can be reached by going forward.
    #[must_use]
    fn length(&self) -> usize;

    /// Check whether there is a previous page to navigate back to.
    ///
    /// If a [`History`] cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_back(&self) -> bool {
        true
    }

    /// Go back to a previous page and notify listeners.
    ///
    /// If there is no previous page this must do nothing. It may be called even if
    /// `can_go_back` returns [`false`].
    fn go_back(&self);

    /// Check whether there is a future page to navigate forward to.
    ///
    /// If a [`History`] cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_forward(&self) -> bool {
        true
    }

    /// Go forward to a future page and notify listeners.
    fn go_forward(&self);

    /// Resolve `url` against the current location and push it as a new entry.
    ///
    /// The navigation future is cleared. Listeners are *not* notified.
    fn push(&self, url: String);

    /// Resolve `url` against the current location and overwrite the current entry with it.
    ///
    /// The navigation history and future stay untouched. Listeners are *not* notified.
    fn replace(&self, url: String);

    /// Register a callback that runs on every navigation notification.
    fn listen(&self, callback: Rc<dyn Fn()>) -> ListenerId;

    /// Remove a callback registered with [`History::listen`]. Unknown ids are ignored.
    fn unlisten(&self, id: ListenerId);

    /// Emit a navigation notification to every registered listener.
    fn notify(&self);
}
