use std::{fmt, rc::Rc};

use slab::Slab;

/// A handle to a callback registered with a [`History`](crate::History) or any other
/// [`Listeners`] registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

impl ListenerId {
    #[cfg(feature = "web")]
    pub(crate) fn from_key(key: usize) -> Self {
        Self(key)
    }

    #[cfg(feature = "web")]
    pub(crate) fn key(self) -> usize {
        self.0
    }
}

/// A registry of notification callbacks.
///
/// Callbacks are snapshotted before they run, so a callback may register or remove listeners (or
/// trigger another notification) without invalidating the dispatch in progress.
#[derive(Default)]
pub struct Listeners {
    callbacks: Slab<Rc<dyn Fn()>>,
}

impl Listeners {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback.
    pub fn insert(&mut self, callback: Rc<dyn Fn()>) -> ListenerId {
        ListenerId(self.callbacks.insert(callback))
    }

    /// Remove a callback. Returns whether the id was registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.callbacks.try_remove(id.0).is_some()
    }

    /// The number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Clone out every callback in registration order.
    ///
    /// Run the returned callbacks *after* releasing any borrow of the registry.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Rc<dyn Fn()>> {
        self.callbacks.iter().map(|(_, cb)| cb.clone()).collect()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.callbacks.len())
            .finish()
    }
}
