//! Change notification for the personalization store.
//!
//! One signal fans in from two triggers: the store's own mutations
//! ([`ChangeOrigin::Local`]) and storage-change signals from other contexts
//! ([`ChangeOrigin::Storage`]). Observers react by re-reading the store.

#[cfg(test)]
#[path = "observer_test.rs"]
mod observer_test;

use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Which personalization list an event concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    Favorites,
    Recents,
}

/// Where a change came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A mutation made through this store.
    Local,
    /// Another context wrote to the shared storage.
    Storage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub origin: ChangeOrigin,
    /// `None` when every list may have changed (wildcard clear).
    pub list: Option<ListKind>,
}

impl ChangeEvent {
    #[must_use]
    pub fn affects(&self, kind: ListKind) -> bool {
        self.list.map_or(true, |list| list == kind)
    }
}

pub(crate) type Callback = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

struct Entry {
    id: u64,
    filter: Option<ListKind>,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    entries: Vec<Entry>,
    next_id: u64,
}

/// Subscription list owned by a store.
#[derive(Default)]
pub(crate) struct ObserverList {
    registry: Arc<Mutex<Registry>>,
}

impl ObserverList {
    pub(crate) fn subscribe(&self, filter: Option<ListKind>, callback: Callback) -> Subscription {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Entry { id, filter, callback });
        Subscription { id, registry: Arc::downgrade(&self.registry) }
    }

    /// Deliver `event` to every matching observer. Callbacks run after the
    /// registry lock is released, so they may subscribe or read the store.
    pub(crate) fn publish(&self, event: ChangeEvent) {
        let targets: Vec<Callback> = {
            let registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry
                .entries
                .iter()
                .filter(|entry| entry.filter.map_or(true, |kind| event.affects(kind)))
                .map(|entry| Arc::clone(&entry.callback))
                .collect()
        };
        tracing::trace!(?event, observers = targets.len(), "publishing personal change");
        for callback in targets {
            (*callback)(&event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner).entries.len()
    }
}

/// Handle for a registered observer. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Keep the observer registered for the rest of the store's life.
    pub fn detach(mut self) {
        self.registry = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entries
                .retain(|entry| entry.id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish_non_exhaustive()
    }
}
