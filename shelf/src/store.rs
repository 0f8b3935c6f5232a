//! Favorites and recently-viewed lists over a [`Storage`] backend.
//!
//! DESIGN
//! ======
//! Each list keeps a cache entry pairing the last raw payload read from
//! storage with its parsed form. Reads that see the same raw payload hand back
//! the same `Arc`, so UI layers can compare snapshots by pointer to decide
//! whether to re-render.
//!
//! A mutation holds the list's cache lock across read, storage write and
//! cache replacement, then publishes one [`ChangeEvent`] after the lock is
//! released. Readers therefore see either the old list or the new one.
//!
//! Storage signals that arrive while a mutation is writing (a backend that
//! notifies other contexts from inside `set_item`, whose observers write
//! back) are held and published once the writing mutation has released its
//! lock. Observers never run while this store holds a list lock.
//!
//! FAILURE
//! =======
//! Storage errors and malformed payloads never reach callers: reads degrade
//! to an empty list, failed writes leave state untouched and publish nothing.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::key::ProductKey;
use crate::observer::{ChangeEvent, ChangeOrigin, ListKind, ObserverList, Subscription};
use crate::storage::Storage;

pub const FAVORITES_STORAGE_KEY: &str = "parokios:favorites:v1";
pub const RECENTS_STORAGE_KEY: &str = "parokios:recents:v1";
pub const DEFAULT_RECENTS_LIMIT: usize = 12;

/// Payload assumed when a list has never been written.
const EMPTY_PAYLOAD: &str = "[]";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("stored list is not a JSON array of strings: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Storage keys and bounds for a [`PersonalStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub favorites_key: String,
    pub recents_key: String,
    /// Default bound for [`PersonalStore::add_recent`]. Values below 1 act as 1.
    pub recents_limit: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            favorites_key: FAVORITES_STORAGE_KEY.to_string(),
            recents_key: RECENTS_STORAGE_KEY.to_string(),
            recents_limit: DEFAULT_RECENTS_LIMIT,
        }
    }
}

struct CacheEntry {
    raw: String,
    list: Arc<[ProductKey]>,
}

struct ListSlot {
    kind: ListKind,
    storage_key: String,
    /// Reads never return more entries than this.
    read_cap: usize,
    cache: Mutex<Option<CacheEntry>>,
}

impl ListSlot {
    fn new(kind: ListKind, storage_key: String, read_cap: usize) -> Self {
        Self { kind, storage_key, read_cap, cache: Mutex::new(None) }
    }

    fn lock(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Storage signals held back while mutations are writing.
#[derive(Default)]
struct SignalRelay {
    writers: usize,
    held: Vec<ChangeEvent>,
}

struct StoreInner {
    storage: Arc<dyn Storage>,
    favorites: ListSlot,
    recents: ListSlot,
    recents_limit: usize,
    observers: ObserverList,
    relay: Mutex<SignalRelay>,
    /// Shared snapshot for "nothing readable".
    empty: Arc<[ProductKey]>,
}

/// Device-local favorites and recents.
///
/// Cheap to clone; clones share cache, observers and storage.
#[derive(Clone)]
pub struct PersonalStore {
    inner: Arc<StoreInner>,
}

impl PersonalStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_options(storage, StoreOptions::default())
    }

    #[must_use]
    pub fn with_options(storage: Arc<dyn Storage>, options: StoreOptions) -> Self {
        let recents_limit = options.recents_limit.max(1);
        let inner = Arc::new(StoreInner {
            storage,
            favorites: ListSlot::new(ListKind::Favorites, options.favorites_key, usize::MAX),
            recents: ListSlot::new(ListKind::Recents, options.recents_key, recents_limit),
            recents_limit,
            observers: ObserverList::default(),
            relay: Mutex::new(SignalRelay::default()),
            empty: Arc::from(Vec::new()),
        });

        let weak = Arc::downgrade(&inner);
        inner.storage.on_external_change(Arc::new(move |key: Option<&str>| {
            if let Some(inner) = weak.upgrade() {
                inner.on_storage_signal(key);
            }
        }));

        Self { inner }
    }

    // =========================================================================
    // FAVORITES
    // =========================================================================

    /// Favorites, most recently added first.
    #[must_use]
    pub fn favorites(&self) -> Arc<[ProductKey]> {
        self.inner.read(&self.inner.favorites)
    }

    #[must_use]
    pub fn is_favorite(&self, key: &ProductKey) -> bool {
        self.favorites().contains(key)
    }

    /// Add `key` at the front, or remove it if present. Returns whether the
    /// product is a favorite afterwards.
    pub fn toggle_favorite(&self, key: &ProductKey) -> bool {
        let written = self.inner.mutate(&self.inner.favorites, |current| {
            if current.contains(key) {
                current.iter().filter(|k| *k != key).cloned().collect()
            } else {
                std::iter::once(key.clone()).chain(current.iter().cloned()).collect()
            }
        });
        match written {
            Some(list) => list.contains(key),
            None => self.is_favorite(key),
        }
    }

    pub fn clear_favorites(&self) {
        self.inner.mutate(&self.inner.favorites, |_| Vec::new());
    }

    // =========================================================================
    // RECENTS
    // =========================================================================

    /// Recently viewed products, most recent first, at most
    /// [`recents_limit`](Self::recents_limit) of them. Longer stored lists
    /// are cut on read.
    #[must_use]
    pub fn recents(&self) -> Arc<[ProductKey]> {
        self.inner.read(&self.inner.recents)
    }

    /// Record a view of `key` using the configured bound.
    pub fn add_recent(&self, key: &ProductKey) {
        self.add_recent_with_limit(key, self.inner.recents_limit);
    }

    /// Move `key` to the front of recents, keeping at most `limit` entries
    /// (at least one). Reads still stop at the configured limit.
    pub fn add_recent_with_limit(&self, key: &ProductKey, limit: usize) {
        self.inner.mutate(&self.inner.recents, |current| {
            std::iter::once(key.clone())
                .chain(current.iter().filter(|k| *k != key).cloned())
                .take(limit.max(1))
                .collect()
        });
    }

    pub fn clear_recents(&self) {
        self.inner.mutate(&self.inner.recents, |_| Vec::new());
    }

    // =========================================================================
    // OBSERVERS
    // =========================================================================

    /// Observe every change to either list.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.inner.observers.subscribe(None, Arc::new(callback))
    }

    /// Observe changes that may affect one list.
    pub fn subscribe_list<F>(&self, kind: ListKind, callback: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.inner.observers.subscribe(Some(kind), Arc::new(callback))
    }

    #[must_use]
    pub fn storage_key(&self, kind: ListKind) -> &str {
        &self.inner.slot(kind).storage_key
    }

    #[must_use]
    pub fn recents_limit(&self) -> usize {
        self.inner.recents_limit
    }
}

impl std::fmt::Debug for PersonalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonalStore")
            .field("favorites_key", &self.inner.favorites.storage_key)
            .field("recents_key", &self.inner.recents.storage_key)
            .field("recents_limit", &self.inner.recents_limit)
            .field("observers", &self.inner.observers.len())
            .finish_non_exhaustive()
    }
}

impl StoreInner {
    fn slot(&self, kind: ListKind) -> &ListSlot {
        match kind {
            ListKind::Favorites => &self.favorites,
            ListKind::Recents => &self.recents,
        }
    }

    fn read(&self, slot: &ListSlot) -> Arc<[ProductKey]> {
        let mut cache = slot.lock();
        self.load(slot, &mut cache)
    }

    /// Current list for `slot`, refreshing the cache if storage moved on.
    fn load(&self, slot: &ListSlot, cache: &mut Option<CacheEntry>) -> Arc<[ProductKey]> {
        let raw = match self.storage.get_item(&slot.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => EMPTY_PAYLOAD.to_string(),
            Err(e) => {
                tracing::debug!(key = %slot.storage_key, error = %e, "storage unreadable, using empty list");
                return Arc::clone(&self.empty);
            }
        };

        if let Some(hit) = cache.as_ref().filter(|hit| hit.raw == raw) {
            return Arc::clone(&hit.list);
        }

        let list: Arc<[ProductKey]> = match parse_list(&raw) {
            Ok(mut list) => {
                list.truncate(slot.read_cap);
                list.into()
            }
            Err(e) => {
                tracing::warn!(key = %slot.storage_key, error = %e, "ignoring malformed personal list");
                Arc::clone(&self.empty)
            }
        };
        *cache = Some(CacheEntry { raw, list: Arc::clone(&list) });
        list
    }

    /// Apply `next` to the current list, persist it, refresh the cache and
    /// publish. Returns the written list, or `None` if nothing was written.
    fn mutate<F>(&self, slot: &ListSlot, next: F) -> Option<Arc<[ProductKey]>>
    where
        F: FnOnce(&[ProductKey]) -> Vec<ProductKey>,
    {
        self.relay().writers += 1;
        let written = self.write(slot, next);
        let held = {
            let mut relay = self.relay();
            relay.writers -= 1;
            if relay.writers == 0 {
                std::mem::take(&mut relay.held)
            } else {
                Vec::new()
            }
        };

        if let Some(list) = &written {
            tracing::debug!(key = %slot.storage_key, len = list.len(), "personal list saved");
            self.observers.publish(ChangeEvent { origin: ChangeOrigin::Local, list: Some(slot.kind) });
        }
        for event in held {
            self.observers.publish(event);
        }
        written
    }

    /// Read-modify-write under the slot lock. Publishes nothing.
    fn write<F>(&self, slot: &ListSlot, next: F) -> Option<Arc<[ProductKey]>>
    where
        F: FnOnce(&[ProductKey]) -> Vec<ProductKey>,
    {
        let mut cache = slot.lock();
        let current = self.load(slot, &mut cache);
        let mut list = next(&current);

        let raw = match serde_json::to_string(&list) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %slot.storage_key, error = %e, "failed to encode personal list");
                return None;
            }
        };
        if let Err(e) = self.storage.set_item(&slot.storage_key, &raw) {
            tracing::warn!(key = %slot.storage_key, error = %e, "personal list not saved");
            return None;
        }

        list.truncate(slot.read_cap);
        let list: Arc<[ProductKey]> = list.into();
        *cache = Some(CacheEntry { raw, list: Arc::clone(&list) });
        Some(list)
    }

    fn relay(&self) -> MutexGuard<'_, SignalRelay> {
        self.relay.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn on_storage_signal(&self, key: Option<&str>) {
        let list = match key {
            None => None,
            Some(k) if k == self.favorites.storage_key => Some(ListKind::Favorites),
            Some(k) if k == self.recents.storage_key => Some(ListKind::Recents),
            Some(_) => return,
        };
        let event = ChangeEvent { origin: ChangeOrigin::Storage, list };
        {
            let mut relay = self.relay();
            if relay.writers > 0 {
                tracing::trace!(?event, "holding storage signal until write completes");
                relay.held.push(event);
                return;
            }
        }
        self.observers.publish(event);
    }
}

/// Strictly parse a stored list: a JSON array of strings, or nothing.
///
/// Entries that are not well-formed product keys are dropped, as are repeats
/// of an earlier entry.
///
/// # Errors
///
/// Returns [`StoreError::MalformedPayload`] when `raw` is not a JSON array of
/// strings.
pub fn parse_list(raw: &str) -> Result<Vec<ProductKey>, StoreError> {
    let entries: Vec<String> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(entries.len());
    let mut list = Vec::with_capacity(entries.len());
    for entry in entries {
        match ProductKey::parse(&entry) {
            Ok(key) => {
                if seen.insert(key.clone()) {
                    list.push(key);
                }
            }
            Err(e) => tracing::debug!(%entry, error = %e, "dropping malformed product key"),
        }
    }
    Ok(list)
}
