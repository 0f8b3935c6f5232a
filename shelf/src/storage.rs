//! Key-value storage backends for the personalization store.
//!
//! DESIGN
//! ======
//! [`Storage`] mirrors the slice of the Web Storage API the store needs:
//! string get, string set, and the cross-context `storage` signal. Every
//! call returns a `Result`; the store decides how failures degrade.
//!
//! A storage-change signal is raised only for writes made through a
//! *different* context than the listener's (another browser tab, or another
//! [`MemoryStorage::context`] handle). The writing context learns about its
//! own writes through the store's local publish step instead.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Callback for storage-change signals. Receives the changed key, or `None`
/// when the whole storage area was cleared.
pub type StorageListener = Arc<dyn Fn(Option<&str>) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available in this context")]
    Unavailable,
    #[error("storage rejected write: {0}")]
    Rejected(String),
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistent string-keyed storage shared by one or more contexts.
pub trait Storage: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the write is refused or the store is unreachable.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Register for writes made by other contexts sharing this storage.
    ///
    /// Backends with a single context never signal.
    fn on_external_change(&self, _listener: StorageListener) {}
}

// =============================================================================
// MEMORY
// =============================================================================

/// In-process storage. Each handle is one context; [`MemoryStorage::context`]
/// opens a sibling handle on the same data, the way a second tab shares
/// `localStorage` with the first.
pub struct MemoryStorage {
    shared: Arc<Mutex<MemoryShared>>,
    context_id: u64,
}

#[derive(Default)]
struct MemoryShared {
    items: HashMap<String, String>,
    listeners: Vec<(u64, StorageListener)>,
    next_context_id: u64,
    /// Maximum total bytes of stored values, if limited.
    quota: Option<usize>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::from_shared(MemoryShared { next_context_id: 1, ..MemoryShared::default() })
    }

    /// Storage that refuses writes once stored values exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self::from_shared(MemoryShared { next_context_id: 1, quota: Some(bytes), ..MemoryShared::default() })
    }

    fn from_shared(shared: MemoryShared) -> Self {
        Self { shared: Arc::new(Mutex::new(shared)), context_id: 0 }
    }

    /// Open another context on the same data.
    #[must_use]
    pub fn context(&self) -> Self {
        let mut shared = self.lock();
        let context_id = shared.next_context_id;
        shared.next_context_id += 1;
        Self { shared: Arc::clone(&self.shared), context_id }
    }

    /// Remove one key, signalling the other contexts.
    pub fn remove_item(&self, key: &str) {
        let listeners = {
            let mut shared = self.lock();
            shared.items.remove(key);
            shared.foreign_listeners(self.context_id)
        };
        for listener in listeners {
            (*listener)(Some(key));
        }
    }

    /// Remove every key, signalling the other contexts with a wildcard.
    pub fn clear(&self) {
        let listeners = {
            let mut shared = self.lock();
            shared.items.clear();
            shared.foreign_listeners(self.context_id)
        };
        for listener in listeners {
            (*listener)(None);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryShared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryShared {
    fn foreign_listeners(&self, context_id: u64) -> Vec<StorageListener> {
        self.listeners
            .iter()
            .filter(|(owner, _)| *owner != context_id)
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    fn used_bytes_after(&self, key: &str, value: &str) -> usize {
        let others: usize = self
            .items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        others + key.len() + value.len()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let listeners = {
            let mut shared = self.lock();
            if let Some(quota) = shared.quota {
                let needed = shared.used_bytes_after(key, value);
                if needed > quota {
                    return Err(StorageError::Rejected(format!("quota exceeded ({needed} > {quota} bytes)")));
                }
            }
            shared.items.insert(key.to_string(), value.to_string());
            shared.foreign_listeners(self.context_id)
        };
        for listener in listeners {
            (*listener)(Some(key));
        }
        Ok(())
    }

    fn on_external_change(&self, listener: StorageListener) {
        self.lock().listeners.push((self.context_id, listener));
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Storage persisted as one JSON object (`key -> raw value`) on disk.
///
/// Suited to native single-process hosts such as the CLI; it never raises
/// storage-change signals.
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = match self.read_all() {
            Ok(items) => items,
            Err(StorageError::Corrupt(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding corrupt storage file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }
}

// =============================================================================
// UNAVAILABLE
// =============================================================================

/// Storage for contexts without any (server rendering, disabled storage).
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStorage;

impl Storage for UnavailableStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// `window.localStorage`, with cross-tab changes from the window `storage`
/// event. Requires a browser environment.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct WebStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or(StorageError::Unavailable)?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        _ => Err(StorageError::Unavailable),
    }
}

#[cfg(feature = "hydrate")]
impl Storage for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?.get_item(key).map_err(|e| StorageError::Rejected(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{e:?}")))
    }

    fn on_external_change(&self, listener: StorageListener) {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |event: web_sys::StorageEvent| {
            (*listener)(event.key().as_deref());
        });
        if let Err(e) = window.add_event_listener_with_callback("storage", callback.as_ref().unchecked_ref()) {
            tracing::warn!(error = ?e, "failed to listen for storage events");
            return;
        }
        // Lives as long as the page.
        callback.forget();
    }
}
