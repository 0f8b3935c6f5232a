//! # shelf
//!
//! Device-local personalization for the storefront: a favorites list and a
//! recently-viewed list of products, kept in key-value storage with no
//! account and no server.
//!
//! DESIGN
//! ======
//! `PersonalStore` owns everything that used to be ambient: the per-list
//! snapshot cache, the observer list, and the storage handle. Hosts build
//! one store and hand clones of it to whatever needs it. Storage is behind
//! the [`Storage`] trait so the same store runs over `localStorage` in the
//! browser (`hydrate` feature), a JSON file on native hosts, or memory in
//! tests.
//!
//! ERROR HANDLING
//! ==============
//! Nothing public returns an error. Unreadable storage and malformed payloads
//! read as empty lists; failed writes are logged and dropped.

pub mod key;
pub mod observer;
pub mod storage;
pub mod store;

pub use key::{KeyError, ProductKey};
pub use observer::{ChangeEvent, ChangeOrigin, ListKind, Subscription};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageListener, UnavailableStorage};
#[cfg(feature = "hydrate")]
pub use storage::WebStorage;
pub use store::{
    DEFAULT_RECENTS_LIMIT, FAVORITES_STORAGE_KEY, PersonalStore, RECENTS_STORAGE_KEY, StoreError, StoreOptions,
};
