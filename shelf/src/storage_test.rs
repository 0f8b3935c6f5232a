use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

fn recording_listener() -> (StorageListener, Arc<Mutex<Vec<Option<String>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let listener: StorageListener = Arc::new(move |key: Option<&str>| {
        sink.lock().unwrap().push(key.map(str::to_string));
    });
    (listener, seen)
}

fn scratch_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir()
        .join(format!("shelf-storage-test-{}-{n}", std::process::id()))
        .join(name)
}

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_get_missing_is_none() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get_item("nope").unwrap(), None);
}

#[test]
fn memory_set_then_get() {
    let storage = MemoryStorage::new();
    storage.set_item("k", "[\"a/b/c\"]").unwrap();
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("[\"a/b/c\"]"));
}

#[test]
fn memory_contexts_share_data() {
    let tab_a = MemoryStorage::new();
    let tab_b = tab_a.context();
    tab_a.set_item("k", "v").unwrap();
    assert_eq!(tab_b.get_item("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn memory_write_signals_other_contexts_only() {
    let tab_a = MemoryStorage::new();
    let tab_b = tab_a.context();
    let (listener_a, seen_a) = recording_listener();
    let (listener_b, seen_b) = recording_listener();
    tab_a.on_external_change(listener_a);
    tab_b.on_external_change(listener_b);

    tab_a.set_item("k", "v").unwrap();

    assert!(seen_a.lock().unwrap().is_empty());
    assert_eq!(*seen_b.lock().unwrap(), vec![Some("k".to_string())]);
}

#[test]
fn memory_clear_signals_wildcard() {
    let tab_a = MemoryStorage::new();
    let tab_b = tab_a.context();
    let (listener, seen) = recording_listener();
    tab_b.on_external_change(listener);
    tab_a.set_item("k", "v").unwrap();

    tab_a.clear();

    assert_eq!(tab_b.get_item("k").unwrap(), None);
    assert_eq!(*seen.lock().unwrap(), vec![Some("k".to_string()), None]);
}

#[test]
fn memory_remove_item_signals_key() {
    let tab_a = MemoryStorage::new();
    let tab_b = tab_a.context();
    let (listener, seen) = recording_listener();
    tab_b.on_external_change(listener);

    tab_a.remove_item("gone");

    assert_eq!(*seen.lock().unwrap(), vec![Some("gone".to_string())]);
}

#[test]
fn memory_quota_rejects_oversized_write() {
    let storage = MemoryStorage::with_quota(10);
    storage.set_item("k", "12345").unwrap();
    let err = storage.set_item("k", "1234567890").unwrap_err();
    assert!(matches!(err, StorageError::Rejected(_)));
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("12345"));
}

// =============================================================
// FileStorage
// =============================================================

#[test]
fn file_missing_reads_none() {
    let storage = FileStorage::new(scratch_path("missing.json"));
    assert_eq!(storage.get_item("k").unwrap(), None);
}

#[test]
fn file_persists_across_handles() {
    let path = scratch_path("shelf.json");
    FileStorage::new(&path).set_item("fav", "[\"a/b/c\"]").unwrap();
    FileStorage::new(&path).set_item("recent", "[]").unwrap();

    let reopened = FileStorage::new(&path);
    assert_eq!(reopened.get_item("fav").unwrap().as_deref(), Some("[\"a/b/c\"]"));
    assert_eq!(reopened.get_item("recent").unwrap().as_deref(), Some("[]"));
}

#[test]
fn file_corrupt_read_errors_and_write_recovers() {
    let path = scratch_path("corrupt.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{not json").unwrap();

    let storage = FileStorage::new(&path);
    assert!(matches!(storage.get_item("k"), Err(StorageError::Corrupt(_))));

    storage.set_item("k", "v").unwrap();
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
}

// =============================================================
// UnavailableStorage
// =============================================================

#[test]
fn unavailable_fails_both_ways() {
    let storage = UnavailableStorage;
    assert!(matches!(storage.get_item("k"), Err(StorageError::Unavailable)));
    assert!(matches!(storage.set_item("k", "v"), Err(StorageError::Unavailable)));
}
