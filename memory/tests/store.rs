use showroom_catalog::ComponentKey;
use showroom_memory::FileKvStore;
use showroom_memory::KvStore;
use showroom_memory::MemoryError;
use showroom_memory::MemoryStore;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

#[test]
fn memory_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let key = ComponentKey::new("atoms", "button");

    let store = MemoryStore::open(Box::new(FileKvStore::new(dir.path())));
    store.record_usage(&key);
    store.record_usage(&key);
    let mut props = BTreeMap::new();
    props.insert("variant".to_string(), serde_json::json!("ghost"));
    store.remember_properties(&key, &props);
    store.remember_panel_state("props", false);
    store.save_all().unwrap();

    // Second process: everything comes back.
    let store2 = MemoryStore::open(Box::new(FileKvStore::new(dir.path())));
    let usage = store2.usage_for(&key).unwrap();
    assert_eq!(usage.count, 2);
    assert!(usage.last_used_at.is_some());
    assert_eq!(
        store2.get_remembered(&key).get("variant"),
        Some(&serde_json::json!("ghost"))
    );
    let restore = store2.restore_session();
    assert_eq!(restore.panels.get("props"), Some(&false));
    assert_eq!(restore.last_component, Some(key));
}

#[test]
fn corrupt_data_reinitializes_empty() {
    let dir = tempfile::tempdir().unwrap();
    let kv = FileKvStore::new(dir.path());
    kv.set("usage", "{definitely not json").unwrap();
    kv.set("panels", "[1, 2").unwrap();

    let store = MemoryStore::open(Box::new(kv));
    assert!(store.usage_for(&ComponentKey::new("atoms", "button")).is_none());
    assert!(store.panel_states().is_empty());

    // The store stays fully usable after recovery.
    store.record_usage(&ComponentKey::new("atoms", "button"));
    store.save_all().unwrap();
}

#[test]
fn clear_all_removes_persisted_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = MemoryStore::open(Box::new(FileKvStore::new(dir.path())));
    store.record_usage(&ComponentKey::new("atoms", "button"));
    store.save_all().unwrap();
    store.clear_all().unwrap();

    let kv = FileKvStore::new(dir.path());
    assert!(kv.keys_with_prefix("").unwrap().is_empty());
}

/// Counts writes so coalescing is observable.
#[derive(Clone, Default)]
struct CountingKv {
    writes: std::sync::Arc<AtomicUsize>,
}

impl KvStore for CountingKv {
    fn get(&self, _key: &str) -> Result<Option<String>, MemoryError> {
        Ok(None)
    }
    fn set(&self, _key: &str, _value: &str) -> Result<(), MemoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
    fn remove(&self, _key: &str) -> Result<(), MemoryError> {
        Ok(())
    }
    fn keys_with_prefix(&self, _prefix: &str) -> Result<Vec<String>, MemoryError> {
        Ok(Vec::new())
    }
}

#[test]
fn save_all_writes_only_dirty_categories() {
    let kv = CountingKv::default();
    let writes = kv.writes.clone();
    let store = MemoryStore::open(Box::new(kv));

    // Nothing dirty yet: no writes at all.
    store.save_all().unwrap();
    assert_eq!(writes.load(Ordering::SeqCst), 0);

    store.remember_panel_state("props", true);
    store.save_all().unwrap();
    assert_eq!(writes.load(Ordering::SeqCst), 1);

    // A repeat save has nothing left to write.
    store.save_all().unwrap();
    assert_eq!(writes.load(Ordering::SeqCst), 1);
}
