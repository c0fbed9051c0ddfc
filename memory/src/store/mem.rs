use super::KvStore;
use crate::error::MemoryError;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Volatile store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemKvStore {
    map: Mutex<BTreeMap<String, String>>,
}

impl MemKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KvStore for MemKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, MemoryError> {
        Ok(self.guard().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MemoryError> {
        self.guard().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MemoryError> {
        self.guard().remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, MemoryError> {
        Ok(self
            .guard()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
