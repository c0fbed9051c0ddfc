use super::KvStore;
use crate::error::MemoryError;
use std::path::Path;
use std::path::PathBuf;

/// File-backed store: one `<key>.json` file per key under a scope
/// directory. Every write replaces the whole value.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, MemoryError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MemoryError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MemoryError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, MemoryError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(iter) => iter,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some(key) = name.strip_suffix(".json")
                && key.starts_with(prefix)
            {
                keys.push(key.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::new(dir.path().join("scope"));
        assert_eq!(store.get("usage").unwrap(), None);
        store.set("usage", "{}").unwrap();
        assert_eq!(store.get("usage").unwrap().as_deref(), Some("{}"));
        store.remove("usage").unwrap();
        assert_eq!(store.get("usage").unwrap(), None);
        // Removing a missing key is fine.
        store.remove("usage").unwrap();
    }

    #[test]
    fn keys_with_prefix_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::new(dir.path());
        store.set("usage", "a").unwrap();
        store.set("props", "b").unwrap();
        store.set("panels", "c").unwrap();
        assert_eq!(
            store.keys_with_prefix("p").unwrap(),
            vec!["panels".to_string(), "props".to_string()]
        );
        assert_eq!(store.keys_with_prefix("").unwrap().len(), 3);
    }
}
