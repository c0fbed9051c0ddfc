use crate::error::MemoryError;

/// Scoped key-value persistence port. The store survives process
/// restarts; values are opaque strings written whole.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, MemoryError>;
    fn set(&self, key: &str, value: &str) -> Result<(), MemoryError>;
    fn remove(&self, key: &str) -> Result<(), MemoryError>;
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, MemoryError>;
}

pub mod fs;
pub mod mem;
