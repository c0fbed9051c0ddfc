use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryError {
    /// Imported session config failed to parse. Current state is left
    /// untouched when this is returned.
    #[error("invalid session config: {0}")]
    InvalidConfig(String),
    /// Persisted data exists but cannot be decoded. Recovered by
    /// reinitializing the affected category; never surfaced at startup.
    #[error("corrupt storage under key {key}: {reason}")]
    StorageCorrupt { key: String, reason: String },
    #[error("storage i/o: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
