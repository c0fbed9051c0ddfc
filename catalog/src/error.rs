use crate::key::ComponentKey;
use thiserror::Error;

/// Failure reported by a [`crate::UnitResolver`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The `(category, name)` pair is not registered at all.
    #[error("component not registered")]
    Unknown,
    /// The pair is registered but resolving its unit failed.
    #[error("resolution failed: {0}")]
    Failed(String),
}

/// Errors surfaced by the catalog loader. Neither variant is fatal to
/// the playground: unknown components render an inline error panel and
/// load failures degrade to a placeholder descriptor.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown component: {0}")]
    UnknownComponent(ComponentKey),
    #[error("failed to load {key}: {source}")]
    Load {
        key: ComponentKey,
        #[source]
        source: ResolveError,
    },
}

impl CatalogError {
    pub fn key(&self) -> &ComponentKey {
        match self {
            CatalogError::UnknownComponent(key) => key,
            CatalogError::Load { key, .. } => key,
        }
    }
}
