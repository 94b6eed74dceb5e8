use barra_common::gateway::PersistenceError;
use barra_common::validation::ValidationError;
use thiserror::Error;

/// Why a store operation did not change the cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Rejected locally; the gateway was never called.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Loading a collection failed; the cached copy is stale but intact.
    #[error("fetch failed: {0}")]
    Fetch(#[source] PersistenceError),
    /// A mutation was not acknowledged by the backend.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}
