//! Document store abstraction trait.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Ledger operation errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger write failed: {0}")]
    WriteFailed(String),

    #[error("Record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Ledger configuration error: {0}")]
    ConfigError(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Append-only document database client.
///
/// Implementations must treat every append as independent; a duplicate
/// append for the same logical event produces a second document rather than
/// an error (at-least-once redelivery makes duplicates acceptable).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a document to a collection and return its id.
    async fn append(&self, collection: &str, document: serde_json::Value)
        -> LedgerResult<Uuid>;
}
