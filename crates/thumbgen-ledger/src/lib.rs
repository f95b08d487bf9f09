//! Thumbgen Ledger Library
//!
//! Append-only metadata ledger. The pipeline writes exactly two kinds of
//! documents: a processing record after a thumbnail is durably stored, and a
//! failure record when an invocation aborts. There is no read-modify-write
//! and no update path.
//!
//! The [`DocumentStore`] trait models the document database client
//! (`append(collection, document) -> document id`); [`Ledger`] layers the
//! record-shaped operations on top of it.

pub mod ledger;
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod traits;

pub use ledger::Ledger;
pub use memory::MemoryDocumentStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresDocumentStore;
pub use traits::{DocumentStore, LedgerError, LedgerResult};
