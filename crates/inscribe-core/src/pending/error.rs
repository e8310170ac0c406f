//! Pending-store error types.
//!
//! These errors never cross the [`PendingStore`](super::PendingStore) trait
//! boundary: implementations degrade to not-found on read failures and to
//! logged no-ops on write failures, so the workflow keeps functioning for the
//! current session and only loses restart survival.

use thiserror::Error;

/// Errors raised by durable store internals.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing database file or its directory could not be created.
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),

    /// The storage engine rejected an operation.
    #[error("storage engine: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The connection mutex was poisoned by a panicking holder.
    #[error("storage connection poisoned")]
    Poisoned,
}
