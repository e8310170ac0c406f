//! Persisted pending-record store.
//!
//! A submission the service has accepted but the user has not yet confirmed
//! is held locally as a [`PendingInscriptionRecord`] plus a countdown start
//! timestamp, both keyed by the service-issued cache key. The store is the
//! only owner of this state; the server enforces its own expiry
//! independently.
//!
//! # Storage layout
//!
//! Flat key-value entries, matching the original client's storage keys:
//!
//! | Storage key | Value |
//! |-------------|-------|
//! | `individual-inscription-{cacheKey}` | record JSON |
//! | `individual-time-{cacheKey}` | countdown start, epoch-ms string |
//!
//! # Failure semantics
//!
//! Storage trouble must never break the live workflow. Reads that fail or
//! decode garbage report not-found; writes that fail are logged and dropped.
//! The session continues, it just will not survive a restart.

mod error;
mod record;
mod store;


pub use error::StoreError;
pub use record::{Participant, PendingInscriptionRecord};
pub use store::{
    MemoryStore, PendingStore, SqliteStore, record_storage_key, timer_storage_key,
};
