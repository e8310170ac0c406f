//! Persisted pending-record store implementations.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, params};
use tracing::warn;

use super::error::StoreError;
use super::record::PendingInscriptionRecord;

/// Storage key prefix for record JSON entries.
const RECORD_KEY_PREFIX: &str = "individual-inscription-";

/// Storage key prefix for countdown start timestamps (epoch-ms strings).
const TIMER_KEY_PREFIX: &str = "individual-time-";

/// Storage key holding the record JSON for a cache key.
#[must_use]
pub fn record_storage_key(cache_key: &str) -> String {
    format!("{RECORD_KEY_PREFIX}{cache_key}")
}

/// Storage key holding the countdown start timestamp for a cache key.
#[must_use]
pub fn timer_storage_key(cache_key: &str) -> String {
    format!("{TIMER_KEY_PREFIX}{cache_key}")
}

/// Port for the persisted pending-record store.
///
/// The trait surface is infallible on purpose: a store that cannot read
/// reports not-found, a store that cannot write logs and drops the write.
/// The workflow must keep functioning either way, only losing restart
/// survival.
pub trait PendingStore: Send + Sync {
    /// Persists the record under the key derived from `cache_key`.
    fn save(&self, cache_key: &str, record: &PendingInscriptionRecord);

    /// Returns the previously saved record, or `None` when absent or
    /// malformed.
    fn load(&self, cache_key: &str) -> Option<PendingInscriptionRecord>;

    /// Records `now_ms` as the countdown start the first time it is called
    /// for `cache_key`; every later call returns the stored value unchanged.
    fn start_timer(&self, cache_key: &str, now_ms: u64) -> u64;

    /// Returns the countdown start for `cache_key` without starting it.
    fn timer_started_at(&self, cache_key: &str) -> Option<u64>;

    /// Removes both the record and its timer entry.
    ///
    /// Called on every terminal transition (confirm, cancel, expiry) so a
    /// finished reservation can never resume from stale state.
    fn clear(&self, cache_key: &str);

    /// Cache keys that currently have a stored record.
    fn pending_keys(&self) -> Vec<String>;
}

/// Durable store backed by `SQLite`.
///
/// A single `pending_entries(storage_key, value)` table holds both record
/// JSON and timer timestamps, mirroring the flat key-value layout of the
/// original storage: `individual-inscription-{key}` and
/// `individual-time-{key}`.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS pending_entries (
                storage_key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory database, used by tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS pending_entries (
                storage_key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn get(&self, storage_key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.query_row(
            "SELECT value FROM pending_entries WHERE storage_key = ?1",
            params![storage_key],
            |row| row.get(0),
        )
        .optional()
        .map_err(StoreError::from)
    }

    fn put(&self, storage_key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "INSERT INTO pending_entries (storage_key, value) VALUES (?1, ?2)
             ON CONFLICT(storage_key) DO UPDATE SET value = excluded.value",
            params![storage_key, value],
        )?;
        Ok(())
    }

    fn delete(&self, storage_key: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "DELETE FROM pending_entries WHERE storage_key = ?1",
            params![storage_key],
        )?;
        Ok(())
    }
}

impl PendingStore for SqliteStore {
    fn save(&self, cache_key: &str, record: &PendingInscriptionRecord) {
        let json = match serde_json::to_string(record) {
            Ok(json) => json,
            Err(err) => {
                warn!(cache_key = %cache_key, error = %err, "could not serialize pending record");
                return;
            },
        };
        if let Err(err) = self.put(&record_storage_key(cache_key), &json) {
            warn!(
                cache_key = %cache_key,
                error = %err,
                "could not persist pending record; it will not survive a restart"
            );
        }
    }

    fn load(&self, cache_key: &str) -> Option<PendingInscriptionRecord> {
        let raw = match self.get(&record_storage_key(cache_key)) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(cache_key = %cache_key, error = %err, "pending record read failed; treating as not found");
                return None;
            },
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(
                    cache_key = %cache_key,
                    error = %err,
                    "stored pending record is malformed; treating as not found"
                );
                None
            },
        }
    }

    fn start_timer(&self, cache_key: &str, now_ms: u64) -> u64 {
        let key = timer_storage_key(cache_key);
        match self.get(&key) {
            Ok(Some(raw)) => {
                if let Ok(started_at) = raw.parse::<u64>() {
                    return started_at;
                }
                // Malformed timestamp: restart the window rather than guess.
                warn!(cache_key = %cache_key, "stored timer value is malformed; restarting window");
            },
            Ok(None) => {},
            Err(err) => {
                warn!(cache_key = %cache_key, error = %err, "timer read failed; window will not survive a restart");
                return now_ms;
            },
        }
        if let Err(err) = self.put(&key, &now_ms.to_string()) {
            warn!(cache_key = %cache_key, error = %err, "could not persist timer start");
        }
        now_ms
    }

    fn timer_started_at(&self, cache_key: &str) -> Option<u64> {
        match self.get(&timer_storage_key(cache_key)) {
            Ok(raw) => raw.and_then(|value| value.parse().ok()),
            Err(err) => {
                warn!(cache_key = %cache_key, error = %err, "timer read failed; treating as not started");
                None
            },
        }
    }

    fn clear(&self, cache_key: &str) {
        for key in [record_storage_key(cache_key), timer_storage_key(cache_key)] {
            if let Err(err) = self.delete(&key) {
                warn!(storage_key = %key, error = %err, "could not clear pending entry");
            }
        }
    }

    fn pending_keys(&self) -> Vec<String> {
        let Ok(conn) = self.conn.lock() else {
            return Vec::new();
        };
        let mut statement = match conn.prepare(
            "SELECT storage_key FROM pending_entries WHERE storage_key LIKE ?1 ORDER BY storage_key",
        ) {
            Ok(statement) => statement,
            Err(err) => {
                warn!(error = %err, "pending key listing failed");
                return Vec::new();
            },
        };
        let rows = statement.query_map(params![format!("{RECORD_KEY_PREFIX}%")], |row| {
            row.get::<_, String>(0)
        });
        match rows {
            Ok(rows) => rows
                .filter_map(Result::ok)
                .filter_map(|key| {
                    key.strip_prefix(RECORD_KEY_PREFIX)
                        .map(std::string::ToString::to_string)
                })
                .collect(),
            Err(err) => {
                warn!(error = %err, "pending key listing failed");
                Vec::new()
            },
        }
    }
}

/// In-memory store used as a test fake and as the fallback when the durable
/// database cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a raw entry, bypassing serialization.
    ///
    /// Lets tests plant malformed values to exercise corruption handling.
    pub fn insert_raw(&self, storage_key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(storage_key.to_string(), value.to_string());
        }
    }
}

impl PendingStore for MemoryStore {
    fn save(&self, cache_key: &str, record: &PendingInscriptionRecord) {
        let Ok(json) = serde_json::to_string(record) else {
            return;
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(record_storage_key(cache_key), json);
        }
    }

    fn load(&self, cache_key: &str) -> Option<PendingInscriptionRecord> {
        let entries = self.entries.lock().ok()?;
        let raw = entries.get(&record_storage_key(cache_key))?;
        serde_json::from_str(raw).ok()
    }

    fn start_timer(&self, cache_key: &str, now_ms: u64) -> u64 {
        let Ok(mut entries) = self.entries.lock() else {
            return now_ms;
        };
        let key = timer_storage_key(cache_key);
        if let Some(started_at) = entries.get(&key).and_then(|raw| raw.parse().ok()) {
            return started_at;
        }
        entries.insert(key, now_ms.to_string());
        now_ms
    }

    fn timer_started_at(&self, cache_key: &str) -> Option<u64> {
        let entries = self.entries.lock().ok()?;
        entries
            .get(&timer_storage_key(cache_key))
            .and_then(|raw| raw.parse().ok())
    }

    fn clear(&self, cache_key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(&record_storage_key(cache_key));
            entries.remove(&timer_storage_key(cache_key));
        }
    }

    fn pending_keys(&self) -> Vec<String> {
        let Ok(entries) = self.entries.lock() else {
            return Vec::new();
        };
        let mut keys: Vec<String> = entries
            .keys()
            .filter_map(|key| key.strip_prefix(RECORD_KEY_PREFIX))
            .map(std::string::ToString::to_string)
            .collect();
        keys.sort();
        keys
    }
}
