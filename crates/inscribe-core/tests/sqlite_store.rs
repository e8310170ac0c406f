//! Integration tests for the durable `SQLite` pending store: restart
//! survival, corruption tolerance, and timer idempotence across reopens.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::NaiveDate;
use inscribe_core::pending::{
    Participant, PendingInscriptionRecord, PendingStore, SqliteStore, record_storage_key,
};

fn sample_record(cache_key: &str) -> PendingInscriptionRecord {
    PendingInscriptionRecord {
        cache_key: cache_key.to_string(),
        participant: Participant {
            name: "Ana Souza".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2011, 3, 14).unwrap(),
            gender: "F".to_string(),
            type_description: "Child (10-12)".to_string(),
            value: 35.0,
        },
    }
}

#[test]
fn save_load_clear_round_trip() {
    let store = SqliteStore::open_in_memory().unwrap();
    let record = sample_record("abc123");

    store.save("abc123", &record);
    assert_eq!(store.load("abc123"), Some(record));

    store.clear("abc123");
    assert_eq!(store.load("abc123"), None);
}

#[test]
fn record_and_timer_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pending.db");

    {
        let store = SqliteStore::open(&db_path).unwrap();
        store.save("abc123", &sample_record("abc123"));
        assert_eq!(store.start_timer("abc123", 41_000), 41_000);
    }

    // A fresh process over the same file resumes the same window.
    let store = SqliteStore::open(&db_path).unwrap();
    assert!(store.load("abc123").is_some());
    assert_eq!(store.start_timer("abc123", 999_000), 41_000);
    assert_eq!(store.timer_started_at("abc123"), Some(41_000));
}

#[test]
fn creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("state").join("inscribe").join("pending.db");
    let store = SqliteStore::open(&db_path).unwrap();
    store.save("abc123", &sample_record("abc123"));
    assert!(store.load("abc123").is_some());
}

#[test]
fn corrupted_row_reads_as_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pending.db");
    {
        let store = SqliteStore::open(&db_path).unwrap();
        store.save("abc123", &sample_record("abc123"));
    }

    // Corrupt the stored JSON behind the store's back.
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    conn.execute(
        "UPDATE pending_entries SET value = '{truncated' WHERE storage_key = ?1",
        rusqlite::params![record_storage_key("abc123")],
    )
    .unwrap();
    drop(conn);

    let store = SqliteStore::open(&db_path).unwrap();
    assert_eq!(store.load("abc123"), None);
}

#[test]
fn malformed_timer_restarts_the_window() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pending.db");
    {
        let store = SqliteStore::open(&db_path).unwrap();
        store.start_timer("abc123", 41_000);
    }

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    conn.execute(
        "UPDATE pending_entries SET value = 'not-a-number' WHERE storage_key = ?1",
        rusqlite::params!["individual-time-abc123"],
    )
    .unwrap();
    drop(conn);

    let store = SqliteStore::open(&db_path).unwrap();
    assert_eq!(store.start_timer("abc123", 77_000), 77_000);
    assert_eq!(store.timer_started_at("abc123"), Some(77_000));
}

#[test]
fn pending_keys_lists_records_in_order() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.save("beta", &sample_record("beta"));
    store.save("alpha", &sample_record("alpha"));
    store.start_timer("gamma", 1_000);
    assert_eq!(store.pending_keys(), vec!["alpha", "beta"]);
}

#[test]
fn save_replaces_the_previous_record_wholesale() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.save("abc123", &sample_record("abc123"));

    let mut updated = sample_record("abc123");
    updated.participant.type_description = "Teen (13-17)".to_string();
    store.save("abc123", &updated);

    assert_eq!(store.load("abc123"), Some(updated));
}
