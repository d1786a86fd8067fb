use std::fs;

use chrono::{TimeZone, Utc};
use tally_core::{
    storage::{KeyValueStore, TransactionRepository, THEME_KEY, TRANSACTIONS_KEY},
    CoreError,
};
use tally_domain::{Theme, Transaction, TransactionKind};
use tally_storage_json::{JsonFileStore, STORAGE_FILE};
use tempfile::tempdir;

fn sample_log() -> Vec<Transaction> {
    let date = Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap();
    vec![
        Transaction::new(TransactionKind::Income, 100.0, "Salary", "May", date),
        Transaction::new(TransactionKind::Expense, 40.0, "Food", "Lunch", date),
    ]
}

#[test]
fn json_store_round_trips_log_across_reopen() {
    let dir = tempdir().expect("tempdir");
    let log = sample_log();
    {
        let store = JsonFileStore::open(dir.path()).expect("open store");
        let mut repo = TransactionRepository::new(store);
        repo.save(&log).expect("save log");
        repo.save_theme(Theme::Dark).expect("save theme");
    }

    let reopened = JsonFileStore::open(dir.path()).expect("reopen store");
    let repo = TransactionRepository::new(reopened);
    assert_eq!(repo.load().expect("load log"), log);
    assert_eq!(repo.load_theme().expect("load theme"), Theme::Dark);
}

#[test]
fn json_store_writes_one_document_with_string_values() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::open(dir.path()).expect("open store");
    let mut repo = TransactionRepository::new(store);
    repo.save(&sample_log()).expect("save log");
    repo.save_theme(Theme::Light).expect("save theme");

    let path = dir.path().join(STORAGE_FILE);
    assert!(path.exists());
    assert!(!dir.path().join("storage.json.tmp").exists());

    let raw = fs::read_to_string(&path).expect("read storage file");
    let document: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(document[THEME_KEY], "light");
    let log_text = document[TRANSACTIONS_KEY].as_str().expect("log stored as string");
    let records: serde_json::Value = serde_json::from_str(log_text).expect("log is json");
    assert_eq!(records[0]["type"], "income");
    assert_eq!(records[1]["category"], "Food");
}

#[test]
fn json_store_missing_file_starts_empty() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::open(dir.path().join("nested")).expect("open store");
    assert!(store.get(TRANSACTIONS_KEY).expect("get").is_none());
    let repo = TransactionRepository::new(store);
    assert!(repo.load().expect("load").is_empty());
}

#[test]
fn json_store_rejects_malformed_file() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join(STORAGE_FILE), "[1, 2").expect("write garbage");
    let err = JsonFileStore::open(dir.path()).expect_err("malformed file");
    assert!(matches!(err, CoreError::Persistence(ref message) if message.contains("malformed")));
}

#[test]
fn json_store_remove_drops_key() {
    let dir = tempdir().expect("tempdir");
    let mut store = JsonFileStore::open(dir.path()).expect("open store");
    store.set(THEME_KEY, "dark").expect("set");
    store.remove(THEME_KEY).expect("remove");
    store.remove(THEME_KEY).expect("second remove is a no-op");

    let reopened = JsonFileStore::open(dir.path()).expect("reopen");
    assert!(reopened.get(THEME_KEY).expect("get").is_none());
}

#[test]
fn json_store_failed_write_keeps_previous_value() {
    let dir = tempdir().expect("tempdir");
    let mut store = JsonFileStore::open(dir.path()).expect("open store");
    store.set(THEME_KEY, "light").expect("first write");

    // A directory in the temp file's place makes every flush fail.
    fs::create_dir(dir.path().join("storage.json.tmp")).expect("block temp file");

    let err = store.set(THEME_KEY, "dark").expect_err("write must fail");
    assert!(matches!(err, CoreError::Persistence(_)));
    assert_eq!(store.get(THEME_KEY).expect("get").as_deref(), Some("light"));

    assert!(store.set(TRANSACTIONS_KEY, "[]").is_err());
    assert!(store.get(TRANSACTIONS_KEY).expect("get").is_none());

    let on_disk = fs::read_to_string(dir.path().join(STORAGE_FILE)).expect("read storage file");
    let document: serde_json::Value = serde_json::from_str(&on_disk).expect("valid json");
    assert_eq!(document[THEME_KEY], "light");
}
