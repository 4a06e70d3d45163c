//! Unit tests for the key-value storage backends.

use std::fs;
use std::sync::Arc;

use calcdesk::database::Database;
use calcdesk::services::key_value_store::{FileStore, KeyValueStore, MemoryStore, SqliteStore};
use tempfile::TempDir;

/// Behavior every backend must share.
fn exercise(store: &mut dyn KeyValueStore) {
    assert_eq!(store.get("a").unwrap(), None);

    store.set("a", "1").unwrap();
    store.set("b", "[]").unwrap();
    assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    assert_eq!(store.get("b").unwrap().as_deref(), Some("[]"));

    store.set("a", "2").unwrap();
    assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
}

#[test]
fn test_memory_store_contract() {
    exercise(&mut MemoryStore::new());
}

#[test]
fn test_file_store_contract() {
    let dir = TempDir::new().unwrap();
    exercise(&mut FileStore::new(dir.path().join("store.json")));
}

#[test]
fn test_sqlite_store_contract() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    exercise(&mut SqliteStore::new(db));
}

#[test]
fn test_file_store_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join("store.json");

    let mut store = FileStore::new(&path);
    store.set("k", "v").unwrap();
    assert!(path.exists());
}

#[test]
fn test_file_store_empty_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, "").unwrap();

    let store = FileStore::new(&path);
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn test_file_store_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, "[1, 2").unwrap();

    let store = FileStore::new(&path);
    assert!(store.get("k").is_err());
}

#[test]
fn test_file_stores_share_a_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let mut writer = FileStore::new(&path);
    let reader = FileStore::new(&path);
    writer.set("k", "v").unwrap();
    assert_eq!(reader.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn test_sqlite_store_persists_across_connections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("calcdesk.db");

    {
        let db = Arc::new(Database::open(&path).unwrap());
        let mut store = SqliteStore::new(db);
        store.set("calcHistory", "[]").unwrap();
    }

    let db = Arc::new(Database::open(&path).unwrap());
    let store = SqliteStore::new(db);
    assert_eq!(store.get("calcHistory").unwrap().as_deref(), Some("[]"));
}
