//! Unit tests for the Calcdesk database layer (connection + migrations).

use calcdesk::database::migrations::CURRENT_SCHEMA_VERSION;
use calcdesk::database::Database;
use tempfile::TempDir;

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_kv_store_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    for table in ["schema_version", "kv_store"] {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .unwrap_or(false);
        assert!(exists, "Table '{}' should exist after migrations", table);
    }
}

#[test]
fn test_schema_version_is_current() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.schema_version(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_kv_store_key_is_unique() {
    let db = Database::open_in_memory().unwrap();
    let conn = db.connection();

    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES ('k', 'a', 0)",
        [],
    )
    .unwrap();
    let dup = conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES ('k', 'b', 0)",
        [],
    );
    assert!(dup.is_err(), "Duplicate key should violate the primary key");
}

#[test]
fn test_open_creates_parent_dirs_and_reopens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("calcdesk.db");

    {
        let db = Database::open(&path).expect("open should create parent dirs");
        db.connection()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES ('k', 'v', 1)",
                [],
            )
            .unwrap();
    }

    let db = Database::open(&path).expect("reopen failed");
    let value: String = db
        .connection()
        .query_row("SELECT value FROM kv_store WHERE key = 'k'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(value, "v");
    assert_eq!(db.schema_version(), CURRENT_SCHEMA_VERSION);
}
