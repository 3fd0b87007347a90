//! Database Connection and Setup
//!
//! SQLite-backed key/value storage with migrations.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::traits::KeyValueStore;
use crate::domain::{DomainError, DomainResult};

/// SQLite implementation of key/value storage
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path`. `:memory:` opens a private in-memory db.
    pub fn open(db_path: &Path) -> DomainResult<Self> {
        let conn = if db_path == Path::new(":memory:") {
            Connection::open_in_memory()
        } else {
            if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DomainError::persistence(format!("Failed to create {}: {}", parent.display(), e)))?;
            }
            Connection::open(db_path)
        }
        .map_err(|e| DomainError::persistence(format!("Failed to open db: {}", e)))?;

        run_migrations(&conn)?;
        log::info!("Opened key/value store at {}", db_path.display());
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> DomainResult<Self> {
        Self::open(Path::new(":memory:"))
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> DomainResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_store ORDER BY key")
            .map_err(|e| DomainError::persistence(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| DomainError::persistence(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::persistence(e.to_string()))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| DomainError::persistence(e.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, chrono::Utc::now().timestamp_millis()],
            )
            .map_err(|e| DomainError::persistence(e.to_string()))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DomainResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(|e| DomainError::persistence(e.to_string()))?;
        Ok(())
    }
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(names) = stmt.query_map([], |row| row.get::<_, String>(1)) else {
        return false;
    };
    let found = names.flatten().any(|name| name == column);
    found
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| DomainError::persistence(e.to_string()))?;

    // Added after the first release
    if !column_exists(conn, "kv_store", "updated_at") {
        conn.execute("ALTER TABLE kv_store ADD COLUMN updated_at INTEGER", [])
            .map_err(|e| DomainError::persistence(format!("Failed to add updated_at: {}", e)))?;
    }

    Ok(())
}
