//! SQLite-backed cache persistence
//!
//! One row per cache entry: key, JSON value, and the wall-clock time of the
//! last successful write. The store knows nothing about freshness — TTL policy
//! lives in [`crate::cache::ttl::TtlCache`], which is what lets callers pick a
//! different window per entity type over the same stored rows.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

use crate::error::CacheError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

type Result<T> = std::result::Result<T, CacheError>;

/// A stored cache entry: the serialized value and its write timestamp.
///
/// The row is written atomically, so a reader can never observe a value paired
/// with another write's timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    /// Serialized JSON payload
    pub value: String,
    /// Unix epoch milliseconds of the last successful write
    pub stored_at_ms: i64,
}

impl StoredEntry {
    /// Age of the entry relative to now, in milliseconds.
    ///
    /// Clock skew can make this negative; callers treat that as fresh.
    pub fn age_ms(&self) -> i64 {
        Utc::now().timestamp_millis() - self.stored_at_ms
    }
}

/// Durable key-value store for cache entries
pub struct CacheStore {
    conn: Connection,
}

impl CacheStore {
    /// Open or create the store at the default XDG cache location
    pub fn open() -> Result<Self> {
        let cache_dir = Self::cache_dir()?;
        Self::open_at(&cache_dir)
    }

    /// Get the cache directory path (~/.cache/venuecache on Linux/macOS)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir()
            .ok_or_else(|| CacheError::Storage("Could not determine cache directory".to_string()))?;
        Ok(cache_base.join("venuecache"))
    }

    /// Open the store at a specific directory (for testing)
    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Storage(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join("cache.db");
        let conn = Connection::open(&db_path)?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            std::fs::remove_file(&db_path)
                .map_err(|e| CacheError::Storage(format!("Failed to remove cache DB: {}", e)))?;
            return Self::open_at(cache_dir);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                cache_key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                stored_at INTEGER NOT NULL
            );
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn })
    }

    /// Read the entry for a key. A missing key is `Ok(None)`, never an error.
    pub fn read(&self, key: &str) -> Result<Option<StoredEntry>> {
        let entry = self
            .conn
            .query_row(
                "SELECT value, stored_at FROM cache_entries WHERE cache_key = ?1",
                [key],
                |row| {
                    Ok(StoredEntry {
                        value: row.get(0)?,
                        stored_at_ms: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    /// Write an entry, replacing any previous row for the key.
    ///
    /// The whole row (key, value, timestamp) lands in one statement, so a
    /// failed write leaves the previous entry intact rather than a torn one.
    pub fn write(&self, key: &str, value: &str, stored_at_ms: i64) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO cache_entries (cache_key, value, stored_at)
             VALUES (?1, ?2, ?3)",
            params![key, value, stored_at_ms],
        )?;
        Ok(())
    }

    /// Delete the entry for a key. Returns whether a row was removed.
    pub fn invalidate(&self, key: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM cache_entries WHERE cache_key = ?1", [key])?;
        Ok(deleted > 0)
    }

    /// Clear all cache entries
    pub fn clear_all(&self) -> Result<ClearStats> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cache_entries", [], |r| r.get(0))?;

        self.conn.execute("DELETE FROM cache_entries", [])?;

        Ok(ClearStats {
            entries_removed: count as usize,
        })
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let total_entries: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM cache_entries", [], |r| r.get(0))?;

        let total_size: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(value)), 0) FROM cache_entries",
            [],
            |r| r.get(0),
        )?;

        let oldest: Option<i64> = self
            .conn
            .query_row("SELECT MIN(stored_at) FROM cache_entries", [], |r| r.get(0))
            .optional()?
            .flatten();

        let newest: Option<i64> = self
            .conn
            .query_row("SELECT MAX(stored_at) FROM cache_entries", [], |r| r.get(0))
            .optional()?
            .flatten();

        Ok(CacheStats {
            total_entries: total_entries as usize,
            total_size_bytes: total_size as usize,
            oldest_entry_ms: oldest,
            newest_entry_ms: newest,
        })
    }

    /// Drop the backing table so subsequent reads and writes fail.
    #[cfg(test)]
    pub(crate) fn break_storage(&self) {
        self.conn
            .execute_batch("DROP TABLE cache_entries")
            .expect("drop cache_entries");
    }
}

/// Statistics about a cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_size_bytes: usize,
    pub oldest_entry_ms: Option<i64>,
    pub newest_entry_ms: Option<i64>,
}
