//! SQLite-backed failure history.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection};

use super::{normalize_release_name, FailureHistory, HistoryError};

/// SQLite-backed failure history.
pub struct SqliteFailureHistory {
    conn: Mutex<Connection>,
}

impl SqliteFailureHistory {
    /// Open (or create) the history database at `path`.
    pub fn new(path: &Path) -> Result<Self, HistoryError> {
        let conn = Connection::open(path).map_err(|e| HistoryError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory history (useful for testing).
    pub fn in_memory() -> Result<Self, HistoryError> {
        let conn =
            Connection::open_in_memory().map_err(|e| HistoryError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), HistoryError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS failed_releases (
                name TEXT NOT NULL,
                size_bytes INTEGER NOT NULL,
                provider_id TEXT NOT NULL,
                failed_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS snatches (
                name TEXT NOT NULL,
                size_bytes INTEGER NOT NULL,
                provider_id TEXT NOT NULL,
                snatched_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_failed_releases_name ON failed_releases(name);
            CREATE INDEX IF NOT EXISTS idx_snatches_name ON snatches(name);
            "#,
        )
        .map_err(|e| HistoryError::Database(e.to_string()))?;

        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned lock means a panic mid-statement; the connection itself
        // is still usable for independent statements.
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FailureHistory for SqliteFailureHistory {
    fn has_failed(
        &self,
        name: &str,
        size_bytes: u64,
        provider_id: &str,
    ) -> Result<bool, HistoryError> {
        let normalized = normalize_release_name(name);
        let conn = self.lock();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM failed_releases
                 WHERE name = ?1 AND size_bytes = ?2 AND provider_id = ?3",
                params![normalized, size_bytes as i64, provider_id],
                |row| row.get(0),
            )
            .map_err(|e| HistoryError::Database(e.to_string()))?;
        Ok(count > 0)
    }

    fn record_failure(
        &self,
        name: &str,
        size_bytes: u64,
        provider_id: &str,
    ) -> Result<(), HistoryError> {
        let normalized = normalize_release_name(name);
        let conn = self.lock();
        conn.execute(
            "INSERT INTO failed_releases (name, size_bytes, provider_id, failed_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                normalized,
                size_bytes as i64,
                provider_id,
                Utc::now().to_rfc3339()
            ],
        )
        .map_err(|e| HistoryError::Database(e.to_string()))?;
        Ok(())
    }

    fn record_snatch(
        &self,
        name: &str,
        size_bytes: u64,
        provider_id: &str,
    ) -> Result<(), HistoryError> {
        let normalized = normalize_release_name(name);
        let conn = self.lock();
        conn.execute(
            "INSERT INTO snatches (name, size_bytes, provider_id, snatched_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                normalized,
                size_bytes as i64,
                provider_id,
                Utc::now().to_rfc3339()
            ],
        )
        .map_err(|e| HistoryError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_failed_exact_triple() {
        let history = SqliteFailureHistory::in_memory().unwrap();
        history
            .record_failure("Show.S01E01.720p", 1000, "usenet-a")
            .unwrap();

        assert!(history.has_failed("Show.S01E01.720p", 1000, "usenet-a").unwrap());
        // Any element of the triple differing is not a match
        assert!(!history.has_failed("Show.S01E01.720p", 1001, "usenet-a").unwrap());
        assert!(!history.has_failed("Show.S01E01.720p", 1000, "usenet-b").unwrap());
        assert!(!history.has_failed("Show.S01E02.720p", 1000, "usenet-a").unwrap());
    }

    #[test]
    fn test_has_failed_normalizes_name() {
        let history = SqliteFailureHistory::in_memory().unwrap();
        history
            .record_failure("Show Name S01E01 720p.nzb", 1000, "usenet-a")
            .unwrap();

        assert!(history
            .has_failed("Show.Name.S01E01.720p", 1000, "usenet-a")
            .unwrap());
    }

    #[test]
    fn test_empty_history() {
        let history = SqliteFailureHistory::in_memory().unwrap();
        assert!(!history.has_failed("Show.S01E01", 1, "p").unwrap());
    }

    #[test]
    fn test_record_snatch() {
        let history = SqliteFailureHistory::in_memory().unwrap();
        history
            .record_snatch("Show.S01E01.720p", 1000, "usenet-a")
            .unwrap();
        // A snatch alone is not a failure
        assert!(!history.has_failed("Show.S01E01.720p", 1000, "usenet-a").unwrap());
    }

    #[test]
    fn test_file_backed_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.db");
        {
            let history = SqliteFailureHistory::new(&path).unwrap();
            history.record_failure("Show.S01E01", 42, "p").unwrap();
        }
        // Reopen and the record is still there
        let history = SqliteFailureHistory::new(&path).unwrap();
        assert!(history.has_failed("Show.S01E01", 42, "p").unwrap());
    }
}
