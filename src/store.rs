//! Status store trait and `SQLite` implementation.
//!
//! Each (task, date) pair maps to exactly one row. Every write is a single
//! independent atomic statement; there are no cross-key transactions and the
//! last writer wins.

use crate::error::Result;
use crate::models::TaskStatusRecord;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// Date format used for the `task_date` column.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trait for task status storage operations.
///
/// The production implementation is [`SqliteStatusStore`]; tests substitute
/// an in-memory double.
#[allow(clippy::missing_errors_doc)]
pub trait StatusStore {
    /// Insert an unchecked record for the key if none exists yet.
    ///
    /// Must not touch an existing record, whatever its current status.
    fn put_default(&self, task_name: &str, task_date: NaiveDate) -> Result<()>;

    /// Fetch all records for one date, ordered by task name.
    fn records_for_date(&self, task_date: NaiveDate) -> Result<Vec<TaskStatusRecord>>;

    /// Update the status of one record. Returns false if the key is absent.
    fn set_done(&self, task_name: &str, task_date: NaiveDate, done: bool) -> Result<bool>;
}

/// SQLite-based status store.
///
/// Each operation opens a new connection to the database file. This avoids
/// thread safety issues and is acceptable for the low frequency of
/// interactive toggles.
#[derive(Debug, Clone)]
pub struct SqliteStatusStore {
    /// Path to the database file.
    db_path: PathBuf,
}

impl SqliteStatusStore {
    /// Create a new `SQLite` status store at the given database path.
    ///
    /// Constructing the store creates the schema if it is missing, which
    /// doubles as the startup probe that the table is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            r"
            -- One row per (task, date); status persisted as 0/1
            CREATE TABLE IF NOT EXISTS task_status (
                task_name TEXT NOT NULL,
                task_date TEXT NOT NULL,
                done INTEGER NOT NULL DEFAULT 0 CHECK (done IN (0, 1)),
                PRIMARY KEY (task_name, task_date)
            );

            CREATE INDEX IF NOT EXISTS idx_task_status_date ON task_status(task_date);
            ",
        )?;

        Ok(())
    }

    /// Parse a record from a row.
    fn parse_record(row: &rusqlite::Row) -> rusqlite::Result<TaskStatusRecord> {
        let date_str: String = row.get(1)?;
        let done_val: i64 = row.get(2)?;

        let task_date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

        Ok(TaskStatusRecord { task_name: row.get(0)?, task_date, done: done_val != 0 })
    }
}

impl StatusStore for SqliteStatusStore {
    fn put_default(&self, task_name: &str, task_date: NaiveDate) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "INSERT OR IGNORE INTO task_status (task_name, task_date, done) VALUES (?1, ?2, 0)",
            params![task_name, task_date.format(DATE_FORMAT).to_string()],
        )?;
        Ok(())
    }

    fn records_for_date(&self, task_date: NaiveDate) -> Result<Vec<TaskStatusRecord>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT task_name, task_date, done FROM task_status
             WHERE task_date = ?1 ORDER BY task_name ASC",
        )?;
        let records = stmt
            .query_map(params![task_date.format(DATE_FORMAT).to_string()], Self::parse_record)?
            .flatten()
            .collect();
        Ok(records)
    }

    fn set_done(&self, task_name: &str, task_date: NaiveDate, done: bool) -> Result<bool> {
        let conn = self.open()?;
        let rows = conn.execute(
            "UPDATE task_status SET done = ?3 WHERE task_name = ?1 AND task_date = ?2",
            params![task_name, task_date.format(DATE_FORMAT).to_string(), i64::from(done)],
        )?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, SqliteStatusStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStatusStore::new(dir.path().join("status.sqlite3")).unwrap();
        (dir, store)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_store_creates_database() {
        let (_dir, store) = create_test_store();
        assert!(store.db_path().exists());
    }

    #[test]
    fn test_put_default_and_fetch() {
        let (_dir, store) = create_test_store();
        let day = date(2024, 1, 1);

        store.put_default("Exercise", day).unwrap();
        let records = store.records_for_date(day).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].task_name, "Exercise");
        assert_eq!(records[0].task_date, day);
        assert!(!records[0].done);
    }

    #[test]
    fn test_put_default_does_not_reset_toggled_status() {
        let (_dir, store) = create_test_store();
        let day = date(2024, 1, 1);

        store.put_default("Exercise", day).unwrap();
        assert!(store.set_done("Exercise", day, true).unwrap());

        // Re-initializing the key must leave the toggled status alone
        store.put_default("Exercise", day).unwrap();
        let records = store.records_for_date(day).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].done);
    }

    #[test]
    fn test_records_for_date_filters_by_date() {
        let (_dir, store) = create_test_store();

        store.put_default("Exercise", date(2024, 1, 1)).unwrap();
        store.put_default("Exercise", date(2024, 1, 2)).unwrap();
        store.put_default("Read", date(2024, 1, 1)).unwrap();

        let records = store.records_for_date(date(2024, 1, 1)).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.task_date == date(2024, 1, 1)));
    }

    #[test]
    fn test_records_ordered_by_task_name() {
        let (_dir, store) = create_test_store();
        let day = date(2024, 1, 1);

        store.put_default("Water plants", day).unwrap();
        store.put_default("Exercise", day).unwrap();
        store.put_default("Read", day).unwrap();

        let names: Vec<String> =
            store.records_for_date(day).unwrap().into_iter().map(|r| r.task_name).collect();
        assert_eq!(names, vec!["Exercise", "Read", "Water plants"]);
    }

    #[test]
    fn test_set_done_round_trip() {
        let (_dir, store) = create_test_store();
        let day = date(2024, 1, 1);

        store.put_default("Exercise", day).unwrap();
        assert!(store.set_done("Exercise", day, true).unwrap());
        assert!(store.records_for_date(day).unwrap()[0].done);

        assert!(store.set_done("Exercise", day, false).unwrap());
        assert!(!store.records_for_date(day).unwrap()[0].done);
    }

    #[test]
    fn test_set_done_missing_key_returns_false() {
        let (_dir, store) = create_test_store();
        assert!(!store.set_done("Exercise", date(2024, 1, 1), false).unwrap());
    }

    #[test]
    fn test_empty_date_returns_no_records() {
        let (_dir, store) = create_test_store();
        assert!(store.records_for_date(date(2024, 1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("status.sqlite3");
        let day = date(2024, 1, 1);

        {
            let store = SqliteStatusStore::new(&path).unwrap();
            store.put_default("Exercise", day).unwrap();
            store.set_done("Exercise", day, true).unwrap();
        }

        let store = SqliteStatusStore::new(&path).unwrap();
        let records = store.records_for_date(day).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].done);
    }
}
