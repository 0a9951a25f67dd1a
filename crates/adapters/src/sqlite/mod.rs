mod queries;

use std::fs;
use std::path::{Path, PathBuf};

use camport_application::{ApplicationError, ImportLedger};
use camport_domain::{format_date, parse_date, ImportKey, LedgerEntry};
use rusqlite::Connection;
use tracing::debug;

use crate::migrations::MIGRATIONS;

/// Import ledger stored in a single SQLite file next to the imported media.
///
/// The connection lives as long as the ledger and is closed on drop. Call
/// [`SqliteImportLedger::close`] to observe close errors.
#[derive(Debug)]
pub struct SqliteImportLedger {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteImportLedger {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ApplicationError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "ledger path must not be empty".to_string(),
            ));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|error| {
                    ApplicationError::Persistence(format!(
                        "failed to create ledger directory {}: {error}",
                        parent.display()
                    ))
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|error| {
            ApplicationError::Persistence(format!(
                "failed to open ledger {}: {error}",
                path.display()
            ))
        })?;
        debug!("opened ledger {}", path.display());
        Self::initialize(conn, Some(path.to_path_buf()))
    }

    pub fn open_in_memory() -> Result<Self, ApplicationError> {
        let conn = Connection::open_in_memory()
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        Self::initialize(conn, None)
    }

    fn initialize(conn: Connection, path: Option<PathBuf>) -> Result<Self, ApplicationError> {
        for migration in MIGRATIONS {
            conn.execute_batch(migration).map_err(|error| {
                ApplicationError::Persistence(format!("failed to apply ledger schema: {error}"))
            })?;
        }
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn close(self) -> Result<(), ApplicationError> {
        self.conn
            .close()
            .map_err(|(_, error)| ApplicationError::Persistence(error.to_string()))
    }
}

impl ImportLedger for SqliteImportLedger {
    fn was_imported(&self, key: &ImportKey) -> Result<bool, ApplicationError> {
        queries::file_found(&self.conn, key.name(), &format_date(key.created_date()))
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }

    fn record_import(&self, entry: &LedgerEntry) -> Result<(), ApplicationError> {
        queries::insert_file(
            &self.conn,
            &entry.name,
            &format_date(entry.created_date),
            &format_date(entry.copied_date),
            entry.size_mb,
        )
        .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }

    fn entry_count(&self) -> Result<u64, ApplicationError> {
        let count = queries::count_files(&self.conn)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        Ok(count.max(0) as u64)
    }

    fn entries(&self) -> Result<Vec<LedgerEntry>, ApplicationError> {
        let rows = queries::list_files(&self.conn)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        rows.into_iter()
            .map(|row| -> Result<LedgerEntry, ApplicationError> {
                Ok(LedgerEntry {
                    created_date: parse_date(&row.date_created)?,
                    copied_date: parse_date(&row.date_copied)?,
                    name: row.file_name,
                    size_mb: row.size,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn entry(name: &str) -> LedgerEntry {
        LedgerEntry {
            name: name.to_string(),
            created_date: NaiveDate::from_ymd_opt(2024, 1, 5).expect("date"),
            copied_date: NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"),
            size_mb: 2.0,
        }
    }

    #[test]
    fn open_creates_schema_and_parent_directory() {
        let dir = TempDir::new().expect("tempdir");
        let db_path = dir.path().join("logs").join("file_log.sqlite");

        let ledger = SqliteImportLedger::open(&db_path).expect("open");
        assert_eq!(ledger.path(), Some(db_path.as_path()));
        ledger.close().expect("close");

        let conn = Connection::open(db_path).expect("open");
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='files'",
                [],
                |row| row.get(0),
            )
            .expect("query");
        assert_eq!(count, 1);
    }

    #[test]
    fn entries_survive_reopening() {
        let dir = TempDir::new().expect("tempdir");
        let db_path = dir.path().join("file_log.sqlite");

        let ledger = SqliteImportLedger::open(&db_path).expect("open");
        ledger.record_import(&entry("A.mp4")).expect("record");
        ledger.record_import(&entry("B.jpg")).expect("record");
        ledger.close().expect("close");

        let reopened = SqliteImportLedger::open(&db_path).expect("reopen");
        assert_eq!(reopened.entry_count().expect("count"), 2);
        assert_eq!(
            reopened.entries().expect("entries"),
            vec![entry("A.mp4"), entry("B.jpg")]
        );
        let key = entry("A.mp4").key().expect("key");
        assert!(reopened.was_imported(&key).expect("lookup"));
    }

    #[test]
    fn was_imported_requires_matching_date() {
        let ledger = SqliteImportLedger::open_in_memory().expect("open");
        ledger.record_import(&entry("GX010001.MP4")).expect("record");

        let same_day = ImportKey::new(
            "gx010001.mp4",
            NaiveDate::from_ymd_opt(2024, 1, 5).expect("date"),
        )
        .expect("key");
        let next_day = ImportKey::new(
            "GX010001.MP4",
            NaiveDate::from_ymd_opt(2024, 1, 6).expect("date"),
        )
        .expect("key");

        assert!(ledger.was_imported(&same_day).expect("lookup"));
        assert!(!ledger.was_imported(&next_day).expect("lookup"));
    }

    #[test]
    fn reuses_ledger_created_without_index() {
        let dir = TempDir::new().expect("tempdir");
        let db_path = dir.path().join("file_log.sqlite");
        {
            let conn = Connection::open(&db_path).expect("open");
            conn.execute_batch(
                "CREATE TABLE files (file_name TEXT, date_created TEXT, date_copied TEXT, size REAL);
                 INSERT INTO files VALUES ('OLD.JPG', '2023-12-31', '2024-01-01', 3.5);",
            )
            .expect("legacy schema");
        }

        let ledger = SqliteImportLedger::open(&db_path).expect("open");
        let key = ImportKey::new(
            "OLD.JPG",
            NaiveDate::from_ymd_opt(2023, 12, 31).expect("date"),
        )
        .expect("key");
        assert!(ledger.was_imported(&key).expect("lookup"));
        assert_eq!(ledger.entry_count().expect("count"), 1);
    }

    #[test]
    fn unreachable_location_is_a_persistence_error() {
        let dir = TempDir::new().expect("tempdir");
        let blocker = dir.path().join("logs");
        fs::write(&blocker, b"not a directory").expect("write");

        let result = SqliteImportLedger::open(blocker.join("file_log.sqlite"));
        assert!(matches!(result, Err(ApplicationError::Persistence(_))));
    }
}
