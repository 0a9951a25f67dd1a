use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use camport_domain::{ImportKey, LedgerEntry};
use chrono::{DateTime, Local, NaiveDate};

use crate::ApplicationError;

/// Persistent record of completed imports.
///
/// The check in `was_imported` and the insert in `record_import` are not
/// atomic together; callers must not share a ledger across threads.
pub trait ImportLedger {
    fn was_imported(&self, key: &ImportKey) -> Result<bool, ApplicationError>;

    fn record_import(&self, entry: &LedgerEntry) -> Result<(), ApplicationError>;

    fn entry_count(&self) -> Result<u64, ApplicationError>;

    fn entries(&self) -> Result<Vec<LedgerEntry>, ApplicationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Name exactly as stored on the source volume.
    pub file_name: OsString,
    /// Text form of `file_name` for the ledger and logs. Scanners must map
    /// distinct file names to distinct text.
    pub name: String,
    pub size_bytes: u64,
}

pub trait FileScanner {
    /// Every regular file below `root`, recursively.
    fn scan(&self, root: &Path) -> Result<Vec<ScannedFile>, ApplicationError>;
}

pub trait FileTransfer {
    /// Local calendar date of the file's creation time.
    fn creation_date(&self, path: &Path) -> Result<NaiveDate, ApplicationError>;

    /// Copies `source` to `destination_dir/file_name`, creating the directory
    /// when needed, and returns the number of bytes written.
    fn copy_into(
        &self,
        source: &Path,
        destination_dir: &Path,
        file_name: &OsStr,
    ) -> Result<u64, ApplicationError>;
}

pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

pub trait ProgressReporter {
    /// Called once per file with a 1-based `current`. A run over an empty
    /// source reports `(0, 0)` once.
    fn report(&mut self, current: usize, total: usize);
}

#[derive(Debug, Default)]
pub struct NoopProgressReporter;

impl ProgressReporter for NoopProgressReporter {
    fn report(&mut self, _current: usize, _total: usize) {}
}
