use std::ffi::OsStr;
use std::path::Path;

use camport_application::{ApplicationError, FileScanner, ScannedFile};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct WalkdirFileScanner;

impl FileScanner for WalkdirFileScanner {
    fn scan(&self, root: &Path) -> Result<Vec<ScannedFile>, ApplicationError> {
        if !root.is_dir() {
            return Err(ApplicationError::InvalidInput(format!(
                "source does not exist or is not a directory: {}",
                root.display()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    warn!("skipping unreadable entry below {}: {error}", root.display());
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            // A file whose metadata cannot be read is still listed so that the
            // failure surfaces when it is imported.
            let size_bytes = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(error) => {
                    debug!("no metadata for {}: {error}", entry.path().display());
                    0
                }
            };

            files.push(ScannedFile {
                path: entry.path().to_path_buf(),
                file_name: entry.file_name().to_os_string(),
                name: ledger_name(entry.file_name()),
                size_bytes,
            });
        }

        Ok(files)
    }
}

/// Text form of a file name for the ledger and logs.
///
/// UTF-8 names without a backslash are kept as they are. Anything else is
/// written with `\\` and `\xNN` escapes, so two different names never share
/// a text form.
#[cfg(unix)]
fn ledger_name(file_name: &OsStr) -> String {
    use std::os::unix::ffi::OsStrExt;

    match file_name.to_str() {
        Some(name) if !name.contains('\\') => name.to_string(),
        _ => file_name.as_bytes().escape_ascii().to_string(),
    }
}

#[cfg(not(unix))]
fn ledger_name(file_name: &OsStr) -> String {
    file_name.to_string_lossy().into_owned()
}
