use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use camport_application::{ApplicationError, FileTransfer};
use chrono::{DateTime, Local, NaiveDate};
use tracing::debug;

#[derive(Debug, Default)]
pub struct FsFileTransfer;

impl FileTransfer for FsFileTransfer {
    fn creation_date(&self, path: &Path) -> Result<NaiveDate, ApplicationError> {
        let metadata = fs::metadata(path).map_err(|error| {
            ApplicationError::Io(format!("failed to read metadata for {}: {error}", path.display()))
        })?;

        let created = match metadata.created() {
            Ok(created) => created,
            Err(error) if error.kind() == io::ErrorKind::Unsupported => {
                debug!(
                    "creation time unsupported for {}, using modification time",
                    path.display()
                );
                metadata.modified().map_err(|error| {
                    ApplicationError::Io(format!(
                        "failed to read timestamps for {}: {error}",
                        path.display()
                    ))
                })?
            }
            Err(error) => {
                return Err(ApplicationError::Io(format!(
                    "failed to read creation time for {}: {error}",
                    path.display()
                )))
            }
        };

        Ok(local_date(created))
    }

    fn copy_into(
        &self,
        source: &Path,
        destination_dir: &Path,
        file_name: &OsStr,
    ) -> Result<u64, ApplicationError> {
        fs::create_dir_all(destination_dir).map_err(|error| {
            ApplicationError::Io(format!(
                "failed to create directory {}: {error}",
                destination_dir.display()
            ))
        })?;

        let destination = destination_dir.join(file_name);
        let existed = destination.exists();
        fs::copy(source, &destination).map_err(|error| {
            // Leave no truncated file behind unless it was already there.
            if !existed && destination.exists() {
                if let Err(cleanup) = fs::remove_file(&destination) {
                    debug!("failed to remove partial copy {}: {cleanup}", destination.display());
                }
            }
            ApplicationError::Io(format!(
                "failed to copy {} to {}: {error}",
                source.display(),
                destination.display()
            ))
        })
    }
}

/// Calendar day of `time` in the local timezone.
pub fn local_date(time: SystemTime) -> NaiveDate {
    DateTime::<Local>::from(time).date_naive()
}
