use std::path::PathBuf;

use crate::ApplicationError;

#[derive(Debug, Clone)]
pub struct ImportCommand {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
}

impl ImportCommand {
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.source_root.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "source root must not be empty".to_string(),
            ));
        }
        if self.destination_root.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "destination root must not be empty".to_string(),
            ));
        }
        // A destination below the source would be scanned as camera media,
        // ledger and logs included.
        if self.destination_root.starts_with(&self.source_root) {
            return Err(ApplicationError::InvalidInput(format!(
                "destination {} must not be inside the source {}",
                self.destination_root.display(),
                self.source_root.display()
            )));
        }
        Ok(())
    }
}
