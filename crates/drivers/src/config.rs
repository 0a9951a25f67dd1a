use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::logging::LogLevel;

pub const LOG_DIR_NAME: &str = "logs";
pub const LEDGER_FILE_NAME: &str = "file_log.sqlite";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub log_level: LogLevel,
    pub show_progress: bool,
    pub json_summary: bool,
}

impl AppConfig {
    pub fn log_dir(&self) -> PathBuf {
        self.destination_root.join(LOG_DIR_NAME)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.log_dir().join(LEDGER_FILE_NAME)
    }

    /// One log file per run, named after the run's start time.
    pub fn log_file_path(&self, started_at: DateTime<Local>) -> PathBuf {
        self.log_dir()
            .join(format!("{}_import.log", started_at.format("%Y-%m-%d_%H-%M-%S")))
    }
}
