pub mod fs;
pub mod migrations;
pub mod presenters;
pub mod progress;
pub mod sqlite;

pub use fs::{FsFileTransfer, SystemClock, WalkdirFileScanner};
pub use presenters::{present_statistics, present_statistics_json};
pub use progress::{IndicatifProgressReporter, LogSink, TextProgressReporter};
pub use sqlite::SqliteImportLedger;
