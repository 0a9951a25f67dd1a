mod error;
mod ports;
mod service;
mod use_cases;

pub use error::ApplicationError;
pub use ports::{
    Clock, FileScanner, FileTransfer, ImportLedger, NoopProgressReporter, ProgressReporter,
    ScannedFile,
};
pub use service::{AssetOutcome, ImportEngine};
pub use use_cases::ImportCommand;
