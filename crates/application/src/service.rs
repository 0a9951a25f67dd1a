use std::path::Path;

use camport_domain::{classify, format_date, Asset, AssetKind, LedgerEntry, RunStatistics};
use tracing::{debug, info, warn};

use crate::{
    ApplicationError, Clock, FileScanner, FileTransfer, ImportCommand, ImportLedger,
    ProgressReporter, ScannedFile,
};

/// What happened to a single file during a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssetOutcome {
    Ignored,
    Warned,
    SkippedDuplicate,
    Recorded { bytes: u64, size_mb: f64 },
    Failed,
}

pub struct ImportEngine {
    ledger: Box<dyn ImportLedger>,
    scanner: Box<dyn FileScanner>,
    transfer: Box<dyn FileTransfer>,
    clock: Box<dyn Clock>,
}

impl ImportEngine {
    pub fn new(
        ledger: Box<dyn ImportLedger>,
        scanner: Box<dyn FileScanner>,
        transfer: Box<dyn FileTransfer>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            ledger,
            scanner,
            transfer,
            clock,
        }
    }

    pub fn ledger(&self) -> &dyn ImportLedger {
        self.ledger.as_ref()
    }

    /// Imports every video and photo below the source root that the ledger
    /// does not know yet. Only setup problems are returned as errors; a file
    /// that fails to import is logged, counted and left for the next run.
    pub fn run(
        &self,
        command: &ImportCommand,
        progress: &mut dyn ProgressReporter,
    ) -> Result<RunStatistics, ApplicationError> {
        command.validate()?;

        let mut stats = RunStatistics::start(self.clock.now());
        let files = self.scanner.scan(&command.source_root)?;
        stats.total_files = files.len();
        info!(
            source = %command.source_root.display(),
            destination = %command.destination_root.display(),
            total_files = stats.total_files,
            "starting import"
        );

        if files.is_empty() {
            progress.report(0, 0);
        }

        for (index, file) in files.iter().enumerate() {
            self.import_file(file, &command.destination_root, &mut stats);
            progress.report(index + 1, stats.total_files);
        }

        stats.finish(self.clock.now());
        info!(
            videos = stats.videos,
            photos = stats.photos,
            copied = stats.newly_copied,
            skipped = stats.duplicates_skipped,
            warnings = stats.warnings,
            "import finished"
        );
        Ok(stats)
    }

    fn import_file(
        &self,
        file: &ScannedFile,
        destination_root: &Path,
        stats: &mut RunStatistics,
    ) -> AssetOutcome {
        let kind = classify(&file.name);
        match kind {
            AssetKind::Ignorable => {
                debug!(path = %file.path.display(), "ignoring camera status file");
                stats.ignored += 1;
                AssetOutcome::Ignored
            }
            AssetKind::Unknown => {
                warn!("unknown file format for file {}", file.path.display());
                stats.warnings += 1;
                AssetOutcome::Warned
            }
            AssetKind::Video | AssetKind::Photo => {
                debug!(
                    "{} file: {} ({} bytes)",
                    kind.label(),
                    file.path.display(),
                    file.size_bytes
                );
                match self.inspect(file, kind) {
                    Ok(asset) => self.process_asset(&asset, destination_root, stats),
                    Err(error) => {
                        stats.count_processed(kind);
                        record_failure(&file.path, &error, stats)
                    }
                }
            }
        }
    }

    fn inspect(&self, file: &ScannedFile, kind: AssetKind) -> Result<Asset, ApplicationError> {
        let created_date = self.transfer.creation_date(&file.path)?;
        Ok(Asset {
            name: file.name.clone(),
            file_name: file.file_name.clone(),
            source_path: file.path.clone(),
            created_date,
            size_bytes: file.size_bytes,
            kind,
        })
    }

    /// Copies a classified video or photo unless its key is already in the
    /// ledger. The kind counter is bumped either way.
    pub fn process_asset(
        &self,
        asset: &Asset,
        destination_root: &Path,
        stats: &mut RunStatistics,
    ) -> AssetOutcome {
        stats.count_processed(asset.kind);
        match self.try_import(asset, destination_root) {
            Ok(outcome) => {
                match outcome {
                    AssetOutcome::SkippedDuplicate => stats.duplicates_skipped += 1,
                    AssetOutcome::Recorded { bytes, .. } => {
                        stats.newly_copied += 1;
                        stats.bytes_copied += bytes;
                    }
                    _ => {}
                }
                outcome
            }
            Err(error) => record_failure(&asset.source_path, &error, stats),
        }
    }

    fn try_import(
        &self,
        asset: &Asset,
        destination_root: &Path,
    ) -> Result<AssetOutcome, ApplicationError> {
        let key = asset.key()?;
        if self.ledger.was_imported(&key)? {
            info!("{} already exists, skipping", asset.source_path.display());
            return Ok(AssetOutcome::SkippedDuplicate);
        }

        let destination_dir = destination_root.join(format_date(asset.created_date));
        let bytes = self
            .transfer
            .copy_into(&asset.source_path, &destination_dir, &asset.file_name)?;
        if bytes != asset.size_bytes {
            debug!(
                "{} changed size while importing: scanned {} bytes, copied {bytes}",
                asset.source_path.display(),
                asset.size_bytes
            );
        }
        let entry = LedgerEntry::new(&key, self.clock.today(), bytes);
        self.ledger.record_import(&entry)?;

        info!(
            "copied {} to {} ({:.2} MB)",
            asset.source_path.display(),
            destination_root.join(asset.relative_destination()).display(),
            entry.size_mb
        );
        Ok(AssetOutcome::Recorded {
            bytes,
            size_mb: entry.size_mb,
        })
    }
}

fn record_failure(path: &Path, error: &ApplicationError, stats: &mut RunStatistics) -> AssetOutcome {
    warn!(
        "failed to import {}: {error}; it will be retried on the next run",
        path.display()
    );
    stats.failed += 1;
    stats.warnings += 1;
    AssetOutcome::Failed
}
