use chrono::{DateTime, Duration, Local};
use serde::Serialize;

use crate::AssetKind;

/// Counters for a single import run.
///
/// `videos` and `photos` count files considered, so a duplicate that was
/// skipped still counts as processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    pub total_files: usize,
    pub videos: usize,
    pub photos: usize,
    pub warnings: usize,
    pub newly_copied: usize,
    pub bytes_copied: u64,
    pub duplicates_skipped: usize,
    pub ignored: usize,
    pub failed: usize,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
}

impl RunStatistics {
    pub fn start(started_at: DateTime<Local>) -> Self {
        Self {
            total_files: 0,
            videos: 0,
            photos: 0,
            warnings: 0,
            newly_copied: 0,
            bytes_copied: 0,
            duplicates_skipped: 0,
            ignored: 0,
            failed: 0,
            started_at,
            finished_at: None,
        }
    }

    pub fn finish(&mut self, finished_at: DateTime<Local>) {
        self.finished_at = Some(finished_at);
    }

    pub fn count_processed(&mut self, kind: AssetKind) {
        match kind {
            AssetKind::Video => self.videos += 1,
            AssetKind::Photo => self.photos += 1,
            AssetKind::Ignorable | AssetKind::Unknown => {}
        }
    }

    pub fn processed(&self) -> usize {
        self.videos + self.photos
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }
}
