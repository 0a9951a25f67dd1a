use camport_domain::{size_in_megabytes, RunStatistics};

pub fn present_statistics(stats: &RunStatistics) -> String {
    let elapsed = stats
        .elapsed()
        .map(|duration| format!("{:.1}s", duration.num_milliseconds() as f64 / 1000.0))
        .unwrap_or_else(|| "unfinished".to_string());

    format!(
        "processed {} files in {elapsed}\n\
         videos: {}\n\
         photos: {}\n\
         copied: {} ({:.2} MB)\n\
         already imported: {}\n\
         warnings: {}",
        stats.total_files,
        stats.videos,
        stats.photos,
        stats.newly_copied,
        size_in_megabytes(stats.bytes_copied),
        stats.duplicates_skipped,
        stats.warnings
    )
}

pub fn present_statistics_json(stats: &RunStatistics) -> Result<String, String> {
    serde_json::to_string_pretty(stats).map_err(|error| error.to_string())
}
