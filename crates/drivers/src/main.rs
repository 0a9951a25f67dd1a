mod config;
mod logging;

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use camport_adapters::{
    present_statistics, present_statistics_json, FsFileTransfer, IndicatifProgressReporter,
    LogSink, SqliteImportLedger, SystemClock, TextProgressReporter, WalkdirFileScanner,
};
use camport_application::{
    ApplicationError, ImportCommand, ImportEngine, NoopProgressReporter, ProgressReporter,
};
use chrono::Local;
use clap::Parser;
use config::AppConfig;
use logging::LogLevel;
use tracing::{error, info};

/// Copy camera media into a dated folder tree, skipping files imported before.
#[derive(Debug, Parser)]
#[command(name = "camport", version)]
struct Cli {
    /// Camera volume or folder to import from.
    source: PathBuf,

    /// Root of the dated destination tree. Also holds the import ledger and logs.
    destination: PathBuf,

    /// One of DEBUG, INFO, WARNING, ERROR, CRITICAL.
    #[arg(short, long, default_value = "INFO", value_parser = parse_log_level)]
    log_level: LogLevel,

    /// Print the run statistics as JSON.
    #[arg(long)]
    json: bool,

    /// Do not draw a progress bar.
    #[arg(long)]
    no_progress: bool,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            source_root: cli.source,
            destination_root: cli.destination,
            log_level: cli.log_level,
            show_progress: !cli.no_progress,
            json_summary: cli.json,
        }
    }
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    value.parse()
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn main() -> ExitCode {
    let config = AppConfig::from(Cli::parse());

    match run_import(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("camport: {msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            error!("{msg}");
            eprintln!("camport: {msg}");
            ExitCode::from(1)
        }
    }
}

fn run_import(config: &AppConfig) -> Result<(), CommandError> {
    validate_roots(config)?;

    let (mut progress, log_sink) = build_progress_reporter(config);
    let started_at = Local::now();
    let log_file = config.log_file_path(started_at);
    logging::init_logging(config.log_level, &log_file, log_sink).map_err(|error| {
        CommandError::Runtime(format!(
            "failed to create log file {}: {error}",
            log_file.display()
        ))
    })?;
    info!(
        "importing {} into {} (log level {})",
        config.source_root.display(),
        config.destination_root.display(),
        config.log_level
    );

    let ledger = SqliteImportLedger::open(config.ledger_path())
        .map_err(|error| CommandError::Runtime(format!("import ledger unavailable: {error}")))?;
    let engine = build_import_engine(ledger);

    let command = ImportCommand {
        source_root: config.source_root.clone(),
        destination_root: config.destination_root.clone(),
    };
    let stats = engine
        .run(&command, progress.as_mut())
        .map_err(|error| match error {
            ApplicationError::InvalidInput(msg) => CommandError::Usage(msg),
            other => CommandError::Runtime(format!("import failed: {other}")),
        })?;
    // Closes the ledger before the summary is printed.
    drop(engine);

    if config.json_summary {
        let json = present_statistics_json(&stats).map_err(CommandError::Runtime)?;
        println!("{json}");
    } else {
        println!("{}", present_statistics(&stats));
    }
    Ok(())
}

/// Runs before logging starts, so failures are reported on stderr only.
fn validate_roots(config: &AppConfig) -> Result<(), CommandError> {
    let source = &config.source_root;
    if !source.is_dir() {
        return Err(CommandError::Usage(format!(
            "source does not exist or is not a directory: {}",
            source.display()
        )));
    }
    fs::read_dir(source).map_err(|error| {
        CommandError::Usage(format!("cannot read source {}: {error}", source.display()))
    })?;

    let destination = &config.destination_root;
    let resolved_source = resolve(source).map_err(|error| {
        CommandError::Usage(format!("cannot resolve source {}: {error}", source.display()))
    })?;
    let resolved_destination = resolve(destination).map_err(|error| {
        CommandError::Usage(format!(
            "cannot resolve destination {}: {error}",
            destination.display()
        ))
    })?;
    if resolved_destination.starts_with(&resolved_source) {
        return Err(CommandError::Usage(format!(
            "destination {} must not be inside the source {}",
            destination.display(),
            source.display()
        )));
    }

    fs::create_dir_all(destination).map_err(|error| {
        CommandError::Usage(format!(
            "cannot use destination {}: {error}",
            destination.display()
        ))
    })?;
    if !destination.is_dir() {
        return Err(CommandError::Usage(format!(
            "destination is not a directory: {}",
            destination.display()
        )));
    }
    Ok(())
}

/// Absolute form of `path` with symlinks resolved. Trailing components that
/// do not exist yet are appended to the nearest existing ancestor.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    let mut missing = Vec::new();
    let mut existing = path;
    loop {
        match existing.canonicalize() {
            Ok(resolved) => {
                return Ok(missing
                    .into_iter()
                    .rev()
                    .fold(resolved, |resolved, part| resolved.join(part)));
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
                    return Err(error);
                };
                missing.push(name.to_os_string());
                existing = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            Err(error) => return Err(error),
        }
    }
}

fn build_import_engine(ledger: SqliteImportLedger) -> ImportEngine {
    ImportEngine::new(
        Box::new(ledger),
        Box::new(WalkdirFileScanner),
        Box::new(FsFileTransfer),
        Box::new(SystemClock),
    )
}

/// The sink lets stderr log lines share the terminal with an indicatif bar.
fn build_progress_reporter(config: &AppConfig) -> (Box<dyn ProgressReporter>, LogSink) {
    if !config.show_progress {
        return (Box::new(NoopProgressReporter), LogSink::default());
    }
    if io::stderr().is_terminal() {
        let reporter = IndicatifProgressReporter::new();
        let sink = reporter.log_sink();
        (Box::new(reporter), sink)
    } else {
        (
            Box::new(TextProgressReporter::new(io::stderr())),
            LogSink::default(),
        )
    }
}
