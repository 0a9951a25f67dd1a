use std::fs;
use std::path::{Path, PathBuf};

use camport_adapters::{FsFileTransfer, SqliteImportLedger, SystemClock, WalkdirFileScanner};
use camport_application::{
    ApplicationError, FileTransfer, ImportCommand, ImportEngine, ImportLedger,
    NoopProgressReporter,
};
use camport_domain::{format_date, ImportKey};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    source: PathBuf,
    destination: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let source = dir.path().join("camera").join("DCIM").join("100GOPRO");
        let destination = dir.path().join("backup");
        fs::create_dir_all(&source).expect("source dir");
        Self {
            _dir: dir,
            source,
            destination,
        }
    }

    fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.source.join(name);
        fs::write(&path, contents).expect("write source file");
        path
    }

    fn ledger_path(&self) -> PathBuf {
        self.destination.join("logs").join("file_log.sqlite")
    }

    fn command(&self) -> ImportCommand {
        ImportCommand {
            source_root: self.source.clone(),
            destination_root: self.destination.clone(),
        }
    }

    fn engine(&self) -> ImportEngine {
        let ledger = SqliteImportLedger::open(self.ledger_path()).expect("ledger");
        ImportEngine::new(
            Box::new(ledger),
            Box::new(WalkdirFileScanner),
            Box::new(FsFileTransfer),
            Box::new(SystemClock),
        )
    }
}

fn created(path: &Path) -> String {
    format_date(FsFileTransfer.creation_date(path).expect("creation date"))
}

#[test]
fn imports_media_skips_status_files_and_warns_on_unknown() {
    let fixture = Fixture::new();
    let video = fixture.write("A.mp4", b"video bytes");
    let photo = fixture.write("B.jpg", b"photo bytes");
    fixture.write("C.sav", b"status");
    fixture.write("D.xyz", b"???");

    let stats = fixture
        .engine()
        .run(&fixture.command(), &mut NoopProgressReporter)
        .expect("run");

    assert_eq!(stats.total_files, 4);
    assert_eq!(stats.videos, 1);
    assert_eq!(stats.photos, 1);
    assert_eq!(stats.warnings, 1);
    assert_eq!(stats.newly_copied, 2);

    let copied_video = fixture.destination.join(created(&video)).join("A.mp4");
    let copied_photo = fixture.destination.join(created(&photo)).join("B.jpg");
    assert_eq!(fs::read(copied_video).expect("video copied"), b"video bytes");
    assert_eq!(fs::read(copied_photo).expect("photo copied"), b"photo bytes");

    let dated_dirs: Vec<_> = fs::read_dir(&fixture.destination)
        .expect("destination")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name != "logs")
        .collect();
    for dir in dated_dirs {
        let names: Vec<_> = fs::read_dir(fixture.destination.join(&dir))
            .expect("dated dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert!(!names.contains(&"C.sav".to_string()));
        assert!(!names.contains(&"D.xyz".to_string()));
    }

    let ledger = SqliteImportLedger::open(fixture.ledger_path()).expect("reopen");
    assert_eq!(ledger.entry_count().expect("count"), 2);
}

#[test]
fn second_run_is_a_no_op() {
    let fixture = Fixture::new();
    let video = fixture.write("GX010001.MP4", b"clip");
    fixture.write("GOPR0002.JPG", b"still");

    let first = fixture
        .engine()
        .run(&fixture.command(), &mut NoopProgressReporter)
        .expect("first run");
    let before = SqliteImportLedger::open(fixture.ledger_path())
        .expect("ledger")
        .entries()
        .expect("entries");

    let second = fixture
        .engine()
        .run(&fixture.command(), &mut NoopProgressReporter)
        .expect("second run");
    let ledger = SqliteImportLedger::open(fixture.ledger_path()).expect("ledger");

    assert_eq!(first.newly_copied, 2);
    assert_eq!(second.newly_copied, 0);
    assert_eq!(second.duplicates_skipped, 2);
    assert_eq!(ledger.entries().expect("entries"), before);

    let key = ImportKey::new(
        "GX010001.MP4",
        FsFileTransfer.creation_date(&video).expect("date"),
    )
    .expect("key");
    assert!(ledger.was_imported(&key).expect("lookup"));
}

#[test]
fn records_size_in_decimal_megabytes() {
    let fixture = Fixture::new();
    fixture.write("GOPR0003.GPR", &vec![0_u8; 2_000_000]);

    fixture
        .engine()
        .run(&fixture.command(), &mut NoopProgressReporter)
        .expect("run");

    let ledger = SqliteImportLedger::open(fixture.ledger_path()).expect("ledger");
    let entries = ledger.entries().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].size_mb, 2.0);
}

#[test]
fn empty_source_completes() {
    let fixture = Fixture::new();

    let stats = fixture
        .engine()
        .run(&fixture.command(), &mut NoopProgressReporter)
        .expect("run");

    assert_eq!(stats.total_files, 0);
    assert_eq!(stats.processed(), 0);
}

#[test]
fn destination_inside_source_is_rejected_before_scanning() {
    let fixture = Fixture::new();
    fixture.write("GX010001.MP4", b"clip");
    let command = ImportCommand {
        source_root: fixture.source.clone(),
        destination_root: fixture.source.join("backup"),
    };

    let result = fixture.engine().run(&command, &mut NoopProgressReporter);

    assert!(matches!(result, Err(ApplicationError::InvalidInput(_))));
    assert!(!fixture.source.join("backup").exists());
}

#[cfg(unix)]
#[test]
fn names_that_are_not_utf8_are_copied_verbatim() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let fixture = Fixture::new();
    let first = OsString::from_vec(b"GOPR\xff1.JPG".to_vec());
    let second = OsString::from_vec(b"GOPR\xfe1.JPG".to_vec());
    let first_path = fixture.source.join(&first);
    fs::write(&first_path, b"one").expect("write");
    let second_path = fixture.source.join(&second);
    fs::write(&second_path, b"two").expect("write");

    let stats = fixture
        .engine()
        .run(&fixture.command(), &mut NoopProgressReporter)
        .expect("run");

    assert_eq!(stats.photos, 2);
    assert_eq!(stats.newly_copied, 2);
    assert_eq!(stats.duplicates_skipped, 0);

    let first_copy = fixture.destination.join(created(&first_path)).join(&first);
    let second_copy = fixture.destination.join(created(&second_path)).join(&second);
    assert_eq!(fs::read(first_copy).expect("first copied"), b"one");
    assert_eq!(fs::read(second_copy).expect("second copied"), b"two");

    let ledger = SqliteImportLedger::open(fixture.ledger_path()).expect("ledger");
    assert_eq!(ledger.entry_count().expect("count"), 2);
}
