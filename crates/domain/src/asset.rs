use std::ffi::OsString;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::DomainError;

const VIDEO_SUFFIXES: [&str; 3] = [".mp4", ".thm", ".lrv"];
const PHOTO_SUFFIXES: [&str; 2] = [".jpg", ".gpr"];
// Camera status files. Recognized so they are neither copied nor warned about.
const IGNORABLE_SUFFIXES: [&str; 1] = [".sav"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Video,
    Photo,
    Ignorable,
    Unknown,
}

impl AssetKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Photo => "photo",
            Self::Ignorable => "ignorable",
            Self::Unknown => "unknown",
        }
    }
}

/// Classifies a file name by its suffix, ignoring case.
pub fn classify(name: &str) -> AssetKind {
    let lowered = name.to_lowercase();
    let matches_any = |suffixes: &[&str]| suffixes.iter().any(|suffix| lowered.ends_with(suffix));

    if matches_any(&VIDEO_SUFFIXES) {
        AssetKind::Video
    } else if matches_any(&PHOTO_SUFFIXES) {
        AssetKind::Photo
    } else if matches_any(&IGNORABLE_SUFFIXES) {
        AssetKind::Ignorable
    } else {
        AssetKind::Unknown
    }
}

/// The ledger key. Two files with the same name and creation date are the
/// same asset as far as imports are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportKey {
    name: String,
    created_date: NaiveDate,
}

impl ImportKey {
    pub fn new(name: impl Into<String>, created_date: NaiveDate) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyFileName);
        }
        Ok(Self { name, created_date })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_date(&self) -> NaiveDate {
        self.created_date
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Ledger and log form of the name. Distinct file names never share it.
    pub name: String,
    /// Name on disk, used verbatim for the copy.
    pub file_name: OsString,
    pub source_path: PathBuf,
    pub created_date: NaiveDate,
    /// Size observed while scanning. The ledger records the copied byte count.
    pub size_bytes: u64,
    pub kind: AssetKind,
}

impl Asset {
    pub fn key(&self) -> Result<ImportKey, DomainError> {
        ImportKey::new(self.name.clone(), self.created_date)
    }

    /// `<date>/<file name>` relative to the destination root.
    pub fn relative_destination(&self) -> PathBuf {
        PathBuf::from(crate::format_date(self.created_date)).join(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_suffix() {
        assert_eq!(classify("GX010042.MP4"), AssetKind::Video);
        assert_eq!(classify("GX010042.THM"), AssetKind::Video);
        assert_eq!(classify("GL010042.LRV"), AssetKind::Video);
        assert_eq!(classify("GOPR0001.GPR"), AssetKind::Photo);
        assert_eq!(classify("GOPR0001.JPG"), AssetKind::Photo);
        assert_eq!(classify("MISC.SAV"), AssetKind::Ignorable);
        assert_eq!(classify("notes.txt"), AssetKind::Unknown);
        assert_eq!(classify("jpg"), AssetKind::Unknown);
    }

    #[test]
    fn classification_ignores_case() {
        for name in ["IMG_0001.JPG", "img_0001.jpg", "Img_0001.Jpg"] {
            assert_eq!(classify(name), AssetKind::Photo, "{name}");
        }
    }

    #[test]
    fn suffix_must_end_the_name() {
        assert_eq!(classify("clip.mp4.part"), AssetKind::Unknown);
        assert_eq!(classify("archive.jpg.zip"), AssetKind::Unknown);
    }

    #[test]
    fn key_rejects_blank_names() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).expect("date");
        assert!(matches!(
            ImportKey::new("  ", date),
            Err(DomainError::EmptyFileName)
        ));
    }

    #[test]
    fn destination_is_grouped_by_creation_date() {
        let asset = Asset {
            name: "A.mp4".to_string(),
            file_name: OsString::from("A.mp4"),
            source_path: PathBuf::from("/cam/DCIM/100GOPRO/A.mp4"),
            created_date: NaiveDate::from_ymd_opt(2024, 1, 5).expect("date"),
            size_bytes: 10,
            kind: AssetKind::Video,
        };
        assert_eq!(
            asset.relative_destination(),
            PathBuf::from("2024-01-05").join("A.mp4")
        );
    }
}
