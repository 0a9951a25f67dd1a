use chrono::NaiveDate;

use crate::{DomainError, ImportKey};

pub const BYTES_PER_MEGABYTE: f64 = 1_000_000.0;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A completed import. Entries are only ever inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub name: String,
    pub created_date: NaiveDate,
    pub copied_date: NaiveDate,
    pub size_mb: f64,
}

impl LedgerEntry {
    pub fn new(key: &ImportKey, copied_date: NaiveDate, size_bytes: u64) -> Self {
        Self {
            name: key.name().to_string(),
            created_date: key.created_date(),
            copied_date,
            size_mb: size_in_megabytes(size_bytes),
        }
    }

    pub fn key(&self) -> Result<ImportKey, DomainError> {
        ImportKey::new(self.name.clone(), self.created_date)
    }
}

/// Decimal megabytes.
pub fn size_in_megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MEGABYTE
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(value.to_string()))
}
