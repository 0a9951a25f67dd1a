mod asset;
mod error;
mod ledger;
mod stats;

pub use asset::{classify, Asset, AssetKind, ImportKey};
pub use error::DomainError;
pub use ledger::{format_date, parse_date, size_in_megabytes, LedgerEntry, BYTES_PER_MEGABYTE};
pub use stats::RunStatistics;
