use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("file name must not be empty")]
    EmptyFileName,
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}
