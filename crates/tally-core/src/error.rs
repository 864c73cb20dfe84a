//! Error types for Tally

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid record in {}: {source}", path.display())]
    Row {
        path: PathBuf,
        #[source]
        source: RowError,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A statement row that could not be normalized
///
/// `row` is the 1-based data row number (the header line is not counted).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("row {row}: {kind}")]
pub struct RowError {
    pub row: usize,
    pub kind: RowErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowErrorKind {
    #[error("expected {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },

    #[error("invalid date {0:?} (expected DD/MM/YYYY)")]
    InvalidDate(String),

    #[error("invalid {field} amount {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}
