//! Error types and handling for the evidence register
//!
//! Two families live here. `Error` is what the library returns to its caller:
//! enumeration, configuration, and output failures. `Rejection` is the reason
//! a single row was refused by the validator; it is an expected outcome and
//! never propagates as an `Error`.

use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::types::COLUMNS;

/// Custom result type for register operations
pub type Result<T> = StdResult<T, Error>;

/// Core error type for register operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Verification error: {0}")]
    Verification(String),
}

/// Reason a candidate row was refused admission to the register
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Missing EVID ID")]
    MissingEvidId,

    #[error("Duplicate EVID ID: {0}")]
    DuplicateEvidId(String),

    #[error("Invalid EVID ID (not an integer): {0}")]
    InvalidEvidId(String),

    #[error("Missing Filename")]
    MissingFilename,

    #[error("Duplicate Filename: {0}")]
    DuplicateFilename(String),

    #[error("Missing ID")]
    MissingId,

    #[error("Duplicate ID: {0}")]
    DuplicateId(String),

    #[error("Invalid ID (not an integer): {0}")]
    InvalidId(String),

    #[error("Missing file_number")]
    MissingFileNumber,

    #[error("Duplicate file_number: {0}")]
    DuplicateFileNumber(String),

    #[error("Invalid file_number (not an integer): {0}")]
    InvalidFileNumber(String),

    #[error("Column count mismatch: expected {expected}, got {got}", expected = COLUMNS.len())]
    ColumnCount { got: usize },
}
