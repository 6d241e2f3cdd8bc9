//! Error types for cvecwe.
//!
//! Uses `thiserror` for ergonomic error definitions. Each concern gets its own
//! enum and `Result` alias; `CliError` aggregates them for the binary.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What went wrong while talking to a remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Connection, TLS, timeout or body read failure.
    Transport,
    /// The server answered with a non-success status code.
    Status,
    /// The page did not have the expected structure.
    Parse,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Status => write!(f, "status"),
            Self::Parse => write!(f, "parse"),
        }
    }
}

/// A failed search or weakness lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error for {identifier}: {cause}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    /// CVE identifier (or search keyword) the request was made for.
    pub identifier: String,
    pub cause: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, identifier: impl Into<String>, cause: impl ToString) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            cause: cause.to_string(),
        }
    }

    pub fn transport(identifier: impl Into<String>, cause: impl ToString) -> Self {
        Self::new(FetchErrorKind::Transport, identifier, cause)
    }

    pub fn status(identifier: impl Into<String>, cause: impl ToString) -> Self {
        Self::new(FetchErrorKind::Status, identifier, cause)
    }

    pub fn parse(identifier: impl Into<String>, cause: impl ToString) -> Self {
        Self::new(FetchErrorKind::Parse, identifier, cause)
    }
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Record store access violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record store is sealed, no more records can be appended")]
    Sealed,

    #[error("record identifier must not be empty")]
    EmptyIdentifier,

    #[error("index {index} is outside the window {start}..{end}")]
    NotOwned {
        index: usize,
        start: usize,
        end: usize,
    },

    #[error("invalid partition: {0}")]
    InvalidPartition(String),
}

/// Result type alias for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Enrichment pipeline failures.
#[derive(Error, Debug)]
pub enum EnrichError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("enrichment aborted in wave {wave}: {} fetch failure(s), first: {}", .failures.len(), first_failure(.failures))]
    Aborted { wave: usize, failures: Vec<FetchError> },
}

fn first_failure(failures: &[FetchError]) -> String {
    failures
        .first()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}

/// Result type alias for enrichment runs.
pub type EnrichResult<T> = Result<T, EnrichError>;

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("invalid proxy URL '{url}': {reason}")]
    InvalidProxy { url: String, reason: String },

    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("HTTP client setup failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidFormat(err.to_string())
    }
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Report serialization errors.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("too many records for one sheet: {0}")]
    TooManyRows(usize),
}

/// Result type alias for report writing.
pub type ReportResult<T> = Result<T, ReportError>;

/// Top-level error for CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("search failed: {0}")]
    Search(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Enrich(#[from] EnrichError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("report error: {0}")]
    Report(#[from] ReportError),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::parse("CVE-2024-0001", "missing table");
        assert_eq!(
            err.to_string(),
            "parse error for CVE-2024-0001: missing table"
        );
    }

    #[test]
    fn test_aborted_display_names_first_failure() {
        let err = EnrichError::Aborted {
            wave: 2,
            failures: vec![
                FetchError::status("CVE-1", "404 Not Found"),
                FetchError::transport("CVE-2", "reset"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("wave 2"));
        assert!(msg.contains("2 fetch failure(s)"));
        assert!(msg.contains("CVE-1"));
    }
}
