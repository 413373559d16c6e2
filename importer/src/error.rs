//! Error types for CSV import operations.
//!
//! Provides a unified error type covering input validation, file access,
//! decoding, parsing, and database failures. Every public operation in this
//! crate reports through this taxonomy; raw engine errors never escape
//! unwrapped.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while importing a CSV file into SQLite.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A required input was empty or otherwise unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The source CSV file does not exist.
    #[error("CSV file not found: {0}")]
    FileNotFound(PathBuf),

    /// The source file could not be read or the destination could not be
    /// created.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The table name contains characters outside letters, digits,
    /// underscores, and hyphens.
    #[error("invalid table name '{0}': only letters, digits, underscores, and hyphens are allowed")]
    InvalidIdentifier(String),

    /// None of the supported encodings could decode the file.
    #[error("unable to decode '{0}' with any supported encoding")]
    UnreadableFile(PathBuf),

    /// The file decoded but is not structurally valid CSV.
    #[error("malformed CSV input: {0}")]
    MalformedInput(String),

    /// The file parsed but contains no data rows.
    #[error("CSV file contains no data")]
    EmptyInput,

    /// A row failed to insert; the transaction was rolled back.
    #[error("failed to write rows: {0}")]
    WriteFailure(String),

    /// The committed row count does not match the parsed row count.
    #[error("data verification failed: expected {expected} rows, found {found}")]
    IntegrityCheckFailed {
        /// Rows parsed from the CSV.
        expected: usize,
        /// Rows counted in the destination table after commit.
        found: usize,
    },

    /// SQLite operation failure outside the bulk insert.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// File I/O failure not covered by a more specific variant.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience alias for results with [`ImportError`].
pub type Result<T> = std::result::Result<T, ImportError>;
