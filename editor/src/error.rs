//! Error types for schema editing operations.
//!
//! Provides a unified error type covering location resolution, catalog
//! lookups, structural validation, and record mutation failures. Raw engine
//! errors never escape a public operation unwrapped.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during schema editing operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The database location is incomplete (missing directory or name).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A user-chosen name is not a legal SQL identifier.
    #[error("invalid identifier '{0}': names must start with a letter or underscore and contain only letters, digits, and underscores")]
    InvalidIdentifier(String),

    /// The named table is not in the database.
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// The named column is not in the table.
    #[error("column '{column}' not found in table '{table}'")]
    ColumnNotFound {
        /// Table that was searched.
        table: String,
        /// Column that was requested.
        column: String,
    },

    /// A table cannot be created (or a record inserted) without columns.
    #[error("no columns supplied")]
    NoColumns,

    /// Deleting this column would leave the table empty.
    #[error("cannot delete the last column of table '{0}'")]
    LastColumn(String),

    /// A record deletion was requested without any filters.
    #[error("no filters supplied")]
    NoFilters,

    /// No rows matched the given criteria; nothing was mutated.
    #[error("no records match the given criteria")]
    NoMatch,

    /// The configured database file does not exist.
    #[error("database file not found: {0}")]
    DatabaseNotFound(PathBuf),

    /// SQLite operation failure.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// File I/O failure (session config load/save).
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure (session config).
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`EditorError`].
pub type Result<T> = std::result::Result<T, EditorError>;
