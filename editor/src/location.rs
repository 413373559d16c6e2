//! Database location handling.
//!
//! Editing operations address a database by directory plus file name rather
//! than by an ambient global. Every operation takes a [`DbLocation`] and
//! opens (and drops) its own connection.

use std::path::PathBuf;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};

/// Where the database file lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbLocation {
    /// Directory containing the database file.
    pub dir: PathBuf,
    /// File name; `.db` is appended when absent (case-insensitive).
    pub name: String,
}

impl DbLocation {
    /// Creates a location from a directory and a file name.
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// Full path of the database file, with the `.db` suffix applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use csvlite_editor::DbLocation;
    ///
    /// let loc = DbLocation::new("/data", "inventory");
    /// assert_eq!(loc.db_path(), std::path::PathBuf::from("/data/inventory.db"));
    ///
    /// let loc = DbLocation::new("/data", "inventory.DB");
    /// assert_eq!(loc.db_path(), std::path::PathBuf::from("/data/inventory.DB"));
    /// ```
    pub fn db_path(&self) -> PathBuf {
        if self.name.to_ascii_lowercase().ends_with(".db") {
            self.dir.join(&self.name)
        } else {
            self.dir.join(format!("{}.db", self.name))
        }
    }

    /// Opens a connection to the database file.
    ///
    /// # Errors
    ///
    /// [`EditorError::InvalidArgument`] when directory or name is empty,
    /// [`EditorError::DatabaseNotFound`] when the file does not exist. A
    /// connection is never created for a missing file, so editing cannot
    /// silently materialize an empty database.
    pub fn open(&self) -> Result<Connection> {
        if self.dir.as_os_str().is_empty() || self.name.is_empty() {
            return Err(EditorError::InvalidArgument(
                "database directory and name must both be provided".to_string(),
            ));
        }

        let path = self.db_path();
        if !path.exists() {
            return Err(EditorError::DatabaseNotFound(path));
        }

        Ok(Connection::open(path)?)
    }
}
