//! Session configuration.
//!
//! A small YAML file remembering which database a user is working on, so
//! repeated invocations do not need the location spelled out each time.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::location::DbLocation;

/// Persisted editing session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// The database the session operates on.
    pub database: DbLocation,
}

impl SessionConfig {
    /// Creates a session config for the given database.
    pub fn new(database: DbLocation) -> Self {
        Self { database }
    }

    /// Loads a session config from a YAML file.
    ///
    /// # Errors
    ///
    /// [`EditorError::IoError`](crate::EditorError::IoError) when the file
    /// cannot be opened, [`EditorError::YamlError`](crate::EditorError::YamlError)
    /// when it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let config: SessionConfig = serde_yaml::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), "loaded session config");
        Ok(config)
    }

    /// Writes the session config to a YAML file, replacing any previous one.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        serde_yaml::to_writer(BufWriter::new(file), self)?;
        debug!(path = %path.display(), "saved session config");
        Ok(())
    }
}
