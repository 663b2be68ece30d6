//! JSON file storage for the nutrition log.
//!
//! The log is a single pretty-printed JSON array of [`MealEntry`] values.
//! Every save rewrites the whole file.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::MealEntry;

pub const LOG_FILE_NAME: &str = "nutrition-log.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Error creating nutrition directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error reading log file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error parsing log file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Error serializing meal log: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Error writing to log file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads and writes the meal log inside a data directory.
#[derive(Clone, Debug)]
pub struct LogStore {
    data_dir: PathBuf,
}

impl LogStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the log file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }

    /// Creates the data directory if it does not exist yet.
    pub fn ensure_ready(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.data_dir).map_err(|source| StoreError::CreateDir {
            path: self.data_dir.clone(),
            source,
        })
    }

    /// Loads all entries. A missing log file is an empty log.
    pub fn load(&self) -> Result<Vec<MealEntry>, StoreError> {
        let path = self.path();
        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("No log file at {}, starting with 0 meals", path.display());
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        let entries: Vec<MealEntry> = serde_json::from_str(&contents)
            .map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?;

        tracing::info!("Loaded {} meal(s) from {}", entries.len(), path.display());
        Ok(entries)
    }

    /// Overwrites the log file with `entries`.
    pub fn save(&self, entries: &[MealEntry]) -> Result<(), StoreError> {
        let path = self.path();
        let json = serde_json::to_string_pretty(entries).map_err(StoreError::Serialize)?;

        std::fs::write(&path, json).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!("Saved {} meal(s) to {}", entries.len(), path.display());
        Ok(())
    }
}
