//! # Persistence Adapter
//!
//! The whole collection lives in one JSON array file that is rewritten in full
//! on every mutation. Backends expose fallible primitives; [`FeedbackBackend::load`]
//! and [`FeedbackBackend::save`] log failures and carry on, so a broken disk
//! never takes the API down.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::errors::{PersistenceError, PersistenceResult};
use super::record::FeedbackRecord;

/// Backend trait for the feedback collection
pub trait FeedbackBackend: Send + Sync + std::fmt::Debug {
    /// Read the full collection. A missing file is an empty collection.
    fn read_all(&self) -> PersistenceResult<Vec<FeedbackRecord>>;

    /// Replace the stored collection with `records`
    fn write_all(&self, records: &[FeedbackRecord]) -> PersistenceResult<()>;

    /// Human-readable location, for logs
    fn location(&self) -> String;

    /// Hydrate, absorbing any failure into an empty collection
    fn load(&self) -> Vec<FeedbackRecord> {
        match self.read_all() {
            Ok(records) => records,
            Err(e) => {
                error!("Error loading feedback data: {}", e);
                Vec::new()
            }
        }
    }

    /// Persist, logging any failure
    fn save(&self, records: &[FeedbackRecord]) {
        if let Err(e) = self.write_all(records) {
            error!("Error saving feedback data: {}", e);
        }
    }
}

/// How the JSON file is replaced on save
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate and write the target in place
    #[default]
    Overwrite,
    /// Write a sibling temp file, then rename it over the target
    Atomic,
}

/// JSON array file backend
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
    mode: WriteMode,
}

impl JsonFileBackend {
    /// Create a backend that overwrites `path` in place
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_mode(path, WriteMode::Overwrite)
    }

    /// Create a backend with an explicit write mode
    pub fn with_mode(path: impl Into<PathBuf>, mode: WriteMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, e: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    }

    fn json_error(&self, e: serde_json::Error) -> PersistenceError {
        PersistenceError::Json {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}

impl FeedbackBackend for JsonFileBackend {
    fn read_all(&self) -> PersistenceResult<Vec<FeedbackRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No feedback file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(&self.path, e)),
        };

        serde_json::from_str(&content).map_err(|e| self.json_error(e))
    }

    fn write_all(&self, records: &[FeedbackRecord]) -> PersistenceResult<()> {
        let data = serde_json::to_string_pretty(records).map_err(|e| self.json_error(e))?;

        match self.mode {
            WriteMode::Overwrite => {
                fs::write(&self.path, data).map_err(|e| self.io_error(&self.path, e))
            }
            WriteMode::Atomic => {
                let temp = self.temp_path();
                fs::write(&temp, data).map_err(|e| self.io_error(&temp, e))?;
                fs::rename(&temp, &self.path).map_err(|e| self.io_error(&self.path, e))
            }
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
