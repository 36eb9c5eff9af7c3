//! High score persistence
//!
//! The session reads the stored high score once at start and writes it once
//! at the end, only when it improved.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("high score file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the single high score scalar lives
pub trait HighScoreStore: Send {
    fn load(&self) -> Result<u32, HighScoreError>;
    fn save(&mut self, high_score: u32) -> Result<(), HighScoreError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// JSON file on disk; a missing file reads as zero
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, HighScoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        let file: HighScoreFile = serde_json::from_str(&json)?;
        log::info!("Loaded high score {}", file.high_score);
        Ok(file.high_score)
    }

    fn save(&mut self, high_score: u32) -> Result<(), HighScoreError> {
        let json = serde_json::to_string_pretty(&HighScoreFile { high_score })?;
        // Temp file then rename: the target is never partially written
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved to {}", high_score, self.path.display());
        Ok(())
    }
}

/// In-memory store; clones share the same value
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Arc<Mutex<u32>>,
    saves: Arc<Mutex<u32>>,
}

impl MemoryStore {
    pub fn with_value(high_score: u32) -> Self {
        Self {
            value: Arc::new(Mutex::new(high_score)),
            saves: Arc::default(),
        }
    }

    pub fn value(&self) -> u32 {
        self.value.lock().map(|v| *v).unwrap_or_default()
    }

    /// How many times `save` was called
    pub fn save_count(&self) -> u32 {
        self.saves.lock().map(|v| *v).unwrap_or_default()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, HighScoreError> {
        Ok(self.value())
    }

    fn save(&mut self, high_score: u32) -> Result<(), HighScoreError> {
        if let Ok(mut value) = self.value.lock() {
            *value = high_score;
        }
        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }
}
