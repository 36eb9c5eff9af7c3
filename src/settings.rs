//! Session settings
//!
//! Loaded from a JSON file; any missing field takes its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Field;
use crate::tuning::Tuning;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

/// Everything a session needs to start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field_width: f32,
    pub field_height: f32,
    /// RNG seed; `None` derives one from the clock
    pub seed: Option<u64>,
    /// Simulation ticks per second
    pub tick_hz: u32,
    /// Gap between menace cues (ms)
    pub menace_interval_ms: u64,
    pub high_score_path: PathBuf,
    pub audio: AudioSettings,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            seed: None,
            tick_hz: (1.0 / SIM_DT).round() as u32,
            menace_interval_ms: 1000,
            high_score_path: PathBuf::from("highscore.json"),
            audio: AudioSettings::default(),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn field(&self) -> Field {
        Field::new(self.field_width, self.field_height)
    }

    /// Fixed timestep derived from `tick_hz`
    pub fn tick_dt(&self) -> f32 {
        if self.tick_hz == 0 {
            SIM_DT
        } else {
            1.0 / self.tick_hz as f32
        }
    }

    /// Seed to use, falling back to the clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    pub fn from_json(json: &str, path: &Path) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json, path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load, or log why not and use defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}
