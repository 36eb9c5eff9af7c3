//! Wave Invaders - a wave-based invaders shoot-'em-up engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, enemy AI, collisions, wave state)
//! - `platform`: Simulation thread, input queue and wall-clock cadence
//! - `audio`: Sound intents emitted by the simulation
//! - `highscores`: High score persistence
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore};
pub use platform::{Session, SessionReport};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Points awarded per destroyed enemy
    pub const SCORE_PER_ENEMY: u32 = 10;
    /// Lives at the start of a run (and after game over)
    pub const START_LIVES: u32 = 3;
    /// First wave number
    pub const FIRST_WAVE: u32 = 1;

    /// Default play field dimensions
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;
}
