//! Game state and core simulation types
//!
//! `GameState` owns every entity. It is mutated only by `tick` and
//! `apply_command`, one step at a time, on the simulation thread.

use serde::{Deserialize, Serialize};

use super::ai::EnemyAi;
use super::bullets::BulletPool;
use super::formation::Formation;
use super::geometry::{Direction, Field, Rect, Renderable};
use super::shelters::{Brick, build_shelters};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for input; no simulation runs
    Paused,
    /// Active gameplay
    Playing,
    /// Momentary: last enemy destroyed, next wave being built
    WaveClearing,
    /// Momentary: run lost, starting level being rebuilt
    GameOver,
}

/// Something that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player bullet left the ship
    ShotFired,
    EnemyDestroyed { row: usize, column: usize },
    ShelterDamaged,
    PlayerHit { lives_left: u32 },
    /// Emitted after the next wave has been built
    WaveCleared { next_wave: u32 },
    GameOver { final_score: u32, wave: u32 },
}

/// The player's ship; moves horizontally only
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub rect: Rect,
    pub moving: Direction,
    pub speed: f32,
    /// Set by a fire command, consumed on the next tick
    pub fire_requested: bool,
}

impl Ship {
    /// Bottom-centred ship sized relative to the field
    pub fn new(field: &Field, tuning: &Tuning) -> Self {
        let width = field.width / 20.0;
        let height = field.height / 20.0;
        Self {
            rect: Rect::from_origin(field.width / 2.0, field.height - height, width, height),
            moving: Direction::Stopped,
            speed: tuning.ship_speed,
            fire_requested: false,
        }
    }

    /// Move along the shared direction, clamped to the field
    pub fn update(&mut self, dt: f32, field: &Field) {
        let width = self.rect.width();
        let dx = match self.moving {
            Direction::Left | Direction::Right => self.moving.unit().x * self.speed * dt,
            _ => 0.0,
        };
        let left = (self.rect.left + dx).clamp(0.0, (field.width - width).max(0.0));
        self.rect.left = left;
        self.rect.right = left + width;
    }
}

impl Renderable for Ship {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_shown(&self) -> bool {
        true
    }
}

/// Score, lives and wave bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveState {
    /// Current wave (1-based)
    pub wave: u32,
    pub score: u32,
    pub lives: u32,
    /// Best score seen, including previous sessions
    pub high_score: u32,
}

impl WaveState {
    pub fn new(high_score: u32) -> Self {
        Self {
            wave: FIRST_WAVE,
            score: 0,
            lives: START_LIVES,
            high_score,
        }
    }

    /// Credit one destroyed enemy
    pub fn add_kill(&mut self) {
        self.score += SCORE_PER_ENEMY;
        self.high_score = self.high_score.max(self.score);
    }

    /// Back to a fresh run; the high score survives
    pub fn reset(&mut self) {
        *self = Self::new(self.high_score);
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: Field,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub wave: WaveState,
    pub ship: Ship,
    pub formation: Formation,
    pub bricks: Vec<Brick>,
    pub bullets: BulletPool,
    pub ai: EnemyAi,
    /// Enemy sprite frame, flipped by each menace cue
    pub anim_phase: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a paused session on wave 1
    pub fn new(field: Field, tuning: Tuning, seed: u64) -> Self {
        let formation = Formation::new(&field, &tuning, FIRST_WAVE);
        let bricks = build_shelters(&field, &tuning);
        let bullets = BulletPool::new(&field, &tuning);
        let ship = Ship::new(&field, &tuning);
        Self {
            field,
            tuning,
            phase: GamePhase::Paused,
            wave: WaveState::new(0),
            ship,
            formation,
            bricks,
            bullets,
            ai: EnemyAi::new(seed),
            anim_phase: false,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Rebuild formation, shelters and bullets for the current wave
    pub fn prepare_level(&mut self) {
        self.formation = Formation::new(&self.field, &self.tuning, self.wave.wave);
        self.bricks = build_shelters(&self.field, &self.tuning);
        self.bullets = BulletPool::new(&self.field, &self.tuning);
        log::info!(
            "Wave {} prepared: {} enemies, {} bricks",
            self.wave.wave,
            self.formation.len(),
            self.bricks.len()
        );
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn toggle_animation_phase(&mut self) {
        self.anim_phase = !self.anim_phase;
    }

    pub fn visible_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }
}
