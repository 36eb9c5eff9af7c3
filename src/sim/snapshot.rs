//! Immutable per-frame view for renderers
//!
//! Taken after a tick completes; nothing here points back into `GameState`.

use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Renderable};
use super::state::{GamePhase, GameState};

/// A drawable rectangle and whether it should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub rect: Rect,
    pub shown: bool,
}

impl Sprite {
    pub fn of<T: Renderable>(item: &T) -> Self {
        Self {
            rect: item.bounds(),
            shown: item.is_shown(),
        }
    }
}

/// Heads-up display fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub wave: u32,
    pub high_score: u32,
    pub fps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub ship: Sprite,
    pub enemies: Vec<Sprite>,
    /// Which of the two enemy frames to draw
    pub anim_phase: bool,
    pub bricks: Vec<Sprite>,
    pub player_bullet: Sprite,
    pub enemy_bullets: Vec<Sprite>,
    pub hud: Hud,
    pub tick: u64,
}

impl Snapshot {
    pub fn capture(state: &GameState, fps: u32) -> Self {
        Self {
            phase: state.phase,
            ship: Sprite::of(&state.ship),
            enemies: state.formation.enemies().iter().map(Sprite::of).collect(),
            anim_phase: state.anim_phase,
            bricks: state.bricks.iter().map(Sprite::of).collect(),
            player_bullet: Sprite::of(state.bullets.player()),
            enemy_bullets: state.bullets.enemy_bullets().iter().map(Sprite::of).collect(),
            hud: Hud {
                score: state.wave.score,
                lives: state.wave.lives,
                wave: state.wave.wave,
                high_score: state.wave.high_score,
                fps,
            },
            tick: state.time_ticks,
        }
    }

    /// Enemies still on screen
    pub fn enemies_shown(&self) -> usize {
        self.enemies.iter().filter(|s| s.shown).count()
    }
}
