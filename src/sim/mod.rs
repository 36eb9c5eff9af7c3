//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (row-major grid order)
//! - No threads, clocks, rendering or audio dependencies

pub mod ai;
pub mod bullets;
pub mod collision;
pub mod formation;
pub mod geometry;
pub mod shelters;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ai::{AiDecision, EnemyAi};
pub use bullets::{Bullet, BulletPool, Shooter};
pub use collision::{CollisionOutcome, first_hit, resolve_collisions};
pub use formation::{Enemy, Formation};
pub use geometry::{Direction, Field, Rect, Renderable};
pub use shelters::{Brick, build_shelters};
pub use snapshot::{Hud, Snapshot, Sprite};
pub use state::{GameEvent, GamePhase, GameState, Ship, WaveState};
pub use tick::{Command, apply_command, tick};
