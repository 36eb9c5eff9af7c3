//! Fixed timestep simulation tick
//!
//! Order within a tick: ship, formation (AI, motion, aimed fire), bullets,
//! collisions, then the wave/game-over transitions.

use serde::{Deserialize, Serialize};

use super::ai::EnemyAi;
use super::bullets::Shooter;
use super::collision::{CollisionOutcome, resolve_collisions};
use super::geometry::Direction;
use super::state::{GameEvent, GamePhase, GameState, Ship};

/// Abstract input, already translated from raw pointer/touch events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Stop,
    Fire,
    Resume,
    Pause,
}

/// Apply one input command between ticks
pub fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::Pause => {
            if state.phase == GamePhase::Playing {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            return;
        }
        Command::Resume => {}
        Command::MoveLeft => state.ship.moving = Direction::Left,
        Command::MoveRight => state.ship.moving = Direction::Right,
        Command::Stop => state.ship.moving = Direction::Stopped,
        Command::Fire => state.ship.fire_requested = true,
    }

    // Any movement or fire command doubles as a resume
    if state.phase == GamePhase::Paused {
        state.phase = GamePhase::Playing;
        log::info!("Resumed on wave {}", state.wave.wave);
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    // Ship
    state.ship.update(dt, &state.field);
    if state.ship.fire_requested {
        state.ship.fire_requested = false;
        let x = state.ship.rect.center().x;
        let y = state.ship.rect.top;
        if state.bullets.fire(Shooter::Player, x, y, Direction::Up) {
            state.emit(GameEvent::ShotFired);
        }
    }

    // Formation
    let wave = state.wave.wave;
    let decision = state
        .ai
        .update(&mut state.formation, &state.field, &state.tuning, wave);
    let landed = decision.reversed && state.formation.has_landed(&state.field);
    state.formation.advance(dt);
    fire_aimed_shots(state);

    // Projectiles
    state.bullets.update(dt, &state.field);

    let outcome = resolve_collisions(state);

    if landed || outcome == CollisionOutcome::PlayerLost {
        if landed {
            log::info!("Formation landed on wave {}", wave);
        }
        game_over(state);
    } else if outcome == CollisionOutcome::WaveCleared {
        clear_wave(state);
    }
}

/// Turn pending fire requests into bullets where the enemy is lined up
fn fire_aimed_shots(state: &mut GameState) {
    let wave = state.wave.wave;
    for index in 0..state.formation.len() {
        let enemy = &state.formation.enemies()[index];
        if !EnemyAi::can_take_aim(enemy, &state.ship.rect, wave, &state.tuning) {
            continue;
        }
        let x = enemy.rect.center().x;
        let y = enemy.rect.bottom;
        if state.bullets.fire(Shooter::Enemy, x, y, Direction::Down) {
            state.formation.clear_fire_request(index);
            log::debug!("Enemy {index} fired");
        }
    }
}

/// Last enemy down: bonus life, next wave, back to paused
fn clear_wave(state: &mut GameState) {
    state.phase = GamePhase::WaveClearing;
    state.wave.lives += 1;
    state.wave.wave += 1;
    log::info!(
        "Wave cleared! Score {}, lives {}, next wave {}",
        state.wave.score,
        state.wave.lives,
        state.wave.wave
    );
    state.prepare_level();
    state.emit(GameEvent::WaveCleared {
        next_wave: state.wave.wave,
    });
    state.phase = GamePhase::Paused;
}

/// Run lost: reset score, lives and wave, rebuild the first level
fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    let final_score = state.wave.score;
    let wave = state.wave.wave;
    log::info!("Game over on wave {} with score {}", wave, final_score);
    state.emit(GameEvent::GameOver { final_score, wave });

    state.wave.reset();
    state.ship = Ship::new(&state.field, &state.tuning);
    state.prepare_level();
    state.phase = GamePhase::Paused;
}
