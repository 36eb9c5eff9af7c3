//! Data-driven game balance
//!
//! Every knob the simulation reads lives here so balance can be adjusted from
//! the settings file without touching the engine.

use serde::{Deserialize, Serialize};

/// Balance parameters for formation, projectiles, ship, AI and shelters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Formation ===
    /// Enemy columns per wave
    pub columns: usize,
    /// Enemy rows on wave 1
    pub base_rows: usize,
    /// Row cap for late waves
    pub max_rows: usize,
    /// One extra row every N waves
    pub waves_per_extra_row: u32,
    /// Formation speed on wave 1 (units/s)
    pub base_enemy_speed: f32,
    /// Additional starting speed per wave beyond the first (fraction)
    pub speed_gain_per_wave: f32,

    // === Projectiles ===
    /// Enemy bullet pool capacity
    pub enemy_bullet_slots: usize,
    pub player_bullet_speed: f32,
    /// Player bullet length as a divisor of field height
    pub player_bullet_length_div: f32,
    pub enemy_bullet_speed: f32,
    /// Enemy bullet length as a divisor of field height
    pub enemy_bullet_length_div: f32,
    pub bullet_width: f32,

    // === Ship ===
    pub ship_speed: f32,

    // === Enemy AI ===
    /// Chance per tick that a random enemy is asked to fire (full formation)
    pub enemy_fire_chance: f64,
    /// Upper bound once the formation thins out
    pub max_fire_chance: f64,
    /// Aim window growth per wave, in enemy widths
    pub aim_window_per_wave: f32,
    /// Aim window growth per formation row from the top, in enemy widths
    pub aim_bonus_per_row: f32,
    /// Aim window cap, in enemy widths
    pub max_aim_window: f32,

    // === Shelters ===
    pub shelters: usize,
    pub shelter_columns: usize,
    pub shelter_rows: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            columns: 11,
            base_rows: 6,
            max_rows: 8,
            waves_per_extra_row: 3,
            base_enemy_speed: 40.0,
            speed_gain_per_wave: 0.1,

            enemy_bullet_slots: 10,
            player_bullet_speed: 1200.0,
            player_bullet_length_div: 40.0,
            enemy_bullet_speed: 350.0,
            enemy_bullet_length_div: 20.0,
            bullet_width: 2.0,

            ship_speed: 450.0,

            enemy_fire_chance: 0.01,
            max_fire_chance: 0.25,
            aim_window_per_wave: 0.25,
            aim_bonus_per_row: 0.1,
            max_aim_window: 2.0,

            shelters: 5,
            shelter_columns: 19,
            shelter_rows: 9,
        }
    }
}

impl Tuning {
    /// Formation rows for a given wave (1-based)
    pub fn rows_for_wave(&self, wave: u32) -> usize {
        let extra = if self.waves_per_extra_row == 0 {
            0
        } else {
            (wave.saturating_sub(1) / self.waves_per_extra_row) as usize
        };
        (self.base_rows + extra).min(self.max_rows.max(self.base_rows))
    }

    /// Starting formation speed for a given wave (1-based)
    pub fn enemy_speed_for_wave(&self, wave: u32) -> f32 {
        self.base_enemy_speed * (1.0 + self.speed_gain_per_wave * wave.saturating_sub(1) as f32)
    }

    /// Multiplier applied to formation speed on every reversal
    pub fn reversal_speedup(wave: u32) -> f32 {
        1.1 + wave as f32 / 20.0
    }
}
