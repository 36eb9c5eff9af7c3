//! Enemy formation
//!
//! The formation is one rigid body: all enemies share a single direction and
//! speed, and reversals move every slot (destroyed or not) together. Enemies
//! are stored row-major in a flat vector, which is also the collision scan
//! order.

use glam::Vec2;

use super::geometry::{Direction, Field, Rect, Renderable};
use crate::tuning::Tuning;

/// One slot in the formation grid
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub row: usize,
    pub column: usize,
    pub visible: bool,
    /// Set by the AI, consumed when the enemy actually fires
    pub fire_requested: bool,
}

impl Enemy {
    pub fn new(rect: Rect, row: usize, column: usize) -> Self {
        Self {
            rect,
            row,
            column,
            visible: true,
            fire_requested: false,
        }
    }
}

impl Renderable for Enemy {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_shown(&self) -> bool {
        self.visible
    }
}

/// Grid of enemies plus the shared motion state
#[derive(Debug, Clone)]
pub struct Formation {
    enemies: Vec<Enemy>,
    alive: usize,
    direction: Direction,
    speed: f32,
}

impl Formation {
    /// Lay out a fresh grid for `wave` (1-based)
    pub fn new(field: &Field, tuning: &Tuning, wave: u32) -> Self {
        let rows = tuning.rows_for_wave(wave);
        let width = field.width / 35.0;
        let height = field.height / 35.0;
        let padding = field.width / 45.0;
        let top_margin = field.height / 8.0;

        let mut enemies = Vec::with_capacity(rows * tuning.columns);
        for row in 0..rows {
            for column in 0..tuning.columns {
                let left = column as f32 * (width + padding);
                let top = top_margin + row as f32 * (width + padding / 4.0);
                enemies.push(Enemy::new(
                    Rect::from_origin(left, top, width, height),
                    row,
                    column,
                ));
            }
        }

        Self::from_enemies(enemies, Direction::Right, tuning.enemy_speed_for_wave(wave))
    }

    /// Build from explicit slots (row-major); alive-count follows visibility
    pub fn from_enemies(enemies: Vec<Enemy>, direction: Direction, speed: f32) -> Self {
        let alive = enemies.iter().filter(|e| e.visible).count();
        Self {
            enemies,
            alive,
            direction,
            speed,
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Number of enemies still visible
    pub fn alive(&self) -> usize {
        self.alive
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Hide enemy `index`. Returns false if it was already gone.
    pub fn destroy(&mut self, index: usize) -> bool {
        let Some(enemy) = self.enemies.get_mut(index) else {
            return false;
        };
        if !enemy.visible {
            return false;
        }
        enemy.visible = false;
        enemy.fire_requested = false;
        self.alive -= 1;
        debug_assert_eq!(
            self.alive,
            self.enemies.iter().filter(|e| e.visible).count(),
            "alive-count drifted from visible enemies"
        );
        true
    }

    pub fn request_fire(&mut self, index: usize) {
        if let Some(enemy) = self.enemies.get_mut(index) {
            enemy.fire_requested = true;
        }
    }

    /// Clear a pending fire request after the shot was taken
    pub fn clear_fire_request(&mut self, index: usize) {
        if let Some(enemy) = self.enemies.get_mut(index) {
            enemy.fire_requested = false;
        }
    }

    /// Slide every slot horizontally by the shared direction
    pub fn advance(&mut self, dt: f32) {
        let delta = self.direction.unit() * self.speed * dt;
        for enemy in &mut self.enemies {
            enemy.rect.translate(delta);
        }
    }

    /// Whether any slot has reached the edge it is heading for
    pub fn at_boundary(&self, field: &Field) -> bool {
        self.enemies.iter().any(|enemy| match self.direction {
            Direction::Right => enemy.rect.right >= field.width,
            Direction::Left => enemy.rect.left <= 0.0,
            _ => false,
        })
    }

    /// Flip direction, drop every slot by its own height and speed up
    pub fn reverse_and_descend(&mut self, wave: u32) {
        self.direction = self.direction.reversed();
        for enemy in &mut self.enemies {
            let drop = enemy.rect.height();
            enemy.rect.translate(Vec2::new(0.0, drop));
        }
        self.speed *= Tuning::reversal_speedup(wave);
    }

    /// Whether a visible enemy has reached the bottom of the field
    pub fn has_landed(&self, field: &Field) -> bool {
        self.enemies
            .iter()
            .any(|e| e.visible && e.rect.bottom >= field.height)
    }
}
