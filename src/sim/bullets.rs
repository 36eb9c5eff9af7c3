//! Projectile pool
//!
//! The player owns exactly one bullet slot. Enemies share a fixed ring of
//! slots handed out round-robin; a slot is only reused once its bullet has
//! gone inactive, which throttles enemy fire without any cooldown timer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Direction, Field, Rect, Renderable};
use crate::tuning::Tuning;

/// Who pulled the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shooter {
    Player,
    Enemy,
}

/// A single projectile slot
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Signed vertical velocity (negative is up)
    pub velocity: f32,
    pub length: f32,
    width: f32,
    speed: f32,
    /// Inactive slots are free for reuse
    pub active: bool,
}

impl Bullet {
    pub fn new(speed: f32, length: f32, width: f32) -> Self {
        Self {
            rect: Rect::default(),
            velocity: 0.0,
            length,
            width,
            speed,
            active: false,
        }
    }

    /// Launch from `(x, y)` (top-left) if the slot is free
    pub fn shoot(&mut self, x: f32, y: f32, direction: Direction) -> bool {
        if self.active {
            return false;
        }
        let heading = direction.unit().y;
        if heading == 0.0 {
            return false;
        }
        self.rect = Rect::from_origin(x, y, self.width, self.length);
        self.velocity = heading * self.speed;
        self.active = true;
        true
    }

    pub fn advance(&mut self, dt: f32) {
        if self.active {
            self.rect.translate(Vec2::new(0.0, self.velocity * dt));
        }
    }
}

impl Renderable for Bullet {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_shown(&self) -> bool {
        self.active
    }
}

/// Player slot plus the enemy ring
#[derive(Debug, Clone)]
pub struct BulletPool {
    player: Bullet,
    enemy: Vec<Bullet>,
    cursor: usize,
}

impl BulletPool {
    pub fn new(field: &Field, tuning: &Tuning) -> Self {
        let player = Bullet::new(
            tuning.player_bullet_speed,
            field.height / tuning.player_bullet_length_div,
            tuning.bullet_width,
        );
        let enemy_template = Bullet::new(
            tuning.enemy_bullet_speed,
            field.height / tuning.enemy_bullet_length_div,
            tuning.bullet_width,
        );
        Self {
            player,
            enemy: vec![enemy_template; tuning.enemy_bullet_slots],
            cursor: 0,
        }
    }

    /// Try to launch a bullet. Rejected silently when the player slot is busy
    /// or the next enemy slot in the ring is still in flight.
    pub fn fire(&mut self, shooter: Shooter, x: f32, y: f32, direction: Direction) -> bool {
        match shooter {
            Shooter::Player => self.player.shoot(x, y, direction),
            Shooter::Enemy => {
                let Some(slot) = self.enemy.get_mut(self.cursor) else {
                    return false;
                };
                if !slot.shoot(x, y, direction) {
                    return false;
                }
                self.cursor = (self.cursor + 1) % self.enemy.len();
                true
            }
        }
    }

    /// Move every live bullet and retire the ones that left the field
    pub fn update(&mut self, dt: f32, field: &Field) {
        self.player.advance(dt);
        if self.player.active && self.player.rect.bottom < 0.0 {
            self.player.active = false;
        }

        for bullet in self.enemy.iter_mut().filter(|b| b.active) {
            bullet.advance(dt);
            if bullet.rect.top > field.height {
                bullet.active = false;
            }
        }
    }

    pub fn player(&self) -> &Bullet {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Bullet {
        &mut self.player
    }

    pub fn enemy_bullets(&self) -> &[Bullet] {
        &self.enemy
    }

    pub fn enemy_bullets_mut(&mut self) -> &mut [Bullet] {
        &mut self.enemy
    }

    /// Index of the slot the next enemy shot will try to claim
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active_enemy_count(&self) -> usize {
        self.enemy.iter().filter(|b| b.active).count()
    }
}
