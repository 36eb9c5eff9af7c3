//! Enemy formation AI
//!
//! Each tick the AI decides whether the formation has hit a wall (reverse and
//! drop) and whether a random enemy is asked to fire. A fire request only
//! turns into a bullet when that enemy is lined up with the ship and the
//! bullet pool admits the shot.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::formation::{Enemy, Formation};
use super::geometry::{Field, Rect};
use crate::tuning::Tuning;

/// What the AI did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AiDecision {
    /// Formation reversed and descended
    pub reversed: bool,
    /// Grid slot asked to fire (may be a destroyed slot)
    pub shooter: Option<usize>,
}

/// Seeded formation controller
#[derive(Debug, Clone)]
pub struct EnemyAi {
    rng: Pcg32,
}

impl EnemyAi {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Decide and apply this tick's reversal and fire request
    pub fn update(
        &mut self,
        formation: &mut Formation,
        field: &Field,
        tuning: &Tuning,
        wave: u32,
    ) -> AiDecision {
        if formation.is_empty() {
            return AiDecision::default();
        }

        let reversed = formation.at_boundary(field);

        let chance = Self::fire_chance(formation, tuning);
        let shooter = if chance > 0.0 && self.rng.random_bool(chance) {
            let index = self.rng.random_range(0..formation.len());
            formation.request_fire(index);
            Some(index)
        } else {
            None
        };

        if reversed {
            formation.reverse_and_descend(wave);
        }

        AiDecision { reversed, shooter }
    }

    /// Per-tick fire chance; rises as the formation thins out
    pub fn fire_chance(formation: &Formation, tuning: &Tuning) -> f64 {
        if formation.alive() == 0 {
            return 0.0;
        }
        let thinning = formation.len() as f64 / formation.alive() as f64;
        (tuning.enemy_fire_chance * thinning)
            .min(tuning.max_fire_chance)
            .clamp(0.0, 1.0)
    }

    /// Extra horizontal slack for lining up a shot from `row` on `wave`.
    /// Lower rows (higher index) get a wider window.
    pub fn aim_window(enemy_width: f32, row: usize, wave: u32, tuning: &Tuning) -> f32 {
        let widths = tuning.aim_window_per_wave * wave.saturating_sub(1) as f32
            + tuning.aim_bonus_per_row * row as f32;
        enemy_width * widths.min(tuning.max_aim_window)
    }

    /// Whether `enemy` has a pending request and is lined up with the ship
    pub fn can_take_aim(enemy: &Enemy, ship: &Rect, wave: u32, tuning: &Tuning) -> bool {
        if !enemy.visible || !enemy.fire_requested {
            return false;
        }
        let slack = Self::aim_window(enemy.rect.width(), enemy.row, wave, tuning);
        ship.overlaps_horizontally(&enemy.rect, slack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Direction;

    fn always_fire() -> Tuning {
        Tuning {
            enemy_fire_chance: 1.0,
            max_fire_chance: 1.0,
            ..Tuning::default()
        }
    }

    fn never_fire() -> Tuning {
        Tuning {
            enemy_fire_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn column_at(left: f32, direction: Direction) -> Formation {
        let enemies = (0..3)
            .map(|row| Enemy::new(Rect::from_origin(left, 50.0 + row as f32 * 30.0, 20.0, 20.0), row, 0))
            .collect();
        Formation::from_enemies(enemies, direction, 40.0)
    }

    #[test]
    fn test_reverses_at_right_edge() {
        let field = Field::new(200.0, 400.0);
        let mut formation = column_at(180.0, Direction::Right);
        let mut ai = EnemyAi::new(1);
        let decision = ai.update(&mut formation, &field, &never_fire(), 1);
        assert!(decision.reversed);
        assert_eq!(formation.direction(), Direction::Left);
        assert_eq!(formation.enemies()[0].rect.top, 70.0);
    }

    #[test]
    fn test_reverses_at_left_edge_only_when_heading_left() {
        let field = Field::new(200.0, 400.0);
        let mut ai = EnemyAi::new(1);

        let mut formation = column_at(0.0, Direction::Right);
        assert!(!ai.update(&mut formation, &field, &never_fire(), 1).reversed);

        let mut formation = column_at(0.0, Direction::Left);
        assert!(ai.update(&mut formation, &field, &never_fire(), 1).reversed);
        assert_eq!(formation.direction(), Direction::Right);
    }

    #[test]
    fn test_destroyed_slots_still_trigger_reversal() {
        let field = Field::new(200.0, 400.0);
        let mut formation = column_at(185.0, Direction::Right);
        formation.destroy(0);
        formation.destroy(1);
        formation.destroy(2);
        let mut ai = EnemyAi::new(1);
        assert!(ai.update(&mut formation, &field, &never_fire(), 1).reversed);
    }

    #[test]
    fn test_empty_formation_is_a_no_op() {
        let field = Field::default();
        let mut formation = Formation::from_enemies(Vec::new(), Direction::Right, 40.0);
        let mut ai = EnemyAi::new(3);
        assert_eq!(
            ai.update(&mut formation, &field, &always_fire(), 1),
            AiDecision::default()
        );
    }

    #[test]
    fn test_fire_request_lands_on_grid_slot() {
        let field = Field::default();
        let mut formation = column_at(50.0, Direction::Right);
        let mut ai = EnemyAi::new(9);
        let decision = ai.update(&mut formation, &field, &always_fire(), 1);
        let shooter = decision.shooter.expect("certain fire chance");
        assert!(shooter < formation.len());
        assert!(formation.enemies()[shooter].fire_requested);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let field = Field::default();
        let tuning = Tuning {
            enemy_fire_chance: 0.3,
            ..Tuning::default()
        };
        let mut a = EnemyAi::new(42);
        let mut b = EnemyAi::new(42);
        let mut fa = Formation::new(&field, &tuning, 1);
        let mut fb = fa.clone();
        for _ in 0..100 {
            assert_eq!(
                a.update(&mut fa, &field, &tuning, 1),
                b.update(&mut fb, &field, &tuning, 1)
            );
        }
    }

    #[test]
    fn test_fire_chance_scales_with_losses() {
        let field = Field::default();
        let tuning = Tuning::default();
        let mut formation = Formation::new(&field, &tuning, 1);
        let full = EnemyAi::fire_chance(&formation, &tuning);
        for i in 0..33 {
            formation.destroy(i);
        }
        let half = EnemyAi::fire_chance(&formation, &tuning);
        assert!((half - full * 2.0).abs() < 1e-9);

        for i in 33..66 {
            formation.destroy(i);
        }
        assert_eq!(EnemyAi::fire_chance(&formation, &tuning), 0.0);
    }

    #[test]
    fn test_aim_window_grows_with_wave() {
        let tuning = Tuning::default();
        let ship = Rect::new(100.0, 600.0, 150.0, 640.0);
        let mut enemy = Enemy::new(Rect::new(158.0, 100.0, 178.0, 120.0), 0, 0);
        enemy.fire_requested = true;

        assert!(!EnemyAi::can_take_aim(&enemy, &ship, 1, &tuning));
        // Wave 3: half an enemy width (10 units) of slack
        assert!(EnemyAi::can_take_aim(&enemy, &ship, 3, &tuning));

        enemy.visible = false;
        assert!(!EnemyAi::can_take_aim(&enemy, &ship, 3, &tuning));
    }

    #[test]
    fn test_lower_rows_aim_wider() {
        let tuning = Tuning::default();
        let ship = Rect::new(100.0, 600.0, 150.0, 640.0);
        // Both 5 units right of the ship, same column
        let mut top = Enemy::new(Rect::new(155.0, 100.0, 175.0, 120.0), 0, 4);
        let mut bottom = Enemy::new(Rect::new(155.0, 250.0, 175.0, 270.0), 5, 4);
        top.fire_requested = true;
        bottom.fire_requested = true;

        // Row 5 gets half an enemy width of slack on wave 1, row 0 none
        assert!(!EnemyAi::can_take_aim(&top, &ship, 1, &tuning));
        assert!(EnemyAi::can_take_aim(&bottom, &ship, 1, &tuning));
        assert!(
            EnemyAi::aim_window(20.0, 5, 1, &tuning) > EnemyAi::aim_window(20.0, 0, 1, &tuning)
        );
    }

    #[test]
    fn test_aim_window_is_capped() {
        let tuning = Tuning::default();
        let cap = 20.0 * tuning.max_aim_window;
        assert_eq!(EnemyAi::aim_window(20.0, 7, 40, &tuning), cap);
        assert_eq!(EnemyAi::aim_window(20.0, 0, 1, &tuning), 0.0);
    }
}
