//! Collision detection and resolution
//!
//! One pass per tick, in a fixed order. A bullet that hits something goes
//! inactive before the next check, so later checks in the same pass never see
//! it and no hit is counted twice. Scans run in row-major grid order; the
//! first overlap in that order wins, not the nearest. The exception is an
//! enemy bullet reaching a shelter, which knocks out every brick it overlaps.

use super::bullets::BulletPool;
use super::formation::Formation;
use super::geometry::{Rect, Renderable};
use super::shelters::Brick;
use super::state::{GameEvent, GameState, Ship, WaveState};

/// Terminal condition reached during the pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Nothing terminal happened
    Continue,
    /// The last enemy was destroyed; remaining checks were skipped
    WaveCleared,
    /// The ship lost its last life; remaining checks were skipped
    PlayerLost,
}

/// Index of the first shown target overlapping `probe`
pub fn first_hit<'a, T, I>(probe: &Rect, targets: I) -> Option<usize>
where
    T: Renderable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    targets
        .into_iter()
        .position(|target| target.is_shown() && target.bounds().intersects(probe))
}

/// Run every check for this tick
pub fn resolve_collisions(state: &mut GameState) -> CollisionOutcome {
    let events = &mut state.events;

    if player_bullet_vs_enemies(&mut state.bullets, &mut state.formation, &mut state.wave, events)
        && state.formation.alive() == 0
    {
        return CollisionOutcome::WaveCleared;
    }

    enemy_bullets_vs_bricks(&mut state.bullets, &mut state.bricks, events);
    player_bullet_vs_bricks(&mut state.bullets, &mut state.bricks, events);

    if enemy_bullets_vs_ship(&mut state.bullets, &state.ship, &mut state.wave, events) {
        return CollisionOutcome::PlayerLost;
    }

    CollisionOutcome::Continue
}

/// Player shot against the formation; at most one enemy per tick
fn player_bullet_vs_enemies(
    bullets: &mut BulletPool,
    formation: &mut Formation,
    wave: &mut WaveState,
    events: &mut Vec<GameEvent>,
) -> bool {
    let bullet = bullets.player_mut();
    if !bullet.active {
        return false;
    }
    let Some(index) = first_hit(&bullet.rect, formation.enemies()) else {
        return false;
    };

    let (row, column) = {
        let enemy = &formation.enemies()[index];
        (enemy.row, enemy.column)
    };
    bullet.active = false;
    formation.destroy(index);
    wave.add_kill();
    events.push(GameEvent::EnemyDestroyed { row, column });
    log::debug!(
        "Enemy ({row}, {column}) destroyed, {} left, score {}",
        formation.alive(),
        wave.score
    );
    true
}

/// Every live enemy bullet against the shelters. A bullet knocks out every
/// brick it overlaps this tick, not just the first.
fn enemy_bullets_vs_bricks(
    bullets: &mut BulletPool,
    bricks: &mut [Brick],
    events: &mut Vec<GameEvent>,
) {
    for bullet in bullets.enemy_bullets_mut().iter_mut().filter(|b| b.active) {
        let mut hit = false;
        for brick in bricks
            .iter_mut()
            .filter(|b| b.visible && b.rect.intersects(&bullet.rect))
        {
            brick.visible = false;
            events.push(GameEvent::ShelterDamaged);
            hit = true;
        }
        if hit {
            bullet.active = false;
        }
    }
}

fn player_bullet_vs_bricks(
    bullets: &mut BulletPool,
    bricks: &mut [Brick],
    events: &mut Vec<GameEvent>,
) {
    let bullet = bullets.player_mut();
    if !bullet.active {
        return;
    }
    if let Some(index) = first_hit(&bullet.rect, bricks.iter()) {
        bullet.active = false;
        bricks[index].visible = false;
        events.push(GameEvent::ShelterDamaged);
    }
}

/// Enemy bullets against the ship. Returns true once lives run out.
fn enemy_bullets_vs_ship(
    bullets: &mut BulletPool,
    ship: &Ship,
    wave: &mut WaveState,
    events: &mut Vec<GameEvent>,
) -> bool {
    for bullet in bullets.enemy_bullets_mut().iter_mut() {
        if !bullet.active || !bullet.rect.intersects(&ship.rect) {
            continue;
        }
        bullet.active = false;
        wave.lives = wave.lives.saturating_sub(1);
        events.push(GameEvent::PlayerHit {
            lives_left: wave.lives,
        });
        log::debug!("Ship hit, {} lives left", wave.lives);
        if wave.lives == 0 {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullets::Shooter;
    use crate::sim::formation::Enemy;
    use crate::sim::geometry::{Direction, Field};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(Field::default(), Tuning::default(), 11)
    }

    /// Fire the player bullet so it overlaps `rect`
    fn player_shot_at(state: &mut GameState, rect: Rect) {
        let c = rect.center();
        assert!(state.bullets.fire(Shooter::Player, c.x - 1.0, c.y - 2.0, Direction::Up));
    }

    fn enemy_shot_at(state: &mut GameState, rect: Rect) -> bool {
        let c = rect.center();
        state.bullets.fire(Shooter::Enemy, c.x - 1.0, c.y - 2.0, Direction::Down)
    }

    #[test]
    fn test_player_bullet_kills_first_enemy_only() {
        let mut state = state();
        let target = state.formation.enemies()[12].rect;
        player_shot_at(&mut state, target);

        assert_eq!(resolve_collisions(&mut state), CollisionOutcome::Continue);
        assert!(!state.formation.enemies()[12].visible);
        assert_eq!(state.formation.alive(), 65);
        assert_eq!(state.wave.score, 10);
        assert_eq!(state.wave.high_score, 10);
        assert!(!state.bullets.player().active);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::EnemyDestroyed { row: 1, column: 1 }]
        );
    }

    #[test]
    fn test_overlapping_enemies_resolve_in_grid_order() {
        let mut state = state();
        let rect = Rect::from_origin(100.0, 100.0, 30.0, 20.0);
        state.formation = Formation::from_enemies(
            vec![Enemy::new(rect, 0, 0), Enemy::new(rect, 0, 1)],
            Direction::Right,
            40.0,
        );
        player_shot_at(&mut state, rect);

        resolve_collisions(&mut state);
        assert!(!state.formation.enemies()[0].visible);
        assert!(state.formation.enemies()[1].visible);
        assert_eq!(state.formation.alive(), 1);
    }

    #[test]
    fn test_last_enemy_clears_wave_and_skips_later_checks() {
        let mut state = state();
        let rect = Rect::from_origin(100.0, 100.0, 30.0, 20.0);
        state.formation = Formation::from_enemies(vec![Enemy::new(rect, 0, 0)], Direction::Right, 40.0);
        player_shot_at(&mut state, rect);
        // An enemy bullet sitting on the ship would otherwise cost a life
        let ship = state.ship.rect;
        assert!(enemy_shot_at(&mut state, ship));

        assert_eq!(resolve_collisions(&mut state), CollisionOutcome::WaveCleared);
        assert_eq!(state.formation.alive(), 0);
        assert_eq!(state.wave.lives, 3);
        assert!(state.bullets.enemy_bullets()[0].active);
    }

    /// Shrink enemy bullet `slot` to a sliver inside `rect`
    fn pin_enemy_bullet(state: &mut GameState, slot: usize, rect: Rect) {
        let c = rect.center();
        state.bullets.enemy_bullets_mut()[slot].rect = Rect::new(c.x - 1.0, c.y - 1.0, c.x + 1.0, c.y + 1.0);
    }

    #[test]
    fn test_every_enemy_bullet_is_evaluated() {
        let mut state = state();
        let first = state.bricks[0].rect;
        let other_shelter = state.bricks[200].rect;
        assert!(enemy_shot_at(&mut state, first));
        assert!(enemy_shot_at(&mut state, other_shelter));
        pin_enemy_bullet(&mut state, 0, first);
        pin_enemy_bullet(&mut state, 1, other_shelter);
        let before = state.visible_bricks();

        resolve_collisions(&mut state);
        assert!(!state.bricks[0].visible);
        assert!(!state.bricks[200].visible);
        assert_eq!(state.visible_bricks(), before - 2);
        assert_eq!(state.bullets.active_enemy_count(), 0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ShelterDamaged, GameEvent::ShelterDamaged]
        );
    }

    #[test]
    fn test_enemy_bullet_takes_every_brick_it_overlaps() {
        let mut state = state();
        // Same column, rows 0 and 1 of the first shelter
        let upper = state.bricks[0].rect;
        let lower = state.bricks[19].rect;
        assert!(enemy_shot_at(&mut state, upper));
        let x = upper.center().x;
        state.bullets.enemy_bullets_mut()[0].rect =
            Rect::new(x - 1.0, upper.center().y, x + 1.0, lower.center().y);

        resolve_collisions(&mut state);
        assert!(!state.bricks[0].visible);
        assert!(!state.bricks[19].visible);
        assert_eq!(state.visible_bricks(), 855 - 2);
        assert!(!state.bullets.enemy_bullets()[0].active);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ShelterDamaged, GameEvent::ShelterDamaged]
        );
    }

    #[test]
    fn test_player_bullet_takes_only_first_brick() {
        let mut state = state();
        let upper = state.bricks[0].rect;
        let lower = state.bricks[19].rect;
        player_shot_at(&mut state, upper);
        let x = upper.center().x;
        state.bullets.player_mut().rect = Rect::new(x - 1.0, upper.center().y, x + 1.0, lower.center().y);

        resolve_collisions(&mut state);
        assert!(!state.bricks[0].visible);
        assert!(state.bricks[19].visible);
        assert_eq!(state.visible_bricks(), 855 - 1);
    }

    #[test]
    fn test_player_bullet_blocked_by_shelter() {
        let mut state = state();
        let brick = state.bricks[40].rect;
        player_shot_at(&mut state, brick);

        resolve_collisions(&mut state);
        assert!(!state.bullets.player().active);
        assert_eq!(state.visible_bricks(), 855 - 1);
        assert_eq!(state.formation.alive(), 66);
    }

    #[test]
    fn test_ship_hit_costs_a_life() {
        let mut state = state();
        let ship = state.ship.rect;
        assert!(enemy_shot_at(&mut state, ship));

        assert_eq!(resolve_collisions(&mut state), CollisionOutcome::Continue);
        assert_eq!(state.wave.lives, 2);
        assert_eq!(state.drain_events(), vec![GameEvent::PlayerHit { lives_left: 2 }]);
    }

    #[test]
    fn test_last_life_stops_the_pass() {
        let mut state = state();
        state.wave.lives = 1;
        let ship = state.ship.rect;
        assert!(enemy_shot_at(&mut state, ship));
        assert!(enemy_shot_at(&mut state, ship));

        assert_eq!(resolve_collisions(&mut state), CollisionOutcome::PlayerLost);
        assert_eq!(state.wave.lives, 0);
        // Second bullet was never evaluated
        assert!(state.bullets.enemy_bullets()[1].active);
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let mut state = state();
        let target = state.formation.enemies()[3].rect;
        player_shot_at(&mut state, target);
        let brick = state.bricks[10].rect;
        enemy_shot_at(&mut state, brick);
        let ship = state.ship.rect;
        enemy_shot_at(&mut state, ship);

        resolve_collisions(&mut state);
        let wave = state.wave;
        let alive = state.formation.alive();
        let bricks = state.visible_bricks();
        state.drain_events();

        assert_eq!(resolve_collisions(&mut state), CollisionOutcome::Continue);
        assert_eq!(state.wave, wave);
        assert_eq!(state.formation.alive(), alive);
        assert_eq!(state.visible_bricks(), bricks);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_hidden_targets_never_hit() {
        let mut state = state();
        let target = state.formation.enemies()[0].rect;
        state.formation.destroy(0);
        player_shot_at(&mut state, target);

        resolve_collisions(&mut state);
        assert!(state.bullets.player().active);
        assert_eq!(state.wave.score, 0);
    }
}
