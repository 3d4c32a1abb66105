//! Per-kind movement rules and player fire
//!
//! Movement is independent of collisions. Each kind moves, then anything that
//! has left the viewport is culled in the same step.

use glam::Vec2;

use super::collision::Body;
use super::state::{Bullet, EnemyBullet, GameEvent, GameState, Missile};
use super::targeting;
use crate::consts::*;

/// Horizontal intent from the input collaborator
pub fn steer_player(state: &mut GameState, left: bool, right: bool) {
    let player = &mut state.player;
    let max_x = (state.viewport.width - player.size.x).max(0.0);
    if left && player.pos.x > 0.0 {
        player.pos.x = (player.pos.x - player.speed).max(0.0);
    }
    if right && player.pos.x < max_x {
        player.pos.x = (player.pos.x + player.speed).min(max_x);
    }
}

/// Emit a volley if the cooldown has elapsed on the wall clock.
///
/// `now_ms` comes from the driver, not the tick counter, so fire rate does
/// not depend on frame rate. Returns true if a volley was emitted.
pub fn fire(state: &mut GameState, now_ms: u64) -> bool {
    if let Some(last) = state.last_shot_ms {
        if now_ms.saturating_sub(last) < FIRE_COOLDOWN_MS {
            return false;
        }
    }

    let player = state.player.clone();
    let muzzle_y = player.pos.y - BULLET_MUZZLE_OFFSET;
    let mut origins = Vec::with_capacity(2);
    if player.power >= 1 {
        origins.push(Vec2::new(player.pos.x + 5.0, muzzle_y));
        origins.push(Vec2::new(player.pos.x + player.size.x - 10.0, muzzle_y));
    } else {
        origins.push(Vec2::new(player.pos.x + player.size.x / 2.0 - 2.0, muzzle_y));
    }

    let bullets = origins.len();
    for pos in origins {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos,
            damage: player.damage,
        });
    }

    let missiles = if player.power >= 1 { MISSILES_PER_VOLLEY } else { 0 };
    for _ in 0..missiles {
        let id = state.next_entity_id();
        state.missiles.push(Missile {
            id,
            pos: Vec2::new(player.pos.x + player.size.x / 2.0, player.pos.y),
            speed: MISSILE_SPEED,
            damage: MISSILE_DAMAGE,
            target: None,
        });
    }

    state.last_shot_ms = Some(now_ms);
    state.events.push(GameEvent::VolleyFired { bullets, missiles });
    true
}

/// Advance every non-player entity one step, in a fixed order
pub fn advance(state: &mut GameState) {
    advance_bullets(state);
    advance_missiles(state);
    advance_enemies(state);
    advance_boss(state);
    advance_enemy_bullets(state);
    advance_pickups(state);
}

fn advance_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= BULLET_SPEED;
    }
    state.bullets.retain(|b| b.pos.y >= 0.0);
}

fn advance_missiles(state: &mut GameState) {
    let enemies = &state.enemies;
    let boss = state.boss.as_ref();

    for missile in &mut state.missiles {
        match targeting::retarget(missile.target, missile.pos, enemies, boss) {
            Some((target, center)) => {
                missile.target = Some(target);
                let dir = (center - missile.pos).normalize_or_zero();
                missile.pos += dir * missile.speed;
            }
            None => {
                missile.target = None;
                missile.pos.y -= missile.speed;
            }
        }
    }

    let viewport = state.viewport;
    state.missiles.retain(|m| viewport.contains(m.pos));
}

fn advance_enemies(state: &mut GameState) {
    // Deferred so bullet ids can be allocated after the borrow ends
    let mut shots: Vec<Vec2> = Vec::new();

    for enemy in &mut state.enemies {
        enemy.pos.y += enemy.speed;
        enemy.shoot_timer += 1;
        if enemy.shoot_timer > ENEMY_FIRE_INTERVAL {
            shots.push(Vec2::new(enemy.pos.x + enemy.size.x / 2.0, enemy.pos.y + enemy.size.y));
            enemy.shoot_timer = 0;
        }
    }

    for pos in shots {
        let id = state.next_entity_id();
        state.enemy_bullets.push(EnemyBullet {
            id,
            pos,
            vel: Vec2::new(0.0, ENEMY_BULLET_SPEED),
        });
    }

    let height = state.viewport.height;
    state.enemies.retain(|e| e.pos.y <= height);
}

fn advance_boss(state: &mut GameState) {
    let width = state.viewport.width;
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    boss.pos.x += boss.dir * BOSS_SPEED;
    if boss.pos.x <= 0.0 || boss.pos.x + boss.size.x >= width {
        boss.dir = -boss.dir;
    }

    boss.shoot_timer += 1;
    if boss.shoot_timer <= BOSS_FIRE_INTERVAL {
        return;
    }
    boss.shoot_timer = 0;

    let muzzle = boss.center() + Vec2::new(0.0, boss.size.y / 2.0);
    for degrees in BOSS_SPREAD_DEGREES {
        let id = state.next_entity_id();
        state.enemy_bullets.push(EnemyBullet {
            id,
            pos: muzzle,
            vel: spread_velocity(degrees),
        });
    }
}

/// Velocity of one spread bullet; 0° is straight down, positive angles lean right
pub fn spread_velocity(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.sin(), rad.cos()) * ENEMY_BULLET_SPEED
}

fn advance_enemy_bullets(state: &mut GameState) {
    for bullet in &mut state.enemy_bullets {
        bullet.pos += bullet.vel;
    }
    let height = state.viewport.height;
    state.enemy_bullets.retain(|b| b.pos.y <= height);
}

fn advance_pickups(state: &mut GameState) {
    let height = state.viewport.height;

    for p in &mut state.power_ups {
        p.pos.y += p.speed;
    }
    state.power_ups.retain(|p| p.pos.y <= height);

    for s in &mut state.shields {
        s.pos.y += s.speed;
    }
    state.shields.retain(|s| s.pos.y <= height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn;
    use crate::sim::state::{SpawnTable, Viewport};
    use crate::sim::targeting::TargetRef;

    fn quiet_state() -> GameState {
        let mut state = GameState::new(77, Viewport::default());
        state.spawn_table = SpawnTable::silent();
        state
    }

    #[test]
    fn test_player_clamped_to_viewport() {
        let mut state = quiet_state();
        state.player.pos.x = 2.0;
        steer_player(&mut state, true, false);
        assert_eq!(state.player.pos.x, 0.0);
        steer_player(&mut state, true, false);
        assert_eq!(state.player.pos.x, 0.0);

        state.player.pos.x = VIEWPORT_WIDTH - PLAYER_SIZE - 1.0;
        steer_player(&mut state, false, true);
        assert_eq!(state.player.pos.x, VIEWPORT_WIDTH - PLAYER_SIZE);
    }

    #[test]
    fn test_player_vertical_fixed() {
        let mut state = quiet_state();
        let y = state.player.pos.y;
        steer_player(&mut state, false, true);
        assert_eq!(state.player.pos.y, y);
        assert_eq!(state.player.pos.x, 400.0 + PLAYER_SPEED);
    }

    #[test]
    fn test_fire_rate_gate() {
        let mut state = quiet_state();
        assert!(fire(&mut state, 1_000));
        assert!(!fire(&mut state, 1_199));
        assert_eq!(state.bullets.len(), 1);
        assert!(fire(&mut state, 1_200));
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_first_shot_at_time_zero() {
        let mut state = quiet_state();
        assert!(fire(&mut state, 0));
        assert!(!fire(&mut state, 150));
    }

    #[test]
    fn test_single_bullet_volley_centered() {
        let mut state = quiet_state();
        fire(&mut state, 0);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.missiles.is_empty());
        let b = &state.bullets[0];
        assert_eq!(b.pos, Vec2::new(400.0 + 13.0, 560.0 - 15.0));
        assert_eq!(b.damage, PLAYER_BASE_DAMAGE);
    }

    #[test]
    fn test_powered_volley_twin_bullets_and_missiles() {
        let mut state = quiet_state();
        state.player.power_up();
        fire(&mut state, 0);

        assert_eq!(state.bullets.len(), 2);
        assert_eq!(state.bullets[0].pos.x, 405.0);
        assert_eq!(state.bullets[1].pos.x, 420.0);
        assert_eq!(state.missiles.len(), MISSILES_PER_VOLLEY);
        for m in &state.missiles {
            assert!(m.target.is_none());
            assert_eq!(m.damage, MISSILE_DAMAGE);
            assert_eq!(m.pos, Vec2::new(415.0, 560.0));
        }
        assert!(state.events.contains(&GameEvent::VolleyFired { bullets: 2, missiles: 3 }));
    }

    #[test]
    fn test_bullets_fly_up_and_cull() {
        let mut state = quiet_state();
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(100.0, 10.0),
            damage: 10,
        });
        advance(&mut state);
        assert_eq!(state.bullets[0].pos.y, 4.0);
        advance(&mut state);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_missile_drifts_up_without_targets() {
        let mut state = quiet_state();
        let id = state.next_entity_id();
        state.missiles.push(Missile {
            id,
            pos: Vec2::new(100.0, 300.0),
            speed: MISSILE_SPEED,
            damage: MISSILE_DAMAGE,
            target: None,
        });
        advance(&mut state);
        assert_eq!(state.missiles[0].pos, Vec2::new(100.0, 297.0));
        assert!(state.missiles[0].target.is_none());
    }

    #[test]
    fn test_missile_homes_on_nearest() {
        let mut state = quiet_state();
        let enemy = spawn::spawn_enemy_at(&mut state, Vec2::new(85.0, 85.0));
        let id = state.next_entity_id();
        state.missiles.push(Missile {
            id,
            pos: Vec2::new(100.0, 300.0),
            speed: MISSILE_SPEED,
            damage: MISSILE_DAMAGE,
            target: None,
        });

        advance(&mut state);

        let m = &state.missiles[0];
        assert_eq!(m.target, Some(TargetRef::Enemy(enemy)));
        // Target center (100, 100) is straight up
        assert!((m.pos.x - 100.0).abs() < 1e-4);
        assert!((m.pos.y - 297.0).abs() < 1e-4);
    }

    #[test]
    fn test_missile_retargets_next_tick_after_target_removed() {
        let mut state = quiet_state();
        let first = spawn::spawn_enemy_at(&mut state, Vec2::new(100.0, 200.0));
        let second = spawn::spawn_enemy_at(&mut state, Vec2::new(400.0, 200.0));
        let id = state.next_entity_id();
        state.missiles.push(Missile {
            id,
            pos: Vec2::new(110.0, 400.0),
            speed: MISSILE_SPEED,
            damage: MISSILE_DAMAGE,
            target: None,
        });

        advance(&mut state);
        assert_eq!(state.missiles[0].target, Some(TargetRef::Enemy(first)));

        state.enemies.retain(|e| e.id != first);
        advance(&mut state);
        assert_eq!(state.missiles[0].target, Some(TargetRef::Enemy(second)));

        state.enemies.clear();
        let y = state.missiles[0].pos.y;
        advance(&mut state);
        assert!(state.missiles[0].target.is_none());
        assert!((state.missiles[0].pos.y - (y - MISSILE_SPEED)).abs() < 1e-4);
    }

    #[test]
    fn test_missile_culled_outside_viewport() {
        let mut state = quiet_state();
        let id = state.next_entity_id();
        state.missiles.push(Missile {
            id,
            pos: Vec2::new(100.0, 1.0),
            speed: MISSILE_SPEED,
            damage: MISSILE_DAMAGE,
            target: None,
        });
        advance(&mut state);
        assert!(state.missiles.is_empty());
    }

    #[test]
    fn test_enemy_fires_on_interval() {
        let mut state = quiet_state();
        spawn::spawn_enemy_at(&mut state, Vec2::new(100.0, 0.0));
        state.enemies[0].speed = 0.0;

        for _ in 0..ENEMY_FIRE_INTERVAL {
            advance(&mut state);
        }
        assert!(state.enemy_bullets.is_empty());

        advance(&mut state);
        assert_eq!(state.enemy_bullets.len(), 1);
        assert_eq!(state.enemies[0].shoot_timer, 0);
        let b = &state.enemy_bullets[0];
        assert_eq!(b.vel, Vec2::new(0.0, ENEMY_BULLET_SPEED));
        // Fired from the bottom center, then moved once in the same step
        assert_eq!(b.pos, Vec2::new(115.0, 30.0 + ENEMY_BULLET_SPEED));
    }

    #[test]
    fn test_enemy_culled_below_viewport() {
        let mut state = quiet_state();
        spawn::spawn_enemy_at(&mut state, Vec2::new(100.0, VIEWPORT_HEIGHT - 1.0));
        advance(&mut state);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_boss_patrol_reverses_at_edges() {
        let mut state = quiet_state();
        spawn::spawn_boss(&mut state);
        {
            let boss = state.boss.as_mut().unwrap();
            boss.pos.x = VIEWPORT_WIDTH - BOSS_WIDTH - 1.0;
        }
        advance(&mut state);
        let boss = state.boss.as_ref().unwrap();
        assert_eq!(boss.dir, -1.0);
        let x = boss.pos.x;

        advance(&mut state);
        assert_eq!(state.boss.as_ref().unwrap().pos.x, x - BOSS_SPEED);

        state.boss.as_mut().unwrap().pos.x = 1.0;
        advance(&mut state);
        assert_eq!(state.boss.as_ref().unwrap().dir, 1.0);
    }

    #[test]
    fn test_boss_fires_five_way_spread() {
        let mut state = quiet_state();
        spawn::spawn_boss(&mut state);
        for _ in 0..=BOSS_FIRE_INTERVAL {
            advance(&mut state);
        }
        assert_eq!(state.enemy_bullets.len(), BOSS_SPREAD_DEGREES.len());

        let center = &state.enemy_bullets[2];
        assert!(center.vel.x.abs() < 1e-6);
        assert!((center.vel.y - ENEMY_BULLET_SPEED).abs() < 1e-6);
        assert!(state.enemy_bullets[0].vel.x < 0.0);
        assert!(state.enemy_bullets[4].vel.x > 0.0);
    }

    #[test]
    fn test_spread_velocity_magnitude() {
        for degrees in BOSS_SPREAD_DEGREES {
            let v = spread_velocity(degrees);
            assert!((v.length() - ENEMY_BULLET_SPEED).abs() < 1e-4);
            assert!(v.y > 0.0);
        }
    }

    #[test]
    fn test_pickups_fall_and_cull() {
        let mut state = quiet_state();
        spawn::spawn_power_up(&mut state, Vec2::new(10.0, 100.0));
        spawn::spawn_shield(&mut state, Vec2::new(50.0, VIEWPORT_HEIGHT - 1.0));
        advance(&mut state);
        assert_eq!(state.power_ups[0].pos.y, 100.0 + PICKUP_SPEED);
        assert!(state.shields.is_empty());
    }
}
