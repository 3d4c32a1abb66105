//! Entity spawning
//!
//! Pure insertions into the world. Enemies arrive stochastically, the boss
//! arrives on a score threshold, and pickups drop where enemies die.

use glam::Vec2;
use rand::Rng;

use super::state::{Boss, Enemy, EntityId, GameEvent, GameState, PowerUp, Shield};
use crate::consts::*;

/// Per-tick spawn roll: maybe an enemy, and the boss once score allows it
pub fn spawn_wave(state: &mut GameState) {
    if state.rng.random::<f32>() < state.spawn_table.enemy_chance {
        spawn_enemy(state);
    }

    if state.score > BOSS_SCORE_THRESHOLD && state.boss.is_none() {
        spawn_boss(state);
    }
}

/// Enemy at a random column just above the viewport
pub fn spawn_enemy(state: &mut GameState) -> EntityId {
    let span = (state.viewport.width - ENEMY_SIZE).max(0.0);
    let x = state.rng.random::<f32>() * span;
    spawn_enemy_at(state, Vec2::new(x, ENEMY_SPAWN_Y))
}

/// Enemy with default stats at a fixed position
pub fn spawn_enemy_at(state: &mut GameState, pos: Vec2) -> EntityId {
    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        size: Vec2::splat(ENEMY_SIZE),
        speed: ENEMY_SPEED,
        hp: ENEMY_HP,
        shoot_timer: 0,
    });
    id
}

/// Place the boss at the top center.
///
/// The caller must ensure the boss slot is empty.
pub fn spawn_boss(state: &mut GameState) -> EntityId {
    debug_assert!(state.boss.is_none(), "boss slot already occupied");

    let id = state.next_entity_id();
    state.boss = Some(Boss {
        id,
        pos: Vec2::new(state.viewport.width / 2.0 - BOSS_WIDTH / 2.0, BOSS_Y),
        size: Vec2::new(BOSS_WIDTH, BOSS_HEIGHT),
        hp: BOSS_HP,
        shoot_timer: 0,
        dir: 1.0,
    });
    state.events.push(GameEvent::BossSpawned { id });
    log::info!("Boss {} spawned at score {}", id, state.score);
    id
}

pub fn spawn_power_up(state: &mut GameState, pos: Vec2) -> EntityId {
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        pos,
        size: Vec2::splat(POWERUP_SIZE),
        speed: PICKUP_SPEED,
    });
    id
}

pub fn spawn_shield(state: &mut GameState, pos: Vec2) -> EntityId {
    let id = state.next_entity_id();
    state.shields.push(Shield {
        id,
        pos,
        size: Vec2::splat(SHIELD_SIZE),
        speed: PICKUP_SPEED,
    });
    id
}

/// Drop rolls after an enemy dies at `pos`.
///
/// The shield roll only happens while a boss is on screen.
pub fn roll_kill_drops(state: &mut GameState, pos: Vec2) {
    if state.rng.random::<f32>() < state.spawn_table.powerup_drop_chance {
        spawn_power_up(state, pos);
        state.events.push(GameEvent::PowerUpDropped { pos });
    }
    if state.boss.is_some() && state.rng.random::<f32>() < state.spawn_table.shield_drop_chance {
        spawn_shield(state, pos);
        state.events.push(GameEvent::ShieldDropped { pos });
    }
}
