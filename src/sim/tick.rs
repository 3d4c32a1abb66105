//! Frame driver
//!
//! Advances the world exactly once per call, in a fixed order:
//! restart, player intent, spawns, motion, collisions.

use super::collision::{self, Body};
use super::state::{GamePhase, GameState};
use super::{motion, spawn, targeting};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Fire (held); volleys are rate-limited on `now_ms`
    pub fire: bool,
    /// Wall-clock milliseconds supplied by the driver
    pub now_ms: u64,
    /// Reset the session before this tick
    pub restart: bool,
    /// Idle/demo mode - AI flies the ship
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.restart {
        state.reset();
    }

    // World is frozen until reset
    if state.phase == GamePhase::GameOver {
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }

    state.time_ticks += 1;

    motion::steer_player(state, input.left, input.right);
    if input.fire {
        motion::fire(state, input.now_ms);
    }

    spawn::spawn_wave(state);
    motion::advance(state);
    collision::resolve_collisions(state);

    debug_assert!(state.enemies.iter().all(|e| e.hp > 0), "dead enemy survived resolution");
    debug_assert!(state.boss.as_ref().is_none_or(|b| b.hp > 0), "dead boss survived resolution");
}

/// Replace movement/fire intent with a simple demo pilot.
///
/// Lines up under the nearest hostile, sidesteps enemy bullets about to land
/// on the ship, and holds fire.
fn autopilot(state: &GameState, input: &mut TickInput) {
    let player = &state.player;
    let bounds = player.bounds();
    let center_x = bounds.center().x;

    input.fire = true;
    input.left = false;
    input.right = false;

    // Dodge: any bullet falling into our column within the next ~20 ticks
    let threat = state.enemy_bullets.iter().find(|b| {
        let above = bounds.min.y - b.pos.y;
        above > 0.0
            && above < b.vel.y.max(1.0) * 20.0
            && b.pos.x > bounds.min.x - 4.0
            && b.pos.x < bounds.max.x + 4.0
    });
    if let Some(bullet) = threat {
        let room_left = bounds.min.x > player.size.x;
        if bullet.pos.x >= center_x && room_left {
            input.left = true;
        } else {
            input.right = true;
        }
        return;
    }

    let from = bounds.center();
    let Some(target) = targeting::find_closest_enemy(&state.enemies, state.boss.as_ref(), from) else {
        return;
    };
    let Some(aim) = targeting::resolve(target, &state.enemies, state.boss.as_ref()) else {
        return;
    };

    let dx = aim.x - center_x;
    if dx < -player.speed {
        input.left = true;
    } else if dx > player.speed {
        input.right = true;
    }
}
