//! Invariants that must hold for any input sequence

use barrage::consts::*;
use barrage::sim::{GamePhase, GameState, SpawnTable, TickInput, Viewport, spawn, tick};
use glam::Vec2;
use proptest::prelude::*;

fn arb_input() -> impl Strategy<Value = (bool, bool, bool, u64)> {
    (any::<bool>(), any::<bool>(), any::<bool>(), 0u64..120)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn world_invariants_hold(
        seed in any::<u64>(),
        steps in prop::collection::vec(arb_input(), 1..400),
    ) {
        let mut state = GameState::new(seed, Viewport::default());
        // Busier than default so fights actually happen
        state.spawn_table = SpawnTable {
            enemy_chance: 0.2,
            powerup_drop_chance: 0.5,
            shield_drop_chance: 0.5,
        };
        // Start past the threshold so the boss is in play
        state.score = BOSS_SCORE_THRESHOLD + 1;

        let mut now_ms = 0u64;
        let mut last_power = 0;
        let mut last_score = state.score;

        for (left, right, fire, dt) in steps {
            now_ms += dt;
            let was_over = state.phase == GamePhase::GameOver;
            let before = state.clone();

            tick(&mut state, &TickInput { left, right, fire, now_ms, ..Default::default() });

            prop_assert!(state.enemies.iter().all(|e| e.hp > 0));
            prop_assert!(state.boss.as_ref().is_none_or(|b| b.hp > 0));
            prop_assert!(state.player.power >= last_power);
            prop_assert!(state.score >= last_score);
            prop_assert!(state.player.pos.x >= 0.0);
            prop_assert!(state.player.pos.x <= state.viewport.width - state.player.size.x);

            if was_over {
                // Frozen: nothing moves until reset
                prop_assert_eq!(state.time_ticks, before.time_ticks);
                prop_assert_eq!(&state.enemies, &before.enemies);
                prop_assert_eq!(&state.player, &before.player);
            }

            last_power = state.player.power;
            last_score = state.score;
        }
    }

    #[test]
    fn power_damage_schedule(pickups in 0u32..40) {
        let mut state = GameState::new(1, Viewport::default());
        state.spawn_table = SpawnTable::silent();
        let pos = state.player.pos;
        for _ in 0..pickups {
            spawn::spawn_power_up(&mut state, pos);
        }
        tick(&mut state, &TickInput::default());

        let expected = if pickups < POWER_SURGE_LEVEL {
            PLAYER_BASE_DAMAGE
        } else {
            let doublings = pickups - POWER_SURGE_LEVEL;
            (PLAYER_BASE_DAMAGE * POWER_SURGE_MULTIPLIER)
                .saturating_mul(POWER_OVERDRIVE_MULTIPLIER.saturating_pow(doublings))
        };
        prop_assert_eq!(state.player.power, pickups);
        prop_assert_eq!(state.player.damage, expected);
    }

    #[test]
    fn nearest_target_is_really_nearest(
        points in prop::collection::vec((0.0f32..800.0, 0.0f32..600.0), 1..20),
        from in (0.0f32..800.0, 0.0f32..600.0),
    ) {
        let mut state = GameState::new(3, Viewport::default());
        for &(x, y) in &points {
            spawn::spawn_enemy_at(&mut state, Vec2::new(x, y));
        }
        let from = Vec2::new(from.0, from.1);

        let found = barrage::sim::find_closest_enemy(&state.enemies, None, from).unwrap();
        let chosen = state.enemies.iter().find(|e| e.id == found.id()).unwrap();
        let best = chosen.pos.distance_squared(from);
        prop_assert!(state.enemies.iter().all(|e| e.pos.distance_squared(from) >= best));
    }
}

#[test]
fn reset_restores_defaults() {
    let mut state = GameState::new(8, Viewport::default());
    for i in 0..2_000u64 {
        tick(
            &mut state,
            &TickInput {
                autopilot: true,
                now_ms: i * 16,
                ..Default::default()
            },
        );
    }

    state.reset();

    let fresh = GameState::new(8, Viewport::default());
    assert_eq!(state.phase, GamePhase::Active);
    assert_eq!(state.score, 0);
    assert_eq!(state.entity_count(), 0);
    assert_eq!(state.player, fresh.player);
    assert_eq!(state.time_ticks, 0);
}
