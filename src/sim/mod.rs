//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no timers of its own (wall clock arrives via input)
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ties by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod targeting;
pub mod tick;

pub use collision::{Aabb, Body, Hostile, Projectile, resolve_collisions};
pub use snapshot::Snapshot;
pub use state::{
    Boss, Bullet, Enemy, EnemyBullet, EntityId, GameEvent, GamePhase, GameState, Laser, Missile,
    Player, PowerUp, Shield, SpawnTable, Viewport, Weapon,
};
pub use targeting::{TargetRef, find_closest_enemy};
pub use tick::{TickInput, tick};
