//! Barrage - a vertical arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, targeting, collisions, game state)
//! - `settings`: Driver configuration (viewport, seed, cadence)
//!
//! Rendering and raw input capture live outside this crate. The simulation
//! consumes a [`sim::TickInput`] per frame and exposes a [`sim::Snapshot`].

pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
///
/// Balance is fixed; these are the literal values the game ships with.
pub mod consts {
    /// Default playfield size
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance of the player's top edge from the bottom of the viewport
    pub const PLAYER_BOTTOM_OFFSET: f32 = 40.0;
    pub const PLAYER_BASE_DAMAGE: i64 = 10;

    /// Minimum wall-clock gap between volleys (ms)
    pub const FIRE_COOLDOWN_MS: u64 = 200;

    /// Player bullets
    pub const BULLET_SPEED: f32 = 6.0;
    /// Bullets spawn this far above the player's top edge
    pub const BULLET_MUZZLE_OFFSET: f32 = 15.0;
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;

    /// Homing missiles
    pub const MISSILES_PER_VOLLEY: usize = 3;
    pub const MISSILE_SPEED: f32 = 3.0;
    pub const MISSILE_DAMAGE: i64 = 1;
    pub const MISSILE_WIDTH: f32 = 6.0;
    pub const MISSILE_HEIGHT: f32 = 12.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_HP: i64 = 10;
    pub const ENEMY_SPAWN_Y: f32 = -20.0;
    /// Enemy fires once its timer exceeds this many ticks
    pub const ENEMY_FIRE_INTERVAL: u32 = 90;
    pub const ENEMY_SPAWN_CHANCE: f32 = 0.02;

    /// Boss
    pub const BOSS_WIDTH: f32 = 100.0;
    pub const BOSS_HEIGHT: f32 = 60.0;
    pub const BOSS_Y: f32 = 50.0;
    pub const BOSS_HP: i64 = 100_000;
    pub const BOSS_SPEED: f32 = 2.0;
    /// Boss fires once its timer exceeds this many ticks
    pub const BOSS_FIRE_INTERVAL: u32 = 50;
    /// Boss appears once score is strictly above this
    pub const BOSS_SCORE_THRESHOLD: u64 = 100;
    /// Spread angles in degrees, measured from straight down
    pub const BOSS_SPREAD_DEGREES: [f32; 5] = [-40.0, -20.0, 0.0, 20.0, 40.0];

    /// Enemy bullets
    pub const ENEMY_BULLET_SPEED: f32 = 3.0;
    pub const ENEMY_BULLET_WIDTH: f32 = 4.0;
    pub const ENEMY_BULLET_HEIGHT: f32 = 8.0;

    /// Pickups
    pub const POWERUP_SIZE: f32 = 15.0;
    pub const SHIELD_SIZE: f32 = 20.0;
    pub const PICKUP_SPEED: f32 = 2.0;
    pub const POWERUP_DROP_CHANCE: f32 = 0.1;
    /// Only rolled while a boss is on screen
    pub const SHIELD_DROP_CHANCE: f32 = 0.2;

    /// Power level that multiplies damage by `POWER_SURGE_MULTIPLIER` once
    pub const POWER_SURGE_LEVEL: u32 = 3;
    pub const POWER_SURGE_MULTIPLIER: i64 = 10;
    /// Every pickup at or above this level doubles damage again
    pub const POWER_OVERDRIVE_LEVEL: u32 = 4;
    pub const POWER_OVERDRIVE_MULTIPLIER: i64 = 2;

    /// Score awards
    pub const SCORE_BULLET_KILL: u64 = 10;
    pub const SCORE_MISSILE_KILL: u64 = 15;
    pub const SCORE_BOSS_KILL: u64 = 2000;
}
