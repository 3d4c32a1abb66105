//! Game state and core simulation types
//!
//! Every entity is plain data. The only link between entities is a missile's
//! [`TargetRef`], which names its target by id and is re-resolved each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Body, Hostile, Projectile};
use super::targeting::TargetRef;
use crate::consts::*;

/// Stable per-session entity identifier
pub type EntityId = u32;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// World advances every tick
    Active,
    /// Player was hit without a shield; world is frozen until reset
    GameOver,
}

/// Which projectile kind landed a kill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weapon {
    Bullet,
    Missile,
}

/// Things that happened during the last tick, for audio/visual collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    VolleyFired { bullets: usize, missiles: usize },
    EnemyDestroyed { id: EntityId, by: Weapon, pos: Vec2 },
    BossSpawned { id: EntityId },
    BossDestroyed { id: EntityId, by: Weapon },
    PowerUpDropped { pos: Vec2 },
    ShieldDropped { pos: Vec2 },
    PowerUpCollected { power: u32, damage: i64 },
    ShieldCollected,
    ShieldBroken,
    GameOver { score: u64 },
    Reset,
}

/// Visible playfield; entities leaving it are culled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        debug_assert!(width > ENEMY_SIZE && height > 0.0, "viewport too small");
        Self { width, height }
    }

    /// True when a point lies on or inside every edge
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

/// Spawn and drop probabilities, copied from the constants at construction.
///
/// Kept on the state so a scenario can pin them to 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTable {
    pub enemy_chance: f32,
    pub powerup_drop_chance: f32,
    pub shield_drop_chance: f32,
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self {
            enemy_chance: ENEMY_SPAWN_CHANCE,
            powerup_drop_chance: POWERUP_DROP_CHANCE,
            shield_drop_chance: SHIELD_DROP_CHANCE,
        }
    }
}

impl SpawnTable {
    /// No random spawns or drops at all
    pub fn silent() -> Self {
        Self {
            enemy_chance: 0.0,
            powerup_drop_chance: 0.0,
            shield_drop_chance: 0.0,
        }
    }
}

/// Laser sub-state. Carried on the player but not driven yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Laser {
    pub active: bool,
    pub cooldown: u32,
    pub duration: u32,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Number of power-ups collected this session (never decreases)
    pub power: u32,
    pub damage: i64,
    pub shield: bool,
    #[serde(default)]
    pub laser: Laser,
}

impl Player {
    /// Fresh ship at the default spawn point for `viewport`
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            pos: Vec2::new(viewport.width / 2.0, viewport.height - PLAYER_BOTTOM_OFFSET),
            size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_SPEED,
            power: 0,
            damage: PLAYER_BASE_DAMAGE,
            shield: false,
            laser: Laser::default(),
        }
    }

    /// Apply one power-up pickup.
    ///
    /// Reaching the surge level multiplies damage once; every pickup at or
    /// past the overdrive level multiplies it again.
    pub fn power_up(&mut self) {
        self.power += 1;
        if self.power == POWER_SURGE_LEVEL {
            self.damage = self.damage.saturating_mul(POWER_SURGE_MULTIPLIER);
        } else if self.power >= POWER_OVERDRIVE_LEVEL {
            self.damage = self.damage.saturating_mul(POWER_OVERDRIVE_MULTIPLIER);
        }
    }
}

/// A player bullet (flies straight up)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub pos: Vec2,
    pub damage: i64,
}

/// A homing missile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    pub id: EntityId,
    pub pos: Vec2,
    pub speed: f32,
    pub damage: i64,
    /// Non-owning link to the current target; validated every tick
    pub target: Option<TargetRef>,
}

/// A regular enemy ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub hp: i64,
    pub shoot_timer: u32,
}

/// The boss. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: i64,
    pub shoot_timer: u32,
    /// Patrol direction, +1 (right) or -1 (left)
    pub dir: f32,
}

/// A bullet fired by an enemy or the boss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Falling power-up pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

/// Falling shield pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

macro_rules! sized_body {
    ($($ty:ty),* $(,)?) => {
        $(impl Body for $ty {
            #[inline]
            fn pos(&self) -> Vec2 {
                self.pos
            }
            #[inline]
            fn size(&self) -> Vec2 {
                self.size
            }
        })*
    };
}

// Projectiles have a drawn size but are hit-tested as points
macro_rules! fixed_body {
    ($($ty:ty => ($w:expr, $h:expr)),* $(,)?) => {
        $(impl Body for $ty {
            #[inline]
            fn pos(&self) -> Vec2 {
                self.pos
            }
            #[inline]
            fn size(&self) -> Vec2 {
                Vec2::new($w, $h)
            }
        })*
    };
}

sized_body!(Player, Enemy, Boss, PowerUp, Shield);

fixed_body! {
    Bullet => (BULLET_WIDTH, BULLET_HEIGHT),
    Missile => (MISSILE_WIDTH, MISSILE_HEIGHT),
    EnemyBullet => (ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT),
}

impl Projectile for Bullet {
    #[inline]
    fn damage(&self) -> i64 {
        self.damage
    }
}

impl Projectile for Missile {
    #[inline]
    fn damage(&self) -> i64 {
        self.damage
    }
}

impl Hostile for Enemy {
    #[inline]
    fn id(&self) -> EntityId {
        self.id
    }
    #[inline]
    fn hp(&self) -> i64 {
        self.hp
    }
    #[inline]
    fn take_damage(&mut self, amount: i64) {
        self.hp = self.hp.saturating_sub(amount);
    }
}

impl Hostile for Boss {
    #[inline]
    fn id(&self) -> EntityId {
        self.id
    }
    #[inline]
    fn hp(&self) -> i64 {
        self.hp
    }
    #[inline]
    fn take_damage(&mut self, amount: i64) {
        self.hp = self.hp.saturating_sub(amount);
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Single source of randomness for spawns and drops
    pub rng: Pcg32,
    pub viewport: Viewport,
    pub spawn_table: SpawnTable,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub missiles: Vec<Missile>,
    pub enemies: Vec<Enemy>,
    /// Boss slot (0 or 1)
    pub boss: Option<Boss>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub power_ups: Vec<PowerUp>,
    pub shields: Vec<Shield>,
    /// Wall-clock time (ms) of the last volley
    pub last_shot_ms: Option<u64>,
    /// Events raised during the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create a new session with the given seed and playfield
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            spawn_table: SpawnTable::default(),
            time_ticks: 0,
            phase: GamePhase::Active,
            score: 0,
            player: Player::new(&viewport),
            bullets: Vec::new(),
            missiles: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            enemy_bullets: Vec::new(),
            power_ups: Vec::new(),
            shields: Vec::new(),
            last_shot_ms: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reinitialize the world to its construction-time defaults.
    ///
    /// The RNG stream and the spawn table carry over; everything else
    /// (score, entities, player, phase, fire timer) starts fresh.
    pub fn reset(&mut self) {
        let mut fresh = Self::new(self.seed, self.viewport);
        fresh.rng = self.rng.clone();
        fresh.spawn_table = self.spawn_table;
        *self = fresh;
        self.events.push(GameEvent::Reset);
        log::info!("Session reset");
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Bounding box of the player
    #[inline]
    pub fn player_bounds(&self) -> Aabb {
        self.player.bounds()
    }

    /// Number of live entities of every kind (player excluded)
    pub fn entity_count(&self) -> usize {
        self.bullets.len()
            + self.missiles.len()
            + self.enemies.len()
            + usize::from(self.boss.is_some())
            + self.enemy_bullets.len()
            + self.power_ups.len()
            + self.shields.len()
    }
}
