//! Collision detection and resolution
//!
//! Everything is axis-aligned. Projectiles are treated as points at their
//! position and tested against hostile boxes with strict inequalities;
//! pickups are box-vs-box against the player.
//!
//! Rules run in a fixed order each tick and remove entities as soon as they
//! are consumed or destroyed, so a projectile hits at most one target and a
//! destroyed hostile is never matched again in the same pass.

use glam::Vec2;

use super::spawn;
use super::state::{Boss, Enemy, EntityId, GameEvent, GamePhase, GameState, Weapon};
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from a top-left corner and a size
    #[inline]
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Point strictly inside (points on an edge miss)
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Boxes overlap with positive area (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Anything with a position and a bounding box
pub trait Body {
    /// Top-left corner
    fn pos(&self) -> Vec2;
    fn size(&self) -> Vec2;

    #[inline]
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos(), self.size())
    }

    #[inline]
    fn center(&self) -> Vec2 {
        self.pos() + self.size() * 0.5
    }
}

/// A player-fired projectile
pub trait Projectile: Body {
    fn damage(&self) -> i64;

    /// The point used for hit testing
    #[inline]
    fn hit_point(&self) -> Vec2 {
        self.pos()
    }
}

/// Something the player shoots at
pub trait Hostile: Body {
    fn id(&self) -> EntityId;
    fn hp(&self) -> i64;
    fn take_damage(&mut self, amount: i64);

    #[inline]
    fn is_destroyed(&self) -> bool {
        self.hp() <= 0
    }
}

/// An enemy removed by a projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub id: EntityId,
    pub pos: Vec2,
}

/// Run every collision rule once, in order.
///
/// Stops early if the player dies: nothing else resolves on a lost frame.
pub fn resolve_collisions(state: &mut GameState) {
    let kills = strike_enemies(&mut state.bullets, &mut state.enemies);
    award_kills(state, &kills, Weapon::Bullet, SCORE_BULLET_KILL);
    if let Some(id) = strike_boss(&mut state.bullets, &mut state.boss) {
        award_boss(state, id, Weapon::Bullet);
    }

    let kills = strike_enemies(&mut state.missiles, &mut state.enemies);
    award_kills(state, &kills, Weapon::Missile, SCORE_MISSILE_KILL);
    if let Some(id) = strike_boss(&mut state.missiles, &mut state.boss) {
        award_boss(state, id, Weapon::Missile);
    }

    if enemy_bullets_vs_player(state) {
        return;
    }

    collect_power_ups(state);
    collect_shields(state);
}

/// Each projectile hits the first enemy containing its point, if any.
///
/// The projectile is consumed on hit; an enemy whose hp drops to zero or
/// below is removed immediately.
pub fn strike_enemies<P: Projectile>(projectiles: &mut Vec<P>, enemies: &mut Vec<Enemy>) -> Vec<Kill> {
    let mut kills = Vec::new();
    let mut i = 0;
    while i < projectiles.len() {
        let point = projectiles[i].hit_point();
        let Some(ei) = enemies.iter().position(|e| e.bounds().contains_point(point)) else {
            i += 1;
            continue;
        };

        let projectile = projectiles.remove(i);
        let enemy = &mut enemies[ei];
        enemy.take_damage(projectile.damage());
        if enemy.is_destroyed() {
            let enemy = enemies.remove(ei);
            kills.push(Kill {
                id: enemy.id,
                pos: enemy.pos,
            });
        }
    }
    kills
}

/// Projectiles against the boss slot. Returns the boss id if it was destroyed.
pub fn strike_boss<P: Projectile>(projectiles: &mut Vec<P>, boss: &mut Option<Boss>) -> Option<EntityId> {
    let target = boss.as_mut()?;
    let bounds = target.bounds();

    let mut destroyed = false;
    let mut i = 0;
    while i < projectiles.len() {
        if !bounds.contains_point(projectiles[i].hit_point()) {
            i += 1;
            continue;
        }
        let projectile = projectiles.remove(i);
        target.take_damage(projectile.damage());
        if target.is_destroyed() {
            destroyed = true;
            break;
        }
    }

    if destroyed {
        boss.take().map(|b| b.id)
    } else {
        None
    }
}

fn award_kills(state: &mut GameState, kills: &[Kill], by: Weapon, points: u64) {
    for kill in kills {
        state.score += points;
        state.events.push(GameEvent::EnemyDestroyed {
            id: kill.id,
            by,
            pos: kill.pos,
        });
        log::debug!("Enemy {} destroyed by {:?} (score {})", kill.id, by, state.score);
        spawn::roll_kill_drops(state, kill.pos);
    }
}

fn award_boss(state: &mut GameState, id: EntityId, by: Weapon) {
    state.score += SCORE_BOSS_KILL;
    state.events.push(GameEvent::BossDestroyed { id, by });
    log::info!("Boss {} destroyed by {:?} (score {})", id, by, state.score);
}

/// Returns true if the player died this tick
fn enemy_bullets_vs_player(state: &mut GameState) -> bool {
    let bounds = state.player.bounds();
    let mut i = 0;
    while i < state.enemy_bullets.len() {
        if !bounds.contains_point(state.enemy_bullets[i].pos) {
            i += 1;
            continue;
        }

        if state.player.shield {
            state.player.shield = false;
            state.enemy_bullets.remove(i);
            state.events.push(GameEvent::ShieldBroken);
            log::debug!("Shield absorbed a hit");
            continue;
        }

        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over at tick {} with score {}", state.time_ticks, state.score);
        return true;
    }
    false
}

fn collect_power_ups(state: &mut GameState) {
    let bounds = state.player.bounds();
    let before = state.power_ups.len();
    state.power_ups.retain(|p| !bounds.overlaps(&p.bounds()));

    for _ in state.power_ups.len()..before {
        state.player.power_up();
        state.events.push(GameEvent::PowerUpCollected {
            power: state.player.power,
            damage: state.player.damage,
        });
        log::debug!(
            "Power-up collected: power {} damage {}",
            state.player.power,
            state.player.damage
        );
    }
}

fn collect_shields(state: &mut GameState) {
    let bounds = state.player.bounds();
    let before = state.shields.len();
    state.shields.retain(|s| !bounds.overlaps(&s.bounds()));

    if state.shields.len() < before {
        state.player.shield = true;
        state.events.push(GameEvent::ShieldCollected);
        log::debug!("Shield collected");
    }
}
