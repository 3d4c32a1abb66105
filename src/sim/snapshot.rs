//! Read-only view of the world for the renderer
//!
//! Borrowed straight from [`GameState`]; building one copies nothing.

use serde::Serialize;

use super::state::{
    Boss, Bullet, Enemy, EnemyBullet, GameEvent, GamePhase, GameState, Missile, Player, PowerUp,
    Shield, Viewport,
};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub tick: u64,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub score: u64,
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub missiles: &'a [Missile],
    pub enemies: &'a [Enemy],
    pub boss: Option<&'a Boss>,
    pub enemy_bullets: &'a [EnemyBullet],
    pub power_ups: &'a [PowerUp],
    pub shields: &'a [Shield],
    pub events: &'a [GameEvent],
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            tick: self.time_ticks,
            viewport: self.viewport,
            phase: self.phase,
            score: self.score,
            player: &self.player,
            bullets: &self.bullets,
            missiles: &self.missiles,
            enemies: &self.enemies,
            boss: self.boss.as_ref(),
            enemy_bullets: &self.enemy_bullets,
            power_ups: &self.power_ups,
            shields: &self.shields,
            events: &self.events,
        }
    }
}

impl Snapshot<'_> {
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Serialize as a single JSON line
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
