//! Nearest-hostile search for homing missiles
//!
//! Missiles hold a [`TargetRef`] (an id, never a reference) and re-resolve it
//! every tick. A link is only kept while the entity it names is still present
//! with hp above zero; otherwise the missile searches again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Hostile};
use super::state::{Boss, Enemy, EntityId};

/// Non-owning link to a hostile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    Enemy(EntityId),
    Boss(EntityId),
}

impl TargetRef {
    pub fn id(&self) -> EntityId {
        match *self {
            TargetRef::Enemy(id) | TargetRef::Boss(id) => id,
        }
    }
}

/// Every live hostile as one pool: enemies in order, then the boss
fn hostile_pool<'a>(
    enemies: &'a [Enemy],
    boss: Option<&'a Boss>,
) -> impl Iterator<Item = (TargetRef, Vec2)> + 'a {
    enemies
        .iter()
        .filter(|e| !e.is_destroyed())
        .map(|e| (TargetRef::Enemy(e.id), e.pos))
        .chain(
            boss.filter(|b| !b.is_destroyed())
                .map(|b| (TargetRef::Boss(b.id), b.pos)),
        )
}

/// Closest hostile to `from`, measured to each hostile's top-left corner.
///
/// Equidistant candidates resolve to the lowest entity id.
pub fn find_closest_enemy(enemies: &[Enemy], boss: Option<&Boss>, from: Vec2) -> Option<TargetRef> {
    hostile_pool(enemies, boss)
        .map(|(target, pos)| (target, pos.distance_squared(from)))
        .min_by(|(ta, da), (tb, db)| {
            da.partial_cmp(db)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| ta.id().cmp(&tb.id()))
        })
        .map(|(target, _)| target)
}

/// Center of the hostile `target` names, if it is still alive
pub fn resolve(target: TargetRef, enemies: &[Enemy], boss: Option<&Boss>) -> Option<Vec2> {
    match target {
        TargetRef::Enemy(id) => enemies
            .iter()
            .find(|e| e.id == id && !e.is_destroyed())
            .map(|e| e.center()),
        TargetRef::Boss(id) => boss
            .filter(|b| b.id == id && !b.is_destroyed())
            .map(|b| b.center()),
    }
}

/// Keep `current` if it still resolves, otherwise pick the nearest hostile.
///
/// Returns the link to store and the point to steer toward.
pub fn retarget(
    current: Option<TargetRef>,
    from: Vec2,
    enemies: &[Enemy],
    boss: Option<&Boss>,
) -> Option<(TargetRef, Vec2)> {
    if let Some(target) = current {
        if let Some(center) = resolve(target, enemies, boss) {
            return Some((target, center));
        }
    }

    let target = find_closest_enemy(enemies, boss, from)?;
    let center = resolve(target, enemies, boss)?;
    Some((target, center))
}
