//! Rapier collision groups — centralised constants для всего проекта
//!
//! Membership (на каком слое объект) + filter (с чем коллайдит).
//! Headless симуляция их не использует; tactical layer поднимает
//! полноценный rapier pipeline с этими же группами.

use bevy_rapier3d::prelude::*;

/// Персонажи (kinematic capsule)
pub const GROUP_ACTOR: Group = Group::GROUP_1;

/// Grabbable-объекты (dynamic cuboid)
pub const GROUP_GRABBABLE: Group = Group::GROUP_2;

/// Статичная геометрия уровня
pub const GROUP_WORLD: Group = Group::GROUP_3;

/// Groups для персонажа: коллайдит со всем
pub fn actor_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_ACTOR, GROUP_ACTOR | GROUP_GRABBABLE | GROUP_WORLD)
}

/// Groups для grabbable: коллайдит с миром и персонажами
pub fn grabbable_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_GRABBABLE, GROUP_ACTOR | GROUP_GRABBABLE | GROUP_WORLD)
}
