//! Physics handle — constraint между игроком и захваченным объектом
//!
//! API повторяет поверхность engine-side physics handle:
//! grab / release / set_target_location / set_target_rotation.
//! В embedded режиме tactical layer читает HandleTarget и решает joint
//! своим солвером; headless режим применяет target напрямую в Transform
//! (apply_handle_targets).

use bevy::prelude::*;

use crate::components::Grabbable;
use crate::grab::{rotation, GrabConfig, GrabSet};

/// Target физического constraint'а
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct HandleTarget {
    /// Захваченное тело
    pub body: Entity,
    /// Целевая позиция (world, метры)
    pub position: Vec3,
    /// Целевой поворот (Euler градусы: pitch, yaw, roll)
    pub rotation: Vec3,
}

/// Physics handle компонент на player entity
///
/// target == None ⇔ ничего не захвачено.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicsHandle {
    pub target: Option<HandleTarget>,
}

impl PhysicsHandle {
    /// Прицепить handle к телу на его текущей позиции/повороте
    pub fn grab(&mut self, body: Entity, position: Vec3, rotation: Vec3) {
        self.target = Some(HandleTarget {
            body,
            position,
            rotation,
        });
    }

    /// Отцепить handle (никакая ссылка не переживает release)
    pub fn release(&mut self) {
        self.target = None;
    }

    pub fn is_grabbing(&self) -> bool {
        self.target.is_some()
    }

    pub fn held_body(&self) -> Option<Entity> {
        self.target.map(|target| target.body)
    }

    pub fn set_target_location(&mut self, position: Vec3) {
        if let Some(target) = self.target.as_mut() {
            target.position = position;
        }
    }

    pub fn set_target_rotation(&mut self, rotation: Vec3) {
        if let Some(target) = self.target.as_mut() {
            target.rotation = rotation;
        }
    }

    /// Добавить Euler-дельту к целевому повороту
    pub fn add_target_rotation(&mut self, delta: Vec3) {
        if let Some(target) = self.target.as_mut() {
            target.rotation += delta;
        }
    }

    pub fn target_rotation(&self) -> Option<Vec3> {
        self.target.map(|target| target.rotation)
    }
}

/// System: headless применение handle target к Transform тела
///
/// Позиция — экспоненциальное подтягивание (стаб вместо joint-солвера),
/// поворот — напрямую из Euler target.
pub fn apply_handle_targets(
    players: Query<&PhysicsHandle>,
    mut bodies: Query<&mut Transform, With<Grabbable>>,
    config: Res<GrabConfig>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for handle in players.iter() {
        let Some(target) = handle.target else {
            continue;
        };
        let Ok(mut transform) = bodies.get_mut(target.body) else {
            continue;
        };

        let alpha = (config.pull_speed * delta).min(1.0);
        transform.translation = transform.translation.lerp(target.position, alpha);
        transform.rotation = rotation::euler_to_quat(target.rotation);
    }
}

/// Plugin: headless handle backend
///
/// Запускается после grab-систем того же tick'а, чтобы применять
/// уже обновлённые targets.
pub struct PhysicsHandlePlugin;

impl Plugin for PhysicsHandlePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, apply_handle_targets.after(GrabSet));
    }
}
