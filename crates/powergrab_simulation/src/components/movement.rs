//! Movement компоненты: кинематический мотор персонажа + input

use bevy::prelude::*;

/// Кинематический мотор персонажа (WASD + gravity)
///
/// Rapier capsule используется tactical layer'ом для коллизий;
/// velocity интегрируем сами (headless режим — напрямую в Transform).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct KinematicMotor {
    /// Скорость движения (m/s)
    pub move_speed: f32,
    /// Сила гравитации (m/s²)
    pub gravity: f32,
    /// Вертикальная velocity прыжка (m/s)
    pub jump_velocity: f32,
    /// Доля управляемости в воздухе [0, 1]
    pub air_control: f32,
    /// На земле ли персонаж (прыжок только с земли)
    pub grounded: bool,
    /// Высота пола (stub ground check: y <= floor_height + eps)
    pub floor_height: f32,
}

impl Default for KinematicMotor {
    fn default() -> Self {
        Self {
            move_speed: 5.0,   // средняя скорость ходьбы
            gravity: -9.81,
            jump_velocity: 7.0,
            air_control: 0.35,
            grounded: false,
            floor_height: 0.0,
        }
    }
}

/// Собственная velocity персонажа (не rapier Velocity)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    pub mass: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: 70.0,
        }
    }
}

/// Направление движения на текущий tick (world space, normalized)
///
/// Заполняется из MoveInput events с учётом camera yaw;
/// для headless тестов — mock input напрямую через этот компонент.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    pub direction: Vec3,
}
