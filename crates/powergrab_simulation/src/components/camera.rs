//! Camera rig + holder anchor компоненты
//!
//! Tactical layer (рендер) владеет настоящей камерой; здесь — gameplay-состояние:
//! откуда стреляет grab-трейс и куда подтягивается захваченный объект.

use bevy::prelude::*;

/// Camera rig игрока (yaw/pitch в градусах)
///
/// Даёт origin и направление для grab-трейса, а также базис движения
/// (forward/right считаются только из yaw — стандартное third-person перемещение).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    /// Поворот вокруг вертикали (градусы)
    pub yaw: f32,
    /// Наклон камеры (градусы), clamped в apply_look
    pub pitch: f32,
    /// Смещение глаза от origin entity (метры)
    pub eye_offset: Vec3,
    /// Чувствительность look input (градусы на единицу input)
    pub sensitivity: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            eye_offset: Vec3::new(0.0, 1.6, 0.0), // уровень глаз
            sensitivity: 1.0,
        }
    }
}

impl CameraRig {
    /// Максимальный наклон камеры (градусы)
    pub const PITCH_LIMIT: f32 = 89.0;

    /// Ориентация камеры как кватернион (yaw → pitch, roll = 0)
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        )
    }

    /// Направление взгляда (Bevy convention: forward = -Z)
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Позиция глаза в мире
    pub fn eye_position(&self, transform: &Transform) -> Vec3 {
        transform.translation + self.eye_offset
    }

    /// Применить look input к камере (yaw/pitch, pitch clamped)
    pub fn apply_look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.sensitivity;
        self.pitch = (self.pitch - delta.y * self.sensitivity)
            .clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Базис движения из yaw (горизонтальные forward/right)
    pub fn yaw_basis(&self) -> (Vec3, Vec3) {
        let yaw = Quat::from_rotation_y(self.yaw.to_radians());
        (yaw * Vec3::NEG_Z, yaw * Vec3::X)
    }
}

/// Holder anchor — точка в camera space, которую трекает target захваченного объекта
///
/// Каждый fixed tick, пока что-то захвачено, target location физического
/// handle выставляется в world-позицию этой точки.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HolderAnchor {
    /// Смещение от глаза в camera space (метры)
    pub offset: Vec3,
}

impl Default for HolderAnchor {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 0.0, -2.5), // 2.5m перед камерой
        }
    }
}

impl HolderAnchor {
    /// World-позиция якоря для текущей ориентации камеры
    pub fn world_position(&self, eye: Vec3, rig: &CameraRig) -> Vec3 {
        eye + rig.rotation() * self.offset
    }
}
