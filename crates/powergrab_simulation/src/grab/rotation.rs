//! Чистая математика поворотов для grab-механики
//!
//! Euler-углы везде в градусах, Vec3 = (pitch, yaw, roll).
//! Интерполяция покомпонентная линейная по осям,
//! кватернионы — только на границе с Transform.

use bevy::prelude::*;

/// Округлить каждую ось Euler-поворота к ближайшему кратному interval
///
/// interval <= 0 возвращает вход без изменений.
pub fn closest_angle_interval(euler_degrees: Vec3, interval: f32) -> Vec3 {
    if interval <= 0.0 {
        return euler_degrees;
    }

    Vec3::new(
        (euler_degrees.x / interval).round() * interval,
        (euler_degrees.y / interval).round() * interval,
        (euler_degrees.z / interval).round() * interval,
    )
}

/// Покомпонентный линейный lerp Euler-углов, t ожидается в [0, 1]
pub fn lerp_euler(start: Vec3, target: Vec3, t: f32) -> Vec3 {
    start.lerp(target, t)
}

/// Euler градусы (pitch, yaw, roll) → кватернион для Transform
pub fn euler_to_quat(euler_degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        euler_degrees.y.to_radians(), // yaw
        euler_degrees.x.to_radians(), // pitch
        euler_degrees.z.to_radians(), // roll
    )
}

/// Кватернион → Euler градусы (pitch, yaw, roll)
pub fn quat_to_euler_degrees(rotation: Quat) -> Vec3 {
    let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
}
