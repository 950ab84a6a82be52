//! Ray trace для прицеливания (headless)
//!
//! Slab-тест луча против axis-aligned box'ов grabbable-объектов.
//! Полный physics pipeline здесь не нужен: трейсу достаточно
//! TraceCollider AABB'ов, ориентация объекта игнорируется.

use bevy::prelude::*;

/// Результат трейса
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Задетый entity
    pub entity: Entity,
    /// Дистанция от origin вдоль луча (метры)
    pub distance: f32,
    /// Точка попадания (world)
    pub position: Vec3,
    /// Нормаль поверхности в точке попадания
    pub normal: Vec3,
}

/// Луч против одного AABB (slab method)
///
/// Возвращает (дистанция, нормаль). Origin внутри box'а считается
/// попаданием на нулевой дистанции. direction ожидается normalized.
pub fn ray_aabb(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    center: Vec3,
    half_extents: Vec3,
) -> Option<(f32, Vec3)> {
    let inv_dir = direction.recip();
    let to_min = (center - half_extents - origin) * inv_dir;
    let to_max = (center + half_extents - origin) * inv_dir;

    let slab_min = to_min.min(to_max);
    let slab_max = to_min.max(to_max);

    let t_near = slab_min.max_element();
    let t_far = slab_max.min_element();

    if t_near > t_far || t_far < 0.0 || t_near > max_distance {
        return None;
    }

    let distance = t_near.max(0.0);

    // Нормаль — ось давшая t_near; origin внутри box'а → против луча
    let normal = if t_near <= 0.0 {
        -direction
    } else if (t_near - slab_min.x).abs() < 1e-6 {
        Vec3::new(-direction.x.signum(), 0.0, 0.0)
    } else if (t_near - slab_min.y).abs() < 1e-6 {
        Vec3::new(0.0, -direction.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, -direction.z.signum())
    };

    Some((distance, normal))
}

/// Ближайшее попадание по набору (entity, center, half_extents)
pub fn closest_hit(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    targets: impl IntoIterator<Item = (Entity, Vec3, Vec3)>,
) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;

    for (entity, center, half_extents) in targets {
        let Some((distance, normal)) = ray_aabb(origin, direction, max_distance, center, half_extents)
        else {
            continue;
        };

        if best.map(|hit| distance < hit.distance).unwrap_or(true) {
            best = Some(RayHit {
                entity,
                distance,
                position: origin + direction * distance,
                normal,
            });
        }
    }

    best
}
