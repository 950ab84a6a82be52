//! Grabbable компоненты: флаги захвата + визуальный material variant
//!
//! Tactical layer (рендер) читает SurfaceMaterial и подставляет реальный
//! материал на mesh; симуляция только переключает variant.

use bevy::prelude::*;

/// Захватываемый объект
///
/// Инвариант: is_grabbed == true не больше чем у одного объекта на игрока
/// (обеспечивается grab state machine, см. grab::systems).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(SurfaceMaterial, TraceCollider)]
pub struct Grabbable {
    can_grab: bool,
    is_grabbed: bool,
}

impl Default for Grabbable {
    fn default() -> Self {
        Self {
            can_grab: true,
            is_grabbed: false,
        }
    }
}

impl Grabbable {
    /// Разрешён ли захват этого объекта
    pub fn can_grab(&self) -> bool {
        self.can_grab
    }

    pub fn set_can_grab(&mut self, value: bool) {
        self.can_grab = value;
    }

    /// Захвачен ли объект сейчас
    pub fn is_grabbed(&self) -> bool {
        self.is_grabbed
    }

    pub fn set_is_grabbed(&mut self, value: bool) {
        self.is_grabbed = value;
    }
}

/// Визуальный вариант материала grabbable-объекта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum MaterialVariant {
    #[default]
    Default,
    Hover,
    Grabbed,
}

/// Текущий material variant на mesh объекта
///
/// Симуляция переключает variant по hover/grab состоянию;
/// рендер мапит variant → конкретный материал.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct SurfaceMaterial {
    pub variant: MaterialVariant,
}

impl SurfaceMaterial {
    pub fn set(&mut self, variant: MaterialVariant) {
        self.variant = variant;
    }
}

/// AABB для gameplay ray trace (половинные размеры, метры)
///
/// Отдельно от rapier Collider: headless-трейс не гоняет physics pipeline,
/// а axis-aligned box достаточен для прицеливания.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TraceCollider {
    pub half_extents: Vec3,
}

impl Default for TraceCollider {
    fn default() -> Self {
        Self {
            half_extents: Vec3::splat(0.5),
        }
    }
}
