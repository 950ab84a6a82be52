//! Grab domain — hover, захват, snap rotation
//!
//! Содержит:
//! - GrabConfig (tuning resource)
//! - intent events (GrabActionIntent, RotateModeIntent, RotateObjectIntent)
//! - системы state machine + snap-анимации
//! - чистую математику поворотов (rotation)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod events;
pub mod rotation;
pub mod systems;

pub use events::*;
pub use systems::spawn_grabbable;

/// Tuning-параметры grab-механики
///
/// Serde — чтобы tactical layer мог грузить значения из внешнего
/// конфига без перекомпиляции.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GrabConfig {
    /// Длина grab-трейса из камеры (метры)
    pub trace_length: f32,
    /// Шаг округления snap-поворота (градусы)
    pub snap_interval_degrees: f32,
    /// Длительность snap-анимации после захвата (секунды)
    pub grab_snap_duration: f32,
    /// Длительность интерполяции после explicit rotate (секунды)
    pub rotate_step_duration: f32,
    /// Поворот за единицу explicit rotate input (градусы)
    pub rotate_step_degrees: f32,
    /// Скорость подтягивания объекта к holder anchor (1/сек)
    pub pull_speed: f32,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            trace_length: 30.0,
            snap_interval_degrees: 45.0,
            grab_snap_duration: 2.5,
            rotate_step_duration: 0.5,
            rotate_step_degrees: 45.0,
            pull_speed: 12.0,
        }
    }
}

/// Set всех grab-систем (для ordering относительно movement и handle apply)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrabSet;

/// Plugin grab-домена
///
/// Все системы в FixedUpdate (60Hz) для детерминизма, последовательной
/// цепочкой: intents → hover → anchor tracking → snap-анимация.
pub struct GrabPlugin;

impl Plugin for GrabPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GrabConfig>()
            .add_event::<GrabActionIntent>()
            .add_event::<RotateModeIntent>()
            .add_event::<RotateObjectIntent>()
            .add_systems(
                FixedUpdate,
                (
                    systems::release_despawned_held,
                    systems::process_rotate_mode,
                    systems::process_grab_action,
                    systems::process_rotate_object,
                    systems::hover_raycast,
                    systems::track_holder_anchor,
                    systems::advance_snap_rotation,
                )
                    .chain()
                    .in_set(GrabSet),
            );
    }
}
