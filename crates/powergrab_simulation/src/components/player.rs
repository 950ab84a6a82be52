//! Player control marker component
//!
//! Отмечает entity которым управляет игрок через input events.

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Автоматически добавляет GrabState, SnapRotation и PhysicsHandle через
/// Required Components — всё состояние grab-механики живёт на игроке.
///
/// # Single-player
/// Обычно только один entity имеет этот компонент; grab-инвариант
/// "не больше одного held объекта" действует per-player.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    crate::components::GrabState,
    crate::components::SnapRotation,
    crate::physics::handle::PhysicsHandle
)]
pub struct Player;
