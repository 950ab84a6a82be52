//! Grab intent events
//!
//! Tactical layer (input) мапит устройства в эти intents;
//! headless тесты отправляют их напрямую через World::send_event.

use bevy::prelude::*;

/// Event: primary action (ЛКМ)
///
/// Держим объект → release; иначе трейс из камеры и попытка захвата.
#[derive(Event, Debug, Clone)]
pub struct GrabActionIntent {
    /// Player entity
    pub entity: Entity,
}

/// Event: secondary action зажата/отпущена (ПКМ)
///
/// Переключает rotate mode: пока held == true, look input
/// крутит захваченный объект вместо камеры.
#[derive(Event, Debug, Clone)]
pub struct RotateModeIntent {
    /// Player entity
    pub entity: Entity,
    pub held: bool,
}

/// Event: explicit rotate input (стрелки)
///
/// Применяется только пока что-то захвачено: немедленный поворот
/// на 45° за единицу input (pitch из x, yaw из y) + рестарт короткой
/// интерполяции с текущего поворота объекта.
#[derive(Event, Debug, Clone)]
pub struct RotateObjectIntent {
    /// Player entity
    pub entity: Entity,
    pub input: Vec2,
}
