//! Movement / look input events

use bevy::prelude::*;

/// Event: направление движения на текущий frame (input space)
///
/// x = вправо, y = вперёд. Конвертируется в world direction
/// через camera yaw (process_move_input).
#[derive(Event, Debug, Clone)]
pub struct MoveInput {
    /// Player entity
    pub entity: Entity,
    pub direction: Vec2,
}

/// Event: намерение прыгнуть (Space)
///
/// Применяется только на земле: задаёт вертикальную velocity мотора.
/// В воздухе intent игнорируется.
#[derive(Event, Debug, Clone)]
pub struct JumpIntent {
    /// Player entity
    pub entity: Entity,
}

/// Event: look input (мышь/стик)
///
/// Обычно крутит камеру; пока зажат rotate mode и что-то захвачено —
/// крутит захваченный объект вместо камеры.
#[derive(Event, Debug, Clone)]
pub struct LookInput {
    /// Player entity
    pub entity: Entity,
    pub delta: Vec2,
}
