//! Grab state компоненты на player entity: GrabState, SnapRotation

use bevy::prelude::*;
use crate::grab::rotation::lerp_euler;

/// Состояние grab-механики игрока
///
/// Инварианты:
/// - не больше одного held объекта
/// - hovered == None пока что-то held (hover трекается только без захвата)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct GrabState {
    /// Захваченный объект (физический handle прикреплён к нему)
    pub held: Option<Entity>,
    /// Объект под прицелом (только пока ничего не захвачено)
    pub hovered: Option<Entity>,
    /// Secondary action зажат: look input крутит объект вместо камеры
    pub rotate_mode: bool,
}

impl GrabState {
    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }
}

/// Bookkeeping snap-анимации поворота захваченного объекта
///
/// Euler-углы в градусах, порядок осей (pitch, yaw, roll).
/// Progress монотонно неубывает внутри одной анимации и clamped в [0, 1].
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct SnapRotation {
    /// Анимация идёт (сбрасывается когда progress достигает 1)
    pub active: bool,
    /// Прошедшее время (секунды)
    pub timer: f32,
    /// Длительность интерполяции (секунды)
    pub duration: f32,
    /// timer / duration, clamped [0, 1]
    pub progress: f32,
    /// Стартовый поворот (Euler градусы)
    pub start: Vec3,
    /// Целевой поворот (Euler градусы)
    pub target: Vec3,
}

impl SnapRotation {
    /// Запустить новую snap-анимацию start → target
    pub fn begin(&mut self, start: Vec3, target: Vec3, duration: f32) {
        self.active = true;
        self.timer = 0.0;
        self.duration = duration;
        self.progress = 0.0;
        self.start = start;
        self.target = target;
    }

    /// Перезапустить bookkeeping с нового стартового поворота
    ///
    /// Target и active flag намеренно не трогаются: explicit rotate input
    /// сбрасывает только тайминг анимации, не перенацеливая её.
    pub fn restart_from(&mut self, start: Vec3, duration: f32) {
        self.timer = 0.0;
        self.duration = duration;
        self.progress = 0.0;
        self.start = start;
    }

    /// Продвинуть анимацию на delta секунд, вернуть текущий Euler-поворот
    ///
    /// Помечает анимацию завершённой когда progress достигает 1.
    pub fn advance(&mut self, delta: f32) -> Vec3 {
        self.timer += delta;
        self.progress = if self.duration > 0.0 {
            (self.timer / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let rotation = lerp_euler(self.start, self.target, self.progress);

        if self.progress >= 1.0 {
            self.active = false;
        }

        rotation
    }
}
