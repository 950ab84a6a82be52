//! POWERGRAB Simulation Core
//!
//! ECS-симуляция grab-механики на Bevy 0.16 (strategic layer).
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (grab state machine, snap rotation, прицеливание)
//! - Host engine = tactical layer (physics joint solving, rendering, input devices)
//!
//! Игрок трейсит луч из камеры, захватывает grabbable-объект физическим
//! handle'ом, докручивает его к ближайшим кратным 45° и отпускает.
//! Headless режим применяет handle targets напрямую в Transform,
//! embedded режим отдаёт их настоящему physics-солверу.

use bevy::prelude::*;

// Публичные модули
pub mod components;
pub mod grab;
pub mod logger;
pub mod movement;
pub mod physics;

// Re-export базовых компонентов для удобства
pub use components::*;
pub use grab::{
    spawn_grabbable, GrabActionIntent, GrabConfig, GrabPlugin, GrabSet, RotateModeIntent,
    RotateObjectIntent,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use movement::{spawn_player, JumpIntent, LookInput, MoveInput, MovementPlugin};
pub use physics::{HandleTarget, PhysicsHandle, PhysicsHandlePlugin, RayHit};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Подсистемы (ECS strategic layer)
            .add_plugins((MovementPlugin, GrabPlugin, PhysicsHandlePlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}

/// Прогоняет ровно один fixed tick (детерминированный headless driver)
///
/// Напрямую двигает Time<Fixed> на его timestep и запускает FixedUpdate,
/// не завися от wall clock. Для embedded режима не нужен — там fixed loop
/// ведёт сам Bevy.
///
/// First schedule здесь не гоняется, поэтому double buffer событий
/// стареет вручную — иначе Events<...> растут неограниченно.
pub fn run_fixed_tick(app: &mut App) {
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    app.world_mut()
        .resource_mut::<Time<Fixed>>()
        .advance_by(timestep);
    app.world_mut().run_schedule(FixedUpdate);

    age_intent_events(app.world_mut());
}

fn age_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

fn age_intent_events(world: &mut World) {
    age_events::<GrabActionIntent>(world);
    age_events::<RotateModeIntent>(world);
    age_events::<RotateObjectIntent>(world);
    age_events::<MoveInput>(world);
    age_events::<LookInput>(world);
    age_events::<JumpIntent>(world);
}

/// Snapshot мира для сравнения детерминизма
///
/// Собирает компоненты в детерминированный байтовый формат
/// (сортировка по Entity ID, сериализация через Debug).
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
