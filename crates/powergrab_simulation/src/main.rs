//! Headless прогон POWERGRAB симуляции
//!
//! Spawn игрока и grabbable-объекта, захват, 5 секунд тиков —
//! для ручной проверки state machine без рендера.

use bevy::prelude::*;
use powergrab_simulation::*;

fn main() {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);

    let player = spawn_player(&mut app.world_mut().commands(), Vec3::ZERO);
    let object = spawn_grabbable(
        &mut app.world_mut().commands(),
        Vec3::new(0.0, 1.6, -5.0),
        Vec3::splat(0.5),
    );
    app.world_mut().flush();

    println!("Starting POWERGRAB headless simulation");

    app.world_mut().send_event(GrabActionIntent { entity: player });

    for tick in 0..300 {
        run_fixed_tick(&mut app);

        if tick % 60 == 0 {
            let held = app
                .world()
                .get::<GrabState>(player)
                .map(|state| state.held)
                .unwrap_or(None);
            let snap = app
                .world()
                .get::<SnapRotation>(player)
                .map(|snap| snap.progress)
                .unwrap_or(0.0);
            let position = app
                .world()
                .get::<Transform>(object)
                .map(|transform| transform.translation)
                .unwrap_or(Vec3::ZERO);

            println!(
                "Tick {}: held = {:?}, snap progress = {:.2}, object at {:.2?}",
                tick, held, snap, position
            );
        }
    }

    println!("Simulation complete!");
}
