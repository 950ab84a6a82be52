//! Grab state machine системы
//!
//! Порядок в FixedUpdate (chain):
//! 1. release_despawned_held — чистка висячих ссылок
//! 2. process_rotate_mode — secondary action toggle
//! 3. process_grab_action — grab / release
//! 4. process_rotate_object — explicit rotate input
//! 5. hover_raycast — hover только пока ничего не захвачено
//! 6. track_holder_anchor — target location → позиция якоря
//! 7. advance_snap_rotation — тайминг snap-анимации
//!
//! Ошибок нет: промах трейса, отсутствующий компонент или despawned
//! entity просто пропускают ветку (поведение "ничего не происходит").

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{
    CameraRig, GrabState, Grabbable, HolderAnchor, MaterialVariant, Player, SnapRotation,
    SurfaceMaterial, TraceCollider,
};
use crate::grab::{
    events::{GrabActionIntent, RotateModeIntent, RotateObjectIntent},
    rotation, GrabConfig,
};
use crate::logger;
use crate::physics::{collision, handle::PhysicsHandle, trace};

/// Query-алиас: всё что нужно grab-системам от объекта
type GrabbableQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Transform,
        &'static mut Grabbable,
        &'static mut SurfaceMaterial,
        &'static TraceCollider,
    ),
    Without<Player>,
>;

/// System: сброс состояния если held объект исчез из мира
///
/// Grab-ссылки не должны переживать despawn (инвариант state machine).
pub fn release_despawned_held(
    mut players: Query<(&mut GrabState, &mut PhysicsHandle, &mut SnapRotation), With<Player>>,
    grabbables: Query<(), With<Grabbable>>,
) {
    for (mut state, mut handle, mut snap) in players.iter_mut() {
        if let Some(held) = state.held {
            if grabbables.get(held).is_err() {
                state.held = None;
                handle.release();
                snap.active = false;
                logger::log_warning("Held object despawned, grab state cleared");
            }
        }
        if let Some(hovered) = state.hovered {
            if grabbables.get(hovered).is_err() {
                state.hovered = None;
            }
        }
    }
}

/// System: secondary action зажата/отпущена → rotate mode flag
pub fn process_rotate_mode(
    mut intents: EventReader<RotateModeIntent>,
    mut players: Query<&mut GrabState, With<Player>>,
) {
    for intent in intents.read() {
        let Ok(mut state) = players.get_mut(intent.entity) else {
            continue;
        };
        state.rotate_mode = intent.held;
    }
}

/// System: primary action → release либо трейс + захват
///
/// Release: отцепить handle, сбросить флаги и материал, погасить snap.
/// Grab: трейс из камеры; hit по grabbable с can_grab → прицепить handle
/// на текущей позиции/повороте, target = ближайшие кратные 45°, запустить
/// snap-анимацию 2.5 сек. Hover гасится в момент захвата.
pub fn process_grab_action(
    mut intents: EventReader<GrabActionIntent>,
    mut players: Query<
        (
            &Transform,
            &CameraRig,
            &mut GrabState,
            &mut PhysicsHandle,
            &mut SnapRotation,
        ),
        With<Player>,
    >,
    mut grabbables: GrabbableQuery,
    config: Res<GrabConfig>,
) {
    for intent in intents.read() {
        let Ok((transform, rig, mut state, mut handle, mut snap)) = players.get_mut(intent.entity)
        else {
            continue;
        };

        // Release-ветка: что-то держим → отпустить и выйти
        if let Some(held) = state.held.take() {
            handle.release();
            snap.active = false;
            if let Ok((_, _, mut grabbable, mut material, _)) = grabbables.get_mut(held) {
                grabbable.set_is_grabbed(false);
                material.set(MaterialVariant::Default);
            }
            logger::log(&format!("Released object {held:?}"));
            continue;
        }

        // Grab-ветка: трейс из камеры
        let origin = rig.eye_position(transform);
        let direction = rig.forward();
        let Some(hit) = trace::closest_hit(
            origin,
            direction,
            config.trace_length,
            grabbables
                .iter()
                .map(|(entity, transform, _, _, collider)| {
                    (entity, transform.translation, collider.half_extents)
                }),
        ) else {
            continue;
        };

        let permits_grab = grabbables
            .get(hit.entity)
            .map(|(_, _, grabbable, _, _)| grabbable.can_grab())
            .unwrap_or(false);
        if !permits_grab {
            continue;
        }

        // Старый hover другого объекта гасим до смены состояния
        if let Some(prev) = state.hovered.take() {
            if prev != hit.entity {
                if let Ok((_, _, _, mut material, _)) = grabbables.get_mut(prev) {
                    material.set(MaterialVariant::Default);
                }
            }
        }

        let Ok((_, object_transform, mut grabbable, mut material, _)) =
            grabbables.get_mut(hit.entity)
        else {
            continue;
        };

        let start_rotation = rotation::quat_to_euler_degrees(object_transform.rotation);
        let target_rotation =
            rotation::closest_angle_interval(start_rotation, config.snap_interval_degrees);

        state.held = Some(hit.entity);
        grabbable.set_is_grabbed(true);
        material.set(MaterialVariant::Grabbed);

        handle.grab(hit.entity, object_transform.translation, start_rotation);
        snap.begin(start_rotation, target_rotation, config.grab_snap_duration);

        logger::log(&format!(
            "Grabbed object {:?} at {:.2?}, snapping {:.1?} -> {:.1?}",
            hit.entity, object_transform.translation, start_rotation, target_rotation
        ));
    }
}

/// System: explicit rotate input (стрелки) на захваченном объекте
///
/// Немедленный поворот на rotate_step_degrees за единицу input
/// (pitch из input.x, yaw из input.y) + рестарт bookkeeping'а короткой
/// интерполяции с поворота объекта ДО дельты. Новый target при этом
/// не выставляется: рестарт сбрасывает только тайминг.
pub fn process_rotate_object(
    mut intents: EventReader<RotateObjectIntent>,
    mut players: Query<(&GrabState, &mut SnapRotation, &mut PhysicsHandle), With<Player>>,
    config: Res<GrabConfig>,
) {
    for intent in intents.read() {
        let Ok((state, mut snap, mut handle)) = players.get_mut(intent.entity) else {
            continue;
        };
        if !state.is_holding() {
            continue;
        }
        let Some(current) = handle.target_rotation() else {
            continue;
        };

        let delta = Vec3::new(
            intent.input.x * config.rotate_step_degrees,
            intent.input.y * config.rotate_step_degrees,
            0.0,
        );

        snap.restart_from(current, config.rotate_step_duration);
        handle.add_target_rotation(delta);
    }
}

/// System: hover-трейс каждый tick пока ничего не захвачено
///
/// Под прицелом grabbable с can_grab → материал Hover; промах или
/// запрет захвата → сброс предыдущего hover'а в Default.
pub fn hover_raycast(
    mut players: Query<(&Transform, &CameraRig, &mut GrabState), With<Player>>,
    mut grabbables: GrabbableQuery,
    config: Res<GrabConfig>,
) {
    for (transform, rig, mut state) in players.iter_mut() {
        if state.is_holding() {
            continue;
        }

        let origin = rig.eye_position(transform);
        let direction = rig.forward();
        let hovered_now = trace::closest_hit(
            origin,
            direction,
            config.trace_length,
            grabbables
                .iter()
                .map(|(entity, transform, _, _, collider)| {
                    (entity, transform.translation, collider.half_extents)
                }),
        )
        .filter(|hit| {
            grabbables
                .get(hit.entity)
                .map(|(_, _, grabbable, _, _)| grabbable.can_grab())
                .unwrap_or(false)
        })
        .map(|hit| hit.entity);

        // Уводим прицел / сменили цель → прошлый hover в Default
        if let Some(prev) = state.hovered {
            if hovered_now != Some(prev) {
                if let Ok((_, _, _, mut material, _)) = grabbables.get_mut(prev) {
                    material.set(MaterialVariant::Default);
                }
            }
        }

        state.hovered = hovered_now;
        if let Some(entity) = hovered_now {
            if let Ok((_, _, _, mut material, _)) = grabbables.get_mut(entity) {
                material.set(MaterialVariant::Hover);
            }
        }
    }
}

/// System: target location handle'а трекает holder anchor
pub fn track_holder_anchor(
    mut players: Query<(&Transform, &CameraRig, &HolderAnchor, &mut PhysicsHandle), With<Player>>,
) {
    for (transform, rig, anchor, mut handle) in players.iter_mut() {
        if !handle.is_grabbing() {
            continue;
        }
        let position = anchor.world_position(rig.eye_position(transform), rig);
        handle.set_target_location(position);
    }
}

/// System: продвижение snap-анимации и запись поворота в handle
pub fn advance_snap_rotation(
    mut players: Query<(&GrabState, &mut SnapRotation, &mut PhysicsHandle), With<Player>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (state, mut snap, mut handle) in players.iter_mut() {
        if !state.is_holding() || !snap.active {
            continue;
        }
        let rotation = snap.advance(delta);
        handle.set_target_rotation(rotation);
    }
}

/// Spawn helper для grabbable-объекта
///
/// Полный набор компонентов:
/// - Transform
/// - Grabbable (Required: SurfaceMaterial + TraceCollider)
/// - Rapier: RigidBody::Dynamic + cuboid collider (tactical layer)
pub fn spawn_grabbable(commands: &mut Commands, position: Vec3, half_extents: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            Grabbable::default(),
            TraceCollider { half_extents },
            // Rapier physics (inert в headless режиме)
            RigidBody::Dynamic,
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            Velocity::default(),
            collision::grabbable_groups(),
        ))
        .id()
}
