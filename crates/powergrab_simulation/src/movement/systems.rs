//! Кинематический контроллер игрока
//!
//! Архитектура:
//! - Rapier capsule для коллизий (tactical layer)
//! - Custom velocity integration (не используем rapier forces)
//! - Gravity + stub ground check + movement basis из camera yaw
//!
//! Детерминизм: fixed timestep 60Hz, все системы в FixedUpdate.

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;
use bevy_rapier3d::prelude::*;

use crate::components::{
    CameraRig, GrabState, HolderAnchor, KinematicMotor, MovementInput, PhysicsBody, Player,
};
use crate::grab::GrabSet;
use crate::movement::events::{JumpIntent, LookInput, MoveInput};
use crate::physics::{collision, handle::PhysicsHandle};

/// System: MoveInput events → world-space направление движения
///
/// Forward/right базис берётся только из camera yaw (стандартное
/// third-person перемещение). Без событий на этом tick'е — стоим.
pub fn process_move_input(
    mut events: EventReader<MoveInput>,
    mut players: Query<(&CameraRig, &mut MovementInput), With<Player>>,
) {
    // Без input'а движение затухает в этом же tick'е
    for (_, mut input) in players.iter_mut() {
        input.direction = Vec3::ZERO;
    }

    for event in events.read() {
        let Ok((rig, mut input)) = players.get_mut(event.entity) else {
            continue;
        };

        let (forward, right) = rig.yaw_basis();
        let direction = forward * event.direction.y + right * event.direction.x;
        input.direction = if direction.length_squared() > 0.01 {
            direction.normalize()
        } else {
            Vec3::ZERO
        };
    }
}

/// System: LookInput events → камера либо захваченный объект
///
/// Пока зажат rotate mode и что-то захвачено, look input добавляет
/// Euler-дельту (pitch 0, yaw = delta.y, roll = delta.x) к повороту
/// объекта, без чувствительности камеры. Rotate mode без захвата
/// проглатывает input целиком (ни камера, ни объект не двигаются).
/// Иначе — yaw/pitch камеры.
pub fn process_look_input(
    mut events: EventReader<LookInput>,
    mut players: Query<(&mut CameraRig, &GrabState, &mut PhysicsHandle), With<Player>>,
) {
    for event in events.read() {
        let Ok((mut rig, state, mut handle)) = players.get_mut(event.entity) else {
            continue;
        };

        if state.rotate_mode {
            if state.is_holding() {
                handle.add_target_rotation(Vec3::new(0.0, event.delta.y, event.delta.x));
            }
        } else {
            rig.apply_look(event.delta);
        }
    }
}

/// System: stub ground check + посадка на пол
///
/// Grounded если нижняя точка на высоте пола; вертикальная velocity
/// вниз при этом гасится, позиция прижимается к полу.
pub fn ground_detection(
    mut query: Query<(&mut Transform, &mut KinematicMotor, &mut PhysicsBody)>,
) {
    for (mut transform, mut motor, mut body) in query.iter_mut() {
        motor.grounded = transform.translation.y <= motor.floor_height + 1e-3;

        if motor.grounded && body.velocity.y < 0.0 {
            body.velocity.y = 0.0;
            transform.translation.y = motor.floor_height;
        }
    }
}

/// System: JumpIntent → вертикальная velocity (только с земли)
pub fn process_jump_intent(
    mut events: EventReader<JumpIntent>,
    mut players: Query<(&mut KinematicMotor, &mut PhysicsBody), With<Player>>,
) {
    for event in events.read() {
        let Ok((mut motor, mut body)) = players.get_mut(event.entity) else {
            continue;
        };
        if !motor.grounded {
            continue;
        }
        body.velocity.y = motor.jump_velocity;
        motor.grounded = false;
    }
}

/// System: направление движения → горизонтальная velocity
///
/// На земле velocity выставляется сразу; в воздухе рулёжка ограничена
/// air_control (подмешивание к текущей velocity). Y velocity не трогаем
/// (gravity handling).
pub fn apply_movement_input(
    mut query: Query<(&KinematicMotor, &MovementInput, &mut PhysicsBody)>,
) {
    for (motor, input, mut body) in query.iter_mut() {
        let target = if input.direction.length_squared() > 0.01 {
            input.direction.normalize() * motor.move_speed
        } else {
            Vec3::ZERO
        };

        let control = if motor.grounded { 1.0 } else { motor.air_control };
        body.velocity.x += (target.x - body.velocity.x) * control;
        body.velocity.z += (target.z - body.velocity.z) * control;
    }
}

/// System: гравитация (только в воздухе)
pub fn apply_gravity(
    mut query: Query<(&KinematicMotor, &mut PhysicsBody)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (motor, mut body) in query.iter_mut() {
        if !motor.grounded {
            body.velocity.y += motor.gravity * delta;
        }
    }
}

/// System: интеграция velocity → Transform (headless, без rapier step)
pub fn integrate_velocity_to_transform(
    mut query: Query<(&PhysicsBody, &mut Transform), With<KinematicMotor>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (body, mut transform) in query.iter_mut() {
        transform.translation += body.velocity * delta;
    }
}

/// Plugin кинематического контроллера
///
/// Цепочка в FixedUpdate до grab-систем (grab читает свежую позицию
/// камеры) и до rapier physics step.
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MoveInput>()
            .add_event::<LookInput>()
            .add_event::<JumpIntent>()
            .add_systems(
                FixedUpdate,
                (
                    process_move_input,
                    process_look_input,
                    ground_detection,
                    process_jump_intent,
                    apply_movement_input,
                    apply_gravity,
                    integrate_velocity_to_transform,
                )
                    .chain()
                    .before(GrabSet)
                    .before(PhysicsSet::SyncBackend),
            );
    }
}

/// Spawn helper для player-персонажа
///
/// Полный набор компонентов:
/// - Player (Required: GrabState + SnapRotation + PhysicsHandle)
/// - CameraRig + HolderAnchor
/// - Кинематика: KinematicMotor + PhysicsBody + MovementInput
/// - Rapier: KinematicPositionBased capsule (tactical layer)
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            Player,
            CameraRig::default(),
            HolderAnchor::default(),
            KinematicMotor::default(),
            PhysicsBody::default(),
            MovementInput::default(),
            // Rapier physics (inert в headless режиме)
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.7, 0.35), // рост ~1.8m
            Velocity::default(),
            collision::actor_groups(),
        ))
        .id()
}
