//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - player: player control marker (Player)
//! - camera: камера и holder anchor (CameraRig, HolderAnchor)
//! - grabbable: захватываемые объекты (Grabbable, SurfaceMaterial, TraceCollider)
//! - grab: состояние захвата на игроке (GrabState, SnapRotation)
//! - movement: кинематика персонажа (KinematicMotor, PhysicsBody, MovementInput)

pub mod camera;
pub mod grab;
pub mod grabbable;
pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use camera::*;
pub use grab::*;
pub use grabbable::*;
pub use movement::*;
pub use player::*;
