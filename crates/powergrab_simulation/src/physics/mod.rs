//! Physics-граница симуляции
//!
//! - handle: physics handle (grab constraint target) + headless применение
//! - trace: ray-vs-AABB трейс для прицеливания
//! - collision: rapier collision groups (tactical layer)

pub mod collision;
pub mod handle;
pub mod trace;

pub use handle::{HandleTarget, PhysicsHandle, PhysicsHandlePlugin};
pub use trace::RayHit;
