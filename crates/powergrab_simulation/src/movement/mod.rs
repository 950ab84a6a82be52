//! Movement domain — перемещение и камера игрока

pub mod events;
pub mod systems;

pub use events::*;
pub use systems::{spawn_player, MovementPlugin};
