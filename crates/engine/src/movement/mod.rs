//! Movement state reported to the server each tick.

pub mod hooks;
pub mod pipeline;

pub use hooks::PlayerHooks;
pub use pipeline::{MoveKind, MovementPipeline, TickOutcome};

use crate::world::position::Vec3;

/// Position, look and ground flag as the server sees them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

impl MovementSample {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Everything the movement pipeline reads from the player in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerSnapshot {
    pub entity_id: i32,
    pub sample: MovementSample,
    pub sneaking: bool,
    pub sprinting: bool,
    /// Velocity of the ridden vehicle, `None` when on foot.
    pub vehicle_velocity: Option<Vec3>,
    /// Whether the view is attached to this player. Position and look are
    /// only reported while it is.
    pub is_camera: bool,
}

/// Player movement intent for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementInput {
    pub forward: f32,
    pub sideways: f32,
    pub jumping: bool,
    pub sneaking: bool,
    pub using_item: bool,
}
