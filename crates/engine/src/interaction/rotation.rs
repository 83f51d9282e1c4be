use crate::world::position::Vec3;

/// Look angles in degrees, Minecraft convention: yaw 0 faces south (+Z),
/// pitch is positive looking down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Rotation {
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Angles that aim from `from` at `to`. Yaw is wrapped into [-180, 180).
    pub fn between(from: Vec3, to: Vec3) -> Self {
        let delta = to - from;
        let yaw = delta.z.atan2(delta.x).to_degrees() - 90.0;
        let pitch = -delta.y.atan2(delta.horizontal_length()).to_degrees();
        Self {
            yaw: wrap_degrees(yaw) as f32,
            pitch: pitch as f32,
        }
    }

    pub fn as_array(self) -> [f32; 2] {
        [self.yaw, self.pitch]
    }
}

fn wrap_degrees(angle: f64) -> f64 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Lets an aiming subsystem turn the player for the duration of one
/// interaction. Called with `entering = true` right before the attempt and
/// `entering = false` right after it.
pub trait RotationCallback {
    fn handle_rotation(&mut self, entering: bool, angles: Rotation);
}

impl<F: FnMut(bool, Rotation)> RotationCallback for F {
    fn handle_rotation(&mut self, entering: bool, angles: Rotation) {
        self(entering, angles)
    }
}
