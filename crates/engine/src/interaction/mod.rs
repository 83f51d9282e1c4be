//! Automated block placement.
//!
//! Data flows leaf to root: [`direction`] picks the face, [`hit`] turns it
//! into a click point, and [`executor`] runs the click inside the
//! [`slot`] spoof and the optional [`rotation`] window.

pub mod direction;
pub mod executor;
pub mod hit;
pub mod rotation;
pub mod slot;

pub use direction::{NcpDirections, interact_direction, resolve};
pub use executor::{ExecutionMode, InteractionOutcome, Interactor, NoSneak, SneakHook, SwingMode};
pub use hit::HitResult;
pub use rotation::{Rotation, RotationCallback};
pub use slot::{HotbarSlot, with_slot};
