//! Game-agnostic block interaction and movement packet engine.
//!
//! The host game owns the world, the player and the connection; it hands the
//! engine borrowed access through the traits in [`host`] and calls the hook
//! points in [`movement::hooks`] at the matching places in its tick.

pub mod event;
pub mod host;
pub mod interaction;
pub mod module;
pub mod movement;
pub mod packet;
pub mod world;
