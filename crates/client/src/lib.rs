//! Minecraft binding for the hookline engine: vanilla block data, protocol
//! encoding, and a session wiring a player to the engine's hooks.

pub mod block;
pub mod config;
pub mod inventory;
pub mod net;
pub mod packets;
pub mod player;
pub mod session;
