//! Contracts for the host game engine's collaborators.
//!
//! The engine never reaches for global game state. Each operation receives an
//! [`InteractContext`] borrowing exactly the collaborators it may touch.

use anyhow::Result;

use crate::interaction::executor::InteractionOutcome;
use crate::interaction::hit::HitResult;
use crate::interaction::slot::HotbarSlot;
use crate::packet::{Hand, ServerboundPacket};
use crate::world::BlockView;
use crate::world::direction::DirectionSet;
use crate::world::position::Vec3;

/// Outgoing connection to the server.
pub trait PacketSink {
    fn send(&mut self, packet: ServerboundPacket) -> Result<()>;

    /// Allocate the next sequence id, build the packet with it, and send it.
    /// Returns the id used.
    fn send_sequenced(&mut self, build: &mut dyn FnMut(u32) -> ServerboundPacket) -> Result<u32>;
}

/// Owner of the hotbar slot the server believes is selected.
pub trait Inventory {
    fn server_slot(&self) -> HotbarSlot;

    /// Tell the server a different slot is selected.
    fn set_slot(&mut self, slot: HotbarSlot) -> Result<()>;

    /// Make the server slot agree with the slot the user actually selected.
    fn sync_to_client(&mut self) -> Result<()>;
}

/// The locally controlled player entity.
pub trait LocalPlayer {
    fn eye_position(&self) -> Vec3;

    fn is_sneaking(&self) -> bool;

    /// The engine's own block interaction: prediction, collision checks, and
    /// the sequenced use-item-on packet.
    fn interact_block(&mut self, hand: Hand, hit: &HitResult) -> Result<InteractionOutcome>;

    /// Play the swing animation locally without telling the server.
    fn swing_hand(&mut self, hand: Hand);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Place against nothing: fall back to the top face when no neighbour
    /// can host the block.
    AirPlace,
}

impl Feature {
    /// Name of the module that switches this feature on.
    pub const fn module_name(self) -> &'static str {
        match self {
            Feature::AirPlace => "AirPlace",
        }
    }
}

pub trait FeatureFlags {
    fn is_enabled(&self, feature: Feature) -> bool;
}

/// Source of the faces an anti-cheat expects to be clicked.
pub trait StrictDirections {
    fn place_directions(&self, eye: Vec3, target_center: Vec3) -> DirectionSet;
}

/// The collaborators one interaction may use.
pub struct InteractContext<'a> {
    pub world: &'a dyn BlockView,
    pub player: &'a mut dyn LocalPlayer,
    pub inventory: &'a mut dyn Inventory,
    pub network: &'a mut dyn PacketSink,
    pub features: &'a dyn FeatureFlags,
    pub strict: &'a dyn StrictDirections,
}
