//! The extension points the host calls from its player entity.

use anyhow::Result;

use super::pipeline::{MovementPipeline, TickOutcome};
use super::{MovementInput, MovementSample, PlayerSnapshot};
use crate::event::EventBus;
use crate::event::player::{MovementSlowdownEvent, SetCurrentHandEvent};
use crate::host::PacketSink;
use crate::packet::Hand;

/// Input scale while using an item (eating, drawing a bow) on foot.
pub const ITEM_USE_SLOWDOWN: f32 = 0.2;

pub struct PlayerHooks {
    pipeline: MovementPipeline,
}

impl PlayerHooks {
    pub fn new(initial: MovementSample) -> Self {
        Self {
            pipeline: MovementPipeline::new(initial),
        }
    }

    pub fn pipeline(&self) -> &MovementPipeline {
        &self.pipeline
    }

    /// Replaces the game's movement packet send for this tick.
    pub fn send_movement_packets(
        &mut self,
        player: &PlayerSnapshot,
        bus: &mut EventBus,
        network: &mut dyn PacketSink,
    ) -> Result<TickOutcome> {
        self.pipeline.send_movement_packets(player, bus, network)
    }

    /// Apply item-use slowdown to `input`, then let listeners adjust it.
    pub fn tick_movement(&mut self, input: &mut MovementInput, riding: bool, bus: &mut EventBus) {
        if input.using_item && !riding {
            input.forward *= ITEM_USE_SLOWDOWN;
            input.sideways *= ITEM_USE_SLOWDOWN;
        }
        let mut event = MovementSlowdownEvent::new(*input);
        bus.dispatch(&mut event);
        *input = event.input;
    }

    /// Announce that the player started using `hand`.
    pub fn set_current_hand(&mut self, hand: Hand, bus: &mut EventBus) {
        let mut event = SetCurrentHandEvent::new(hand);
        bus.dispatch(&mut event);
    }
}
