//! Events fired from the player hooks.

use super::{Event, EventState, Stage};
use crate::movement::{MovementInput, MovementSample};
use crate::packet::Hand;

macro_rules! impl_event {
    ($ty:ty) => {
        impl Event for $ty {
            fn state(&self) -> &EventState {
                &self.state
            }

            fn state_mut(&mut self) -> &mut EventState {
                &mut self.state
            }
        }
    };
}

/// Fired around the per-tick movement packet send.
///
/// At [`Stage::Pre`], cancelling skips the send entirely and listeners may
/// rewrite `sample` to change what is reported. At [`Stage::Post`] the
/// packets are already out and cancelling has no effect.
#[derive(Debug, Clone)]
pub struct MovementPacketsEvent {
    state: EventState,
    pub sample: MovementSample,
}

impl MovementPacketsEvent {
    pub fn new(stage: Stage, sample: MovementSample) -> Self {
        Self {
            state: EventState::new(stage),
            sample,
        }
    }
}

impl_event!(MovementPacketsEvent);

/// Fired after item-use slowdown is applied to the movement input, so
/// listeners can undo it.
#[derive(Debug, Clone)]
pub struct MovementSlowdownEvent {
    state: EventState,
    pub input: MovementInput,
}

impl MovementSlowdownEvent {
    pub fn new(input: MovementInput) -> Self {
        Self {
            state: EventState::new(Stage::Post),
            input,
        }
    }
}

impl_event!(MovementSlowdownEvent);

/// Fired when the player starts using an item in `hand`.
#[derive(Debug, Clone)]
pub struct SetCurrentHandEvent {
    state: EventState,
    pub hand: Hand,
}

impl SetCurrentHandEvent {
    pub fn new(hand: Hand) -> Self {
        Self {
            state: EventState::new(Stage::Pre),
            hand,
        }
    }
}

impl_event!(SetCurrentHandEvent);
