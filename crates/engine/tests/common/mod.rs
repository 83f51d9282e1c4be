//! Recording fakes of every host collaborator, sharing one call log so tests
//! can assert on cross-collaborator ordering.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Result, bail};
use hookline_engine::host::{
    Feature, FeatureFlags, InteractContext, Inventory, LocalPlayer, PacketSink, StrictDirections,
};
use hookline_engine::interaction::{HitResult, HotbarSlot, InteractionOutcome};
use hookline_engine::packet::{Hand, ServerboundPacket};
use hookline_engine::world::World;
use hookline_engine::world::block::{BlockId, BlockState, Fluid, SimplePalette};
use hookline_engine::world::direction::DirectionSet;
use hookline_engine::world::position::{BlockPos, Vec3};

pub const STONE: BlockId = BlockId(1);
pub const WATER: BlockId = BlockId(2);
pub const CHEST: BlockId = BlockId(3);

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn slot(index: u8) -> HotbarSlot {
    HotbarSlot::new(index).unwrap()
}

pub fn palette() -> SimplePalette {
    SimplePalette::new()
        .with(BlockState::fluid(WATER, Fluid::Source))
        .with(BlockState::solid(CHEST).with_sneak())
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

pub struct RecordingSink {
    pub log: Log,
    pub packets: Vec<ServerboundPacket>,
    pub next_sequence: u32,
}

impl RecordingSink {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            packets: Vec::new(),
            next_sequence: 1,
        }
    }

    pub fn swing_packets(&self) -> usize {
        self.packets
            .iter()
            .filter(|p| matches!(p, ServerboundPacket::Swing { .. }))
            .count()
    }

    pub fn movement_packets(&self) -> Vec<&ServerboundPacket> {
        self.packets.iter().filter(|p| p.is_movement()).collect()
    }
}

impl PacketSink for RecordingSink {
    fn send(&mut self, packet: ServerboundPacket) -> Result<()> {
        self.log.borrow_mut().push(format!("send {}", packet.name()));
        self.packets.push(packet);
        Ok(())
    }

    fn send_sequenced(&mut self, build: &mut dyn FnMut(u32) -> ServerboundPacket) -> Result<u32> {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.send(build(sequence))?;
        Ok(sequence)
    }
}

pub struct FakeInventory {
    pub log: Log,
    pub selected: HotbarSlot,
    pub server: HotbarSlot,
}

impl Inventory for FakeInventory {
    fn server_slot(&self) -> HotbarSlot {
        self.server
    }

    fn set_slot(&mut self, slot: HotbarSlot) -> Result<()> {
        self.log.borrow_mut().push(format!("set_slot {}", slot.index()));
        self.server = slot;
        Ok(())
    }

    fn sync_to_client(&mut self) -> Result<()> {
        self.log.borrow_mut().push("sync".into());
        self.server = self.selected;
        Ok(())
    }
}

pub struct FakePlayer {
    pub log: Log,
    pub eye: Vec3,
    pub sneaking: bool,
    pub outcome: InteractionOutcome,
    pub fail_interaction: bool,
    pub interactions: Vec<HitResult>,
    pub swings: u32,
}

impl LocalPlayer for FakePlayer {
    fn eye_position(&self) -> Vec3 {
        self.eye
    }

    fn is_sneaking(&self) -> bool {
        self.sneaking
    }

    fn interact_block(&mut self, _hand: Hand, hit: &HitResult) -> Result<InteractionOutcome> {
        self.log.borrow_mut().push("interact".into());
        if self.fail_interaction {
            bail!("interaction manager unavailable");
        }
        self.interactions.push(*hit);
        Ok(self.outcome)
    }

    fn swing_hand(&mut self, _hand: Hand) {
        self.log.borrow_mut().push("swing_hand".into());
        self.swings += 1;
    }
}

#[derive(Default)]
pub struct Flags {
    pub air_place: bool,
}

impl FeatureFlags for Flags {
    fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::AirPlace => self.air_place,
        }
    }
}

/// Strict-direction source returning a fixed set regardless of the eye.
pub struct FixedDirections(pub DirectionSet);

impl StrictDirections for FixedDirections {
    fn place_directions(&self, _eye: Vec3, _target_center: Vec3) -> DirectionSet {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Rig
// ---------------------------------------------------------------------------

/// A stone floor at y = 64 and a player standing on it.
pub struct Rig {
    pub log: Log,
    pub world: World,
    pub player: FakePlayer,
    pub inventory: FakeInventory,
    pub network: RecordingSink,
    pub flags: Flags,
    pub strict: FixedDirections,
}

impl Rig {
    pub fn new() -> Self {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let world = World::new(Arc::new(palette()));
        world.generate_flat(1, &[(64, STONE)]);
        Self {
            world,
            player: FakePlayer {
                log: Rc::clone(&log),
                eye: Vec3::new(2.5, 66.62, 2.5),
                sneaking: false,
                outcome: InteractionOutcome::SUCCESS,
                fail_interaction: false,
                interactions: Vec::new(),
                swings: 0,
            },
            inventory: FakeInventory {
                log: Rc::clone(&log),
                selected: slot(0),
                server: slot(0),
            },
            network: RecordingSink::new(Rc::clone(&log)),
            flags: Flags::default(),
            strict: FixedDirections(DirectionSet::ALL),
            log,
        }
    }

    pub fn cx(&mut self) -> InteractContext<'_> {
        InteractContext {
            world: &self.world,
            player: &mut self.player,
            inventory: &mut self.inventory,
            network: &mut self.network,
            features: &self.flags,
            strict: &self.strict,
        }
    }

    pub fn set(&self, pos: BlockPos, block: BlockId) {
        self.world.set_block(pos, block);
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}
