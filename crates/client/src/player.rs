//! The local player entity.

use std::sync::Arc;

use anyhow::Result;
use hookline_engine::host::{LocalPlayer, PacketSink};
use hookline_engine::interaction::{HitResult, InteractionOutcome};
use hookline_engine::movement::{MovementInput, MovementSample, PlayerSnapshot};
use hookline_engine::packet::{Hand, ServerboundPacket};
use hookline_engine::world::position::{BlockPos, Vec3};
use hookline_engine::world::{BlockView, World};

use crate::block;
use crate::inventory::HotbarState;
use crate::net::ChannelSink;

pub const EYE_HEIGHT: f64 = 1.62;
pub const SNEAK_EYE_HEIGHT: f64 = 1.27;

/// Blocks per tick at full forward input.
pub const WALK_SPEED: f64 = 0.1;
pub const SPRINT_MULTIPLIER: f64 = 1.3;

pub struct ClientPlayer {
    entity_id: i32,
    position: Vec3,
    yaw: f32,
    pitch: f32,
    on_ground: bool,
    sneaking: bool,
    sprinting: bool,
    vehicle_velocity: Option<Vec3>,
    world: Arc<World>,
    hotbar: Arc<HotbarState>,
    network: ChannelSink,
    swings: u64,
}

impl ClientPlayer {
    pub fn new(
        entity_id: i32,
        position: Vec3,
        world: Arc<World>,
        hotbar: Arc<HotbarState>,
        network: ChannelSink,
    ) -> Self {
        Self {
            entity_id,
            position,
            yaw: 0.0,
            pitch: 0.0,
            on_ground: true,
            sneaking: false,
            sprinting: false,
            vehicle_velocity: None,
            world,
            hotbar,
            network,
            swings: 0,
        }
    }

    pub fn entity_id(&self) -> i32 {
        self.entity_id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn rotation(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }

    pub fn set_rotation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn set_on_ground(&mut self, on_ground: bool) {
        self.on_ground = on_ground;
    }

    pub fn set_sneaking(&mut self, sneaking: bool) {
        self.sneaking = sneaking;
    }

    pub fn set_sprinting(&mut self, sprinting: bool) {
        self.sprinting = sprinting;
    }

    pub fn is_riding(&self) -> bool {
        self.vehicle_velocity.is_some()
    }

    pub fn set_vehicle_velocity(&mut self, velocity: Option<Vec3>) {
        self.vehicle_velocity = velocity;
    }

    /// Local swing animations played so far.
    pub fn swings(&self) -> u64 {
        self.swings
    }

    /// Cell the player's feet are in.
    pub fn feet(&self) -> BlockPos {
        BlockPos::containing(self.position)
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            entity_id: self.entity_id,
            sample: MovementSample {
                x: self.position.x,
                y: self.position.y,
                z: self.position.z,
                yaw: self.yaw,
                pitch: self.pitch,
                on_ground: self.on_ground,
            },
            sneaking: self.sneaking,
            sprinting: self.sprinting,
            vehicle_velocity: self.vehicle_velocity,
            is_camera: true,
        }
    }

    /// Move horizontally by one tick of `input` along the current yaw.
    /// Yaw 0 faces +Z.
    pub fn travel(&mut self, input: &MovementInput) {
        if self.is_riding() {
            return;
        }
        let speed = if self.sprinting {
            WALK_SPEED * SPRINT_MULTIPLIER
        } else {
            WALK_SPEED
        };
        let (sin, cos) = f64::from(self.yaw).to_radians().sin_cos();
        let forward = f64::from(input.forward);
        let sideways = f64::from(input.sideways);
        let delta = Vec3::new(
            (-sin * forward + cos * sideways) * speed,
            0.0,
            (cos * forward + sin * sideways) * speed,
        );
        self.position = self.position + delta;
    }

    /// Whether a block at `pos` would overlap the player's two cells.
    fn occupies(&self, pos: BlockPos) -> bool {
        let feet = self.feet();
        pos == feet || pos == feet.above()
    }

    /// Client-side prediction of a click: a standing player uses blocks like
    /// chests instead of building on them. Otherwise place the held block when
    /// the target cell can take it.
    fn predict_placement(&self, hit: &HitResult) -> InteractionOutcome {
        if self.world.block_state(hit.block_pos).needs_sneak && !self.sneaking {
            tracing::debug!("Used block at {:?} instead of placing", hit.block_pos);
            return InteractionOutcome::SUCCESS;
        }
        let target = hit.placement_pos();
        let Some(item) = self.hotbar.server_item() else {
            return InteractionOutcome::PASS;
        };
        let Some(kind) = block::item_to_block(item) else {
            return InteractionOutcome::PASS;
        };
        if !self.world.block_state(target).is_replaceable() || self.occupies(target) {
            return InteractionOutcome::PASS;
        }
        self.world.set_block(target, block::block_id(kind));
        tracing::debug!("Predicted {:?} at {:?}", kind, target);
        InteractionOutcome::SUCCESS
    }
}

impl LocalPlayer for ClientPlayer {
    fn eye_position(&self) -> Vec3 {
        let height = if self.sneaking {
            SNEAK_EYE_HEIGHT
        } else {
            EYE_HEIGHT
        };
        self.position + Vec3::new(0.0, height, 0.0)
    }

    fn is_sneaking(&self) -> bool {
        self.sneaking
    }

    /// The server is told about every click, predicted or not, so its block
    /// acknowledgements line up with ours.
    fn interact_block(&mut self, hand: Hand, hit: &HitResult) -> Result<InteractionOutcome> {
        let outcome = match hand {
            Hand::MainHand => self.predict_placement(hit),
            Hand::OffHand => InteractionOutcome::PASS,
        };
        self.network
            .send_sequenced(&mut |sequence| ServerboundPacket::UseItemOn {
                hand,
                hit: *hit,
                sequence,
            })?;
        Ok(outcome)
    }

    fn swing_hand(&mut self, _hand: Hand) {
        self.swings += 1;
    }
}
