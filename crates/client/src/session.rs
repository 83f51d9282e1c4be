//! One connected player: world mirror, player entity, hotbar, and the engine
//! pieces wired together.

use std::sync::Arc;

use anyhow::{Context, Result};
use hookline_engine::event::EventBus;
use hookline_engine::host::{InteractContext, PacketSink};
use hookline_engine::interaction::{
    ExecutionMode, HotbarSlot, Interactor, NcpDirections, Rotation, RotationCallback, SwingMode,
};
use hookline_engine::module::{Module, ModuleRegistry};
use hookline_engine::movement::{MovementInput, PlayerHooks, TickOutcome};
use hookline_engine::packet::ServerboundPacket;
use hookline_engine::world::position::{BlockPos, Vec3};
use hookline_engine::world::{BlockView, World};

use crate::block;
use crate::config::ClientConfig;
use crate::inventory::{Hotbar, HotbarState};
use crate::net::ChannelSink;
use crate::player::ClientPlayer;

/// Placement settings applied to every `place_block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementSettings {
    pub strict: bool,
    pub mode: ExecutionMode,
    pub swing: SwingMode,
}

/// Reports the aim to the server as a bare look packet when a placement
/// starts, without turning the camera. On exit the server gets back the look
/// the movement pipeline last sent, so its recorded state stays true.
struct PacketAim {
    network: ChannelSink,
    on_ground: bool,
    restore: Rotation,
}

impl PacketAim {
    fn send_look(&mut self, look: Rotation) {
        let packet = ServerboundPacket::MovePlayerRot {
            yaw: look.yaw,
            pitch: look.pitch,
            on_ground: self.on_ground,
        };
        if let Err(err) = self.network.send(packet) {
            tracing::warn!("Dropped aim packet: {:#}", err);
        }
    }
}

impl RotationCallback for PacketAim {
    fn handle_rotation(&mut self, entering: bool, angles: Rotation) {
        if entering {
            self.send_look(angles);
        } else {
            self.send_look(self.restore);
        }
    }
}

pub struct Session {
    world: Arc<World>,
    player: ClientPlayer,
    hotbar: Hotbar,
    network: ChannelSink,
    bus: EventBus,
    hooks: PlayerHooks,
    interactor: Interactor,
    modules: ModuleRegistry,
    strict: NcpDirections,
    placement: PlacementSettings,
    ticks: u64,
}

impl Session {
    pub fn new(config: &ClientConfig, world: Arc<World>, network: ChannelSink) -> Result<Self> {
        let [x, y, z] = config.spawn;
        let hotbar_state = Arc::new(HotbarState::new());
        let player = ClientPlayer::new(
            config.entity_id,
            Vec3::new(x, y, z),
            Arc::clone(&world),
            Arc::clone(&hotbar_state),
            network.clone(),
        );

        let mut modules = ModuleRegistry::standard();
        for name in &config.enabled_modules {
            modules
                .set_enabled(name, true)
                .with_context(|| format!("enabling module {}", name))?;
        }

        tracing::info!(
            "Session for {} (entity {}) at ({:.1}, {:.1}, {:.1})",
            config.player_name,
            config.entity_id,
            x,
            y,
            z
        );

        Ok(Self {
            hooks: PlayerHooks::new(player.snapshot().sample),
            hotbar: Hotbar::new(hotbar_state, network.clone()),
            world,
            player,
            network,
            bus: EventBus::new(),
            interactor: Interactor::new(),
            modules,
            strict: NcpDirections,
            placement: PlacementSettings {
                strict: config.strict_direction,
                mode: config.placement.into(),
                swing: config.swing.into(),
            },
            ticks: 0,
        })
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    pub fn player(&self) -> &ClientPlayer {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut ClientPlayer {
        &mut self.player
    }

    pub fn hotbar(&self) -> &Hotbar {
        &self.hotbar
    }

    pub fn hotbar_mut(&mut self) -> &mut Hotbar {
        &mut self.hotbar
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn hooks(&self) -> &PlayerHooks {
        &self.hooks
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    pub fn modules_mut(&mut self) -> &mut ModuleRegistry {
        &mut self.modules
    }

    pub fn placement(&self) -> PlacementSettings {
        self.placement
    }

    pub fn set_placement(&mut self, placement: PlacementSettings) {
        self.placement = placement;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn module_active(&self, name: &str) -> bool {
        self.modules.get(name).is_some_and(Module::is_active)
    }

    // ── Tick ────────────────────────────────────────────────────────────

    /// Advance one game tick: input, movement, scaffold, movement packets.
    pub fn tick(&mut self, input: MovementInput) -> Result<TickOutcome> {
        let mut input = input;
        self.hooks
            .tick_movement(&mut input, self.player.is_riding(), &mut self.bus);
        self.player.travel(&input);

        if self.module_active("Scaffold") {
            self.scaffold()?;
        }

        let snapshot = self.player.snapshot();
        let outcome = self
            .hooks
            .send_movement_packets(&snapshot, &mut self.bus, &mut self.network)?;
        self.ticks += 1;
        Ok(outcome)
    }

    /// Fill the cell under the player's feet if it is open.
    pub fn scaffold(&mut self) -> Result<bool> {
        let target = self.player.feet().below();
        if !self.world.block_state(target).is_replaceable() {
            return Ok(false);
        }
        let Some(slot) = self.block_slot() else {
            tracing::debug!("Scaffold has no blocks in the hotbar");
            return Ok(false);
        };
        self.place_block(target, slot)
    }

    /// First hotbar slot holding something placeable.
    pub fn block_slot(&self) -> Option<HotbarSlot> {
        let state = self.hotbar.state();
        HotbarSlot::all().find(|slot| state.item(*slot).and_then(block::item_to_block).is_some())
    }

    // ── Placement ───────────────────────────────────────────────────────

    /// Place into `target` holding `slot`, with the session's placement
    /// settings. Aims first when the Rotations module is on.
    pub fn place_block(&mut self, target: BlockPos, slot: HotbarSlot) -> Result<bool> {
        let last = self.hooks.pipeline().last_sent();
        let mut aim = PacketAim {
            network: self.network.clone(),
            on_ground: last.on_ground,
            restore: Rotation::new(last.yaw, last.pitch),
        };
        let rotation: Option<&mut dyn RotationCallback> = if self.module_active("Rotations") {
            Some(&mut aim)
        } else {
            None
        };

        let PlacementSettings { strict, mode, swing } = self.placement;
        let mut cx = InteractContext {
            world: self.world.as_ref(),
            player: &mut self.player,
            inventory: &mut self.hotbar,
            network: &mut self.network,
            features: &self.modules,
            strict: &self.strict,
        };
        self.interactor
            .place_block(&mut cx, target, slot, strict, mode, swing, rotation)
    }
}
