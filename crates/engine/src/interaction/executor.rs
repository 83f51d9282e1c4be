//! Block placement: rotation window, slot spoof, the placement itself and the
//! hand swing, for both client-predicted and packet-only execution.

use anyhow::Result;

use super::direction::resolve;
use super::hit::HitResult;
use super::rotation::{Rotation, RotationCallback};
use super::slot::{HotbarSlot, with_slot};
use crate::host::{InteractContext, LocalPlayer, PacketSink};
use crate::packet::{Hand, ServerboundPacket};
use crate::world::BlockView;
use crate::world::position::BlockPos;

/// How the placement reaches the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Through the player's own interaction logic, with local prediction.
    #[default]
    Local,
    /// A bare sequenced use-item-on packet. The world is left untouched until
    /// the server echoes the change.
    PacketOnly,
}

/// Where an accepted placement's hand swing shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwingMode {
    /// Animate locally only.
    #[default]
    Client,
    /// Send a swing packet instead of animating.
    Packet,
}

/// Result of an interaction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionOutcome {
    pub accepted: bool,
    /// Whether an accepted interaction should be followed by a hand swing.
    pub swing: bool,
}

impl InteractionOutcome {
    pub const SUCCESS: Self = Self {
        accepted: true,
        swing: true,
    };
    pub const CONSUME: Self = Self {
        accepted: true,
        swing: false,
    };
    pub const PASS: Self = Self {
        accepted: false,
        swing: false,
    };
}

/// Extension point for crouching around a placement against a block that
/// would otherwise be used (a chest, a lever) instead of built against.
///
/// Incomplete: the default methods do nothing, so such placements currently
/// open the block.
pub trait SneakHook {
    fn before_place(&mut self, _player: &mut dyn LocalPlayer, _network: &mut dyn PacketSink) -> Result<()> {
        Ok(())
    }

    fn after_place(&mut self, _player: &mut dyn LocalPlayer, _network: &mut dyn PacketSink) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoSneak;

impl SneakHook for NoSneak {}

/// Places blocks on behalf of modules.
pub struct Interactor {
    sneak: Box<dyn SneakHook>,
}

impl Default for Interactor {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactor {
    pub fn new() -> Self {
        Self::with_sneak_hook(Box::new(NoSneak))
    }

    pub fn with_sneak_hook(sneak: Box<dyn SneakHook>) -> Self {
        Self { sneak }
    }

    /// Place a block into `target`, choosing the face to click.
    ///
    /// Returns `Ok(false)` without touching the inventory, network or
    /// rotation when no face qualifies.
    #[allow(clippy::too_many_arguments)]
    pub fn place_block(
        &mut self,
        cx: &mut InteractContext<'_>,
        target: BlockPos,
        slot: HotbarSlot,
        strict: bool,
        mode: ExecutionMode,
        swing: SwingMode,
        rotation: Option<&mut dyn RotationCallback>,
    ) -> Result<bool> {
        let Some(direction) = resolve(cx, target, strict) else {
            tracing::debug!("No placeable face for {:?} (strict={})", target, strict);
            return Ok(false);
        };
        let neighbor = target.offset(direction.opposite());
        let hit = HitResult::build(neighbor, direction);
        self.place(cx, hit, slot, mode, swing, rotation)
    }

    /// Click `hit` holding `slot`.
    ///
    /// The rotation callback, when given, is entered before the slot is
    /// switched and exited after it is restored, even when the placement
    /// fails with an error.
    pub fn place(
        &mut self,
        cx: &mut InteractContext<'_>,
        hit: HitResult,
        slot: HotbarSlot,
        mode: ExecutionMode,
        swing: SwingMode,
        mut rotation: Option<&mut dyn RotationCallback>,
    ) -> Result<bool> {
        if let Some(callback) = rotation.as_deref_mut() {
            let angles = Rotation::between(cx.player.eye_position(), hit.location);
            callback.handle_rotation(true, angles);
        }

        let InteractContext {
            world,
            player,
            inventory,
            network,
            ..
        } = cx;
        let sneak = self.sneak.as_mut();
        let result = with_slot(&mut **inventory, slot, || {
            execute(sneak, *world, &mut **player, &mut **network, &hit, mode, swing)
        });

        if let Some(callback) = rotation {
            let angles = Rotation::between(cx.player.eye_position(), hit.location);
            callback.handle_rotation(false, angles);
        }

        let accepted = result?;
        tracing::debug!(
            "Placement at {:?} facing {} via {:?}: accepted={}",
            hit.block_pos,
            hit.direction,
            mode,
            accepted
        );
        Ok(accepted)
    }
}

fn execute(
    sneak: &mut dyn SneakHook,
    world: &dyn BlockView,
    player: &mut dyn LocalPlayer,
    network: &mut dyn PacketSink,
    hit: &HitResult,
    mode: ExecutionMode,
    swing: SwingMode,
) -> Result<bool> {
    let should_sneak = world.block_state(hit.block_pos).needs_sneak && !player.is_sneaking();
    if should_sneak {
        sneak.before_place(player, network)?;
    }

    let outcome = match mode {
        ExecutionMode::Local => player.interact_block(Hand::MainHand, hit),
        ExecutionMode::PacketOnly => network
            .send_sequenced(&mut |sequence| ServerboundPacket::UseItemOn {
                hand: Hand::MainHand,
                hit: *hit,
                sequence,
            })
            .map(|_| InteractionOutcome::SUCCESS),
    };

    let swung = outcome.and_then(|outcome| {
        if outcome.accepted && outcome.swing {
            match swing {
                SwingMode::Client => player.swing_hand(Hand::MainHand),
                SwingMode::Packet => network.send(ServerboundPacket::Swing {
                    hand: Hand::MainHand,
                })?,
            }
        }
        Ok(outcome.accepted)
    });

    // The crouch is released even when the click or swing failed.
    if should_sneak {
        let released = sneak.after_place(player, network);
        let accepted = swung?;
        released?;
        return Ok(accepted);
    }
    swung
}
