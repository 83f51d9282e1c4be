//! Per-tick movement packet selection.
//!
//! Replaces the game's own send: announces the tick to listeners, then sends
//! the smallest move packet that carries what changed since the last one.

use anyhow::Result;

use super::{MovementSample, PlayerSnapshot};
use crate::event::player::MovementPacketsEvent;
use crate::event::{Event, EventBus, Stage};
use crate::host::PacketSink;
use crate::packet::{PlayerCommand, ServerboundPacket};
use crate::world::position::Vec3;

/// Position deltas at or below this length are not reported.
pub const POSITION_THRESHOLD: f64 = 2.0e-4;

/// A position packet is forced after this many ticks without one.
pub const POSITION_RESYNC_TICKS: u32 = 20;

/// Y sent in place of a position while riding.
pub const VEHICLE_SENTINEL_Y: f64 = -999.0;

/// Which move packet a tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Position+look packet carrying vehicle velocity and the sentinel Y.
    Vehicle,
    Full,
    Position,
    Look,
    GroundOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A PRE listener cancelled the tick. Nothing was sent.
    Vetoed,
    /// No move packet was needed (or the player is not the camera).
    Idle,
    Sent(MoveKind),
}

// ── Pipeline state ──────────────────────────────────────────────────────

/// What the server was last told. Fields only change once the packet
/// carrying them has been handed to the sink.
#[derive(Debug, Clone)]
pub struct MovementPipeline {
    last: MovementSample,
    last_sneaking: bool,
    last_sprinting: bool,
    ticks_since_position: u32,
}

impl MovementPipeline {
    pub fn new(initial: MovementSample) -> Self {
        Self {
            last: initial,
            last_sneaking: false,
            last_sprinting: false,
            ticks_since_position: 0,
        }
    }

    pub fn last_sent(&self) -> MovementSample {
        self.last
    }

    pub fn ticks_since_position(&self) -> u32 {
        self.ticks_since_position
    }

    /// Run one tick of movement reporting.
    pub fn send_movement_packets(
        &mut self,
        player: &PlayerSnapshot,
        bus: &mut EventBus,
        network: &mut dyn PacketSink,
    ) -> Result<TickOutcome> {
        let mut event = MovementPacketsEvent::new(Stage::Pre, player.sample);
        bus.dispatch(&mut event);
        if event.is_canceled() {
            tracing::trace!("Movement packets vetoed by listener");
            return Ok(TickOutcome::Vetoed);
        }
        let sample = event.sample;

        self.send_sprinting(player, network)?;
        self.send_sneaking(player, network)?;

        let sent = if player.is_camera {
            self.send_move(sample, player.vehicle_velocity, network)?
        } else {
            None
        };

        event.set_stage(Stage::Post);
        bus.dispatch(&mut event);

        Ok(sent.map_or(TickOutcome::Idle, TickOutcome::Sent))
    }

    fn send_sprinting(&mut self, player: &PlayerSnapshot, network: &mut dyn PacketSink) -> Result<()> {
        if player.sprinting == self.last_sprinting {
            return Ok(());
        }
        let command = if player.sprinting {
            PlayerCommand::StartSprinting
        } else {
            PlayerCommand::StopSprinting
        };
        network.send(ServerboundPacket::PlayerCommand {
            entity_id: player.entity_id,
            command,
        })?;
        self.last_sprinting = player.sprinting;
        Ok(())
    }

    fn send_sneaking(&mut self, player: &PlayerSnapshot, network: &mut dyn PacketSink) -> Result<()> {
        if player.sneaking == self.last_sneaking {
            return Ok(());
        }
        let command = if player.sneaking {
            PlayerCommand::PressShiftKey
        } else {
            PlayerCommand::ReleaseShiftKey
        };
        network.send(ServerboundPacket::PlayerCommand {
            entity_id: player.entity_id,
            command,
        })?;
        self.last_sneaking = player.sneaking;
        Ok(())
    }

    fn send_move(
        &mut self,
        sample: MovementSample,
        vehicle_velocity: Option<Vec3>,
        network: &mut dyn PacketSink,
    ) -> Result<Option<MoveKind>> {
        self.ticks_since_position = self.ticks_since_position.saturating_add(1);

        let delta = sample.position() - self.last.position();
        let mut position_changed = delta.length_squared() > POSITION_THRESHOLD * POSITION_THRESHOLD
            || self.ticks_since_position >= POSITION_RESYNC_TICKS;
        let rotation_changed = sample.yaw != self.last.yaw || sample.pitch != self.last.pitch;

        let MovementSample {
            x,
            y,
            z,
            yaw,
            pitch,
            on_ground,
        } = sample;

        let (kind, packet) = if let Some(velocity) = vehicle_velocity {
            position_changed = false;
            (
                MoveKind::Vehicle,
                ServerboundPacket::MovePlayerPosRot {
                    x: velocity.x,
                    y: VEHICLE_SENTINEL_Y,
                    z: velocity.z,
                    yaw,
                    pitch,
                    on_ground,
                },
            )
        } else if position_changed && rotation_changed {
            (
                MoveKind::Full,
                ServerboundPacket::MovePlayerPosRot {
                    x,
                    y,
                    z,
                    yaw,
                    pitch,
                    on_ground,
                },
            )
        } else if position_changed {
            (MoveKind::Position, ServerboundPacket::MovePlayerPos { x, y, z, on_ground })
        } else if rotation_changed {
            (MoveKind::Look, ServerboundPacket::MovePlayerRot { yaw, pitch, on_ground })
        } else if on_ground != self.last.on_ground {
            (MoveKind::GroundOnly, ServerboundPacket::MovePlayerStatusOnly { on_ground })
        } else {
            self.last.on_ground = on_ground;
            return Ok(None);
        };

        network.send(packet)?;
        tracing::debug!("Sent {:?} move at ({:.3}, {:.3}, {:.3})", kind, x, y, z);

        if position_changed {
            self.last.x = x;
            self.last.y = y;
            self.last.z = z;
            self.ticks_since_position = 0;
        }
        if rotation_changed {
            self.last.yaw = yaw;
            self.last.pitch = pitch;
        }
        self.last.on_ground = on_ground;
        Ok(Some(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collect(Vec<ServerboundPacket>);

    impl PacketSink for Collect {
        fn send(&mut self, packet: ServerboundPacket) -> Result<()> {
            self.0.push(packet);
            Ok(())
        }

        fn send_sequenced(&mut self, build: &mut dyn FnMut(u32) -> ServerboundPacket) -> Result<u32> {
            self.0.push(build(0));
            Ok(0)
        }
    }

    #[test]
    fn riding_forever_does_not_overflow_the_resync_counter() {
        let mut pipeline = MovementPipeline::new(MovementSample::default());
        pipeline.ticks_since_position = u32::MAX - 1;
        let riding = PlayerSnapshot {
            vehicle_velocity: Some(Vec3::new(0.2, 0.0, 0.0)),
            is_camera: true,
            ..Default::default()
        };
        let mut bus = EventBus::new();
        let mut network = Collect::default();

        for _ in 0..3 {
            let outcome = pipeline
                .send_movement_packets(&riding, &mut bus, &mut network)
                .unwrap();
            assert_eq!(outcome, TickOutcome::Sent(MoveKind::Vehicle));
        }
        assert_eq!(pipeline.ticks_since_position(), u32::MAX);
        assert_eq!(network.0.len(), 3);
    }
}
