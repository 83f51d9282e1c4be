//! Serverbound packets the engine emits, independent of any wire encoding.

use crate::interaction::hit::HitResult;
use crate::interaction::slot::HotbarSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hand {
    #[default]
    MainHand,
    OffHand,
}

/// Player state changes announced through the player-command packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    PressShiftKey,
    ReleaseShiftKey,
    StartSprinting,
    StopSprinting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerboundPacket {
    /// Right-click on a block face. `sequence` lets the server acknowledge the
    /// client's predicted block change.
    UseItemOn {
        hand: Hand,
        hit: HitResult,
        sequence: u32,
    },
    Swing {
        hand: Hand,
    },
    MovePlayerPosRot {
        x: f64,
        y: f64,
        z: f64,
        yaw: f32,
        pitch: f32,
        on_ground: bool,
    },
    MovePlayerPos {
        x: f64,
        y: f64,
        z: f64,
        on_ground: bool,
    },
    MovePlayerRot {
        yaw: f32,
        pitch: f32,
        on_ground: bool,
    },
    MovePlayerStatusOnly {
        on_ground: bool,
    },
    PlayerCommand {
        entity_id: i32,
        command: PlayerCommand,
    },
    SetCarriedItem {
        slot: HotbarSlot,
    },
}

impl ServerboundPacket {
    pub fn name(&self) -> &'static str {
        match self {
            ServerboundPacket::UseItemOn { .. } => "use_item_on",
            ServerboundPacket::Swing { .. } => "swing",
            ServerboundPacket::MovePlayerPosRot { .. } => "move_player_pos_rot",
            ServerboundPacket::MovePlayerPos { .. } => "move_player_pos",
            ServerboundPacket::MovePlayerRot { .. } => "move_player_rot",
            ServerboundPacket::MovePlayerStatusOnly { .. } => "move_player_status_only",
            ServerboundPacket::PlayerCommand { .. } => "player_command",
            ServerboundPacket::SetCarriedItem { .. } => "set_carried_item",
        }
    }

    /// One of the four move-player variants.
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            ServerboundPacket::MovePlayerPosRot { .. }
                | ServerboundPacket::MovePlayerPos { .. }
                | ServerboundPacket::MovePlayerRot { .. }
                | ServerboundPacket::MovePlayerStatusOnly { .. }
        )
    }

    pub fn carries_position(&self) -> bool {
        matches!(
            self,
            ServerboundPacket::MovePlayerPosRot { .. } | ServerboundPacket::MovePlayerPos { .. }
        )
    }
}
