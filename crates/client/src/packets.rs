//! Serverbound play-state encoding of engine packets.
//!
//! Packet ids and field layouts follow protocol 763 (Minecraft 1.20.1), the
//! version the movement heuristics were written against. Output is the
//! unframed packet body (id + fields); `net` adds length and compression.

use anyhow::Result;
use azalea_buf::{AzaleaWrite, AzaleaWriteVar};
use hookline_engine::packet::{Hand, PlayerCommand, ServerboundPacket};
use hookline_engine::world::position::BlockPos;

pub const MOVE_PLAYER_POS: u32 = 0x14;
pub const MOVE_PLAYER_POS_ROT: u32 = 0x15;
pub const MOVE_PLAYER_ROT: u32 = 0x16;
pub const MOVE_PLAYER_STATUS_ONLY: u32 = 0x17;
pub const PLAYER_COMMAND: u32 = 0x1E;
pub const SET_CARRIED_ITEM: u32 = 0x28;
pub const SWING: u32 = 0x2F;
pub const USE_ITEM_ON: u32 = 0x31;

pub fn packet_id(packet: &ServerboundPacket) -> u32 {
    match packet {
        ServerboundPacket::UseItemOn { .. } => USE_ITEM_ON,
        ServerboundPacket::Swing { .. } => SWING,
        ServerboundPacket::MovePlayerPosRot { .. } => MOVE_PLAYER_POS_ROT,
        ServerboundPacket::MovePlayerPos { .. } => MOVE_PLAYER_POS,
        ServerboundPacket::MovePlayerRot { .. } => MOVE_PLAYER_ROT,
        ServerboundPacket::MovePlayerStatusOnly { .. } => MOVE_PLAYER_STATUS_ONLY,
        ServerboundPacket::PlayerCommand { .. } => PLAYER_COMMAND,
        ServerboundPacket::SetCarriedItem { .. } => SET_CARRIED_ITEM,
    }
}

fn hand_id(hand: Hand) -> u32 {
    match hand {
        Hand::MainHand => 0,
        Hand::OffHand => 1,
    }
}

fn command_id(command: PlayerCommand) -> u32 {
    match command {
        PlayerCommand::PressShiftKey => 0,
        PlayerCommand::ReleaseShiftKey => 1,
        PlayerCommand::StartSprinting => 3,
        PlayerCommand::StopSprinting => 4,
    }
}

pub fn to_mc_pos(pos: BlockPos) -> azalea_core::position::BlockPos {
    azalea_core::position::BlockPos::new(pos.x, pos.y, pos.z)
}

/// Encode `packet` as id + body.
pub fn encode(packet: &ServerboundPacket) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    packet_id(packet).azalea_write_var(&mut buf)?;

    match packet {
        ServerboundPacket::UseItemOn { hand, hit, sequence } => {
            hand_id(*hand).azalea_write_var(&mut buf)?;
            to_mc_pos(hit.block_pos).azalea_write(&mut buf)?;
            u32::from(hit.direction.ordinal()).azalea_write_var(&mut buf)?;
            // Cursor is relative to the block's minimum corner.
            let origin = hit.block_pos;
            ((hit.location.x - f64::from(origin.x)) as f32).azalea_write(&mut buf)?;
            ((hit.location.y - f64::from(origin.y)) as f32).azalea_write(&mut buf)?;
            ((hit.location.z - f64::from(origin.z)) as f32).azalea_write(&mut buf)?;
            hit.inside.azalea_write(&mut buf)?;
            sequence.azalea_write_var(&mut buf)?;
        }
        ServerboundPacket::Swing { hand } => {
            hand_id(*hand).azalea_write_var(&mut buf)?;
        }
        ServerboundPacket::MovePlayerPosRot {
            x,
            y,
            z,
            yaw,
            pitch,
            on_ground,
        } => {
            x.azalea_write(&mut buf)?;
            y.azalea_write(&mut buf)?;
            z.azalea_write(&mut buf)?;
            yaw.azalea_write(&mut buf)?;
            pitch.azalea_write(&mut buf)?;
            on_ground.azalea_write(&mut buf)?;
        }
        ServerboundPacket::MovePlayerPos { x, y, z, on_ground } => {
            x.azalea_write(&mut buf)?;
            y.azalea_write(&mut buf)?;
            z.azalea_write(&mut buf)?;
            on_ground.azalea_write(&mut buf)?;
        }
        ServerboundPacket::MovePlayerRot { yaw, pitch, on_ground } => {
            yaw.azalea_write(&mut buf)?;
            pitch.azalea_write(&mut buf)?;
            on_ground.azalea_write(&mut buf)?;
        }
        ServerboundPacket::MovePlayerStatusOnly { on_ground } => {
            on_ground.azalea_write(&mut buf)?;
        }
        ServerboundPacket::PlayerCommand { entity_id, command } => {
            (*entity_id as u32).azalea_write_var(&mut buf)?;
            command_id(*command).azalea_write_var(&mut buf)?;
            // Horse jump strength, unused by these commands.
            0u32.azalea_write_var(&mut buf)?;
        }
        ServerboundPacket::SetCarriedItem { slot } => {
            i16::from(slot.index()).azalea_write(&mut buf)?;
        }
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_is_two_bytes() {
        let bytes = encode(&ServerboundPacket::MovePlayerStatusOnly { on_ground: true }).unwrap();
        assert_eq!(bytes, vec![0x17, 0x01]);
    }

    #[test]
    fn swing_carries_hand() {
        let bytes = encode(&ServerboundPacket::Swing { hand: Hand::OffHand }).unwrap();
        assert_eq!(bytes, vec![0x2F, 0x01]);
    }
}
