//! Byte layout of the encoded serverbound packets.

use hookline_client::packets::{self, encode};
use hookline_engine::interaction::{HitResult, HotbarSlot};
use hookline_engine::packet::{Hand, PlayerCommand, ServerboundPacket};
use hookline_engine::world::direction::Direction;
use hookline_engine::world::position::BlockPos;

// ---------------------------------------------------------------------------
// Minimal reader
// ---------------------------------------------------------------------------

struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let (head, rest) = self.bytes.split_at(N);
        self.bytes = rest;
        head.try_into().unwrap()
    }

    fn varint(&mut self) -> u32 {
        let mut value = 0u32;
        for shift in (0..35).step_by(7) {
            let [byte] = self.take::<1>();
            value |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                break;
            }
        }
        value
    }

    fn bool(&mut self) -> bool {
        self.take::<1>()[0] != 0
    }

    fn i16(&mut self) -> i16 {
        i16::from_be_bytes(self.take())
    }

    fn i64(&mut self) -> i64 {
        i64::from_be_bytes(self.take())
    }

    fn f32(&mut self) -> f32 {
        f32::from_be_bytes(self.take())
    }

    fn f64(&mut self) -> f64 {
        f64::from_be_bytes(self.take())
    }

    fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn packed(pos: BlockPos) -> i64 {
    ((i64::from(pos.x) & 0x3FF_FFFF) << 38) | ((i64::from(pos.z) & 0x3FF_FFFF) << 12) | (i64::from(pos.y) & 0xFFF)
}

// ---------------------------------------------------------------------------
// Layouts
// ---------------------------------------------------------------------------

#[test]
fn use_item_on_layout() {
    let pos = BlockPos::new(1, 64, -2);
    let packet = ServerboundPacket::UseItemOn {
        hand: Hand::MainHand,
        hit: HitResult::build(pos, Direction::Up),
        sequence: 300,
    };
    let bytes = encode(&packet).unwrap();
    let mut r = Reader::new(&bytes);

    assert_eq!(r.varint(), packets::USE_ITEM_ON);
    assert_eq!(r.varint(), 0);
    assert_eq!(r.i64(), packed(pos));
    assert_eq!(r.varint(), 1);
    assert_eq!((r.f32(), r.f32(), r.f32()), (0.5, 1.0, 0.5));
    assert!(!r.bool());
    assert_eq!(r.varint(), 300);
    assert!(r.is_empty());
}

#[test]
fn full_move_layout() {
    let packet = ServerboundPacket::MovePlayerPosRot {
        x: 10.25,
        y: -999.0,
        z: -3.5,
        yaw: 45.0,
        pitch: -12.5,
        on_ground: true,
    };
    let bytes = encode(&packet).unwrap();
    let mut r = Reader::new(&bytes);

    assert_eq!(r.varint(), packets::MOVE_PLAYER_POS_ROT);
    assert_eq!((r.f64(), r.f64(), r.f64()), (10.25, -999.0, -3.5));
    assert_eq!((r.f32(), r.f32()), (45.0, -12.5));
    assert!(r.bool());
    assert!(r.is_empty());
}

#[test]
fn partial_moves_carry_only_their_fields() {
    let pos = encode(&ServerboundPacket::MovePlayerPos {
        x: 1.0,
        y: 2.0,
        z: 3.0,
        on_ground: false,
    })
    .unwrap();
    assert_eq!(pos.len(), 1 + 3 * 8 + 1);
    assert_eq!(u32::from(pos[0]), packets::MOVE_PLAYER_POS);

    let rot = encode(&ServerboundPacket::MovePlayerRot {
        yaw: 1.0,
        pitch: 2.0,
        on_ground: false,
    })
    .unwrap();
    assert_eq!(rot.len(), 1 + 2 * 4 + 1);
    assert_eq!(u32::from(rot[0]), packets::MOVE_PLAYER_ROT);
}

#[test]
fn player_command_layout() {
    let bytes = encode(&ServerboundPacket::PlayerCommand {
        entity_id: 42,
        command: PlayerCommand::StartSprinting,
    })
    .unwrap();
    assert_eq!(bytes, vec![packets::PLAYER_COMMAND as u8, 42, 3, 0]);

    let bytes = encode(&ServerboundPacket::PlayerCommand {
        entity_id: 42,
        command: PlayerCommand::ReleaseShiftKey,
    })
    .unwrap();
    assert_eq!(bytes[2], 1);
}

#[test]
fn set_carried_item_is_a_short() {
    let bytes = encode(&ServerboundPacket::SetCarriedItem {
        slot: HotbarSlot::new(7).unwrap(),
    })
    .unwrap();
    let mut r = Reader::new(&bytes);
    assert_eq!(r.varint(), packets::SET_CARRIED_ITEM);
    assert_eq!(r.i16(), 7);
    assert!(r.is_empty());
}
