use super::block::BlockId;
use super::position::LocalBlockPos;
use std::collections::HashMap;

/// Number of blocks along each axis of a chunk section.
pub const SECTION_SIZE: usize = 16;
const SECTION_VOLUME: usize = SECTION_SIZE * SECTION_SIZE * SECTION_SIZE;

/// A 16x16x16 cube of blocks, flat in YZX order.
#[derive(Clone)]
pub struct ChunkSection {
    blocks: Box<[BlockId]>,
    non_air: u16,
}

impl ChunkSection {
    pub fn new_empty() -> Self {
        Self {
            blocks: vec![BlockId::AIR; SECTION_VOLUME].into_boxed_slice(),
            non_air: 0,
        }
    }

    #[inline]
    const fn index(x: u8, y: u8, z: u8) -> usize {
        (y as usize) * SECTION_SIZE * SECTION_SIZE + (z as usize) * SECTION_SIZE + (x as usize)
    }

    #[inline]
    pub fn get(&self, x: u8, y: u8, z: u8) -> BlockId {
        self.blocks[Self::index(x, y, z)]
    }

    pub fn set(&mut self, x: u8, y: u8, z: u8, block: BlockId) {
        let slot = &mut self.blocks[Self::index(x, y, z)];
        match (*slot == BlockId::AIR, block == BlockId::AIR) {
            (true, false) => self.non_air += 1,
            (false, true) => self.non_air -= 1,
            _ => {}
        }
        *slot = block;
    }

    pub fn is_empty(&self) -> bool {
        self.non_air == 0
    }

    pub fn non_air_count(&self) -> u16 {
        self.non_air
    }
}

/// A column of chunk sections keyed by section index (y >> 4).
///
/// Only non-empty sections are stored.
#[derive(Clone, Default)]
pub struct Chunk {
    sections: HashMap<i32, ChunkSection>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_block(&self, pos: LocalBlockPos) -> BlockId {
        self.sections
            .get(&pos.section_index())
            .map_or(BlockId::AIR, |s| s.get(pos.x, pos.section_local_y(), pos.z))
    }

    pub fn set_block(&mut self, pos: LocalBlockPos, block: BlockId) {
        let section_idx = pos.section_index();

        if block == BlockId::AIR {
            if let Some(section) = self.sections.get_mut(&section_idx) {
                section.set(pos.x, pos.section_local_y(), pos.z, block);
                if section.is_empty() {
                    self.sections.remove(&section_idx);
                }
            }
        } else {
            self.sections
                .entry(section_idx)
                .or_insert_with(ChunkSection::new_empty)
                .set(pos.x, pos.section_local_y(), pos.z, block);
        }
    }

    /// Fill one horizontal layer of the column.
    pub fn fill_layer(&mut self, y: i32, block: BlockId) {
        for x in 0..SECTION_SIZE as u8 {
            for z in 0..SECTION_SIZE as u8 {
                self.set_block(LocalBlockPos { x, y, z }, block);
            }
        }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_last_block_drops_section() {
        let mut chunk = Chunk::new();
        let pos = LocalBlockPos { x: 3, y: -5, z: 9 };
        chunk.set_block(pos, BlockId(7));
        assert_eq!(chunk.section_count(), 1);
        assert_eq!(chunk.get_block(pos), BlockId(7));

        chunk.set_block(pos, BlockId::AIR);
        assert_eq!(chunk.section_count(), 0);
        assert_eq!(chunk.get_block(pos), BlockId::AIR);
    }

    #[test]
    fn fill_layer_counts_blocks() {
        let mut chunk = Chunk::new();
        chunk.fill_layer(64, BlockId(1));
        assert_eq!(chunk.section_count(), 1);
        assert_eq!(chunk.get_block(LocalBlockPos { x: 15, y: 64, z: 0 }), BlockId(1));
        assert_eq!(chunk.get_block(LocalBlockPos { x: 15, y: 65, z: 0 }), BlockId::AIR);
    }
}
