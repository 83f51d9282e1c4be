pub mod block;
pub mod chunk;
pub mod direction;
pub mod position;

use std::sync::Arc;

use block::{BlockId, BlockState, Palette};
use chunk::Chunk;
use dashmap::DashMap;
use position::{BlockPos, ChunkPos};

/// Read access to block state, as seen by interaction logic.
pub trait BlockView {
    fn block_state(&self, pos: BlockPos) -> BlockState;
}

/// The client's mirror of the block world. Thread-safe, lock-sharded by chunk.
///
/// Stores opaque ids; the [`Palette`] given at construction classifies them.
pub struct World {
    chunks: DashMap<ChunkPos, Chunk>,
    palette: Arc<dyn Palette>,
}

impl World {
    pub fn new(palette: Arc<dyn Palette>) -> Self {
        Self {
            chunks: DashMap::new(),
            palette,
        }
    }

    /// Read a block at an absolute position. Returns AIR for unloaded chunks.
    pub fn get_block(&self, pos: BlockPos) -> BlockId {
        match self.chunks.get(&pos.chunk()) {
            Some(chunk) => chunk.get_block(pos.local()),
            None => BlockId::AIR,
        }
    }

    /// Write a block at an absolute position, creating the chunk if needed.
    ///
    /// Takes `&self` because `DashMap` shards its own locks, so a predicted
    /// placement can write while other holders keep reading.
    pub fn set_block(&self, pos: BlockPos, block: BlockId) {
        self.chunks
            .entry(pos.chunk())
            .or_default()
            .set_block(pos.local(), block);
    }

    pub fn has_chunk(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    pub fn insert_chunk(&self, pos: ChunkPos, chunk: Chunk) {
        self.chunks.insert(pos, chunk);
    }

    pub fn unload_chunk(&self, pos: ChunkPos) -> bool {
        self.chunks.remove(&pos).is_some()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn palette(&self) -> &dyn Palette {
        self.palette.as_ref()
    }

    /// Fill a square of chunk columns with the given `(y, block)` layers.
    pub fn generate_flat(&self, chunk_radius: i32, layers: &[(i32, BlockId)]) {
        for cx in -chunk_radius..chunk_radius {
            for cz in -chunk_radius..chunk_radius {
                let mut chunk = Chunk::new();
                for &(y, block) in layers {
                    chunk.fill_layer(y, block);
                }
                self.insert_chunk(ChunkPos::new(cx, cz), chunk);
            }
        }
    }
}

impl BlockView for World {
    fn block_state(&self, pos: BlockPos) -> BlockState {
        self.palette.state(self.get_block(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::block::{Fluid, SimplePalette};
    use super::*;

    #[test]
    fn block_state_goes_through_palette() {
        let water = BlockId(80);
        let palette = SimplePalette::new().with(BlockState::fluid(water, Fluid::Source));
        let world = World::new(Arc::new(palette));
        world.generate_flat(1, &[(0, BlockId(1))]);

        let pos = BlockPos::new(0, 1, 0);
        world.set_block(pos, water);

        assert_eq!(world.chunk_count(), 4);
        assert!(world.block_state(BlockPos::new(5, 0, -3)).can_place_against());
        assert_eq!(world.block_state(pos).fluid, Fluid::Source);
        assert!(world.block_state(BlockPos::new(0, 2, 0)).air);
        // Unloaded chunks read as air.
        assert!(world.block_state(BlockPos::new(100, 0, 100)).air);
    }
}
