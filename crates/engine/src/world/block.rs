use std::collections::HashMap;

/// Opaque block identifier. The engine stores these without interpreting them;
/// a [`Palette`] supplies the few properties interaction logic cares about.
///
/// `BlockId::AIR` (0) is the empty block: chunk sections holding only AIR are
/// deallocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockId(pub u16);

impl BlockId {
    pub const AIR: BlockId = BlockId(0);

    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

/// Fluid content of a block cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fluid {
    #[default]
    Empty,
    Source,
    Flowing,
}

impl Fluid {
    pub const fn is_empty(self) -> bool {
        matches!(self, Fluid::Empty)
    }
}

/// What the interaction layer needs to know about a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockState {
    pub id: BlockId,
    pub air: bool,
    pub fluid: Fluid,
    /// Clicking this block uses it (opens a container, flips a lever) unless
    /// the player is crouching.
    pub needs_sneak: bool,
}

impl BlockState {
    pub const AIR: BlockState = BlockState::air(BlockId::AIR);

    pub const fn air(id: BlockId) -> Self {
        Self {
            id,
            air: true,
            fluid: Fluid::Empty,
            needs_sneak: false,
        }
    }

    pub const fn solid(id: BlockId) -> Self {
        Self {
            id,
            air: false,
            fluid: Fluid::Empty,
            needs_sneak: false,
        }
    }

    pub const fn fluid(id: BlockId, fluid: Fluid) -> Self {
        Self {
            id,
            air: false,
            fluid,
            needs_sneak: false,
        }
    }

    pub const fn with_sneak(mut self) -> Self {
        self.needs_sneak = true;
        self
    }

    /// Can a placed block take this cell?
    pub const fn is_replaceable(&self) -> bool {
        self.air || !self.fluid.is_empty()
    }

    /// Can a new block be placed against a face of this one?
    pub const fn can_place_against(&self) -> bool {
        !self.air && self.fluid.is_empty()
    }
}

/// Maps opaque ids to interaction properties.
pub trait Palette: Send + Sync {
    fn state(&self, id: BlockId) -> BlockState;
}

/// Table-backed palette. `BlockId::AIR` is air, unlisted ids are plain solids.
#[derive(Debug, Clone, Default)]
pub struct SimplePalette {
    entries: HashMap<BlockId, BlockState>,
}

impl SimplePalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, state: BlockState) {
        self.entries.insert(state.id, state);
    }

    pub fn with(mut self, state: BlockState) -> Self {
        self.insert(state);
        self
    }
}

impl Palette for SimplePalette {
    fn state(&self, id: BlockId) -> BlockState {
        match self.entries.get(&id) {
            Some(state) => *state,
            None if id == BlockId::AIR => BlockState::AIR,
            None => BlockState::solid(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_palette_defaults() {
        let water = BlockId(80);
        let palette = SimplePalette::new().with(BlockState::fluid(water, Fluid::Source));

        assert!(palette.state(BlockId::AIR).air);
        assert!(palette.state(BlockId(1)).can_place_against());
        assert!(!palette.state(water).can_place_against());
        assert!(palette.state(water).is_replaceable());
    }
}
