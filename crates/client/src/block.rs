//! Vanilla block classification over azalea block state ids.
//!
//! Engine `BlockId`s in this client are protocol block state ids, so the
//! palette asks azalea what each id is and caches the answer.

use azalea_block::{BlockState as McBlockState, BlockTrait};
use azalea_registry::builtin::{BlockKind, ItemKind};
use dashmap::DashMap;
use hookline_engine::world::block::{BlockId, BlockState, Fluid, Palette};

// ── Block lists ─────────────────────────────────────────────────────────

const AIR_BLOCKS: &[&str] = &["air", "cave_air", "void_air"];

const FLUID_BLOCKS: &[&str] = &["water", "lava", "bubble_column"];

/// Blocks whose right-click does something other than accept a placement.
const SNEAK_BLOCKS: &[&str] = &[
    "chest",
    "trapped_chest",
    "ender_chest",
    "barrel",
    "furnace",
    "blast_furnace",
    "smoker",
    "crafting_table",
    "enchanting_table",
    "brewing_stand",
    "anvil",
    "chipped_anvil",
    "damaged_anvil",
    "hopper",
    "dispenser",
    "dropper",
    "beacon",
    "lever",
    "repeater",
    "comparator",
    "note_block",
    "loom",
    "cartography_table",
    "grindstone",
    "stonecutter",
    "smithing_table",
    "lectern",
    "bell",
    "cake",
    "respawn_anchor",
    "crafter",
];

/// Name suffixes covering whole block families (colours, wood types).
const SNEAK_SUFFIXES: &[&str] = &["shulker_box", "_bed", "_button", "_trapdoor", "_fence_gate", "_door"];

/// Interactive blocks that still accept placement (iron opens by redstone only).
const SNEAK_EXCEPTIONS: &[&str] = &["iron_door", "iron_trapdoor"];

pub fn is_sneak_block_name(name: &str) -> bool {
    if SNEAK_EXCEPTIONS.contains(&name) {
        return false;
    }
    SNEAK_BLOCKS.contains(&name) || SNEAK_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Classify one protocol state id. Ids azalea doesn't know are plain solids.
pub fn classify(id: BlockId) -> BlockState {
    let Ok(mc) = McBlockState::try_from(u32::from(id.0)) else {
        return BlockState::solid(id);
    };
    let block: Box<dyn BlockTrait> = Box::<dyn BlockTrait>::from(mc);
    let name = block.id().to_string();

    if AIR_BLOCKS.contains(&name.as_str()) {
        return BlockState::air(id);
    }
    if FLUID_BLOCKS.contains(&name.as_str()) {
        // Only still water and lava report level 0; bubble columns are
        // always sources.
        let source = block
            .property_map()
            .into_iter()
            .find(|(key, _)| key.to_string() == "level")
            .is_none_or(|(_, value)| value.to_string() == "0");
        return BlockState::fluid(id, if source { Fluid::Source } else { Fluid::Flowing });
    }

    let state = BlockState::solid(id);
    if is_sneak_block_name(&name) {
        state.with_sneak()
    } else {
        state
    }
}

/// Protocol state id of a block kind's default state.
pub fn block_id(kind: BlockKind) -> BlockId {
    BlockId(u32::from(McBlockState::from(kind)) as u16)
}

/// Azalea state for an engine id, AIR when the id is out of range.
pub fn to_mc(id: BlockId) -> McBlockState {
    McBlockState::try_from(u32::from(id.0)).unwrap_or(McBlockState::AIR)
}

/// Block placed by using `item`, if any.
///
/// Item and block names coincide for most blocks: `ItemKind::OakPlanks`
/// displays as "minecraft:oak_planks", which parses back as a `BlockKind`.
pub fn item_to_block(item: ItemKind) -> Option<BlockKind> {
    match item {
        ItemKind::WaterBucket => return Some(BlockKind::Water),
        ItemKind::LavaBucket => return Some(BlockKind::Lava),
        _ => {}
    }

    let full = item.to_string();
    let name = full.strip_prefix("minecraft:").unwrap_or(&full);
    name.parse::<BlockKind>().ok()
}

// ── Palette ─────────────────────────────────────────────────────────────

/// [`Palette`] over the vanilla block registry, memoised per id.
#[derive(Default)]
pub struct VanillaPalette {
    cache: DashMap<BlockId, BlockState>,
}

impl VanillaPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl Palette for VanillaPalette {
    fn state(&self, id: BlockId) -> BlockState {
        if let Some(state) = self.cache.get(&id) {
            return *state;
        }
        let state = classify(id);
        self.cache.insert(id, state);
        state
    }
}
