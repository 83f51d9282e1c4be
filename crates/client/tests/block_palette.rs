use azalea_registry::builtin::{BlockKind, ItemKind};
use hookline_client::block::{self, VanillaPalette};
use hookline_engine::world::block::{BlockId, Palette};

#[test]
fn air_variants_are_air() {
    let palette = VanillaPalette::new();
    assert!(palette.state(BlockId::AIR).air);
    assert!(palette.state(block::block_id(BlockKind::CaveAir)).air);
}

#[test]
fn fluids_are_replaceable_but_not_supports() {
    let palette = VanillaPalette::new();
    for kind in [BlockKind::Water, BlockKind::Lava] {
        let state = palette.state(block::block_id(kind));
        assert!(!state.fluid.is_empty(), "{:?}", kind);
        assert!(state.is_replaceable());
        assert!(!state.can_place_against());
    }
}

#[test]
fn containers_need_sneak() {
    let palette = VanillaPalette::new();
    let chest = palette.state(block::block_id(BlockKind::Chest));
    assert!(chest.needs_sneak);
    assert!(chest.can_place_against());

    let stone = palette.state(block::block_id(BlockKind::Stone));
    assert!(!stone.needs_sneak);
    assert!(stone.can_place_against());
}

#[test]
fn classification_is_cached() {
    let palette = VanillaPalette::new();
    let stone = block::block_id(BlockKind::Stone);
    palette.state(stone);
    palette.state(stone);
    assert_eq!(palette.cached(), 1);
}

#[test]
fn items_map_to_blocks() {
    assert_eq!(block::item_to_block(ItemKind::OakPlanks), Some(BlockKind::OakPlanks));
    assert_eq!(block::item_to_block(ItemKind::Cobblestone), Some(BlockKind::Cobblestone));
    assert_eq!(block::item_to_block(ItemKind::WaterBucket), Some(BlockKind::Water));
    assert_eq!(block::item_to_block(ItemKind::DiamondPickaxe), None);
}
