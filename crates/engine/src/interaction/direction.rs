//! Picking which face to click when placing a block at a target cell.

use crate::host::{Feature, InteractContext, StrictDirections};
use crate::world::BlockView;
use crate::world::direction::{Direction, DirectionSet};
use crate::world::position::{BlockPos, Vec3};

/// Half a block: eye offsets closer than this to the centre can see both
/// faces of that axis.
const FACE_MARGIN: f64 = 0.5;

/// Face of `target` to click, found by scanning the neighbours in
/// [`Direction::ALL`] order for one a block can be placed against.
///
/// With `strict`, the returned face must also be in `allowed`. The result is
/// the face of `target` itself, i.e. the opposite of the neighbour's side.
pub fn interact_direction(
    world: &dyn BlockView,
    allowed: DirectionSet,
    target: BlockPos,
    strict: bool,
) -> Option<Direction> {
    Direction::ALL
        .into_iter()
        .find(|&dir| {
            world.block_state(target.offset(dir)).can_place_against()
                && (!strict || allowed.contains(dir.opposite()))
        })
        .map(Direction::opposite)
}

/// [`interact_direction`] against the context's world and strict-direction
/// source, with the air-place fallback: when nothing qualifies outside strict
/// mode and air placement is on, place on the top face.
pub fn resolve(cx: &InteractContext<'_>, target: BlockPos, strict: bool) -> Option<Direction> {
    let allowed = if strict {
        cx.strict
            .place_directions(cx.player.eye_position(), target.center())
    } else {
        DirectionSet::ALL
    };

    let found = interact_direction(cx.world, allowed, target, strict);
    if found.is_none() && !strict && cx.features.is_enabled(Feature::AirPlace) {
        tracing::debug!("No support for {:?}, air placing", target);
        return Some(Direction::Up);
    }
    found
}

/// Faces NoCheatPlus-style anti-cheats accept: only those the eye is on the
/// outer side of, per axis. An eye within half a block of the centre on an
/// axis may use either face of that axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct NcpDirections;

impl StrictDirections for NcpDirections {
    fn place_directions(&self, eye: Vec3, target_center: Vec3) -> DirectionSet {
        let delta = eye - target_center;
        let mut set = DirectionSet::EMPTY;
        for (diff, negative, positive) in [
            (delta.x, Direction::West, Direction::East),
            (delta.y, Direction::Down, Direction::Up),
            (delta.z, Direction::North, Direction::South),
        ] {
            if diff > FACE_MARGIN {
                set.insert(positive);
            } else if diff < -FACE_MARGIN {
                set.insert(negative);
            } else {
                set.insert(positive);
                set.insert(negative);
            }
        }
        set
    }
}
