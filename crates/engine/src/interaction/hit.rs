use crate::world::direction::Direction;
use crate::world::position::{BlockPos, Vec3};

/// Where a block interaction lands: the clicked point, the clicked face and
/// the block that owns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub location: Vec3,
    pub direction: Direction,
    pub block_pos: BlockPos,
    pub inside: bool,
}

impl HitResult {
    /// The centre of `pos`'s face pointing along `direction`.
    pub fn build(pos: BlockPos, direction: Direction) -> Self {
        Self {
            location: pos.center() + direction.unit_vector() * 0.5,
            direction,
            block_pos: pos,
            inside: false,
        }
    }

    /// The cell a block placed through this hit would occupy.
    pub fn placement_pos(&self) -> BlockPos {
        self.block_pos.offset(self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_point_is_face_center() {
        let pos = BlockPos::new(4, 70, -9);
        for dir in Direction::ALL {
            let hit = HitResult::build(pos, dir);
            let (nx, ny, nz) = dir.normal();
            let expected = Vec3::new(
                4.5 + nx as f64 * 0.5,
                70.5 + ny as f64 * 0.5,
                -8.5 + nz as f64 * 0.5,
            );
            assert_eq!(hit.location, expected, "{dir}");
            assert_eq!(hit.block_pos, pos);
            assert_eq!(hit.direction, dir);
            assert!(!hit.inside);
        }
    }

    #[test]
    fn placement_lands_on_the_clicked_side() {
        let hit = HitResult::build(BlockPos::new(0, 64, 0), Direction::Up);
        assert_eq!(hit.placement_pos(), BlockPos::new(0, 65, 0));
    }
}
