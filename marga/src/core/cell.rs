//! Cell type for the navigation grid.

use serde::{Deserialize, Serialize};

use super::point::{GridCoord, WorldPoint};

/// A single cell of a [`NavGrid`](crate::grid::NavGrid).
///
/// Cells are created once by the grid builder. Only `movement_penalty` is
/// touched afterwards, by penalty smoothing during the same build.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Position in the grid, unique per grid
    pub coord: GridCoord,

    /// Can a path pass through this cell?
    pub walkable: bool,

    /// Additive traversal cost layered on top of the step distance.
    /// Comes from terrain classification and obstacle proximity.
    pub movement_penalty: u32,

    /// Cell center in world space
    pub world_position: WorldPoint,
}

impl Cell {
    /// Create a new cell
    #[inline]
    pub fn new(
        coord: GridCoord,
        walkable: bool,
        movement_penalty: u32,
        world_position: WorldPoint,
    ) -> Self {
        Self {
            coord,
            walkable,
            movement_penalty,
            world_position,
        }
    }

    /// Single character representation for debugging
    pub fn as_char(&self) -> char {
        match (self.walkable, self.movement_penalty) {
            (false, _) => '#',
            (true, 0) => '.',
            (true, p) if p < 10 => ':',
            (true, _) => '+',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_chars() {
        let at = GridCoord::new(0, 0);
        assert_eq!(Cell::new(at, false, 0, WorldPoint::ZERO).as_char(), '#');
        assert_eq!(Cell::new(at, true, 0, WorldPoint::ZERO).as_char(), '.');
        assert_eq!(Cell::new(at, true, 3, WorldPoint::ZERO).as_char(), ':');
        assert_eq!(Cell::new(at, true, 40, WorldPoint::ZERO).as_char(), '+');
    }
}
