//! Terrain sampling capability consumed by the grid builder.
//!
//! The grid never interprets raw geometry. It asks a [`TerrainSampler`] two
//! questions per cell center: is anything solid within the cell radius, and
//! which surface layer lies underneath. [`AsciiTerrain`] is a character-raster
//! implementation used by tests, benches and the `marga-nav` binary.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::core::WorldPoint;

/// Surface layer identifier returned by [`TerrainSampler::classify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u32);

/// Terrain queries supplied by the embedding environment.
pub trait TerrainSampler {
    /// Does any obstacle overlap the disc of `radius` around `point`?
    fn is_obstructed(&self, point: WorldPoint, radius: f32) -> bool;

    /// Surface layer found by probing straight down at `point`.
    ///
    /// `None` when the probe finds no classified surface.
    fn classify(&self, point: WorldPoint) -> Option<LayerId>;
}

impl<T: TerrainSampler + ?Sized> TerrainSampler for &T {
    fn is_obstructed(&self, point: WorldPoint, radius: f32) -> bool {
        (**self).is_obstructed(point, radius)
    }

    fn classify(&self, point: WorldPoint) -> Option<LayerId> {
        (**self).classify(point)
    }
}

/// Errors raised while parsing an ASCII terrain map
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainParseError {
    #[error("terrain map has no rows")]
    Empty,

    #[error("unknown terrain character {ch:?} at line {line}, column {column}")]
    UnknownTile { line: usize, column: usize, ch: char },

    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),
}

/// One raster tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    /// No surface at all (` `)
    Void,
    /// Solid obstacle (`#`)
    Obstacle,
    /// Open ground with no classified layer (`.`)
    Open,
    /// Open ground classified as a layer (`0`-`9`)
    Layer(LayerId),
}

impl Tile {
    fn from_char(ch: char) -> Option<Tile> {
        match ch {
            ' ' => Some(Tile::Void),
            '#' => Some(Tile::Obstacle),
            '.' => Some(Tile::Open),
            d if d.is_ascii_digit() => d.to_digit(10).map(|v| Tile::Layer(LayerId(v))),
            _ => None,
        }
    }
}

/// Overlap smaller than this fraction of a tile is treated as touching, not
/// obstructing. Keeps cells that merely border an obstacle walkable despite
/// float noise in the cell centers.
const CONTACT_TOLERANCE: f32 = 1e-3;

/// Character-raster terrain.
///
/// The first text line is the top row (largest y). Shorter lines are padded
/// with [`Tile::Void`]. The raster is centered on `center`.
#[derive(Clone, Debug)]
pub struct AsciiTerrain {
    tiles: Vec<Tile>,
    columns: usize,
    rows: usize,
    tile_size: f32,
    center: WorldPoint,
}

impl AsciiTerrain {
    /// Parse a terrain map from text
    pub fn parse(text: &str, tile_size: f32, center: WorldPoint) -> Result<Self, TerrainParseError> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(TerrainParseError::InvalidTileSize(tile_size));
        }

        let mut lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(TerrainParseError::Empty);
        }

        let rows = lines.len();
        let columns = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        if columns == 0 {
            return Err(TerrainParseError::Empty);
        }

        // Stored bottom row first so that row index grows with world y.
        let mut tiles = vec![Tile::Void; rows * columns];
        for (line_idx, line) in lines.iter().enumerate() {
            let row = rows - 1 - line_idx;
            for (column, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(TerrainParseError::UnknownTile {
                    line: line_idx + 1,
                    column: column + 1,
                    ch,
                })?;
                tiles[row * columns + column] = tile;
            }
        }

        Ok(Self {
            tiles,
            columns,
            rows,
            tile_size,
            center,
        })
    }

    /// Read and parse a terrain map file
    pub fn load(path: &Path, tile_size: f32, center: WorldPoint) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigLoadError::Io(format!("{}: {}", path.display(), e)))?;
        Ok(Self::parse(&text, tile_size, center)?)
    }

    /// Number of tile columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of tile rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Edge length of one tile
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Center of the raster in world space
    pub fn center(&self) -> WorldPoint {
        self.center
    }

    /// Extent of the raster in world units
    pub fn world_size(&self) -> WorldPoint {
        WorldPoint::new(
            self.columns as f32 * self.tile_size,
            self.rows as f32 * self.tile_size,
        )
    }

    /// World position of the raster's bottom-left corner
    fn bottom_left(&self) -> WorldPoint {
        self.center - self.world_size() * 0.5
    }

    /// Tile at (column, row); rows count up from the bottom. Out of range is void.
    pub fn tile(&self, column: i64, row: i64) -> Tile {
        if column < 0 || row < 0 || column >= self.columns as i64 || row >= self.rows as i64 {
            return Tile::Void;
        }
        self.tiles[row as usize * self.columns + column as usize]
    }

    /// World-space center of a tile
    pub fn tile_center(&self, column: usize, row: usize) -> WorldPoint {
        let bl = self.bottom_left();
        WorldPoint::new(
            bl.x + (column as f32 + 0.5) * self.tile_size,
            bl.y + (row as f32 + 0.5) * self.tile_size,
        )
    }

    fn tile_index_of(&self, value: f32, min: f32) -> i64 {
        ((value - min) / self.tile_size).floor() as i64
    }
}

impl TerrainSampler for AsciiTerrain {
    fn is_obstructed(&self, point: WorldPoint, radius: f32) -> bool {
        let bl = self.bottom_left();
        let col_lo = self.tile_index_of(point.x - radius, bl.x);
        let col_hi = self.tile_index_of(point.x + radius, bl.x);
        let row_lo = self.tile_index_of(point.y - radius, bl.y);
        let row_hi = self.tile_index_of(point.y + radius, bl.y);
        let tolerance = CONTACT_TOLERANCE * self.tile_size;

        for row in row_lo..=row_hi {
            for column in col_lo..=col_hi {
                if self.tile(column, row) != Tile::Obstacle {
                    continue;
                }
                // Closest point of the tile square to the probe center
                let min_x = bl.x + column as f32 * self.tile_size;
                let min_y = bl.y + row as f32 * self.tile_size;
                let cx = point.x.clamp(min_x, min_x + self.tile_size);
                let cy = point.y.clamp(min_y, min_y + self.tile_size);
                let gap = point.distance(&WorldPoint::new(cx, cy));
                if gap + tolerance < radius {
                    return true;
                }
            }
        }
        false
    }

    fn classify(&self, point: WorldPoint) -> Option<LayerId> {
        let bl = self.bottom_left();
        let column = self.tile_index_of(point.x, bl.x);
        let row = self.tile_index_of(point.y, bl.y);
        match self.tile(column, row) {
            Tile::Layer(layer) => Some(layer),
            Tile::Void | Tile::Obstacle | Tile::Open => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "\
#####
#.1.#
#...#
#####";

    #[test]
    fn test_parse_dimensions() {
        let terrain = AsciiTerrain::parse(MAP, 1.0, WorldPoint::ZERO).unwrap();
        assert_eq!(terrain.columns(), 5);
        assert_eq!(terrain.rows(), 4);
        assert_eq!(terrain.world_size(), WorldPoint::new(5.0, 4.0));
    }

    #[test]
    fn test_first_line_is_top_row() {
        let terrain = AsciiTerrain::parse(MAP, 1.0, WorldPoint::ZERO).unwrap();
        // "#.1.#" is the second line from the top -> row 2 from the bottom
        assert_eq!(terrain.tile(2, 2), Tile::Layer(LayerId(1)));
        assert_eq!(terrain.tile(2, 1), Tile::Open);
        assert_eq!(terrain.tile(-1, 0), Tile::Void);
    }

    #[test]
    fn test_unknown_character() {
        let err = AsciiTerrain::parse("..x", 1.0, WorldPoint::ZERO).unwrap_err();
        assert_eq!(
            err,
            TerrainParseError::UnknownTile {
                line: 1,
                column: 3,
                ch: 'x'
            }
        );
    }

    #[test]
    fn test_empty_and_bad_tile_size() {
        assert_eq!(
            AsciiTerrain::parse("\n\n", 1.0, WorldPoint::ZERO).unwrap_err(),
            TerrainParseError::Empty
        );
        assert!(matches!(
            AsciiTerrain::parse("...", 0.0, WorldPoint::ZERO),
            Err(TerrainParseError::InvalidTileSize(_))
        ));
    }

    #[test]
    fn test_obstruction_touching_is_not_overlap() {
        let terrain = AsciiTerrain::parse(MAP, 1.0, WorldPoint::ZERO).unwrap();
        // Center of the open tile next to the left wall
        let open = terrain.tile_center(1, 1);
        assert!(!terrain.is_obstructed(open, 0.5));
        // A slightly larger probe reaches the wall
        assert!(terrain.is_obstructed(open, 0.6));
        // Wall tile itself
        assert!(terrain.is_obstructed(terrain.tile_center(0, 1), 0.5));
    }

    #[test]
    fn test_classify() {
        let terrain = AsciiTerrain::parse(MAP, 2.0, WorldPoint::new(10.0, 10.0)).unwrap();
        assert_eq!(terrain.classify(terrain.tile_center(2, 2)), Some(LayerId(1)));
        assert_eq!(terrain.classify(terrain.tile_center(1, 1)), None);
        assert_eq!(terrain.classify(WorldPoint::new(-100.0, 0.0)), None);
    }
}
