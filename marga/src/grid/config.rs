//! Configuration types for the navigation grid.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sampler::AsciiTerrain;
use crate::core::WorldPoint;

/// Grid configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Center of the covered rectangle in world space
    pub origin: WorldPoint,

    /// Full extent of the covered rectangle (x = width, y = height)
    pub world_size: WorldPoint,

    /// Half the edge length of one cell. Also the obstruction probe radius.
    pub cell_radius: f32,

    /// Box blur radius applied to the penalty layer (0 disables smoothing)
    pub blur_radius: usize,

    /// Extra penalty placed on non-walkable cells before smoothing, so the
    /// blur bleeds cost into cells near obstacles
    pub obstacle_proximity_penalty: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin: WorldPoint::ZERO,
            world_size: WorldPoint::new(30.0, 30.0),
            cell_radius: 0.5,
            blur_radius: 3,
            obstacle_proximity_penalty: 10,
        }
    }
}

impl GridConfig {
    /// Configuration covering an ASCII terrain one cell per tile.
    pub fn covering(terrain: &AsciiTerrain) -> Self {
        Self {
            origin: terrain.center(),
            world_size: terrain.world_size(),
            cell_radius: terrain.tile_size() * 0.5,
            ..Self::default()
        }
    }

    /// Builder: set the blur radius
    pub fn with_blur_radius(mut self, blur_radius: usize) -> Self {
        self.blur_radius = blur_radius;
        self
    }

    /// Builder: set the obstacle proximity penalty
    pub fn with_obstacle_penalty(mut self, penalty: u32) -> Self {
        self.obstacle_proximity_penalty = penalty;
        self
    }

    /// Edge length of one cell
    #[inline]
    pub fn cell_diameter(&self) -> f32 {
        self.cell_radius * 2.0
    }

    /// Grid dimensions in cells, after validation
    pub fn dimensions(&self) -> Result<(usize, usize), GridError> {
        self.validate()?;
        let d = self.cell_diameter();
        let width = (self.world_size.x / d).round() as usize;
        let height = (self.world_size.y / d).round() as usize;
        if width == 0 || height == 0 {
            return Err(GridError::SmallerThanCell {
                width: self.world_size.x,
                height: self.world_size.y,
                cell_diameter: d,
            });
        }
        Ok((width, height))
    }

    /// Check that the configuration describes a usable grid
    pub fn validate(&self) -> Result<(), GridError> {
        if !(self.cell_radius.is_finite() && self.cell_radius > 0.0) {
            return Err(GridError::InvalidCellRadius(self.cell_radius));
        }
        let size_ok = |v: f32| v.is_finite() && v > 0.0;
        if !size_ok(self.world_size.x) || !size_ok(self.world_size.y) {
            return Err(GridError::InvalidWorldSize {
                width: self.world_size.x,
                height: self.world_size.y,
            });
        }
        if !(self.origin.x.is_finite() && self.origin.y.is_finite()) {
            return Err(GridError::InvalidOrigin(self.origin));
        }
        Ok(())
    }
}

/// Grid configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("cell radius must be positive and finite, got {0}")]
    InvalidCellRadius(f32),

    #[error("world size must be positive and finite, got {width} x {height}")]
    InvalidWorldSize { width: f32, height: f32 },

    #[error("grid origin must be finite, got ({}, {})", .0.x, .0.y)]
    InvalidOrigin(WorldPoint),

    #[error("world size {width} x {height} is smaller than one cell of diameter {cell_diameter}")]
    SmallerThanCell {
        width: f32,
        height: f32,
        cell_diameter: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let config = GridConfig::default();
        assert_eq!(config.dimensions().unwrap(), (30, 30));
    }

    #[test]
    fn test_dimensions_round() {
        let config = GridConfig {
            world_size: WorldPoint::new(10.4, 9.6),
            cell_radius: 0.5,
            ..GridConfig::default()
        };
        assert_eq!(config.dimensions().unwrap(), (10, 10));
    }

    #[test]
    fn test_invalid_configs() {
        let bad_radius = GridConfig {
            cell_radius: 0.0,
            ..GridConfig::default()
        };
        assert_eq!(
            bad_radius.validate(),
            Err(GridError::InvalidCellRadius(0.0))
        );

        let bad_size = GridConfig {
            world_size: WorldPoint::new(f32::NAN, 1.0),
            ..GridConfig::default()
        };
        assert!(matches!(
            bad_size.validate(),
            Err(GridError::InvalidWorldSize { .. })
        ));

        let tiny = GridConfig {
            world_size: WorldPoint::new(0.2, 5.0),
            cell_radius: 0.5,
            ..GridConfig::default()
        };
        assert!(matches!(
            tiny.dimensions(),
            Err(GridError::SmallerThanCell { .. })
        ));
    }

    #[test]
    fn test_covering_terrain() {
        let terrain = AsciiTerrain::parse("....\n....", 2.0, WorldPoint::new(1.0, 1.0)).unwrap();
        let config = GridConfig::covering(&terrain);
        assert_eq!(config.cell_radius, 1.0);
        assert_eq!(config.world_size, WorldPoint::new(8.0, 4.0));
        assert_eq!(config.dimensions().unwrap(), (4, 2));
    }
}
