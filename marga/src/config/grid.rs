//! Grid configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::core::WorldPoint;
use crate::grid::GridConfig;

/// Grid settings section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Center of the covered area (x, y)
    #[serde(default = "defaults::origin")]
    pub origin: WorldPoint,

    /// Width and height of the covered area
    #[serde(default = "defaults::world_size")]
    pub world_size: WorldPoint,

    /// Half a cell edge (world units)
    #[serde(default = "defaults::cell_radius")]
    pub cell_radius: f32,

    /// Penalty blur radius in cells (0 = off)
    #[serde(default = "defaults::blur_radius")]
    pub blur_radius: usize,

    /// Penalty added to blocked cells before blurring
    #[serde(default = "defaults::obstacle_proximity_penalty")]
    pub obstacle_proximity_penalty: u32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            origin: defaults::origin(),
            world_size: defaults::world_size(),
            cell_radius: defaults::cell_radius(),
            blur_radius: defaults::blur_radius(),
            obstacle_proximity_penalty: defaults::obstacle_proximity_penalty(),
        }
    }
}

impl GridSection {
    /// Convert to GridConfig
    pub fn to_grid_config(&self) -> GridConfig {
        GridConfig {
            origin: self.origin,
            world_size: self.world_size,
            cell_radius: self.cell_radius,
            blur_radius: self.blur_radius,
            obstacle_proximity_penalty: self.obstacle_proximity_penalty,
        }
    }
}
