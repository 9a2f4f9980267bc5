//! Navigation grid.
//!
//! - [`NavGrid`]: cost-annotated cell array with coordinate mapping and
//!   neighbor queries
//! - [`TerrainSampler`]: obstruction and layer probes injected by the host
//! - [`AsciiTerrain`]: character-raster sampler
//! - [`PenaltyTable`]: layer to movement penalty lookup
//! - [`box_blur`]: separable penalty smoothing

mod blur;
mod config;
mod nav_grid;
mod penalty;
mod sampler;

pub use blur::box_blur;
pub use config::{GridConfig, GridError};
pub use nav_grid::NavGrid;
pub use penalty::PenaltyTable;
pub use sampler::{AsciiTerrain, LayerId, TerrainParseError, TerrainSampler, Tile};
