//! Unified configuration loading for marga.
//!
//! Loads all configuration from a single YAML file. Every section and field
//! is optional; missing values fall back to the defaults in `defaults.rs`.
//!
//! ```yaml
//! grid:
//!   origin: { x: 0.0, y: 0.0 }
//!   world_size: { x: 30.0, y: 30.0 }
//!   cell_radius: 0.5
//!   blur_radius: 3
//!   obstacle_proximity_penalty: 10
//! terrain:
//!   layer_penalties:
//!     - { layer: 1, penalty: 20 }
//! planner:
//!   expansions_per_tick: 0
//! corridor:
//!   turn_distance: 1.0
//! requests:
//!   mode: serialized
//!   workers: 4
//!   max_outstanding: 0
//! ```

mod corridor;
mod defaults;
mod error;
mod grid;
mod marga;
mod planner;
mod requests;
mod terrain;

// Re-export main types
pub use error::ConfigLoadError;
pub use marga::MargaConfig;

// Re-export section types
pub use corridor::CorridorSection;
pub use grid::GridSection;
pub use planner::PlannerSection;
pub use requests::{RequestMode, RequestsSection};
pub use terrain::{LayerPenalty, TerrainSection};
