//! # Marga: cost-weighted grid path planning
//!
//! Builds a navigation grid from terrain probes, finds penalty-weighted
//! shortest routes with A*, simplifies them into waypoints with lookahead
//! turn boundaries, and schedules many path requests without blocking the
//! caller's update loop.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marga::{AsciiTerrain, CorridorPath, GridConfig, NavGrid, PathPlanner, PenaltyTable, WorldPoint};
//!
//! let terrain = AsciiTerrain::parse("......\n..##..\n......", 1.0, WorldPoint::ZERO)?;
//! let config = GridConfig::covering(&terrain);
//! let grid = NavGrid::build(&config, &terrain, &PenaltyTable::new())?;
//!
//! let start = WorldPoint::new(-2.5, 0.0);
//! let result = PathPlanner::new(&grid).plan(start, WorldPoint::new(2.5, 0.0));
//! if result.success {
//!     let corridor = CorridorPath::from_waypoints(result.waypoints, start, 1.0);
//!     println!("{} waypoints, {:.2} long", corridor.len(), corridor.length());
//! }
//! # Ok::<(), marga::MargaError>(())
//! ```
//!
//! ## Coordinate Frame
//!
//! - World space is a 2D plane, x right, y up.
//! - Grid cell `(0, 0)` is the bottom-left cell; `y` grows with world y.
//! - Step costs are integers: 10 straight, 14 diagonal.
//!
//! ## Architecture
//!
//! - [`core`]: Fundamental types (Cell, GridCoord, WorldPoint)
//! - [`heap`]: Indexed binary heap with decrease-key
//! - [`grid`]: Navigation grid, terrain sampling, penalty smoothing
//! - [`pathfinding`]: A* search, one-shot and sliced
//! - [`corridor`]: Waypoint simplification and turn boundaries
//! - [`requests`]: Asynchronous request coordinator
//! - [`config`]: YAML configuration
//!
//! ## Data Flow
//!
//! ```text
//!   TerrainSampler ──► NavGrid::build ──► Arc<NavGrid>
//!                                              │
//!   submit(start, end, cb) ──► RequestCoordinator ──► PathPlanner (A*)
//!                                              │             │
//!                                tick() ◄── PathResult ◄── simplify_chain
//!                                   │
//!                                   ▼
//!                        cb(waypoints, success) ──► CorridorPath
//! ```

pub mod config;
pub mod core;
pub mod corridor;
pub mod error;
pub mod grid;
pub mod heap;
pub mod pathfinding;
pub mod requests;

// Core types
pub use core::{Cell, DIAGONAL_STEP_COST, GridCoord, STRAIGHT_STEP_COST, WorldPoint};

// Grid
pub use grid::{
    AsciiTerrain, GridConfig, GridError, LayerId, NavGrid, PenaltyTable, TerrainParseError,
    TerrainSampler,
};

// Search
pub use heap::IndexedPriorityQueue;
pub use pathfinding::{
    Endpoint, PathFailure, PathPlanner, PathResult, SearchResult, SearchStatus, SlicedSearch,
};

// Following
pub use corridor::{CorridorCursor, CorridorPath, FollowProgress, TurnBoundary, simplify_chain};

// Scheduling
pub use requests::{
    CoordinatorConfig, CoordinatorStats, RequestCoordinator, RequestId, RequestState,
    SchedulingPolicy, SubmitError,
};

// Configuration and errors
pub use config::{ConfigLoadError, MargaConfig};
pub use error::{MargaError, Result};
