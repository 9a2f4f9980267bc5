//! Path planning on the navigation grid.
//!
//! - [`PathPlanner`]: weighted A* with an octile heuristic
//! - [`SlicedSearch`]: the same search advanced a bounded number of
//!   expansions at a time
//!
//! ```rust,ignore
//! use marga::pathfinding::PathPlanner;
//!
//! let planner = PathPlanner::new(&grid);
//! let result = planner.plan(start, goal);
//! if result.success {
//!     println!("Path found with {} waypoints", result.waypoints.len());
//! }
//! ```

mod planner;
mod search;
mod types;

pub use planner::PathPlanner;
pub use search::{SearchKey, SearchRecord, SearchStatus, SlicedSearch};
pub use types::{Endpoint, PathFailure, PathResult, SearchResult};

use crate::core::WorldPoint;
use crate::grid::NavGrid;

/// Quick path finding between two world points
pub fn find_path(grid: &NavGrid, start: WorldPoint, end: WorldPoint) -> SearchResult {
    PathPlanner::new(grid).find_path(start, end)
}

/// Check if a path exists
pub fn path_exists(grid: &NavGrid, start: WorldPoint, end: WorldPoint) -> bool {
    find_path(grid, start, end).success
}
