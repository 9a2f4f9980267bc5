//! A* planner over a [`NavGrid`].

use log::debug;

use super::search::{SearchStatus, SlicedSearch};
use super::types::{PathResult, SearchResult};
use crate::core::WorldPoint;
use crate::corridor::simplify_chain;
use crate::grid::NavGrid;

/// A* pathfinder.
///
/// Cheap to create; all search state is private to each call, so one grid
/// can serve any number of planners at once.
#[derive(Clone, Copy, Debug)]
pub struct PathPlanner<'a> {
    grid: &'a NavGrid,
}

impl<'a> PathPlanner<'a> {
    /// Create a new planner for a grid
    pub fn new(grid: &'a NavGrid) -> Self {
        Self { grid }
    }

    #[inline]
    pub fn grid(&self) -> &'a NavGrid {
        self.grid
    }

    /// Find the cell chain between two world points
    pub fn find_path(&self, start: WorldPoint, end: WorldPoint) -> SearchResult {
        SlicedSearch::new(self.grid, start, end).finish(self.grid)
    }

    /// Start a search that the caller advances with [`SlicedSearch::step`]
    pub fn begin(&self, start: WorldPoint, end: WorldPoint) -> SlicedSearch {
        SlicedSearch::new(self.grid, start, end)
    }

    /// Find a path and simplify it to waypoints
    pub fn plan(&self, start: WorldPoint, end: WorldPoint) -> PathResult {
        let search = self.find_path(start, end);
        self.to_path_result(&search)
    }

    /// Simplify a finished search into the result delivered to callers
    pub fn to_path_result(&self, search: &SearchResult) -> PathResult {
        if !search.success {
            return PathResult {
                waypoints: Vec::new(),
                success: false,
                failure: search.failure,
            };
        }

        let waypoints = simplify_chain(self.grid, &search.chain);
        debug!(
            "[AStar] {} cells -> {} waypoints, cost={}, nodes_expanded={}",
            search.chain.len(),
            waypoints.len(),
            search.cost,
            search.nodes_expanded
        );
        PathResult {
            waypoints,
            success: true,
            failure: None,
        }
    }

    /// Finish a sliced search and simplify it
    pub fn complete(&self, search: SlicedSearch) -> PathResult {
        debug_assert_ne!(search.status(), SearchStatus::InProgress);
        let result = search.finish(self.grid);
        self.to_path_result(&result)
    }
}
