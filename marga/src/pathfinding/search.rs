//! Resumable A* search.
//!
//! All per-search state lives here, indexed by flat cell index, so the grid
//! stays read-only and any number of searches can share it. A search can be
//! run to completion or advanced a bounded number of expansions at a time.

use log::{debug, trace};

use super::types::{Endpoint, PathFailure, SearchResult};
use crate::core::{GridCoord, WorldPoint};
use crate::grid::NavGrid;
use crate::heap::IndexedPriorityQueue;

/// Per-cell search bookkeeping
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchRecord {
    /// Cost from start
    pub g_cost: u32,
    /// Octile estimate to the end cell
    pub h_cost: u32,
    /// Cell index this one was reached from
    pub parent: Option<usize>,
}

impl SearchRecord {
    #[inline]
    pub fn f_cost(&self) -> u32 {
        self.g_cost.saturating_add(self.h_cost)
    }

    #[inline]
    fn key(&self) -> SearchKey {
        SearchKey {
            f_cost: self.f_cost(),
            h_cost: self.h_cost,
        }
    }
}

/// Open-set priority: lower f first, ties broken by lower h.
///
/// Field order matters, the derived `Ord` is lexicographic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchKey {
    pub f_cost: u32,
    pub h_cost: u32,
}

/// State of a [`SlicedSearch`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    InProgress,
    Succeeded,
    Failed,
}

/// A* search that can be advanced in slices.
///
/// Holds no reference to the grid; pass the same grid to every call.
#[derive(Debug)]
pub struct SlicedSearch {
    start: usize,
    end: usize,
    records: Vec<SearchRecord>,
    closed: Vec<bool>,
    open: IndexedPriorityQueue<SearchKey>,
    status: SearchStatus,
    failure: Option<PathFailure>,
    nodes_expanded: usize,
}

impl SlicedSearch {
    /// Map both endpoints onto the grid and seed the open set.
    ///
    /// A non-walkable start or end yields an already failed search that
    /// never allocates per-cell state.
    pub fn new(grid: &NavGrid, start: WorldPoint, end: WorldPoint) -> Self {
        let start_cell = grid.cell_from_world_point(start);
        let end_cell = grid.cell_from_world_point(end);
        trace!(
            "[AStar] search: start=({},{}) end=({},{})",
            start_cell.coord.x, start_cell.coord.y, end_cell.coord.x, end_cell.coord.y
        );

        let start_index = grid.index_of(start_cell.coord).unwrap_or(0);
        let end_index = grid.index_of(end_cell.coord).unwrap_or(0);

        let rejected = if !start_cell.walkable {
            Some(Endpoint::Start)
        } else if !end_cell.walkable {
            Some(Endpoint::End)
        } else {
            None
        };

        if let Some(which) = rejected {
            debug!("[AStar] FAILED: {} cell not walkable", which);
            return Self {
                start: start_index,
                end: end_index,
                records: Vec::new(),
                closed: Vec::new(),
                open: IndexedPriorityQueue::new(0),
                status: SearchStatus::Failed,
                failure: Some(PathFailure::InvalidEndpoint(which)),
                nodes_expanded: 0,
            };
        }

        let count = grid.cell_count();
        let mut records = vec![SearchRecord::default(); count];
        let mut open = IndexedPriorityQueue::new(count);
        records[start_index].h_cost = start_cell.coord.octile_distance(&end_cell.coord);
        open.insert(start_index, records[start_index].key());

        Self {
            start: start_index,
            end: end_index,
            records,
            closed: vec![false; count],
            open,
            status: SearchStatus::InProgress,
            failure: None,
            nodes_expanded: 0,
        }
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[inline]
    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    /// Current size of the open set
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Expand at most `max_expansions` nodes.
    ///
    /// Returns immediately once the search has finished. A budget of zero
    /// does no work.
    pub fn step(&mut self, grid: &NavGrid, max_expansions: usize) -> SearchStatus {
        if self.status != SearchStatus::InProgress {
            return self.status;
        }
        debug_assert_eq!(self.records.len(), grid.cell_count());

        for _ in 0..max_expansions {
            let Some((current, _)) = self.open.extract_min() else {
                debug!(
                    "[AStar] FAILED: NoPath after expanding {} nodes",
                    self.nodes_expanded
                );
                self.status = SearchStatus::Failed;
                self.failure = Some(PathFailure::NoPathFound);
                return self.status;
            };
            self.nodes_expanded += 1;

            if current == self.end {
                self.status = SearchStatus::Succeeded;
                return self.status;
            }
            self.closed[current] = true;
            self.relax_neighbors(grid, current);
        }

        self.status
    }

    fn relax_neighbors(&mut self, grid: &NavGrid, current: usize) {
        let current_cell = grid.cell_at(current);
        let end_coord = grid.coord_of(self.end);
        let base = self.records[current]
            .g_cost
            .saturating_add(current_cell.movement_penalty);

        for neighbor in grid.neighbor_indices(current) {
            if self.closed[neighbor] {
                continue;
            }
            let cell = grid.cell_at(neighbor);
            if !cell.walkable {
                continue;
            }

            let tentative_g =
                base.saturating_add(current_cell.coord.octile_distance(&cell.coord));
            let queued = self.open.contains(neighbor);
            if queued && tentative_g >= self.records[neighbor].g_cost {
                continue;
            }

            let record = &mut self.records[neighbor];
            record.g_cost = tentative_g;
            record.h_cost = cell.coord.octile_distance(&end_coord);
            record.parent = Some(current);
            let key = record.key();

            if queued {
                self.open.decrease_key(neighbor, key);
            } else {
                self.open.insert(neighbor, key);
            }
        }
    }

    /// Run to completion if needed and produce the result.
    pub fn finish(mut self, grid: &NavGrid) -> SearchResult {
        while self.step(grid, usize::MAX) == SearchStatus::InProgress {}

        match self.status {
            SearchStatus::Succeeded => self.reconstruct(grid),
            _ => SearchResult::failed(
                self.failure.unwrap_or(PathFailure::NoPathFound),
                self.nodes_expanded,
            ),
        }
    }

    /// Walk parents back from the end cell
    fn reconstruct(&self, grid: &NavGrid) -> SearchResult {
        let mut chain: Vec<GridCoord> = Vec::new();
        let mut current = Some(self.end);
        while let Some(index) = current {
            chain.push(grid.coord_of(index));
            if index == self.start {
                break;
            }
            current = self.records[index].parent;
        }
        chain.reverse();

        let cost = self.records[self.end].g_cost;
        trace!(
            "[AStar] SUCCESS: path length={} cells, cost={}, nodes_expanded={}",
            chain.len(),
            cost,
            self.nodes_expanded
        );

        SearchResult {
            chain,
            cost,
            nodes_expanded: self.nodes_expanded,
            success: true,
            failure: None,
        }
    }
}
