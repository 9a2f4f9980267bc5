//! Pathfinding result types.

use std::fmt;

use crate::core::{GridCoord, WorldPoint};

/// Which endpoint of a request was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// Reason for path failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFailure {
    /// Start or end maps to a non-walkable cell
    InvalidEndpoint(Endpoint),
    /// Open set exhausted before reaching the end cell
    NoPathFound,
}

impl fmt::Display for PathFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathFailure::InvalidEndpoint(which) => write!(f, "{} cell is not walkable", which),
            PathFailure::NoPathFound => write!(f, "no path found"),
        }
    }
}

/// Raw outcome of one A* search
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Cells from start to end inclusive (empty if no path found)
    pub chain: Vec<GridCoord>,
    /// Accumulated g cost of the end cell
    pub cost: u32,
    /// Number of nodes taken off the open set
    pub nodes_expanded: usize,
    /// Whether a path was found
    pub success: bool,
    /// Reason for failure (if any)
    pub failure: Option<PathFailure>,
}

impl SearchResult {
    pub(super) fn failed(reason: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            chain: Vec::new(),
            cost: 0,
            nodes_expanded,
            success: false,
            failure: Some(reason),
        }
    }

    /// Path length in cells
    pub fn length_cells(&self) -> usize {
        self.chain.len()
    }
}

/// Search outcome simplified to waypoints, as delivered to request callbacks
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathResult {
    /// Simplified waypoints ending at the end cell (empty on failure)
    pub waypoints: Vec<WorldPoint>,
    pub success: bool,
    pub failure: Option<PathFailure>,
}

impl PathResult {
    /// Total length of the polyline through the waypoints
    pub fn length(&self) -> f32 {
        self.waypoints
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}
