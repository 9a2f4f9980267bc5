//! Simplified path with lookahead turn boundaries.

use log::trace;

use super::boundary::TurnBoundary;
use crate::core::{GridCoord, WorldPoint};
use crate::grid::NavGrid;

/// Collapse a cell chain into waypoints.
///
/// Consecutive steps with the same grid delta form one straight run, which
/// becomes a single waypoint at its last cell. The end cell is always the
/// last waypoint. A single-cell chain yields that cell's position.
pub fn simplify_chain(grid: &NavGrid, chain: &[GridCoord]) -> Vec<WorldPoint> {
    let position = |c: &GridCoord| grid.cell(*c).map(|cell| cell.world_position);

    match chain {
        [] => Vec::new(),
        [only] => position(only).into_iter().collect(),
        _ => {
            let deltas: Vec<GridCoord> = chain.windows(2).map(|w| w[1] - w[0]).collect();
            let mut waypoints = Vec::new();
            for (i, delta) in deltas.iter().enumerate() {
                let run_ends = deltas.get(i + 1).is_none_or(|next| next != delta);
                if run_ends {
                    waypoints.extend(position(&chain[i + 1]));
                }
            }
            waypoints
        }
    }
}

/// Waypoints plus one turn boundary per waypoint.
///
/// Immutable once built. The last boundary passes through the final waypoint
/// and acts as the finish line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CorridorPath {
    waypoints: Vec<WorldPoint>,
    boundaries: Vec<TurnBoundary>,
}

impl CorridorPath {
    /// Build boundaries for `waypoints` as seen from `start_position`.
    ///
    /// Each intermediate boundary sits `turn_distance` before its waypoint,
    /// so a follower starts turning early.
    pub fn from_waypoints(
        waypoints: Vec<WorldPoint>,
        start_position: WorldPoint,
        turn_distance: f32,
    ) -> Self {
        let finish = waypoints.len().checked_sub(1);
        let mut boundaries = Vec::with_capacity(waypoints.len());
        let mut previous = start_position;

        for (i, &waypoint) in waypoints.iter().enumerate() {
            let direction = (waypoint - previous).normalize();
            let boundary_point = if Some(i) == finish {
                waypoint
            } else {
                waypoint - direction * turn_distance
            };
            boundaries.push(TurnBoundary::new(
                boundary_point,
                previous - direction * turn_distance,
            ));
            previous = boundary_point;
        }

        trace!(
            "[Corridor] {} waypoints, turn distance {:.2}",
            waypoints.len(),
            turn_distance
        );
        Self {
            waypoints,
            boundaries,
        }
    }

    /// Simplify a search chain and build the corridor in one go
    pub fn build_from_chain(
        grid: &NavGrid,
        chain: &[GridCoord],
        start_position: WorldPoint,
        turn_distance: f32,
    ) -> Self {
        Self::from_waypoints(simplify_chain(grid, chain), start_position, turn_distance)
    }

    #[inline]
    pub fn waypoints(&self) -> &[WorldPoint] {
        &self.waypoints
    }

    #[inline]
    pub fn boundaries(&self) -> &[TurnBoundary] {
        &self.boundaries
    }

    /// Index of the finish line, `None` for an empty corridor
    #[inline]
    pub fn finish_index(&self) -> Option<usize> {
        self.boundaries.len().checked_sub(1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Has `position` crossed the finish line? An empty corridor is complete.
    pub fn is_path_complete(&self, position: WorldPoint) -> bool {
        match self.finish_index() {
            Some(i) => self.boundaries[i].has_crossed(position),
            None => true,
        }
    }

    /// Length of the polyline through the waypoints
    pub fn length(&self) -> f32 {
        self.waypoints
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }

    /// Start following this corridor
    pub fn cursor(&self) -> CorridorCursor<'_> {
        CorridorCursor::new(self)
    }
}

/// What the follower should do next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowProgress {
    /// Steer towards the waypoint at this index
    Heading(usize),
    /// The finish line has been crossed
    Finished,
}

/// Follower-side progress along a [`CorridorPath`].
#[derive(Clone, Debug)]
pub struct CorridorCursor<'a> {
    path: &'a CorridorPath,
    index: usize,
    finished: bool,
}

impl<'a> CorridorCursor<'a> {
    pub fn new(path: &'a CorridorPath) -> Self {
        Self {
            path,
            index: 0,
            finished: path.is_empty(),
        }
    }

    /// Skip every boundary `position` has already crossed.
    ///
    /// Once the finish line is crossed the cursor stays finished.
    pub fn advance(&mut self, position: WorldPoint) -> FollowProgress {
        if self.finished {
            return FollowProgress::Finished;
        }
        let boundaries = self.path.boundaries();
        let finish = boundaries.len() - 1;

        while boundaries[self.index].has_crossed(position) {
            if self.index == finish {
                self.finished = true;
                return FollowProgress::Finished;
            }
            self.index += 1;
        }
        FollowProgress::Heading(self.index)
    }

    /// Index of the current target waypoint
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Current target waypoint, `None` once finished
    pub fn target(&self) -> Option<WorldPoint> {
        if self.finished {
            None
        } else {
            self.path.waypoints().get(self.index).copied()
        }
    }

    /// Distance from `position` to the finish line
    pub fn distance_to_finish(&self, position: WorldPoint) -> f32 {
        self.path
            .boundaries()
            .last()
            .map_or(0.0, |b| b.distance_to(position))
    }
}
