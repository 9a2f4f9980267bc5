//! Turn boundary lines.

use crate::core::WorldPoint;

/// Stand-in slope for vertical lines
pub const VERTICAL_SLOPE: f32 = 1e5;

/// Below this magnitude a coordinate difference or gradient counts as zero
const DEGENERATE_EPSILON: f32 = 1e-6;

/// A line perpendicular to the direction of travel.
///
/// The follower starts on the approach side; once a position lies on the
/// other side the boundary has been crossed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnBoundary {
    point: WorldPoint,
    slope: f32,
    approach_side: bool,
}

impl TurnBoundary {
    /// Line through `point_on_line`, perpendicular to the segment towards
    /// `approach_point`, which also fixes the approach side.
    pub fn new(point_on_line: WorldPoint, approach_point: WorldPoint) -> Self {
        let dx = point_on_line.x - approach_point.x;
        let dy = point_on_line.y - approach_point.y;

        let perpendicular_gradient = if dx.abs() < DEGENERATE_EPSILON {
            VERTICAL_SLOPE
        } else {
            dy / dx
        };
        let slope = if perpendicular_gradient.abs() < DEGENERATE_EPSILON {
            VERTICAL_SLOPE
        } else {
            -1.0 / perpendicular_gradient
        };

        let mut boundary = Self {
            point: point_on_line,
            slope,
            approach_side: false,
        };
        boundary.approach_side = boundary.side(approach_point);
        boundary
    }

    /// Anchor point on the line
    #[inline]
    pub fn point(&self) -> WorldPoint {
        self.point
    }

    #[inline]
    pub fn slope(&self) -> f32 {
        self.slope
    }

    /// Which side of the line `p` is on; the line direction is `(1, slope)`
    #[inline]
    fn side(&self, p: WorldPoint) -> bool {
        (p.x - self.point.x) * self.slope > p.y - self.point.y
    }

    /// Has `position` left the approach side?
    #[inline]
    pub fn has_crossed(&self, position: WorldPoint) -> bool {
        self.side(position) != self.approach_side
    }

    /// Unit normal pointing from the approach side across the line
    pub fn crossing_direction(&self) -> WorldPoint {
        let normal = WorldPoint::new(self.slope, -1.0).normalize();
        if self.approach_side {
            normal * -1.0
        } else {
            normal
        }
    }

    /// Perpendicular distance from `position` to the line
    pub fn distance_to(&self, position: WorldPoint) -> f32 {
        let rel = position - self.point;
        let direction = WorldPoint::new(1.0, self.slope);
        (rel.x * direction.y - rel.y * direction.x).abs() / direction.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_horizontal_travel_gives_vertical_line() {
        // Travelling +x towards (5, 0): boundary is the vertical line x = 5
        let boundary = TurnBoundary::new(WorldPoint::new(5.0, 0.0), WorldPoint::new(0.0, 0.0));
        assert_eq!(boundary.slope(), VERTICAL_SLOPE);
        assert!(!boundary.has_crossed(WorldPoint::new(4.9, 0.0)));
        assert!(!boundary.has_crossed(WorldPoint::new(4.9, 3.0)));
        assert!(boundary.has_crossed(WorldPoint::new(5.1, 0.0)));
        assert!(boundary.has_crossed(WorldPoint::new(5.1, -3.0)));
    }

    #[test]
    fn test_vertical_travel_gives_flat_line() {
        let boundary = TurnBoundary::new(WorldPoint::new(2.0, 10.0), WorldPoint::new(2.0, 0.0));
        assert!(!boundary.has_crossed(WorldPoint::new(2.0, 9.0)));
        assert!(!boundary.has_crossed(WorldPoint::new(-5.0, 9.0)));
        assert!(boundary.has_crossed(WorldPoint::new(2.0, 10.5)));
        assert_relative_eq!(
            boundary.distance_to(WorldPoint::new(7.0, 7.0)),
            3.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_diagonal_travel() {
        let boundary = TurnBoundary::new(WorldPoint::new(3.0, 3.0), WorldPoint::new(0.0, 0.0));
        assert_relative_eq!(boundary.slope(), -1.0);
        assert!(!boundary.has_crossed(WorldPoint::new(2.0, 2.0)));
        // Still behind the line even when far off the travel axis
        assert!(!boundary.has_crossed(WorldPoint::new(5.0, 0.5)));
        assert!(boundary.has_crossed(WorldPoint::new(3.5, 3.0)));
    }

    #[test]
    fn test_zero_length_segment_is_well_defined() {
        let p = WorldPoint::new(1.0, 1.0);
        let boundary = TurnBoundary::new(p, p);
        assert!(boundary.slope().is_finite());
        assert!(!boundary.has_crossed(p));
        assert!(boundary.distance_to(p) < 1e-6);
        assert!(boundary.has_crossed(p + boundary.crossing_direction() * 0.1));
    }

    #[test]
    fn test_crossing_direction_follows_travel() {
        let east = TurnBoundary::new(WorldPoint::new(5.0, 0.0), WorldPoint::new(0.0, 0.0));
        let dir = east.crossing_direction();
        assert_relative_eq!(dir.x, 1.0, epsilon = 1e-4);
        assert_relative_eq!(dir.y, 0.0, epsilon = 1e-4);

        let south_west = TurnBoundary::new(WorldPoint::new(-2.0, -2.0), WorldPoint::new(0.0, 0.0));
        let dir = south_west.crossing_direction();
        assert_relative_eq!(dir.x, -std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-4);
        assert_relative_eq!(dir.y, -std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-4);
        assert!(south_west.has_crossed(WorldPoint::new(-2.0, -2.0) + dir * 0.01));
    }
}
