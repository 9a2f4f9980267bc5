//! Path following corridor.
//!
//! Turns a raw cell chain into a few waypoints and places a turn boundary
//! before each one. A follower steers at the current waypoint and moves on
//! as soon as it crosses that waypoint's boundary, which rounds off corners
//! instead of driving through every cell center.
//!
//! ```rust,ignore
//! let corridor = CorridorPath::from_waypoints(result.waypoints, position, 1.0);
//! let mut cursor = corridor.cursor();
//! while let FollowProgress::Heading(i) = cursor.advance(position) {
//!     position = position.move_towards(corridor.waypoints()[i], step);
//! }
//! ```

mod boundary;
mod path;

pub use boundary::{TurnBoundary, VERTICAL_SLOPE};
pub use path::{CorridorCursor, CorridorPath, FollowProgress, simplify_chain};
