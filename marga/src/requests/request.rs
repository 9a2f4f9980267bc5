//! Request identity and lifecycle.

use std::fmt;

use crate::core::WorldPoint;

/// Identifier handed out by [`RequestCoordinator::submit`](super::RequestCoordinator::submit).
///
/// Ids increase monotonically in submission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub(crate) u64);

impl RequestId {
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of a request. Each request moves forward exactly once through
/// every state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    /// Accepted, waiting for a planner
    Pending,
    /// A planner is working on it
    Computing,
    /// Callback has fired
    Completed,
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestState::Pending => "pending",
            RequestState::Computing => "computing",
            RequestState::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Completion callback: simplified waypoints and the success flag.
pub type PathCallback = Box<dyn FnOnce(Vec<WorldPoint>, bool)>;

/// The plannable part of a request. Callbacks stay with the coordinator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathRequest {
    pub id: RequestId,
    pub start: WorldPoint,
    pub end: WorldPoint,
}
