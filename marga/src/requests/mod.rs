//! Path request scheduling.
//!
//! - [`RequestCoordinator`]: accepts requests, runs planners under a
//!   [`SchedulingPolicy`] and fires completion callbacks from `tick`
//! - [`RequestId`] / [`RequestState`]: per-request identity and lifecycle

mod coordinator;
mod request;

pub use coordinator::{
    CoordinatorConfig, CoordinatorStats, RequestCoordinator, SchedulingPolicy, SubmitError,
};
pub use request::{PathCallback, PathRequest, RequestId, RequestState};
