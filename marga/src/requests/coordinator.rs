//! Asynchronous path request scheduling.
//!
//! The coordinator owns every callback and only ever invokes them from
//! [`RequestCoordinator::tick`], so callers never see a callback on another
//! thread. Two policies share one front end:
//!
//! - **Serialized**: one search at a time on the ticking thread, optionally
//!   sliced into a bounded number of node expansions per tick.
//! - **Concurrent**: a pool of worker threads, each planning over the shared
//!   read-only grid. Results come back on a channel and are delivered in
//!   completion order.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::request::{PathCallback, PathRequest, RequestId, RequestState};
use crate::core::WorldPoint;
use crate::error::{MargaError, Result};
use crate::grid::NavGrid;
use crate::pathfinding::{PathPlanner, PathResult, SearchStatus, SlicedSearch};

/// How requests are scheduled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SchedulingPolicy {
    /// FIFO, at most one search in progress, run on the ticking thread.
    /// `None` runs each search to completion within a single tick.
    Serialized { expansions_per_tick: Option<usize> },
    /// Worker pool with private search state per request
    Concurrent { workers: usize },
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        SchedulingPolicy::Serialized {
            expansions_per_tick: None,
        }
    }
}

/// Coordinator configuration
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordinatorConfig {
    pub policy: SchedulingPolicy,
    /// Maximum pending + computing requests (0 = unbounded)
    pub max_outstanding: usize,
}

impl CoordinatorConfig {
    pub fn serialized() -> Self {
        Self::default()
    }

    /// Serialized policy with a per-tick expansion budget
    pub fn sliced(expansions_per_tick: usize) -> Self {
        Self {
            policy: SchedulingPolicy::Serialized {
                expansions_per_tick: Some(expansions_per_tick),
            },
            ..Self::default()
        }
    }

    pub fn concurrent(workers: usize) -> Self {
        Self {
            policy: SchedulingPolicy::Concurrent { workers },
            ..Self::default()
        }
    }

    /// Builder: bound the number of outstanding requests
    pub fn with_max_outstanding(mut self, max_outstanding: usize) -> Self {
        self.max_outstanding = max_outstanding;
        self
    }
}

/// Why a request was not accepted. The callback is dropped uninvoked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("request queue is full ({limit} outstanding)")]
    QueueFull { limit: usize },

    #[error("planner workers have shut down")]
    WorkersGone,
}

/// Running counters, mostly for logging
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoordinatorStats {
    /// Accepted requests
    pub submitted: u64,
    /// Callbacks fired
    pub completed: u64,
    /// Callbacks fired with `success == true`
    pub succeeded: u64,
    /// Requests refused by `submit`
    pub rejected: u64,
}

/// Accepts path requests and delivers results through callbacks.
pub struct RequestCoordinator {
    grid: Arc<NavGrid>,
    config: CoordinatorConfig,
    next_id: u64,
    callbacks: HashMap<RequestId, PathCallback>,
    /// Live requests only; completed ones are forgotten
    states: HashMap<RequestId, RequestState>,
    /// Finished results whose callbacks have not fired yet
    ready: VecDeque<(RequestId, PathResult)>,
    stats: CoordinatorStats,
    backend: Backend,
}

enum Backend {
    Serialized(SerialQueue),
    Concurrent(WorkerPool),
}

struct SerialQueue {
    pending: VecDeque<PathRequest>,
    active: Option<ActiveSearch>,
    expansions_per_tick: Option<usize>,
}

/// Promoted at the end of a tick (or on submit when idle); first stepped
/// by the following tick
struct ActiveSearch {
    request: PathRequest,
    search: SlicedSearch,
}

enum WorkerEvent {
    Started(RequestId),
    Finished(RequestId, PathResult),
}

struct WorkerPool {
    jobs: Option<Sender<PathRequest>>,
    events: Receiver<WorkerEvent>,
    handles: Vec<JoinHandle<()>>,
    /// Set on drop; workers skip any job they pick up afterwards
    should_stop: Arc<AtomicBool>,
}

impl RequestCoordinator {
    /// Create a coordinator, spawning workers for the concurrent policy.
    pub fn new(grid: Arc<NavGrid>, config: CoordinatorConfig) -> Result<Self> {
        let backend = match config.policy {
            SchedulingPolicy::Serialized {
                expansions_per_tick,
            } => Backend::Serialized(SerialQueue {
                pending: VecDeque::new(),
                active: None,
                expansions_per_tick,
            }),
            SchedulingPolicy::Concurrent { workers } => {
                Backend::Concurrent(WorkerPool::spawn(Arc::clone(&grid), workers)?)
            }
        };

        info!(
            "[Coordinator] Started with {:?}, max_outstanding={}",
            config.policy, config.max_outstanding
        );
        Ok(Self {
            grid,
            config,
            next_id: 0,
            callbacks: HashMap::new(),
            states: HashMap::new(),
            ready: VecDeque::new(),
            stats: CoordinatorStats::default(),
            backend,
        })
    }

    /// Queue a request. Never blocks.
    ///
    /// The callback fires exactly once from a later [`tick`](Self::tick).
    pub fn submit<F>(
        &mut self,
        start: WorldPoint,
        end: WorldPoint,
        callback: F,
    ) -> std::result::Result<RequestId, SubmitError>
    where
        F: FnOnce(Vec<WorldPoint>, bool) + 'static,
    {
        let limit = self.config.max_outstanding;
        if limit > 0 && self.outstanding() >= limit {
            self.stats.rejected += 1;
            warn!("[Coordinator] Rejected request: {} outstanding", limit);
            return Err(SubmitError::QueueFull { limit });
        }

        let id = RequestId(self.next_id);
        let request = PathRequest { id, start, end };

        match &mut self.backend {
            Backend::Serialized(queue) => {
                queue.pending.push_back(request);
                self.states.insert(id, RequestState::Pending);
                if queue.active.is_none() {
                    queue.promote_next(&self.grid, &mut self.states);
                }
            }
            Backend::Concurrent(pool) => {
                let sent = pool.jobs.as_ref().is_some_and(|jobs| jobs.send(request).is_ok());
                if !sent {
                    self.stats.rejected += 1;
                    warn!("[Coordinator] Rejected request: workers gone");
                    return Err(SubmitError::WorkersGone);
                }
                self.states.insert(id, RequestState::Pending);
            }
        }

        self.next_id += 1;
        self.callbacks.insert(id, Box::new(callback));
        self.stats.submitted += 1;
        debug!(
            "[Coordinator] Accepted {} ({:.2},{:.2}) -> ({:.2},{:.2})",
            id, start.x, start.y, end.x, end.y
        );
        Ok(id)
    }

    /// Advance scheduling and fire callbacks for finished requests.
    ///
    /// Returns the number of callbacks fired. A panicking callback unwinds
    /// out of `tick`; results behind it stay queued for the next tick.
    pub fn tick(&mut self) -> usize {
        let finished = match &mut self.backend {
            Backend::Serialized(queue) => queue.tick(&self.grid, &mut self.states),
            Backend::Concurrent(pool) => pool.drain(None, &mut self.states),
        };
        self.deliver(finished)
    }

    /// Like [`tick`](Self::tick), but in concurrent mode waits up to
    /// `timeout` for the first worker event when none is ready.
    pub fn tick_timeout(&mut self, timeout: Duration) -> usize {
        let finished = match &mut self.backend {
            Backend::Serialized(queue) => queue.tick(&self.grid, &mut self.states),
            Backend::Concurrent(pool) => pool.drain(Some(timeout), &mut self.states),
        };
        self.deliver(finished)
    }

    fn deliver(&mut self, finished: Vec<(RequestId, PathResult)>) -> usize {
        self.ready.extend(finished);
        let mut fired = 0;
        while let Some((id, result)) = self.ready.pop_front() {
            self.states.remove(&id);
            let Some(callback) = self.callbacks.remove(&id) else {
                warn!("[Coordinator] No callback for {}", id);
                continue;
            };
            self.stats.completed += 1;
            if result.success {
                self.stats.succeeded += 1;
            }
            trace!(
                "[Coordinator] Completed {} success={} waypoints={}",
                id,
                result.success,
                result.waypoints.len()
            );
            callback(result.waypoints, result.success);
            fired += 1;
        }
        fired
    }

    /// State of a request; `None` for ids this coordinator never issued.
    pub fn state(&self, id: RequestId) -> Option<RequestState> {
        match self.states.get(&id) {
            Some(state) => Some(*state),
            None if id.0 < self.next_id => Some(RequestState::Completed),
            None => None,
        }
    }

    /// Pending plus computing requests
    #[inline]
    pub fn outstanding(&self) -> usize {
        self.states.len()
    }

    pub fn pending_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| **s == RequestState::Pending)
            .count()
    }

    /// No request is waiting for its callback
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.states.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CoordinatorStats {
        self.stats
    }

    #[inline]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &Arc<NavGrid> {
        &self.grid
    }
}

impl SerialQueue {
    /// Make the oldest pending request the active search
    fn promote_next(&mut self, grid: &NavGrid, states: &mut HashMap<RequestId, RequestState>) {
        if let Some(request) = self.pending.pop_front() {
            let search = SlicedSearch::new(grid, request.start, request.end);
            states.insert(request.id, RequestState::Computing);
            self.active = Some(ActiveSearch { request, search });
        }
    }

    fn tick(
        &mut self,
        grid: &NavGrid,
        states: &mut HashMap<RequestId, RequestState>,
    ) -> Vec<(RequestId, PathResult)> {
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };
        let budget = self.expansions_per_tick.map_or(usize::MAX, |b| b.max(1));
        if active.search.step(grid, budget) == SearchStatus::InProgress {
            return Vec::new();
        }

        let Some(done) = self.active.take() else {
            return Vec::new();
        };
        let result = PathPlanner::new(grid).complete(done.search);
        self.promote_next(grid, states);
        vec![(done.request.id, result)]
    }
}

impl WorkerPool {
    fn spawn(grid: Arc<NavGrid>, workers: usize) -> Result<Self> {
        let workers = if workers == 0 {
            warn!("[Coordinator] 0 workers requested, using 1");
            1
        } else {
            workers
        };

        let (job_tx, job_rx) = unbounded::<PathRequest>();
        let (event_tx, event_rx) = unbounded::<WorkerEvent>();
        let should_stop = Arc::new(AtomicBool::new(false));

        let mut handles = Vec::with_capacity(workers);
        for index in 0..workers {
            let jobs = job_rx.clone();
            let events = event_tx.clone();
            let grid = Arc::clone(&grid);
            let should_stop = Arc::clone(&should_stop);
            let handle = thread::Builder::new()
                .name(format!("marga-planner-{}", index))
                .spawn(move || worker_loop(&grid, &jobs, &events, &should_stop))
                .map_err(MargaError::WorkerSpawn)?;
            handles.push(handle);
        }

        debug!("[Coordinator] Spawned {} planner workers", workers);
        Ok(Self {
            jobs: Some(job_tx),
            events: event_rx,
            handles,
            should_stop,
        })
    }

    /// Apply every available worker event; optionally wait for the first.
    fn drain(
        &mut self,
        wait: Option<Duration>,
        states: &mut HashMap<RequestId, RequestState>,
    ) -> Vec<(RequestId, PathResult)> {
        let mut finished = Vec::new();
        let mut apply = |event: WorkerEvent| match event {
            WorkerEvent::Started(id) => {
                if let Some(state) = states.get_mut(&id) {
                    *state = RequestState::Computing;
                }
            }
            WorkerEvent::Finished(id, result) => finished.push((id, result)),
        };

        if let Some(timeout) = wait {
            match self.events.recv_timeout(timeout) {
                Ok(event) => apply(event),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("[Coordinator] All planner workers exited");
                }
            }
        }
        for event in self.events.try_iter() {
            apply(event);
        }
        finished
    }
}

fn worker_loop(
    grid: &NavGrid,
    jobs: &Receiver<PathRequest>,
    events: &Sender<WorkerEvent>,
    should_stop: &AtomicBool,
) {
    let planner = PathPlanner::new(grid);
    for request in jobs.iter() {
        if should_stop.load(Ordering::SeqCst) {
            break;
        }
        if events.send(WorkerEvent::Started(request.id)).is_err() {
            break;
        }
        let result = planner.plan(request.start, request.end);
        if events.send(WorkerEvent::Finished(request.id, result)).is_err() {
            break;
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Queued jobs are abandoned; only searches already running finish
        self.should_stop.store(true, Ordering::SeqCst);
        self.jobs.take();
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                warn!("[Coordinator] Planner worker panicked");
            }
        }
    }
}
