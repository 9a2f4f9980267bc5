//! Kinematic point walker that follows a corridor.
//!
//! Moves a fixed distance per step towards the cursor's current target and
//! keeps its heading when it lands exactly on a waypoint, so it always
//! carries on across the finish line. A walker that starts on its target
//! heads across that target's boundary instead.

use marga::{CorridorPath, FollowProgress, WorldPoint};
use tracing::{debug, trace};

/// Result of one walk
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkOutcome {
    /// Finish line crossed within the step limit
    pub finished: bool,
    pub steps: usize,
    pub distance: f32,
    pub final_position: WorldPoint,
}

/// Point walker with a constant step length
#[derive(Clone, Debug)]
pub struct Walker {
    position: WorldPoint,
    heading: WorldPoint,
    step_length: f32,
}

impl Walker {
    pub fn new(position: WorldPoint, step_length: f32) -> Self {
        Self {
            position,
            heading: WorldPoint::ZERO,
            step_length,
        }
    }

    /// Turn towards `target` (unless already on it) and move one step.
    pub fn step_towards(&mut self, target: WorldPoint) {
        let to_target = target - self.position;
        if to_target.length() > 1e-4 {
            self.heading = to_target.normalize();
        }
        self.position = self.position + self.heading * self.step_length;
    }

    /// Follow `corridor` until its finish line is crossed or `max_steps` run out.
    pub fn follow(&mut self, corridor: &CorridorPath, max_steps: usize) -> WalkOutcome {
        let mut cursor = corridor.cursor();
        let mut steps = 0;
        let mut distance = 0.0;
        let mut last_index = None;

        let finished = loop {
            match cursor.advance(self.position) {
                FollowProgress::Finished => break true,
                FollowProgress::Heading(index) => {
                    if steps >= max_steps {
                        break false;
                    }
                    if last_index != Some(index) {
                        trace!("Heading for waypoint {} at step {}", index, steps);
                        last_index = Some(index);
                    }
                    let Some(target) = cursor.target() else {
                        break true;
                    };
                    if self.heading == WorldPoint::ZERO {
                        if let Some(boundary) = corridor.boundaries().get(index) {
                            self.heading = boundary.crossing_direction();
                        }
                    }
                    let before = self.position;
                    self.step_towards(target);
                    distance += before.distance(&self.position);
                    steps += 1;
                }
            }
        };

        debug!(
            "Walk ended after {} steps, finished={}, {:.2} to finish line",
            steps,
            finished,
            cursor.distance_to_finish(self.position)
        );
        WalkOutcome {
            finished,
            steps,
            distance,
            final_position: self.position,
        }
    }
}
