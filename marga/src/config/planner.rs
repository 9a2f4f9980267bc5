//! Planner configuration section.

use serde::{Deserialize, Serialize};

/// Planner settings section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerSection {
    /// Node expansions per tick for serialized scheduling (0 = whole search
    /// in one tick)
    #[serde(default)]
    pub expansions_per_tick: usize,
}

impl PlannerSection {
    /// Budget as understood by the coordinator
    pub fn expansion_budget(&self) -> Option<usize> {
        (self.expansions_per_tick > 0).then_some(self.expansions_per_tick)
    }
}
