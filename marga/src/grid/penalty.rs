//! Layer to movement-penalty lookup.

use std::collections::HashMap;

use super::sampler::LayerId;

/// Maps terrain layers to additive movement penalties.
///
/// Unmapped layers, and probes that found no surface, cost nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PenaltyTable {
    penalties: HashMap<LayerId, u32>,
}

impl PenaltyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, layer: LayerId, penalty: u32) -> Self {
        self.insert(layer, penalty);
        self
    }

    /// Set the penalty for a layer, replacing any previous value
    pub fn insert(&mut self, layer: LayerId, penalty: u32) -> Option<u32> {
        self.penalties.insert(layer, penalty)
    }

    /// Penalty for a classification result
    #[inline]
    pub fn lookup(&self, layer: Option<LayerId>) -> u32 {
        layer
            .and_then(|l| self.penalties.get(&l).copied())
            .unwrap_or(0)
    }

    /// Number of mapped layers
    pub fn len(&self) -> usize {
        self.penalties.len()
    }

    /// True when no layer is mapped
    pub fn is_empty(&self) -> bool {
        self.penalties.is_empty()
    }
}

impl FromIterator<(LayerId, u32)> for PenaltyTable {
    fn from_iter<I: IntoIterator<Item = (LayerId, u32)>>(iter: I) -> Self {
        Self {
            penalties: iter.into_iter().collect(),
        }
    }
}
