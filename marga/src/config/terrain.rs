//! Terrain configuration section.

use serde::{Deserialize, Serialize};

use crate::grid::{LayerId, PenaltyTable};

/// Terrain settings section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TerrainSection {
    /// Movement penalty per surface layer. Unlisted layers cost nothing.
    #[serde(default)]
    pub layer_penalties: Vec<LayerPenalty>,
}

/// One entry of the layer penalty table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerPenalty {
    pub layer: u32,
    pub penalty: u32,
}

impl TerrainSection {
    /// Build the lookup table. A layer listed twice keeps its last penalty.
    pub fn to_penalty_table(&self) -> PenaltyTable {
        self.layer_penalties
            .iter()
            .map(|entry| (LayerId(entry.layer), entry.penalty))
            .collect()
    }
}
