//! Corridor configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Corridor settings section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorridorSection {
    /// How far before each waypoint the follower may start turning
    #[serde(default = "defaults::turn_distance")]
    pub turn_distance: f32,
}

impl Default for CorridorSection {
    fn default() -> Self {
        Self {
            turn_distance: defaults::turn_distance(),
        }
    }
}
