//! Request scheduling configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Scheduling mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestMode {
    #[default]
    Serialized,
    Concurrent,
}

/// Request settings section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestsSection {
    #[serde(default)]
    pub mode: RequestMode,

    /// Worker threads in concurrent mode
    #[serde(default = "defaults::workers")]
    pub workers: usize,

    /// Maximum outstanding requests (0 = unbounded)
    #[serde(default)]
    pub max_outstanding: usize,
}

impl Default for RequestsSection {
    fn default() -> Self {
        Self {
            mode: RequestMode::default(),
            workers: defaults::workers(),
            max_outstanding: 0,
        }
    }
}
