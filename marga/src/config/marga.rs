//! Main MargaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::corridor::CorridorSection;
use super::error::ConfigLoadError;
use super::grid::GridSection;
use super::planner::PlannerSection;
use super::requests::{RequestMode, RequestsSection};
use super::terrain::TerrainSection;
use crate::grid::{GridConfig, PenaltyTable};
use crate::requests::{CoordinatorConfig, SchedulingPolicy};

/// Full marga configuration loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MargaConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridSection,

    /// Terrain layer penalties
    #[serde(default)]
    pub terrain: TerrainSection,

    /// Search settings
    #[serde(default)]
    pub planner: PlannerSection,

    /// Path following settings
    #[serde(default)]
    pub corridor: CorridorSection,

    /// Request scheduling settings
    #[serde(default)]
    pub requests: RequestsSection,
}

impl MargaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigLoadError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/marga.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/marga.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Reject settings no grid or corridor can be built from
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.grid_config()
            .validate()
            .map_err(|e| ConfigLoadError::Invalid(e.to_string()))?;
        let turn = self.corridor.turn_distance;
        if !(turn.is_finite() && turn >= 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "corridor.turn_distance must be finite and non-negative, got {}",
                turn
            )));
        }
        Ok(())
    }

    /// Convert to GridConfig
    pub fn grid_config(&self) -> GridConfig {
        self.grid.to_grid_config()
    }

    /// Layer penalty lookup
    pub fn penalty_table(&self) -> PenaltyTable {
        self.terrain.to_penalty_table()
    }

    /// Convert to CoordinatorConfig
    pub fn coordinator_config(&self) -> CoordinatorConfig {
        let policy = match self.requests.mode {
            RequestMode::Serialized => SchedulingPolicy::Serialized {
                expansions_per_tick: self.planner.expansion_budget(),
            },
            RequestMode::Concurrent => SchedulingPolicy::Concurrent {
                workers: self.requests.workers,
            },
        };
        CoordinatorConfig {
            policy,
            max_outstanding: self.requests.max_outstanding,
        }
    }
}
