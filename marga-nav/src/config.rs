//! Runtime settings for MargaNav
//!
//! Planner behaviour lives in the library's YAML config. This file only holds
//! what the command-line front end needs: which map to read, which routes to
//! plan and how the simulated walker moves.

use crate::error::{NavError, Result};
use marga::WorldPoint;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NavConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub walker: WalkerConfig,
    #[serde(default)]
    pub run: RunConfig,
    /// Routes planned when none are given on the command line
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// Input files and terrain placement
#[derive(Clone, Debug, Deserialize)]
pub struct InputConfig {
    /// Library configuration (YAML)
    #[serde(default = "default_marga_config")]
    pub marga_config: PathBuf,

    /// ASCII terrain map
    #[serde(default = "default_map_path")]
    pub map_path: PathBuf,

    /// World size of one map character (default: 1.0)
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,

    /// World position of the map center (default: origin)
    #[serde(default)]
    pub map_center: WorldPoint,

    /// Cover exactly the map instead of the YAML grid rectangle
    #[serde(default = "default_fit_grid_to_map")]
    pub fit_grid_to_map: bool,
}

/// Simulated walker
#[derive(Clone, Debug, Deserialize)]
pub struct WalkerConfig {
    /// Travel speed in world units per second (default: 2.0)
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Simulation step in seconds (default: 0.05)
    #[serde(default = "default_time_step")]
    pub time_step: f32,

    /// Give up after this many steps (default: 20000)
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

/// Coordinator driving
#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    /// Stop ticking after this many ticks (default: 100000)
    #[serde(default = "default_max_ticks")]
    pub max_ticks: usize,

    /// How long one tick may wait for worker results, in milliseconds
    /// (default: 10)
    #[serde(default = "default_tick_wait_ms")]
    pub tick_wait_ms: u64,
}

/// One planned route
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct RouteConfig {
    pub from: WorldPoint,
    pub to: WorldPoint,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            marga_config: default_marga_config(),
            map_path: default_map_path(),
            tile_size: default_tile_size(),
            map_center: WorldPoint::ZERO,
            fit_grid_to_map: default_fit_grid_to_map(),
        }
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            time_step: default_time_step(),
            max_steps: default_max_steps(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            tick_wait_ms: default_tick_wait_ms(),
        }
    }
}

// Default value functions
fn default_marga_config() -> PathBuf {
    PathBuf::from("configs/marga.yaml")
}
fn default_map_path() -> PathBuf {
    PathBuf::from("maps/demo.txt")
}
fn default_tile_size() -> f32 {
    1.0
}
fn default_fit_grid_to_map() -> bool {
    true
}
fn default_speed() -> f32 {
    2.0
}
fn default_time_step() -> f32 {
    0.05
}
fn default_max_steps() -> usize {
    20_000
}
fn default_max_ticks() -> usize {
    100_000
}
fn default_tick_wait_ms() -> u64 {
    10
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NavError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: NavConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Distance the walker covers in one simulation step
    pub fn step_length(&self) -> f32 {
        self.walker.speed * self.walker.time_step
    }

    fn validate(&self) -> Result<()> {
        if !(self.step_length().is_finite() && self.step_length() > 0.0) {
            return Err(NavError::Config(format!(
                "walker speed * time_step must be positive, got {} * {}",
                self.walker.speed, self.walker.time_step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: NavConfig = toml::from_str("").unwrap();
        assert_eq!(config.input.map_path, PathBuf::from("maps/demo.txt"));
        assert!(config.input.fit_grid_to_map);
        assert!(config.routes.is_empty());
        assert!((config.step_length() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_routes_and_overrides() {
        let config: NavConfig = toml::from_str(
            r#"
            [input]
            map_path = "maps/other.txt"
            tile_size = 0.5
            map_center = { x = 2.0, y = -1.0 }

            [walker]
            speed = 4.0

            [[routes]]
            from = { x = -3.0, y = 0.0 }
            to = { x = 3.0, y = 1.5 }
            "#,
        )
        .unwrap();
        assert_eq!(config.input.tile_size, 0.5);
        assert_eq!(config.input.map_center, WorldPoint::new(2.0, -1.0));
        assert_eq!(config.walker.time_step, 0.05);
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].to, WorldPoint::new(3.0, 1.5));
    }

    #[test]
    fn test_zero_speed_rejected() {
        let config = NavConfig {
            walker: WalkerConfig {
                speed: 0.0,
                ..WalkerConfig::default()
            },
            ..NavConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
