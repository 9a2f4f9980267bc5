//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::grid::{GridError, TerrainParseError};
use crate::requests::SubmitError;

/// Errors surfaced by the marga library
#[derive(Error, Debug)]
pub enum MargaError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Terrain error: {0}")]
    Terrain(#[from] TerrainParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("Request rejected: {0}")]
    Submit(#[from] SubmitError),

    #[error("Failed to spawn planner worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MargaError>;
