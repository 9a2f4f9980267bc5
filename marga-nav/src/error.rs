//! Error types for MargaNav

use thiserror::Error;

/// MargaNav error type
#[derive(Error, Debug)]
pub enum NavError {
    #[error(transparent)]
    Marga(#[from] marga::MargaError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid point '{0}': expected x,y")]
    Point(String),

    #[error("No routes to plan: pass --to or add [[routes]] to the nav config")]
    NoRoutes,

    #[error("Gave up after {ticks} ticks with {outstanding} requests outstanding")]
    TickLimit { ticks: usize, outstanding: usize },
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

impl From<marga::ConfigLoadError> for NavError {
    fn from(e: marga::ConfigLoadError) -> Self {
        NavError::Marga(e.into())
    }
}

impl From<marga::GridError> for NavError {
    fn from(e: marga::GridError) -> Self {
        NavError::Marga(e.into())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
