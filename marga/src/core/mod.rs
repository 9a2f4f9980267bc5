//! Core types for the marga navigation grid.
//!
//! - [`Cell`]: one grid cell with walkability and movement penalty
//! - [`GridCoord`] and [`WorldPoint`]: coordinate types
//! - [`STRAIGHT_STEP_COST`] / [`DIAGONAL_STEP_COST`]: integer octile step costs

mod cell;
mod point;

pub use cell::Cell;
pub use point::{DIAGONAL_STEP_COST, GridCoord, STRAIGHT_STEP_COST, WorldPoint};
