//! Default value functions for serde deserialization.

use crate::core::WorldPoint;

pub fn origin() -> WorldPoint {
    WorldPoint::ZERO
}

pub fn world_size() -> WorldPoint {
    WorldPoint::new(30.0, 30.0)
}

pub fn cell_radius() -> f32 {
    0.5
}

pub fn blur_radius() -> usize {
    3
}

pub fn obstacle_proximity_penalty() -> u32 {
    10
}

pub fn turn_distance() -> f32 {
    1.0
}

pub fn workers() -> usize {
    4
}
