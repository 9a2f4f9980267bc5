//! Test utilities for marga integration tests.
//!
//! Builds grids from small ASCII maps and records callback deliveries.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use marga::{AsciiTerrain, GridConfig, GridCoord, NavGrid, PenaltyTable, WorldPoint};

/// Walled maze. Cells (1, 1) and (8, 7) are open and connected.
pub const MAZE: &str = "\
##########
#......#.#
#.####.#.#
#.#....#.#
#.#.####.#
#.#......#
#.######.#
#........#
##########";

/// All-open map of the given size
pub fn open_map(columns: usize, rows: usize) -> String {
    vec![".".repeat(columns); rows].join("\n")
}

/// Parse a map with unit tiles centered on the origin
pub fn terrain(map: &str) -> AsciiTerrain {
    AsciiTerrain::parse(map, 1.0, WorldPoint::ZERO).expect("valid test map")
}

/// Build a grid covering `map` one cell per tile
pub fn grid_with(map: &str, blur_radius: usize, penalties: &PenaltyTable) -> NavGrid {
    let terrain = terrain(map);
    let config = GridConfig::covering(&terrain).with_blur_radius(blur_radius);
    NavGrid::build(&config, &terrain, penalties).expect("valid grid config")
}

/// Unblurred, penalty-free grid
pub fn plain_grid(map: &str) -> NavGrid {
    grid_with(map, 0, &PenaltyTable::new())
}

/// World position of a cell center
pub fn center(grid: &NavGrid, x: i32, y: i32) -> WorldPoint {
    grid.cell(GridCoord::new(x, y))
        .expect("cell in bounds")
        .world_position
}

/// Shared log of callback deliveries
#[derive(Clone)]
pub struct Deliveries<T> {
    inner: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone> Deliveries<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn push(&self, value: T) {
        self.inner.borrow_mut().push(value);
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.inner.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }
}
