//! Navigation grid storage and construction.
//!
//! A [`NavGrid`] is built once from a [`GridConfig`], a [`TerrainSampler`]
//! and a [`PenaltyTable`]. After construction it is read-only and can be
//! shared between searches (and threads) behind an `Arc`.
//!
//! Cells are stored row-major with `y = 0` at the bottom of the covered
//! rectangle, so grid y grows with world y.

use log::{debug, info};

use super::blur::box_blur;
use super::config::{GridConfig, GridError};
use super::penalty::PenaltyTable;
use super::sampler::TerrainSampler;
use crate::core::{Cell, GridCoord, WorldPoint};

/// Cost-annotated grid of cells covering an axis-aligned world rectangle.
#[derive(Clone, Debug)]
pub struct NavGrid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    cell_radius: f32,
    /// Center of the covered rectangle
    origin: WorldPoint,
    world_size: WorldPoint,
    min_penalty: u32,
    max_penalty: u32,
}

impl NavGrid {
    /// Sample the terrain at every cell center and build the grid.
    pub fn build<S>(
        config: &GridConfig,
        sampler: &S,
        penalties: &PenaltyTable,
    ) -> Result<Self, GridError>
    where
        S: TerrainSampler + ?Sized,
    {
        let (width, height) = config.dimensions()?;
        let d = config.cell_diameter();
        let bottom_left = config.origin - config.world_size * 0.5;

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let center = WorldPoint::new(
                    bottom_left.x + (x as f32 + 0.5) * d,
                    bottom_left.y + (y as f32 + 0.5) * d,
                );
                let walkable = !sampler.is_obstructed(center, config.cell_radius);
                let mut penalty = penalties.lookup(sampler.classify(center));
                if !walkable {
                    penalty = penalty.saturating_add(config.obstacle_proximity_penalty);
                }
                cells.push(Cell::new(
                    GridCoord::new(x as i32, y as i32),
                    walkable,
                    penalty,
                    center,
                ));
            }
        }

        let mut grid = Self {
            cells,
            width,
            height,
            cell_radius: config.cell_radius,
            origin: config.origin,
            world_size: config.world_size,
            min_penalty: 0,
            max_penalty: 0,
        };
        grid.smooth_penalties(config.blur_radius);

        info!(
            "[NavGrid] Built {}x{} grid, {} walkable, penalty range {:?}",
            width,
            height,
            grid.walkable_count(),
            grid.penalty_range()
        );
        Ok(grid)
    }

    /// Blur the penalty layer and refresh the recorded penalty range.
    fn smooth_penalties(&mut self, radius: usize) {
        let mut values: Vec<u32> = self.cells.iter().map(|c| c.movement_penalty).collect();
        box_blur(&mut values, self.width, self.height, radius);
        for (cell, value) in self.cells.iter_mut().zip(&values) {
            cell.movement_penalty = *value;
        }

        self.min_penalty = values.iter().copied().min().unwrap_or(0);
        self.max_penalty = values.iter().copied().max().unwrap_or(0);
        debug!(
            "[NavGrid] Smoothed penalties with radius {} -> [{}, {}]",
            radius, self.min_penalty, self.max_penalty
        );
    }

    // ========================================================================
    // Dimensions
    // ========================================================================

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn cell_radius(&self) -> f32 {
        self.cell_radius
    }

    #[inline]
    pub fn cell_diameter(&self) -> f32 {
        self.cell_radius * 2.0
    }

    /// Center of the covered rectangle
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    #[inline]
    pub fn world_size(&self) -> WorldPoint {
        self.world_size
    }

    /// Smallest and largest penalty after smoothing
    #[inline]
    pub fn penalty_range(&self) -> (u32, u32) {
        (self.min_penalty, self.max_penalty)
    }

    /// Number of walkable cells
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.walkable).count()
    }

    // ========================================================================
    // Coordinate mapping
    // ========================================================================

    /// Is the coordinate inside the grid?
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Flat index of a coordinate, `None` when out of bounds
    #[inline]
    pub fn index_of(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Coordinate of a flat index
    #[inline]
    pub fn coord_of(&self, index: usize) -> GridCoord {
        let x = (index % self.width) as i32;
        let y = (index / self.width) as i32;
        GridCoord::new(x, y)
    }

    /// Cell at a coordinate
    #[inline]
    pub fn cell(&self, coord: GridCoord) -> Option<&Cell> {
        self.index_of(coord).map(|i| &self.cells[i])
    }

    /// Cell at a flat index.
    ///
    /// # Panics
    /// If `index >= cell_count()`.
    #[inline]
    pub fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// All cells, row-major from the bottom row
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Coordinate of the cell nearest to a world point.
    ///
    /// Points outside the covered rectangle are clamped onto its border, so
    /// the result is always in bounds.
    pub fn coord_from_world_point(&self, point: WorldPoint) -> GridCoord {
        let percent = |offset: f32, extent: f32| -> f32 {
            let p = (offset + extent * 0.5) / extent;
            if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
        };
        let px = percent(point.x - self.origin.x, self.world_size.x);
        let py = percent(point.y - self.origin.y, self.world_size.y);

        let x = ((self.width - 1) as f32 * px).round() as i32;
        let y = ((self.height - 1) as f32 * py).round() as i32;
        GridCoord::new(x, y)
    }

    /// Cell nearest to a world point. Never fails.
    pub fn cell_from_world_point(&self, point: WorldPoint) -> &Cell {
        let coord = self.coord_from_world_point(point);
        &self.cells[coord.y as usize * self.width + coord.x as usize]
    }

    // ========================================================================
    // Neighborhood
    // ========================================================================

    /// In-bounds neighbor indices of a cell index, in compass order
    /// N, NE, E, SE, S, SW, W, NW.
    #[inline]
    pub fn neighbor_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.coord_of(index)
            .neighbors_8()
            .into_iter()
            .filter_map(move |n| self.index_of(n))
    }

    /// Up to 8 in-bounds neighbors of a cell, in compass order
    /// N, NE, E, SE, S, SW, W, NW.
    pub fn neighbors<'a>(&'a self, cell: &Cell) -> impl Iterator<Item = &'a Cell> + 'a {
        cell.coord
            .neighbors_8()
            .into_iter()
            .filter_map(move |n| self.cell(n))
    }

    // ========================================================================
    // Debug
    // ========================================================================

    /// Walkability and penalty layer as text, top row first.
    ///
    /// See [`Cell::as_char`] for the legend.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height).rev() {
            let row = &self.cells[y * self.width..(y + 1) * self.width];
            out.extend(row.iter().map(Cell::as_char));
            out.push('\n');
        }
        out
    }
}
