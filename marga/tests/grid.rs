//! Navigation grid construction tests.

mod common;

use common::{MAZE, grid_with, open_map, plain_grid, terrain};
use marga::{GridConfig, GridCoord, GridError, LayerId, NavGrid, PenaltyTable, WorldPoint};

fn penalty(grid: &NavGrid, x: i32, y: i32) -> u32 {
    grid.cell(GridCoord::new(x, y)).unwrap().movement_penalty
}

// ============================================================================
// Penalty Smoothing
// ============================================================================

#[test]
fn test_uniform_layer_survives_blur() {
    let map = vec!["1111111"; 6].join("\n");
    let penalties = PenaltyTable::new().with(LayerId(1), 7);

    for radius in [0, 1, 3, 10] {
        let grid = grid_with(&map, radius, &penalties);
        assert!(grid.cells().iter().all(|c| c.movement_penalty == 7));
        assert_eq!(grid.penalty_range(), (7, 7));
    }
}

#[test]
fn test_obstacle_bleeds_into_neighbors() {
    let mut rows = vec![".........".to_string(); 9];
    rows[4] = "....#....".to_string();
    let grid = grid_with(&rows.join("\n"), 1, &PenaltyTable::new());

    let center = grid.cell(GridCoord::new(4, 4)).unwrap();
    assert!(!center.walkable);
    // (10 + 4) / 9 with the default proximity penalty of 10
    assert_eq!(penalty(&grid, 3, 4), 1);
    assert_eq!(penalty(&grid, 5, 5), 1);
    assert_eq!(penalty(&grid, 0, 0), 0);
    assert_eq!(penalty(&grid, 8, 8), 0);
}

#[test]
fn test_first_and_last_column_are_symmetric() {
    let left = "\
#......
#......
#..2...
#......
#......";
    let right: String = left
        .lines()
        .map(|line| line.chars().rev().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");
    let penalties = PenaltyTable::new().with(LayerId(2), 30);

    let a = grid_with(left, 2, &penalties);
    let b = grid_with(&right, 2, &penalties);
    assert_eq!(a.width(), b.width());

    let last = a.width() as i32 - 1;
    for y in 0..a.height() as i32 {
        for x in 0..a.width() as i32 {
            let ca = a.cell(GridCoord::new(x, y)).unwrap();
            let cb = b.cell(GridCoord::new(last - x, y)).unwrap();
            assert_eq!(ca.walkable, cb.walkable, "walkable at ({}, {})", x, y);
            assert_eq!(
                ca.movement_penalty, cb.movement_penalty,
                "penalty at ({}, {})",
                x, y
            );
        }
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_half_size_cells_split_each_tile() {
    let terrain = terrain(MAZE);
    let config = GridConfig {
        cell_radius: 0.25,
        ..GridConfig::covering(&terrain)
    }
    .with_blur_radius(0);
    let grid = NavGrid::build(&config, &terrain, &PenaltyTable::new()).unwrap();

    assert_eq!((grid.width(), grid.height()), (20, 18));
    let open_tiles = MAZE.chars().filter(|&c| c == '.').count();
    assert_eq!(grid.walkable_count(), 4 * open_tiles);
}

#[test]
fn test_render_matches_walkability() {
    let grid = plain_grid(MAZE);
    let rendered = grid.render_ascii();
    // Unblurred and penalty free, so the render reproduces the map
    assert_eq!(rendered.trim_end(), MAZE);
}

#[test]
fn test_grid_offset_from_origin() {
    let terrain = marga::AsciiTerrain::parse(&open_map(4, 2), 1.0, WorldPoint::new(10.0, -5.0))
        .unwrap();
    let grid = NavGrid::build(
        &GridConfig::covering(&terrain).with_blur_radius(0),
        &terrain,
        &PenaltyTable::new(),
    )
    .unwrap();

    let corner = grid.cell(GridCoord::new(0, 0)).unwrap().world_position;
    assert_eq!(corner, WorldPoint::new(8.5, -5.5));
    assert_eq!(
        grid.cell_from_world_point(WorldPoint::new(11.9, -4.1)).coord,
        GridCoord::new(3, 1)
    );
}

#[test]
fn test_invalid_config_is_rejected() {
    let terrain = terrain(&open_map(3, 3));
    let bad_radius = GridConfig {
        cell_radius: 0.0,
        ..GridConfig::covering(&terrain)
    };
    assert_eq!(
        NavGrid::build(&bad_radius, &terrain, &PenaltyTable::new()).unwrap_err(),
        GridError::InvalidCellRadius(0.0)
    );

    let tiny = GridConfig {
        world_size: WorldPoint::new(0.2, 0.2),
        ..GridConfig::covering(&terrain)
    };
    assert!(matches!(
        NavGrid::build(&tiny, &terrain, &PenaltyTable::new()),
        Err(GridError::SmallerThanCell { .. })
    ));
}
