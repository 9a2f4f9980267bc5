//! Search integration tests for marga.
//!
//! Exercises the grid, heap and planner together on small hand-written maps
//! and on seeded random terrain.

mod common;

use std::collections::BinaryHeap;
use std::cmp::Reverse;

use common::{MAZE, center, grid_with, open_map, plain_grid};
use marga::{
    Endpoint, GridCoord, IndexedPriorityQueue, LayerId, NavGrid, PathFailure, PathPlanner,
    PenaltyTable, SearchStatus, SlicedSearch, WorldPoint,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random map: `#` with probability `wall`, otherwise a layer digit 0-3.
fn random_map(rng: &mut StdRng, columns: usize, rows: usize, wall: f64) -> String {
    (0..rows)
        .map(|_| {
            (0..columns)
                .map(|_| {
                    if rng.gen_bool(wall) {
                        '#'
                    } else {
                        char::from(b'0' + rng.gen_range(0..4u8))
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn layered_penalties() -> PenaltyTable {
    PenaltyTable::new()
        .with(LayerId(1), 5)
        .with(LayerId(2), 20)
        .with(LayerId(3), 40)
}

/// Plain Dijkstra with the same edge cost as the planner
fn reference_cost(grid: &NavGrid, start: usize, end: usize) -> Option<u32> {
    let mut best = vec![u32::MAX; grid.cell_count()];
    let mut queue = BinaryHeap::new();
    best[start] = 0;
    queue.push(Reverse((0u32, start)));

    while let Some(Reverse((g, current))) = queue.pop() {
        if current == end {
            return Some(g);
        }
        if g > best[current] {
            continue;
        }
        let cell = grid.cell_at(current);
        for neighbor in grid.neighbor_indices(current) {
            let next = grid.cell_at(neighbor);
            if !next.walkable {
                continue;
            }
            let cost = g + cell.coord.octile_distance(&next.coord) + cell.movement_penalty;
            if cost < best[neighbor] {
                best[neighbor] = cost;
                queue.push(Reverse((cost, neighbor)));
            }
        }
    }
    None
}

fn assert_chain_is_connected(grid: &NavGrid, chain: &[GridCoord]) {
    for pair in chain.windows(2) {
        assert_eq!(pair[0].chebyshev_distance(&pair[1]), 1, "gap in {:?}", pair);
    }
    for coord in chain {
        assert!(grid.cell(*coord).is_some_and(|c| c.walkable));
    }
}

// ============================================================================
// Basic Search
// ============================================================================

#[test]
fn test_open_five_by_five_diagonal() {
    let grid = plain_grid(&open_map(5, 5));
    let planner = PathPlanner::new(&grid);

    let search = planner.find_path(WorldPoint::new(-2.0, -2.0), WorldPoint::new(2.0, 2.0));
    assert!(search.success);
    assert_eq!(search.cost, 56);
    assert_eq!(search.chain.first(), Some(&GridCoord::new(0, 0)));
    assert_eq!(search.chain.last(), Some(&GridCoord::new(4, 4)));
    assert_eq!(search.length_cells(), 5);

    let path = planner.plan(WorldPoint::new(-2.0, -2.0), WorldPoint::new(2.0, 2.0));
    assert!(path.success);
    assert_eq!(path.waypoints, vec![center(&grid, 4, 4)]);
}

#[test]
fn test_blocked_start_does_no_work() {
    let grid = plain_grid("#....\n.....\n.....");
    let search = PathPlanner::new(&grid).find_path(center(&grid, 0, 2), center(&grid, 4, 0));
    assert!(!search.success);
    assert!(search.chain.is_empty());
    assert_eq!(search.nodes_expanded, 0);
    assert_eq!(
        search.failure,
        Some(PathFailure::InvalidEndpoint(Endpoint::Start))
    );
}

#[test]
fn test_enclosed_end_fails() {
    let grid = plain_grid(
        "\
.......
...###.
...#.#.
...###.
.......",
    );
    let search = PathPlanner::new(&grid).find_path(center(&grid, 0, 0), center(&grid, 4, 2));
    assert!(!search.success);
    assert!(search.chain.is_empty());
    assert_eq!(search.failure, Some(PathFailure::NoPathFound));
    assert!(search.nodes_expanded > 0);
    assert_eq!(search.length_cells(), 0);

    assert!(!marga::pathfinding::path_exists(&grid, center(&grid, 0, 0), center(&grid, 4, 2)));
    assert!(marga::pathfinding::path_exists(&grid, center(&grid, 0, 0), center(&grid, 6, 4)));
}

#[test]
fn test_maze_route() {
    let grid = plain_grid(MAZE);
    let search = PathPlanner::new(&grid).find_path(center(&grid, 1, 1), center(&grid, 8, 7));
    assert!(search.success);
    assert_eq!(search.chain[0], GridCoord::new(1, 1));
    assert_eq!(*search.chain.last().unwrap(), GridCoord::new(8, 7));
    assert_chain_is_connected(&grid, &search.chain);

    let start = grid.index_of(GridCoord::new(1, 1)).unwrap();
    let end = grid.index_of(GridCoord::new(8, 7)).unwrap();
    assert_eq!(Some(search.cost), reference_cost(&grid, start, end));

    let path = PathPlanner::new(&grid).plan(center(&grid, 1, 1), center(&grid, 8, 7));
    assert!(path.waypoints.len() >= 2);
    let polyline: f32 = path
        .waypoints
        .windows(2)
        .map(|w| w[0].distance(&w[1]))
        .sum();
    assert!((path.length() - polyline).abs() < 1e-4);
    assert!(path.length() > 0.0);
}

#[test]
fn test_repeated_search_is_identical() {
    let grid = plain_grid(MAZE);
    let planner = PathPlanner::new(&grid);
    let first = planner.find_path(center(&grid, 1, 1), center(&grid, 8, 7));
    for _ in 0..3 {
        assert_eq!(planner.find_path(center(&grid, 1, 1), center(&grid, 8, 7)), first);
    }
}

// ============================================================================
// Coordinate Mapping
// ============================================================================

#[test]
fn test_world_points_always_map_in_bounds() {
    let grid = plain_grid(&open_map(13, 7));
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..2000 {
        let p = WorldPoint::new(rng.gen_range(-1e4..1e4), rng.gen_range(-1e4..1e4));
        let cell = grid.cell_from_world_point(p);
        assert!(grid.is_valid_coord(cell.coord), "{:?} -> {:?}", p, cell.coord);
    }
    for cell in grid.cells() {
        assert_eq!(grid.cell_from_world_point(cell.world_position).coord, cell.coord);
    }
}

// ============================================================================
// Random Terrain
// ============================================================================

#[test]
fn test_costs_match_dijkstra_on_random_terrain() {
    let mut rng = StdRng::seed_from_u64(2024);

    for round in 0..20 {
        let map = random_map(&mut rng, 24, 16, 0.25);
        let grid = grid_with(&map, round % 3, &layered_penalties());
        let planner = PathPlanner::new(&grid);

        for _ in 0..5 {
            let a = GridCoord::new(rng.gen_range(0..24), rng.gen_range(0..16));
            let b = GridCoord::new(rng.gen_range(0..24), rng.gen_range(0..16));
            let (Some(start), Some(end)) = (grid.cell(a), grid.cell(b)) else {
                continue;
            };
            if !start.walkable || !end.walkable {
                continue;
            }

            let search = planner.find_path(start.world_position, end.world_position);
            let expected = reference_cost(
                &grid,
                grid.index_of(a).unwrap(),
                grid.index_of(b).unwrap(),
            );
            match expected {
                Some(cost) => {
                    assert!(search.success, "round {} {:?}->{:?}", round, a, b);
                    assert_eq!(search.cost, cost);
                    assert_chain_is_connected(&grid, &search.chain);
                }
                None => {
                    assert!(!search.success);
                    assert_eq!(search.failure, Some(PathFailure::NoPathFound));
                }
            }
        }
    }
}

#[test]
fn test_sliced_search_matches_one_shot() {
    let mut rng = StdRng::seed_from_u64(99);

    for budget in [1usize, 3, 50] {
        let map = random_map(&mut rng, 20, 20, 0.2);
        let grid = grid_with(&map, 1, &layered_penalties());
        let walkable: Vec<_> = grid.cells().iter().filter(|c| c.walkable).collect();
        let start = walkable[0].world_position;
        let end = walkable[walkable.len() - 1].world_position;

        let one_shot = PathPlanner::new(&grid).find_path(start, end);

        let mut search = SlicedSearch::new(&grid, start, end);
        let mut steps = 0;
        while search.step(&grid, budget) == SearchStatus::InProgress {
            steps += 1;
        }
        let sliced = search.finish(&grid);

        assert_eq!(sliced, one_shot);
        if budget == 1 {
            assert!(steps + 1 >= sliced.nodes_expanded);
        }
    }
}

// ============================================================================
// Heap Property
// ============================================================================

#[test]
fn test_heap_random_operations() {
    const CAPACITY: usize = 64;
    let mut rng = StdRng::seed_from_u64(31337);
    let mut queue = IndexedPriorityQueue::new(CAPACITY);
    let mut model: Vec<Option<u32>> = vec![None; CAPACITY];

    for _ in 0..5000 {
        match rng.gen_range(0..3) {
            0 => {
                let id = rng.gen_range(0..CAPACITY);
                if model[id].is_none() {
                    let key = rng.gen_range(0..1000);
                    queue.insert(id, key);
                    model[id] = Some(key);
                }
            }
            1 => {
                let id = rng.gen_range(0..CAPACITY);
                if let Some(old) = model[id] {
                    let key = rng.gen_range(0..=old);
                    queue.decrease_key(id, key);
                    model[id] = Some(key);
                }
            }
            _ => {
                let expected_min = model.iter().flatten().min().copied();
                match queue.extract_min() {
                    Some((id, key)) => {
                        assert_eq!(Some(key), expected_min);
                        assert_eq!(model[id], Some(key));
                        model[id] = None;
                    }
                    None => assert_eq!(expected_min, None),
                }
            }
        }

        assert!(queue.is_consistent());
        assert_eq!(queue.len(), model.iter().flatten().count());
        for (id, key) in model.iter().enumerate() {
            assert_eq!(queue.contains(id), key.is_some());
        }
    }
}
