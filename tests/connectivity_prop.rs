//! Property tests for rotation and route search.
//!
//! Invariants covered:
//! - A check never changes the grid and gives the same answer twice.
//! - Four taps on any tile restore its connections and the check result.
//! - `is_connected` agrees with whether the Goal cell is powered.
//! - `powered_cells` matches an independent depth-first walk over mutual
//!   connections.

use proptest::prelude::*;
use rail_puzzle::core::{is_connected, powered_cells, Level, TileGrid};
use rail_puzzle::types::QUARTER_TURNS;

/// A random level with exactly one Start and one Goal, plus tap positions.
fn level_and_taps() -> impl Strategy<Value = (Level, Vec<(usize, usize)>)> {
    (1usize..6, 1usize..6)
        .prop_filter("room for both stations", |(rows, cols)| rows * cols >= 2)
        .prop_flat_map(|(rows, cols)| {
            let n = rows * cols;
            (
                Just((rows, cols)),
                prop::collection::vec(0u8..=6, n),
                0..n,
                0..n - 1,
                prop::collection::vec((0..rows, 0..cols), 0..40),
            )
        })
        .prop_map(|((rows, cols), mut codes, start, goal_offset, taps)| {
            let goal = (start + 1 + goal_offset) % codes.len();
            codes[start] = 7;
            codes[goal] = 8;
            let grid: Vec<Vec<u8>> = codes.chunks(cols).map(|r| r.to_vec()).collect();
            debug_assert_eq!(grid.len(), rows);
            let level = Level::from_rows(&grid).unwrap();
            (level, taps)
        })
}

fn reference_powered(grid: &TileGrid, level: &Level) -> Vec<bool> {
    let mut seen = vec![false; grid.rows() * grid.cols()];
    let Some(start) = level.start() else {
        return seen;
    };
    let mut stack = vec![start];
    seen[start.0 * grid.cols() + start.1] = true;
    while let Some((row, col)) = stack.pop() {
        let Some(tile) = grid.tile_at(row, col) else {
            continue;
        };
        for dir in tile.connections() {
            let Some((nr, nc)) = grid.neighbor(row, col, dir) else {
                continue;
            };
            let Some(next) = grid.tile_at(nr, nc) else {
                continue;
            };
            if next.connects(dir.opposite()) && !seen[nr * grid.cols() + nc] {
                seen[nr * grid.cols() + nc] = true;
                stack.push((nr, nc));
            }
        }
    }
    seen
}

fn played(level: &Level, taps: &[(usize, usize)]) -> TileGrid {
    let mut grid = TileGrid::from_level(level);
    for &(row, col) in taps {
        grid.rotate_at(row, col);
    }
    grid
}

proptest! {
    #[test]
    fn check_is_pure_and_stable((level, taps) in level_and_taps()) {
        let grid = played(&level, &taps);
        let before = grid.states();
        let first = is_connected(&grid, &level);
        prop_assert_eq!(is_connected(&grid, &level), first);
        prop_assert_eq!(grid.states(), before);
    }

    #[test]
    fn four_taps_restore_connections(
        (level, taps) in level_and_taps(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut grid = played(&level, &taps);
        let connected = is_connected(&grid, &level);
        let (row, col) = (
            pick.index(grid.rows() * grid.cols()) / grid.cols(),
            pick.index(grid.rows() * grid.cols()) % grid.cols(),
        );
        let conns = grid.tile_at(row, col).map(|t| t.connections());

        for _ in 0..QUARTER_TURNS {
            grid.rotate_at(row, col);
        }
        prop_assert_eq!(grid.tile_at(row, col).map(|t| t.connections()), conns);
        prop_assert_eq!(is_connected(&grid, &level), connected);
    }

    #[test]
    fn connected_iff_goal_powered((level, taps) in level_and_taps()) {
        let grid = played(&level, &taps);
        let (goal_row, goal_col) = level.goal().unwrap();
        let powered = powered_cells(&grid, &level);
        prop_assert_eq!(
            is_connected(&grid, &level),
            powered[goal_row * grid.cols() + goal_col]
        );
    }

    #[test]
    fn powered_cells_match_reference_walk((level, taps) in level_and_taps()) {
        let grid = played(&level, &taps);
        prop_assert_eq!(powered_cells(&grid, &level), reference_powered(&grid, &level));
    }
}
