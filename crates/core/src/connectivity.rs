//! Connectivity checker - does track link Start to Goal?
//!
//! Breadth-first search from the Start station. Two neighbouring tiles are
//! linked only when each faces the other: the current tile must connect
//! toward the neighbour and the neighbour must connect back. The answer is
//! plain reachability, so neighbour order does not matter.

use std::collections::VecDeque;

use crate::grid::{Connections, Tile, TileGrid};
use crate::level::Level;
use crate::types::TileKind;

/// Connections of an optional tile; a missing tile links nowhere.
pub fn connections(tile: Option<&Tile>) -> Connections {
    tile.map(Tile::connections).unwrap_or_default()
}

/// Whether the Goal is reachable from the level's Start under the grid's
/// current rotations.
///
/// A level without a Start tile is never connected. A Goal only counts once
/// it has been entered through a mutual link.
///
/// # Examples
///
/// ```
/// use rail_puzzle_core::{is_connected, Level, TileGrid};
///
/// let level = Level::from_rows(&[[7, 2, 2, 8]]).unwrap();
/// let mut grid = TileGrid::from_level(&level);
/// assert!(is_connected(&grid, &level));
///
/// grid.rotate_at(0, 1);
/// assert!(!is_connected(&grid, &level));
/// ```
pub fn is_connected(grid: &TileGrid, level: &Level) -> bool {
    let reached = search(grid, level, true).reached_goal;
    tracing::debug!(reached, "connectivity check");
    reached
}

/// Row-major flags for every cell linked to Start, Start included.
///
/// Empty when the level has no Start. Unlike [`is_connected`] this walks the
/// whole component instead of stopping at the Goal.
pub fn powered_cells(grid: &TileGrid, level: &Level) -> Vec<bool> {
    search(grid, level, false).visited
}

struct Search {
    visited: Vec<bool>,
    reached_goal: bool,
}

fn search(grid: &TileGrid, level: &Level, stop_at_goal: bool) -> Search {
    let mut visited = vec![false; grid.rows() * grid.cols()];
    let mut reached_goal = false;

    let Some((start_row, start_col)) = level.start() else {
        return Search {
            visited: Vec::new(),
            reached_goal,
        };
    };
    let cols = grid.cols();
    if start_row >= grid.rows() || start_col >= cols {
        return Search {
            visited,
            reached_goal,
        };
    }
    visited[start_row * cols + start_col] = true;

    let mut queue = VecDeque::new();
    queue.push_back((start_row, start_col));

    while let Some((row, col)) = queue.pop_front() {
        let Some(tile) = grid.tile_at(row, col) else {
            continue;
        };

        if tile.kind() == TileKind::Goal {
            reached_goal = true;
            if stop_at_goal {
                break;
            }
        }

        for dir in tile.connections() {
            let Some((nr, nc)) = grid.neighbor(row, col, dir) else {
                continue;
            };
            let idx = nr * cols + nc;
            if visited[idx] {
                continue;
            }
            let Some(next) = grid.tile_at(nr, nc) else {
                continue;
            };
            if next.connects(dir.opposite()) {
                visited[idx] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    Search {
        visited,
        reached_goal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn missing_tile_has_no_connections() {
        assert!(connections(None).is_empty());
    }

    #[test]
    fn one_sided_link_is_not_an_edge() {
        // Start points right into a vertical straight that does not face back.
        let level = Level::from_rows(&[[7, 1, 8]]).unwrap();
        let grid = TileGrid::from_level(&level);
        assert!(grid.tile_at(0, 0).unwrap().connects(Direction::Right));
        assert!(!is_connected(&grid, &level));
        assert_eq!(powered_cells(&grid, &level), vec![true, false, false]);
    }

    #[test]
    fn goal_adjacent_to_start_is_reached() {
        let level = Level::from_rows(&[[7, 8]]).unwrap();
        let grid = TileGrid::from_level(&level);
        assert!(is_connected(&grid, &level));
    }

    #[test]
    fn powered_cells_cover_the_whole_component() {
        let level = Level::from_rows(&[[7, 2, 8], [0, 0, 0]]).unwrap();
        let grid = TileGrid::from_level(&level);
        assert_eq!(
            powered_cells(&grid, &level),
            vec![true, true, true, false, false, false]
        );
    }

    #[test]
    fn start_outside_grid_is_not_connected() {
        let level = Level::from_rows(&[[0, 0], [0, 7]]).unwrap();
        let small = Level::from_rows(&[[8]]).unwrap();
        let grid = TileGrid::from_level(&small);
        assert!(!is_connected(&grid, &level));
    }
}
