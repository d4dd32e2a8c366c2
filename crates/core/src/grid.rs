//! Grid module - placed tiles and their mutable rotation state
//!
//! The grid mirrors a [`Level`] cell for cell. Empty cells hold no tile, so
//! lookups on gaps and out-of-range coordinates both come back as `None`.
//! Storage is a flat row-major vector, like the level itself.

use arrayvec::ArrayVec;

use crate::level::Level;
use crate::types::{Direction, TileKind, QUARTER_TURNS};

/// Directions a tile currently links to (at most two).
pub type Connections = ArrayVec<Direction, 2>;

/// A placed track or station cell.
///
/// Rotation is kept as a single quarter-turn counter for every shape. The
/// kind reported to callers is derived from it: a curve turned once is the
/// next curve of the cycle, a straight keeps its authored kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    authored: TileKind,
    rotation_steps: u8,
    row: usize,
    col: usize,
}

/// Render-facing view of a tile after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileState {
    pub kind: TileKind,
    pub rotation_steps: u8,
    pub row: usize,
    pub col: usize,
}

impl Tile {
    pub fn new(kind: TileKind, row: usize, col: usize) -> Self {
        Self {
            authored: kind,
            rotation_steps: 0,
            row,
            col,
        }
    }

    /// Current kind. Curves advance through the curve cycle as they rotate.
    pub fn kind(&self) -> TileKind {
        self.authored
            .curve_after(self.rotation_steps)
            .unwrap_or(self.authored)
    }

    /// Kind as written in the level.
    pub fn authored_kind(&self) -> TileKind {
        self.authored
    }

    /// Quarter turns applied so far, in `0..4`.
    pub fn rotation_steps(&self) -> u8 {
        self.rotation_steps
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn is_rotatable(&self) -> bool {
        self.authored.is_rotatable()
    }

    /// Directions this tile links to right now.
    pub fn connections(&self) -> Connections {
        self.authored
            .base_connections()
            .iter()
            .map(|d| d.rotated(self.rotation_steps))
            .collect()
    }

    pub fn connects(&self, dir: Direction) -> bool {
        self.connections().contains(&dir)
    }

    /// Which drawable variant matches the current orientation.
    ///
    /// Straights keep their kind but are drawn turned, so an odd number of
    /// quarter turns swaps vertical and horizontal.
    pub fn visual(&self) -> TileKind {
        match self.authored {
            TileKind::StraightVertical if self.rotation_steps % 2 == 1 => {
                TileKind::StraightHorizontal
            }
            TileKind::StraightHorizontal if self.rotation_steps % 2 == 1 => {
                TileKind::StraightVertical
            }
            _ => self.kind(),
        }
    }

    /// Surface colour, brightened a little for each quarter turn.
    pub fn tint(&self) -> (u8, u8, u8) {
        let step = self.rotation_steps * 10;
        (80 + step, 80 + step, 100 + step)
    }

    pub fn state(&self) -> TileState {
        TileState {
            kind: self.kind(),
            rotation_steps: self.rotation_steps,
            row: self.row,
            col: self.col,
        }
    }

    /// Advance one quarter turn without checking rotatability.
    pub(crate) fn turn(&mut self) {
        self.rotation_steps = (self.rotation_steps + 1) % QUARTER_TURNS;
    }
}

/// Mutable per-round tile state, addressed by (row, col).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Tile>>,
}

impl TileGrid {
    /// Place a tile for every non-empty level cell, all at rotation 0.
    pub fn from_level(level: &Level) -> Self {
        let cells = level
            .cells()
            .map(|(row, col, kind)| (!kind.is_empty()).then(|| Tile::new(kind, row, col)))
            .collect();
        Self {
            rows: level.rows(),
            cols: level.cols(),
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// Tile at (row, col); `None` for gaps and out-of-range coordinates.
    pub fn tile_at(&self, row: usize, col: usize) -> Option<&Tile> {
        self.index(row, col).and_then(|i| self.cells[i].as_ref())
    }

    pub fn tile_at_mut(&mut self, row: usize, col: usize) -> Option<&mut Tile> {
        self.index(row, col).and_then(move |i| self.cells[i].as_mut())
    }

    /// Coordinates one step away in `dir`, if still on the grid.
    pub fn neighbor(&self, row: usize, col: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = dir.delta();
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.index(r, c).map(|_| (r, c))
    }

    /// Placed tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten()
    }

    /// Per-cell state in row-major order (`None` for gaps).
    pub fn states(&self) -> Vec<Option<TileState>> {
        self.cells.iter().map(|c| c.map(|t| t.state())).collect()
    }

    /// Rotate the tile at (row, col). See [`crate::rotation::rotate`].
    pub fn rotate_at(&mut self, row: usize, col: usize) -> Option<TileState> {
        self.tile_at_mut(row, col).and_then(crate::rotation::rotate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> Level {
        Level::from_rows(&[[7, 2, 3, 0], [0, 0, 1, 0], [0, 0, 6, 8]]).unwrap()
    }

    #[test]
    fn grid_index_calculation() {
        let grid = TileGrid::from_level(&level());
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(1, 2), Some(6));
        assert_eq!(grid.index(2, 3), Some(11));
        assert_eq!(grid.index(3, 0), None);
        assert_eq!(grid.index(0, 4), None);
    }

    #[test]
    fn empty_cells_hold_no_tile() {
        let grid = TileGrid::from_level(&level());
        assert!(grid.tile_at(0, 3).is_none());
        assert!(grid.tile_at(1, 0).is_none());
        assert_eq!(grid.tiles().count(), 6);
    }

    #[test]
    fn neighbor_stays_on_grid() {
        let grid = TileGrid::from_level(&level());
        assert_eq!(grid.neighbor(0, 0, Direction::Up), None);
        assert_eq!(grid.neighbor(0, 0, Direction::Left), None);
        assert_eq!(grid.neighbor(0, 0, Direction::Right), Some((0, 1)));
        assert_eq!(grid.neighbor(2, 3, Direction::Down), None);
        assert_eq!(grid.neighbor(2, 3, Direction::Right), None);
        assert_eq!(grid.neighbor(1, 2, Direction::Up), Some((0, 2)));
    }

    #[test]
    fn tint_brightens_per_turn() {
        let mut tile = Tile::new(TileKind::StraightVertical, 0, 0);
        assert_eq!(tile.tint(), (80, 80, 100));
        tile.turn();
        tile.turn();
        assert_eq!(tile.tint(), (100, 100, 120));
    }

    #[test]
    fn visual_swaps_straight_orientation() {
        let mut tile = Tile::new(TileKind::StraightVertical, 0, 0);
        tile.turn();
        assert_eq!(tile.kind(), TileKind::StraightVertical);
        assert_eq!(tile.visual(), TileKind::StraightHorizontal);
        tile.turn();
        assert_eq!(tile.visual(), TileKind::StraightVertical);
    }
}
