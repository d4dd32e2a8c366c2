//! Grid cursor for keyboard play.
//!
//! Mouse clicks address tiles directly; on the keyboard the cursor is the
//! "finger" that a tap lands under.

use crate::types::Direction;

/// Selected cell, clamped to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
}

impl GridCursor {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            row: 0,
            col: 0,
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Step one cell; moves past an edge are dropped.
    pub fn step(&mut self, dir: Direction) {
        let (dr, dc) = dir.delta();
        if let (Some(r), Some(c)) = (
            self.row.checked_add_signed(dr),
            self.col.checked_add_signed(dc),
        ) {
            if r < self.rows && c < self.cols {
                self.row = r;
                self.col = c;
            }
        }
    }

    /// Jump to (row, col), e.g. after a mouse click. Out-of-range is ignored.
    pub fn set(&mut self, row: usize, col: usize) {
        if row < self.rows && col < self.cols {
            self.row = row;
            self.col = col;
        }
    }

    /// Adopt new grid dimensions, keeping the position when it still fits.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        if self.rows == rows.max(1) && self.cols == cols.max(1) {
            return;
        }
        *self = Self::new(rows, cols);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stops_at_edges() {
        let mut cursor = GridCursor::new(2, 3);
        cursor.step(Direction::Up);
        cursor.step(Direction::Left);
        assert_eq!(cursor.position(), (0, 0));

        for _ in 0..5 {
            cursor.step(Direction::Right);
            cursor.step(Direction::Down);
        }
        assert_eq!(cursor.position(), (1, 2));
    }

    #[test]
    fn set_ignores_out_of_range() {
        let mut cursor = GridCursor::new(3, 4);
        cursor.set(2, 3);
        assert_eq!(cursor.position(), (2, 3));
        cursor.set(3, 0);
        assert_eq!(cursor.position(), (2, 3));
    }

    #[test]
    fn resize_resets_on_new_dimensions() {
        let mut cursor = GridCursor::new(3, 4);
        cursor.set(2, 2);
        cursor.resize(3, 4);
        assert_eq!(cursor.position(), (2, 2));
        cursor.resize(1, 4);
        assert_eq!(cursor.position(), (0, 0));
    }
}
