//! Snapshot module - plain-data copy of a round for renderers
//!
//! Built by [`PuzzleSession::snapshot`](crate::PuzzleSession::snapshot). Tiles
//! are stored row-major with `None` for gaps.

use crate::grid::TileState;
use crate::types::{RoundPhase, TileKind, TrainLine};

/// Per-cell drawing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub state: TileState,
    /// Variant to draw for the current orientation.
    pub visual: TileKind,
    pub tint: (u8, u8, u8),
    /// Linked to the Start station right now.
    pub powered: bool,
}

/// Everything a renderer needs to draw one frame of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSnapshot {
    /// 1-based level number.
    pub level_number: usize,
    pub level_count: usize,
    pub level_name: Option<String>,
    pub rows: usize,
    pub cols: usize,
    /// Row-major, `None` for gaps.
    pub tiles: Vec<Option<TileSnapshot>>,
    pub phase: RoundPhase,
    pub moves: u32,
    pub line: TrainLine,
    pub fail_message_ms: u32,
}

impl PuzzleSnapshot {
    pub fn tile(&self, row: usize, col: usize) -> Option<&TileSnapshot> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.tiles[row * self.cols + col].as_ref()
    }

    pub fn playable(&self) -> bool {
        self.phase.accepts_input()
    }

    pub fn showing_fail_message(&self) -> bool {
        self.phase == RoundPhase::Failed && self.fail_message_ms > 0
    }
}
