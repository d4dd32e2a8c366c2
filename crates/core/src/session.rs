//! Session module - one player's run through a list of levels
//!
//! A session owns the level list, the current round's grid and the round
//! phase. It is created explicitly and dropped when the player leaves; there
//! is no shared engine instance.
//!
//! Round flow:
//!
//! ```text
//! Setup --start--> Playing --check ok--> Cleared --next_level--> Playing
//!                     ^   \--check fail--> Failed
//!                     |                      |
//!                     +----- FAIL_MESSAGE_MS +
//! ```

use crate::connectivity::{is_connected, powered_cells};
use crate::grid::{TileGrid, TileState};
use crate::level::{builtin_levels, Level};
use crate::rng::SimpleRng;
use crate::snapshot::{PuzzleSnapshot, TileSnapshot};
use crate::types::{PuzzleAction, RoundPhase, TrainLine, FAIL_MESSAGE_MS};

#[derive(Debug, Clone)]
pub struct PuzzleSession {
    levels: Vec<Level>,
    level_index: usize,
    grid: TileGrid,
    phase: RoundPhase,
    /// Successful rotations this round.
    moves: u32,
    fail_timer_ms: u32,
    line: TrainLine,
}

impl PuzzleSession {
    /// Create a session over `levels`, falling back to the built-in levels
    /// when the list is empty. `seed` picks the train line.
    pub fn new(levels: Vec<Level>, seed: u32) -> Self {
        let levels = if levels.is_empty() {
            builtin_levels()
        } else {
            levels
        };
        let grid = TileGrid::from_level(&levels[0]);
        let line = SimpleRng::new(seed).train_line();

        Self {
            levels,
            level_index: 0,
            grid,
            phase: RoundPhase::Setup,
            moves: 0,
            fail_timer_ms: 0,
            line,
        }
    }

    /// Begin at the given 0-based level (wrapped to the level count).
    pub fn with_start_level(mut self, index: usize) -> Self {
        self.level_index = index % self.levels.len();
        self.grid = TileGrid::from_level(&self.levels[self.level_index]);
        self
    }

    pub fn with_line(mut self, line: TrainLine) -> Self {
        self.line = line;
        self
    }

    /// Leave `Setup` and accept input.
    pub fn start(&mut self) {
        if self.phase != RoundPhase::Setup {
            return;
        }
        self.phase = RoundPhase::Playing;
        tracing::info!(level = self.level_number(), "round started");
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn line(&self) -> TrainLine {
        self.line
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.level_index]
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// 1-based, as shown to the player.
    pub fn level_number(&self) -> usize {
        self.level_index + 1
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn fail_timer_ms(&self) -> u32 {
        self.fail_timer_ms
    }

    /// Rotate the tile at (row, col).
    ///
    /// Ignored outside Playing/Failed, on gaps and on stations. Returns the
    /// new tile state when something turned.
    pub fn on_tile_tapped(&mut self, row: usize, col: usize) -> Option<TileState> {
        if !self.phase.accepts_input() {
            return None;
        }
        let state = self.grid.rotate_at(row, col)?;
        self.moves += 1;
        Some(state)
    }

    /// Evaluate the grid. `true` clears the round.
    pub fn on_check_requested(&mut self) -> bool {
        match self.phase {
            RoundPhase::Setup => false,
            RoundPhase::Cleared => true,
            RoundPhase::Playing | RoundPhase::Failed => {
                if is_connected(&self.grid, self.level()) {
                    self.phase = RoundPhase::Cleared;
                    self.fail_timer_ms = 0;
                    tracing::info!(
                        level = self.level_number(),
                        moves = self.moves,
                        "round cleared"
                    );
                    true
                } else {
                    self.phase = RoundPhase::Failed;
                    self.fail_timer_ms = FAIL_MESSAGE_MS;
                    tracing::debug!(level = self.level_number(), "check failed");
                    false
                }
            }
        }
    }

    /// Advance timers by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.phase != RoundPhase::Failed {
            return;
        }
        self.fail_timer_ms = self.fail_timer_ms.saturating_sub(elapsed_ms);
        if self.fail_timer_ms == 0 {
            self.phase = RoundPhase::Playing;
        }
    }

    /// Move on to the next level, wrapping after the last one.
    pub fn next_level(&mut self) {
        let next = (self.level_index + 1) % self.levels.len();
        self.load_level(next);
    }

    /// Rebuild the current level from its authored layout.
    pub fn retry(&mut self) {
        self.load_level(self.level_index);
    }

    fn load_level(&mut self, index: usize) {
        self.level_index = index;
        self.grid = TileGrid::from_level(&self.levels[index]);
        self.moves = 0;
        self.fail_timer_ms = 0;
        self.phase = RoundPhase::Playing;
        tracing::info!(level = self.level_number(), "level loaded");
    }

    /// Apply a player action. Returns whether any state changed.
    pub fn apply_action(&mut self, action: PuzzleAction) -> bool {
        match action {
            PuzzleAction::Tap { row, col } => self.on_tile_tapped(row, col).is_some(),
            PuzzleAction::Check => {
                let before = (self.phase, self.fail_timer_ms);
                self.on_check_requested();
                before != (self.phase, self.fail_timer_ms)
            }
            PuzzleAction::NextLevel => {
                self.next_level();
                true
            }
            PuzzleAction::Retry => {
                self.retry();
                true
            }
        }
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        let level = self.level();
        let powered = powered_cells(&self.grid, level);
        let tiles = (0..self.grid.rows())
            .flat_map(|row| (0..self.grid.cols()).map(move |col| (row, col)))
            .map(|(row, col)| {
                self.grid.tile_at(row, col).map(|tile| TileSnapshot {
                    state: tile.state(),
                    visual: tile.visual(),
                    tint: tile.tint(),
                    powered: powered
                        .get(row * self.grid.cols() + col)
                        .copied()
                        .unwrap_or(false),
                })
            })
            .collect();

        PuzzleSnapshot {
            level_number: self.level_number(),
            level_count: self.level_count(),
            level_name: level.name().map(str::to_string),
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            tiles,
            phase: self.phase,
            moves: self.moves,
            line: self.line,
            fail_message_ms: self.fail_timer_ms,
        }
    }
}
