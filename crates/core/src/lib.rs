//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate holds the route-tile puzzle: levels, the tile grid, the rotation
//! engine and the Start→Goal connectivity check. It has **no dependencies** on
//! terminal I/O or input handling, so the same rules drive the game binary,
//! the level checker and the tests.
//!
//! # Module Structure
//!
//! - [`level`]: immutable layouts, the integer level format and JSON level packs
//! - [`grid`]: placed tiles with their rotation state, addressed by (row, col)
//! - [`rotation`]: quarter turns; curves change kind, straights count steps
//! - [`connectivity`]: breadth-first search over mutually facing connections
//! - [`session`]: round phases, tap counter, level progression
//! - [`snapshot`]: render-facing copy of a round
//! - [`rng`]: seedable LCG used to theme a round with a train line
//!
//! # Example
//!
//! ```
//! use rail_puzzle_core::{builtin_levels, PuzzleSession};
//! use rail_puzzle_core::types::{PuzzleAction, RoundPhase};
//!
//! let mut session = PuzzleSession::new(builtin_levels(), 12345);
//! session.start();
//!
//! // The first level is already solved as authored.
//! assert!(session.on_check_requested());
//! assert_eq!(session.phase(), RoundPhase::Cleared);
//!
//! session.apply_action(PuzzleAction::NextLevel);
//! assert_eq!(session.level_number(), 2);
//! ```

pub mod connectivity;
pub mod grid;
pub mod level;
pub mod rng;
pub mod rotation;
pub mod session;
pub mod snapshot;

pub use rail_puzzle_types as types;

// Re-export commonly used types for convenience
pub use connectivity::{connections, is_connected, powered_cells};
pub use grid::{Connections, Tile, TileGrid, TileState};
pub use level::{builtin_levels, Level, LevelError, LevelPack, PackError, MAX_COLS, MAX_ROWS};
pub use rng::SimpleRng;
pub use rotation::rotate;
pub use session::PuzzleSession;
pub use snapshot::{PuzzleSnapshot, TileSnapshot};
