//! Terminal input module (session-facing).
//!
//! This module is intentionally independent of any UI framework beyond
//! `crossterm`. It maps key events into [`InputCommand`]s and keeps the grid
//! cursor that stands in for a pointer on keyboard-only terminals.

pub mod cursor;
pub mod map;

pub use rail_puzzle_types as types;

pub use cursor::GridCursor;
pub use map::{handle_key_event, should_quit, InputCommand};
