//! Terminal front end for the route puzzle.
//!
//! A small rendering layer: the pure [`PuzzleView`] draws a
//! [`core::PuzzleSnapshot`](crate::core::PuzzleSnapshot) into a framebuffer,
//! and [`TerminalRenderer`] flushes framebuffers to the terminal, sending only
//! the cells that changed since the previous frame.

pub mod fb;
pub mod puzzle_view;
pub mod renderer;

pub use rail_puzzle_core as core;
pub use rail_puzzle_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use puzzle_view::{AnchorY, PuzzleView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
