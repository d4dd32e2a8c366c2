//! Rail puzzle (workspace facade crate).
//!
//! Re-exports the workspace crates under short names
//! (`rail_puzzle::{core,input,term,types}`) and hosts the start-up
//! configuration shared by the binaries.

pub mod config;

pub use rail_puzzle_core as core;
pub use rail_puzzle_input as input;
pub use rail_puzzle_term as term;
pub use rail_puzzle_types as types;
