//! RNG module - deterministic choice of a round's train line
//!
//! A small LCG is enough here: the only random decision in a round is which
//! line colour paints the track, and a seedable generator keeps sessions
//! reproducible in tests.

use crate::types::{TrainLine, TRAIN_LINES};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would only ever produce the increment sequence.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`; a zero `max` behaves like 1.
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Pick one element, `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.next_range(items.len() as u32) as usize;
        items.get(i)
    }

    /// A random train line for theming a round.
    pub fn train_line(&mut self) -> TrainLine {
        self.choose(&TRAIN_LINES).copied().unwrap_or(TRAIN_LINES[0])
    }
}
