//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the puzzle.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, level tooling).
//!
//! # Tile Codes
//!
//! Levels are persisted as matrices of small integers. The encoding is fixed:
//!
//! | Code | Kind | Connections at rotation 0 |
//! |------|------|---------------------------|
//! | 0 | Empty | - |
//! | 1 | StraightVertical | up, down |
//! | 2 | StraightHorizontal | right, left |
//! | 3 | CurveBottomRight | right, down |
//! | 4 | CurveBottomLeft | down, left |
//! | 5 | CurveTopLeft | up, left |
//! | 6 | CurveTopRight | up, right |
//! | 7 | Start | right |
//! | 8 | Goal | left |
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FAIL_MESSAGE_MS` | 2000 | How long the "not connected" message stays up |
//!
//! # Examples
//!
//! ```
//! use rail_puzzle_types::{Direction, TileKind};
//!
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//! assert_eq!(Direction::Left.rotate_cw(), Direction::Up);
//!
//! let kind = TileKind::from_code(3).unwrap();
//! assert_eq!(kind, TileKind::CurveBottomRight);
//! assert_eq!(kind.base_connections(), &[Direction::Right, Direction::Down]);
//! assert_eq!(kind.next_curve(), Some(TileKind::CurveBottomLeft));
//! ```

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Duration of the "not connected" message after a failed check.
pub const FAIL_MESSAGE_MS: u32 = 2000;

/// Number of quarter turns in a full rotation.
pub const QUARTER_TURNS: u8 = 4;

/// Curve variants in the order a clockwise quarter turn walks through them.
pub const CURVE_CYCLE: [TileKind; 4] = [
    TileKind::CurveBottomRight,
    TileKind::CurveBottomLeft,
    TileKind::CurveTopLeft,
    TileKind::CurveTopRight,
];

/// Compass direction on the grid.
///
/// Discriminants are laid out clockwise so that a quarter turn is `+1 mod 4`
/// and the opposite side is `+2 mod 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// All directions in clockwise order starting at `Up`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Direction from its index, taken modulo 4.
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % QUARTER_TURNS) as usize]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// The side facing this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rail_puzzle_types::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Right.opposite(), Direction::Left);
    /// ```
    pub fn opposite(self) -> Self {
        self.rotated(2)
    }

    /// Rotate clockwise by one quarter turn.
    pub fn rotate_cw(self) -> Self {
        self.rotated(1)
    }

    /// Rotate clockwise by `steps` quarter turns.
    pub fn rotated(self, steps: u8) -> Self {
        Self::from_index(self.index() + (steps % QUARTER_TURNS))
    }

    /// Row/column offset of one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

/// Kind of a grid cell.
///
/// Curve kinds double as orientation: a quarter turn turns one curve into the
/// next entry of [`CURVE_CYCLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Empty,
    StraightVertical,
    StraightHorizontal,
    CurveBottomRight,
    CurveBottomLeft,
    CurveTopLeft,
    CurveTopRight,
    Start,
    Goal,
}

impl TileKind {
    /// Decode a persisted level code.
    ///
    /// # Examples
    ///
    /// ```
    /// use rail_puzzle_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_code(0), Some(TileKind::Empty));
    /// assert_eq!(TileKind::from_code(7), Some(TileKind::Start));
    /// assert_eq!(TileKind::from_code(42), None);
    /// ```
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TileKind::Empty),
            1 => Some(TileKind::StraightVertical),
            2 => Some(TileKind::StraightHorizontal),
            3 => Some(TileKind::CurveBottomRight),
            4 => Some(TileKind::CurveBottomLeft),
            5 => Some(TileKind::CurveTopLeft),
            6 => Some(TileKind::CurveTopRight),
            7 => Some(TileKind::Start),
            8 => Some(TileKind::Goal),
            _ => None,
        }
    }

    /// Persisted level code.
    pub fn code(self) -> u8 {
        match self {
            TileKind::Empty => 0,
            TileKind::StraightVertical => 1,
            TileKind::StraightHorizontal => 2,
            TileKind::CurveBottomRight => 3,
            TileKind::CurveBottomLeft => 4,
            TileKind::CurveTopLeft => 5,
            TileKind::CurveTopRight => 6,
            TileKind::Start => 7,
            TileKind::Goal => 8,
        }
    }

    /// Directions this kind connects at zero rotation.
    pub fn base_connections(self) -> &'static [Direction] {
        use Direction::*;
        match self {
            TileKind::Empty => &[],
            TileKind::StraightVertical => &[Up, Down],
            TileKind::StraightHorizontal => &[Right, Left],
            TileKind::CurveBottomRight => &[Right, Down],
            TileKind::CurveBottomLeft => &[Down, Left],
            TileKind::CurveTopLeft => &[Up, Left],
            TileKind::CurveTopRight => &[Up, Right],
            TileKind::Start => &[Right],
            TileKind::Goal => &[Left],
        }
    }

    pub fn is_empty(self) -> bool {
        self == TileKind::Empty
    }

    pub fn is_straight(self) -> bool {
        matches!(
            self,
            TileKind::StraightVertical | TileKind::StraightHorizontal
        )
    }

    pub fn is_curve(self) -> bool {
        self.curve_index().is_some()
    }

    /// Start or Goal.
    pub fn is_station(self) -> bool {
        matches!(self, TileKind::Start | TileKind::Goal)
    }

    /// Whether a tap may rotate a tile of this kind.
    pub fn is_rotatable(self) -> bool {
        self.is_straight() || self.is_curve()
    }

    /// Position in [`CURVE_CYCLE`], or `None` for non-curves.
    pub fn curve_index(self) -> Option<usize> {
        CURVE_CYCLE.iter().position(|&k| k == self)
    }

    /// The curve this one becomes after a clockwise quarter turn.
    pub fn next_curve(self) -> Option<Self> {
        self.curve_after(1)
    }

    /// The curve this one becomes after `steps` clockwise quarter turns.
    pub fn curve_after(self, steps: u8) -> Option<Self> {
        self.curve_index()
            .map(|i| CURVE_CYCLE[(i + steps as usize) % CURVE_CYCLE.len()])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TileKind::Empty => "empty",
            TileKind::StraightVertical => "straight_vertical",
            TileKind::StraightHorizontal => "straight_horizontal",
            TileKind::CurveBottomRight => "curve_bottom_right",
            TileKind::CurveBottomLeft => "curve_bottom_left",
            TileKind::CurveTopLeft => "curve_top_left",
            TileKind::CurveTopRight => "curve_top_right",
            TileKind::Start => "start",
            TileKind::Goal => "goal",
        }
    }
}

/// A train line; its colour tints the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrainLine {
    pub key: &'static str,
    pub name: &'static str,
    pub color: (u8, u8, u8),
}

/// Lines a round can be themed with.
pub const TRAIN_LINES: [TrainLine; 4] = [
    TrainLine {
        key: "yamanote",
        name: "Yamanote Line",
        color: (128, 194, 65),
    },
    TrainLine {
        key: "keihinTohoku",
        name: "Keihin-Tohoku Line",
        color: (0, 178, 229),
    },
    TrainLine {
        key: "chuo",
        name: "Chuo Line",
        color: (241, 90, 34),
    },
    TrainLine {
        key: "sobu",
        name: "Sobu Line",
        color: (255, 212, 0),
    },
];

impl TrainLine {
    /// Look up a line by its key (case-insensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        TRAIN_LINES
            .iter()
            .copied()
            .find(|line| line.key.eq_ignore_ascii_case(key))
    }
}

/// Player intents applied to a puzzle session.
///
/// Used by both the terminal front end and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleAction {
    /// Rotate the tile at (row, col)
    Tap { row: usize, col: usize },
    /// Evaluate whether Start reaches Goal
    Check,
    /// Advance to the next level
    NextLevel,
    /// Rebuild the current level from scratch
    Retry,
}

impl PuzzleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PuzzleAction::Tap { .. } => "tap",
            PuzzleAction::Check => "check",
            PuzzleAction::NextLevel => "nextLevel",
            PuzzleAction::Retry => "retry",
        }
    }
}

/// Phase of a single puzzle round.
///
/// - **Setup**: grid built, not yet accepting taps
/// - **Playing**: tiles rotatable, check available
/// - **Cleared**: Goal reached; terminal for the round
/// - **Failed**: last check found no path; returns to Playing after [`FAIL_MESSAGE_MS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    Setup,
    Playing,
    Cleared,
    Failed,
}

impl RoundPhase {
    /// Whether taps and checks are accepted.
    pub fn accepts_input(self) -> bool {
        matches!(self, RoundPhase::Playing | RoundPhase::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoundPhase::Setup => "setup",
            RoundPhase::Playing => "playing",
            RoundPhase::Cleared => "cleared",
            RoundPhase::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_MS, 16);
        assert_eq!(FAIL_MESSAGE_MS, 2000);
    }

    #[test]
    fn codes_roundtrip_for_every_kind() {
        for code in 0..=8u8 {
            let kind = TileKind::from_code(code).unwrap();
            assert_eq!(kind.code(), code);
        }
        assert_eq!(TileKind::from_code(9), None);
    }

    #[test]
    fn curve_cycle_matches_clockwise_rotation() {
        for (i, kind) in CURVE_CYCLE.iter().enumerate() {
            let next = CURVE_CYCLE[(i + 1) % 4];
            let rotated: Vec<Direction> = kind
                .base_connections()
                .iter()
                .map(|d| d.rotate_cw())
                .collect();
            for d in next.base_connections() {
                assert!(rotated.contains(d), "{:?} -> {:?}", kind, next);
            }
        }
    }
}
