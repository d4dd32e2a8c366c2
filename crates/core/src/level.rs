//! Level module - puzzle layouts and level packs
//!
//! A level is an immutable rectangular matrix of tile kinds. On disk it is a
//! matrix of integer codes (see [`TileKind::from_code`]); Start and Goal
//! positions are never stored, they are found by scanning in row-major order.
//!
//! ```json
//! {"levels": [{"name": "Easy", "grid": [[7, 2, 2, 8]]}]}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::TileKind;

/// Largest grid a level may declare, per side.
pub const MAX_ROWS: usize = 64;
pub const MAX_COLS: usize = 64;

/// Structural problems in a level grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level grid has no cells")]
    Empty,
    #[error("level grid is {rows}x{cols}, larger than {}x{}", MAX_ROWS, MAX_COLS)]
    TooLarge { rows: usize, cols: usize },
    #[error("level row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile code {code} at row {row}, col {col}")]
    UnknownCode { code: u8, row: usize, col: usize },
    #[error("level needs exactly one start tile, found {found}")]
    StartCount { found: usize },
    #[error("level needs exactly one goal tile, found {found}")]
    GoalCount { found: usize },
}

/// Failures while loading a level pack.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("failed to read level pack {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level pack: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level {level} is invalid: {source}")]
    InvalidLevel {
        /// 1-based position in the pack.
        level: usize,
        #[source]
        source: LevelError,
    },
    #[error("level pack contains no levels")]
    NoLevels,
}

/// Immutable puzzle layout, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LevelFile", into = "LevelFile")]
pub struct Level {
    name: Option<String>,
    rows: usize,
    cols: usize,
    cells: Vec<TileKind>,
}

/// On-disk shape of a level.
///
/// Extra keys (older content carries explicit `start`/`goal` objects) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    grid: Vec<Vec<u8>>,
}

impl TryFrom<LevelFile> for Level {
    type Error = LevelError;

    fn try_from(file: LevelFile) -> Result<Self, Self::Error> {
        let level = Level::from_rows(&file.grid)?;
        Ok(match file.name {
            Some(name) => level.with_name(name),
            None => level,
        })
    }
}

impl From<Level> for LevelFile {
    fn from(level: Level) -> Self {
        let grid = level.to_codes();
        LevelFile {
            name: level.name,
            grid,
        }
    }
}

impl Level {
    /// Build a level from rows of integer codes.
    ///
    /// # Examples
    ///
    /// ```
    /// use rail_puzzle_core::Level;
    /// use rail_puzzle_core::types::TileKind;
    ///
    /// let level = Level::from_rows(&[[7, 2, 2, 8]]).unwrap();
    /// assert_eq!(level.cols(), 4);
    /// assert_eq!(level.start(), Some((0, 0)));
    /// assert_eq!(level.kind_at(0, 3), Some(TileKind::Goal));
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, LevelError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if cols == 0 {
            return Err(LevelError::Empty);
        }
        if rows.len() > MAX_ROWS || cols > MAX_COLS {
            return Err(LevelError::TooLarge {
                rows: rows.len(),
                cols,
            });
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, codes) in rows.iter().enumerate() {
            let codes = codes.as_ref();
            if codes.len() != cols {
                return Err(LevelError::Ragged {
                    row,
                    expected: cols,
                    found: codes.len(),
                });
            }
            for (col, &code) in codes.iter().enumerate() {
                let kind =
                    TileKind::from_code(code).ok_or(LevelError::UnknownCode { code, row, col })?;
                cells.push(kind);
            }
        }

        Ok(Self {
            name: None,
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Kind at (row, col); `None` when out of bounds.
    pub fn kind_at(&self, row: usize, col: usize) -> Option<TileKind> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// Iterate `(row, col, kind)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, TileKind)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &kind)| (i / cols, i % cols, kind))
    }

    /// First cell of the given kind in row-major order.
    pub fn find(&self, kind: TileKind) -> Option<(usize, usize)> {
        self.cells()
            .find(|&(_, _, k)| k == kind)
            .map(|(row, col, _)| (row, col))
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// Start station coordinates.
    pub fn start(&self) -> Option<(usize, usize)> {
        self.find(TileKind::Start)
    }

    /// Goal station coordinates.
    pub fn goal(&self) -> Option<(usize, usize)> {
        self.find(TileKind::Goal)
    }

    /// Verify the one-start/one-goal authoring rule.
    ///
    /// Gameplay does not depend on this: a level that breaks it simply never
    /// connects.
    pub fn check_stations(&self) -> Result<(), LevelError> {
        let starts = self.count(TileKind::Start);
        if starts != 1 {
            return Err(LevelError::StartCount { found: starts });
        }
        let goals = self.count(TileKind::Goal);
        if goals != 1 {
            return Err(LevelError::GoalCount { found: goals });
        }
        Ok(())
    }

    /// Persisted integer matrix.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|k| k.code()).collect())
            .collect()
    }
}

/// The levels that ship with the game.
pub fn builtin_levels() -> Vec<Level> {
    const EASY: [[u8; 4]; 1] = [[7, 2, 2, 8]];
    const CURVES: [[u8; 4]; 3] = [[7, 2, 3, 0], [0, 0, 1, 0], [0, 0, 6, 8]];
    const WINDING: [[u8; 4]; 3] = [[7, 3, 0, 0], [0, 1, 0, 0], [0, 6, 2, 8]];

    [("Easy", &EASY[..]), ("Curves", &CURVES[..]), ("A bit tricky", &WINDING[..])]
        .into_iter()
        .filter_map(|(name, rows)| Level::from_rows(rows).ok().map(|l| l.with_name(name)))
        .collect()
}

/// On-disk shape of a pack. Levels are converted one by one so a bad level
/// is reported with its position.
#[derive(Debug, Deserialize)]
struct PackFile {
    levels: Vec<LevelFile>,
}

/// An ordered list of levels loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPack {
    pub levels: Vec<Level>,
}

impl LevelPack {
    pub fn builtin() -> Self {
        Self {
            levels: builtin_levels(),
        }
    }

    /// Parse a pack. Levels breaking the station rule are kept but logged.
    pub fn from_json_str(s: &str) -> Result<Self, PackError> {
        let file: PackFile = serde_json::from_str(s)?;
        if file.levels.is_empty() {
            return Err(PackError::NoLevels);
        }
        let levels = file
            .levels
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                Level::try_from(raw).map_err(|source| PackError::InvalidLevel {
                    level: i + 1,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let pack = LevelPack { levels };
        for (i, level) in pack.levels.iter().enumerate() {
            if let Err(e) = level.check_stations() {
                tracing::warn!(level = i + 1, name = ?level.name(), "{}", e);
            }
        }
        tracing::debug!(count = pack.levels.len(), "level pack parsed");
        Ok(pack)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PackError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PackError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, PackError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_grid() {
        let rows: Vec<Vec<u8>> = vec![vec![7, 2, 8], vec![0, 0]];
        assert_eq!(
            Level::from_rows(&rows),
            Err(LevelError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn from_rows_rejects_unknown_code() {
        assert_eq!(
            Level::from_rows(&[[7, 9, 8]]),
            Err(LevelError::UnknownCode {
                code: 9,
                row: 0,
                col: 1
            })
        );
    }

    #[test]
    fn from_rows_rejects_empty_grid() {
        let none: [[u8; 0]; 0] = [];
        assert_eq!(Level::from_rows(&none), Err(LevelError::Empty));
        assert_eq!(Level::from_rows(&[[0u8; 0]]), Err(LevelError::Empty));
    }

    #[test]
    fn from_rows_rejects_oversized_grid() {
        let wide = vec![vec![2u8; MAX_COLS + 1]];
        assert_eq!(
            Level::from_rows(&wide),
            Err(LevelError::TooLarge {
                rows: 1,
                cols: MAX_COLS + 1
            })
        );
        let tall = vec![vec![1u8]; MAX_ROWS + 1];
        assert!(matches!(
            Level::from_rows(&tall),
            Err(LevelError::TooLarge { .. })
        ));
        let edge = vec![vec![0u8; MAX_COLS]; MAX_ROWS];
        assert!(Level::from_rows(&edge).is_ok());
    }

    #[test]
    fn builtin_levels_follow_station_rule() {
        let levels = builtin_levels();
        assert_eq!(levels.len(), 3);
        for level in &levels {
            assert!(level.check_stations().is_ok(), "{:?}", level.name());
        }
        assert_eq!(levels[1].goal(), Some((2, 3)));
    }

    #[test]
    fn codes_survive_json() {
        let json = r#"{"levels":[{"grid":[[7,3,0,0],[0,1,0,0],[0,6,2,8]],"start":{"x":0,"y":0},"goal":{"x":3,"y":2}}]}"#;
        let pack = LevelPack::from_json_str(json).unwrap();
        assert_eq!(pack.len(), 1);
        assert_eq!(
            pack.levels[0].to_codes(),
            vec![vec![7, 3, 0, 0], vec![0, 1, 0, 0], vec![0, 6, 2, 8]]
        );
        assert_eq!(pack.levels[0].name(), None);
    }

    #[test]
    fn station_counts_are_reported() {
        let level = Level::from_rows(&[[7, 2, 7, 8]]).unwrap();
        assert_eq!(
            level.check_stations(),
            Err(LevelError::StartCount { found: 2 })
        );
        let level = Level::from_rows(&[[7, 2, 2, 0]]).unwrap();
        assert_eq!(level.check_stations(), Err(LevelError::GoalCount { found: 0 }));
    }
}
