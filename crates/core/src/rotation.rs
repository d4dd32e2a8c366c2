//! Rotation engine - quarter turns on tapped tiles
//!
//! A tap turns a track tile clockwise by 90°. Curves change identity as they
//! turn (bottom-right → bottom-left → top-left → top-right → bottom-right);
//! straights keep their kind and accumulate quarter turns instead. Stations
//! never move, and tapping one is a no-op rather than an error.

use crate::grid::{Tile, TileState};

/// Rotate `tile` one quarter turn clockwise.
///
/// Returns the tile's new state for redrawing, or `None` when the tile is a
/// station and nothing changed.
///
/// # Examples
///
/// ```
/// use rail_puzzle_core::{rotate, Tile};
/// use rail_puzzle_core::types::TileKind;
///
/// let mut tile = Tile::new(TileKind::CurveBottomRight, 0, 0);
/// let state = rotate(&mut tile).unwrap();
/// assert_eq!(state.kind, TileKind::CurveBottomLeft);
/// assert_eq!(state.rotation_steps, 1);
///
/// let mut start = Tile::new(TileKind::Start, 0, 0);
/// assert_eq!(rotate(&mut start), None);
/// ```
pub fn rotate(tile: &mut Tile) -> Option<TileState> {
    if !tile.is_rotatable() {
        return None;
    }
    tile.turn();
    let state = tile.state();
    tracing::trace!(
        row = state.row,
        col = state.col,
        kind = state.kind.as_str(),
        steps = state.rotation_steps,
        "tile rotated"
    );
    Some(state)
}
