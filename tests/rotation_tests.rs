//! Rotation engine tests - quarter turns on straights, curves and stations

use rail_puzzle::core::{rotate, Level, Tile, TileGrid};
use rail_puzzle::types::{Direction, TileKind, CURVE_CYCLE};

fn sorted(mut dirs: Vec<Direction>) -> Vec<Direction> {
    dirs.sort();
    dirs
}

#[test]
fn straight_connections_advance_with_rotation() {
    for kind in [TileKind::StraightVertical, TileKind::StraightHorizontal] {
        let mut tile = Tile::new(kind, 0, 0);
        for n in 1..=8u8 {
            rotate(&mut tile);
            let want: Vec<Direction> = kind
                .base_connections()
                .iter()
                .map(|d| d.rotated(n % 4))
                .collect();
            assert_eq!(sorted(tile.connections().to_vec()), sorted(want));
            assert_eq!(tile.rotation_steps(), n % 4);
            assert_eq!(tile.kind(), kind);
        }
    }
}

#[test]
fn four_turns_restore_straight_connections() {
    let mut tile = Tile::new(TileKind::StraightVertical, 2, 1);
    let before = sorted(tile.connections().to_vec());
    for _ in 0..4 {
        rotate(&mut tile);
    }
    assert_eq!(sorted(tile.connections().to_vec()), before);
    assert_eq!(tile.rotation_steps(), 0);
}

#[test]
fn curve_kind_has_period_four() {
    for start in CURVE_CYCLE {
        let mut tile = Tile::new(start, 0, 0);
        let before = sorted(tile.connections().to_vec());
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(rotate(&mut tile).unwrap().kind);
        }
        assert_eq!(tile.kind(), start);
        assert_eq!(sorted(tile.connections().to_vec()), before);

        seen.sort_by_key(|k| k.code());
        assert_eq!(
            seen,
            vec![
                TileKind::CurveBottomRight,
                TileKind::CurveBottomLeft,
                TileKind::CurveTopLeft,
                TileKind::CurveTopRight,
            ]
        );
    }
}

#[test]
fn bottom_right_curve_turns_into_bottom_left() {
    let mut tile = Tile::new(TileKind::CurveBottomRight, 0, 0);
    let original = sorted(tile.connections().to_vec());

    assert_eq!(rotate(&mut tile).unwrap().kind, TileKind::CurveBottomLeft);
    for _ in 0..3 {
        rotate(&mut tile);
    }
    assert_eq!(tile.kind(), TileKind::CurveBottomRight);
    assert_eq!(sorted(tile.connections().to_vec()), original);
}

#[test]
fn stations_ignore_taps() {
    let level = Level::from_rows(&[[7, 2, 8]]).unwrap();
    let mut grid = TileGrid::from_level(&level);
    for col in [0, 2] {
        let before = *grid.tile_at(0, col).unwrap();
        assert_eq!(grid.rotate_at(0, col), None);
        assert_eq!(*grid.tile_at(0, col).unwrap(), before);
    }
}

#[test]
fn taps_on_gaps_and_outside_do_nothing() {
    let level = Level::from_rows(&[[7, 0, 8]]).unwrap();
    let mut grid = TileGrid::from_level(&level);
    let before = grid.clone();
    assert_eq!(grid.rotate_at(0, 1), None);
    assert_eq!(grid.rotate_at(5, 5), None);
    assert_eq!(grid, before);
}

#[test]
fn rotation_reports_new_state() {
    let level = Level::from_rows(&[[7, 1, 8]]).unwrap();
    let mut grid = TileGrid::from_level(&level);
    let state = grid.rotate_at(0, 1).unwrap();
    assert_eq!((state.row, state.col), (0, 1));
    assert_eq!(state.kind, TileKind::StraightVertical);
    assert_eq!(state.rotation_steps, 1);
    assert_eq!(grid.tile_at(0, 1).unwrap().visual(), TileKind::StraightHorizontal);
}
