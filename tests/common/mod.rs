//! Shared fixtures for integration tests
#![allow(dead_code)]

use blockfall::core::{canonical_offsets, CellSnapshot, Engine, GameSnapshot, PieceSnapshot};
use blockfall::types::{Color, PieceKind, Point};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn piece(kind: PieceKind, origin: Point, active: bool) -> PieceSnapshot {
    PieceSnapshot {
        kind,
        offsets: canonical_offsets(kind),
        origin,
        color: kind.color(),
        active,
    }
}

pub fn spawn_piece(kind: PieceKind) -> PieceSnapshot {
    piece(kind, Point::new(5, 0), false)
}

/// Empty grid, inactive current and next pieces at the spawn anchor
pub fn empty_snapshot(current: PieceKind, next: PieceKind) -> GameSnapshot {
    GameSnapshot {
        cells: vec![
            vec![
                CellSnapshot {
                    color: Color::BACKGROUND,
                    locked: false,
                };
                10
            ];
            20
        ],
        current: spawn_piece(current),
        next: spawn_piece(next),
        score: 0,
        game_on: true,
    }
}

pub fn lock(snapshot: &mut GameSnapshot, row: usize, col: usize) {
    snapshot.cells[row][col] = CellSnapshot {
        color: PieceKind::S.color(),
        locked: true,
    };
}

/// Lock every cell of `row` except `gap`
pub fn lock_row_except(snapshot: &mut GameSnapshot, row: usize, gap: usize) {
    for col in (0..10).filter(|&col| col != gap) {
        lock(snapshot, row, col);
    }
}

pub fn engine_from(snapshot: &GameSnapshot) -> Engine {
    Engine::from_snapshot(StdRng::seed_from_u64(11), snapshot).unwrap()
}
