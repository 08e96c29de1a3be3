//! View module - consistent read-only capture for presentation layers

use crate::grid::{Grid, HEIGHT, WIDTH};
use crate::piece::{Piece, PieceId};
use crate::types::{Color, PieceKind, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub color: Color,
    pub locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceView {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub origin: Point,
    /// Absolute cells; meaningful on the grid only while the piece is active
    pub cells: [Point; 4],
    pub active: bool,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            id: piece.id(),
            kind: piece.kind(),
            color: piece.color(),
            origin: piece.origin(),
            cells: piece.cells(),
            active: piece.is_active(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineView {
    pub cells: [[CellView; WIDTH]; HEIGHT],
    pub current: PieceView,
    pub next: PieceView,
    pub score: u32,
    pub game_on: bool,
    pub paused: bool,
}

impl EngineView {
    pub(crate) fn capture_cells(grid: &Grid) -> [[CellView; WIDTH]; HEIGHT] {
        std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                let cell = grid.cell_at(row, col);
                CellView {
                    color: cell.color(),
                    locked: cell.is_locked(),
                }
            })
        })
    }

    pub fn cell(&self, row: usize, col: usize) -> CellView {
        self.cells[row][col]
    }

    pub fn width(&self) -> usize {
        WIDTH
    }

    pub fn height(&self) -> usize {
        HEIGHT
    }
}
