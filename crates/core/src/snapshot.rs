//! Snapshot module - self-contained state capture for persistence
//!
//! Volatile execution state (descent driver, queued requests, piece ids, pause) is not
//! captured. Restoring validates the whole capture first and never applies it partially.

use thiserror::Error;

use crate::grid::{HEIGHT, WIDTH};
use crate::piece::Piece;
use crate::shape::{Shape, ShapeOffsets};
use crate::types::{Color, PieceKind, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSnapshot {
    pub color: Color,
    pub locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub offsets: ShapeOffsets,
    pub origin: Point,
    pub color: Color,
    pub active: bool,
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            offsets: *piece.shape().offsets(),
            origin: piece.origin(),
            color: piece.color(),
            active: piece.is_active(),
        }
    }
}

impl PieceSnapshot {
    pub fn shape(&self) -> Shape {
        Shape::from_offsets(self.offsets)
    }

    pub fn cells(&self) -> [Point; 4] {
        self.shape().cells_at(self.origin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Row-major, row 0 on top
    pub cells: Vec<Vec<CellSnapshot>>,
    pub current: PieceSnapshot,
    pub next: PieceSnapshot,
    pub score: u32,
    pub game_on: bool,
}

/// Rejected capture. Every variant except `Finished` is an invalid save state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("invalid save state: grid is {rows} rows by {cols} columns, expected {HEIGHT} by {WIDTH}")]
    Dimensions { rows: usize, cols: usize },
    #[error("invalid save state: {piece} piece offsets are not a rotation of the {kind:?} shape")]
    Shape { piece: &'static str, kind: PieceKind },
    #[error("invalid save state: {piece} piece color does not match the {kind:?} kind")]
    Color { piece: &'static str, kind: PieceKind },
    #[error("invalid save state: {piece} piece leaves the grid at ({x}, {y})")]
    OutOfBounds { piece: &'static str, x: i32, y: i32 },
    #[error("invalid save state: current piece overlaps a locked cell at ({x}, {y})")]
    Overlap { x: i32, y: i32 },
    #[error("invalid save state: next piece is marked active")]
    NextActive,
    #[error("invalid save state: locked cell at row {row}, col {col} has the background color")]
    UncoloredLock { row: usize, col: usize },
    #[error("game is over; load the save into a new engine")]
    Finished,
}

impl GameSnapshot {
    /// Check that the capture describes a state the engine could have produced
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.cells.len() != HEIGHT {
            return Err(SnapshotError::Dimensions {
                rows: self.cells.len(),
                cols: self.cells.first().map_or(0, Vec::len),
            });
        }
        if let Some(row) = self.cells.iter().find(|row| row.len() != WIDTH) {
            return Err(SnapshotError::Dimensions {
                rows: HEIGHT,
                cols: row.len(),
            });
        }

        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.locked && cell.color == Color::BACKGROUND {
                    return Err(SnapshotError::UncoloredLock { row, col });
                }
            }
        }

        validate_piece("current", &self.current)?;
        validate_piece("next", &self.next)?;

        if self.next.active {
            return Err(SnapshotError::NextActive);
        }

        if self.current.active {
            for cell in self.current.cells() {
                if self.locked_at(cell) {
                    return Err(SnapshotError::Overlap {
                        x: cell.x,
                        y: cell.y,
                    });
                }
            }
        }

        Ok(())
    }

    /// Locked state of an in-bounds point
    fn locked_at(&self, p: Point) -> bool {
        self.cells[p.y as usize][p.x as usize].locked
    }
}

fn validate_piece(name: &'static str, piece: &PieceSnapshot) -> Result<(), SnapshotError> {
    if !piece.shape().matches_kind(piece.kind) {
        return Err(SnapshotError::Shape {
            piece: name,
            kind: piece.kind,
        });
    }
    if piece.color != piece.kind.color() {
        return Err(SnapshotError::Color {
            piece: name,
            kind: piece.kind,
        });
    }
    // Rotated offsets stay within 3 of the origin
    let (x, y) = (piece.origin.x, piece.origin.y);
    let near = (-4..WIDTH as i32 + 4).contains(&x) && (-4..HEIGHT as i32 + 4).contains(&y);
    if !near {
        return Err(SnapshotError::OutOfBounds { piece: name, x, y });
    }
    for cell in piece.cells() {
        let inside =
            cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < WIDTH && (cell.y as usize) < HEIGHT;
        if !inside {
            return Err(SnapshotError::OutOfBounds {
                piece: name,
                x: cell.x,
                y: cell.y,
            });
        }
    }
    Ok(())
}
