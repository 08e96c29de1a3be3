//! Cell module - one grid slot

use crate::types::{Color, Point};

/// One grid position.
///
/// A locked cell is permanently occupied by a settled piece. A free cell shows the
/// background color unless the active piece is currently drawn on it. The position is
/// informational; the grid's row/column index is the authoritative address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    position: Point,
    color: Color,
    locked: bool,
}

impl Cell {
    /// Free, background-colored cell at the given slot
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            position: Point::new(col as i32, row as i32),
            color: Color::BACKGROUND,
            locked: false,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_row(&mut self, row: usize) {
        self.position.y = row as i32;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }
}
