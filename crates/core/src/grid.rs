//! Grid module - the 10x20 matrix of cells
//!
//! Row 0 is the top. Coordinates as points are (x, y) = (column, row).
//! Out-of-range slot access is a programming error and panics; collision tests go
//! through the non-panicking `get`/`is_free_at`/`is_locked_at` helpers instead.

use arrayvec::ArrayVec;

use crate::cell::Cell;
use crate::types::{Color, Point, BOARD_HEIGHT, BOARD_WIDTH};

pub const WIDTH: usize = BOARD_WIDTH as usize;
pub const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Indices of rows removed by one sweep, bottom to top
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game grid - fixed rows of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: [[Cell; WIDTH]; HEIGHT],
}

impl Grid {
    /// Create a new grid of free cells
    pub fn new() -> Self {
        Self {
            rows: std::array::from_fn(fresh_row),
        }
    }

    pub fn width(&self) -> usize {
        WIDTH
    }

    pub fn height(&self) -> usize {
        HEIGHT
    }

    /// Check if a point lies inside the grid
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < WIDTH && (p.y as usize) < HEIGHT
    }

    /// Convert an in-bounds point to its (row, col) slot
    pub fn slot_of(&self, p: Point) -> (usize, usize) {
        assert!(
            self.contains(p),
            "point ({}, {}) is outside the {}x{} grid",
            p.x,
            p.y,
            WIDTH,
            HEIGHT
        );
        (p.y as usize, p.x as usize)
    }

    /// Bounds-checked accessor
    pub fn cell_at(&self, row: usize, col: usize) -> &Cell {
        check_slot(row, col);
        &self.rows[row][col]
    }

    pub fn cell_at_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        check_slot(row, col);
        &mut self.rows[row][col]
    }

    /// Cell under a point, None if the point is outside the grid
    pub fn get(&self, p: Point) -> Option<&Cell> {
        if !self.contains(p) {
            return None;
        }
        Some(&self.rows[p.y as usize][p.x as usize])
    }

    /// Inside the grid and locked
    pub fn is_locked_at(&self, p: Point) -> bool {
        self.get(p).is_some_and(Cell::is_locked)
    }

    /// Inside the grid and not locked
    pub fn is_free_at(&self, p: Point) -> bool {
        self.get(p).is_some_and(|cell| !cell.is_locked())
    }

    /// Mark a slot as settled with the given color
    pub fn lock_at(&mut self, row: usize, col: usize, color: Color) {
        let cell = self.cell_at_mut(row, col);
        cell.set_color(color);
        cell.lock();
    }

    pub fn row(&self, row: usize) -> &[Cell; WIDTH] {
        check_slot(row, 0);
        &self.rows[row]
    }

    pub fn rows(&self) -> &[[Cell; WIDTH]; HEIGHT] {
        &self.rows
    }

    /// Check if every cell in a row is locked
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row).iter().all(Cell::is_locked)
    }

    /// Remove every full row and shift the rows above down.
    ///
    /// Single bottom-up compaction pass: each surviving row moves down by the number of
    /// full rows beneath it, so simultaneous clears neither skip nor double-process a row.
    /// Fresh free rows fill the top. Free cells carry no color across a shift.
    /// Returns the cleared row indices (bottom to top, pre-clear numbering).
    pub fn clear_completed_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_row = HEIGHT;

        for read_row in (0..HEIGHT).rev() {
            if self.is_row_full(read_row) {
                cleared.push(read_row);
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let mut moved = self.rows[read_row];
                for cell in &mut moved {
                    cell.set_row(write_row);
                    if !cell.is_locked() {
                        cell.set_color(Color::BACKGROUND);
                    }
                }
                self.rows[write_row] = moved;
            }
        }

        for row in 0..write_row {
            self.rows[row] = fresh_row(row);
        }

        cleared
    }

    /// A piece failed to fully enter the grid: any cell of row 0 is locked
    pub fn is_loss_state(&self) -> bool {
        self.rows[0].iter().any(Cell::is_locked)
    }

    /// Number of locked cells on the grid
    pub fn locked_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_locked())
            .count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

fn fresh_row(row: usize) -> [Cell; WIDTH] {
    std::array::from_fn(|col| Cell::new(row, col))
}

fn check_slot(row: usize, col: usize) {
    assert!(
        row < HEIGHT && col < WIDTH,
        "cell (row {}, col {}) is outside the {}x{} grid",
        row,
        col,
        WIDTH,
        HEIGHT
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(grid: &mut Grid, row: usize) {
        for col in 0..WIDTH {
            grid.lock_at(row, col, Color::rgb(1, 2, 3));
        }
    }

    #[test]
    fn test_new_grid_is_free() {
        let grid = Grid::new();
        assert_eq!(grid.locked_count(), 0);
        assert!(!grid.is_loss_state());
        assert_eq!(grid.cell_at(7, 3).position(), Point::new(3, 7));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_cell_at_out_of_range_panics() {
        let grid = Grid::new();
        let _ = grid.cell_at(HEIGHT, 0);
    }

    #[test]
    fn test_clear_updates_cell_positions() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 19);
        grid.lock_at(18, 4, Color::rgb(9, 9, 9));

        let cleared = grid.clear_completed_rows();

        assert_eq!(cleared.as_slice(), &[19]);
        let moved = grid.cell_at(19, 4);
        assert!(moved.is_locked());
        assert_eq!(moved.position(), Point::new(4, 19));
        assert_eq!(moved.color(), Color::rgb(9, 9, 9));
    }

    #[test]
    fn test_clear_washes_free_cell_colors() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 10);
        grid.cell_at_mut(5, 5).set_color(Color::rgb(7, 7, 7));

        grid.clear_completed_rows();

        assert_eq!(grid.cell_at(6, 5).color(), Color::BACKGROUND);
    }
}
