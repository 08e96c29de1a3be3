//! Piece module - the active falling piece
//!
//! A piece is a shape anchored at an origin. It never owns grid cells: it only records
//! the (row, col) slots it currently paints, releases them before every move and claims
//! the new ones afterwards.
//!
//! Lifecycle: `Inactive -> Active -> Locked`. Locked is terminal for the instance.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::shape::{Reach, Shape};
use crate::types::{Color, PieceKind, Point, SPAWN_COLUMN, SPAWN_ROW};

/// Monotonic identity of a piece instance within one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceState {
    Inactive,
    Active,
    Locked,
}

/// Result of one downward step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// Origin moved one row down
    Moved,
    /// The piece could not descend and settled in place
    Locked,
    /// Nothing happened (piece not active, or the request was stale)
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    shape: Shape,
    origin: Point,
    color: Color,
    state: PieceState,
    reach: Reach,
    /// Slots currently painted by this piece, as (row, col)
    occupied: ArrayVec<(usize, usize), 4>,
}

impl Piece {
    /// Create an inactive piece in its canonical orientation
    pub fn new(id: PieceId, kind: PieceKind, origin: Point) -> Self {
        let shape = Shape::from_kind(kind);
        Self {
            id,
            kind,
            shape,
            origin,
            color: kind.color(),
            state: PieceState::Inactive,
            reach: shape.reach(),
            occupied: ArrayVec::new(),
        }
    }

    /// Create an inactive piece at the spawn anchor
    pub fn spawn(id: PieceId, kind: PieceKind) -> Self {
        Self::new(id, kind, Point::new(SPAWN_COLUMN, SPAWN_ROW))
    }

    /// Rebuild a piece from captured state. An active piece claims its cells immediately.
    pub(crate) fn restore(
        id: PieceId,
        kind: PieceKind,
        shape: Shape,
        origin: Point,
        active: bool,
        grid: &mut Grid,
    ) -> Self {
        let mut piece = Self::new(id, kind, origin);
        piece.shape = shape;
        piece.reach = shape.reach();
        if active {
            piece.state = PieceState::Active;
            piece.claim(grid);
        }
        piece
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn state(&self) -> PieceState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == PieceState::Active
    }

    pub fn reach(&self) -> Reach {
        self.reach
    }

    pub fn left_reach(&self) -> i32 {
        self.reach.left
    }

    pub fn right_reach(&self) -> i32 {
        self.reach.right
    }

    pub fn bottom_reach(&self) -> i32 {
        self.reach.bottom
    }

    /// Absolute cells of the shape at the current origin
    pub fn cells(&self) -> [Point; 4] {
        self.shape.cells_at(self.origin)
    }

    /// Slots currently painted by this piece
    pub fn occupied(&self) -> &[(usize, usize)] {
        &self.occupied
    }

    /// True if any cell of `from + offset + shape` is outside the grid or locked
    pub fn collides(&self, grid: &Grid, offset: Point, from: Point) -> bool {
        self.shape
            .offsets()
            .iter()
            .any(|&o| !grid.is_free_at(from + o + offset))
    }

    /// Claim the spawn cells. Returns false unless the piece was inactive.
    pub fn activate(&mut self, grid: &mut Grid) -> bool {
        if self.state != PieceState::Inactive {
            return false;
        }
        self.state = PieceState::Active;
        self.claim(grid);
        true
    }

    /// Move one row down, or lock in place if the piece rests on the floor or a locked cell
    pub fn move_down(&mut self, grid: &mut Grid) -> Descent {
        if !self.is_active() {
            return Descent::Ignored;
        }

        if self.on_floor(self.origin, grid) || self.collides(grid, Point::new(0, 1), self.origin)
        {
            self.lock(grid);
            return Descent::Locked;
        }

        self.relocate(grid, self.origin.offset(0, 1), self.shape);
        Descent::Moved
    }

    pub fn move_left(&mut self, grid: &mut Grid) -> bool {
        self.shift(grid, -1)
    }

    pub fn move_right(&mut self, grid: &mut Grid) -> bool {
        self.shift(grid, 1)
    }

    fn shift(&mut self, grid: &mut Grid, dx: i32) -> bool {
        if !self.is_active() {
            return false;
        }

        let within = if dx < 0 {
            self.origin.x - self.reach.left + dx >= 0
        } else {
            self.origin.x + self.reach.right + dx < grid.width() as i32
        };
        if !within || self.collides(grid, Point::new(dx, 0), self.origin) {
            return false;
        }

        self.relocate(grid, self.origin.offset(dx, 0), self.shape);
        true
    }

    /// Lowest origin reachable by straight descent, simulated on a copy
    pub fn resting_origin(&self, grid: &Grid) -> Point {
        let mut probe = self.origin;
        while !self.on_floor(probe, grid) && !self.collides(grid, Point::new(0, 1), probe) {
            probe.push_y(1);
        }
        probe
    }

    /// Jump straight to the resting position in a single mutation.
    ///
    /// Does not lock; the next descent step does. Returns false if nothing moved.
    pub fn hard_drop(&mut self, grid: &mut Grid) -> bool {
        if !self.is_active() {
            return false;
        }
        let target = self.resting_origin(grid);
        if target == self.origin {
            return false;
        }
        self.relocate(grid, target, self.shape);
        true
    }

    /// Rotate clockwise around the unchanged origin. No wall kicks: an illegal
    /// rotation is simply rejected.
    pub fn rotate(&mut self, grid: &mut Grid) -> bool {
        if !self.is_active() {
            return false;
        }
        let candidate = self.shape.rotated_clockwise();
        let legal = candidate
            .cells_at(self.origin)
            .iter()
            .all(|&cell| grid.is_free_at(cell));
        if !legal {
            return false;
        }
        self.relocate(grid, self.origin, candidate);
        true
    }

    /// Settle the claimed cells permanently and become inactive
    pub fn lock(&mut self, grid: &mut Grid) {
        if !self.is_active() {
            return;
        }
        for (row, col) in self.occupied.drain(..) {
            grid.cell_at_mut(row, col).lock();
        }
        self.state = PieceState::Locked;
    }

    /// Paint the claimed slots again (after a row shift washed free cells)
    pub(crate) fn repaint(&self, grid: &mut Grid) {
        for &(row, col) in &self.occupied {
            let cell = grid.cell_at_mut(row, col);
            if !cell.is_locked() {
                cell.set_color(self.color);
            }
        }
    }

    fn on_floor(&self, origin: Point, grid: &Grid) -> bool {
        origin.y + self.reach.bottom + 1 >= grid.height() as i32
    }

    fn claim(&mut self, grid: &mut Grid) {
        self.occupied.clear();
        for cell in self.cells() {
            let (row, col) = grid.slot_of(cell);
            let slot = grid.cell_at_mut(row, col);
            if !slot.is_locked() {
                slot.set_color(self.color);
            }
            self.occupied.push((row, col));
        }
    }

    fn release(&mut self, grid: &mut Grid) {
        for (row, col) in self.occupied.drain(..) {
            let slot = grid.cell_at_mut(row, col);
            if !slot.is_locked() {
                slot.set_color(Color::BACKGROUND);
            }
        }
    }

    fn relocate(&mut self, grid: &mut Grid, origin: Point, shape: Shape) {
        self.release(grid);
        self.origin = origin;
        self.shape = shape;
        self.reach = shape.reach();
        self.claim(grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(kind: PieceKind, grid: &mut Grid) -> Piece {
        let mut piece = Piece::spawn(PieceId(1), kind);
        assert!(piece.activate(grid));
        piece
    }

    #[test]
    fn test_activate_paints_cells() {
        let mut grid = Grid::new();
        let piece = active(PieceKind::O, &mut grid);

        assert_eq!(piece.occupied().len(), 4);
        for &(row, col) in piece.occupied() {
            assert_eq!(grid.cell_at(row, col).color(), PieceKind::O.color());
            assert!(!grid.cell_at(row, col).is_locked());
        }
    }

    #[test]
    fn test_activate_twice_is_rejected() {
        let mut grid = Grid::new();
        let mut piece = active(PieceKind::T, &mut grid);
        assert!(!piece.activate(&mut grid));
    }

    #[test]
    fn test_move_releases_old_cells() {
        let mut grid = Grid::new();
        let mut piece = active(PieceKind::I, &mut grid);

        assert_eq!(piece.move_down(&mut grid), Descent::Moved);

        assert_eq!(grid.cell_at(0, 5).color(), Color::BACKGROUND);
        assert_eq!(grid.cell_at(4, 5).color(), PieceKind::I.color());
    }

    #[test]
    fn test_collides_treats_outside_as_blocked() {
        let mut grid = Grid::new();
        let piece = active(PieceKind::I, &mut grid);

        assert!(piece.collides(&grid, Point::new(0, -1), piece.origin()));
        assert!(piece.collides(&grid, Point::new(5, 0), piece.origin()));
        assert!(piece.collides(&grid, Point::ZERO, Point::new(5, 17)));
        assert!(!piece.collides(&grid, Point::new(0, 1), piece.origin()));
    }

    #[test]
    fn test_lock_marks_cells_and_stops() {
        let mut grid = Grid::new();
        let mut piece = active(PieceKind::O, &mut grid);

        piece.lock(&mut grid);

        assert_eq!(piece.state(), PieceState::Locked);
        assert!(piece.occupied().is_empty());
        assert_eq!(grid.locked_count(), 4);
        assert_eq!(piece.move_down(&mut grid), Descent::Ignored);
        assert!(!piece.move_left(&mut grid));
    }

    #[test]
    fn test_inactive_piece_ignores_commands() {
        let mut grid = Grid::new();
        let mut piece = Piece::spawn(PieceId(1), PieceKind::T);

        assert!(!piece.move_left(&mut grid));
        assert!(!piece.rotate(&mut grid));
        assert!(!piece.hard_drop(&mut grid));
        assert_eq!(piece.move_down(&mut grid), Descent::Ignored);
        assert_eq!(grid, Grid::new());
    }
}
