//! Grid tests - row completion, compaction and loss detection

use blockfall::core::{Grid, Piece, PieceId};
use blockfall::types::{PieceKind, Point, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(grid: &mut Grid, row: usize) {
    for col in 0..grid.width() {
        grid.lock_at(row, col, PieceKind::T.color());
    }
}

fn locked_pattern(grid: &Grid, row: usize) -> Vec<bool> {
    grid.row(row).iter().map(|cell| cell.is_locked()).collect()
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), BOARD_WIDTH as usize);
    assert_eq!(grid.height(), BOARD_HEIGHT as usize);
    assert_eq!(grid.locked_count(), 0);
    assert!(!grid.is_loss_state());
    assert!((0..grid.height()).all(|row| !grid.is_row_full(row)));
}

#[test]
fn test_cell_position_matches_slot() {
    let grid = Grid::new();
    assert_eq!(grid.cell_at(7, 3).position(), Point::new(3, 7));
}

#[test]
#[should_panic]
fn test_cell_at_out_of_range_panics() {
    let grid = Grid::new();
    let _ = grid.cell_at(20, 0);
}

#[test]
fn test_get_outside_is_none() {
    let grid = Grid::new();
    assert!(grid.get(Point::new(-1, 0)).is_none());
    assert!(grid.get(Point::new(0, 20)).is_none());
    assert!(grid.get(Point::new(10, 0)).is_none());
    assert!(!grid.is_free_at(Point::new(-1, 5)));
}

#[test]
fn test_locking_last_cell_clears_row_five() {
    let mut grid = Grid::new();
    for col in 0..9 {
        grid.lock_at(5, col, PieceKind::O.color());
    }
    grid.lock_at(3, 2, PieceKind::S.color());
    grid.lock_at(6, 9, PieceKind::S.color());

    // Vertical I whose bottom cell fills (row 5, col 9); the locked cell below stops it
    let mut piece = Piece::new(PieceId(1), PieceKind::I, Point::new(9, 2));
    assert!(piece.activate(&mut grid));
    assert_eq!(piece.move_down(&mut grid), blockfall::core::Descent::Locked);
    assert!(grid.is_row_full(5));

    let above: Vec<Vec<bool>> = (0..5).map(|row| locked_pattern(&grid, row)).collect();
    let below: Vec<Vec<bool>> = (6..20).map(|row| locked_pattern(&grid, row)).collect();

    let cleared = grid.clear_completed_rows();
    assert_eq!(cleared.as_slice(), &[5]);

    assert!(grid.row(0).iter().all(|cell| !cell.is_locked()));
    for (i, pattern) in above.iter().enumerate() {
        assert_eq!(&locked_pattern(&grid, i + 1), pattern, "row {} shifted", i);
    }
    for (i, pattern) in below.iter().enumerate() {
        assert_eq!(&locked_pattern(&grid, i + 6), pattern, "row {} kept", i + 6);
    }
    assert!(grid.is_locked_at(Point::new(2, 4)));
    assert_eq!(grid.cell_at(4, 2).position(), Point::new(2, 4));
}

#[test]
fn test_two_rows_cleared_in_one_sweep() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 10);
    fill_row(&mut grid, 11);
    grid.lock_at(9, 3, PieceKind::J.color());
    grid.lock_at(8, 0, PieceKind::J.color());
    grid.lock_at(8, 1, PieceKind::J.color());
    grid.lock_at(12, 4, PieceKind::L.color());

    let before: Vec<Vec<bool>> = (0..10).map(|row| locked_pattern(&grid, row)).collect();
    let cleared = grid.clear_completed_rows();

    assert_eq!(cleared.as_slice(), &[11, 10]);
    assert_eq!(grid.height(), 20);
    for (row, pattern) in before.iter().enumerate() {
        assert_eq!(&locked_pattern(&grid, row + 2), pattern);
    }
    assert!(grid.is_locked_at(Point::new(4, 12)));
    assert_eq!(grid.locked_count(), 4);
    assert!(!grid.is_row_full(10));
    assert!(!grid.is_row_full(11));
}

#[test]
fn test_non_adjacent_rows_cleared() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19);
    fill_row(&mut grid, 17);
    grid.lock_at(18, 5, PieceKind::Z.color());

    let cleared = grid.clear_completed_rows();
    assert_eq!(cleared.as_slice(), &[19, 17]);
    assert!(grid.is_locked_at(Point::new(5, 19)));
    assert_eq!(grid.locked_count(), 1);
}

#[test]
fn test_cleared_cells_keep_their_colors() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19);
    grid.lock_at(18, 0, PieceKind::L.color());

    grid.clear_completed_rows();
    assert_eq!(grid.cell_at(19, 0).color(), PieceKind::L.color());
    assert!(grid.cell_at(18, 0).color() == blockfall::types::Color::BACKGROUND);
}

#[test]
fn test_loss_only_from_row_zero() {
    let mut grid = Grid::new();
    for row in 1..20 {
        grid.lock_at(row, row % 10, PieceKind::I.color());
    }
    fill_row(&mut grid, 1);
    assert!(!grid.is_loss_state());

    grid.lock_at(0, 7, PieceKind::I.color());
    assert!(grid.is_loss_state());
}
