//! The playing grid and its gravity-drop placement rule.
//!
//! ## Layout
//!
//! Rows are indexed bottom-to-top: row 0 is the floor. A piece dropped into
//! a column always lands on the lowest empty row of that column, so a
//! filled cell above an empty cell can never occur. Cells are private and
//! the only way to fill one is [`Board::place`], which keeps that invariant
//! by construction. Deserialization goes through the same check and
//! rejects grids with floating pieces.
//!
//! ## Snapshots
//!
//! `Board` is a small `Copy` value. [`Board::place`] returns a new board and
//! leaves the receiver untouched, so the search can branch freely without
//! aliasing a shared grid.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::side::Side;
use crate::error::{BoardError, StateError};

/// Number of rows.
pub const ROWS: usize = 6;

/// Number of columns.
pub const COLS: usize = 7;

/// Pieces in a row needed to win.
pub const CONNECT: usize = 4;

/// Column rewarded by the position evaluator.
pub const CENTER_COLUMN: usize = COLS / 2;

/// Column indices, stored inline (a board never has more than `COLS`).
pub type Columns = SmallVec<[usize; COLS]>;

/// A cell position. Row 0 is the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Immutable game board snapshot.
///
/// ```
/// use runeboard::core::{Board, Side};
///
/// let board = Board::new();
/// let next = board.place(3, Side::A).unwrap();
///
/// assert_eq!(next.get(0, 3), Some(Side::A));
/// assert_eq!(board.get(0, 3), None); // original untouched
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    /// rows -> columns, row 0 at the bottom.
    cells: [[Option<Side>; COLS]; ROWS],
}

/// Unchecked serialized form of a [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    cells: [[Option<Side>; COLS]; ROWS],
}

impl TryFrom<RawBoard> for Board {
    type Error = StateError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        for row in 1..ROWS {
            for col in 0..COLS {
                if raw.cells[row][col].is_some() && raw.cells[row - 1][col].is_none() {
                    return Err(StateError::FloatingPiece { row, col });
                }
            }
        }
        Ok(Self { cells: raw.cells })
    }
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[None; COLS]; ROWS],
        }
    }

    /// Build a board by dropping pieces in order.
    ///
    /// Sides are taken as given, so positions that could not arise from
    /// strict turn alternation are allowed (useful for tests and puzzles).
    pub fn from_moves(moves: &[(usize, Side)]) -> Result<Self, BoardError> {
        moves
            .iter()
            .try_fold(Self::new(), |board, &(col, side)| board.place(col, side))
    }

    /// Get the occupant of a cell.
    ///
    /// # Panics
    ///
    /// Panics if `row >= ROWS` or `col >= COLS`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Side> {
        self.cells[row][col]
    }

    /// Get the occupant of a cell by coordinate.
    #[must_use]
    pub fn at(&self, coord: Coord) -> Option<Side> {
        self.get(coord.row, coord.col)
    }

    /// Check whether a column can still take a piece.
    ///
    /// Out-of-range columns are never open.
    #[must_use]
    pub fn is_column_open(&self, col: usize) -> bool {
        col < COLS && self.cells[ROWS - 1][col].is_none()
    }

    /// Columns whose top row is empty, in ascending order.
    ///
    /// This is the canonical move order for search and random selection.
    #[must_use]
    pub fn valid_columns(&self) -> Columns {
        (0..COLS).filter(|&col| self.is_column_open(col)).collect()
    }

    /// Row a piece dropped into `col` would land on.
    pub fn drop_row(&self, col: usize) -> Result<usize, BoardError> {
        if col >= COLS {
            return Err(BoardError::InvalidColumn(col));
        }

        (0..ROWS)
            .find(|&row| self.cells[row][col].is_none())
            .ok_or(BoardError::ColumnFull(col))
    }

    /// Drop a piece and return the resulting board.
    ///
    /// The receiver is not modified.
    pub fn place(&self, col: usize, side: Side) -> Result<Self, BoardError> {
        let row = self.drop_row(col)?;
        let mut next = *self;
        next.cells[row][col] = Some(side);
        Ok(next)
    }

    /// Boards reachable by `side` dropping into each valid column, paired
    /// with the column, in ascending column order.
    pub fn successors(&self, side: Side) -> impl Iterator<Item = (usize, Board)> + '_ {
        self.valid_columns()
            .into_iter()
            .filter_map(move |col| self.place(col, side).ok().map(|board| (col, board)))
    }

    /// True if no column has an open row.
    #[must_use]
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_column_open(col))
    }

    /// Total pieces on the board.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Pieces `side` holds in a column.
    ///
    /// # Panics
    ///
    /// Panics if `col >= COLS`.
    #[must_use]
    pub fn count_in_column(&self, col: usize, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|row| row[col] == Some(side))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the top row first, `.` for empty cells.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.iter().rev() {
            for cell in row {
                let symbol = cell.map_or('.', Side::symbol);
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_column(board: Board, col: usize) -> Board {
        (0..ROWS).fold(board, |b, i| {
            let side = if i % 2 == 0 { Side::A } else { Side::B };
            b.place(col, side).unwrap()
        })
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), None);
            }
        }
        assert_eq!(board.piece_count(), 0);
        assert!(!board.is_full());
    }

    #[test]
    fn test_drop_row_stacks_upwards() {
        let mut board = Board::new();
        for expected in 0..ROWS {
            assert_eq!(board.drop_row(2), Ok(expected));
            board = board.place(2, Side::A).unwrap();
        }
        assert_eq!(board.drop_row(2), Err(BoardError::ColumnFull(2)));
    }

    #[test]
    fn test_place_leaves_original_untouched() {
        let board = Board::new().place(0, Side::B).unwrap();
        let next = board.place(0, Side::A).unwrap();

        assert_eq!(board.get(1, 0), None);
        assert_eq!(next.get(0, 0), Some(Side::B));
        assert_eq!(next.get(1, 0), Some(Side::A));
    }

    #[test]
    fn test_place_full_column() {
        let board = fill_column(Board::new(), 4);
        assert_eq!(board.place(4, Side::A), Err(BoardError::ColumnFull(4)));
    }

    #[test]
    fn test_invalid_column() {
        let board = Board::new();
        assert_eq!(board.drop_row(COLS), Err(BoardError::InvalidColumn(COLS)));
        assert_eq!(board.place(99, Side::A), Err(BoardError::InvalidColumn(99)));
        assert!(!board.is_column_open(COLS));
    }

    #[test]
    fn test_valid_columns() {
        let mut board = Board::new();
        assert_eq!(board.valid_columns().as_slice(), &[0, 1, 2, 3, 4, 5, 6]);

        for col in [1, 3, 5, 6] {
            board = fill_column(board, col);
        }
        assert_eq!(board.valid_columns().as_slice(), &[0, 2, 4]);

        for col in [0, 2, 4] {
            board = fill_column(board, col);
        }
        assert!(board.valid_columns().is_empty());
        assert!(board.is_full());
        assert_eq!(board.piece_count(), ROWS * COLS);
    }

    #[test]
    fn test_successors() {
        let board = fill_column(Board::new(), 0);
        let children: Vec<_> = board.successors(Side::B).collect();

        assert_eq!(children.len(), COLS - 1);
        for (col, child) in children {
            assert_ne!(col, 0);
            assert_eq!(child.get(0, col), Some(Side::B));
            assert_eq!(child.piece_count(), board.piece_count() + 1);
        }
    }

    #[test]
    fn test_from_moves() {
        let board = Board::from_moves(&[(3, Side::A), (3, Side::B), (0, Side::A)]).unwrap();
        assert_eq!(board.at(Coord::new(0, 3)), Some(Side::A));
        assert_eq!(board.at(Coord::new(1, 3)), Some(Side::B));
        assert_eq!(board.at(Coord::new(0, 0)), Some(Side::A));
        assert_eq!(board.count_in_column(3, Side::A), 1);
        assert_eq!(board.count_in_column(3, Side::B), 1);

        let overfilled: Vec<_> = (0..=ROWS).map(|_| (1, Side::A)).collect();
        assert_eq!(Board::from_moves(&overfilled), Err(BoardError::ColumnFull(1)));
    }

    #[test]
    #[should_panic]
    fn test_count_in_column_out_of_range_panics() {
        let _ = Board::new().count_in_column(COLS, Side::A);
    }

    #[test]
    fn test_display() {
        let board = Board::from_moves(&[(0, Side::A), (0, Side::B), (6, Side::A)]).unwrap();
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), ROWS);
        assert_eq!(lines[ROWS - 1], "X.....X");
        assert_eq!(lines[ROWS - 2], "O......");
        assert_eq!(lines[0], ".......");
    }

    #[test]
    fn test_board_serialization() {
        let board = Board::from_moves(&[(3, Side::A), (2, Side::B)]).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, restored);
    }

    #[test]
    fn test_deserialize_rejects_floating_piece() {
        let mut cells = serde_json::to_value([[None::<Side>; COLS]; ROWS]).unwrap();
        cells[ROWS - 1][0] = serde_json::json!("A");
        let json = serde_json::json!({ "cells": cells });

        let err = serde_json::from_value::<Board>(json).unwrap_err();
        assert!(err.to_string().contains("piece at (5, 0)"), "{err}");
    }

    #[test]
    fn test_deserialize_accepts_stacked_column() {
        let mut cells = serde_json::to_value([[None::<Side>; COLS]; ROWS]).unwrap();
        cells[0][2] = serde_json::json!("B");
        cells[1][2] = serde_json::json!("A");
        let json = serde_json::json!({ "cells": cells });

        let board: Board = serde_json::from_value(json).unwrap();
        assert_eq!(board, Board::from_moves(&[(2, Side::B), (2, Side::A)]).unwrap());
        assert_eq!(board.drop_row(2), Ok(2));
    }
}
