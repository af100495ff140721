//! Four-cell windows and four-in-a-row detection.
//!
//! Every run of `CONNECT` cells along one of the four orientations is a
//! *window*. The window table is built once and shared by the win detector
//! and the position evaluator.
//!
//! ## Scan Order
//!
//! Windows are stored in a fixed order so that the first winning run found
//! is reproducible:
//!
//! 1. Horizontal: rows top-to-bottom, then window start left-to-right
//! 2. Vertical: columns left-to-right, then window start bottom-to-top
//! 3. Diagonal ↗: start row ascending, then start column ascending
//! 4. Diagonal ↘: start row ascending, then start column ascending
//!
//! Cells inside a window follow the orientation's natural direction from
//! its start cell.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::core::{Board, Coord, Side, COLS, CONNECT, ROWS};

/// Coordinates of a winning run, in scan direction.
pub type WinningLine = [Coord; CONNECT];

/// Direction of a line on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Left to right along a row.
    Horizontal,
    /// Bottom to top along a column.
    Vertical,
    /// Up and to the right (↗).
    DiagonalUp,
    /// Down and to the right (↘).
    DiagonalDown,
}

impl Orientation {
    /// All orientations in scan order.
    pub const ALL: [Orientation; 4] = [
        Orientation::Horizontal,
        Orientation::Vertical,
        Orientation::DiagonalUp,
        Orientation::DiagonalDown,
    ];

    /// Row and column delta between consecutive cells.
    #[must_use]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
            Orientation::DiagonalUp => (1, 1),
            Orientation::DiagonalDown => (-1, 1),
        }
    }

    /// Start cells of every window in this orientation, in scan order.
    fn starts(self) -> Vec<Coord> {
        let last_col = COLS - CONNECT;
        let last_row = ROWS - CONNECT;

        match self {
            Orientation::Horizontal => (0..ROWS)
                .rev()
                .flat_map(|row| (0..=last_col).map(move |col| Coord::new(row, col)))
                .collect(),
            Orientation::Vertical => (0..COLS)
                .flat_map(|col| (0..=last_row).map(move |row| Coord::new(row, col)))
                .collect(),
            Orientation::DiagonalUp => (0..=last_row)
                .flat_map(|row| (0..=last_col).map(move |col| Coord::new(row, col)))
                .collect(),
            Orientation::DiagonalDown => (CONNECT - 1..ROWS)
                .flat_map(|row| (0..=last_col).map(move |col| Coord::new(row, col)))
                .collect(),
        }
    }

    /// The `CONNECT` cells starting at `start`.
    ///
    /// `start` must come from `starts()` so every cell is on the board.
    fn line_from(self, start: Coord) -> WinningLine {
        let (d_row, d_col) = self.step();
        std::array::from_fn(|i| {
            let i = i as isize;
            Coord::new(
                (start.row as isize + d_row * i) as usize,
                (start.col as isize + d_col * i) as usize,
            )
        })
    }
}

/// One run of `CONNECT` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub orientation: Orientation,
    pub cells: WinningLine,
}

/// Occupancy of a window from one side's point of view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowCounts {
    pub own: usize,
    pub opponent: usize,
    pub empty: usize,
}

impl Window {
    /// Count own, opponent and empty cells.
    #[must_use]
    pub fn counts(&self, board: &Board, side: Side) -> WindowCounts {
        self.cells
            .iter()
            .fold(WindowCounts::default(), |mut counts, &coord| {
                match board.at(coord) {
                    Some(s) if s == side => counts.own += 1,
                    Some(_) => counts.opponent += 1,
                    None => counts.empty += 1,
                }
                counts
            })
    }

    /// True if `side` holds every cell.
    #[must_use]
    pub fn is_owned_by(&self, board: &Board, side: Side) -> bool {
        self.cells.iter().all(|&coord| board.at(coord) == Some(side))
    }
}

/// Every window on the board, in scan order.
pub fn windows() -> &'static [Window] {
    static WINDOWS: OnceLock<Vec<Window>> = OnceLock::new();

    WINDOWS.get_or_init(|| {
        Orientation::ALL
            .iter()
            .flat_map(|&orientation| {
                orientation.starts().into_iter().map(move |start| Window {
                    orientation,
                    cells: orientation.line_from(start),
                })
            })
            .collect()
    })
}

/// First run of `CONNECT` cells owned by `side`, in scan order.
#[must_use]
pub fn winning_line(board: &Board, side: Side) -> Option<WinningLine> {
    windows()
        .iter()
        .find(|window| window.is_owned_by(board, side))
        .map(|window| window.cells)
}

/// True if `side` has four in a row anywhere.
#[must_use]
pub fn has_win(board: &Board, side: Side) -> bool {
    winning_line(board, side).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(cells: &[(usize, usize)]) -> Vec<Coord> {
        cells.iter().map(|&(r, c)| Coord::new(r, c)).collect()
    }

    #[test]
    fn test_window_count() {
        // 24 horizontal + 21 vertical + 12 + 12 diagonal
        let per_orientation = |o| windows().iter().filter(|w| w.orientation == o).count();
        assert_eq!(per_orientation(Orientation::Horizontal), 24);
        assert_eq!(per_orientation(Orientation::Vertical), 21);
        assert_eq!(per_orientation(Orientation::DiagonalUp), 12);
        assert_eq!(per_orientation(Orientation::DiagonalDown), 12);
        assert_eq!(windows().len(), 69);
    }

    #[test]
    fn test_windows_stay_on_board() {
        for window in windows() {
            for coord in window.cells {
                assert!(coord.row < ROWS && coord.col < COLS, "{coord} off board");
            }
        }
    }

    #[test]
    fn test_scan_order_starts_top_left_horizontal() {
        let first = windows()[0];
        assert_eq!(first.orientation, Orientation::Horizontal);
        assert_eq!(first.cells.to_vec(), coords(&[(5, 0), (5, 1), (5, 2), (5, 3)]));
    }

    #[test]
    fn test_vertical_line() {
        let board = Board::from_moves(&[(3, Side::A), (3, Side::A), (3, Side::A), (3, Side::A)])
            .unwrap();

        let line = winning_line(&board, Side::A).unwrap();
        assert_eq!(line.to_vec(), coords(&[(0, 3), (1, 3), (2, 3), (3, 3)]));
        assert!(has_win(&board, Side::A));
        assert!(!has_win(&board, Side::B));
    }

    #[test]
    fn test_horizontal_line() {
        let moves: Vec<_> = (1..5).map(|col| (col, Side::B)).collect();
        let board = Board::from_moves(&moves).unwrap();

        let line = winning_line(&board, Side::B).unwrap();
        assert_eq!(line.to_vec(), coords(&[(0, 1), (0, 2), (0, 3), (0, 4)]));
    }

    #[test]
    fn test_three_is_not_a_win() {
        let board = Board::from_moves(&[(0, Side::A), (1, Side::A), (2, Side::A)]).unwrap();
        assert_eq!(winning_line(&board, Side::A), None);
    }

    #[test]
    fn test_upper_row_found_first() {
        let mut moves: Vec<_> = (0..4).map(|col| (col, Side::A)).collect();
        moves.extend((2..6).map(|col| (col, Side::A)));
        let board = Board::from_moves(&moves).unwrap();

        // Row 0 holds six in a row; columns 2-5 also reach row 1.
        let board = board.place(4, Side::A).unwrap().place(5, Side::A).unwrap();
        let line = winning_line(&board, Side::A).unwrap();
        assert_eq!(line[0].row, 1);
    }

    #[test]
    fn test_horizontal_before_vertical() {
        // Vertical run in column 0 plus a horizontal run on row 0.
        let board = Board::from_moves(&[
            (0, Side::A),
            (0, Side::A),
            (0, Side::A),
            (0, Side::A),
            (1, Side::A),
            (2, Side::A),
            (3, Side::A),
        ])
        .unwrap();

        let line = winning_line(&board, Side::A).unwrap();
        assert_eq!(line.to_vec(), coords(&[(0, 0), (0, 1), (0, 2), (0, 3)]));
    }

    #[test]
    fn test_diagonal_up_line() {
        let board = Board::from_moves(&[
            (0, Side::A),
            (1, Side::B),
            (1, Side::A),
            (2, Side::B),
            (2, Side::B),
            (2, Side::A),
            (3, Side::B),
            (3, Side::B),
            (3, Side::B),
            (3, Side::A),
        ])
        .unwrap();

        let line = winning_line(&board, Side::A).unwrap();
        assert_eq!(line.to_vec(), coords(&[(0, 0), (1, 1), (2, 2), (3, 3)]));
        assert!(!has_win(&board, Side::B));
    }

    #[test]
    fn test_diagonal_down_line() {
        let board = Board::from_moves(&[
            (6, Side::A),
            (5, Side::B),
            (5, Side::A),
            (4, Side::B),
            (4, Side::B),
            (4, Side::A),
            (3, Side::B),
            (3, Side::B),
            (3, Side::B),
            (3, Side::A),
        ])
        .unwrap();

        let line = winning_line(&board, Side::A).unwrap();
        assert_eq!(line.to_vec(), coords(&[(3, 3), (2, 4), (1, 5), (0, 6)]));
    }

    #[test]
    fn test_window_counts() {
        let board = Board::from_moves(&[(0, Side::A), (1, Side::A), (2, Side::B)]).unwrap();
        let bottom_left = windows()
            .iter()
            .find(|w| {
                w.orientation == Orientation::Horizontal && w.cells[0] == Coord::new(0, 0)
            })
            .unwrap();

        let counts = bottom_left.counts(&board, Side::A);
        assert_eq!(
            counts,
            WindowCounts {
                own: 2,
                opponent: 1,
                empty: 1
            }
        );
        assert_eq!(bottom_left.counts(&board, Side::B).own, 1);
    }
}
