//! Shared helpers for integration tests.

#![allow(dead_code)]

use runeboard::core::{Board, Side, ROWS};
use runeboard::session::{Session, SessionEvent};

use std::cell::RefCell;
use std::rc::Rc;

/// A full board with no four in a row, top row first.
pub const DRAWN: [&str; ROWS] = [
    "BABABAB",
    "BAAABAB",
    "AAABAAA",
    "BBABBBA",
    "AABBBAB",
    "BABABBA",
];

/// Build a board from text rows, top row first. `A`, `B`, anything else empty.
///
/// Rows are dropped bottom-up, so the picture must obey gravity.
pub fn board_from_rows(rows: &[&str]) -> Board {
    let mut board = Board::new();
    for line in rows.iter().rev() {
        for (col, symbol) in line.chars().enumerate() {
            let side = match symbol {
                'A' => Side::A,
                'B' => Side::B,
                _ => continue,
            };
            board = board.place(col, side).unwrap();
        }
    }
    board
}

/// The drawn board.
pub fn drawn_board() -> Board {
    board_from_rows(&DRAWN)
}

/// Collect every event the session emits from now on.
pub fn record_events(session: &mut Session) -> Rc<RefCell<Vec<SessionEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session.subscribe(move |event, _| sink.borrow_mut().push(event.clone()));
    events
}
