//! Search engine integration tests.

mod common;

use common::{board_from_rows, drawn_board};
use runeboard::core::{Board, Side};
use runeboard::error::SearchError;
use runeboard::rules::{has_win, outcome, Evaluator};
use runeboard::search::{Decision, Difficulty, DifficultyProfile, MinimaxSearch, WIN_SCORE};

fn exact(depth: u32) -> DifficultyProfile {
    DifficultyProfile::new(depth, 0.0).unwrap()
}

// =============================================================================
// Rule Priority
// =============================================================================

#[test]
fn test_blocks_three_on_the_floor() {
    // Side B holds row 0 columns 1-3. Column 0 also blocks and comes first.
    let board = board_from_rows(&[".BBB..."]);

    for depth in 1..=4 {
        let mut search = MinimaxSearch::new(42);
        let column = search.choose_move(&board, Side::A, &exact(depth)).unwrap();

        assert_eq!(column, 0, "depth {depth}");
        assert_eq!(search.stats().decision, Some(Decision::Block));
    }
}

#[test]
fn test_blocks_open_end_when_other_end_taken() {
    let board = board_from_rows(&["ABBB..."]);

    let mut search = MinimaxSearch::new(42);
    let column = search
        .choose_move(&board, Side::A, &Difficulty::Master.profile())
        .unwrap();

    assert_eq!(column, 4);
    let after = board.place(column, Side::A).unwrap();
    assert!(board
        .successors(Side::B)
        .any(|(_, child)| has_win(&child, Side::B)));
    assert!(!after
        .successors(Side::B)
        .any(|(_, child)| has_win(&child, Side::B)));
}

#[test]
fn test_takes_win_over_block() {
    let board = board_from_rows(&[
        "B.....A",
        "B.....A",
        "B.....A",
    ]);

    let mut search = MinimaxSearch::new(42);
    assert_eq!(search.choose_move(&board, Side::A, &exact(4)), Ok(6));
    assert_eq!(search.stats().decision, Some(Decision::ImmediateWin));
    assert_eq!(search.choose_move(&board, Side::B, &exact(4)), Ok(0));
}

#[test]
fn test_full_board_is_a_caller_error() {
    let mut search = MinimaxSearch::new(42);
    assert_eq!(
        search.choose_move(&drawn_board(), Side::B, &exact(2)),
        Err(SearchError::NoValidColumns)
    );
    assert_eq!(search.best_column(&drawn_board(), Side::B, 2), None);
}

#[test]
fn test_single_open_column() {
    let mut rows = common::DRAWN;
    rows[0] = "BABABA.";
    let board = board_from_rows(&rows);

    let mut search = MinimaxSearch::new(3);
    for level in Difficulty::ALL {
        assert_eq!(search.choose_move(&board, Side::A, &level.profile()), Ok(6));
    }
}

// =============================================================================
// Minimax
// =============================================================================

#[test]
fn test_win_in_one_scores_win() {
    let board = board_from_rows(&[
        "......B",
        "A.....B",
        "A.....B",
    ]);

    let mut search = MinimaxSearch::new(0);
    assert_eq!(search.best_column(&board, Side::B, 2), Some((6, WIN_SCORE)));
}

#[test]
fn test_forced_loss_is_seen() {
    // Side A threatens both ends of an open three; Side B cannot stop both.
    let board = board_from_rows(&["..BB...", "..AAA.."]);

    let mut search = MinimaxSearch::new(0);
    let (_, best) = search.best_column(&board, Side::B, 2).unwrap();
    assert_eq!(best, -WIN_SCORE);
}

#[test]
fn test_custom_evaluator_drives_search() {
    /// Prefers pieces in the rightmost column.
    struct RightEdge;

    impl Evaluator for RightEdge {
        fn score(&self, board: &Board, side: Side) -> i32 {
            board.count_in_column(6, side) as i32
        }
    }

    let mut search = MinimaxSearch::with_evaluator(RightEdge, runeboard::core::GameRng::new(0));
    let column = search.choose_move(&Board::new(), Side::A, &exact(1)).unwrap();
    assert_eq!(column, 6);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_same_seed_same_game() {
    let play = |seed: u64| {
        let mut search = MinimaxSearch::new(seed);
        let mut board = Board::new();
        let mut side = Side::A;
        let mut columns = Vec::new();

        while outcome(&board).is_none() {
            let column = search
                .choose_move(&board, side, &Difficulty::Novice.profile())
                .unwrap();
            board = board.place(column, side).unwrap();
            columns.push(column);
            side = side.opponent();
        }
        columns
    };

    assert_eq!(play(11), play(11));
}

#[test]
fn test_master_beats_novice() {
    let mut master = MinimaxSearch::new(1);
    let mut novice = MinimaxSearch::new(2);
    let mut board = Board::new();
    let mut side = Side::A;

    while outcome(&board).is_none() {
        let column = match side {
            Side::A => master.choose_move(&board, side, &Difficulty::Master.profile()),
            Side::B => novice.choose_move(
                &board,
                side,
                &Difficulty::Novice.profile().with_blunder_probability(1.0).unwrap(),
            ),
        }
        .unwrap();
        board = board.place(column, side).unwrap();
        side = side.opponent();
    }

    assert!(has_win(&board, Side::A), "master should beat a random mover\n{board}");
}
