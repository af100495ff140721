//! Terminal front-end: play Side A against the agent.
//!
//! Columns are entered 1-based. `n` starts a new game, `m` returns to the
//! menu, `q` quits. Set `RUST_LOG=debug` to see the agent's decisions.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use runeboard::search::Difficulty;
use runeboard::session::{GameStatus, Session, SessionConfig, SessionEvent, TurnState};
use runeboard::{Side, COLS};

#[derive(Parser, Debug)]
#[command(name = "runeboard", version, about = "Four in a row against a minimax agent")]
struct Args {
    /// Agent skill: novice, adept or master (easy, medium, hard also work).
    #[arg(short, long, default_value = "adept")]
    difficulty: Difficulty,

    /// Seed for the agent's randomness.
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Reply and end games without the display pauses.
    #[arg(long)]
    no_delay: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = SessionConfig::default()
        .with_difficulty(args.difficulty)
        .with_seed(args.seed);
    if args.no_delay {
        config = config
            .with_think_delay(Duration::ZERO)
            .with_game_over_delay(Duration::ZERO);
    }

    let mut session = Session::new(config);
    session.subscribe(print_event);
    session.start_game();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        run_pending(&mut session);
        prompt(session.state())?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read from stdin")?;

        match line.trim() {
            "" => {}
            "q" => break,
            "n" => session.start_game(),
            "m" => session.return_to_menu(),
            input => match input.parse::<usize>() {
                Ok(column) if column >= 1 => session.submit_move(column - 1),
                _ => println!("Enter a column 1-{COLS}, n (new game), m (menu) or q (quit)."),
            },
        }
    }

    Ok(())
}

/// Sleep through every pending effect in real time.
fn run_pending(session: &mut Session) {
    while let Some(wait) = session.time_to_next_effect() {
        thread::sleep(wait);
        session.advance(wait);
    }
}

fn prompt(state: &TurnState) -> Result<()> {
    let text = match state.status() {
        GameStatus::Menu => "[menu] n to play, q to quit > ",
        GameStatus::GameOver => "[game over] n to play again, m for menu > ",
        GameStatus::Playing => "Your move (1-7) > ",
    };
    print!("{text}");
    io::stdout().flush().context("failed to flush stdout")
}

fn print_event(event: &SessionEvent, state: &TurnState) {
    match event {
        SessionEvent::GameStarted { game } => {
            println!("\n{game} started. You are {}.", Side::A.symbol());
            print_board(state);
        }
        SessionEvent::PiecePlaced { side, coord } => {
            println!("\n{side} dropped into column {}.", coord.col + 1);
            print_board(state);
        }
        SessionEvent::AgentThinking { .. } => println!("Agent is thinking..."),
        SessionEvent::GameDecided { outcome, line } => {
            println!("{outcome}!");
            if let Some(line) = line {
                let cells: Vec<_> = line.iter().map(ToString::to_string).collect();
                println!("Winning line: {}", cells.join(" "));
            }
        }
        SessionEvent::MoveRejected { column, reason } => {
            println!("Column {} ignored: {reason}.", column + 1);
        }
        SessionEvent::ReturnedToMenu => println!("Back at the menu."),
        _ => {}
    }
}

fn print_board(state: &TurnState) {
    print!("{}", state.board());
    let labels: String = (1..=COLS).map(|col| char::from(b'0' + col as u8)).collect();
    println!("{labels}");
}
