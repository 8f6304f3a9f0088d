mod board;
mod game;
mod history;
mod input;
mod levels;
mod session;

use clap::Parser;
use game::MoveResult;
use input::Command;
use levels::Levels;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use session::Session;
use std::io::{self, BufRead, Write};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "boxpush")]
#[command(about = "A Sokoban puzzle game", long_about = None)]
struct Args {
    /// Level number to start at (1-indexed)
    #[arg(value_name = "LEVEL", default_value = "1")]
    level: usize,

    /// Path to a levels file (XSB format); the built-in levels are used if omitted
    #[arg(short = 'f', long, value_name = "FILE")]
    levels_file: Option<String>,

    /// Play these keys and print the result instead of reading from stdin
    /// (LURD letters, `z` to undo, `!` to restart)
    #[arg(short, long)]
    moves: Option<String>,

    /// Start at a randomly chosen level
    #[arg(long, default_value = "false")]
    random: bool,

    /// Seed for --random
    #[arg(long, default_value = "0")]
    seed: u64,
}

enum Flow {
    Continue,
    Quit,
}

fn print_status(session: &Session) {
    let game = session.game();
    println!(
        "level: {}/{}  moves: {}  undo: {}  goals: {}\n{}",
        session.level_index() + 1,
        session.level_count(),
        game.move_count(),
        game.history_len(),
        game.goals().len(),
        game
    );
}

fn apply(session: &mut Session, command: Command, verbose: bool) -> Flow {
    match command {
        Command::Move(dir) => match session.step(dir) {
            MoveResult::Accepted { .. } => {
                if verbose && session.game().is_solved() {
                    println!(
                        "Solved in {} moves! Type 'next' for the next level.",
                        session.game().move_count()
                    );
                }
            }
            MoveResult::Rejected(reason) => {
                if verbose {
                    println!("Can't move {}: {}", dir, reason);
                }
            }
        },
        Command::Undo => {
            session.undo();
        }
        Command::Restart => {
            if let Err(e) = session.restart() {
                warn!(%e, "restart failed");
            }
        }
        Command::Next => match session.next_level() {
            Ok(true) => {}
            Ok(false) => println!("That was the last level."),
            Err(e) => warn!(%e, "next level failed"),
        },
        Command::Select(index) => {
            if let Err(e) = session.select(index) {
                println!("{}", e);
            }
        }
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn play_scripted(session: &mut Session, keys: &str) {
    let commands = match input::parse_keys(keys) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for command in commands {
        apply(session, command, false);
    }

    print_status(session);
    println!(
        "solved: {}",
        if session.game().is_solved() { 'Y' } else { 'N' }
    );
}

fn play_interactive(session: &mut Session) {
    println!("Keys: u/d/l/r to move, z to undo. Commands: restart, next, level N, quit.\n");
    print_status(session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(%e, "failed to read input");
                break;
            }
        }

        let commands = match input::parse_line(&line) {
            Ok(commands) => commands,
            Err(e) => {
                warn!(%e, "ignored input");
                println!("{}", e);
                continue;
            }
        };

        for command in commands {
            if let Flow::Quit = apply(session, command, true) {
                return;
            }
        }
        print_status(session);
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    let levels = match &args.levels_file {
        Some(path) => match Levels::from_file(path) {
            Ok(levels) => levels,
            Err(e) => {
                eprintln!("Error loading levels: {}", e);
                std::process::exit(1);
            }
        },
        None => Levels::builtin(),
    };

    if args.level == 0 {
        eprintln!("Error: level numbers must be at least 1");
        std::process::exit(1);
    }

    if args.level > levels.len() {
        eprintln!(
            "Error: level {} not found ({} levels available)",
            args.level,
            levels.len()
        );
        std::process::exit(1);
    }

    let index = if args.random {
        let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
        rng.gen_range(0..levels.len())
    } else {
        args.level - 1
    };

    let mut session = match Session::new(levels, index) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error starting level: {}", e);
            std::process::exit(1);
        }
    };

    match &args.moves {
        Some(keys) => play_scripted(&mut session, keys),
        None => play_interactive(&mut session),
    }
}
