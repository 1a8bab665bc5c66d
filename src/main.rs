//! Ataxx-Rust: play Ataxx against the engine from the terminal.
//!
//! ## Usage
//!
//! - `ataxx-rust` - Start an interactive session on stdin/stdout
//! - `ataxx-rust play --depth 3 --seed 7` - Same, with search options
//! - `ataxx-rust demo` - Watch the engine play itself
//!
//! Set `RUST_LOG=debug` to see the engine's decisions on stderr.

use std::io;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ataxx_rust::board::{Board, PieceColor};
use ataxx_rust::constants::{ENDGAME_EMPTY, MAX_DEPTH};
use ataxx_rust::player::{AiPlayer, Player};
use ataxx_rust::search::{SearchConfig, SearchEngine};
use ataxx_rust::session::Session;

/// Ataxx-Rust: an Ataxx rules and search engine
#[derive(Parser)]
#[command(name = "ataxx-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive text session (Red manual, Blue automated)
    Play(SearchArgs),
    /// Let the engine play both sides and print the game
    Demo {
        #[command(flatten)]
        search: SearchArgs,
        /// Stop after this many moves even if the game is not over
        #[arg(long, default_value_t = 500)]
        max_moves: usize,
    },
}

#[derive(Args, Clone, Copy)]
struct SearchArgs {
    /// Recursive search depth before the greedy evaluation
    #[arg(long, default_value_t = MAX_DEPTH)]
    depth: u32,
    /// Empty-square count below which only the greedy evaluation is used
    #[arg(long, default_value_t = ENDGAME_EMPTY)]
    endgame_empty: usize,
    /// Seed for the engine's tie-breaking
    #[arg(long)]
    seed: Option<u64>,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.depth,
            endgame_empty: self.endgame_empty,
        }
    }

    fn engine(&self, offset: u64) -> SearchEngine {
        match self.seed {
            Some(seed) => SearchEngine::with_seed(self.config(), seed.wrapping_add(offset)),
            None => SearchEngine::new(self.config()),
        }
    }
}

impl Default for SearchArgs {
    fn default() -> Self {
        Self {
            depth: MAX_DEPTH,
            endgame_empty: ENDGAME_EMPTY,
            seed: None,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => run_session(args),
        Some(Commands::Demo { search, max_moves }) => {
            run_demo(search, max_moves);
            Ok(())
        }
        None => run_session(SearchArgs::default()),
    }
}

fn run_session(args: SearchArgs) -> Result<()> {
    let mut session = Session::new(args.config());
    if let Some(seed) = args.seed {
        session.execute(&format!("seed {seed}"))?;
    }
    let stdin = io::stdin();
    session.run(stdin.lock(), io::stdout())?;
    Ok(())
}

fn run_demo(args: SearchArgs, max_moves: usize) {
    println!("Ataxx-Rust: engine vs engine\n");

    let mut board = Board::new();
    let mut players = [
        Player::Auto(AiPlayer::new(PieceColor::Red, args.engine(0))),
        Player::Auto(AiPlayer::new(PieceColor::Blue, args.engine(1))),
    ];

    let mut moves = 0;
    while !board.game_over() && moves < max_moves {
        let color = board.whose_move();
        let player = &mut players[if color == PieceColor::Red { 0 } else { 1 }];
        let Some(mv) = player.next_move(&board) else {
            break;
        };
        if mv.is_pass() {
            println!("{color} passes.");
        } else {
            println!("{color} moves {mv}.");
        }
        board.make_move(mv);
        moves += 1;
    }

    println!("\n{}", board.render(true));
    println!("Red: {}  Blue: {}", board.red_pieces(), board.blue_pieces());
    match (board.game_over(), board.winner()) {
        (false, _) => println!("Stopped after {moves} moves."),
        (true, Some(color)) => println!("{color} wins."),
        (true, None) => println!("Draw."),
    }
}
