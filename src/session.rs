//! Text command session.
//!
//! A line-oriented front end over the board and the two players. A session
//! moves through three states: `Setup` (blocks and moves arrange the
//! position), `Playing` (players alternate until the game ends) and
//! `Finished`. Automated players move as soon as it is their turn; manual
//! players wait for a move command.
//!
//! ## Supported Commands
//!
//! - `clear` - Reset the board and return to setup
//! - `start` - Start playing from the current position
//! - `block <sq>` - Place a block and its reflections (setup only)
//! - `auto <color>` / `manual <color>` - Choose who plays a color
//! - `seed <n>` - Make the automated players' choices reproducible
//! - `dump` - Print the board; `board` prints it with labels
//! - `quit` - End the session
//! - `c0r0-c1r1` - Make a move, `-` or `pass` to pass
//!
//! ## Example
//!
//! ```
//! use ataxx_rust::search::SearchConfig;
//! use ataxx_rust::session::Session;
//!
//! let mut session = Session::new(SearchConfig::default());
//! session.execute("manual blue").unwrap();
//! session.execute("start").unwrap();
//! session.execute("g7-f6").unwrap();
//! assert_eq!(session.board().red_pieces(), 3);
//! ```

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::board::{Board, PieceColor};
use crate::error::{GameError, Result};
use crate::movegen::Move;
use crate::player::{AiPlayer, ManualPlayer, Player};
use crate::search::{SearchConfig, SearchEngine};

/// Phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Setup,
    Playing,
    Finished,
}

impl State {
    fn describe(self) -> &'static str {
        match self {
            State::Setup => "setting up",
            State::Playing => "playing",
            State::Finished => "finished",
        }
    }
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Clear,
    Start,
    Block(String),
    Auto(PieceColor),
    Manual(PieceColor),
    Seed(u64),
    Dump,
    Board,
    Quit,
    Play(Move),
}

impl Command {
    /// Parse one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let args = &parts[1..];
        let arg = |name: &'static str| args.first().copied().ok_or(GameError::MissingArgument(name));

        let command = match parts[0].to_ascii_lowercase().as_str() {
            "clear" => Command::Clear,
            "start" => Command::Start,
            "block" => Command::Block(arg("square")?.to_string()),
            "auto" => Command::Auto(arg("color")?.parse()?),
            "manual" => Command::Manual(arg("color")?.parse()?),
            "seed" => {
                let text = arg("seed")?;
                let seed = text
                    .parse::<u64>()
                    .map_err(|_| GameError::InvalidSeed(text.to_string()))?;
                Command::Seed(seed)
            }
            "dump" => Command::Dump,
            "board" => Command::Board,
            "quit" => Command::Quit,
            _ => match line.parse::<Move>() {
                Ok(mv) => Command::Play(mv),
                Err(_) => return Err(GameError::UnknownCommand(parts[0].to_string())),
            },
        };
        Ok(Some(command))
    }
}

/// Index of a color's player.
fn slot(color: PieceColor) -> usize {
    match color {
        PieceColor::Blue => 1,
        _ => 0,
    }
}

/// Session state: the board, the players, and the phase of play.
pub struct Session {
    board: Board,
    state: State,
    config: SearchConfig,
    seed: Option<u64>,
    auto: [bool; 2],
    players: [Player; 2],
    quit: bool,
}

impl Session {
    /// A new session in setup, with Red played manually and Blue by the engine.
    pub fn new(config: SearchConfig) -> Self {
        let auto = [false, true];
        let players = [
            Self::build_player(PieceColor::Red, auto[0], config, None),
            Self::build_player(PieceColor::Blue, auto[1], config, None),
        ];
        Self {
            board: Board::new(),
            state: State::Setup,
            config,
            seed: None,
            auto,
            players,
            quit: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the board, e.g. to subscribe an observer.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// True once a `quit` command has been executed.
    pub fn is_quit(&self) -> bool {
        self.quit
    }

    /// Read commands from `input` until it ends or `quit`, writing responses
    /// and error messages to `output`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            match self.execute(&line) {
                Ok(lines) => {
                    for l in lines {
                        writeln!(output, "{l}")?;
                    }
                }
                Err(e) => writeln!(output, "error: {e}")?,
            }
            output.flush()?;
            if self.quit {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command line and return the lines to report.
    ///
    /// A rejected command leaves the board unchanged.
    pub fn execute(&mut self, line: &str) -> Result<Vec<String>> {
        let Some(command) = Command::parse(line)? else {
            return Ok(Vec::new());
        };
        debug!(?command, state = ?self.state, "executing");

        match command {
            Command::Clear => {
                self.board.clear();
                self.state = State::Setup;
                self.rebuild_players();
                Ok(Vec::new())
            }
            Command::Start => {
                self.check_state("start", &[State::Setup])?;
                self.state = State::Playing;
                self.rebuild_players();
                self.advance()
            }
            Command::Block(name) => {
                self.check_state("block", &[State::Setup])?;
                self.board.set_block_at(&name)?;
                Ok(Vec::new())
            }
            Command::Auto(color) => {
                self.set_auto(color, true);
                self.advance()
            }
            Command::Manual(color) => {
                self.set_auto(color, false);
                Ok(Vec::new())
            }
            Command::Seed(seed) => {
                self.seed = Some(seed);
                for player in &mut self.players {
                    let offset = slot(player.color()) as u64;
                    if let Player::Auto(ai) = player {
                        ai.engine_mut().reseed(seed.wrapping_add(offset));
                    }
                }
                Ok(Vec::new())
            }
            Command::Dump => Ok(self.board.render(false).lines().map(String::from).collect()),
            Command::Board => Ok(self.board.render(true).lines().map(String::from).collect()),
            Command::Quit => {
                self.quit = true;
                Ok(Vec::new())
            }
            Command::Play(mv) => self.play(mv),
        }
    }

    fn check_state(&self, command: &'static str, allowed: &[State]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(GameError::NotAllowed {
                command,
                state: self.state.describe(),
            })
        }
    }

    fn play(&mut self, mv: Move) -> Result<Vec<String>> {
        match self.state {
            State::Setup => {
                self.board.try_make_move(mv)?;
                Ok(Vec::new())
            }
            State::Finished => Err(GameError::NotAllowed {
                command: "move",
                state: self.state.describe(),
            }),
            State::Playing => {
                if !self.board.legal_move(mv) {
                    return Err(match mv {
                        Move::Pass => GameError::IllegalPass,
                        Move::Transfer { .. } => GameError::IllegalMove(mv),
                    });
                }
                match &mut self.players[slot(self.board.whose_move())] {
                    Player::Manual(manual) => manual.offer(mv),
                    Player::Auto(_) => {
                        return Err(GameError::NotAllowed {
                            command: "move",
                            state: "the engine is to move",
                        });
                    }
                }
                self.advance()
            }
        }
    }

    /// Let players move while it is their turn and they have a move ready.
    fn advance(&mut self) -> Result<Vec<String>> {
        let mut out = Vec::new();
        while self.state == State::Playing && !self.board.game_over() {
            let color = self.board.whose_move();
            let player = &mut self.players[slot(color)];
            let Some(mv) = player.next_move(&self.board) else {
                break;
            };
            if player.is_auto() {
                out.push(match mv {
                    Move::Pass => format!("{color} passes."),
                    Move::Transfer { .. } => format!("{color} moves {mv}."),
                });
            }
            self.board.try_make_move(mv)?;
        }

        if self.state == State::Playing && self.board.game_over() {
            out.push(match self.board.winner() {
                Some(color) => format!("{color} wins."),
                None => "Draw.".to_string(),
            });
            self.state = State::Finished;
        }
        Ok(out)
    }

    fn set_auto(&mut self, color: PieceColor, auto: bool) {
        let i = slot(color);
        self.auto[i] = auto;
        self.players[i] = Self::build_player(color, auto, self.config, self.seed);
    }

    fn rebuild_players(&mut self) {
        for color in [PieceColor::Red, PieceColor::Blue] {
            let i = slot(color);
            self.players[i] = Self::build_player(color, self.auto[i], self.config, self.seed);
        }
    }

    fn build_player(
        color: PieceColor,
        auto: bool,
        config: SearchConfig,
        seed: Option<u64>,
    ) -> Player {
        if !auto {
            return Player::Manual(ManualPlayer::new(color));
        }
        let engine = match seed {
            Some(seed) => SearchEngine::with_seed(config, seed.wrapping_add(slot(color) as u64)),
            None => SearchEngine::new(config),
        };
        Player::Auto(AiPlayer::new(color, engine))
    }
}
