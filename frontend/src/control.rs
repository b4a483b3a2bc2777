use clap::{Parser, Subcommand};
use janggi::display_format::DisplayFormat;
use janggi::error::FenError;
use janggi::game::{Game, StalemateRule};
use janggi::piece::Player;
use janggi::square::{Move, Square};
use log::{debug, info};
use std::io::{BufRead, Write};

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    #[command(alias = "p", about = "move a piece, for example 'play e7 e6'")]
    Play { from: Square, to: Square },
    #[command(about = "give up the turn, not allowed while in check")]
    Pass,
    #[command(about = "show the board")]
    Board,
    #[command(about = "list legal moves of the player to move")]
    Moves,
    #[command(about = "report whether a player is in check")]
    Check { player: Player },
    #[command(about = "show the game state and the player to move")]
    State,
    #[command(about = "start over from the initial position")]
    New,
    #[command(alias = "q", about = "leave the game")]
    Quit,
}

pub enum Flow {
    Continue,
    Quit,
}

/// How every new game of a session starts.
#[derive(Clone, Debug, Default)]
pub struct Setup {
    pub fen: Option<String>,
    pub to_move: Option<Player>,
    pub stalemate: StalemateRule,
}

impl Setup {
    pub fn start(&self) -> Result<Game, FenError> {
        let to_move = self.to_move.unwrap_or(Player::Blue);
        let game = match &self.fen {
            Some(fen) => Game::from_fen(fen, to_move)?,
            None => Game::new(janggi::board::Board::opening(), to_move),
        };
        Ok(game.with_stalemate_rule(self.stalemate))
    }
}

/// One human-facing game driven by text commands.
pub struct Session {
    setup: Setup,
    game: Game,
    format: DisplayFormat,
}

impl Session {
    pub fn new(setup: Setup, format: DisplayFormat) -> Result<Self, FenError> {
        let game = setup.start()?;
        Ok(Self { setup, game, format })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn run(&mut self, mut input: impl BufRead, mut out: impl Write) -> std::io::Result<()> {
        writeln!(out, "{}", self.game.display(self.format))?;

        while let Some(command) = read_input::<Command>(&mut input, &mut out)? {
            if let Flow::Quit = self.execute(command, &mut out)? {
                break;
            }
            out.flush()?;
        }

        Ok(())
    }

    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> std::io::Result<Flow> {
        debug!("executing {command:?}");
        match command {
            Command::Play { from, to } => {
                if self.game.play(Move::new(from, to)) {
                    writeln!(out, "{}", self.game.display(self.format))?;
                } else {
                    writeln!(out, "illegal move")?;
                }
            }
            Command::Pass => {
                if self.game.pass() {
                    writeln!(out, "{} passed", self.game.current_player().opponent())?;
                    writeln!(out, "{}", self.game.display(self.format))?;
                } else {
                    writeln!(out, "cannot pass")?;
                }
            }
            Command::Board => writeln!(out, "{}", self.game.display(self.format))?,
            Command::Moves => {
                let moves = self.game.legal_moves();
                let moves: Vec<String> = moves.iter().map(Move::to_string).collect();
                writeln!(out, "{} legal moves: {}", moves.len(), moves.join(" "))?;
            }
            Command::Check { player } => {
                let check = self.game.is_in_check(player);
                writeln!(out, "{player} is {}in check", if check { "" } else { "not " })?;
            }
            Command::State => {
                writeln!(out, "{} {}", self.game.game_state(), self.game.current_player())?;
            }
            Command::New => match self.setup.start() {
                Ok(game) => {
                    info!("starting a new game");
                    self.game = game;
                    writeln!(out, "{}", self.game.display(self.format))?;
                }
                Err(err) => writeln!(out, "cannot start a new game - {err}")?,
            },
            Command::Quit => return Ok(Flow::Quit),
        }

        if self.game.game_state().is_finished() {
            writeln!(out, "{}", self.game.game_state().display(self.format))?;
        }

        Ok(Flow::Continue)
    }
}

/// Reads lines until one parses as a `T`, printing usage errors for the rest.
///
/// Returns `None` once `input` is exhausted.
pub fn read_input<T: clap::FromArgMatches + clap::Subcommand>(
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> std::io::Result<Option<T>> {
    #[derive(Parser)]
    #[command(
        name = "",
        no_binary_name = true,
        disable_help_flag = true,
        disable_version_flag = true,
        next_line_help = false,
        help_template = "{usage-heading} {usage}\n{all-args}"
    )]
    struct Input<T: clap::FromArgMatches + clap::Subcommand> {
        #[command(subcommand)]
        command: T,
    }

    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match Input::<T>::try_parse_from(parts) {
            Ok(Input { command }) => return Ok(Some(command)),
            Err(err) => write!(out, "{err}")?,
        }
    }
}
