use crate::board::Board;
use crate::display_format::DisplayFormat;
use crate::error::{FenError, ParseError};
use crate::evaluator;
use crate::piece::{Piece, PieceKind, Player};
use crate::rules;
use crate::square::{Move, Square};
use log::{debug, info, trace};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Where a game stands. Every value other than `Unfinished` is final.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum GameState {
    Unfinished,
    BlueWon,
    RedWon,
    Drawn,
}

/// What happens to a player who has no legal move while not in check.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum StalemateRule {
    /// The stalemated player loses, exactly as if checkmated.
    #[default]
    Loss,
    Draw,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
enum Rejection {
    #[error("the game is already over")]
    Finished,
    #[error("no piece on {0}")]
    EmptySource(Square),
    #[error("{0} does not belong to {1}")]
    NotOwned(Piece, Player),
    #[error("{0} cannot move from {1} to {2}")]
    Geometry(Piece, Square, Square),
    #[error("{0} would be left in check")]
    SelfCheck(Player),
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    current: Player,
    state: GameState,
    stalemate: StalemateRule,
    history: Vec<(Move, Option<Piece>)>,
}

impl GameState {
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::Blue => GameState::BlueWon,
            Player::Red => GameState::RedWon,
        }
    }

    pub fn is_finished(&self) -> bool {
        *self != GameState::Unfinished
    }

    pub fn display(self, format: DisplayFormat) -> impl Display {
        let general = |player| Piece::new(PieceKind::General, player);
        let format = format.with_concise(false);
        match self {
            Self::Unfinished => "game in progress".to_owned(),
            Self::BlueWon => format!("{} won, red has no legal move", general(Player::Blue).display(format)),
            Self::RedWon => format!("{} won, blue has no legal move", general(Player::Red).display(format)),
            Self::Drawn => "draw by stalemate".to_owned(),
        }
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Unfinished => "UNFINISHED",
            Self::BlueWon => "BLUE_WON",
            Self::RedWon => "RED_WON",
            Self::Drawn => "DRAWN",
        })
    }
}

impl FromStr for StalemateRule {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.to_ascii_lowercase().as_str() {
            "loss" => Ok(StalemateRule::Loss),
            "draw" => Ok(StalemateRule::Draw),
            _ => Err(ParseError::StalemateRule(text.to_owned())),
        }
    }
}

impl Display for StalemateRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StalemateRule::Loss => "loss",
            StalemateRule::Draw => "draw",
        })
    }
}

impl Game {
    pub fn new(board: Board, to_move: Player) -> Self {
        let mut game = Self {
            board,
            current: to_move,
            state: GameState::Unfinished,
            stalemate: StalemateRule::default(),
            history: Vec::new(),
        };
        game.state = game.evaluate();
        game
    }

    pub fn opening() -> Self {
        Self::new(Board::opening(), Player::Blue)
    }

    /// Builds a game from board notation.
    ///
    /// Both generals must be present, and the side waiting for its turn must not be in check,
    /// since its general could then be captured outright.
    pub fn from_fen(fen: &str, to_move: Player) -> Result<Self, FenError> {
        let board = Board::from_fen(fen)?;
        for player in [Player::Blue, Player::Red] {
            if board.find_general(player).is_none() {
                return Err(FenError::MissingGeneral(player));
            }
        }
        if evaluator::is_in_check(&board, to_move.opponent()) {
            return Err(FenError::WaitingSideInCheck(to_move.opponent()));
        }
        Ok(Self::new(board, to_move))
    }

    pub fn with_stalemate_rule(mut self, rule: StalemateRule) -> Self {
        self.stalemate = rule;
        if self.history.is_empty() {
            self.state = self.evaluate();
        }
        self
    }

    pub fn fen(&self) -> (String, Player) {
        (self.board.fen(), self.current)
    }

    /// Plays a move given in algebraic notation, such as `make_move("e7", "e6")`.
    ///
    /// Naming one of the mover's own pieces twice passes the turn. Malformed notation is an
    /// illegal move like any other.
    pub fn make_move(&mut self, source: &str, destination: &str) -> bool {
        let (Ok(from), Ok(to)) = (source.parse::<Square>(), destination.parse::<Square>()) else {
            debug!("rejected {source:?} -> {destination:?}: malformed square");
            return false;
        };
        if from == to {
            let rejection = match self.board[from] {
                Some(piece) if piece.player() == self.current => return self.pass(),
                Some(piece) => Rejection::NotOwned(piece, self.current),
                None => Rejection::EmptySource(from),
            };
            debug!("rejected pass on {from}: {rejection}");
            return false;
        }
        self.play(Move::new(from, to))
    }

    /// Applies `mv` for the current player, returning whether it was accepted.
    pub fn play(&mut self, mv: Move) -> bool {
        if let Err(rejection) = self.check(mv) {
            debug!("rejected {mv}: {rejection}");
            return false;
        }

        let capture = self.board.apply(mv);
        trace!("{} played {mv}, capturing {capture:?}", self.current);

        self.history.push((mv, capture));
        self.advance();
        true
    }

    /// Gives up the turn, which is only allowed while not in check.
    pub fn pass(&mut self) -> bool {
        if self.state.is_finished() {
            debug!("rejected pass: {}", Rejection::Finished);
            return false;
        }
        if self.is_in_check(self.current) {
            debug!("rejected pass: {}", Rejection::SelfCheck(self.current));
            return false;
        }

        trace!("{} passed", self.current);
        self.advance();
        true
    }

    fn check(&self, mv: Move) -> Result<(), Rejection> {
        if self.state.is_finished() {
            return Err(Rejection::Finished);
        }

        let piece = self.board[mv.from].ok_or(Rejection::EmptySource(mv.from))?;
        if piece.player() != self.current {
            return Err(Rejection::NotOwned(piece, self.current));
        }
        if !rules::is_pseudo_legal(&self.board, mv.from, mv.to) {
            return Err(Rejection::Geometry(piece, mv.from, mv.to));
        }
        if evaluator::leaves_in_check(&self.board, mv) {
            return Err(Rejection::SelfCheck(self.current));
        }

        Ok(())
    }

    fn advance(&mut self) {
        self.current = self.current.opponent();
        self.state = self.evaluate();

        if self.state.is_finished() {
            info!("game over after {} moves: {}", self.history.len(), self.state);
        }
    }

    /// Outcome for the current player to move, decided by whether they have any legal move.
    fn evaluate(&self) -> GameState {
        if evaluator::has_any_legal_move(&self.board, self.current) {
            return GameState::Unfinished;
        }

        let winner = GameState::won_by(self.current.opponent());
        match self.stalemate {
            StalemateRule::Loss => winner,
            StalemateRule::Draw if self.is_in_check(self.current) => winner,
            StalemateRule::Draw => GameState::Drawn,
        }
    }

    pub fn game_state(&self) -> GameState {
        self.state
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn stalemate_rule(&self) -> StalemateRule {
        self.stalemate
    }

    /// Read-only view of the position for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_in_check(&self, player: Player) -> bool {
        evaluator::is_in_check(&self.board, player)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.state.is_finished() {
            return Vec::new();
        }
        evaluator::legal_moves(&self.board, self.current).collect()
    }

    pub fn history(&self) -> &[(Move, Option<Piece>)] {
        &self.history
    }

    pub fn captured(&self) -> impl Iterator<Item = Piece> + '_ {
        self.history.iter().filter_map(|&(_, capture)| capture)
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display {
        struct Impl<'a>(&'a Game, DisplayFormat);
        return Impl(self, format);

        impl Impl<'_> {
            fn format_row(&self, f: &mut Formatter<'_>, rank: i8) -> std::fmt::Result {
                let &Self(game, format) = self;
                write!(f, "{:>2}", rank + 1)?;

                let last = game.history.last().map(|&(mv, _)| mv);
                for file in 0..Board::WIDTH {
                    let Some(square) = Square::from_xy(file, rank) else {
                        continue;
                    };
                    if let Some(piece) = game.board[square] {
                        let piece = piece.display(format.with_concise(true));
                        if format.effects && last.is_some_and(|mv| mv.to == square) {
                            write!(f, " \x1B[7m{piece}\x1B[0m")?;
                        } else {
                            write!(f, " {piece}")?;
                        }
                    } else if last.is_some_and(|mv| mv.from == square) {
                        write!(f, " ╶╴")?;
                    } else {
                        write!(f, " ··")?;
                    }
                }

                Ok(())
            }

            fn format_captured(&self, f: &mut Formatter<'_>, row: usize) -> std::fmt::Result {
                let &Self(game, format) = self;
                if game.captured().next().is_none() {
                    return Ok(());
                }

                let player = match row {
                    0 => Player::Red,
                    1 => Player::Blue,
                    _ => return Ok(()),
                };

                write!(f, " │ ")?;
                for piece in game.captured().filter(|piece| piece.player() == player) {
                    write!(f, " {}", piece.display(format.with_concise(true)))?;
                }

                Ok(())
            }
        }

        impl Display for Impl<'_> {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let &Self(game, format) = self;
                let (fen, to_move) = game.fen();

                if format.concise {
                    return write!(f, "{fen} {to_move} {}", game.state);
                }

                writeln!(f, "{fen}")?;
                for rank in (0..Board::HEIGHT).rev() {
                    self.format_row(f, rank)?;
                    self.format_captured(f, (Board::HEIGHT - rank - 1) as usize)?;
                    writeln!(f)?;
                }

                write!(f, "  ")?;
                for char in 'a'..='i' {
                    write!(f, "  {char}")?;
                }
                writeln!(f)?;

                if let Some(&(mv, _)) = game.history.last() {
                    write!(f, "({}) {mv} - ", game.history.len())?;
                }

                if game.state.is_finished() {
                    write!(f, "{}", game.state.display(format))?;
                } else {
                    let check = game.is_in_check(to_move);
                    let general = Piece::new(PieceKind::General, to_move).display(format);
                    write!(f, "{general} {} - ", if check { "in check" } else { "to play" })?;
                    write!(f, "{} legal moves", game.legal_moves().len())?;
                }

                writeln!(f)
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::opening()
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn blue_opens_and_turns_alternate() {
        let mut game = Game::opening();
        assert_eq!(game.current_player(), Player::Blue);
        assert!(game.make_move("e7", "e6"));
        assert_eq!(game.current_player(), Player::Red);
        assert!(game.make_move("e4", "e5"));
        assert_eq!(game.current_player(), Player::Blue);
        assert_eq!(game.game_state(), GameState::Unfinished);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut game = Game::opening();
        let before = game.board().clone();

        for (from, to) in [
            ("e5", "e6"),  // empty source
            ("e4", "e5"),  // red piece on blue's turn
            ("e7", "e8"),  // soldier moving backward
            ("z1", "a1"),  // malformed square
            ("e7", "e11"), // off the board
        ] {
            assert!(!game.make_move(from, to), "{from} -> {to}");
            assert_eq!(game.current_player(), Player::Blue);
            assert_eq!(game.board(), &before);
        }
    }

    #[test]
    fn self_check_is_rejected() {
        // blue guard on e9 is the only thing between the red chariot and the blue general
        let mut game = Game::from_fen("4K4/4A4/9/9/4r4/9/9/9/9/3k5", Player::Blue).unwrap();
        assert!(!game.make_move("e9", "d9"));
        assert!(!game.make_move("e9", "f9"));
        assert_eq!(game.current_player(), Player::Blue);
        assert!(game.make_move("e9", "e8"));
    }

    #[test]
    fn passing_needs_a_quiet_position() {
        let mut game = Game::opening();
        assert!(!game.make_move("e5", "e5"));
        assert!(!game.make_move("e4", "e4"));
        assert_eq!(game.current_player(), Player::Blue);
        assert!(game.make_move("e7", "e7"));
        assert_eq!(game.current_player(), Player::Red);
        assert!(game.history().is_empty());

        let mut game = Game::from_fen("4K4/9/9/9/4r4/9/9/9/9/3k5", Player::Blue).unwrap();
        assert!(game.is_in_check(Player::Blue));
        assert!(!game.pass());
        assert_eq!(game.current_player(), Player::Blue);
    }

    #[test]
    fn capture_is_recorded() {
        let mut game = Game::from_fen("4K4/9/9/9/9/9/9/9/4k4/R1p6", Player::Blue).unwrap();
        assert_eq!(game.captured().count(), 0);

        let mv = Move::new(sq("a1"), sq("c1"));
        let soldier = Piece::new(PieceKind::Soldier, Player::Red);
        assert!(game.play(mv));
        assert_eq!(game.captured().collect::<Vec<_>>(), [soldier]);
        assert_eq!(game.history(), [(mv, Some(soldier))]);
    }

    #[test]
    fn checkmate_ends_the_game() {
        let mut game = Game::from_fen("4K4/9/9/9/9/9/9/9/R8/3k5", Player::Blue).unwrap();
        assert!(game.make_move("a2", "a1"));
        assert_eq!(game.game_state(), GameState::Unfinished);

        let mut game = Game::from_fen("4K4/9/9/9/9/9/9/9/R8/3k4R", Player::Red).unwrap();
        assert_eq!(game.game_state(), GameState::BlueWon);
        assert!(!game.make_move("d1", "d2"));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn stalemate_rule_decides_between_loss_and_draw() {
        // red general on d1 is boxed in by chariots on the second rank and the e file but not attacked
        let fen = "4K4/9/9/9/9/4R4/9/9/R8/3k5";
        let game = Game::from_fen(fen, Player::Red).unwrap();
        assert!(!game.is_in_check(Player::Red));
        assert_eq!(game.game_state(), GameState::BlueWon);

        let game = Game::from_fen(fen, Player::Red)
            .unwrap()
            .with_stalemate_rule(StalemateRule::Draw);
        assert_eq!(game.game_state(), GameState::Drawn);
        assert_eq!(game.stalemate_rule(), StalemateRule::Draw);
    }

    #[test]
    fn positions_without_generals_are_refused() {
        assert_eq!(
            Game::from_fen("4K4/9/9/9/9/9/9/9/9/9", Player::Blue).unwrap_err(),
            FenError::MissingGeneral(Player::Red)
        );
    }

    #[test]
    fn waiting_side_in_check_is_refused() {
        // blue chariot on d5 already attacks the red general on d1
        let fen = "4K4/9/9/9/9/3R5/p8/9/9/3k5";
        assert_eq!(
            Game::from_fen(fen, Player::Blue).unwrap_err(),
            FenError::WaitingSideInCheck(Player::Red)
        );

        let mut game = Game::from_fen(fen, Player::Red).unwrap();
        assert!(game.is_in_check(Player::Red));
        assert!(!game.make_move("a4", "a5"));
        assert!(game.make_move("d1", "e2"));
        assert!(game.board().find_general(Player::Red).is_some());
    }

    #[test]
    fn concise_display_is_one_line() {
        let game = Game::opening();
        assert_eq!(game.to_string(), format!("{} blue UNFINISHED", Board::OPENING_FEN));

        let pretty = game.display(DisplayFormat::pretty().with_effects(false)).to_string();
        assert!(pretty.contains("to play - "));
        assert_eq!(pretty.lines().count(), 13);
    }

    #[test]
    fn stalemate_rule_parses() {
        assert_eq!("Draw".parse::<StalemateRule>(), Ok(StalemateRule::Draw));
        assert!("resign".parse::<StalemateRule>().is_err());
    }
}
