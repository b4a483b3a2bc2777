//! Check detection and legal move enumeration.
//!
//! Moves are tried on a cloned scratch board which is dropped afterwards; the board passed in
//! is never mutated.

use crate::board::Board;
use crate::piece::Player;
use crate::rules;
use crate::square::{Move, Square};

/// Whether some piece of the opponent could move onto `player`'s general.
///
/// A board without that general is never in check.
pub fn is_in_check(board: &Board, player: Player) -> bool {
    let Some(general) = board.find_general(player) else {
        return false;
    };
    board
        .all_pieces_of(player.opponent())
        .any(|(from, _)| rules::attacks(board, from, general))
}

/// Whether playing `mv` would leave the mover's own general in check.
pub fn leaves_in_check(board: &Board, mv: Move) -> bool {
    let Some(piece) = board[mv.from] else {
        return false;
    };
    let mut scratch = board.clone();
    scratch.apply(mv);
    is_in_check(&scratch, piece.player())
}

pub fn is_legal(board: &Board, mv: Move) -> bool {
    rules::is_pseudo_legal(board, mv.from, mv.to) && !leaves_in_check(board, mv)
}

/// Every legal move of `player`, sources and destinations both in rank-major, file-minor order.
pub fn legal_moves(board: &Board, player: Player) -> impl Iterator<Item = Move> + '_ {
    board
        .all_pieces_of(player)
        .flat_map(move |(from, _)| rules::destinations(board, from).map(move |to| Move::new(from, to)))
        .filter(move |&mv| !leaves_in_check(board, mv))
}

pub fn has_any_legal_move(board: &Board, player: Player) -> bool {
    legal_moves(board, player).next().is_some()
}

pub fn is_checkmate(board: &Board, player: Player) -> bool {
    is_in_check(board, player) && !has_any_legal_move(board, player)
}

/// Opposing pieces currently giving check to `player`.
pub fn checkers(board: &Board, player: Player) -> Vec<Square> {
    let Some(general) = board.find_general(player) else {
        return Vec::new();
    };
    board
        .all_pieces_of(player.opponent())
        .map(|(from, _)| from)
        .filter(|&from| rules::attacks(board, from, general))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    fn position(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn opening_is_quiet() {
        let board = Board::opening();
        assert!(!is_in_check(&board, Player::Blue));
        assert!(!is_in_check(&board, Player::Red));
        assert!(has_any_legal_move(&board, Player::Blue));
        assert!(has_any_legal_move(&board, Player::Red));
    }

    #[test]
    fn chariot_on_open_file_gives_check() {
        let board = position("3K5/9/9/9/9/9/9/9/4k4/4R4");
        assert!(is_in_check(&board, Player::Red));
        assert_eq!(checkers(&board, Player::Red), [sq("e1")]);
        assert!(!is_in_check(&board, Player::Blue));
    }

    #[test]
    fn missing_general_is_never_in_check() {
        let board = position("9/9/9/9/9/9/9/9/9/4R4");
        assert!(!is_in_check(&board, Player::Red));
        assert!(checkers(&board, Player::Red).is_empty());
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        // red guard on e2 shields the general on e1 from the chariot on e5
        let board = position("3K5/9/9/9/9/4R4/9/9/4a4/4k4");
        let sideways = Move::new(sq("e2"), sq("d2"));
        assert!(rules::is_pseudo_legal(&board, sideways.from, sideways.to));
        assert!(leaves_in_check(&board, sideways));
        assert!(!is_legal(&board, sideways));

        let guard: Vec<Move> = legal_moves(&board, Player::Red).filter(|mv| mv.from == sq("e2")).collect();
        assert_eq!(guard, [Move::new(sq("e2"), sq("e3"))]);
    }

    #[test]
    fn scratch_evaluation_leaves_board_untouched() {
        let board = Board::opening();
        let before = board.clone();
        let count = legal_moves(&board, Player::Blue).count();
        assert!(count > 0);
        assert_eq!(board, before);
    }

    #[test]
    fn cornered_general_is_checkmated() {
        // red general on d1, blue chariots on the first and second rank
        let board = position("4K4/9/9/9/9/9/9/9/R8/3k4R");
        assert!(is_in_check(&board, Player::Red));
        assert!(!has_any_legal_move(&board, Player::Red));
        assert!(is_checkmate(&board, Player::Red));
    }

    #[test]
    fn escape_square_prevents_checkmate() {
        let board = position("4K4/9/9/9/9/9/9/9/9/3k4R");
        assert!(is_in_check(&board, Player::Red));
        assert!(has_any_legal_move(&board, Player::Red));
        assert!(!is_checkmate(&board, Player::Red));
    }

    #[test]
    fn legal_moves_are_ordered_by_source_square() {
        let board = Board::opening();
        let first = legal_moves(&board, Player::Blue).next().unwrap();
        assert_eq!(first.from, sq("a7"));
    }
}
