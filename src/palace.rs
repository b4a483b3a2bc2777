//! Static geometry of the two palaces.
//!
//! Each palace is the 3x3 block on files d-f, ranks 1-3 for red and 8-10 for blue. Two diagonal
//! lines cross each palace through its center, joining every corner to the center and to the
//! opposite corner. Only those lines allow diagonal movement for generals, guards, chariots,
//! cannons and soldiers.

use crate::piece::Player;
use crate::square::Square;

const FILES: std::ops::RangeInclusive<i8> = 3..=5;

fn bottom_rank(player: Player) -> i8 {
    match player {
        Player::Red => 0,
        Player::Blue => 7,
    }
}

/// The palace `square` lies in, if any.
pub fn owner(square: Square) -> Option<Player> {
    if !FILES.contains(&square.file()) {
        return None;
    }
    [Player::Red, Player::Blue]
        .into_iter()
        .find(|&player| (bottom_rank(player)..bottom_rank(player) + 3).contains(&square.rank()))
}

pub fn contains(player: Player, square: Square) -> bool {
    owner(square) == Some(player)
}

pub fn center(player: Player) -> Square {
    Square::from_xy(4, bottom_rank(player) + 1).unwrap()
}

pub fn squares(player: Player) -> impl Iterator<Item = Square> {
    Square::all().filter(move |&square| contains(player, square))
}

/// Whether `square` sits on a palace diagonal line, that is a corner or the center.
pub fn on_diagonal(square: Square) -> bool {
    let Some(player) = owner(square) else {
        return false;
    };
    let center = center(player);
    (square.file() - center.file()).abs() == (square.rank() - center.rank()).abs()
}

/// Squares strictly between `from` and `to` when both lie on the same palace diagonal line.
///
/// Returns `None` for any pair that is not diagonally connected inside one palace, including a
/// pair of adjacent corners.
pub fn diagonal_path(from: Square, to: Square) -> Option<Vec<Square>> {
    let palace = owner(from)?;
    if owner(to) != Some(palace) || !on_diagonal(from) || !on_diagonal(to) {
        return None;
    }

    let dx = to.file() - from.file();
    let dy = to.rank() - from.rank();
    if dx == 0 || dx.abs() != dy.abs() {
        return None;
    }

    let path = (1..dx.abs())
        .filter_map(|i| from.shift(dx.signum() * i, dy.signum() * i))
        .collect();
    Some(path)
}

/// A single diagonal step along a palace line, as taken by generals, guards and soldiers.
pub fn is_diagonal_step(from: Square, to: Square) -> bool {
    diagonal_path(from, to).is_some_and(|path| path.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn palaces_hold_nine_squares_each() {
        let red: Vec<String> = squares(Player::Red).map(|s| s.to_string()).collect();
        assert_eq!(red, ["d1", "e1", "f1", "d2", "e2", "f2", "d3", "e3", "f3"]);
        assert_eq!(squares(Player::Blue).count(), 9);
        assert_eq!(owner(sq("f10")), Some(Player::Blue));
        assert_eq!(owner(sq("f7")), None);
        assert_eq!(owner(sq("c2")), None);
    }

    #[test]
    fn centers_sit_in_the_middle() {
        assert_eq!(center(Player::Red), sq("e2"));
        assert_eq!(center(Player::Blue), sq("e9"));
    }

    #[test]
    fn diagonal_lines_run_through_center_only() {
        assert!(on_diagonal(sq("d1")));
        assert!(on_diagonal(sq("e9")));
        assert!(!on_diagonal(sq("e1")));
        assert!(!on_diagonal(sq("d9")));

        assert_eq!(diagonal_path(sq("d1"), sq("f3")), Some(vec![sq("e2")]));
        assert_eq!(diagonal_path(sq("f8"), sq("e9")), Some(vec![]));
        assert_eq!(diagonal_path(sq("d1"), sq("f1")), None);
        assert_eq!(diagonal_path(sq("d3"), sq("d8")), None);
        assert_eq!(diagonal_path(sq("e1"), sq("f2")), None);
    }

    #[test]
    fn diagonal_steps_touch_the_center() {
        assert!(is_diagonal_step(sq("d3"), sq("e2")));
        assert!(is_diagonal_step(sq("e9"), sq("d10")));
        assert!(!is_diagonal_step(sq("d1"), sq("f3")));
        assert!(!is_diagonal_step(sq("e2"), sq("f1").shift(1, 1).unwrap()));
    }
}
