//! Geometric move legality for every piece kind.
//!
//! Everything here looks at occupancy only: whether a move exposes the mover's own general is
//! decided by [`crate::evaluator`].

use crate::board::Board;
use crate::palace;
use crate::piece::{PieceKind, Player};
use crate::square::Square;

/// Whether the piece on `from` may move to `to` by its own movement rules.
///
/// An empty source, a null move or a destination held by a friendly piece is never legal.
pub fn is_pseudo_legal(board: &Board, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = board[from] else {
        return false;
    };
    if board[to].is_some_and(|target| target.player() == piece.player()) {
        return false;
    }

    let dx = to.file() - from.file();
    let dy = to.rank() - from.rank();

    match piece.kind() {
        PieceKind::General | PieceKind::Guard => palace_step(piece.player(), from, to, dx, dy),
        PieceKind::Soldier => soldier(piece.player(), from, to, dx, dy),
        PieceKind::Horse => horse(board, from, dx, dy),
        PieceKind::Elephant => elephant(board, from, dx, dy),
        PieceKind::Chariot => line(from, to).is_some_and(|path| path.iter().all(|&s| board[s].is_none())),
        PieceKind::Cannon => cannon(board, from, to),
    }
}

/// Pseudo-legal destinations of the piece on `from`, in rank-major, file-minor order.
pub fn destinations(board: &Board, from: Square) -> impl Iterator<Item = Square> + '_ {
    Square::all().filter(move |&to| is_pseudo_legal(board, from, to))
}

fn palace_step(player: Player, from: Square, to: Square, dx: i8, dy: i8) -> bool {
    if !palace::contains(player, to) || dx.abs() > 1 || dy.abs() > 1 {
        return false;
    }
    dx == 0 || dy == 0 || palace::is_diagonal_step(from, to)
}

fn soldier(player: Player, from: Square, to: Square, dx: i8, dy: i8) -> bool {
    let forward = player.forward();
    match (dx.abs(), dy) {
        (0, dy) => dy == forward,
        (1, 0) => true,
        (1, dy) if dy == forward => {
            palace::owner(from) == Some(player.opponent()) && palace::is_diagonal_step(from, to)
        }
        _ => false,
    }
}

/// One orthogonal step, which must be empty, then one diagonal step outward.
fn horse(board: &Board, from: Square, dx: i8, dy: i8) -> bool {
    let leg = match (dx.abs(), dy.abs()) {
        (1, 2) => from.shift(0, dy.signum()),
        (2, 1) => from.shift(dx.signum(), 0),
        _ => return false,
    };
    leg.is_some_and(|leg| board[leg].is_none())
}

/// One orthogonal step then two diagonal steps outward, both intermediate squares empty.
fn elephant(board: &Board, from: Square, dx: i8, dy: i8) -> bool {
    let (sx, sy) = (dx.signum(), dy.signum());
    let (first, second) = match (dx.abs(), dy.abs()) {
        (2, 3) => (from.shift(0, sy), from.shift(sx, 2 * sy)),
        (3, 2) => (from.shift(sx, 0), from.shift(2 * sx, sy)),
        _ => return false,
    };
    [first, second]
        .into_iter()
        .all(|square| square.is_some_and(|square| board[square].is_none()))
}

fn cannon(board: &Board, from: Square, to: Square) -> bool {
    if board[to].is_some_and(|target| target.is(PieceKind::Cannon)) {
        return false;
    }
    let Some(path) = line(from, to) else {
        return false;
    };

    let mut screens = path.iter().filter_map(|&square| board[square]);
    match (screens.next(), screens.next()) {
        (Some(screen), None) => !screen.is(PieceKind::Cannon),
        _ => false,
    }
}

/// Squares strictly between `from` and `to` along a file, a rank or a palace diagonal line.
fn line(from: Square, to: Square) -> Option<Vec<Square>> {
    let dx = to.file() - from.file();
    let dy = to.rank() - from.rank();
    if dx != 0 && dy != 0 {
        return palace::diagonal_path(from, to);
    }

    let steps = dx.abs().max(dy.abs());
    let path = (1..steps)
        .filter_map(|i| from.shift(dx.signum() * i, dy.signum() * i))
        .collect();
    Some(path)
}

/// Whether the piece on `from` threatens `target`.
pub fn attacks(board: &Board, from: Square, target: Square) -> bool {
    is_pseudo_legal(board, from, target)
}
