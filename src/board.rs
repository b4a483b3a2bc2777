use crate::error::FenError;
use crate::piece::{Piece, PieceKind, Player};
use crate::square::{Move, Square};
use std::fmt::Formatter;
use std::ops::{Index, IndexMut};

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    pieces: Vec<Option<Piece>>,
}

impl Board {
    pub const WIDTH: i8 = 9;
    pub const HEIGHT: i8 = 10;
    pub const SIZE: usize = (Self::WIDTH as usize) * (Self::HEIGHT as usize);

    pub const OPENING_FEN: &'static str =
        "REHA1AEHR/4K4/1C5C1/P1P1P1P1P/9/9/p1p1p1p1p/1c5c1/4k4/reha1aehr";

    pub fn empty() -> Self {
        Self { pieces: vec![None; Self::SIZE] }
    }

    pub fn opening() -> Self {
        Self::from_fen(Self::OPENING_FEN).unwrap()
    }

    /// Parses ranks from 10 down to 1, uppercase letters for blue and digits for empty runs.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fen = fen.split_whitespace().next().unwrap_or("");
        let rows: Vec<&str> = fen.split('/').collect();
        if rows.len() != Self::HEIGHT as usize {
            return Err(FenError::RankCount(rows.len()));
        }

        let mut board = Self::empty();
        for (row, rank) in rows.into_iter().zip((0..Self::HEIGHT).rev()) {
            let mut file = 0usize;
            for current in row.chars() {
                match current {
                    '1'..='9' => file += current as usize - '0' as usize,
                    _ => {
                        let piece = Piece::from_fen_char(current).ok_or(FenError::UnknownPiece(current))?;
                        if let Some(square) = Square::from_xy(file as i8, rank) {
                            board[square] = Some(piece);
                        }
                        file += 1;
                    }
                }

                if file > Self::WIDTH as usize {
                    break;
                }
            }

            if file != Self::WIDTH as usize {
                return Err(FenError::RankWidth {
                    rank: rank as usize + 1,
                    width: file,
                });
            }
        }

        Ok(board)
    }

    pub fn fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..Self::HEIGHT).rev() {
            let mut empty = 0;
            for file in 0..Self::WIDTH {
                match Square::from_xy(file, rank).and_then(|square| self.get(square)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self[square]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self[square] = piece;
    }

    /// Every occupied square in rank-major, file-minor order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| Some((square, self[square]?)))
    }

    pub fn all_pieces_of(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.player() == player)
    }

    pub fn find_general(&self, player: Player) -> Option<Square> {
        self.all_pieces_of(player)
            .find(|(_, piece)| piece.is(PieceKind::General))
            .map(|(square, _)| square)
    }

    /// Moves whatever stands on `mv.from` without any legality check, returning the capture.
    pub fn apply(&mut self, mv: Move) -> Option<Piece> {
        let piece = self[mv.from].take();
        std::mem::replace(&mut self[mv.to], piece)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::opening()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.pieces[index.index()]
    }
}

impl IndexMut<Square> for Board {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.pieces[index.index()]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for rank in (0..Self::HEIGHT).rev() {
            write!(f, "{:>2} ", rank + 1)?;
            for file in 0..Self::WIDTH {
                match Square::from_xy(file, rank).and_then(|square| self.get(square)) {
                    Some(piece) => write!(f, " {}", piece.fen_char())?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for char in 'a'..='i' {
            write!(f, " {char}")?;
        }
        writeln!(f)
    }
}
