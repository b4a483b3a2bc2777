use crate::board::Board;
use crate::error::ParseError;
use std::fmt::Formatter;
use std::str::FromStr;

/// A cell of the 9x10 board, `file` counted from `a` and `rank` from `1`, both zero based.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Square {
    file: i8,
    rank: i8,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Square {
    pub fn from_xy(file: i8, rank: i8) -> Option<Self> {
        if !(0..Board::WIDTH).contains(&file) || !(0..Board::HEIGHT).contains(&rank) {
            return None;
        }
        Some(Self { file, rank })
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= Board::SIZE {
            return None;
        }
        let index = index as i8;
        Self::from_xy(index % Board::WIDTH, index / Board::WIDTH)
    }

    /// Every square in rank-major, file-minor order.
    pub fn all() -> impl Iterator<Item = Square> + Clone {
        (0..Board::SIZE).filter_map(Self::from_index)
    }

    pub fn shift(&self, file: i8, rank: i8) -> Option<Self> {
        Self::from_xy(self.file + file, self.rank + rank)
    }

    pub fn index(&self) -> usize {
        (self.file + self.rank * Board::WIDTH) as usize
    }

    pub fn file(&self) -> i8 {
        self.file
    }

    pub fn rank(&self) -> i8 {
        self.rank
    }

    /// Consumes one square from the front of `text`, returning it with the remainder.
    fn split_prefix(text: &str) -> Option<(Self, &str)> {
        let file = match text.chars().next()?.to_ascii_lowercase() {
            letter @ 'a'..='i' => (letter as u8 - b'a') as i8,
            _ => return None,
        };

        let digits = text[1..].bytes().take_while(u8::is_ascii_digit).count().min(2);
        let (number, rest) = text[1..].split_at(digits);
        if number.starts_with('0') {
            return None;
        }

        let rank: i8 = number.parse().ok()?;
        if let Some(square) = Self::from_xy(file, rank - 1) {
            return Some((square, rest));
        }

        // "a10" style lookahead may have swallowed the first digit of the next token
        let (number, rest) = text[1..].split_at(1);
        let rank: i8 = number.parse().ok()?;
        Some((Self::from_xy(file, rank - 1)?, rest))
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match Self::split_prefix(text) {
            Some((square, "")) => Ok(square),
            _ => Err(ParseError::Square(text.to_owned())),
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file as u8) as char, self.rank + 1)
    }
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let error = || ParseError::Move(text.to_owned());
        let (from, rest) = Square::split_prefix(text.trim()).ok_or_else(error)?;
        let rest = rest.trim_start_matches(|c: char| c == '-' || c.is_whitespace());
        let to = rest.parse().map_err(|_| error())?;
        Ok(Self { from, to })
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
