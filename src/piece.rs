use crate::display_format::DisplayFormat;
use crate::error::ParseError;
use std::fmt::{Display, Formatter};
use std::num::NonZeroI8;
use std::str::FromStr;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(i8)]
pub enum PieceKind {
    General,
    Guard,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    Blue,
    Red,
}

/// A kind and its owner packed into one signed byte, positive for blue.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Piece {
    data: NonZeroI8,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Guard,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::General => "general",
            PieceKind::Guard => "guard",
            PieceKind::Elephant => "elephant",
            PieceKind::Horse => "horse",
            PieceKind::Chariot => "chariot",
            PieceKind::Cannon => "cannon",
            PieceKind::Soldier => "soldier",
        }
    }
}

impl Player {
    pub fn opponent(&self) -> Self {
        match self {
            Player::Blue => Player::Red,
            Player::Red => Player::Blue,
        }
    }

    /// Rank direction this player's soldiers advance in.
    pub fn forward(&self) -> i8 {
        match self {
            Player::Blue => -1,
            Player::Red => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Player::Blue => "blue",
            Player::Red => "red",
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Player {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.to_ascii_lowercase().as_str() {
            "blue" | "b" => Ok(Player::Blue),
            "red" | "r" => Ok(Player::Red),
            _ => Err(ParseError::Player(text.to_owned())),
        }
    }
}

impl Piece {
    pub fn new(kind: PieceKind, player: Player) -> Self {
        let data = NonZeroI8::new(kind as i8 + 1).unwrap();
        let data = if player == Player::Blue { data } else { -data };
        Self { data }
    }

    pub fn from_fen_char(value: char) -> Option<Self> {
        let kind = match value.to_ascii_lowercase() {
            'k' => PieceKind::General,
            'a' => PieceKind::Guard,
            'e' => PieceKind::Elephant,
            'h' => PieceKind::Horse,
            'r' => PieceKind::Chariot,
            'c' => PieceKind::Cannon,
            'p' => PieceKind::Soldier,
            _ => return None,
        };

        let player = if value.is_ascii_uppercase() { Player::Blue } else { Player::Red };
        Some(Self::new(kind, player))
    }

    pub fn player(&self) -> Player {
        if self.data.is_positive() { Player::Blue } else { Player::Red }
    }

    pub fn kind(&self) -> PieceKind {
        PieceKind::ALL[(self.data.get().unsigned_abs() - 1) as usize]
    }

    pub fn is(&self, kind: PieceKind) -> bool {
        self.kind() == kind
    }

    pub fn fen_char(&self) -> char {
        let result = match self.kind() {
            PieceKind::General => 'k',
            PieceKind::Guard => 'a',
            PieceKind::Elephant => 'e',
            PieceKind::Horse => 'h',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        };
        if self.player() == Player::Blue {
            result.to_ascii_uppercase()
        } else {
            result
        }
    }

    pub fn hanja_char(&self) -> char {
        match (self.player(), self.kind()) {
            (Player::Blue, PieceKind::General) => '楚',
            (Player::Blue, PieceKind::Elephant) => '象',
            (Player::Blue, PieceKind::Horse) => '馬',
            (Player::Blue, PieceKind::Chariot) => '車',
            (Player::Blue, PieceKind::Soldier) => '卒',
            (Player::Red, PieceKind::General) => '漢',
            (Player::Red, PieceKind::Elephant) => '相',
            (Player::Red, PieceKind::Horse) => '傌',
            (Player::Red, PieceKind::Chariot) => '俥',
            (Player::Red, PieceKind::Soldier) => '兵',
            (_, PieceKind::Guard) => '士',
            (_, PieceKind::Cannon) => '包',
        }
    }

    /// Two terminal columns wide in every format so board rows line up.
    pub fn display(self, format: DisplayFormat) -> impl Display {
        let s = if format.hanja {
            self.hanja_char().to_string()
        } else {
            let c = self.fen_char();
            format!("{c}{c}")
        };

        if !format.effects {
            return s;
        }

        match self.player() {
            Player::Blue => format!("\x1B[34m{s}\x1B[0m"),
            Player::Red => format!("\x1B[31m{s}\x1B[0m"),
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.player(), self.kind().name())
    }
}
