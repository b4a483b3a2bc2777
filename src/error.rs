use crate::piece::Player;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("'{0}' is not a square, expected a file a-i followed by a rank 1-10")]
    Square(String),

    #[error("'{0}' is not a move, expected two squares such as e7e6")]
    Move(String),

    #[error("'{0}' is not a player, expected blue or red")]
    Player(String),

    #[error("'{0}' is not a stalemate rule, expected loss or draw")]
    StalemateRule(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 10 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} spans {width} files instead of 9")]
    RankWidth { rank: usize, width: usize },

    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),

    #[error("{0} has no general on the board")]
    MissingGeneral(Player),

    #[error("{0} is in check although it is not their turn")]
    WaitingSideInCheck(Player),
}
