pub mod board;
pub mod display_format;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod palace;
pub mod piece;
pub mod rules;
pub mod square;
