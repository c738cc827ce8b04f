use std::path::PathBuf;

use crate::board::Pos;

/// Errors reported by `Board::make_move` and `Board::undo_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("position {pos} is outside the {size}x{size} board")]
    OutOfBounds { pos: Pos, size: usize },

    #[error("position {0} is already occupied")]
    Occupied(Pos),

    #[error("position {0} is empty, nothing to undo")]
    Empty(Pos),
}

/// Errors that can occur when parsing a text position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board must be at least {min}x{min}, got {size}")]
    TooSmall { size: usize, min: usize },

    #[error("board must be at most {max}x{max}, got {size}")]
    TooLarge { size: usize, max: usize },

    #[error("row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },

    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    BadCell { ch: char, row: usize, col: usize },

    #[error("impossible stone counts: {black} X vs {white} O")]
    BadCounts { black: usize, white: usize },
}

/// Errors raised when resolving a mode key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModeError {
    #[error("unknown mode: {0}")]
    Unknown(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
