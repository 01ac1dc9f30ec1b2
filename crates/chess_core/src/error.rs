//! Error types for position setup and validation.

use thiserror::Error;

use crate::types::Color;

/// Errors produced while parsing a FEN string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 fields, found {0}")]
    MissingFields(usize),

    #[error("expected 8 ranks in board section, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 files")]
    FileCount { rank: usize },

    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),

    #[error("invalid side to move '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling character '{0}'")]
    InvalidCastling(char),

    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid move counter '{0}'")]
    InvalidCounter(String),
}

/// Structural problems that make a position unsearchable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: usize },

    #[error("pawn on back rank square {square}")]
    PawnOnBackRank { square: String },

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),

    /// A castling right is held but its king or rook has left home.
    #[error("castling right '{right}' without king and rook on their home squares")]
    CastlingRight { right: char },

    #[error("en-passant square {square} does not follow a double pawn push")]
    EnPassant { square: String },
}
