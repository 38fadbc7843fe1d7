//! Error types for chess engine
//!
//! Provides custom error types for chess engine operations including
//! move parsing, move validation and position setup.

use thiserror::Error;

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Move is not in the legal set of the position it was applied to
    #[error("Invalid move: {mv} is not legal in this position")]
    InvalidMove { mv: String },

    /// Text is not coordinate notation
    #[error("Unparseable move: {text:?}")]
    ParseMove { text: String },

    /// FEN string could not be turned into a position
    #[error("Invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
