//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single recoverable error type of the crate. Parsing
//! (FEN, squares, move text), player input validation and option handling
//! return it. Broken preconditions inside the engine (moving from an empty
//! square, dispatching a generator on the wrong piece) are bugs and panic
//! instead.

use thiserror::Error;

/// Unified recoverable error type for the chess engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A FEN record (or its placement field) could not be parsed.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// An algebraic square such as `e4` could not be parsed or formatted.
    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraic(String),

    /// A requested move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// The side to move has no responses at all.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// A runtime option was unknown or its value did not parse.
    #[error("invalid option {name}={value}")]
    InvalidOption { name: String, value: String },

    /// A player was asked to move without any queued input.
    #[error("no move has been requested")]
    NoMoveRequested,
}

pub type ChessResult<T> = Result<T, ChessError>;

#[cfg(test)]
mod tests {
    use super::ChessError;

    #[test]
    fn display_includes_payload() {
        let err = ChessError::InvalidOption {
            name: "Depth".to_owned(),
            value: "deep".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid option Depth=deep");
        assert_eq!(
            ChessError::InvalidFen("8/8".to_owned()).to_string(),
            "invalid FEN: 8/8"
        );
    }
}
