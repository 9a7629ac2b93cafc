//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and board
//! positions, for the FEN, move-text and notation code.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Position;

/// Convert algebraic notation (for example: "e4") to a board position.
#[inline]
pub fn algebraic_to_position(square: &str) -> ChessResult<Position> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidAlgebraic(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidAlgebraic(square.to_owned()));
    }

    Ok(Position::new((rank - b'1') as i8, (file - b'a') as i8))
}

/// Convert a board position to algebraic notation (for example: "e4").
#[inline]
pub fn position_to_algebraic(pos: Position) -> ChessResult<String> {
    if !pos.is_valid() {
        return Err(ChessError::InvalidAlgebraic(format!(
            "row {} col {}",
            pos.row, pos.col
        )));
    }
    Ok(pos.to_string())
}
