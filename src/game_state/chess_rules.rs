//! Canonical chess-rule constants.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmoves without a capture or pawn move after which a draw may be claimed.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;
