//! Player abstraction shared by the computer and human sides.
//!
//! A player is handed the current position and answers with the position
//! after its move. The move it made (a board move, a resignation or an undo
//! request) is the returned state's `last_move`.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::GameState;

pub trait Player: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Change a named runtime option. Players without options reject all.
    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        Err(ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    fn take_turn(&mut self, game_state: &GameState) -> ChessResult<GameState>;
}
