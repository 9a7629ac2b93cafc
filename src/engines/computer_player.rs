//! Computer player driven by the game-tree search.
//!
//! One `GameTree`, and with it one transposition table, lives for the whole
//! game so positions scored on earlier turns are reused.

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::Player;
use crate::game_state::chess_types::GameState;
use crate::game_state::game_state::TerminalStatus;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{EvaluatorWeights, StaticEvaluator};
use crate::search::game_tree::{GameTree, QuiescenceConfig, SearchConfig};

pub struct ComputerPlayer {
    name: String,
    tree: GameTree,
}

impl Default for ComputerPlayer {
    fn default() -> Self {
        Self::new("Computer", SearchConfig::default(), EvaluatorWeights::default())
    }
}

impl ComputerPlayer {
    pub fn new(name: impl Into<String>, config: SearchConfig, weights: EvaluatorWeights) -> Self {
        Self::with_tree(name, GameTree::new(config, StaticEvaluator::new(weights)))
    }

    pub fn with_tree(name: impl Into<String>, tree: GameTree) -> Self {
        Self {
            name: name.into(),
            tree,
        }
    }

    #[inline]
    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    fn set_weights(&mut self, update: impl FnOnce(&mut EvaluatorWeights)) {
        let mut weights = self.tree.evaluator().weights;
        update(&mut weights);
        self.tree.set_evaluator(StaticEvaluator::new(weights));
    }
}

fn invalid_option(name: &str, value: &str) -> ChessError {
    ChessError::InvalidOption {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> ChessResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| invalid_option(name, value))
}

fn parse_switch(name: &str, value: &str) -> ChessResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid_option(name, value)),
    }
}

impl Player for ComputerPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) {
        self.tree.clear_cache();
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if name.eq_ignore_ascii_case("Depth") {
            let depth: u8 = parse_value(name, value)?;
            if depth == 0 {
                return Err(invalid_option(name, value));
            }
            self.tree.config_mut().max_depth = depth;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Quiescence") {
            let config = self.tree.config_mut();
            config.quiescence = if parse_switch(name, value)? {
                Some(config.quiescence.unwrap_or_default())
            } else {
                None
            };
            return Ok(());
        }
        if name.eq_ignore_ascii_case("QuiescenceThreshold") {
            let threshold: i32 = parse_value(name, value)?;
            if threshold < 0 {
                return Err(invalid_option(name, value));
            }
            let config = self.tree.config_mut();
            config.quiescence = Some(QuiescenceConfig {
                threshold,
                ..config.quiescence.unwrap_or_default()
            });
            return Ok(());
        }
        if name.eq_ignore_ascii_case("ResignThreshold") {
            self.tree.config_mut().resignation_threshold = parse_value(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Mobility") {
            let mobility: i32 = parse_value(name, value)?;
            self.set_weights(|weights| weights.mobility = mobility);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Threats") {
            let threats: i32 = parse_value(name, value)?;
            self.set_weights(|weights| weights.threats = threats);
            return Ok(());
        }
        Err(invalid_option(name, value))
    }

    /// Searches for the side to move. With no response at all, a
    /// checkmated side resigns and a stalemated one reports
    /// `NoLegalMoves`.
    fn take_turn(&mut self, game_state: &GameState) -> ChessResult<GameState> {
        let color = game_state.whose_turn();
        if let Some(next) = self.tree.my_best_move(game_state, color) {
            return Ok(next);
        }
        match game_state.terminal_status() {
            Some(TerminalStatus::Checkmate) => {
                tracing::info!(?color, "checkmated, resigning");
                Ok(game_state.apply_move(&Move::resign(color)))
            }
            _ => Err(ChessError::NoLegalMoves),
        }
    }
}
