//! Fixed-depth alternating alpha-beta search.
//!
//! `my_alpha_beta` maximizes for the searching side and
//! `opponents_alpha_beta` minimizes for the other; they recurse into each
//! other one ply at a time. Values are from the searching side's point of
//! view, while the transposition table stores Light-positive values so that
//! entries survive a change of sides.
//!
//! Every node scores its responses up front (table hit, else static
//! evaluation), orders them best-first for the side to move and only searches
//! a response further when the stored value is shallower than this depth
//! needs. Values found inside the node's alpha-beta window are written back
//! with quality equal to the remaining depth; values outside it are bounds
//! and are never cached.

use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::moves::notation::NotationStyle;
use crate::search::board_scoring::{board_balance, balance_incremental, StaticEvaluator, CHECKMATE};
use crate::search::transposition_table::TranspositionTable;

const SCORE_BOUND: i32 = i32::MAX / 2;

/// Keep searching past the depth limit while values swing sharply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuiescenceConfig {
    /// A response whose value differs from its parent's by more than this is
    /// searched one ply further.
    pub threshold: i32,
    /// Absolute cap on plies searched beyond `max_depth`.
    pub max_extra_plies: u8,
}

impl Default for QuiescenceConfig {
    fn default() -> Self {
        Self {
            threshold: 150,
            max_extra_plies: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub quiescence: Option<QuiescenceConfig>,
    /// Resign when the best reachable value is below minus this.
    pub resignation_threshold: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            quiescence: None,
            resignation_threshold: 2500,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cache_hits: u64,
    pub cutoffs: u64,
    pub quiescence_nodes: u64,
}

/// A position waiting to be searched, with its preliminary value.
struct Scored {
    state: GameState,
    balance: i32,
    value: i32,
    quality: u8,
}

#[derive(Debug, Clone)]
pub struct GameTree {
    config: SearchConfig,
    evaluator: StaticEvaluator,
    cache: TranspositionTable,
    my_color: Color,
    stats: SearchStats,
    last_value: Option<i32>,
}

impl GameTree {
    pub fn new(config: SearchConfig, evaluator: StaticEvaluator) -> Self {
        Self::with_cache(config, evaluator, TranspositionTable::new())
    }

    pub fn with_cache(
        config: SearchConfig,
        evaluator: StaticEvaluator,
        cache: TranspositionTable,
    ) -> Self {
        Self {
            config,
            evaluator,
            cache,
            my_color: Color::Light,
            stats: SearchStats::default(),
            last_value: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    #[inline]
    pub fn evaluator(&self) -> &StaticEvaluator {
        &self.evaluator
    }

    /// Swap the evaluator. Cached values were produced by the old one, so
    /// the table is cleared.
    pub fn set_evaluator(&mut self, evaluator: StaticEvaluator) {
        self.evaluator = evaluator;
        self.cache.clear();
    }

    #[inline]
    pub fn cache(&self) -> &TranspositionTable {
        &self.cache
    }

    #[inline]
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Value of the move chosen by the last search, from the searcher's side.
    #[inline]
    pub fn last_value(&self) -> Option<i32> {
        self.last_value
    }

    /// Pick `my_color`'s response to `state`.
    ///
    /// Returns the resulting state, a resignation when every response scores
    /// below the resignation threshold, or `None` when there is no response
    /// at all.
    ///
    /// # Panics
    /// If it is not `my_color`'s turn in `state`.
    pub fn my_best_move(&mut self, state: &GameState, my_color: Color) -> Option<GameState> {
        assert_eq!(
            state.whose_turn(),
            my_color,
            "searching for {my_color:?} with {:?} to move",
            state.whose_turn()
        );
        self.my_color = my_color;
        self.stats = SearchStats::default();
        self.last_value = None;
        self.stats.nodes += 1;

        let root_balance = board_balance(state.board());
        let root_value = self.perspective(self.evaluator.evaluate_from_balance(state, root_balance));
        let mut candidates = self.expand(state, root_balance);
        candidates.sort_by(|a, b| b.value.cmp(&a.value));

        let mut alpha = -SCORE_BOUND;
        let mut best: Option<(usize, i32)> = None;
        for (idx, candidate) in candidates.iter().enumerate() {
            let value = self.child_value(root_value, candidate, 1, alpha, SCORE_BOUND);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((idx, value));
            }
            alpha = alpha.max(value);
            if value >= CHECKMATE {
                break;
            }
        }
        self.cache.age();

        let (idx, value) = best?;
        self.last_value = Some(value);

        if value < -self.config.resignation_threshold {
            tracing::info!(?my_color, value, "resigning");
            return Some(state.apply_move(&Move::resign(my_color)));
        }

        let chosen = candidates.swap_remove(idx).state;
        if let (Some(mv), Some(piece)) = (chosen.last_move(), chosen.moved_piece()) {
            let cache = self.cache.stats();
            tracing::debug!(
                chosen = %mv.notation(NotationStyle::Uci, piece),
                value,
                nodes = self.stats.nodes,
                cutoffs = self.stats.cutoffs,
                cache_hits = cache.hits,
                cache_collisions = cache.collisions,
                "search complete"
            );
        }
        Some(chosen)
    }

    /// Best value the side to move (the searcher) can reach from `state`,
    /// searched as a node `depth` plies below the root.
    pub fn my_alpha_beta(&mut self, state: &GameState, alpha: i32, beta: i32, depth: u8) -> i32 {
        self.my_color = state.whose_turn();
        let node = self.score_node(state);
        self.maximize(&node, alpha, beta, depth)
    }

    /// Value the opponent (to move in `state`) can hold the searcher to.
    pub fn opponents_alpha_beta(
        &mut self,
        state: &GameState,
        alpha: i32,
        beta: i32,
        depth: u8,
    ) -> i32 {
        self.my_color = state.whose_turn().opposite();
        let node = self.score_node(state);
        self.minimize(&node, alpha, beta, depth)
    }

    fn maximize(&mut self, node: &Scored, mut alpha: i32, beta: i32, depth: u8) -> i32 {
        self.stats.nodes += 1;
        let alpha_in = alpha;
        let mut children = self.expand(&node.state, node.balance);
        if children.is_empty() {
            return self.no_response_value(&node.state);
        }
        children.sort_by(|a, b| b.value.cmp(&a.value));

        let mut best = -SCORE_BOUND;
        for child in &children {
            let value = self.child_value(node.value, child, depth + 1, alpha, beta);
            best = best.max(value);
            if best > beta {
                self.stats.cutoffs += 1;
                break;
            }
            alpha = alpha.max(best);
        }
        if (alpha_in..=beta).contains(&best) {
            self.store(&node.state, best, depth);
        }
        best
    }

    fn minimize(&mut self, node: &Scored, alpha: i32, mut beta: i32, depth: u8) -> i32 {
        self.stats.nodes += 1;
        let beta_in = beta;
        let mut children = self.expand(&node.state, node.balance);
        if children.is_empty() {
            return self.no_response_value(&node.state);
        }
        children.sort_by_key(|child| child.value);

        let mut best = SCORE_BOUND;
        for child in &children {
            let value = self.child_value(node.value, child, depth + 1, alpha, beta);
            best = best.min(value);
            if best < alpha {
                self.stats.cutoffs += 1;
                break;
            }
            beta = beta.min(best);
        }
        if (alpha..=beta_in).contains(&best) {
            self.store(&node.state, best, depth);
        }
        best
    }

    /// Value of `child`, a response `child_depth` plies below the root:
    /// its preliminary value when that is already deep enough, otherwise a
    /// search one ply further.
    fn child_value(
        &mut self,
        parent_value: i32,
        child: &Scored,
        child_depth: u8,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        if !self.should_expand(parent_value, child, child_depth) {
            return child.value;
        }
        if child_depth >= self.config.max_depth {
            self.stats.quiescence_nodes += 1;
        }
        if child.state.whose_turn() == self.my_color {
            self.maximize(child, alpha, beta, child_depth)
        } else {
            self.minimize(child, alpha, beta, child_depth)
        }
    }

    fn should_expand(&self, parent_value: i32, child: &Scored, child_depth: u8) -> bool {
        if child.value.abs() >= CHECKMATE {
            return false;
        }
        if child_depth < self.config.max_depth {
            return child.quality < self.quality(child_depth);
        }
        match self.config.quiescence {
            Some(q) => {
                child_depth < self.config.max_depth.saturating_add(q.max_extra_plies)
                    && (child.value - parent_value).abs() > q.threshold
            }
            None => false,
        }
    }

    /// Every response to `state` with its preliminary value.
    fn expand(&mut self, state: &GameState, balance: i32) -> Vec<Scored> {
        let responses = state.generate_responses();
        let mut out = Vec::with_capacity(responses.len());
        for child in responses {
            let child_balance = balance_incremental(state, balance, &child);
            out.push(self.score_with_balance(child, child_balance));
        }
        out
    }

    fn score_node(&mut self, state: &GameState) -> Scored {
        let balance = board_balance(state.board());
        self.score_with_balance(state.clone(), balance)
    }

    fn score_with_balance(&mut self, state: GameState, balance: i32) -> Scored {
        let (value, quality) = match self.cache.check(&state) {
            Some(cached) => {
                self.stats.cache_hits += 1;
                (self.perspective(cached.value), cached.quality)
            }
            None => {
                let score = self.evaluator.evaluate_from_balance(&state, balance);
                self.cache.update(&state, score, 0);
                (self.perspective(score), 0)
            }
        };
        Scored {
            state,
            balance,
            value,
            quality,
        }
    }

    /// Side to move has nothing to play: mated when in check, else drawn.
    fn no_response_value(&self, state: &GameState) -> i32 {
        if !state.in_check() {
            return 0;
        }
        if state.whose_turn() == self.my_color {
            -CHECKMATE
        } else {
            CHECKMATE
        }
    }

    fn store(&mut self, state: &GameState, value: i32, depth: u8) {
        let absolute = self.perspective(value);
        self.cache.update(state, absolute, self.quality(depth));
    }

    /// Remaining search depth below a node `depth` plies from the root.
    #[inline]
    fn quality(&self, depth: u8) -> u8 {
        self.config.max_depth.saturating_sub(depth)
    }

    /// Converts between Light-positive and searcher-positive values.
    #[inline]
    fn perspective(&self, value: i32) -> i32 {
        value * self.my_color.sign()
    }
}
