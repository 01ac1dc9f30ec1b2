//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Two-sided form rather than negamax: scores stay in White's frame at
//! every node and the side to optimise alternates via [`Side`]. Both sides
//! run the same loop body; only the fold and the bound they tighten differ.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use chess_core::Color;

use crate::{
    config::SearchConfig,
    error::{ConfigError, SearchError},
    eval::{Evaluate, MaterialEvaluator, Score, MATERIAL_LIMIT},
    rules::RulesEngine,
};

/// Starting best value for the minimizing side. Outside any material score.
pub const MAX_SENTINEL: Score = 99_999;
/// Starting best value for the maximizing side.
pub const MIN_SENTINEL: Score = -99_999;
/// Half-width of the window every root child is searched with.
pub const WINDOW: Score = 100_000;

const _: () = assert!(MATERIAL_LIMIT < MAX_SENTINEL);

/// Which way the player at a node pushes the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Maximizing,
    Minimizing,
}

impl Side {
    /// White maximizes, Black minimizes.
    pub fn for_color(color: Color) -> Self {
        match color {
            Color::White => Side::Maximizing,
            Color::Black => Side::Minimizing,
        }
    }

    pub fn from_maximizing(maximizing: bool) -> Self {
        if maximizing {
            Side::Maximizing
        } else {
            Side::Minimizing
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Side::Maximizing => Side::Minimizing,
            Side::Minimizing => Side::Maximizing,
        }
    }

    /// Sentinel a node starts from before any child is seen.
    pub fn worst(self) -> Score {
        match self {
            Side::Maximizing => MIN_SENTINEL,
            Side::Minimizing => MAX_SENTINEL,
        }
    }

    /// `a` is strictly better than `b` for this side.
    pub fn prefers(self, a: Score, b: Score) -> bool {
        match self {
            Side::Maximizing => a > b,
            Side::Minimizing => a < b,
        }
    }

    pub fn better(self, a: Score, b: Score) -> Score {
        match self {
            Side::Maximizing => a.max(b),
            Side::Minimizing => a.min(b),
        }
    }

    /// Raise alpha (maximizing) or lower beta (minimizing) to `best`.
    fn tighten(self, alpha: &mut Score, beta: &mut Score, best: Score) {
        match self {
            Side::Maximizing => *alpha = (*alpha).max(best),
            Side::Minimizing => *beta = (*beta).min(best),
        }
    }
}

/// Everything a root search found out, not just the move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport<M> {
    /// `None` only when the root has no legal moves.
    pub best_move: Option<M>,
    /// Score of `best_move` after the full-depth search below it.
    pub score: Option<Score>,
    /// Every root move with its score, in generator order.
    pub root_scores: Vec<(M, Score)>,
    /// Requested depth in plies.
    pub depth: u8,
    /// Nodes visited, the root itself excluded.
    pub nodes: u64,
    /// Alpha-beta cutoffs taken below the root.
    pub cutoffs: u64,
    /// No root move beat the sentinel and the move was drawn at random.
    pub fallback: bool,
}

/// Owns the evaluator, settings and fallback RNG for repeated searches.
#[derive(Debug, Clone)]
pub struct Searcher<E = MaterialEvaluator> {
    evaluator: E,
    config: SearchConfig,
    rng: StdRng,
    nodes: u64,
    cutoffs: u64,
}

impl Searcher<MaterialEvaluator> {
    pub fn new() -> Self {
        let config = SearchConfig::default();
        Self::build(MaterialEvaluator::new(config.piece_values), config)
    }

    /// Material evaluator using the configured piece values.
    pub fn from_config(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(MaterialEvaluator::new(config.piece_values), config))
    }
}

impl Default for Searcher<MaterialEvaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Searcher<E> {
    pub fn with_evaluator(evaluator: E, config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(evaluator, config))
    }

    fn build(evaluator: E, config: SearchConfig) -> Self {
        let rng = seeded_rng(config.seed);
        Self {
            evaluator,
            config,
            rng,
            nodes: 0,
            cutoffs: 0,
        }
    }

    /// Nodes visited by the last top-level call.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Clear counters and restart the RNG from the configured seed.
    pub fn reset(&mut self) {
        self.nodes = 0;
        self.cutoffs = 0;
        self.rng = seeded_rng(self.config.seed);
    }

    /// Pick a move for `side` by searching `depth` plies.
    ///
    /// Returns `Ok(None)` when the state has no legal moves. `state` is
    /// restored before returning.
    pub fn best_move<R>(
        &mut self,
        state: &mut R,
        depth: u8,
        side: Side,
    ) -> Result<Option<R::Move>, SearchError>
    where
        R: RulesEngine,
        E: Evaluate<R>,
    {
        Ok(self.analyze(state, depth, side)?.best_move)
    }

    /// Like [`best_move`](Self::best_move), reporting per-move scores and
    /// search statistics as well.
    pub fn analyze<R>(
        &mut self,
        state: &mut R,
        depth: u8,
        side: Side,
    ) -> Result<SearchReport<R::Move>, SearchError>
    where
        R: RulesEngine,
        E: Evaluate<R>,
    {
        self.check_request(state, depth)?;
        self.nodes = 0;
        self.cutoffs = 0;

        let moves = state.legal_moves();
        let mut root_scores = Vec::with_capacity(moves.len());
        let mut best_value = side.worst();
        let mut best: Option<(R::Move, Score)> = None;

        for mv in moves {
            state.apply(mv);
            let value = self.search(state, depth - 1, -WINDOW, WINDOW, side.flip());
            state.undo();

            debug!(%mv, value, "root move searched");
            root_scores.push((mv, value));

            // Strict: on ties the earlier move stays.
            if side.prefers(value, best_value) {
                best_value = value;
                best = Some((mv, value));
            }
        }

        let mut fallback = false;
        if best.is_none() && !root_scores.is_empty() {
            best = root_scores.choose(&mut self.rng).copied();
            fallback = true;
            if let Some((mv, _)) = best {
                warn!(%mv, moves = root_scores.len(), "no move beat the sentinel, picked at random");
            }
        }

        match best {
            Some((mv, score)) => info!(
                %mv,
                score,
                depth,
                nodes = self.nodes,
                cutoffs = self.cutoffs,
                "search finished"
            ),
            None => info!(depth, "search finished with no legal moves"),
        }

        Ok(SearchReport {
            best_move: best.map(|(mv, _)| mv),
            score: best.map(|(_, s)| s),
            root_scores,
            depth,
            nodes: self.nodes,
            cutoffs: self.cutoffs,
            fallback,
        })
    }

    /// Minimax value of `state` searched `depth` plies deep within
    /// `(alpha, beta)`, with `side` to optimise at this node.
    ///
    /// Leaves (depth 0 or game over) return the evaluator's score as is.
    pub fn search<R>(
        &mut self,
        state: &mut R,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
        side: Side,
    ) -> Score
    where
        R: RulesEngine,
        E: Evaluate<R>,
    {
        self.nodes += 1;
        if depth == 0 || state.is_game_over() {
            return self.evaluator.evaluate(state);
        }

        let mut best = side.worst();
        for mv in state.legal_moves() {
            state.apply(mv);
            let value = self.search(state, depth - 1, alpha, beta, side.flip());
            state.undo();

            best = side.better(best, value);
            side.tighten(&mut alpha, &mut beta, best);
            if beta <= alpha {
                self.cutoffs += 1;
                break;
            }
        }
        best
    }

    fn check_request<R: RulesEngine>(&self, state: &R, depth: u8) -> Result<(), SearchError> {
        if depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        if depth > self.config.max_depth {
            return Err(SearchError::DepthLimit {
                depth,
                max: self.config.max_depth,
            });
        }
        state.validate().map_err(SearchError::InvalidPosition)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
