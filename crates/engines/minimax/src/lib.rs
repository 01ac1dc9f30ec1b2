//! Minimax Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over a material-only
//! evaluation. The search walks any [`RulesEngine`]; [`MinimaxEngine`]
//! wires it to `chess_core` behind the shared [`Engine`] trait.

mod config;
mod error;
mod eval;
mod rules;
mod search;

use chess_core::{Engine, Game, Move, Position, SearchResult};
use tracing::error;

pub use config::SearchConfig;
pub use error::{ConfigError, SearchError};
pub use eval::{evaluate, Evaluate, MaterialEvaluator, PieceValues, Score, MATERIAL_LIMIT};
pub use rules::RulesEngine;
pub use search::{SearchReport, Searcher, Side, MAX_SENTINEL, MIN_SENTINEL, WINDOW};

/// Opponent engine: the side to move searches to a fixed depth and plays
/// the move with the best material outcome.
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    searcher: Searcher,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: SearchConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            searcher: Searcher::from_config(config)?,
        })
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// Move for the side to move in `game`, at the configured depth.
    pub fn choose_move(&mut self, game: &mut Game) -> Result<Option<Move>, SearchError> {
        let depth = self.searcher.config().depth;
        let side = Side::for_color(game.side_to_move());
        self.searcher.best_move(game, depth, side)
    }
}

/// A request the searcher refuses (depth out of range, malformed position)
/// comes back with no move and `depth: 0`. Positions without legal moves
/// keep the requested depth, so the two cases stay distinguishable.
impl Engine for MinimaxEngine {
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult {
        let mut game = Game::new(pos.clone());
        let side = Side::for_color(pos.side_to_move);

        match self.searcher.analyze(&mut game, depth, side) {
            Ok(report) => SearchResult {
                best_move: report.best_move,
                score: report
                    .score
                    .unwrap_or_else(|| self.searcher.evaluator().evaluate(pos)),
                depth,
                nodes: report.nodes,
            },
            Err(e) => {
                error!(error = %e, fen = %pos.to_fen(), "search rejected");
                SearchResult {
                    best_move: None,
                    score: 0,
                    depth: 0,
                    nodes: 0,
                }
            }
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.searcher.reset();
    }
}
