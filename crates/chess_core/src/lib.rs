pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::*;
pub use game::*;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait — implemented by move-selection engines
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Score of the chosen move in centipawns, positive favouring White
    pub score: i32,
    /// Search depth in plies
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
}

/// Common interface for anything that can pick a move for a position.
pub trait Engine: Send {
    /// Search the position to a fixed depth and report the chosen move.
    ///
    /// Implementations must leave `pos` observably untouched; they work
    /// on their own copy.
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult;

    /// Short display name, e.g. for logs.
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "ML-chess"
    }

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
