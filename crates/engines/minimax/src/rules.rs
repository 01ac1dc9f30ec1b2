//! The narrow view of a rules engine that the search needs.

use std::fmt::{Debug, Display};

use chess_core::{Color, Game, Move};

/// Navigation interface the searcher walks a game tree through.
///
/// `apply` and `undo` must nest like a stack; every `apply` issued by the
/// search is matched by exactly one `undo` before the call returns.
pub trait RulesEngine {
    type Move: Copy + PartialEq + Debug + Display;

    /// Legal moves for the side to move, in a stable order.
    fn legal_moves(&mut self) -> Vec<Self::Move>;

    fn apply(&mut self, mv: Self::Move);

    /// Reverts the most recent `apply`.
    fn undo(&mut self);

    fn is_game_over(&mut self) -> bool;

    fn side_to_move(&self) -> Color;

    /// Reject states that cannot be searched. The default accepts anything.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl RulesEngine for Game {
    type Move = Move;

    fn legal_moves(&mut self) -> Vec<Move> {
        Game::legal_moves(self)
    }

    fn apply(&mut self, mv: Move) {
        Game::apply(self, mv);
    }

    fn undo(&mut self) {
        Game::undo(self);
    }

    fn is_game_over(&mut self) -> bool {
        Game::is_game_over(self)
    }

    fn side_to_move(&self) -> Color {
        Game::side_to_move(self)
    }

    fn validate(&self) -> Result<(), String> {
        self.position().validate().map_err(|e| e.to_string())
    }
}
