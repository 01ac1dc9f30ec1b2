//! A position together with the move stack that produced it.
//!
//! `Position` alone cannot answer "is this a draw by repetition?" and its
//! `unmake_move` needs the `Undo` record from the matching `make_move`.
//! `Game` owns both, giving callers a plain apply/undo interface with
//! stack discipline.

use crate::{
    board::{Position, Undo},
    movegen::{has_legal_move, legal_moves_into},
    types::{Color, Move},
};

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_draw(self) -> bool {
        self.winner().is_none()
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    stack: Vec<(Move, Undo)>,
    /// Hash of every position reached, including the starting one.
    history: Vec<u64>,
}

impl Game {
    pub fn new(position: Position) -> Self {
        let history = vec![position.position_hash()];
        Self {
            position,
            stack: Vec::new(),
            history,
        }
    }

    pub fn startpos() -> Self {
        Self::new(Position::startpos())
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// Number of moves currently applied on top of the starting position.
    pub fn ply(&self) -> usize {
        self.stack.len()
    }

    pub fn history(&self) -> &[u64] {
        &self.history
    }

    pub fn legal_moves(&mut self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        legal_moves_into(&mut self.position, &mut out);
        out
    }

    /// Play a move produced by `legal_moves`. Legality is not re-checked.
    pub fn apply(&mut self, mv: Move) {
        let undo = self.position.make_move(mv);
        self.stack.push((mv, undo));
        self.history.push(self.position.position_hash());
    }

    /// Take back the most recent `apply`.
    ///
    /// # Panics
    /// If no move has been applied. Unbalanced undo is a caller bug.
    pub fn undo(&mut self) -> Move {
        let (mv, undo) = self
            .stack
            .pop()
            .expect("undo called with no move applied");
        self.history.pop();
        self.position.unmake_move(mv, undo);
        mv
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.position.in_check(self.side_to_move()) && !has_legal_move(&mut self.position)
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.position.in_check(self.side_to_move()) && !has_legal_move(&mut self.position)
    }

    /// The current position has occurred at least three times.
    pub fn is_threefold_repetition(&self) -> bool {
        let Some(&current) = self.history.last() else {
            return false;
        };
        self.history.iter().filter(|&&h| h == current).count() >= 3
    }

    /// Any drawn state: stalemate, fifty-move rule, repetition or
    /// insufficient material.
    pub fn is_draw(&mut self) -> bool {
        self.outcome().is_some_and(Outcome::is_draw)
    }

    pub fn is_game_over(&mut self) -> bool {
        self.outcome().is_some()
    }

    /// Result of the game if it has ended. Mate and stalemate take
    /// precedence over the automatic draws.
    pub fn outcome(&mut self) -> Option<Outcome> {
        if !has_legal_move(&mut self.position) {
            let mover = self.side_to_move();
            return Some(if self.position.in_check(mover) {
                Outcome::Checkmate {
                    winner: mover.other(),
                }
            } else {
                Outcome::Stalemate
            });
        }
        if self.position.is_insufficient_material() {
            return Some(Outcome::InsufficientMaterial);
        }
        if self.position.is_fifty_move_draw() {
            return Some(Outcome::FiftyMoveRule);
        }
        if self.is_threefold_repetition() {
            return Some(Outcome::ThreefoldRepetition);
        }
        None
    }
}

impl From<Position> for Game {
    fn from(position: Position) -> Self {
        Self::new(position)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
