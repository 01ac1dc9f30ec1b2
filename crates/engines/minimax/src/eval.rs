//! Material-only position evaluation.
//!
//! Scores are always from White's point of view: positive favours White,
//! negative favours Black, regardless of whose turn it is. The king carries
//! no value; losing it is a rules matter (checkmate), not a material one.

use chess_core::{Color, Game, PieceKind, Position};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Evaluation in centipawns, positive favouring White.
pub type Score = i32;

/// Most material one side may hold under any valid piece table. Keeps every
/// reachable score well inside the search sentinels.
pub const MATERIAL_LIMIT: Score = 50_000;

/// Centipawn value of each capturable piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceValues {
    pub pawn: Score,
    pub knight: Score,
    pub bishop: Score,
    pub rook: Score,
    pub queen: Score,
}

impl PieceValues {
    pub const STANDARD: PieceValues = PieceValues {
        pawn: 100,
        knight: 320,
        bishop: 330,
        rook: 500,
        queen: 900,
    };

    #[inline]
    pub fn value(&self, kind: PieceKind) -> Score {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => 0,
        }
    }

    /// Largest total one side can reach: the full set, with all eight pawns
    /// promoted to the most valuable kind.
    pub fn max_side_material(&self) -> i64 {
        let [p, n, b, r, q] = [self.pawn, self.knight, self.bishop, self.rook, self.queen]
            .map(i64::from);
        8 * p.max(n).max(b).max(r).max(q) + 2 * (n + b + r) + q
    }

    /// Every value must be positive so that extra material always raises
    /// the owner's score, and the full material of one side must stay
    /// under [`MATERIAL_LIMIT`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("pawn", self.pawn),
            ("knight", self.knight),
            ("bishop", self.bishop),
            ("rook", self.rook),
            ("queen", self.queen),
        ];
        if let Some((name, v)) = named.iter().find(|(_, v)| *v <= 0) {
            return Err(ConfigError::Invalid(format!(
                "piece value for {name} must be positive, got {v}"
            )));
        }

        let total = self.max_side_material();
        if total >= i64::from(MATERIAL_LIMIT) {
            return Err(ConfigError::Invalid(format!(
                "piece values allow {total} material per side, limit is {MATERIAL_LIMIT}"
            )));
        }
        Ok(())
    }
}

impl Default for PieceValues {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Something that can score a search state.
///
/// The search is generic over this so it can run on any rules engine; the
/// material evaluator below is the one used for chess.
pub trait Evaluate<S: ?Sized> {
    fn evaluate(&self, state: &S) -> Score;
}

/// Sums piece values, adding White's and subtracting Black's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialEvaluator {
    values: PieceValues,
}

impl MaterialEvaluator {
    pub fn new(values: PieceValues) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &PieceValues {
        &self.values
    }
}

impl Evaluate<Position> for MaterialEvaluator {
    fn evaluate(&self, pos: &Position) -> Score {
        pos.pieces()
            .map(|(_, pc)| {
                let v = self.values.value(pc.kind);
                match pc.color {
                    Color::White => v,
                    Color::Black => -v,
                }
            })
            .sum()
    }
}

impl Evaluate<Game> for MaterialEvaluator {
    fn evaluate(&self, game: &Game) -> Score {
        self.evaluate(game.position())
    }
}

/// Material balance with the standard piece values.
pub fn evaluate(pos: &Position) -> Score {
    MaterialEvaluator::default().evaluate(pos)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
