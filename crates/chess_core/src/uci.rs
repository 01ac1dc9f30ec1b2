//! Long algebraic move notation ("e2e4", "e7e8q").

use crate::{board::Position, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = sq_to_coord(mv.from);
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.to_char());
    }
    s
}

/// Resolve a long algebraic move against the legal moves of `pos`, so the
/// castle and en-passant flags come from the generator.
///
/// A missing promotion letter on a promoting move selects the queen.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt[4..].chars().next() {
        Some(ch) => match PieceKind::from_char(ch)? {
            PieceKind::Pawn | PieceKind::King => return None,
            kind => Some(kind),
        },
        None => None,
    };

    legal_moves(pos).into_iter().find(|m| {
        m.from == from
            && m.to == to
            && match m.promo {
                Some(kind) => kind == promo.unwrap_or(PieceKind::Queen),
                None => promo.is_none(),
            }
    })
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
