use super::*;
use crate::types::{Color, PieceKind};

#[test]
fn test_zobrist_keys_unique() {
    let mut seen = std::collections::HashSet::new();

    for color in 0..2 {
        for piece in 0..6 {
            for sq in 0..64 {
                let key = ZOBRIST.pieces[color][piece][sq];
                assert!(seen.insert(key), "Duplicate Zobrist key found");
            }
        }
    }

    assert!(
        seen.insert(ZOBRIST.side_to_move),
        "Side to move key collision"
    );
    for key in ZOBRIST.castling {
        assert!(seen.insert(key), "Castling key collision");
    }
    for key in ZOBRIST.en_passant {
        assert!(seen.insert(key), "En passant key collision");
    }
}

#[test]
fn test_zobrist_piece_key_depends_on_square_and_color() {
    let white = Piece::new(Color::White, PieceKind::Pawn);
    let black = Piece::new(Color::Black, PieceKind::Pawn);
    assert_ne!(ZOBRIST.piece_key(white, 0), ZOBRIST.piece_key(white, 1));
    assert_ne!(ZOBRIST.piece_key(white, 12), ZOBRIST.piece_key(black, 12));
}

#[test]
fn test_keys_are_deterministic() {
    let fresh = ZobristKeys::new();
    assert_eq!(fresh.side_to_move, ZOBRIST.side_to_move);
    assert_eq!(fresh.pieces[1][5][63], ZOBRIST.pieces[1][5][63]);
}
