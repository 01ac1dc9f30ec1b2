//! Draw and game-end detection through the `Game` interface.
//!
//! Covers stalemate, the fifty-move rule, threefold repetition and
//! insufficient material, plus the checks that separate mate from stalemate.

use chess_core::{Color, Game, Outcome, PieceKind, Position};

fn outcome_of(fen: &str) -> Option<Outcome> {
    Game::new(Position::from_fen(fen)).outcome()
}

// =============================================================================
// Stalemate
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    // Black king a8, White queen b6, White king c7
    let fen = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1";
    assert_eq!(outcome_of(fen), Some(Outcome::Stalemate));
    assert!(!Position::from_fen(fen).in_check(Color::Black));
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    let fen = "6k1/6P1/6K1/8/8/8/8/8 b - - 0 1";
    assert_eq!(outcome_of(fen), Some(Outcome::Stalemate));
}

// =============================================================================
// Fifty-move rule
// =============================================================================

#[test]
fn test_fifty_move_rule_threshold() {
    let at_100 = Position::from_fen("8/8/8/4k3/8/4K3/8/R7 w - - 100 60");
    let at_99 = Position::from_fen("8/8/8/4k3/8/4K3/8/R7 w - - 99 60");
    assert!(at_100.is_fifty_move_draw());
    assert!(!at_99.is_fifty_move_draw());
    assert_eq!(Game::new(at_100).outcome(), Some(Outcome::FiftyMoveRule));
    assert_eq!(Game::new(at_99).outcome(), None);
}

#[test]
fn test_fifty_move_rule_reset_on_pawn_move() {
    let mut game = Game::new(Position::from_fen("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60"));

    let pawn_move = game
        .legal_moves()
        .into_iter()
        .find(|m| {
            game.position()
                .piece_at(m.from)
                .is_some_and(|p| p.kind == PieceKind::Pawn)
        })
        .expect("Should have a pawn move available");
    game.apply(pawn_move);

    assert_eq!(game.position().halfmove_clock, 0);
    assert!(!game.position().is_fifty_move_draw());
}

// =============================================================================
// Insufficient material
// =============================================================================

#[test]
fn test_insufficient_material_cases() {
    let drawn = [
        ("8/8/8/4k3/8/4K3/8/8 w - - 0 1", "K vs K"),
        ("8/8/8/4k3/8/4KB2/8/8 w - - 0 1", "K+B vs K"),
        ("8/8/8/4k3/8/4KN2/8/8 w - - 0 1", "K+N vs K"),
        ("8/8/4b3/4k3/8/4K3/8/8 w - - 0 1", "K vs K+B"),
        ("8/8/4n3/4k3/8/4K3/8/8 w - - 0 1", "K vs K+N"),
        ("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1", "same-colour bishops"),
    ];
    for (fen, label) in drawn {
        assert!(
            Position::from_fen(fen).is_insufficient_material(),
            "{label} should be insufficient material"
        );
        assert_eq!(outcome_of(fen), Some(Outcome::InsufficientMaterial), "{label}");
    }
}

#[test]
fn test_sufficient_material_cases() {
    let playable = [
        ("2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1", "opposite-colour bishops"),
        ("8/8/8/4k3/8/4K3/4P3/8 w - - 0 1", "K+P vs K"),
        ("8/8/8/4k3/8/4K3/8/4R3 w - - 0 1", "K+R vs K"),
        ("8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1", "K+Q vs K"),
        ("8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1", "K+N+N vs K"),
    ];
    for (fen, label) in playable {
        assert!(
            !Position::from_fen(fen).is_insufficient_material(),
            "{label} should be sufficient material"
        );
    }
}

// =============================================================================
// Position hash (repetition key)
// =============================================================================

#[test]
fn test_position_hash_distinguishes_state() {
    let base = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let variants = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R w KQkq - 0 1",
    ];
    assert_eq!(base.position_hash(), Position::startpos().position_hash());
    for fen in variants {
        assert_ne!(
            base.position_hash(),
            Position::from_fen(fen).position_hash(),
            "{fen}"
        );
    }

    let ep = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    let no_ep = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
    assert_ne!(ep.position_hash(), no_ep.position_hash());
}

#[test]
fn test_threefold_repetition_through_game() {
    let mut game = Game::startpos();
    let shuffle = ["g1f3", "b8c6", "f3g1", "c6b8"];
    for round in 0..2 {
        for txt in shuffle {
            let mv = chess_core::parse_uci_move(game.position(), txt).unwrap();
            game.apply(mv);
        }
        assert_eq!(game.is_threefold_repetition(), round == 1);
    }
    assert_eq!(game.outcome(), Some(Outcome::ThreefoldRepetition));
    assert!(game.is_draw());
}

// =============================================================================
// Mate vs check
// =============================================================================

#[test]
fn test_checkmate_is_not_stalemate() {
    let mut game = Game::new(Position::from_fen(
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
    ));
    assert!(game.legal_moves().is_empty());
    assert!(game.is_checkmate());
    assert!(!game.is_stalemate());
}

#[test]
fn test_check_is_not_checkmate() {
    let mut game = Game::new(Position::from_fen(
        "rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2",
    ));
    assert!(!game.legal_moves().is_empty());
    assert!(game.position().in_check(Color::Black));
    assert!(!game.is_game_over());
}
