use super::*;

#[test]
fn test_move_to_uci() {
    assert_eq!(move_to_uci(Move::new(12, 28)), "e2e4");

    let mut promo = Move::new(52, 60);
    promo.promo = Some(PieceKind::Knight);
    assert_eq!(move_to_uci(promo), "e7e8n");
    assert_eq!(promo.to_string(), "e7e8n");
}

#[test]
fn test_parse_uci_move_sets_flags() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let castle = parse_uci_move(&pos, "e1g1").expect("castling is legal");
    assert!(castle.is_castle);

    assert!(parse_uci_move(&pos, "e1e3").is_none());
    assert!(parse_uci_move(&pos, "zz").is_none());
}

#[test]
fn test_parse_uci_promotion() {
    let pos = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
    assert_eq!(
        parse_uci_move(&pos, "e7e8r").and_then(|m| m.promo),
        Some(PieceKind::Rook)
    );
    assert_eq!(
        parse_uci_move(&pos, "e7e8").and_then(|m| m.promo),
        Some(PieceKind::Queen)
    );
    assert!(parse_uci_move(&pos, "e7e8k").is_none());
}
