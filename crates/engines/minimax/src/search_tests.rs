use super::*;
use crate::eval::evaluate;
use chess_core::{Game, Position};

const BACK_RANK: &str = "3r2k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1";
const SCHOLARS_MATE: &str = "r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1";
const STALEMATE: &str = "k7/8/1Q6/8/8/8/8/1K6 b - - 0 1";

fn searcher() -> Searcher {
    Searcher::from_config(SearchConfig {
        seed: Some(7),
        ..SearchConfig::default()
    })
    .unwrap()
}

fn game(fen: &str) -> Game {
    Game::new(Position::from_fen(fen))
}

/// Scores every leaf the same.
struct Flat(Score);

impl<S: ?Sized> Evaluate<S> for Flat {
    fn evaluate(&self, _: &S) -> Score {
        self.0
    }
}

#[test]
fn side_helpers() {
    assert_eq!(Side::for_color(Color::White), Side::Maximizing);
    assert_eq!(Side::for_color(Color::Black), Side::Minimizing);
    assert_eq!(Side::from_maximizing(false), Side::Minimizing);
    assert_eq!(Side::Maximizing.flip(), Side::Minimizing);
    assert_eq!(Side::Maximizing.worst(), MIN_SENTINEL);
    assert_eq!(Side::Minimizing.worst(), MAX_SENTINEL);
    assert!(Side::Maximizing.prefers(1, 0));
    assert!(!Side::Maximizing.prefers(0, 0));
    assert!(Side::Minimizing.prefers(-1, 0));
    assert_eq!(Side::Minimizing.better(3, -2), -2);
}

#[test]
fn depth_zero_returns_static_eval() {
    let fens = [
        BACK_RANK,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "4k3/pp6/8/8/8/8/8/4K2Q b - - 0 1",
    ];
    let mut s = searcher();
    for fen in fens {
        let mut g = game(fen);
        for side in [Side::Maximizing, Side::Minimizing] {
            let v = s.search(&mut g, 0, -WINDOW, WINDOW, side);
            assert_eq!(v, evaluate(g.position()), "{fen}");
        }
    }
}

#[test]
fn game_over_leaf_is_material_only() {
    let mut s = searcher();
    let mut g = game(SCHOLARS_MATE);
    let v = s.search(&mut g, 3, -WINDOW, WINDOW, Side::Minimizing);
    assert_eq!(v, 0);
    assert_eq!(s.nodes(), 1);
}

#[test]
fn no_legal_moves_gives_none() {
    let mut s = searcher();
    for fen in [SCHOLARS_MATE, STALEMATE] {
        let mut g = game(fen);
        assert_eq!(s.best_move(&mut g, 2, Side::Minimizing).unwrap(), None, "{fen}");

        let report = s.analyze(&mut g, 2, Side::Minimizing).unwrap();
        assert!(report.root_scores.is_empty());
        assert_eq!(report.score, None);
        assert!(!report.fallback);
    }
}

#[test]
fn finds_back_rank_mate_for_white() {
    let mut s = searcher();
    for depth in 1..=3 {
        let mut g = game(BACK_RANK);
        let report = s.analyze(&mut g, depth, Side::Maximizing).unwrap();
        assert_eq!(report.best_move.unwrap().to_string(), "d1d8", "depth {depth}");
        assert_eq!(report.score, Some(500));
        assert!(!report.fallback);
    }
}

#[test]
fn finds_back_rank_mate_for_black() {
    let mirrored = Position::from_fen(BACK_RANK).mirrored();
    let mut s = searcher();
    for depth in 1..=3 {
        let mut g = Game::new(mirrored.clone());
        let report = s.analyze(&mut g, depth, Side::Minimizing).unwrap();
        assert_eq!(report.best_move.unwrap().to_string(), "d8d1", "depth {depth}");
        assert_eq!(report.score, Some(-500));
    }
}

#[test]
fn mirrored_search_negates_value() {
    let fens = [
        BACK_RANK,
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        "4k3/8/3p4/4n3/3P4/2B5/8/4K3 w - - 0 1",
    ];
    let mut s = searcher();
    for fen in fens {
        let pos = Position::from_fen(fen);
        let side = Side::for_color(pos.side_to_move);
        let v = s.search(&mut Game::new(pos.clone()), 2, -WINDOW, WINDOW, side);
        let m = s.search(&mut Game::new(pos.mirrored()), 2, -WINDOW, WINDOW, side.flip());
        assert_eq!(v, -m, "{fen}");
    }
}

#[test]
fn ties_keep_the_first_move() {
    let mut s = searcher();
    let mut g = Game::startpos();
    let first = g.legal_moves()[0];
    let report = s.analyze(&mut g, 2, Side::Maximizing).unwrap();
    assert!(report.root_scores.iter().all(|&(_, v)| v == 0));
    assert_eq!(report.best_move, Some(first));
    assert!(!report.fallback);
}

#[test]
fn startpos_minimizing_depth_two() {
    let mut g = Game::startpos();
    let legal = g.legal_moves();

    let first = searcher().best_move(&mut g, 2, Side::Minimizing).unwrap();
    let second = searcher().best_move(&mut g, 2, Side::Minimizing).unwrap();
    let mv = first.expect("start position has moves");
    assert!(legal.contains(&mv));
    assert_eq!(first, second);
}

#[test]
fn black_reply_to_e4_is_legal_and_stable() {
    let mut g = Game::startpos();
    let e4 = chess_core::parse_uci_move(g.position(), "e2e4").unwrap();
    g.apply(e4);
    let legal = g.legal_moves();

    let mut s = searcher();
    let a = s.analyze(&mut g, 2, Side::Minimizing).unwrap();
    let b = s.analyze(&mut g, 2, Side::Minimizing).unwrap();
    let mv = a.best_move.unwrap();
    assert!(legal.contains(&mv));
    assert_eq!(g.position().piece_at(mv.from).map(|p| p.color), Some(Color::Black));
    assert_eq!(a.best_move, b.best_move);
    assert_eq!(a.score, Some(0));
    assert!(!a.fallback);
}

#[test]
fn search_leaves_game_untouched() {
    let mut g = game("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before_pos = g.position().clone();
    let before_hist = g.history().to_vec();
    let before_ply = g.ply();

    searcher().best_move(&mut g, 3, Side::Maximizing).unwrap();

    assert_eq!(g.position(), &before_pos);
    assert_eq!(g.history(), &before_hist[..]);
    assert_eq!(g.ply(), before_ply);
}

#[test]
fn fallback_picks_a_legal_move_when_nothing_beats_the_sentinel() {
    let config = SearchConfig {
        seed: Some(11),
        ..SearchConfig::default()
    };
    let mut g = Game::startpos();
    let legal = g.legal_moves();

    for (value, side) in [
        (MIN_SENTINEL, Side::Maximizing),
        (MAX_SENTINEL, Side::Minimizing),
    ] {
        let mut a = Searcher::with_evaluator(Flat(value), config.clone()).unwrap();
        let mut b = Searcher::with_evaluator(Flat(value), config.clone()).unwrap();
        let ra = a.analyze(&mut g, 1, side).unwrap();
        let rb = b.analyze(&mut g, 1, side).unwrap();

        assert!(ra.fallback);
        let mv = ra.best_move.unwrap();
        assert!(legal.contains(&mv));
        assert_eq!(ra.score, Some(value));
        // Same seed, same pick.
        assert_eq!(ra.best_move, rb.best_move);
    }
}

#[test]
fn bare_kings_still_return_a_move() {
    let mut g = game("8/8/3k4/8/8/4K3/8/8 w - - 0 1");
    let legal = g.legal_moves();
    let report = searcher().analyze(&mut g, 2, Side::Maximizing).unwrap();
    let mv = report.best_move.unwrap();
    assert!(legal.contains(&mv));
    assert_eq!(mv, legal[0]);
    assert!(!report.fallback);
}

#[test]
fn rejects_bad_requests() {
    let mut s = searcher();
    let mut g = Game::startpos();
    assert_eq!(
        s.best_move(&mut g, 0, Side::Maximizing),
        Err(SearchError::ZeroDepth)
    );
    assert_eq!(
        s.best_move(&mut g, 7, Side::Maximizing),
        Err(SearchError::DepthLimit { depth: 7, max: 6 })
    );

    for fen in [
        "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
        // Castling right with no rook on h1.
        "4k3/8/8/8/8/8/8/4K3 w K - 0 1",
        "k7/4P3/8/8/8/8/8/4K3 w - d8 0 1",
    ] {
        let mut g = game(fen);
        assert!(
            matches!(
                s.best_move(&mut g, 1, Side::Maximizing),
                Err(SearchError::InvalidPosition(_))
            ),
            "{fen}"
        );
    }
}

#[test]
fn node_count_resets_per_call() {
    let mut s = searcher();
    let mut g = Game::startpos();
    s.best_move(&mut g, 1, Side::Maximizing).unwrap();
    assert_eq!(s.nodes(), 20);
    s.best_move(&mut g, 1, Side::Maximizing).unwrap();
    assert_eq!(s.nodes(), 20);
}
