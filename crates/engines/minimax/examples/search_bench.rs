//! Fixed-depth search timings, for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example search_bench -p minimax_engine -- [depth] [fen]
//!
//! Without a FEN every position below is searched with its own side to move.

use std::env;
use std::time::Instant;

use chess_core::{Game, Position};
use minimax_engine::{SearchConfig, Searcher, Side};

const POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "After 1.e4",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
];

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    let config = SearchConfig {
        max_depth: depth.max(1),
        seed: Some(0),
        ..SearchConfig::default()
    };
    let mut searcher = match Searcher::from_config(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("bad depth {depth}: {e}");
            return;
        }
    };

    match args.get(2) {
        Some(fen) => run(&mut searcher, "Custom", fen, depth),
        None => {
            for (name, fen) in POSITIONS {
                run(&mut searcher, name, fen, depth);
            }
        }
    }
}

fn run(searcher: &mut Searcher, name: &str, fen: &str, depth: u8) {
    let pos = match Position::try_from_fen(fen) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{name}: {e}");
            return;
        }
    };
    let side = Side::for_color(pos.side_to_move);
    let mut game = Game::new(pos);

    let start = Instant::now();
    let result = searcher.analyze(&mut game, depth, side);
    let elapsed = start.elapsed();

    match result {
        Ok(report) => {
            let nps = if elapsed.as_secs_f64() > 0.0 {
                report.nodes as f64 / elapsed.as_secs_f64()
            } else {
                0.0
            };
            let best = report
                .best_move
                .map_or_else(|| "(none)".to_string(), |m| m.to_string());
            println!(
                "{name:.<24} {best:>6} score {:>6} {:>10} nodes {:>8} cutoffs in {elapsed:>8.3?} ({nps:>10.0} nps)",
                report.score.unwrap_or(0),
                report.nodes,
                report.cutoffs,
            );
        }
        Err(e) => eprintln!("{name}: {e}"),
    }
}
