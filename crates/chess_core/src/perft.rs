//! Move-generator verification by leaf counting.

use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Number of leaf positions `depth` plies below `pos`.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    count(pos, depth, &mut layers)
}

/// Per-root-move leaf counts, in generator order. Useful for bisecting a
/// mismatch against a reference engine.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut roots = Vec::with_capacity(64);
    legal_moves_into(pos, &mut roots);

    let mut layers = vec![Vec::with_capacity(64); depth as usize - 1];
    roots
        .into_iter()
        .map(|mv| {
            let undo = pos.make_move(mv);
            let nodes = count(pos, depth - 1, &mut layers);
            pos.unmake_move(mv, undo);
            (mv, nodes)
        })
        .collect()
}

/// One move buffer per remaining ply so recursion never reallocates.
fn count(pos: &mut Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
    if depth == 0 {
        return 1;
    }

    let (buf, rest) = layers
        .split_first_mut()
        .expect("perft requires one buffer per remaining ply");
    legal_moves_into(pos, buf);
    if depth == 1 {
        return buf.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in buf.iter().copied() {
        let undo = pos.make_move(mv);
        nodes += count(pos, depth - 1, rest);
        pos.unmake_move(mv, undo);
    }
    nodes
}
