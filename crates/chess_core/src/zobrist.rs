//! Zobrist keys for position hashing.
//!
//! `Position::position_hash` XORs one key per occupied square, plus keys
//! for Black to move, each castling right held and the en-passant file.
//! `Game` keeps these hashes on a history stack to spot threefold
//! repetition during play and search.

use crate::types::Piece;

pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XORed in when Black is to move
    pub side_to_move: u64,
    /// [wk, wq, bk, bq]
    pub castling: [u64; 4],
    /// En-passant file a..h
    pub en_passant: [u64; 8],
}

/// Fixed-seed xorshift64 stream, usable in const context.
struct KeyStream(u64);

impl KeyStream {
    const fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

impl ZobristKeys {
    pub const fn new() -> Self {
        let mut stream = KeyStream(0x9E37_79B9_7F4A_7C15);
        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 6 {
                let mut sq = 0;
                while sq < 64 {
                    pieces[color][kind][sq] = stream.next();
                    sq += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        let side_to_move = stream.next();

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            castling[i] = stream.next();
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            en_passant[i] = stream.next();
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    /// Key for castling right index (0=wk, 1=wq, 2=bk, 3=bq).
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
