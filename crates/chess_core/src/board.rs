use crate::{
    error::{FenError, PositionError},
    types::*,
    zobrist::ZOBRIST,
};

/// (FEN letter, owner, king home, rook home) in `CastlingRights::as_array` order.
const CASTLING_HOMES: [(char, Color, u8, u8); 4] = [
    ('K', Color::White, 4, 7),
    ('Q', Color::White, 4, 0),
    ('k', Color::Black, 60, 63),
    ('q', Color::Black, 60, 56),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    /// Rights in Zobrist order: [wk, wq, bk, bq].
    pub fn as_array(&self) -> [bool; 4] {
        [self.wk, self.wq, self.bk, self.bq]
    }

    /// Drop the right tied to a rook home square, if any.
    fn clear_rook_square(&mut self, sq: u8) {
        match sq {
            0 => self.wq = false,
            7 => self.wk = false,
            56 => self.bq = false,
            63 => self.bk = false,
            _ => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Board with no pieces, White to move, no rights.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        };

        for f in 0..8 {
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    /// Parse a FEN string. Move counters are optional and default to `0 1`.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut pos = Position::empty();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let s = sq(file, rank).ok_or(FenError::FileCount { rank: rank_idx })?;
                    pos.board[s as usize] = Some(Piece::new(color, kind));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::FileCount { rank: rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::FileCount { rank: rank_idx });
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => pos.castling.wk = true,
                    'Q' => pos.castling.wq = true,
                    'k' => pos.castling.bk = true,
                    'q' => pos.castling.bq = true,
                    _ => return Err(FenError::InvalidCastling(c)),
                }
            }
        }

        pos.en_passant = match parts[3] {
            "-" => None,
            coord => Some(
                coord_to_sq(coord).ok_or_else(|| FenError::InvalidEnPassant(coord.to_string()))?,
            ),
        };

        let halfmove = parts.get(4).copied().unwrap_or("0");
        let fullmove = parts.get(5).copied().unwrap_or("1");
        pos.halfmove_clock = halfmove
            .parse()
            .map_err(|_| FenError::InvalidCounter(halfmove.to_string()))?;
        pos.fullmove_number = fullmove
            .parse()
            .map_err(|_| FenError::InvalidCounter(fullmove.to_string()))?;

        Ok(pos)
    }

    /// Panicking FEN constructor for tests and fixed setups.
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).unwrap_or_else(|e| panic!("Invalid FEN '{fen}': {e}"))
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                let s = (rank * 8 + file) as u8;
                match self.piece_at(s) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let rights: String = self
            .castling
            .as_array()
            .iter()
            .zip(['K', 'Q', 'k', 'q'])
            .filter_map(|(&on, ch)| on.then_some(ch))
            .collect();
        if rights.is_empty() {
            out.push('-');
        } else {
            out.push_str(&rights);
        }

        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    /// Colour-reversed mirror: ranks flipped, every piece changes side,
    /// side to move and castling rights swap with it.
    pub fn mirrored(&self) -> Self {
        let mut m = Position::empty();
        for s in 0..64u8 {
            if let Some(pc) = self.piece_at(s) {
                m.set_piece(flip_rank(s), Some(Piece::new(pc.color.other(), pc.kind)));
            }
        }
        m.side_to_move = self.side_to_move.other();
        m.castling = CastlingRights {
            wk: self.castling.bk,
            wq: self.castling.bq,
            bk: self.castling.wk,
            bq: self.castling.wq,
        };
        m.en_passant = self.en_passant.map(flip_rank);
        m.halfmove_clock = self.halfmove_clock;
        m.fullmove_number = self.fullmove_number;
        m
    }

    /// Reject setups the rules engine cannot meaningfully search.
    pub fn validate(&self) -> Result<(), PositionError> {
        for color in [Color::White, Color::Black] {
            let count = self
                .pieces()
                .filter(|(_, pc)| pc.color == color && pc.kind == PieceKind::King)
                .count();
            if count != 1 {
                return Err(PositionError::KingCount { color, count });
            }
        }

        if let Some((s, _)) = self
            .pieces()
            .find(|(s, pc)| pc.kind == PieceKind::Pawn && (rank_of(*s) == 0 || rank_of(*s) == 7))
        {
            return Err(PositionError::PawnOnBackRank {
                square: sq_to_coord(s),
            });
        }

        let rights = self.castling.as_array();
        for (&(right, color, king_home, rook_home), held) in CASTLING_HOMES.iter().zip(rights) {
            let home = |s: u8, kind: PieceKind| self.piece_at(s) == Some(Piece::new(color, kind));
            if held && !(home(king_home, PieceKind::King) && home(rook_home, PieceKind::Rook)) {
                return Err(PositionError::CastlingRight { right });
            }
        }

        if let Some(ep) = self.en_passant {
            // The pushed pawn stands one rank past the square it skipped.
            let (ep_rank, pushed_sq, pushed) = match self.side_to_move {
                Color::White => (5, ep.wrapping_sub(8), Color::Black),
                Color::Black => (2, ep + 8, Color::White),
            };
            let valid = rank_of(ep) == ep_rank
                && self.piece_at(ep).is_none()
                && self.piece_at(pushed_sq) == Some(Piece::new(pushed, PieceKind::Pawn));
            if !valid {
                return Err(PositionError::EnPassant {
                    square: sq_to_coord(ep),
                });
            }
        }

        let waiting = self.side_to_move.other();
        if self.in_check(waiting) {
            return Err(PositionError::OpponentInCheck(waiting));
        }
        Ok(())
    }

    /// Occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (u8, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| pc.map(|pc| (i as u8, pc)))
    }

    /// Zobrist hash of placement, side to move, castling and en-passant.
    /// Move clocks are deliberately left out so repeated positions collide.
    pub fn position_hash(&self) -> u64 {
        let mut h = 0u64;
        for (s, pc) in self.pieces() {
            h ^= ZOBRIST.piece_key(pc, s);
        }
        if self.side_to_move == Color::Black {
            h ^= ZOBRIST.side_to_move;
        }
        for (i, on) in self.castling.as_array().into_iter().enumerate() {
            if on {
                h ^= ZOBRIST.castling_key(i);
            }
        }
        if let Some(ep) = self.en_passant {
            h ^= ZOBRIST.ep_key(ep % 8);
        }
        h
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly mate: bare kings, a single minor piece,
    /// or bishops only, all on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut knights = 0;
        let mut bishop_colors = [false; 2];
        for (s, pc) in self.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => knights += 1,
                PieceKind::Bishop => {
                    bishop_colors[((file_of(s) + rank_of(s)) % 2) as usize] = true;
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        let bishop_shades = bishop_colors.iter().filter(|&&b| b).count();
        match (knights, bishop_shades) {
            (0, _) if bishop_shades <= 1 => true,
            (1, 0) => true,
            _ => false,
        }
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(s, _)| s)
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    pub fn in_check(&self, c: Color) -> bool {
        let ksq = match self.king_sq(c) {
            Some(s) => s,
            None => return false,
        };
        self.is_square_attacked(ksq, c.other())
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);
        let holds = |s: u8, kinds: &[PieceKind]| {
            self.piece_at(s)
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A white pawn attacks upward, so it sits one rank below the target.
        let pawn_rank = match by {
            Color::White => -1,
            Color::Black => 1,
        };
        for df in [-1, 1] {
            if let Some(s) = sq(tf + df, tr + pawn_rank)
                && holds(s, &[PieceKind::Pawn])
            {
                return true;
            }
        }

        for (df, dr) in KNIGHT_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr)
                && holds(s, &[PieceKind::Knight])
            {
                return true;
            }
        }

        for (df, dr) in KING_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr)
                && holds(s, &[PieceKind::King])
            {
                return true;
            }
        }

        let rays: [(&[(i8, i8)], [PieceKind; 2]); 2] = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, sliders) in rays {
            for (df, dr) in dirs {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if self.piece_at(s).is_some() {
                        if holds(s, &sliders) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }

        false
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut captured = self.piece_at(to);
        let prev_castling = self.castling.clone();
        let prev_ep = self.en_passant;
        let prev_hmc = self.halfmove_clock;
        let prev_fmn = self.fullmove_number;

        self.en_passant = None;

        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        // En-passant removes a pawn that is not on the destination square.
        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            let behind = match moved.color {
                Color::White => -1,
                Color::Black => 1,
            };
            if let Some(cs) = sq(file_of(to), rank_of(to) + behind) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                ep_captured_sq = Some(cs);
                reset_hmc = true;
            }
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        if is_promotion_square(moved, to) {
            let promo = mv.promo.unwrap_or(PieceKind::Queen);
            self.set_piece(to, Some(Piece::new(moved.color, promo)));
        }

        let mut rook_move = None;
        if mv.is_castle
            && moved.kind == PieceKind::King
            && let Some((rf, rt)) = castle_rook_squares(moved.color, from, to)
        {
            let rook = self.piece_at(rf).expect("castling without a rook");
            self.set_piece(rf, None);
            self.set_piece(rt, Some(rook));
            rook_move = Some((rf, rt));
        }

        match (moved.color, moved.kind) {
            (Color::White, PieceKind::King) => {
                self.castling.wk = false;
                self.castling.wq = false;
            }
            (Color::Black, PieceKind::King) => {
                self.castling.bk = false;
                self.castling.bq = false;
            }
            (_, PieceKind::Rook) => self.castling.clear_rook_square(from),
            _ => {}
        }
        if let Some(cp) = captured
            && cp.kind == PieceKind::Rook
        {
            self.castling.clear_rook_square(to);
        }

        if moved.kind == PieceKind::Pawn && (rank_of(from) - rank_of(to)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Undo {
            captured,
            castling: prev_castling,
            en_passant: prev_ep,
            halfmove_clock: prev_hmc,
            fullmove_number: prev_fmn,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt).expect("castled rook missing");
            self.set_piece(rt, None);
            self.set_piece(rf, Some(rook));
        }

        // The mover goes back as it was, which also reverts promotions.
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn is_promotion_square(pc: Piece, to: u8) -> bool {
    pc.kind == PieceKind::Pawn
        && match pc.color {
            Color::White => rank_of(to) == 7,
            Color::Black => rank_of(to) == 0,
        }
}

/// Rook (from, to) for a king castling between the given squares.
fn castle_rook_squares(c: Color, from: u8, to: u8) -> Option<(u8, u8)> {
    match (c, from, to) {
        (Color::White, 4, 6) => Some((7, 5)),
        (Color::White, 4, 2) => Some((0, 3)),
        (Color::Black, 60, 62) => Some((63, 61)),
        (Color::Black, 60, 58) => Some((56, 59)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
