//! Position representation: twelve piece bitboards plus side-to-move.
//!
//! A position has no castling rights, no en-passant square, and no move
//! clock. `apply_move` is a pure function: it never mutates its argument.

use crate::error::EngineError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const PIECES: [Piece; 6] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

impl Piece {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Piece::Pawn => 0,
            Piece::Knight => 1,
            Piece::Bishop => 2,
            Piece::Rook => 3,
            Piece::Queen => 4,
            Piece::King => 5,
        }
    }

    #[inline]
    pub fn from_index(idx: usize) -> Piece {
        PIECES[idx]
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// A position: twelve bitboards indexed `[color][piece]`, plus side-to-move.
#[derive(Clone, Debug)]
pub struct Position {
    pub pieces: [[u64; 6]; 2],
    pub side_to_move: Color,
}

impl Position {
    /// The standard chess starting position.
    pub fn startpos() -> Self {
        Self::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").expect("startpos FEN is valid")
    }

    /// Occupancy bitboard for a single color.
    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.pieces[color.index()].iter().fold(0, |acc, bb| acc | bb)
    }

    #[inline]
    pub fn occupancy_all(&self) -> u64 {
        self.occupancy(Color::White) | self.occupancy(Color::Black)
    }

    /// The piece and color occupying `sq`, if any.
    pub fn piece_at(&self, sq: u8) -> Option<(Color, Piece)> {
        let bit = 1u64 << sq;
        for color in [Color::White, Color::Black] {
            for piece in PIECES {
                if self.pieces[color.index()][piece.index()] & bit != 0 {
                    return Some((color, piece));
                }
            }
        }
        None
    }

    /// Bitboard of the king belonging to `color`.
    #[inline]
    pub fn king_bb(&self, color: Color) -> u64 {
        self.pieces[color.index()][Piece::King.index()]
    }

    /// Total non-king piece count across both sides, used for the endgame test.
    pub fn non_king_piece_count(&self) -> u32 {
        let mut total = 0u32;
        for color in [Color::White, Color::Black] {
            for piece in PIECES {
                if piece != Piece::King {
                    total += self.pieces[color.index()][piece.index()].count_ones();
                }
            }
        }
        total
    }

    /// Applies `m` and returns the resulting position. Does not check legality.
    pub fn apply_move(&self, m: crate::mv::Move) -> Position {
        let mut pieces = self.pieces;
        let from_mask = 1u64 << m.from;
        let to_mask = 1u64 << m.to;
        let mover = self.side_to_move;
        let opponent = mover.opposite();

        // A captured piece (if any) is removed from every opposing bitboard;
        // at most one will ever have the bit set.
        for piece in PIECES {
            pieces[opponent.index()][piece.index()] &= !to_mask;
        }

        let moved_piece = PIECES
            .into_iter()
            .find(|p| pieces[mover.index()][p.index()] & from_mask != 0);
        debug_assert!(
            moved_piece.is_some(),
            "apply_move requires a piece belonging to {mover:?} on the from-square"
        );
        let moved_piece = moved_piece.unwrap_or(Piece::Pawn);

        pieces[mover.index()][moved_piece.index()] &= !from_mask;
        let landing_piece = if moved_piece == Piece::Pawn {
            m.promotion.unwrap_or(Piece::Pawn)
        } else {
            moved_piece
        };
        pieces[mover.index()][landing_piece.index()] |= to_mask;

        Position {
            pieces,
            side_to_move: opponent,
        }
    }

    /// Parses the board-placement and side-to-move FEN fields. Any further
    /// fields are accepted and ignored.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let mut parts = fen.split_whitespace();
        let placement = parts
            .next()
            .ok_or_else(|| EngineError::ParseFen(fen.to_string()))?;
        let side = parts.next().unwrap_or("w");

        let mut pieces = [[0u64; 6]; 2];
        for (rank_from_top, rank_str) in placement.split('/').enumerate() {
            if rank_from_top >= 8 {
                break;
            }
            let rank = 7 - rank_from_top as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file = file.saturating_add(digit as u8);
                    continue;
                }
                if file >= 8 {
                    continue;
                }
                if let Some((color, piece)) = char_to_piece(c) {
                    let sq = crate::bits::square_of(rank, file);
                    pieces[color.index()][piece.index()] |= 1u64 << sq;
                }
                file += 1;
            }
        }

        let side_to_move = if side.starts_with('b') { Color::Black } else { Color::White };

        // A FEN that omits a king (illegal chess, but the parser is total)
        // gets one placed on that side's e-file starting square.
        if pieces[Color::White.index()][Piece::King.index()] == 0 {
            pieces[Color::White.index()][Piece::King.index()] = 1u64 << crate::bits::square_of(0, 4);
        }
        if pieces[Color::Black.index()][Piece::King.index()] == 0 {
            pieces[Color::Black.index()][Piece::King.index()] = 1u64 << crate::bits::square_of(7, 4);
        }

        Ok(Position { pieces, side_to_move })
    }

    /// Emits the board-placement and side-to-move FEN fields. The inverse of
    /// `from_fen` on positions produced by it.
    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank_from_top in 0..8u8 {
            let rank = 7 - rank_from_top;
            let mut empty_run = 0u8;
            for file in 0..8u8 {
                let sq = crate::bits::square_of(rank, file);
                match self.piece_at(sq) {
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            out.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        out.push(piece_to_char(color, piece));
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                out.push_str(&empty_run.to_string());
            }
            if rank_from_top != 7 {
                out.push('/');
            }
        }
        out.push(' ');
        out.push(if self.side_to_move == Color::White { 'w' } else { 'b' });
        out
    }
}

fn char_to_piece(c: char) -> Option<(Color, Piece)> {
    let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
    let piece = match c.to_ascii_lowercase() {
        'p' => Piece::Pawn,
        'n' => Piece::Knight,
        'b' => Piece::Bishop,
        'r' => Piece::Rook,
        'q' => Piece::Queen,
        'k' => Piece::King,
        _ => return None,
    };
    Some((color, piece))
}

fn piece_to_char(color: Color, piece: Piece) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    if color == Color::White {
        c.to_ascii_uppercase()
    } else {
        c
    }
}
