//! Zobrist hashing for chess positions.
//!
//! Provides a 64-bit position fingerprint for the transposition table and
//! the opening book. Tables are generated once, deterministically, from a
//! fixed seed so that fingerprints are stable across processes.

use rand::prelude::*;

use crate::position::{Color, Piece, Position, PIECES};

/// Fixed seed for the Zobrist key PRNG. Chosen once, never re-derived —
/// fingerprints must be reproducible across runs.
const ZOBRIST_SEED: u64 = 915378694376;

struct ZobristKeys {
    // piece_keys[color][piece][square]
    piece_keys: [[[u64; 64]; 6]; 2],
    side_to_move_key: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_keys = [[[0u64; 64]; 6]; 2];
        for color in piece_keys.iter_mut() {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        let side_to_move_key = rng.gen();
        ZobristKeys { piece_keys, side_to_move_key }
    }
}

static ZOBRIST: once_cell::sync::Lazy<ZobristKeys> = once_cell::sync::Lazy::new(ZobristKeys::new);

/// Computes the Zobrist fingerprint of `pos` from scratch.
pub fn fingerprint(pos: &Position) -> u64 {
    let mut hash = 0u64;
    for color in [Color::White, Color::Black] {
        for piece in PIECES {
            let mut bb = pos.pieces[color.index()][piece.index()];
            while bb != 0 {
                let sq = bb.trailing_zeros() as usize;
                hash ^= ZOBRIST.piece_keys[color.index()][piece.index()][sq];
                bb &= bb - 1;
            }
        }
    }
    if pos.side_to_move == Color::White {
        hash ^= ZOBRIST.side_to_move_key;
    }
    hash
}
