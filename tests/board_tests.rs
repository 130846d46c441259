//! Property-based tests over random legal-move walks from the start
//! position, covering the quantified invariants in §8: bitboard
//! disjointness, fingerprint purity, and apply-move determinism.

use proptest::prelude::*;
use rand::prelude::*;

use castellan::movegen::{generate_moves, generate_pseudo_moves};
use castellan::position::{Color, Position, PIECES};
use castellan::zobrist::fingerprint;

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=30usize
}

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn random_walk(seed: u64, num_moves: usize) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = Position::startpos();
    let mut trail = vec![pos.clone()];
    for _ in 0..num_moves {
        let moves = generate_moves(&pos);
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        pos = pos.apply_move(mv);
        trail.push(pos.clone());
    }
    trail
}

fn assert_disjoint(pos: &Position) {
    let mut seen = 0u64;
    for color in [Color::White, Color::Black] {
        for piece in PIECES {
            let bb = pos.pieces[color.index()][piece.index()];
            assert_eq!(seen & bb, 0, "bitboards must stay pairwise disjoint");
            seen |= bb;
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Invariant 1: every position reached by a random legal-move walk from
    /// the start position keeps its twelve bitboards pairwise disjoint.
    #[test]
    fn prop_bitboards_stay_disjoint(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for pos in random_walk(seed, num_moves) {
            assert_disjoint(&pos);
        }
    }

    /// Invariant 3: the fingerprint is a pure function of the bitboards and
    /// side-to-move — recomputing it for the same position is idempotent,
    /// and two structurally equal positions fingerprint identically.
    #[test]
    fn prop_fingerprint_is_pure(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for pos in random_walk(seed, num_moves) {
            let a = fingerprint(&pos);
            let b = fingerprint(&pos);
            prop_assert_eq!(a, b);

            let clone = Position { pieces: pos.pieces, side_to_move: pos.side_to_move };
            prop_assert_eq!(a, fingerprint(&clone));
        }
    }

    /// Invariant 6: apply_move never mutates its argument.
    #[test]
    fn prop_apply_move_does_not_mutate_input(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pos = Position::startpos();
        for _ in 0..num_moves {
            let moves = generate_moves(&pos);
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            let before = pos.pieces;
            let before_side = pos.side_to_move;
            let _ = pos.apply_move(mv);
            prop_assert_eq!(pos.pieces, before);
            prop_assert_eq!(pos.side_to_move, before_side);
            pos = pos.apply_move(mv);
        }
    }

    /// Invariant 4: for every move in `generate_moves(p)`, none of the
    /// opponent's pseudo-legal replies in the resulting position empties
    /// the mover's king bitboard.
    #[test]
    fn prop_legal_moves_never_leave_mover_in_check(seed in seed_strategy(), num_moves in 1..=8usize) {
        for pos in random_walk(seed, num_moves) {
            let mover = pos.side_to_move;
            for mv in generate_moves(&pos) {
                let next = pos.apply_move(mv);
                for reply in generate_pseudo_moves(&next) {
                    let after_reply = next.apply_move(reply);
                    prop_assert_ne!(after_reply.king_bb(mover), 0, "mover's king must survive its own legal move");
                }
            }
        }
    }
}
