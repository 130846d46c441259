//! Fixed-depth alpha-beta minimax over the position representation in
//! [`crate::position`], move-ordered by [`crate::heuristics`] and backed by
//! [`crate::tt`].
//!
//! The evaluator already returns a side-to-move-relative score, so the
//! search is a pure maximizer that flips its boolean at each ply rather
//! than a negamax wrapper — see the design notes for the rationale.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::eval::evaluate;
use crate::heuristics::{order_moves, Heuristics};
use crate::movegen::generate_moves;
use crate::mv::Move;
use crate::position::Position;
use crate::tt::{Bound, Probe, TranspositionTable, TtEntry};
use crate::zobrist::fingerprint;

/// A shared deadline consulted at every `minimax` entry. Once `max_time`
/// has elapsed since `start`, a recursing thread abandons the remainder of
/// its subtree and returns the static evaluation of whatever position it
/// is holding — a best-effort partial result, not an error.
#[derive(Clone, Copy)]
pub struct Deadline {
    start: Instant,
    max_time: Option<Duration>,
}

impl Deadline {
    pub fn none() -> Self {
        Deadline { start: Instant::now(), max_time: None }
    }

    pub fn from_now(max_time: Option<Duration>) -> Self {
        Deadline { start: Instant::now(), max_time }
    }

    pub fn expired(&self) -> bool {
        match self.max_time {
            Some(budget) => self.start.elapsed() >= budget,
            None => false,
        }
    }
}

/// Alpha-beta minimax. `depth` is the remaining search depth (it also
/// indexes the killer table, matching the original implementation this is
/// grounded on); `maximizing` is seeded `true` at the root since
/// `evaluate` is already side-relative.
pub fn minimax(
    pos: &Position,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    tt: &TranspositionTable,
    heuristics: &Mutex<Heuristics>,
    deadline: &Deadline,
) -> i32 {
    if deadline.expired() {
        return evaluate(pos);
    }

    let key = fingerprint(pos);
    match tt.probe(key, depth, alpha, beta) {
        Probe::Cutoff(value) => return value,
        Probe::Tightened { alpha: a, beta: b } => {
            alpha = a;
            beta = b;
        }
        Probe::Miss => {}
    }

    if depth == 0 {
        return evaluate(pos);
    }

    let mut moves = generate_moves(pos);
    let tt_hint = tt.hint_move(key);
    {
        let guard = heuristics.lock();
        order_moves(&guard, &mut moves, depth as usize, tt_hint);
    }

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for m in moves {
        let child = pos.apply_move(m);
        let value = minimax(&child, depth - 1, alpha, beta, !maximizing, tt, heuristics, deadline);
        if maximizing {
            best = best.max(value);
            alpha = alpha.max(best);
        } else {
            best = best.min(value);
            beta = beta.min(best);
        }
        if beta <= alpha {
            heuristics.lock().record_cutoff(depth as usize, depth, m);
            break;
        }
    }
    best
}

/// Probes and stores at the root only, per §4.4/§9: interior nodes never
/// write the table, so the TT-monotone property holds exactly.
pub fn store_root_entry(tt: &TranspositionTable, pos: &Position, depth: u32, value: i32, best_move: Move) {
    let key = fingerprint(pos);
    tt.store(key, TtEntry { depth, value, bound: Bound::Exact, best_move: Some(best_move) });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_returns_the_static_evaluation() {
        let pos = Position::startpos();
        let tt = TranspositionTable::new();
        let heuristics = Mutex::new(Heuristics::new(8));
        let value = minimax(&pos, 0, i32::MIN, i32::MAX, true, &tt, &heuristics, &Deadline::none());
        assert_eq!(value, evaluate(&pos));
    }

    #[test]
    fn an_expired_deadline_short_circuits_to_the_static_evaluation() {
        let pos = Position::startpos();
        let tt = TranspositionTable::new();
        let heuristics = Mutex::new(Heuristics::new(8));
        let deadline = Deadline::from_now(Some(Duration::from_secs(0)));
        std::thread::sleep(Duration::from_millis(5));
        let value = minimax(&pos, 4, i32::MIN, i32::MAX, true, &tt, &heuristics, &deadline);
        assert_eq!(value, evaluate(&pos));
    }

    #[test]
    fn lone_kings_search_to_a_finite_non_mate_value() {
        let pos = Position::from_fen("8/8/8/4k3/8/8/8/4K3 w").unwrap();
        let tt = TranspositionTable::new();
        let heuristics = Mutex::new(Heuristics::new(8));
        let value = minimax(&pos, 2, i32::MIN, i32::MAX, true, &tt, &heuristics, &Deadline::none());
        assert!(value.abs() < crate::eval::CHECKMATE);
    }
}
