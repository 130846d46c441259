//! Root driver: book short-circuit, then root-level parallel search over
//! batches of top-level moves.

use parking_lot::Mutex;

use crate::book::Book;
use crate::config::EngineConfig;
use crate::heuristics::{order_moves, Heuristics};
use crate::movegen::generate_moves;
use crate::mv::Move;
use crate::position::Position;
use crate::search::{minimax, store_root_entry, Deadline};
use crate::tt::TranspositionTable;
use crate::{tt_io, zobrist};

/// Batch width: the degree of root-level parallelism. At least 2, so a
/// single-core host still gets some overlap between the deadline check and
/// move evaluation.
fn batch_width() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(2).max(2)
}

/// Finds a move to play from `pos`. Returns `None` only if `pos` has no
/// legal moves (checkmate/stalemate; this engine does not special-case
/// either, per the Non-goals, but must not panic on them).
pub fn find_best_move(
    pos: &Position,
    config: &EngineConfig,
    tt: &TranspositionTable,
    heuristics: &Mutex<Heuristics>,
    book: Option<&Book>,
) -> Option<Move> {
    if let Some(book) = book {
        if let Some(mv) = book.lookup(pos) {
            log::debug!("book hit: playing {}", mv.to_uci());
            return Some(mv);
        }
    }

    let mut root_moves = generate_moves(pos);
    if root_moves.is_empty() {
        return None;
    }
    {
        let guard = heuristics.lock();
        order_moves(&guard, &mut root_moves, config.search_depth as usize, tt.hint_move(zobrist::fingerprint(pos)));
    }

    let deadline = Deadline::from_now(config.max_time);
    let depth = config.search_depth;

    let mut best_move = root_moves[0];
    let mut best_score = i32::MIN;
    let mut any_scored = false;

    for batch in root_moves.chunks(batch_width()) {
        let scores: Vec<i32> = std::thread::scope(|scope| {
            let handles: Vec<_> = batch
                .iter()
                .map(|&m| {
                    let child = pos.apply_move(m);
                    scope.spawn(move || minimax(&child, depth, i32::MIN, i32::MAX, false, tt, heuristics, &deadline))
                })
                .collect();
            handles.into_iter().map(|h| h.join().expect("search worker thread panicked")).collect()
        });

        for (&m, score) in batch.iter().zip(scores) {
            if !any_scored || score > best_score {
                best_score = score;
                best_move = m;
                any_scored = true;
            }
        }
    }

    store_root_entry(tt, pos, depth, best_score, best_move);
    if let Some(tt_path) = &config.tt_path {
        if let Err(e) = tt_io::store(tt_path, &tt.snapshot()) {
            log::warn!("failed to persist transposition table to {}: {e}", tt_path.display());
        }
    }

    log::info!("chosen move {} (score {best_score})", best_move.to_uci());
    Some(best_move)
}
