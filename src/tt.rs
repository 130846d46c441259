//! Transposition table: a Zobrist-fingerprint-keyed cache of search results.
//!
//! Keyed by the full 64-bit fingerprint rather than a direct-mapped array
//! slot, so a probe never has to disambiguate two positions that happen to
//! collide on a smaller index — the monotone-probe property (depth
//! requirement ⇒ consistent hit/miss) holds exactly. Guarded by a single
//! `parking_lot::Mutex`: root-only parallelism makes a striped or lock-free
//! map unnecessary (see §5 of the design notes).

use parking_lot::Mutex;
use std::collections::HashMap;

use crate::mv::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub depth: u32,
    pub value: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

/// The outcome of a probe against the running alpha-beta window: either the
/// entry was too shallow or gave no immediate answer (`None`), or it did
/// (`Cutoff`), or it only tightened the window in place (`Tightened`).
pub enum Probe {
    Miss,
    Cutoff(i32),
    Tightened { alpha: i32, beta: i32 },
}

pub struct TranspositionTable {
    entries: Mutex<HashMap<u64, TtEntry>>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        TranspositionTable { entries: Mutex::new(HashMap::new()) }
    }

    pub fn with_capacity(entries_hint: usize) -> Self {
        TranspositionTable { entries: Mutex::new(HashMap::with_capacity(entries_hint)) }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Probes the table for `key` against `current_depth, alpha, beta`, per
    /// §4.4: an exact entry at sufficient depth answers outright; a bound
    /// entry tightens the window and may still cause a cutoff.
    pub fn probe(&self, key: u64, current_depth: u32, mut alpha: i32, mut beta: i32) -> Probe {
        let entries = self.entries.lock();
        let Some(entry) = entries.get(&key) else {
            return Probe::Miss;
        };
        if entry.depth < current_depth {
            return Probe::Miss;
        }
        match entry.bound {
            Bound::Exact => return Probe::Cutoff(entry.value),
            Bound::Lower => alpha = alpha.max(entry.value),
            Bound::Upper => beta = beta.min(entry.value),
        }
        if alpha >= beta {
            return Probe::Cutoff(entry.value);
        }
        Probe::Tightened { alpha, beta }
    }

    /// Returns the hint move stored for `key`, if any, used to try the
    /// previously-best move first during move ordering.
    pub fn hint_move(&self, key: u64) -> Option<Move> {
        self.entries.lock().get(&key).and_then(|e| e.best_move)
    }

    /// Stores `entry` for `key`. Collisions overwrite (last writer wins).
    pub fn store(&self, key: u64, entry: TtEntry) {
        self.entries.lock().insert(key, entry);
    }

    pub fn snapshot(&self) -> HashMap<u64, TtEntry> {
        self.entries.lock().clone()
    }

    pub fn load_entries(&self, entries: HashMap<u64, TtEntry>) {
        *self.entries.lock() = entries;
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_on_empty_table() {
        let tt = TranspositionTable::new();
        assert!(matches!(tt.probe(1, 4, -1000, 1000), Probe::Miss));
    }

    #[test]
    fn exact_entry_at_sufficient_depth_is_a_cutoff() {
        let tt = TranspositionTable::new();
        tt.store(42, TtEntry { depth: 4, value: 17, bound: Bound::Exact, best_move: None });
        assert!(matches!(tt.probe(42, 4, -1000, 1000), Probe::Cutoff(17)));
    }

    #[test]
    fn higher_depth_requirement_misses_a_shallower_entry() {
        let tt = TranspositionTable::new();
        tt.store(7, TtEntry { depth: 2, value: 3, bound: Bound::Exact, best_move: None });
        assert!(matches!(tt.probe(7, 2, -1000, 1000), Probe::Cutoff(_)));
        assert!(matches!(tt.probe(7, 5, -1000, 1000), Probe::Miss));
    }

    #[test]
    fn collisions_overwrite_last_writer_wins() {
        let tt = TranspositionTable::new();
        tt.store(1, TtEntry { depth: 1, value: 10, bound: Bound::Exact, best_move: None });
        tt.store(1, TtEntry { depth: 1, value: 20, bound: Bound::Exact, best_move: None });
        assert!(matches!(tt.probe(1, 1, -1000, 1000), Probe::Cutoff(20)));
    }
}
