//! Transposition table persistence: the on-disk record format from §6.
//!
//! One whitespace-separated record per line:
//! `<fingerprint:u64> <depth:u32> <value:i32> <flag:0|1|2> <best-move-text>`.
//! Loading is tolerant of trailing whitespace; storing rewrites the file
//! atomically (write to a `.tmp` sibling, then rename over the target), an
//! improvement on the original's direct overwrite — see DESIGN.md.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::EngineError;
use crate::mv::Move;
use crate::tt::{Bound, TtEntry};

fn bound_to_flag(bound: Bound) -> u8 {
    match bound {
        Bound::Exact => 0,
        Bound::Lower => 1,
        Bound::Upper => 2,
    }
}

fn flag_to_bound(flag: u8) -> Option<Bound> {
    match flag {
        0 => Some(Bound::Exact),
        1 => Some(Bound::Lower),
        2 => Some(Bound::Upper),
        _ => None,
    }
}

/// Loads a persisted table from `path`. Each malformed line is skipped
/// rather than aborting the whole load, since a half-written prior session
/// should degrade gracefully rather than lose every surviving entry.
pub fn load(path: &Path) -> Result<HashMap<u64, TtEntry>, EngineError> {
    let text = fs::read_to_string(path)?;
    let mut entries = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((key, entry)) = parse_line(line) {
            entries.insert(key, entry);
        }
    }
    Ok(entries)
}

fn parse_line(line: &str) -> Option<(u64, TtEntry)> {
    let mut fields = line.split_whitespace();
    let key = fields.next()?.parse::<u64>().ok()?;
    let depth = fields.next()?.parse::<u32>().ok()?;
    let value = fields.next()?.parse::<i32>().ok()?;
    let flag = fields.next()?.parse::<u8>().ok()?;
    let bound = flag_to_bound(flag)?;
    let move_text = fields.next()?;
    let best_move = Move::parse_uci(move_text).ok();
    Some((key, TtEntry { depth, value, bound, best_move }))
}

/// Rewrites `path` from `entries`, atomically: the full contents are
/// written to a sibling `.tmp` file first, then renamed into place, so a
/// crash mid-write never leaves a truncated table on disk.
pub fn store(path: &Path, entries: &HashMap<u64, TtEntry>) -> Result<(), EngineError> {
    let tmp_path = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&tmp_path)?;
        for (key, entry) in entries {
            let move_text = entry.best_move.map(Move::to_uci).unwrap_or_default();
            writeln!(
                file,
                "{} {} {} {} {}",
                key,
                entry.depth,
                entry.value,
                bound_to_flag(entry.bound),
                move_text
            )?;
        }
        file.flush()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile_like::temp_file_path;

    mod tempfile_like {
        use std::path::PathBuf;
        use std::sync::atomic::{AtomicU64, Ordering};

        static COUNTER: AtomicU64 = AtomicU64::new(0);

        pub fn temp_file_path(tag: &str) -> PathBuf {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            std::env::temp_dir().join(format!("castellan-tt-test-{tag}-{}-{n}.tt", std::process::id()))
        }
    }

    #[test]
    fn round_trips_entries_through_a_file() {
        let path = temp_file_path("roundtrip");
        let mut entries = HashMap::new();
        entries.insert(
            123u64,
            TtEntry {
                depth: 5,
                value: -42,
                bound: Bound::Lower,
                best_move: Some(Move::parse_uci("e2e4").unwrap()),
            },
        );
        store(&path, &entries).unwrap();
        let loaded = load(&path).unwrap();
        let _ = fs::remove_file(&path);

        let entry = loaded.get(&123).unwrap();
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.value, -42);
        assert!(matches!(entry.bound, Bound::Lower));
        assert_eq!(entry.best_move.unwrap().to_uci(), "e2e4");
    }

    #[test]
    fn load_is_tolerant_of_trailing_whitespace() {
        let path = temp_file_path("trailing-ws");
        fs::write(&path, "1 2 3 0 e2e4   \n\n  \n").unwrap();
        let loaded = load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn load_skips_malformed_lines() {
        let path = temp_file_path("malformed");
        fs::write(&path, "not a valid line\n1 2 3 0 e2e4\n").unwrap();
        let loaded = load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.len(), 1);
    }
}
