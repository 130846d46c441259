//! Minimal single-shot CLI front-end: `castellan "<fen>" <depth> [-tt <path>]
//! [-book <path>] [-movetime <ms>]`. Prints the chosen move and exits 0, or
//! prints a usage error to stderr and exits 1.
//!
//! This bin is intentionally thin — an interactive REPL is out of scope
//! (see §1 of the design notes); everything it does is a direct call into
//! [`castellan::root::find_best_move`].

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use parking_lot::Mutex;

use castellan::book::Book;
use castellan::config::EngineConfig;
use castellan::heuristics::Heuristics;
use castellan::position::Position;
use castellan::root::find_best_move;
use castellan::tt::TranspositionTable;
use castellan::tt_io;

fn usage() -> &'static str {
    "usage: castellan <fen> <depth> [-tt <path>] [-book <path>] [-movetime <ms>]"
}

struct Args {
    fen: String,
    depth: u32,
    tt_path: Option<PathBuf>,
    book_path: Option<PathBuf>,
    movetime: Option<Duration>,
}

fn parse_args(raw: &[String]) -> Option<Args> {
    let mut iter = raw.iter();
    let fen = iter.next()?.clone();
    let depth: u32 = iter.next()?.parse().ok()?;
    let mut tt_path = None;
    let mut book_path = None;
    let mut movetime = None;
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "-tt" => tt_path = Some(PathBuf::from(iter.next()?)),
            "-book" => book_path = Some(PathBuf::from(iter.next()?)),
            "-movetime" => movetime = Some(Duration::from_millis(iter.next()?.parse().ok()?)),
            _ => return None,
        }
    }
    Some(Args { fen, depth, tt_path, book_path, movetime })
}

fn main() -> ExitCode {
    env_logger::init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = parse_args(&raw) else {
        eprintln!("{}", usage());
        return ExitCode::FAILURE;
    };

    let pos = match Position::from_fen(&args.fen) {
        Ok(pos) => pos,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = EngineConfig::new(args.depth);
    if let Some(path) = args.movetime {
        config = config.with_max_time(path);
    }
    if let Some(path) = &args.tt_path {
        config = config.with_tt_path(path.clone());
    }

    let tt = TranspositionTable::with_capacity(config.tt_entries_hint());
    if let Some(tt_path) = &args.tt_path {
        match tt_io::load(tt_path) {
            Ok(entries) => tt.load_entries(entries),
            Err(e) => log::warn!("failed to load transposition table from {}: {e}", tt_path.display()),
        }
    }

    let book = match &args.book_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => match Book::parse(&text) {
                Ok(book) => Some(book),
                Err(e) => {
                    eprintln!("{e}");
                    return ExitCode::FAILURE;
                }
            },
            Err(e) => {
                eprintln!("could not read book file {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Some(Book::embedded()),
    };

    let heuristics = Mutex::new(Heuristics::new(args.depth as usize + 1));

    match find_best_move(&pos, &config, &tt, &heuristics, book.as_ref()) {
        Some(mv) => {
            println!("{}", mv.to_uci());
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("no legal moves in this position");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fen_depth_and_flags() {
        let raw: Vec<String> = ["rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w", "4", "-movetime", "500"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let args = parse_args(&raw).unwrap();
        assert_eq!(args.depth, 4);
        assert_eq!(args.movetime, Some(Duration::from_millis(500)));
    }

    #[test]
    fn rejects_missing_depth() {
        let raw: Vec<String> = vec!["rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w".to_string()];
        assert!(parse_args(&raw).is_none());
    }
}
