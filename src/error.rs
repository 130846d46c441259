//! Error taxonomy for parse and I/O failures.
//!
//! Search-time conditions (deadline expiry, no-move-found) are not errors;
//! they are absorbed inside the search and always yield a best-effort move.
//! See the engine's design notes for the rationale.

use std::fmt;

#[derive(Clone, Debug)]
pub enum EngineError {
    /// A FEN string could not be parsed. Carries the offending input.
    ParseFen(String),
    /// A UCI-style move string (`e2e4`, `e7e8q`) was malformed.
    ParseMove(String),
    /// A line from the opening book source did not match `<fen> : <move>`.
    ParseBookLine(String),
    /// A line from a persisted transposition-table file was malformed.
    ParseTtLine(String),
    /// Reading or writing the transposition-table file failed.
    TtIo(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ParseFen(s) => write!(f, "invalid FEN: {s}"),
            EngineError::ParseMove(s) => write!(f, "invalid move text: {s}"),
            EngineError::ParseBookLine(s) => write!(f, "invalid opening book line: {s}"),
            EngineError::ParseTtLine(s) => write!(f, "invalid transposition table line: {s}"),
            EngineError::TtIo(s) => write!(f, "transposition table I/O error: {s}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::TtIo(e.to_string())
    }
}
