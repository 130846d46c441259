//! Tuning surface for a search session: depth, TT sizing, book/TT paths,
//! and an optional wall-clock time budget.

use std::path::PathBuf;
use std::time::Duration;

/// Rough number of `TtEntry` slots a hash-map-backed table of `tt_size_mb`
/// megabytes can hold, used only to pre-size the map's initial allocation.
const BYTES_PER_TT_ENTRY: usize = 64;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub search_depth: u32,
    pub tt_size_mb: usize,
    pub max_time: Option<Duration>,
    pub book_path: Option<PathBuf>,
    pub tt_path: Option<PathBuf>,
}

impl EngineConfig {
    pub fn new(search_depth: u32) -> Self {
        EngineConfig { search_depth, ..Self::default() }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.search_depth = depth;
        self
    }

    pub fn with_tt_size_mb(mut self, mb: usize) -> Self {
        self.tt_size_mb = mb;
        self
    }

    pub fn with_max_time(mut self, time: Duration) -> Self {
        self.max_time = Some(time);
        self
    }

    pub fn with_book_path(mut self, path: PathBuf) -> Self {
        self.book_path = Some(path);
        self
    }

    pub fn with_tt_path(mut self, path: PathBuf) -> Self {
        self.tt_path = Some(path);
        self
    }

    pub fn tt_entries_hint(&self) -> usize {
        (self.tt_size_mb * 1024 * 1024) / BYTES_PER_TT_ENTRY
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            search_depth: 4,
            tt_size_mb: 1024,
            max_time: None,
            book_path: None,
            tt_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let cfg = EngineConfig::default().with_depth(6).with_tt_size_mb(16);
        assert_eq!(cfg.search_depth, 6);
        assert_eq!(cfg.tt_size_mb, 16);
        assert!(cfg.max_time.is_none());
    }
}
