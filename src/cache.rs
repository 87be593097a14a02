//! Line-solve memoization cache.
//!
//! An unbounded key/value store shaped like the teacher's `UnboundCache`
//! (`examples/tsionyx-nonogrid/src/cache.rs`, itself a hashbrown-backed
//! copy of the `cached` crate's `UnboundCache`), specialized here to the
//! one thing this crate caches: a line's state before a solve pass keyed
//! against its state after, so re-running the line analyzer on a partial
//! line already seen on a sibling backtracking branch is avoided. Kept
//! independent of the `cached` crate so the cache key can be
//! `(bool, usize, Vec<CellState>)` without pulling in its trait.

use hashbrown::HashMap;

use crate::cell::CellState;

/// `(is_column, line index, line snapshot before the solve pass)`.
pub type LineKey = (bool, usize, Vec<CellState>);

/// `None` means the snapshot is a contradiction: no run placement
/// exists. `Some(after)` is the line's state once the analyzer and
/// info-adder have both run to a fixed point.
pub type LineResult = Option<Vec<CellState>>;

#[derive(Debug, Default)]
pub struct LineCache {
    store: HashMap<LineKey, LineResult>,
    hits: u32,
    misses: u32,
}

impl LineCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: &LineKey) -> Option<&LineResult> {
        match self.store.get(key) {
            Some(result) => {
                self.hits += 1;
                Some(result)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: LineKey, result: LineResult) {
        self.store.insert(key, result);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }
}
