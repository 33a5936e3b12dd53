use std::collections::HashMap;

use super::sequence::ReelSequence;
use super::SurfaceKey;

/// Keyed store of generated reel sequences, owned by the scheduler and
/// scoped to the current view session.
///
/// Its sole purpose is stability: a re-render or resize mid-spin reads the
/// cached sequence instead of re-rolling filler, which would make the reel
/// visibly reshuffle in flight. Entries are invalidated only at the start
/// of a new spin.
#[derive(Debug, Default)]
pub struct LayoutCache {
    sequences: HashMap<SurfaceKey, ReelSequence>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: SurfaceKey) -> Option<&ReelSequence> {
        self.sequences.get(&key)
    }

    pub fn set(&mut self, key: SurfaceKey, sequence: ReelSequence) {
        self.sequences.insert(key, sequence);
    }

    pub fn invalidate(&mut self, keys: &[SurfaceKey]) {
        for key in keys {
            self.sequences.remove(key);
        }
    }
}
