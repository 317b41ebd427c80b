//! Neighbor lookup: every dictionary word within an edit-distance threshold.

use hashbrown::HashSet;
use smol_str::SmolStr;

use self::worker::LookupWorker;
use crate::index::PrefixIndex;
use crate::types::Distance;

pub mod scan;
mod worker;

/// Finds the dictionary words within a bounded edit distance of a word.
///
/// [`PrefixIndex`] is the reference implementation; [`scan::LengthBuckets`]
/// answers the same queries by direct comparison.
pub trait NeighborLookup {
    /// Clears `out`, then fills it with every word at most `threshold` edits
    /// away from `word`. A word present in the dictionary is its own neighbor.
    ///
    /// `out` is borrowed mutably for the whole call, so a buffer reused across
    /// calls can never be observed by two lookups at once.
    fn neighbors_into(&self, word: &str, threshold: Distance, out: &mut HashSet<SmolStr>);

    /// Like [`neighbors_into`](NeighborLookup::neighbors_into), into a fresh set.
    fn neighbors(&self, word: &str, threshold: Distance) -> HashSet<SmolStr> {
        let mut out = HashSet::new();
        self.neighbors_into(word, threshold, &mut out);
        out
    }

    /// Whether `word` is in the dictionary.
    fn contains(&self, word: &str) -> bool;

    /// Number of distinct dictionary words.
    fn len(&self) -> usize;

    /// Whether the dictionary is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NeighborLookup for PrefixIndex {
    #[inline]
    fn neighbors_into(&self, word: &str, threshold: Distance, out: &mut HashSet<SmolStr>) {
        LookupWorker::new(self, word, threshold).neighbors_into(out);
    }

    #[inline]
    fn contains(&self, word: &str) -> bool {
        PrefixIndex::contains(self, word)
    }

    #[inline]
    fn len(&self) -> usize {
        PrefixIndex::len(self)
    }
}

impl PrefixIndex {
    /// Splits the walk across the rayon pool, one task per first letter.
    ///
    /// Returns the same set as [`NeighborLookup::neighbors`].
    #[cfg(feature = "parallel")]
    pub fn par_neighbors(&self, word: &str, threshold: Distance) -> HashSet<SmolStr> {
        LookupWorker::new(self, word, threshold).par_neighbors()
    }
}

/// Every word of `index` at most `threshold` edits away from `query`.
pub fn find_neighbors(query: &str, threshold: Distance, index: &PrefixIndex) -> HashSet<SmolStr> {
    index.neighbors(query, threshold)
}
