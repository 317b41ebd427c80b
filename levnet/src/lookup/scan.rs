//! Neighbor lookup by direct comparison, restricted to plausible lengths.
//!
//! Two words within `t` edits differ in length by at most `t`, so a query of
//! length `m` only has to be compared against words of length `m - t ..= m + t`.

use hashbrown::HashSet;
use smol_str::SmolStr;

use super::NeighborLookup;
use crate::dictionary::Dictionary;
use crate::types::Distance;

/// Dictionary words grouped by their length in `char`s.
#[derive(Debug, Clone, Default)]
pub struct LengthBuckets {
    buckets: Vec<Vec<SmolStr>>,
    members: HashSet<SmolStr>,
}

impl LengthBuckets {
    /// Buckets every distinct word of `words`.
    pub fn from_words<I, S>(words: I) -> LengthBuckets
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = LengthBuckets::default();

        for word in words {
            let word = SmolStr::new(word.as_ref());

            if !index.members.insert(word.clone()) {
                continue;
            }

            let length = word.chars().count();
            if index.buckets.len() <= length {
                index.buckets.resize_with(length + 1, Vec::new);
            }
            index.buckets[length].push(word);
        }

        log::debug!(
            "built length buckets: {} words, longest {}",
            index.members.len(),
            index.buckets.len().saturating_sub(1)
        );

        index
    }

    /// Words of exactly `length` characters.
    pub fn bucket(&self, length: usize) -> &[SmolStr] {
        self.buckets.get(length).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl NeighborLookup for LengthBuckets {
    fn neighbors_into(&self, word: &str, threshold: Distance, out: &mut HashSet<SmolStr>) {
        out.clear();

        let threshold = threshold as usize;
        let length = word.chars().count();
        let shortest = length.saturating_sub(threshold);
        let longest = length.saturating_add(threshold);

        let candidates = self
            .buckets
            .iter()
            .enumerate()
            .skip(shortest)
            .take_while(|(len, _)| *len <= longest)
            .flat_map(|(_, bucket)| bucket.iter());

        for candidate in candidates {
            if strsim::levenshtein(word, candidate) <= threshold {
                out.insert(candidate.clone());
            }
        }
    }

    #[inline]
    fn contains(&self, word: &str) -> bool {
        self.members.contains(word)
    }

    #[inline]
    fn len(&self) -> usize {
        self.members.len()
    }
}

impl<S: AsRef<str>> FromIterator<S> for LengthBuckets {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> LengthBuckets {
        LengthBuckets::from_words(iter)
    }
}

impl From<&Dictionary> for LengthBuckets {
    fn from(dictionary: &Dictionary) -> LengthBuckets {
        LengthBuckets::from_words(dictionary.iter())
    }
}
