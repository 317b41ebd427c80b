use hashbrown::HashSet;
use lifeguard::{Pool, Recycled};
use smol_str::SmolStr;

use crate::constants::{ROW_POOL_SIZE, STACK_CAPACITY};
use crate::index::{PrefixIndex, TrieNode};
use crate::types::{Distance, Row};

#[inline(always)]
fn row_pool() -> Pool<Row> {
    Pool::with_size_and_max(ROW_POOL_SIZE, ROW_POOL_SIZE)
}

/// A node still to be expanded, with the edit-distance row computed for the
/// prefix it spells.
struct Frame<'p, 't> {
    node: &'t TrieNode,
    row: Recycled<'p, Row>,
}

/// One bounded edit-distance walk of a [`PrefixIndex`].
///
/// Rows are drawn from a pool owned by the call and cleared before reuse, so
/// nothing outlives a lookup.
pub(crate) struct LookupWorker<'t> {
    index: &'t PrefixIndex,
    input: Vec<char>,
    threshold: Distance,
}

impl<'t> LookupWorker<'t> {
    #[inline(always)]
    pub(crate) fn new(index: &'t PrefixIndex, word: &str, threshold: Distance) -> LookupWorker<'t> {
        LookupWorker {
            index,
            input: word.chars().collect(),
            threshold,
        }
    }

    /// Row for the empty prefix: `i` insertions reach the first `i` letters.
    #[inline(always)]
    fn start_row<'p>(&self, pool: &'p Pool<Row>) -> Recycled<'p, Row> {
        let mut row = pool.new();
        row.extend(0..=self.input.len() as Distance);
        row
    }

    /// Derives the row of `prefix + letter` from the row of `prefix`, along
    /// with the smallest entry of the new row.
    #[inline(always)]
    fn next_row<'p>(
        &self,
        pool: &'p Pool<Row>,
        previous: &[Distance],
        letter: char,
    ) -> (Recycled<'p, Row>, Distance) {
        let mut row = pool.new();
        let first = previous[0] + 1;
        let mut minimum = first;
        row.push(first);

        for (i, &expected) in self.input.iter().enumerate() {
            let insert_cost = row[i] + 1;
            let delete_cost = previous[i + 1] + 1;
            let replace_cost = if expected == letter {
                previous[i]
            } else {
                previous[i] + 1
            };

            let cost = insert_cost.min(delete_cost).min(replace_cost);
            if cost < minimum {
                minimum = cost;
            }
            row.push(cost);
        }

        (row, minimum)
    }

    #[inline(always)]
    fn is_within_threshold(&self, distance: Distance) -> bool {
        distance <= self.threshold
    }

    /// The root only matches when the empty word is in the dictionary.
    #[inline(always)]
    fn root_match(&self) -> Option<&'t SmolStr> {
        let distance = self.input.len() as Distance;

        self.index
            .root()
            .word
            .as_ref()
            .filter(|_| self.is_within_threshold(distance))
    }

    #[inline(always)]
    fn visit_child<'p>(
        &self,
        pool: &'p Pool<Row>,
        parent_row: &[Distance],
        letter: char,
        child: &'t TrieNode,
        results: &mut HashSet<SmolStr>,
        nodes: &mut Vec<Frame<'p, 't>>,
    ) {
        let (row, minimum) = self.next_row(pool, parent_row, letter);

        if let Some(word) = child.word.as_ref() {
            if self.is_within_threshold(row[self.input.len()]) {
                results.insert(word.clone());
            }
        }

        // Entries never shrink going deeper, so a row with nothing under the
        // threshold rules out the whole subtree.
        if self.is_within_threshold(minimum) && child.has_children() {
            nodes.push(Frame { node: child, row });
        }
    }

    fn walk<'p>(
        &self,
        pool: &'p Pool<Row>,
        nodes: &mut Vec<Frame<'p, 't>>,
        results: &mut HashSet<SmolStr>,
    ) {
        while let Some(frame) = nodes.pop() {
            for (letter, child) in frame.node.children() {
                self.visit_child(pool, &frame.row, letter, child, results, nodes);
            }
        }
    }

    pub(crate) fn neighbors_into(&self, results: &mut HashSet<SmolStr>) {
        log::trace!("neighbors of {:?} within {}", self.input, self.threshold);

        results.clear();

        if let Some(word) = self.root_match() {
            results.insert(word.clone());
        }

        let pool = row_pool();
        let mut nodes = Vec::with_capacity(STACK_CAPACITY);
        nodes.push(Frame {
            node: self.index.root(),
            row: self.start_row(&pool),
        });

        self.walk(&pool, &mut nodes, results);
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn par_neighbors(&self) -> HashSet<SmolStr> {
        use rayon::prelude::*;

        let subtrees: Vec<(char, &'t TrieNode)> = self.index.root().children().collect();

        let mut results = subtrees
            .par_iter()
            .map(|&(letter, child)| {
                let pool = row_pool();
                let mut found = HashSet::new();
                let mut nodes = Vec::with_capacity(STACK_CAPACITY);
                let start_row = self.start_row(&pool);

                self.visit_child(&pool, &start_row, letter, child, &mut found, &mut nodes);
                self.walk(&pool, &mut nodes, &mut found);

                found
            })
            .reduce(HashSet::new, |mut all, found| {
                all.extend(found);
                all
            });

        if let Some(word) = self.root_match() {
            results.insert(word.clone());
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::NeighborLookup;

    fn set(words: &[&str]) -> HashSet<SmolStr> {
        words.iter().map(|w| SmolStr::new(w)).collect()
    }

    /// Every string over "abcd" up to four letters, keeping one in three.
    fn sampled_words() -> Vec<String> {
        let mut words = vec![String::new()];
        let mut layer = vec![String::new()];

        for _ in 0..4 {
            layer = layer
                .iter()
                .flat_map(|prefix| "abcd".chars().map(move |c| format!("{}{}", prefix, c)))
                .collect();
            words.extend(layer.iter().cloned());
        }

        words.into_iter().step_by(3).collect()
    }

    fn brute_force(words: &[String], query: &str, threshold: Distance) -> HashSet<SmolStr> {
        words
            .iter()
            .filter(|w| strsim::levenshtein(query, w) <= threshold as usize)
            .map(|w| SmolStr::new(w))
            .collect()
    }

    #[test]
    fn start_and_next_rows() {
        let index = PrefixIndex::new();
        let worker = LookupWorker::new(&index, "cat", 1);
        let pool = row_pool();

        let start = worker.start_row(&pool);
        assert_eq!(&start[..], &[0, 1, 2, 3]);

        let (c, min) = worker.next_row(&pool, &start, 'c');
        assert_eq!(&c[..], &[1, 0, 1, 2]);
        assert_eq!(min, 0);

        let (co, min) = worker.next_row(&pool, &c, 'o');
        assert_eq!(&co[..], &[2, 1, 1, 2]);
        assert_eq!(min, 1);

        let (cox, min) = worker.next_row(&pool, &co, 'x');
        assert_eq!(&cox[..], &[3, 2, 2, 2]);
        assert_eq!(min, 2);
    }

    #[test]
    fn small_dictionary() {
        let index = PrefixIndex::from_words(["cat", "cot", "cog", "dog", "car"]);

        assert_eq!(index.neighbors("cat", 1), set(&["cat", "cot", "car"]));
        assert_eq!(index.neighbors("cot", 1), set(&["cot", "cat", "cog"]));
        assert_eq!(index.neighbors("cog", 1), set(&["cog", "cot", "dog"]));
        assert_eq!(index.neighbors("dog", 1), set(&["dog", "cog"]));
        assert_eq!(index.neighbors("cat", 0), set(&["cat"]));
    }

    #[test]
    fn insertions_and_deletions() {
        let index = PrefixIndex::from_words(["cause", "causes", "causers", "pause", "clause"]);

        assert_eq!(
            index.neighbors("causes", 1),
            set(&["cause", "causes", "causers"])
        );
        assert_eq!(
            index.neighbors("cause", 1),
            set(&["cause", "causes", "pause", "clause"])
        );
    }

    #[test]
    fn query_outside_dictionary() {
        let index = PrefixIndex::from_words(["cat", "cot", "dog"]);

        assert_eq!(index.neighbors("cit", 1), set(&["cat", "cot"]));
        assert!(index.neighbors("zebra", 1).is_empty());
    }

    #[test]
    fn empty_query() {
        let index = PrefixIndex::from_words(["", "a", "b", "ab"]);

        assert_eq!(index.neighbors("", 1), set(&["", "a", "b"]));
        assert_eq!(index.neighbors("", 0), set(&[""]));
        assert_eq!(index.neighbors("a", 1), set(&["", "a", "b", "ab"]));
    }

    #[test]
    fn empty_index() {
        let index = PrefixIndex::new();

        assert!(index.neighbors("cat", 1).is_empty());
        assert!(index.neighbors("", 3).is_empty());
    }

    #[test]
    fn multibyte_letters_count_once() {
        let index = PrefixIndex::from_words(["café", "cafés", "naïve"]);

        assert_eq!(index.neighbors("cafe", 1), set(&["café"]));
        assert_eq!(index.neighbors("naive", 1), set(&["naïve"]));
    }

    #[test]
    fn buffer_is_cleared_between_calls() {
        let index = PrefixIndex::from_words(["cat", "cot", "dog"]);
        let mut out = HashSet::new();

        index.neighbors_into("cat", 1, &mut out);
        assert_eq!(out, set(&["cat", "cot"]));

        index.neighbors_into("dog", 1, &mut out);
        assert_eq!(out, set(&["dog"]));
    }

    #[test]
    fn matches_brute_force() {
        let words = sampled_words();
        let index = PrefixIndex::from_words(&words);
        let queries = words
            .iter()
            .cloned()
            .chain(["dcba", "abcde", "e", "aaaaa", "bbb"].iter().map(|s| s.to_string()));

        for query in queries {
            for threshold in 0..=2 {
                assert_eq!(
                    index.neighbors(&query, threshold),
                    brute_force(&words, &query, threshold),
                    "query {:?} threshold {}",
                    query,
                    threshold
                );
            }
        }
    }

    #[test]
    fn repeated_queries_agree() {
        let index = PrefixIndex::from_words(sampled_words());

        for query in ["abc", "", "dd", "bcda"] {
            assert_eq!(index.neighbors(query, 1), index.neighbors(query, 1));
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let words = sampled_words();
        let index = PrefixIndex::from_words(&words);

        for query in words.iter().map(String::as_str).chain(["", "zz", "abcde"]) {
            for threshold in 0..=2 {
                assert_eq!(
                    index.par_neighbors(query, threshold),
                    index.neighbors(query, threshold)
                );
            }
        }
    }
}
