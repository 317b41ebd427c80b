//! Prefix tree over a dictionary.

use hashbrown::hash_map::Entry;
use smol_str::SmolStr;

use crate::dictionary::Dictionary;

pub mod tree_node;

pub use self::tree_node::TrieNode;

/// A trie over every word of a dictionary.
///
/// Built once, then only read. Construction walks each word one `char` at a
/// time, so the cost is linear in the total number of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixIndex {
    root: TrieNode,
    len: usize,
    node_count: usize,
}

impl PrefixIndex {
    /// An index holding no words, just the root.
    pub fn new() -> PrefixIndex {
        PrefixIndex {
            root: TrieNode::default(),
            len: 0,
            node_count: 1,
        }
    }

    /// Builds an index holding every word of `words`.
    pub fn from_words<I, S>(words: I) -> PrefixIndex
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = PrefixIndex::new();

        for word in words {
            index.insert(word.as_ref());
        }

        log::debug!(
            "built prefix index: {} words, {} nodes",
            index.len,
            index.node_count
        );

        index
    }

    /// Adds `word`, returning `false` if it was already present.
    ///
    /// The empty word marks the root itself as terminal.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut node = &mut self.root;

        for letter in word.chars() {
            node = match node.children.entry(letter) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    self.node_count += 1;
                    entry.insert(TrieNode::default())
                }
            };
        }

        if node.word.is_some() {
            return false;
        }

        node.word = Some(SmolStr::new(word));
        self.len += 1;
        true
    }

    /// Exact lookup, returning the stored word.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.find_node(word).and_then(TrieNode::word)
    }

    /// Whether `word` was inserted.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Number of distinct words.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no word, not even the empty one, was inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes, the root included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// The node of the empty prefix.
    #[inline(always)]
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    fn find_node(&self, word: &str) -> Option<&TrieNode> {
        word.chars()
            .try_fold(&self.root, |node, letter| node.child(letter))
    }
}

impl Default for PrefixIndex {
    fn default() -> PrefixIndex {
        PrefixIndex::new()
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> PrefixIndex {
        PrefixIndex::from_words(iter)
    }
}

impl From<&Dictionary> for PrefixIndex {
    fn from(dictionary: &Dictionary) -> PrefixIndex {
        PrefixIndex::from_words(dictionary.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_word<'a>(index: &'a PrefixIndex, word: &str) -> Option<&'a str> {
        let mut node = index.root();
        for letter in word.chars() {
            node = node.child(letter)?;
        }
        node.word()
    }

    #[test]
    fn every_word_has_its_path() {
        let words = ["causes", "cause", "caused", "clause", "a", "an", "and"];
        let index = PrefixIndex::from_words(words);

        for word in words {
            assert_eq!(path_word(&index, word), Some(word));
        }
        assert_eq!(index.len(), words.len());
    }

    #[test]
    fn prefixes_are_not_words() {
        let index = PrefixIndex::from_words(["causes"]);

        assert!(index.contains("causes"));
        assert!(!index.contains("cause"));
        assert!(!index.contains("causess"));
        assert!(!index.contains(""));
    }

    #[test]
    fn duplicates_are_idempotent() {
        let mut index = PrefixIndex::from_words(["dog", "dog", "dot"]);

        assert_eq!(index.len(), 2);
        assert!(!index.insert("dog"));
        assert!(index.insert("do"));
        assert_eq!(index.len(), 3);
        // root, d, o, g, t
        assert_eq!(index.node_count(), 5);
    }

    #[test]
    fn empty_word_marks_root() {
        let index = PrefixIndex::from_words([""]);

        assert!(index.root().is_terminal());
        assert_eq!(index.get(""), Some(""));
        assert_eq!(index.node_count(), 1);
        assert!(!index.root().has_children());
    }

    #[test]
    fn empty_dictionary() {
        let index = PrefixIndex::from_words(Vec::<String>::new());

        assert!(index.is_empty());
        assert!(!index.root().is_terminal());
        assert!(!index.root().has_children());
    }

    #[test]
    fn multibyte_letters_are_single_edges() {
        let index = PrefixIndex::from_words(["café", "cafe"]);

        assert_eq!(index.get("café"), Some("café"));
        // root, c, a, f, é, e
        assert_eq!(index.node_count(), 6);
    }

    #[test]
    fn collects_from_dictionary() {
        let dictionary = Dictionary::parse("cat\ncot  cog\tdog\n");
        let index = PrefixIndex::from(&dictionary);

        assert_eq!(index.len(), 4);
        assert!(index.contains("cog"));
    }
}
