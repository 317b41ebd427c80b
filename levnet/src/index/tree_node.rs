//! Nodes of the prefix tree.

use hashbrown::HashMap;
use smol_str::SmolStr;

/// One prefix position in a [`PrefixIndex`](super::PrefixIndex).
///
/// A node holds the dictionary word ending exactly at it, if any, and owns
/// one child per distinct next character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    pub(crate) word: Option<SmolStr>,
    pub(crate) children: HashMap<char, TrieNode>,
}

impl TrieNode {
    /// The word terminating at this node.
    #[inline(always)]
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// Whether a dictionary word ends here.
    #[inline(always)]
    pub fn is_terminal(&self) -> bool {
        self.word.is_some()
    }

    /// The node reached by following `letter`.
    #[inline(always)]
    pub fn child(&self, letter: char) -> Option<&TrieNode> {
        self.children.get(&letter)
    }

    /// Edges leaving this node, in no particular order.
    #[inline(always)]
    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> + '_ {
        self.children.iter().map(|(letter, node)| (*letter, node))
    }

    /// `false` for leaves.
    #[inline(always)]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
