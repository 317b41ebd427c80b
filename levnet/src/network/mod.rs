//! Breadth-first discovery of a word's network.

use std::collections::VecDeque;
use std::io::Read;
use std::sync::Arc;

use hashbrown::HashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize, Serializer};
use smol_str::SmolStr;

use crate::constants::DEFAULT_THRESHOLD;
use crate::lookup::NeighborLookup;
use crate::types::Distance;

/// Whether a word counts as its own friend.
///
/// Only [`NetworkDiscoverer::friends_of`] can tell the difference: a network
/// always holds its seed, and every other member was reached from a distinct
/// word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelfMatch {
    /// A word is never reported among its own friends
    Exclude,
    /// A dictionary word is reported among its own friends
    Include,
}

/// Settings for one discovery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Maximum edit distance between two friends
    #[serde(default = "default_threshold")]
    pub threshold: Distance,
    /// Whether a word is its own friend
    #[serde(default = "default_self_matches")]
    pub self_matches: SelfMatch,
}

fn default_threshold() -> Distance {
    DEFAULT_THRESHOLD
}

fn default_self_matches() -> SelfMatch {
    SelfMatch::Exclude
}

impl NetworkConfig {
    /// Threshold 1, self-matches excluded.
    pub const fn default() -> NetworkConfig {
        NetworkConfig {
            threshold: DEFAULT_THRESHOLD,
            self_matches: SelfMatch::Exclude,
        }
    }

    /// Reads a config from JSON. Missing fields take their default values.
    pub fn from_json<R: Read>(reader: R) -> Result<NetworkConfig, serde_json::Error> {
        serde_json::from_reader(reader)
    }
}

/// The words reachable from a seed.
///
/// Serializes its words in lexicographic order.
#[derive(Clone, Debug, Serialize)]
pub struct Network {
    seed: SmolStr,
    #[serde(serialize_with = "serialize_sorted")]
    words: HashSet<SmolStr>,
    expansions: usize,
}

fn serialize_sorted<S: Serializer>(words: &HashSet<SmolStr>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(words.iter().sorted())
}

impl Network {
    /// The word the network was grown from.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of words, the seed included.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`: a network holds at least its seed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `word` belongs to the network.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of neighbor lookups it took to discover this network.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// The words in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(SmolStr::as_str)
    }

    /// The words in lexicographic order.
    pub fn sorted(&self) -> Vec<&str> {
        self.iter().sorted().collect()
    }

    /// The underlying set.
    pub fn words(&self) -> &HashSet<SmolStr> {
        &self.words
    }

    /// Consumes the network, returning its words.
    pub fn into_words(self) -> HashSet<SmolStr> {
        self.words
    }
}

/// Grows networks by repeatedly asking a [`NeighborLookup`] for friends.
pub struct NetworkDiscoverer<L: NeighborLookup + ?Sized> {
    lookup: Arc<L>,
}

impl<L: NeighborLookup + ?Sized> Clone for NetworkDiscoverer<L> {
    fn clone(&self) -> Self {
        NetworkDiscoverer {
            lookup: Arc::clone(&self.lookup),
        }
    }
}

impl<L: NeighborLookup + ?Sized> NetworkDiscoverer<L> {
    /// Discovers networks through `lookup`, which may be shared with other
    /// discoverers.
    pub fn new(lookup: Arc<L>) -> NetworkDiscoverer<L> {
        NetworkDiscoverer { lookup }
    }

    /// The backend answering neighbor queries.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// [`discover_with_config`](Self::discover_with_config) with the default config.
    #[inline]
    pub fn discover(&self, seed: &str) -> Network {
        self.discover_with_config(seed, &NetworkConfig::default())
    }

    /// The network of `seed`: the seed and every word transitively within
    /// `config.threshold` edits of it. The seed does not have to be in the
    /// dictionary.
    pub fn discover_with_config(&self, seed: &str, config: &NetworkConfig) -> Network {
        expand(&*self.lookup, seed, config)
    }

    /// [`friends_of_with_config`](Self::friends_of_with_config) with the default config.
    #[inline]
    pub fn friends_of(&self, word: &str) -> HashSet<SmolStr> {
        self.friends_of_with_config(word, &NetworkConfig::default())
    }

    /// Direct friends of `word`, following `config.self_matches`.
    pub fn friends_of_with_config(&self, word: &str, config: &NetworkConfig) -> HashSet<SmolStr> {
        let mut friends = HashSet::new();
        collect_friends(&*self.lookup, word, config, &mut friends);
        friends
    }
}

/// The network of `seed` under `threshold`, with self-matches excluded.
pub fn discover<L: NeighborLookup + ?Sized>(seed: &str, threshold: Distance, lookup: &L) -> Network {
    let config = NetworkConfig {
        threshold,
        ..NetworkConfig::default()
    };

    expand(lookup, seed, &config)
}

#[inline(always)]
fn collect_friends<L: NeighborLookup + ?Sized>(
    lookup: &L,
    word: &str,
    config: &NetworkConfig,
    out: &mut HashSet<SmolStr>,
) {
    lookup.neighbors_into(word, config.threshold, out);

    if config.self_matches == SelfMatch::Exclude {
        out.remove(word);
    }
}

fn expand<L: NeighborLookup + ?Sized>(lookup: &L, seed: &str, config: &NetworkConfig) -> Network {
    log::debug!(
        "discovering network of {:?} (threshold {}, {} dictionary words)",
        seed,
        config.threshold,
        lookup.len()
    );

    let mut frontier = VecDeque::new();
    let mut visited: HashSet<SmolStr> = HashSet::new();
    let mut friends = HashSet::new();
    let mut expansions = 0usize;
    let mut revisits = 0usize;

    frontier.push_back(SmolStr::new(seed));

    // Words may be queued more than once; `visited` decides at dequeue time.
    while let Some(current) = frontier.pop_front() {
        if visited.contains(&current) {
            revisits += 1;
            continue;
        }

        collect_friends(lookup, &current, config, &mut friends);
        expansions += 1;

        log::trace!(
            "{}: {} friends, {} visited, {} queued",
            current,
            friends.len(),
            visited.len(),
            frontier.len()
        );

        frontier.extend(friends.drain());
        visited.insert(current);
    }

    log::debug!(
        "network of {:?}: {} words after {} expansions ({} revisits skipped)",
        seed,
        visited.len(),
        expansions,
        revisits
    );

    Network {
        seed: SmolStr::new(seed),
        words: visited,
        expansions,
    }
}
