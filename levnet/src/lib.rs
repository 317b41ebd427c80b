/*! Word networks over large dictionaries.

Two words are *friends* when their Levenshtein distance is at most a small
threshold (one, by default). The *network* of a word is every word reachable
from it through friendship. Comparing each word against the whole dictionary
is far too slow for dictionaries of a few hundred thousand words, so lookups
walk a [`PrefixIndex`] while computing one edit-distance row per tree depth,
abandoning any subtree whose row can no longer reach the threshold.

# Usage examples

```
use std::sync::Arc;
use levnet::{NetworkDiscoverer, PrefixIndex};

let index = PrefixIndex::from_words(["cat", "cot", "cog", "dog", "car"]);
let discoverer = NetworkDiscoverer::new(Arc::new(index));
let network = discoverer.discover("cat");

assert_eq!(network.len(), 5);
```

The `levnet` binary in `levnet-bin` loads a dictionary file and prints the
size of a seed word's network.
*/

#![warn(missing_docs)]
pub mod constants;
pub mod dictionary;
pub mod index;
pub mod lookup;
pub mod network;

pub(crate) mod types;

pub use crate::dictionary::{error::DictionaryError, Dictionary};
pub use crate::index::PrefixIndex;
pub use crate::lookup::{find_neighbors, scan::LengthBuckets, NeighborLookup};
pub use crate::network::{discover, Network, NetworkConfig, NetworkDiscoverer, SelfMatch};
pub use crate::types::Distance;
