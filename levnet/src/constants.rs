//! Defaults shared by the library and the tools.

use crate::types::Distance;

/// Words are friends when they are at most this many edits apart.
pub const DEFAULT_THRESHOLD: Distance = 1;

/// Seed word used by the tools when none is given.
pub const DEFAULT_SEED: &str = "causes";

/// Rows kept alive for reuse during one lookup.
pub(crate) const ROW_POOL_SIZE: usize = 64;

/// Initial capacity of the traversal stack.
pub(crate) const STACK_CAPACITY: usize = 256;

