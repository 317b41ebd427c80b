/// Edit distance between two words, and the friendship threshold it is held against.
pub type Distance = u32;

/// One row of the edit-distance matrix, indexed by query prefix length.
pub(crate) type Row = Vec<Distance>;
