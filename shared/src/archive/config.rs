/// Limits applied while walking an archive. Encoding and decoding enforce
/// the same limits.
#[derive(Clone, Debug)]
pub struct ArchiveConfig {
    /// Longest string, in bytes
    pub max_string_length: usize,
    /// Most elements in a collection
    pub max_collection_length: usize,
    /// Most booleans in the packed bool block at the head of a stream
    pub max_packed_bools: usize,
    /// Largest encoded archive, in bytes. `None` lets the output grow freely
    pub write_capacity: Option<usize>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            max_string_length: 1024 * 1024,
            max_collection_length: 65536,
            max_packed_bools: 65536,
            write_capacity: None,
        }
    }
}
