use thiserror::Error;

/// Errors produced by the primitive codec and the packed-boolean batch.
///
/// Every variant is an ordinary failure value: truncated or hostile input
/// never panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The cursor ran out of bytes before a primitive could be read
    #[error("Stream exhausted: needed {needed} byte(s) but only {remaining} remain")]
    Exhausted { needed: usize, remaining: usize },

    /// A varint kept its continuation bit set past the maximum allowed length
    #[error("Malformed varint: continuation bit set beyond {max_bytes} bytes")]
    MalformedVarint { max_bytes: usize },

    /// The output sink refused to grow past its configured capacity
    #[error("Write capacity of {capacity} bytes exceeded (attempted to reach {attempted})")]
    CapacityExceeded { capacity: usize, attempted: usize },

    /// A length-prefixed string did not contain valid UTF-8
    #[error("String payload is not valid UTF-8")]
    InvalidUtf8,

    /// A length prefix exceeded the configured limit
    #[error("Length prefix {length} exceeds the limit of {limit}")]
    LengthLimit { length: u64, limit: u64 },

    /// More booleans were requested than the packed batch holds
    #[error("Packed bool batch exhausted after {count} bool(s)")]
    BoolBatchExhausted { count: usize },

    /// A boolean replayed during the write pass differs from the one registered
    #[error("Packed bool at index {index} does not match the registered value")]
    BoolReplayMismatch { index: usize },
}
