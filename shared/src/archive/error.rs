use thiserror::Error;

use entity_archive_serde::SerdeErr;

use super::report::TransferReport;

/// Why a single field could not be transferred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// A primitive read or write failed
    #[error(transparent)]
    Serde(#[from] SerdeErr),

    /// One or more fields of a composite failed; the fields themselves are
    /// listed in the archive's report
    #[error("One or more fields of {type_name} failed to transfer")]
    FieldsFailed { type_name: &'static str },

    /// A wire prototype reference has no counterpart in the lookup table
    #[error("Wire prototype reference {raw} is not known to the prototype table")]
    UnknownPrototype { raw: u64 },

    /// A prototype cannot be expressed as a wire reference
    #[error("Prototype {id} has no wire reference")]
    UnmappedPrototype { id: u64 },

    /// A decoded discriminant does not name any variant of the enum
    #[error("{value} is not a valid {type_name}")]
    InvalidEnumValue { type_name: &'static str, value: u32 },

    /// A timestamp cannot be represented as microseconds since the epoch
    #[error("Timestamp of {micros} microseconds is out of range")]
    TimestampOutOfRange { micros: i64 },
}

/// Why a whole archive walk failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchiveError {
    /// The packed bool block at the head of the stream could not be transferred
    #[error("Packed bool block: {0}")]
    BoolBlock(SerdeErr),

    /// The walk finished with packed bools left over, so the two sides did
    /// not agree on the schema
    #[error("{remaining} packed bool(s) were never consumed")]
    UnconsumedBools { remaining: usize },

    /// At least one field failed to transfer
    #[error("Archive transfer failed: {0}")]
    TransferFailed(TransferReport),
}

impl ArchiveError {
    /// The report of a failed walk, if the failure happened during the walk.
    pub fn report(&self) -> Option<&TransferReport> {
        match self {
            ArchiveError::TransferFailed(report) => Some(report),
            _ => None,
        }
    }
}
