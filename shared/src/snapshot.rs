//! Storage snapshots: the same field walk as replication, opened with the
//! persistent intent and kept as an opaque byte blob.

use crate::{
    archive::{Archive, ArchiveConfig, ArchiveError, ArchiveIntent, TransferReport},
    prototype::PrototypeRefConverter,
    transfer::Transfer,
};

pub fn encode_snapshot<T: Transfer + ?Sized>(
    value: &mut T,
    prototypes: &dyn PrototypeRefConverter,
    config: &ArchiveConfig,
) -> Result<Vec<u8>, ArchiveError> {
    Archive::encode(value, ArchiveIntent::PersistentSnapshot, prototypes, config)
}

/// Restores `value` from a blob made by [`encode_snapshot`].
pub fn decode_snapshot<T: Transfer + ?Sized>(
    blob: &[u8],
    value: &mut T,
    prototypes: &dyn PrototypeRefConverter,
    config: &ArchiveConfig,
) -> Result<TransferReport, ArchiveError> {
    Archive::decode(blob, value, ArchiveIntent::PersistentSnapshot, prototypes, config)
}
