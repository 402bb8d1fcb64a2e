//! # Entity Archive
//! Positional archives of entity state: the same field walk encodes a game
//! object for replication to clients, for storage snapshots and for
//! migration between servers, and decodes it again.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub use entity_archive_serde::{
    read_varint32, read_varint64, write_varint32, write_varint64, ByteReader, ByteWrite, Fixed32,
    Quantized, SerdeErr,
};

mod archive;
mod prototype;
mod transfer;

pub mod entity;
pub mod snapshot;

pub use archive::{
    Archive, ArchiveConfig, ArchiveDirection, ArchiveError, ArchiveIntent, ArchiveWarning,
    FieldFailure, ReplicationPolicy, TransferError, TransferReport,
};
pub use prototype::{IdentityPrototypeConverter, PrototypeEnumTable, PrototypeId, PrototypeRefConverter};
pub use transfer::{conclude, Transfer};
