use std::{collections::HashMap, fmt};

use entity_archive_serde::{read_varint64, write_varint64};

use crate::{
    archive::{Archive, TransferError},
    transfer::Transfer,
};

/// Identifies a game data prototype (an item, a region, an inventory type).
///
/// Prototype ids are large, sparse values. They do not go on the wire as-is:
/// the archive asks its [`PrototypeRefConverter`] for the wire reference.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrototypeId(u64);

impl PrototypeId {
    pub const INVALID: PrototypeId = PrototypeId(0);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

impl From<u64> for PrototypeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PrototypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Converts prototype ids to and from the references written on the wire.
pub trait PrototypeRefConverter {
    fn to_wire(&self, id: PrototypeId) -> Result<u64, TransferError>;
    fn from_wire(&self, raw: u64) -> Result<PrototypeId, TransferError>;
}

/// Writes prototype ids unchanged. Useful for tools and tests that have no
/// prototype table loaded.
pub struct IdentityPrototypeConverter;

impl PrototypeRefConverter for IdentityPrototypeConverter {
    fn to_wire(&self, id: PrototypeId) -> Result<u64, TransferError> {
        Ok(id.raw())
    }

    fn from_wire(&self, raw: u64) -> Result<PrototypeId, TransferError> {
        Ok(PrototypeId::new(raw))
    }
}

/// Dense enumeration of a known set of prototypes.
///
/// Ids are sorted and each is referenced by its 1-based position, so both
/// ends must build the table from the same set. Wire reference 0 is
/// [`PrototypeId::INVALID`].
pub struct PrototypeEnumTable {
    ids: Vec<PrototypeId>,
    references: HashMap<PrototypeId, u64>,
}

impl PrototypeEnumTable {
    pub fn new(ids: impl IntoIterator<Item = PrototypeId>) -> Self {
        let mut ids: Vec<PrototypeId> = ids.into_iter().filter(PrototypeId::is_valid).collect();
        ids.sort_unstable();
        ids.dedup();

        let references = ids
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index as u64 + 1))
            .collect();

        Self { ids, references }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: PrototypeId) -> bool {
        self.references.contains_key(&id)
    }
}

impl PrototypeRefConverter for PrototypeEnumTable {
    fn to_wire(&self, id: PrototypeId) -> Result<u64, TransferError> {
        if !id.is_valid() {
            return Ok(0);
        }
        self.references
            .get(&id)
            .copied()
            .ok_or(TransferError::UnmappedPrototype { id: id.raw() })
    }

    fn from_wire(&self, raw: u64) -> Result<PrototypeId, TransferError> {
        if raw == 0 {
            return Ok(PrototypeId::INVALID);
        }
        usize::try_from(raw - 1)
            .ok()
            .and_then(|index| self.ids.get(index))
            .copied()
            .ok_or(TransferError::UnknownPrototype { raw })
    }
}

impl Transfer for PrototypeId {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let prototypes = archive.prototypes();

        let mut raw = if archive.is_decoding() {
            0
        } else {
            prototypes.to_wire(*self)?
        };
        archive.transfer_primitive(
            &mut raw,
            |writer, value| write_varint64(writer, *value),
            read_varint64,
        )?;

        if archive.is_decoding() {
            *self = prototypes.from_wire(raw)?;
        }
        Ok(())
    }
}
