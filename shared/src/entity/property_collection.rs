use std::{collections::BTreeMap, fmt};

use entity_archive_serde::Fixed32;

use crate::{
    archive::{Archive, TransferError},
    transfer::{check_length, conclude, Transfer},
};

/// Raw property values keyed by property id, replicated as a unit.
///
/// Values are kept in their wire form; interpreting them belongs to the
/// property system that owns them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplicatedPropertyCollection {
    replication_id: u64,
    values: BTreeMap<u64, u64>,
}

impl ReplicatedPropertyCollection {
    pub fn new(replication_id: u64) -> Self {
        Self {
            replication_id,
            values: BTreeMap::new(),
        }
    }

    pub fn replication_id(&self) -> u64 {
        self.replication_id
    }

    pub fn set_replication_id(&mut self, replication_id: u64) {
        self.replication_id = replication_id;
    }

    pub fn get(&self, property_id: u64) -> Option<u64> {
        self.values.get(&property_id).copied()
    }

    /// Returns the previous value, if any.
    pub fn set(&mut self, property_id: u64, value: u64) -> Option<u64> {
        self.values.insert(property_id, value)
    }

    pub fn remove(&mut self, property_id: u64) -> Option<u64> {
        self.values.remove(&property_id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.values.iter().map(|(id, value)| (*id, *value))
    }
}

impl Transfer for ReplicatedPropertyCollection {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut success = archive.transfer("replication_id", &mut self.replication_id);

        let limit = archive.config().max_collection_length;
        if archive.is_encoding() {
            check_length(self.values.len() as u64, limit)?;
        }

        // unlike other collections the count is fixed-width
        let mut count = Fixed32(self.values.len() as u32);
        if !archive.transfer("count", &mut count) {
            return conclude(false, "ReplicatedPropertyCollection");
        }

        if archive.is_decoding() {
            check_length(u64::from(count.0), limit)?;
            let count = count.0 as usize;

            self.values.clear();
            for index in 0..count {
                let mut property_id = 0u64;
                let mut value = 0u64;
                let mut entry_success = archive.transfer_element(index, &mut property_id);
                entry_success &= archive.transfer_element(index, &mut value);
                if entry_success {
                    self.values.insert(property_id, value);
                } else {
                    success = false;
                }
            }
        } else {
            for (index, (property_id, value)) in self.values.iter_mut().enumerate() {
                let mut property_id = *property_id;
                success &= archive.transfer_element(index, &mut property_id);
                success &= archive.transfer_element(index, value);
            }
        }

        conclude(success, "ReplicatedPropertyCollection")
    }
}

impl fmt::Display for ReplicatedPropertyCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {{", self.replication_id)?;
        for (index, (property_id, value)) in self.values.iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, " {:#x}: {}", property_id, value)?;
        }
        write!(f, " }}")
    }
}
