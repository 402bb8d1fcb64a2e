use std::fmt;

use crate::{
    archive::{Archive, TransferError},
    transfer::{conclude, Transfer},
};

/// A single value tagged with the replication id clients use to address
/// updates to it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplicatedVariable<T> {
    replication_id: u64,
    value: T,
}

impl<T> ReplicatedVariable<T> {
    pub fn new(replication_id: u64, value: T) -> Self {
        Self {
            replication_id,
            value,
        }
    }

    pub fn replication_id(&self) -> u64 {
        self.replication_id
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: Transfer> Transfer for ReplicatedVariable<T> {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut success = archive.transfer("replication_id", &mut self.replication_id);
        success &= archive.transfer("value", &mut self.value);
        conclude(success, "ReplicatedVariable")
    }
}

impl<T: fmt::Display> fmt::Display for ReplicatedVariable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.replication_id, self.value)
    }
}
