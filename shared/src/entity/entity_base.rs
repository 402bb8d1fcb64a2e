use crate::{
    archive::{Archive, ReplicationPolicy, TransferError},
    transfer::{conclude, Transfer},
};

use super::property_collection::ReplicatedPropertyCollection;

/// State every replicated entity carries ahead of its own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityBase {
    pub replication_policy: ReplicationPolicy,
    pub properties: ReplicatedPropertyCollection,
}

impl Default for EntityBase {
    fn default() -> Self {
        Self {
            replication_policy: ReplicationPolicy::empty(),
            properties: ReplicatedPropertyCollection::default(),
        }
    }
}

impl Transfer for EntityBase {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut success = archive.transfer("replication_policy", &mut self.replication_policy);
        success &= archive.transfer("properties", &mut self.properties);
        conclude(success, "EntityBase")
    }
}
