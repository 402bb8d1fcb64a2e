use bitflags::bitflags;

bitflags! {
    /// Visibility channels a replicated archive is built for. A section whose
    /// channels do not intersect the policy is left out of the stream.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ReplicationPolicy: u32 {
        /// Observers inside the area of interest
        const PROXIMITY = 1 << 0;
        const PARTY = 1 << 1;
        /// The owning client
        const OWNER = 1 << 2;
        const TRADER = 1 << 3;
        const DISCOVERY = 1 << 4;
        /// Data only meaningful to the client, never read back by the server
        const CLIENT_ONLY = 1 << 5;
    }
}

impl ReplicationPolicy {
    /// Whether a section visible on `channels` belongs in this archive.
    pub fn includes(&self, channels: ReplicationPolicy) -> bool {
        self.intersects(channels)
    }
}

/// What an archive is being built for. Fixed for the lifetime of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveIntent {
    /// State sent to connected clients under a visibility policy
    NetworkReplication(ReplicationPolicy),
    /// State written to storage
    PersistentSnapshot,
    /// State handed between servers
    Migration,
}

impl ArchiveIntent {
    pub fn is_replication(&self) -> bool {
        matches!(self, ArchiveIntent::NetworkReplication(_))
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, ArchiveIntent::PersistentSnapshot)
    }

    pub fn is_migration(&self) -> bool {
        matches!(self, ArchiveIntent::Migration)
    }

    /// The replication policy, empty for intents that do not replicate.
    pub fn replication_policy(&self) -> ReplicationPolicy {
        match self {
            ArchiveIntent::NetworkReplication(policy) => *policy,
            _ => ReplicationPolicy::empty(),
        }
    }
}
