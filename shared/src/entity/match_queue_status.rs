use std::{collections::BTreeMap, fmt};

use crate::{
    archive::{Archive, TransferError},
    prototype::PrototypeId,
    transfer::{conclude, Transfer},
    wire_enum,
};

wire_enum! {
    #[derive(Default)]
    pub enum MatchQueueState {
        #[default]
        Idle = 0,
        InQueue = 1,
        MatchFound = 2,
        InMatch = 3,
        Withdrawn = 4,
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchQueueRegionStatus {
    pub group_id: u64,
    pub state: MatchQueueState,
}

impl Transfer for MatchQueueRegionStatus {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut success = archive.transfer("group_id", &mut self.group_id);
        success &= archive.transfer("state", &mut self.state);
        conclude(success, "MatchQueueRegionStatus")
    }
}

/// Queue status per region prototype.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchQueueStatus {
    regions: BTreeMap<PrototypeId, MatchQueueRegionStatus>,
}

impl MatchQueueStatus {
    pub fn region(&self, region_ref: PrototypeId) -> Option<&MatchQueueRegionStatus> {
        self.regions.get(&region_ref)
    }

    /// Withdrawing removes the region entirely.
    pub fn update(&mut self, region_ref: PrototypeId, group_id: u64, state: MatchQueueState) {
        if state == MatchQueueState::Withdrawn {
            self.regions.remove(&region_ref);
            return;
        }
        self.regions
            .insert(region_ref, MatchQueueRegionStatus { group_id, state });
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Transfer for MatchQueueStatus {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let success = archive.transfer("regions", &mut self.regions);
        conclude(success, "MatchQueueStatus")
    }
}

impl fmt::Display for MatchQueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} region(s)", self.regions.len())
    }
}
