use std::{collections::BTreeMap, fmt};

use crate::{
    archive::{Archive, TransferError},
    prototype::PrototypeId,
    transfer::{conclude, Transfer},
    wire_enum,
};

wire_enum! {
    #[derive(Default)]
    pub enum MissionState {
        #[default]
        Invalid = 0,
        Inactive = 1,
        Available = 2,
        Active = 3,
        Completed = 4,
        Failed = 5,
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Mission {
    pub state: MissionState,
    /// Microseconds of game time, 0 when the mission never expires
    pub time_expire: i64,
    pub participants: Vec<u64>,
    pub suspended: bool,
}

impl Transfer for Mission {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut success = archive.transfer("state", &mut self.state);
        success &= archive.transfer("time_expire", &mut self.time_expire);
        success &= archive.transfer("participants", &mut self.participants);
        success &= archive.transfer("suspended", &mut self.suspended);
        conclude(success, "Mission")
    }
}

/// Missions tracked for a player, keyed by mission prototype.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MissionManager {
    pub avatar: PrototypeId,
    missions: BTreeMap<PrototypeId, Mission>,
}

impl MissionManager {
    pub fn mission(&self, mission_ref: PrototypeId) -> Option<&Mission> {
        self.missions.get(&mission_ref)
    }

    pub fn mission_mut(&mut self, mission_ref: PrototypeId) -> Option<&mut Mission> {
        self.missions.get_mut(&mission_ref)
    }

    pub fn insert_mission(&mut self, mission_ref: PrototypeId, mission: Mission) -> Option<Mission> {
        self.missions.insert(mission_ref, mission)
    }

    pub fn remove_mission(&mut self, mission_ref: PrototypeId) -> Option<Mission> {
        self.missions.remove(&mission_ref)
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }
}

impl Transfer for MissionManager {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut success = archive.transfer("avatar", &mut self.avatar);
        success &= archive.transfer("missions", &mut self.missions);
        conclude(success, "MissionManager")
    }
}

impl fmt::Display for MissionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "avatar {}, {} mission(s)", self.avatar, self.missions.len())
    }
}
