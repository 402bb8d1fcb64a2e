use std::fmt;

use crate::{
    archive::{Archive, TransferError},
    transfer::{conclude, Transfer},
    wire_enum,
};

wire_enum! {
    #[derive(Default)]
    pub enum CommunityCircle {
        #[default]
        Friends = 1,
        Ignore = 2,
        Nearby = 3,
        Party = 4,
        Guild = 5,
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommunityMember {
    pub player_db_id: u64,
    pub name: String,
    pub circle: CommunityCircle,
}

impl Transfer for CommunityMember {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut success = archive.transfer("player_db_id", &mut self.player_db_id);
        success &= archive.transfer("name", &mut self.name);
        success &= archive.transfer("circle", &mut self.circle);
        conclude(success, "CommunityMember")
    }
}

/// A player's social lists.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Community {
    members: Vec<CommunityMember>,
}

impl Community {
    /// Returns false if the player is already in `circle`.
    pub fn add_member(
        &mut self,
        player_db_id: u64,
        name: impl Into<String>,
        circle: CommunityCircle,
    ) -> bool {
        if self.is_in_circle(player_db_id, circle) {
            return false;
        }
        self.members.push(CommunityMember {
            player_db_id,
            name: name.into(),
            circle,
        });
        true
    }

    pub fn remove_member(&mut self, player_db_id: u64, circle: CommunityCircle) -> bool {
        let before = self.members.len();
        self.members
            .retain(|member| member.player_db_id != player_db_id || member.circle != circle);
        self.members.len() != before
    }

    pub fn is_in_circle(&self, player_db_id: u64, circle: CommunityCircle) -> bool {
        self.members
            .iter()
            .any(|member| member.player_db_id == player_db_id && member.circle == circle)
    }

    pub fn members(&self) -> &[CommunityMember] {
        &self.members
    }

    pub fn members_in(&self, circle: CommunityCircle) -> impl Iterator<Item = &CommunityMember> {
        self.members.iter().filter(move |member| member.circle == circle)
    }
}

impl Transfer for Community {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let success = archive.transfer("members", &mut self.members);
        conclude(success, "Community")
    }
}

impl fmt::Display for Community {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} member(s)", self.members.len())
    }
}
