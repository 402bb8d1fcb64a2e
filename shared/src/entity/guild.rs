use std::fmt;

use crate::{
    archive::{Archive, TransferError},
    transfer::{conclude, Transfer},
    wire_enum,
};

pub const INVALID_GUILD_ID: u64 = 0;

wire_enum! {
    #[derive(Default)]
    pub enum GuildMembership {
        #[default]
        Member = 0,
        Officer = 1,
        Leader = 2,
    }
}

/// The slice of guild membership a player replicates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GuildInfo {
    pub guild_id: u64,
    pub guild_name: String,
    pub membership: GuildMembership,
}

impl GuildInfo {
    pub fn new(guild_id: u64, guild_name: impl Into<String>, membership: GuildMembership) -> Self {
        Self {
            guild_id,
            guild_name: guild_name.into(),
            membership,
        }
    }

    pub fn is_in_guild(&self) -> bool {
        self.guild_id != INVALID_GUILD_ID
    }
}

impl Transfer for GuildInfo {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        // a failed read must not fall back to what the destination held
        let mut has_guild = archive.is_encoding() && self.is_in_guild();
        let mut success = archive.transfer("has_guild", &mut has_guild);

        if !has_guild {
            if archive.is_decoding() {
                *self = GuildInfo::default();
            }
            return conclude(success, "GuildInfo");
        }

        success &= archive.transfer("guild_id", &mut self.guild_id);
        success &= archive.transfer("guild_name", &mut self.guild_name);
        success &= archive.transfer("membership", &mut self.membership);
        conclude(success, "GuildInfo")
    }
}

impl fmt::Display for GuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_in_guild() {
            write!(f, "{} \"{}\" ({:?})", self.guild_id, self.guild_name, self.membership)
        } else {
            write!(f, "none")
        }
    }
}
