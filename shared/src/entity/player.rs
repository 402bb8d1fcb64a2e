use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    time::Duration,
};

use log::warn;

use crate::{
    archive::{Archive, ReplicationPolicy, TransferError},
    prototype::PrototypeId,
    transfer::{conclude, Transfer},
    wire_enum,
};

use super::{
    achievement_state::AchievementState,
    community::Community,
    entity_base::EntityBase,
    gameplay_options::GameplayOptions,
    guild::GuildInfo,
    match_queue_status::MatchQueueStatus,
    mission_manager::MissionManager,
    property_collection::ReplicatedPropertyCollection,
    replicated_variable::ReplicatedVariable,
    stash_tab_options::{StashTabOptions, StashTabOptionsUpdate},
};

/// Which local co-op seat a per-avatar value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAvatarIndex {
    Primary = 0,
    Secondary = 1,
}

wire_enum! {
    #[derive(Default)]
    pub enum AvailableBadge {
        /// Can grant badges to other accounts
        #[default]
        CanGrantBadges = 1,
        SiteCommands = 2,
        CanBroadcastChat = 3,
        AllContentAccess = 4,
        CanLogInAsAnotherAccount = 5,
        CanDisablePersistence = 6,
        PlaytestCommands = 7,
        CsrUser = 8,
        DangerousCheatAccess = 9,
    }
}

/// The player entity: account-level state shared by all of a player's
/// avatars.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Player {
    pub entity: EntityBase,
    pub mission_manager: MissionManager,
    pub avatar_properties: ReplicatedPropertyCollection,
    shard_id: u64,
    player_name: ReplicatedVariable<String>,
    console_account_ids: [u64; 2],
    secondary_player_name: ReplicatedVariable<String>,
    pub match_queue_status: MatchQueueStatus,
    pub email_verified: bool,
    /// Since the Unix epoch
    pub account_creation_timestamp: Duration,
    party_id: ReplicatedVariable<u64>,
    pub guild: GuildInfo,
    pub community: Community,
    unlocked_inventories: Vec<PrototypeId>,
    badges: BTreeSet<AvailableBadge>,
    pub gameplay_options: GameplayOptions,
    pub achievement_state: AchievementState,
    stash_tab_options: BTreeMap<PrototypeId, StashTabOptions>,
}

impl Player {
    /// A player replicated to its owner, with replication ids allocated
    /// consecutively from `first_replication_id`, wrapping past `u64::MAX`.
    pub fn new(first_replication_id: u64, shard_id: u64, name: impl Into<String>) -> Self {
        let id = |offset: u64| first_replication_id.wrapping_add(offset);
        Self {
            entity: EntityBase {
                replication_policy: ReplicationPolicy::OWNER,
                properties: ReplicatedPropertyCollection::new(id(0)),
            },
            avatar_properties: ReplicatedPropertyCollection::new(id(1)),
            shard_id,
            player_name: ReplicatedVariable::new(id(2), name.into()),
            party_id: ReplicatedVariable::new(id(3), 0),
            ..Self::default()
        }
    }

    pub fn shard_id(&self) -> u64 {
        self.shard_id
    }

    pub fn set_shard_id(&mut self, shard_id: u64) {
        self.shard_id = shard_id;
    }

    pub fn name(&self, avatar_index: PlayerAvatarIndex) -> &str {
        match avatar_index {
            PlayerAvatarIndex::Primary => self.player_name.get(),
            PlayerAvatarIndex::Secondary => self.secondary_player_name.get(),
        }
    }

    pub fn set_name(&mut self, avatar_index: PlayerAvatarIndex, name: impl Into<String>) {
        match avatar_index {
            PlayerAvatarIndex::Primary => self.player_name.set(name.into()),
            PlayerAvatarIndex::Secondary => self.secondary_player_name.set(name.into()),
        }
    }

    pub fn console_account_id(&self, avatar_index: PlayerAvatarIndex) -> u64 {
        self.console_account_ids[avatar_index as usize]
    }

    pub fn set_console_account_id(&mut self, avatar_index: PlayerAvatarIndex, account_id: u64) {
        self.console_account_ids[avatar_index as usize] = account_id;
    }

    pub fn party_id(&self) -> u64 {
        *self.party_id.get()
    }

    pub fn set_party_id(&mut self, party_id: u64) {
        self.party_id.set(party_id);
    }

    // Badges

    /// Returns false if the badge was already held.
    pub fn add_badge(&mut self, badge: AvailableBadge) -> bool {
        self.badges.insert(badge)
    }

    /// Returns false if the badge was not held.
    pub fn remove_badge(&mut self, badge: AvailableBadge) -> bool {
        self.badges.remove(&badge)
    }

    pub fn has_badge(&self, badge: AvailableBadge) -> bool {
        self.badges.contains(&badge)
    }

    pub fn badges(&self) -> impl Iterator<Item = AvailableBadge> + '_ {
        self.badges.iter().copied()
    }

    // Inventories

    pub fn is_inventory_unlocked(&self, inventory_ref: PrototypeId) -> bool {
        if !inventory_ref.is_valid() {
            warn!("is_inventory_unlocked(): invalid inventory prototype");
            return false;
        }
        self.unlocked_inventories.contains(&inventory_ref)
    }

    pub fn unlock_inventory(&mut self, inventory_ref: PrototypeId) -> bool {
        if !inventory_ref.is_valid() {
            warn!("unlock_inventory(): invalid inventory prototype");
            return false;
        }
        if self.unlocked_inventories.contains(&inventory_ref) {
            warn!("unlock_inventory(): {} is already unlocked", inventory_ref);
            return false;
        }
        self.unlocked_inventories.push(inventory_ref);
        true
    }

    /// Unlocks a stash inventory and places its tab first.
    pub fn unlock_stash_inventory(&mut self, stash_ref: PrototypeId) -> bool {
        if !self.unlock_inventory(stash_ref) {
            return false;
        }
        self.stash_tab_insert(stash_ref, 0)
    }

    pub fn unlocked_inventories(&self) -> &[PrototypeId] {
        &self.unlocked_inventories
    }

    // Stash tabs

    pub fn stash_tab_options(&self, stash_ref: PrototypeId) -> Option<&StashTabOptions> {
        self.stash_tab_options.get(&stash_ref)
    }

    /// Applies a client's change to a stash tab, creating the tab at the end
    /// of the sort order if it has no options yet. Display names are cut to
    /// [`MAX_STASH_TAB_NAME_LENGTH`](super::MAX_STASH_TAB_NAME_LENGTH)
    /// characters.
    pub fn update_stash_tab_options(
        &mut self,
        stash_ref: PrototypeId,
        update: StashTabOptionsUpdate,
    ) -> bool {
        if !stash_ref.is_valid() {
            warn!("update_stash_tab_options(): invalid stash prototype");
            return false;
        }
        if !self.stash_tab_options.contains_key(&stash_ref) {
            let last = self.stash_tab_options.len() as i32;
            if !self.stash_tab_insert(stash_ref, last) {
                return false;
            }
        }
        let Some(options) = self.stash_tab_options.get_mut(&stash_ref) else {
            return false;
        };
        update.apply(options);
        true
    }

    /// Moves a stash tab to `new_sort_order`, shifting the tabs in between.
    /// A tab without options is created at the end first. Sort orders past
    /// the last tab are clamped.
    pub fn stash_tab_insert(&mut self, stash_ref: PrototypeId, new_sort_order: i32) -> bool {
        if new_sort_order < 0 {
            warn!("stash_tab_insert(): invalid sort order {}", new_sort_order);
            return false;
        }
        if !stash_ref.is_valid() {
            warn!("stash_tab_insert(): invalid stash prototype");
            return false;
        }

        let tab_count = self.stash_tab_options.len() as i32;
        let old_sort_order = match self.stash_tab_options.get(&stash_ref) {
            Some(options) => {
                if options.sort_order == new_sort_order {
                    warn!("stash_tab_insert(): {} is already at {}", stash_ref, new_sort_order);
                    return false;
                }
                options.sort_order
            }
            None => {
                self.stash_tab_options.insert(
                    stash_ref,
                    StashTabOptions {
                        sort_order: tab_count,
                        ..StashTabOptions::default()
                    },
                );
                tab_count
            }
        };

        let last = self.stash_tab_options.len() as i32 - 1;
        let new_sort_order = new_sort_order.min(last);
        let (increment, start, finish) = if old_sort_order < new_sort_order {
            (-1, old_sort_order, new_sort_order)
        } else {
            (1, new_sort_order, old_sort_order)
        };

        for (tab_ref, options) in self.stash_tab_options.iter_mut() {
            if *tab_ref == stash_ref {
                options.sort_order = new_sort_order;
            } else if options.sort_order >= start && options.sort_order <= finish {
                options.sort_order += increment;
            }
        }

        self.compact_stash_tab_order();
        true
    }

    // Sort orders must be exactly 0..tab_count
    fn compact_stash_tab_order(&mut self) {
        let mut order: Vec<(i32, PrototypeId)> = self
            .stash_tab_options
            .iter()
            .map(|(tab_ref, options)| (options.sort_order, *tab_ref))
            .collect();
        order.sort_unstable();

        let compact = order
            .iter()
            .enumerate()
            .all(|(index, (sort_order, _))| *sort_order == index as i32);
        if compact {
            return;
        }

        warn!("Stash tab sort order has gaps or duplicates, reordering");
        for (index, (_, tab_ref)) in order.iter().enumerate() {
            if let Some(options) = self.stash_tab_options.get_mut(tab_ref) {
                options.sort_order = index as i32;
            }
        }
    }

    /// Stash tabs ordered by their sort order.
    pub fn stash_tabs_in_order(&self) -> Vec<(PrototypeId, &StashTabOptions)> {
        let mut tabs: Vec<(PrototypeId, &StashTabOptions)> = self
            .stash_tab_options
            .iter()
            .map(|(tab_ref, options)| (*tab_ref, options))
            .collect();
        tabs.sort_by_key(|(tab_ref, options)| (options.sort_order, *tab_ref));
        tabs
    }
}

impl Transfer for Player {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut success = archive.transfer("entity", &mut self.entity);
        success &= archive.transfer("mission_manager", &mut self.mission_manager);
        success &= archive.transfer("avatar_properties", &mut self.avatar_properties);

        success &= archive.transfer("shard_id", &mut self.shard_id);
        success &= archive.transfer("player_name", &mut self.player_name);
        success &= archive.transfer("console_account_id_primary", &mut self.console_account_ids[0]);
        success &= archive.transfer("console_account_id_secondary", &mut self.console_account_ids[1]);
        success &= archive.transfer("secondary_player_name", &mut self.secondary_player_name);
        success &= archive.transfer("match_queue_status", &mut self.match_queue_status);
        success &= archive.transfer("email_verified", &mut self.email_verified);
        success &= archive.transfer("account_creation_timestamp", &mut self.account_creation_timestamp);

        success &= archive.transfer("party_id", &mut self.party_id);
        success &= archive.transfer("guild", &mut self.guild);

        // Always empty, discarded after reading
        let mut empty_string = String::new();
        success &= archive.transfer("empty_string", &mut empty_string);
        if !empty_string.is_empty() {
            archive.warn(
                "empty_string",
                format!("expected an empty string, read {:?}", empty_string),
            );
        }

        // Community data is sent to every audience for now
        if archive.is_decoding() {
            self.community = Community::default();
        }
        let mut has_community = true;
        success &= archive.transfer("has_community", &mut has_community);
        if has_community {
            success &= archive.transfer("community", &mut self.community);
        }

        // Unknown flag, always false
        let mut unknown_flag = false;
        success &= archive.transfer("unknown_flag", &mut unknown_flag);
        if unknown_flag {
            archive.warn("unknown_flag", "unknown flag is set");
        }

        success &= archive.transfer("unlocked_inventories", &mut self.unlocked_inventories);
        success &= archive.transfer("badges", &mut self.badges);
        success &= archive.transfer("gameplay_options", &mut self.gameplay_options);
        success &= archive.transfer("achievement_state", &mut self.achievement_state);
        success &= archive.transfer("stash_tab_options", &mut self.stash_tab_options);

        conclude(success, "Player")
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "replication_policy: {:?}", self.entity.replication_policy)?;
        writeln!(f, "properties: {}", self.entity.properties)?;
        writeln!(f, "mission_manager: {}", self.mission_manager)?;
        writeln!(f, "avatar_properties: {}", self.avatar_properties)?;
        writeln!(f, "shard_id: {}", self.shard_id)?;
        writeln!(f, "player_name: {}", self.player_name)?;
        writeln!(f, "console_account_ids[0]: {}", self.console_account_ids[0])?;
        writeln!(f, "console_account_ids[1]: {}", self.console_account_ids[1])?;
        writeln!(f, "secondary_player_name: {}", self.secondary_player_name)?;
        writeln!(f, "match_queue_status: {}", self.match_queue_status)?;
        writeln!(f, "email_verified: {}", self.email_verified)?;
        writeln!(
            f,
            "account_creation_timestamp: {}s",
            self.account_creation_timestamp.as_secs()
        )?;
        writeln!(f, "party_id: {}", self.party_id)?;
        if self.guild.is_in_guild() {
            writeln!(f, "guild: {}", self.guild)?;
        }
        writeln!(f, "community: {}", self.community)?;
        for (index, inventory_ref) in self.unlocked_inventories.iter().enumerate() {
            writeln!(f, "unlocked_inventories[{}]: {}", index, inventory_ref)?;
        }
        if !self.badges.is_empty() {
            write!(f, "badges:")?;
            for badge in &self.badges {
                write!(f, " {:?}", badge)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "gameplay_options: {}", self.gameplay_options)?;
        writeln!(f, "achievement_state: {}", self.achievement_state)?;
        for (stash_ref, options) in &self.stash_tab_options {
            writeln!(f, "stash_tab_options[{}]: {}", stash_ref, options)?;
        }
        Ok(())
    }
}
