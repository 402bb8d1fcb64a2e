use std::time::Duration;

use entity_archive::{
    entity::{
        AvailableBadge, CommunityCircle, GuildInfo, GuildMembership, MatchQueueState, Mission,
        MissionState, Player, PlayerAvatarIndex, StashTabColor, StashTabOptionsUpdate,
    },
    Archive, ArchiveConfig, ArchiveError, ArchiveIntent, PrototypeEnumTable, PrototypeId,
    PrototypeRefConverter, ReplicationPolicy, Transfer, TransferReport,
};

/// Routes `log` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Prototypes referenced by [`sample_player`].
pub struct SamplePrototypes;

impl SamplePrototypes {
    pub const AVATAR: PrototypeId = PrototypeId::new(0x2000_0000_0000_0001);
    pub const MISSION: PrototypeId = PrototypeId::new(0x2000_0000_0000_0002);
    pub const REGION: PrototypeId = PrototypeId::new(0x2000_0000_0000_0003);
    pub const CHAT_CHANNEL: PrototypeId = PrototypeId::new(0x2000_0000_0000_0004);
    pub const VAPORIZE_THRESHOLD: PrototypeId = PrototypeId::new(0x2000_0000_0000_0005);
    pub const GENERAL_STASH: PrototypeId = PrototypeId::new(0x2000_0000_0000_0006);
    pub const CRAFTING_STASH: PrototypeId = PrototypeId::new(0x2000_0000_0000_0007);

    pub fn all() -> Vec<PrototypeId> {
        vec![
            Self::AVATAR,
            Self::MISSION,
            Self::REGION,
            Self::CHAT_CHANNEL,
            Self::VAPORIZE_THRESHOLD,
            Self::GENERAL_STASH,
            Self::CRAFTING_STASH,
        ]
    }
}

pub fn prototype_table() -> PrototypeEnumTable {
    PrototypeEnumTable::new(SamplePrototypes::all())
}

/// One of each archive intent.
pub fn archive_intents() -> [ArchiveIntent; 3] {
    [
        ArchiveIntent::NetworkReplication(ReplicationPolicy::OWNER | ReplicationPolicy::PARTY),
        ArchiveIntent::PersistentSnapshot,
        ArchiveIntent::Migration,
    ]
}

/// A player with every section populated, referencing only
/// [`SamplePrototypes`].
pub fn sample_player() -> Player {
    let mut player = Player::new(1000, 7, "Wanda");
    player.set_name(PlayerAvatarIndex::Secondary, "Pietro");
    player.set_console_account_id(PlayerAvatarIndex::Primary, 31);
    player.set_party_id(88);
    player.entity.properties.set(0x11, 4);
    player.avatar_properties.set(0x12, 1 << 40);

    player.mission_manager.avatar = SamplePrototypes::AVATAR;
    player.mission_manager.insert_mission(
        SamplePrototypes::MISSION,
        Mission {
            state: MissionState::Completed,
            time_expire: 3_600,
            participants: vec![1001, 1002, 1003],
            suspended: false,
        },
    );
    player
        .match_queue_status
        .update(SamplePrototypes::REGION, 9, MatchQueueState::MatchFound);

    player.email_verified = true;
    player.account_creation_timestamp = Duration::from_micros(1_650_000_000_123_456);
    player.guild = GuildInfo::new(41, "Brotherhood", GuildMembership::Leader);
    player
        .community
        .add_member(1001, "Vision", CommunityCircle::Party);
    player
        .community
        .add_member(1099, "Ultron", CommunityCircle::Ignore);

    player.unlock_stash_inventory(SamplePrototypes::GENERAL_STASH);
    player.unlock_stash_inventory(SamplePrototypes::CRAFTING_STASH);
    player.add_badge(AvailableBadge::PlaytestCommands);

    player
        .gameplay_options
        .set_chat_channel_filter(SamplePrototypes::CHAT_CHANNEL, false);
    player.gameplay_options.set_option_setting(0, 75);
    player.gameplay_options.set_option_setting(4, i64::MIN);
    player.gameplay_options.armor_rarity_vaporize_threshold = SamplePrototypes::VAPORIZE_THRESHOLD;
    player
        .achievement_state
        .set_progress(12, 3, Duration::from_micros(1_650_000_500_000_000));

    player.update_stash_tab_options(
        SamplePrototypes::CRAFTING_STASH,
        StashTabOptionsUpdate {
            display_name: Some("Crafting".to_string()),
            icon_path_asset_id: Some(77),
            color: Some(StashTabColor::Purple),
        },
    );

    player
}

/// Encodes `input`, then decodes the bytes into `output`.
pub fn round_trip<T: Transfer>(
    input: &mut T,
    output: &mut T,
    intent: ArchiveIntent,
    prototypes: &dyn PrototypeRefConverter,
) -> Result<TransferReport, ArchiveError> {
    let config = ArchiveConfig::default();
    let bytes = Archive::encode(input, intent, prototypes, &config)?;
    Archive::decode(&bytes, output, intent, prototypes, &config)
}
