//! Property tests over whole archives: packed bools, strings and players.

use std::time::Duration;

use proptest::prelude::*;

use entity_archive::{
    conclude,
    entity::{
        AvailableBadge, CommunityCircle, GuildInfo, GuildMembership, Player, PlayerAvatarIndex,
    },
    Archive, ArchiveConfig, ArchiveIntent, IdentityPrototypeConverter, PrototypeId, Transfer,
    TransferError,
};
use entity_archive_test::{archive_intents, init_logging, prototype_table, round_trip, sample_player};

#[derive(Debug, Default, Clone, PartialEq)]
struct Interleaved {
    flags: Vec<bool>,
    labels: Vec<String>,
    last_flag: bool,
}

impl Transfer for Interleaved {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut success = archive.transfer("flags", &mut self.flags);
        success &= archive.transfer("labels", &mut self.labels);
        success &= archive.transfer("last_flag", &mut self.last_flag);
        conclude(success, "Interleaved")
    }
}

fn intent_strategy() -> impl Strategy<Value = ArchiveIntent> {
    (0usize..3).prop_map(|index| archive_intents()[index])
}

fn prototype_strategy() -> impl Strategy<Value = PrototypeId> {
    (1u64..u64::MAX).prop_map(PrototypeId::new)
}

fn guild_strategy() -> impl Strategy<Value = GuildInfo> {
    prop_oneof![
        Just(GuildInfo::default()),
        (1u64..u64::MAX, "[a-zA-Z ]{1,24}", 0u32..3).prop_map(|(id, name, membership)| {
            let membership = GuildMembership::from_wire(membership).unwrap_or_default();
            GuildInfo::new(id, name, membership)
        }),
    ]
}

prop_compose! {
    fn player_strategy()(
        first_replication_id in 1u64..1 << 48,
        shard_id in any::<u64>(),
        names in ("\\PC{0,20}", "\\PC{0,20}"),
        party_id in any::<u64>(),
        email_verified in any::<bool>(),
        created_micros in 0u64..1 << 53,
        guild in guild_strategy(),
        friends in prop::collection::vec((any::<u64>(), "[a-z]{0,12}"), 0..6),
        badges in prop::collection::btree_set(1u32..10, 0..9),
        inventories in prop::collection::btree_set(prototype_strategy(), 0..5),
        options in prop::collection::vec(any::<i64>(), 0..8),
        filters in prop::collection::btree_map(prototype_strategy(), any::<bool>(), 0..4),
    ) -> Player {
        let mut player = Player::new(first_replication_id, shard_id, names.0);
        player.set_name(PlayerAvatarIndex::Secondary, names.1);
        player.set_party_id(party_id);
        player.email_verified = email_verified;
        player.account_creation_timestamp = Duration::from_micros(created_micros);
        player.guild = guild;
        for (id, name) in friends {
            player.community.add_member(id, name, CommunityCircle::Friends);
        }
        for badge in badges.into_iter().filter_map(AvailableBadge::from_wire) {
            player.add_badge(badge);
        }
        for inventory in inventories {
            player.unlock_stash_inventory(inventory);
        }
        for (option, value) in options.into_iter().enumerate() {
            player.gameplay_options.set_option_setting(option, value);
        }
        player.gameplay_options.chat_channel_filters = filters;
        player
    }
}

proptest! {
    #[test]
    fn prop_bools_keep_their_order(
        flags in prop::collection::vec(any::<bool>(), 0..200),
        labels in prop::collection::vec("[a-z]{0,8}", 0..4),
        last_flag in any::<bool>(),
        intent in intent_strategy(),
    ) {
        let mut input = Interleaved { flags, labels, last_flag };
        let mut output = Interleaved::default();

        let report = round_trip(&mut input, &mut output, intent, &IdentityPrototypeConverter).unwrap();

        prop_assert!(report.success());
        prop_assert_eq!(output, input);
    }

    #[test]
    fn prop_measure_matches_encode(
        flags in prop::collection::vec(any::<bool>(), 0..40),
        labels in prop::collection::vec("\\PC{0,16}", 0..6),
    ) {
        let config = ArchiveConfig::default();
        let mut value = Interleaved { flags, labels, last_flag: true };

        let size = Archive::measure(
            &mut value,
            ArchiveIntent::PersistentSnapshot,
            &IdentityPrototypeConverter,
            &config,
        ).unwrap();
        let bytes = Archive::encode(
            &mut value,
            ArchiveIntent::PersistentSnapshot,
            &IdentityPrototypeConverter,
            &config,
        ).unwrap();

        prop_assert_eq!(size, bytes.len());
    }

    #[test]
    fn prop_players_round_trip(mut input in player_strategy(), intent in intent_strategy()) {
        let mut output = Player::default();

        let report = round_trip(&mut input, &mut output, intent, &IdentityPrototypeConverter).unwrap();

        prop_assert!(report.success());
        prop_assert!(report.warnings().is_empty());
        prop_assert_eq!(output, input);
    }

    #[test]
    fn prop_decoding_overwrites_previous_state(mut input in player_strategy()) {
        // the destination starts fully populated and must end up equal to the input
        let mut output = sample_player();

        round_trip(
            &mut input,
            &mut output,
            ArchiveIntent::Migration,
            &IdentityPrototypeConverter,
        ).unwrap();

        prop_assert_eq!(output, input);
    }
}

#[test]
fn sample_player_round_trips_through_the_prototype_table() {
    init_logging();
    let table = prototype_table();

    for intent in archive_intents() {
        let mut input = sample_player();
        let mut output = Player::default();

        let report = round_trip(&mut input, &mut output, intent, &table).unwrap();

        assert!(report.success());
        assert_eq!(output, input, "intent {:?}", intent);
    }
}

#[test]
fn prototype_table_encoding_is_smaller_than_identity() {
    let config = ArchiveConfig::default();
    let table = prototype_table();
    let mut player = sample_player();

    let with_table =
        Archive::measure(&mut player, ArchiveIntent::Migration, &table, &config).unwrap();
    let with_identity = Archive::measure(
        &mut player,
        ArchiveIntent::Migration,
        &IdentityPrototypeConverter,
        &config,
    )
    .unwrap();

    // every 64-bit prototype id shrinks to a one-byte table index
    assert!(with_table < with_identity);
}
