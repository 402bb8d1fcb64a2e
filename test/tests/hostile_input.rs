//! Decoding arbitrary bytes must fail cleanly, never panic or allocate
//! without bound.

use proptest::prelude::*;

use entity_archive::{
    entity::Player, Archive, ArchiveConfig, ArchiveError, ArchiveIntent,
    IdentityPrototypeConverter, SerdeErr, TransferError,
};
use entity_archive_test::{archive_intents, prototype_table, sample_player};

fn decode_player(bytes: &[u8], intent: ArchiveIntent) -> Result<Player, ArchiveError> {
    let config = ArchiveConfig::default();
    let table = prototype_table();
    let mut player = Player::default();
    Archive::decode(bytes, &mut player, intent, &table, &config)?;
    Ok(player)
}

fn encoded_sample() -> Vec<u8> {
    let config = ArchiveConfig::default();
    Archive::encode(
        &mut sample_player(),
        ArchiveIntent::PersistentSnapshot,
        &prototype_table(),
        &config,
    )
    .unwrap()
}

proptest! {
    #[test]
    fn prop_garbage_never_panics(
        bytes in prop::collection::vec(any::<u8>(), 0..256),
        intent_index in 0usize..3,
    ) {
        let _ = decode_player(&bytes, archive_intents()[intent_index]);
    }

    #[test]
    fn prop_corrupted_archive_never_panics(index in any::<prop::sample::Index>(), byte in any::<u8>()) {
        let mut bytes = encoded_sample();
        let position = index.index(bytes.len());
        bytes[position] = byte;

        let _ = decode_player(&bytes, ArchiveIntent::PersistentSnapshot);
    }

    #[test]
    fn prop_every_truncation_fails(cut in any::<prop::sample::Index>()) {
        let bytes = encoded_sample();
        let cut = cut.index(bytes.len());

        prop_assert!(decode_player(&bytes[..cut], ArchiveIntent::PersistentSnapshot).is_err());
    }
}

#[test]
fn oversized_collection_count_is_rejected() {
    let config = ArchiveConfig {
        max_collection_length: 4,
        ..ArchiveConfig::default()
    };
    let mut values: Vec<u64> = Vec::new();

    // no bools, then a count of five
    let error = Archive::decode(
        &[0x00, 0x05, 0x01, 0x02, 0x03, 0x04, 0x05],
        &mut values,
        ArchiveIntent::Migration,
        &IdentityPrototypeConverter,
        &config,
    )
    .unwrap_err();

    assert_eq!(
        error.report().unwrap().failures()[0].error,
        TransferError::Serde(SerdeErr::LengthLimit {
            length: 5,
            limit: 4
        })
    );
    assert!(values.is_empty());
}

#[test]
fn oversized_string_is_rejected_before_reading() {
    let config = ArchiveConfig {
        max_string_length: 3,
        ..ArchiveConfig::default()
    };
    let mut name = String::from("kept");

    let error = Archive::decode(
        &[0x00, 0x04, b'a', b'b', b'c', b'd'],
        &mut name,
        ArchiveIntent::Migration,
        &IdentityPrototypeConverter,
        &config,
    )
    .unwrap_err();

    assert!(error.report().unwrap().has_failure_at(""));
    assert_eq!(name, "kept");
}
