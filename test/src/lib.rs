//! Shared fixtures for the entity archive integration tests.

mod fixtures;

pub use fixtures::{
    archive_intents, init_logging, prototype_table, round_trip, sample_player, SamplePrototypes,
};
