use std::{collections::BTreeMap, fmt};

use crate::{
    archive::{Archive, TransferError},
    prototype::PrototypeId,
    transfer::{conclude, Transfer},
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GameplayOptions {
    /// Chat channel prototype to whether the channel is shown
    pub chat_channel_filters: BTreeMap<PrototypeId, bool>,
    /// Indexed by option id
    pub option_settings: Vec<i64>,
    pub armor_rarity_vaporize_threshold: PrototypeId,
}

impl GameplayOptions {
    pub fn option_setting(&self, option: usize) -> Option<i64> {
        self.option_settings.get(option).copied()
    }

    /// Grows the settings list as needed.
    pub fn set_option_setting(&mut self, option: usize, value: i64) {
        if option >= self.option_settings.len() {
            self.option_settings.resize(option + 1, 0);
        }
        self.option_settings[option] = value;
    }

    pub fn set_chat_channel_filter(&mut self, channel_ref: PrototypeId, enabled: bool) {
        self.chat_channel_filters.insert(channel_ref, enabled);
    }
}

impl Transfer for GameplayOptions {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut success = archive.transfer("chat_channel_filters", &mut self.chat_channel_filters);
        success &= archive.transfer("option_settings", &mut self.option_settings);
        success &= archive.transfer(
            "armor_rarity_vaporize_threshold",
            &mut self.armor_rarity_vaporize_threshold,
        );
        conclude(success, "GameplayOptions")
    }
}

impl fmt::Display for GameplayOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} chat filter(s), {} setting(s), vaporize threshold {}",
            self.chat_channel_filters.len(),
            self.option_settings.len(),
            self.armor_rarity_vaporize_threshold
        )
    }
}
