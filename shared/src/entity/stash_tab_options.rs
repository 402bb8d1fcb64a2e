use std::fmt;

use crate::{
    archive::{Archive, TransferError},
    transfer::{conclude, Transfer},
    wire_enum,
};

/// Longest stash tab name, in characters.
pub const MAX_STASH_TAB_NAME_LENGTH: usize = 30;

wire_enum! {
    #[derive(Default)]
    pub enum StashTabColor {
        #[default]
        White = 0,
        Red = 1,
        Green = 2,
        Blue = 3,
        Purple = 4,
        Orange = 5,
        Yellow = 6,
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StashTabOptions {
    pub display_name: String,
    pub icon_path_asset_id: u64,
    pub color: StashTabColor,
    pub sort_order: i32,
}

impl Transfer for StashTabOptions {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut success = archive.transfer("display_name", &mut self.display_name);
        success &= archive.transfer("icon_path_asset_id", &mut self.icon_path_asset_id);
        success &= archive.transfer("color", &mut self.color);
        success &= archive.transfer("sort_order", &mut self.sort_order);
        conclude(success, "StashTabOptions")
    }
}

impl fmt::Display for StashTabOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" icon {:#x} {:?} #{}",
            self.display_name, self.icon_path_asset_id, self.color, self.sort_order
        )
    }
}

/// A partial change to a stash tab, as requested by a client. Fields left
/// `None` are untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StashTabOptionsUpdate {
    pub display_name: Option<String>,
    pub icon_path_asset_id: Option<u64>,
    pub color: Option<StashTabColor>,
}

impl StashTabOptionsUpdate {
    pub(crate) fn apply(self, options: &mut StashTabOptions) {
        if let Some(display_name) = self.display_name {
            options.display_name = display_name
                .chars()
                .take(MAX_STASH_TAB_NAME_LENGTH)
                .collect();
        }
        if let Some(icon_path_asset_id) = self.icon_path_asset_id {
            options.icon_path_asset_id = icon_path_asset_id;
        }
        if let Some(color) = self.color {
            options.color = color;
        }
    }
}
