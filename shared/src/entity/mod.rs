mod achievement_state;
mod community;
mod entity_base;
mod gameplay_options;
mod guild;
mod match_queue_status;
mod mission_manager;
mod player;
mod property_collection;
mod replicated_variable;
mod stash_tab_options;

pub use achievement_state::{AchievementProgress, AchievementState};
pub use community::{Community, CommunityCircle, CommunityMember};
pub use entity_base::EntityBase;
pub use gameplay_options::GameplayOptions;
pub use guild::{GuildInfo, GuildMembership, INVALID_GUILD_ID};
pub use match_queue_status::{MatchQueueRegionStatus, MatchQueueState, MatchQueueStatus};
pub use mission_manager::{Mission, MissionManager, MissionState};
pub use player::{AvailableBadge, Player, PlayerAvatarIndex};
pub use property_collection::ReplicatedPropertyCollection;
pub use replicated_variable::ReplicatedVariable;
pub use stash_tab_options::{
    StashTabColor, StashTabOptions, StashTabOptionsUpdate, MAX_STASH_TAB_NAME_LENGTH,
};
