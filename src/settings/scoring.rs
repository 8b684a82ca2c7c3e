//! Game scoring parameters.
//!
//! This record is owned by the scoring subsystem on the server; the lobby
//! treats it as a single atomic field. The only part ever inspected here is
//! `bonus_level_policy`, and only for the legacy merge fixup in
//! [`crate::settings::SavedSettings`].

use serde::{Deserialize, Serialize};

/// Whether the landlord team earns a bonus level for winning undersized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusLevelPolicy {
    NoBonusLevel,
    #[default]
    BonusLevelForSmallerLandlordTeam,
}

/// Score-to-level conversion thresholds, propagated as one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameScoringParameters {
    pub step_size_per_deck: usize,
    pub num_steps_to_non_landlord_turnover: usize,
    pub deadzone_size: usize,
    pub truncate_zero_crossing_window: bool,
    pub bonus_level_policy: BonusLevelPolicy,
}

impl Default for GameScoringParameters {
    fn default() -> Self {
        Self {
            step_size_per_deck: 20,
            num_steps_to_non_landlord_turnover: 2,
            deadzone_size: 1,
            truncate_zero_crossing_window: true,
            bonus_level_policy: BonusLevelPolicy::default(),
        }
    }
}
