//! Persisted form of the settings snapshot.
//!
//! Every field is optional so a snapshot written by an older or newer build
//! still loads: unknown keys are ignored, missing keys fall back to the
//! baseline during [`SavedSettings::merge_over`]. The write path always
//! emits every known field.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::policies::*;
use super::scoring::{BonusLevelPolicy, GameScoringParameters};
use super::{Deck, GameMode, GameSettings, TractorRequirements};

/// All-optional mirror of [`GameSettings`] used for storage and for the
/// defaults document.
///
/// For the fields whose live value is itself optional (`num_decks`,
/// `kitty_size`, `landlord_emoji`), a stored JSON `null` and an absent key
/// are treated alike: both take the baseline value, which is null for all
/// of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedSettings {
    pub game_mode: Option<GameMode>,
    pub num_decks: Option<usize>,
    pub special_decks: Option<Vec<Deck>>,
    pub kitty_size: Option<usize>,
    pub friend_selection_policy: Option<FriendSelectionPolicy>,
    pub multiple_join_policy: Option<MultipleJoinPolicy>,
    pub first_landlord_selection_policy: Option<FirstLandlordSelectionPolicy>,
    pub landlord_emoji: Option<String>,
    pub hide_landlord_points: Option<bool>,
    pub hide_played_cards: Option<bool>,
    pub advancement_policy: Option<AdvancementPolicy>,
    pub kitty_bid_policy: Option<KittyBidPolicy>,
    pub kitty_penalty: Option<KittyPenalty>,
    pub kitty_theft_policy: Option<KittyTheftPolicy>,
    pub throw_penalty: Option<ThrowPenalty>,
    pub trick_draw_policy: Option<TrickDrawPolicy>,
    pub throw_evaluation_policy: Option<ThrowEvaluationPolicy>,
    pub bid_policy: Option<BidPolicy>,
    pub bid_reinforcement_policy: Option<BidReinforcementPolicy>,
    pub joker_bid_policy: Option<JokerBidPolicy>,
    pub should_reveal_kitty_at_end_of_game: Option<bool>,
    pub hide_throw_halting_player: Option<bool>,
    pub game_scoring_parameters: Option<GameScoringParameters>,
    pub play_takeback_policy: Option<PlayTakebackPolicy>,
    pub bid_takeback_policy: Option<BidTakebackPolicy>,
    pub game_shadowing_policy: Option<GameShadowingPolicy>,
    pub game_start_policy: Option<GameStartPolicy>,
    pub tractor_requirements: Option<TractorRequirements>,

    /// Legacy top-level key from before the scoring parameters were nested.
    /// Accepted on read only; see [`SavedSettings::merge_over`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_level_policy: Option<BonusLevelPolicy>,
}

impl SavedSettings {
    /// Shallow-merge this snapshot over a complete baseline: every present
    /// field wins, every absent field takes the baseline value.
    ///
    /// Backward-compatibility fixup: a legacy top-level `bonus_level_policy`
    /// that disagrees with the nested scoring value overwrites the nested
    /// value before the merge completes.
    pub fn merge_over(self, baseline: GameSettings) -> GameSettings {
        let mut scoring = self
            .game_scoring_parameters
            .unwrap_or(baseline.game_scoring_parameters);
        if let Some(legacy) = self.bonus_level_policy {
            if legacy != scoring.bonus_level_policy {
                info!(
                    legacy = ?legacy,
                    nested = ?scoring.bonus_level_policy,
                    "legacy bonus_level_policy overrides nested scoring value"
                );
                scoring.bonus_level_policy = legacy;
            }
        }

        GameSettings {
            game_mode: self.game_mode.unwrap_or(baseline.game_mode),
            num_decks: self.num_decks.or(baseline.num_decks),
            special_decks: self.special_decks.unwrap_or(baseline.special_decks),
            kitty_size: self.kitty_size.or(baseline.kitty_size),
            friend_selection_policy: self
                .friend_selection_policy
                .unwrap_or(baseline.friend_selection_policy),
            multiple_join_policy: self
                .multiple_join_policy
                .unwrap_or(baseline.multiple_join_policy),
            first_landlord_selection_policy: self
                .first_landlord_selection_policy
                .unwrap_or(baseline.first_landlord_selection_policy),
            landlord_emoji: self.landlord_emoji.or(baseline.landlord_emoji),
            hide_landlord_points: self
                .hide_landlord_points
                .unwrap_or(baseline.hide_landlord_points),
            hide_played_cards: self.hide_played_cards.unwrap_or(baseline.hide_played_cards),
            advancement_policy: self
                .advancement_policy
                .unwrap_or(baseline.advancement_policy),
            kitty_bid_policy: self.kitty_bid_policy.unwrap_or(baseline.kitty_bid_policy),
            kitty_penalty: self.kitty_penalty.unwrap_or(baseline.kitty_penalty),
            kitty_theft_policy: self
                .kitty_theft_policy
                .unwrap_or(baseline.kitty_theft_policy),
            throw_penalty: self.throw_penalty.unwrap_or(baseline.throw_penalty),
            trick_draw_policy: self.trick_draw_policy.unwrap_or(baseline.trick_draw_policy),
            throw_evaluation_policy: self
                .throw_evaluation_policy
                .unwrap_or(baseline.throw_evaluation_policy),
            bid_policy: self.bid_policy.unwrap_or(baseline.bid_policy),
            bid_reinforcement_policy: self
                .bid_reinforcement_policy
                .unwrap_or(baseline.bid_reinforcement_policy),
            joker_bid_policy: self.joker_bid_policy.unwrap_or(baseline.joker_bid_policy),
            should_reveal_kitty_at_end_of_game: self
                .should_reveal_kitty_at_end_of_game
                .unwrap_or(baseline.should_reveal_kitty_at_end_of_game),
            hide_throw_halting_player: self
                .hide_throw_halting_player
                .unwrap_or(baseline.hide_throw_halting_player),
            game_scoring_parameters: scoring,
            play_takeback_policy: self
                .play_takeback_policy
                .unwrap_or(baseline.play_takeback_policy),
            bid_takeback_policy: self
                .bid_takeback_policy
                .unwrap_or(baseline.bid_takeback_policy),
            game_shadowing_policy: self
                .game_shadowing_policy
                .unwrap_or(baseline.game_shadowing_policy),
            game_start_policy: self.game_start_policy.unwrap_or(baseline.game_start_policy),
            tractor_requirements: self
                .tractor_requirements
                .unwrap_or(baseline.tractor_requirements),
        }
    }
}

impl From<&GameSettings> for SavedSettings {
    fn from(s: &GameSettings) -> Self {
        Self {
            game_mode: Some(s.game_mode.clone()),
            num_decks: s.num_decks,
            special_decks: Some(s.special_decks.clone()),
            kitty_size: s.kitty_size,
            friend_selection_policy: Some(s.friend_selection_policy),
            multiple_join_policy: Some(s.multiple_join_policy),
            first_landlord_selection_policy: Some(s.first_landlord_selection_policy),
            landlord_emoji: s.landlord_emoji.clone(),
            hide_landlord_points: Some(s.hide_landlord_points),
            hide_played_cards: Some(s.hide_played_cards),
            advancement_policy: Some(s.advancement_policy),
            kitty_bid_policy: Some(s.kitty_bid_policy),
            kitty_penalty: Some(s.kitty_penalty),
            kitty_theft_policy: Some(s.kitty_theft_policy),
            throw_penalty: Some(s.throw_penalty),
            trick_draw_policy: Some(s.trick_draw_policy),
            throw_evaluation_policy: Some(s.throw_evaluation_policy),
            bid_policy: Some(s.bid_policy),
            bid_reinforcement_policy: Some(s.bid_reinforcement_policy),
            joker_bid_policy: Some(s.joker_bid_policy),
            should_reveal_kitty_at_end_of_game: Some(s.should_reveal_kitty_at_end_of_game),
            hide_throw_halting_player: Some(s.hide_throw_halting_player),
            game_scoring_parameters: Some(s.game_scoring_parameters.clone()),
            play_takeback_policy: Some(s.play_takeback_policy),
            bid_takeback_policy: Some(s.bid_takeback_policy),
            game_shadowing_policy: Some(s.game_shadowing_policy),
            game_start_policy: Some(s.game_start_policy),
            tractor_requirements: Some(s.tractor_requirements),
            bonus_level_policy: None,
        }
    }
}
