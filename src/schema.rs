//! Field table for the settings snapshot.
//!
//! [`SettingsField`] is the single source of truth tying each configurable
//! field to its synchronization position, its outbound command, its baseline
//! value, and its domain check. Synchronization never iterates a key/value
//! map: [`SettingsField::ORDER`] is a declared constant, so the dependency
//! between deck count and kitty size is explicit rather than an accident of
//! enumeration order.

use crate::channel::messages::GameAction;
use crate::settings::{GameMode, GameSettings};

/// One configurable field of [`GameSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    GameMode,
    NumDecks,
    SpecialDecks,
    KittySize,
    FriendSelectionPolicy,
    MultipleJoinPolicy,
    FirstLandlordSelectionPolicy,
    LandlordEmoji,
    HideLandlordPoints,
    HidePlayedCards,
    AdvancementPolicy,
    KittyBidPolicy,
    KittyPenalty,
    KittyTheftPolicy,
    ThrowPenalty,
    TrickDrawPolicy,
    ThrowEvaluationPolicy,
    BidPolicy,
    BidReinforcementPolicy,
    JokerBidPolicy,
    ShouldRevealKittyAtEndOfGame,
    HideThrowHaltingPlayer,
    GameScoringParameters,
    PlayTakebackPolicy,
    BidTakebackPolicy,
    GameShadowingPolicy,
    GameStartPolicy,
    TractorRequirements,
}

/// Applying the first field's command resets the second field to its own
/// default on the remote side. Consulted by the fixup pass: clobbered fields
/// are withheld from the primary pass and re-sent once all triggers are in.
pub const SIDE_EFFECTS: &[(SettingsField, SettingsField)] =
    &[(SettingsField::NumDecks, SettingsField::KittySize)];

impl SettingsField {
    /// Fixed, dependency-aware synchronization order. Fields with side
    /// effects on other fields come before the fields they affect;
    /// `NumDecks` precedes `SpecialDecks` and `KittySize`.
    pub const ORDER: &'static [SettingsField] = &[
        SettingsField::GameMode,
        SettingsField::NumDecks,
        SettingsField::SpecialDecks,
        SettingsField::KittySize,
        SettingsField::FriendSelectionPolicy,
        SettingsField::MultipleJoinPolicy,
        SettingsField::FirstLandlordSelectionPolicy,
        SettingsField::LandlordEmoji,
        SettingsField::HideLandlordPoints,
        SettingsField::HidePlayedCards,
        SettingsField::AdvancementPolicy,
        SettingsField::KittyBidPolicy,
        SettingsField::KittyPenalty,
        SettingsField::KittyTheftPolicy,
        SettingsField::ThrowPenalty,
        SettingsField::TrickDrawPolicy,
        SettingsField::ThrowEvaluationPolicy,
        SettingsField::BidPolicy,
        SettingsField::BidReinforcementPolicy,
        SettingsField::JokerBidPolicy,
        SettingsField::ShouldRevealKittyAtEndOfGame,
        SettingsField::HideThrowHaltingPlayer,
        SettingsField::GameScoringParameters,
        SettingsField::PlayTakebackPolicy,
        SettingsField::BidTakebackPolicy,
        SettingsField::GameShadowingPolicy,
        SettingsField::GameStartPolicy,
        SettingsField::TractorRequirements,
    ];

    /// Whether some other field's command resets this one remotely
    pub fn is_side_effect_target(self) -> bool {
        SIDE_EFFECTS.iter().any(|&(_, target)| target == self)
    }

    /// The outbound command carrying this field's desired value
    pub fn command(self, settings: &GameSettings) -> GameAction {
        match self {
            SettingsField::GameMode => GameAction::SetGameMode(settings.game_mode.clone()),
            SettingsField::NumDecks => GameAction::SetNumDecks(settings.num_decks),
            SettingsField::SpecialDecks => {
                GameAction::SetSpecialDecks(settings.special_decks.clone())
            }
            SettingsField::KittySize => GameAction::SetKittySize(settings.kitty_size),
            SettingsField::FriendSelectionPolicy => {
                GameAction::SetFriendSelectionPolicy(settings.friend_selection_policy)
            }
            SettingsField::MultipleJoinPolicy => {
                GameAction::SetMultipleJoinPolicy(settings.multiple_join_policy)
            }
            SettingsField::FirstLandlordSelectionPolicy => {
                GameAction::SetFirstLandlordSelectionPolicy(
                    settings.first_landlord_selection_policy,
                )
            }
            SettingsField::LandlordEmoji => {
                GameAction::SetLandlordEmoji(settings.landlord_emoji.clone())
            }
            SettingsField::HideLandlordPoints => {
                GameAction::SetHideLandlordsPoints(settings.hide_landlord_points)
            }
            SettingsField::HidePlayedCards => {
                GameAction::SetHidePlayedCards(settings.hide_played_cards)
            }
            SettingsField::AdvancementPolicy => {
                GameAction::SetAdvancementPolicy(settings.advancement_policy)
            }
            SettingsField::KittyBidPolicy => {
                GameAction::SetKittyBidPolicy(settings.kitty_bid_policy)
            }
            SettingsField::KittyPenalty => GameAction::SetKittyPenalty(settings.kitty_penalty),
            SettingsField::KittyTheftPolicy => {
                GameAction::SetKittyTheftPolicy(settings.kitty_theft_policy)
            }
            SettingsField::ThrowPenalty => GameAction::SetThrowPenalty(settings.throw_penalty),
            SettingsField::TrickDrawPolicy => {
                GameAction::SetTrickDrawPolicy(settings.trick_draw_policy)
            }
            SettingsField::ThrowEvaluationPolicy => {
                GameAction::SetThrowEvaluationPolicy(settings.throw_evaluation_policy)
            }
            SettingsField::BidPolicy => GameAction::SetBidPolicy(settings.bid_policy),
            SettingsField::BidReinforcementPolicy => {
                GameAction::SetBidReinforcementPolicy(settings.bid_reinforcement_policy)
            }
            SettingsField::JokerBidPolicy => {
                GameAction::SetJokerBidPolicy(settings.joker_bid_policy)
            }
            SettingsField::ShouldRevealKittyAtEndOfGame => {
                GameAction::SetShouldRevealKittyAtEndOfGame(
                    settings.should_reveal_kitty_at_end_of_game,
                )
            }
            SettingsField::HideThrowHaltingPlayer => {
                GameAction::SetHideThrowHaltingPlayer(settings.hide_throw_halting_player)
            }
            SettingsField::GameScoringParameters => {
                GameAction::SetGameScoringParameters(settings.game_scoring_parameters.clone())
            }
            SettingsField::PlayTakebackPolicy => {
                GameAction::SetPlayTakebackPolicy(settings.play_takeback_policy)
            }
            SettingsField::BidTakebackPolicy => {
                GameAction::SetBidTakebackPolicy(settings.bid_takeback_policy)
            }
            SettingsField::GameShadowingPolicy => {
                GameAction::SetGameShadowingPolicy(settings.game_shadowing_policy)
            }
            SettingsField::GameStartPolicy => {
                GameAction::SetGameStartPolicy(settings.game_start_policy)
            }
            SettingsField::TractorRequirements => {
                GameAction::SetTractorRequirements(settings.tractor_requirements)
            }
        }
    }

    /// Whether this field currently holds its schema baseline value
    pub fn is_default(self, settings: &GameSettings) -> bool {
        let baseline = GameSettings::default();
        match self {
            SettingsField::GameMode => settings.game_mode == baseline.game_mode,
            SettingsField::NumDecks => settings.num_decks == baseline.num_decks,
            SettingsField::SpecialDecks => settings.special_decks == baseline.special_decks,
            SettingsField::KittySize => settings.kitty_size == baseline.kitty_size,
            SettingsField::FriendSelectionPolicy => {
                settings.friend_selection_policy == baseline.friend_selection_policy
            }
            SettingsField::MultipleJoinPolicy => {
                settings.multiple_join_policy == baseline.multiple_join_policy
            }
            SettingsField::FirstLandlordSelectionPolicy => {
                settings.first_landlord_selection_policy
                    == baseline.first_landlord_selection_policy
            }
            SettingsField::LandlordEmoji => settings.landlord_emoji == baseline.landlord_emoji,
            SettingsField::HideLandlordPoints => {
                settings.hide_landlord_points == baseline.hide_landlord_points
            }
            SettingsField::HidePlayedCards => {
                settings.hide_played_cards == baseline.hide_played_cards
            }
            SettingsField::AdvancementPolicy => {
                settings.advancement_policy == baseline.advancement_policy
            }
            SettingsField::KittyBidPolicy => settings.kitty_bid_policy == baseline.kitty_bid_policy,
            SettingsField::KittyPenalty => settings.kitty_penalty == baseline.kitty_penalty,
            SettingsField::KittyTheftPolicy => {
                settings.kitty_theft_policy == baseline.kitty_theft_policy
            }
            SettingsField::ThrowPenalty => settings.throw_penalty == baseline.throw_penalty,
            SettingsField::TrickDrawPolicy => {
                settings.trick_draw_policy == baseline.trick_draw_policy
            }
            SettingsField::ThrowEvaluationPolicy => {
                settings.throw_evaluation_policy == baseline.throw_evaluation_policy
            }
            SettingsField::BidPolicy => settings.bid_policy == baseline.bid_policy,
            SettingsField::BidReinforcementPolicy => {
                settings.bid_reinforcement_policy == baseline.bid_reinforcement_policy
            }
            SettingsField::JokerBidPolicy => settings.joker_bid_policy == baseline.joker_bid_policy,
            SettingsField::ShouldRevealKittyAtEndOfGame => {
                settings.should_reveal_kitty_at_end_of_game
                    == baseline.should_reveal_kitty_at_end_of_game
            }
            SettingsField::HideThrowHaltingPlayer => {
                settings.hide_throw_halting_player == baseline.hide_throw_halting_player
            }
            SettingsField::GameScoringParameters => {
                settings.game_scoring_parameters == baseline.game_scoring_parameters
            }
            SettingsField::PlayTakebackPolicy => {
                settings.play_takeback_policy == baseline.play_takeback_policy
            }
            SettingsField::BidTakebackPolicy => {
                settings.bid_takeback_policy == baseline.bid_takeback_policy
            }
            SettingsField::GameShadowingPolicy => {
                settings.game_shadowing_policy == baseline.game_shadowing_policy
            }
            SettingsField::GameStartPolicy => {
                settings.game_start_policy == baseline.game_start_policy
            }
            SettingsField::TractorRequirements => {
                settings.tractor_requirements == baseline.tractor_requirements
            }
        }
    }

    /// Domain check for this field's current value. Enforced when a value is
    /// constructed or edited; the synchronization engine does not re-run it.
    pub fn validate(self, settings: &GameSettings, player_count: usize) -> bool {
        use crate::constants::validation::*;

        match self {
            SettingsField::GameMode => match settings.game_mode {
                GameMode::Tractor => true,
                GameMode::FindingFriends { num_friends: None } => true,
                GameMode::FindingFriends {
                    num_friends: Some(n),
                } => n >= 1 && n <= GameSettings::max_num_friends(player_count),
            },
            SettingsField::NumDecks => settings.num_decks.is_none_or(|n| n > 0),
            SettingsField::SpecialDecks => {
                settings.special_decks.len() <= settings.effective_num_decks(player_count)
                    && settings.special_decks.iter().all(|d| !d.is_default())
            }
            SettingsField::KittySize => settings
                .kitty_size
                .is_none_or(|size| settings.kitty_size_is_valid(size, player_count)),
            SettingsField::TractorRequirements => {
                let req = settings.tractor_requirements;
                req.min_count >= MIN_TRACTOR_WIDTH
                    && req.min_count <= settings.effective_num_decks(player_count).max(MIN_TRACTOR_WIDTH)
                    && req.min_length >= MIN_TRACTOR_LENGTH
                    && req.min_length <= MAX_TRACTOR_LENGTH
            }
            // Closed enums and flags cannot hold an out-of-domain value
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Deck, Rank, TractorRequirements};

    #[test]
    fn test_order_covers_every_field_once() {
        assert_eq!(SettingsField::ORDER.len(), 28);
        for (i, a) in SettingsField::ORDER.iter().enumerate() {
            for b in &SettingsField::ORDER[i + 1..] {
                assert_ne!(a, b, "{a:?} listed twice");
            }
        }
    }

    #[test]
    fn test_num_decks_ordered_before_dependents() {
        let pos = |f: SettingsField| {
            SettingsField::ORDER
                .iter()
                .position(|&x| x == f)
                .expect("field missing from ORDER")
        };
        assert!(pos(SettingsField::NumDecks) < pos(SettingsField::SpecialDecks));
        assert!(pos(SettingsField::NumDecks) < pos(SettingsField::KittySize));
    }

    #[test]
    fn test_side_effect_triggers_precede_targets() {
        let pos = |f: SettingsField| {
            SettingsField::ORDER.iter().position(|&x| x == f).unwrap()
        };
        for &(trigger, target) in SIDE_EFFECTS {
            assert!(pos(trigger) < pos(target));
            assert!(target.is_side_effect_target());
        }
        assert!(!SettingsField::NumDecks.is_side_effect_target());
    }

    #[test]
    fn test_command_carries_desired_value() {
        let settings = GameSettings {
            num_decks: Some(3),
            kitty_size: Some(8),
            ..GameSettings::default()
        };
        assert_eq!(
            SettingsField::NumDecks.command(&settings),
            GameAction::SetNumDecks(Some(3))
        );
        assert_eq!(
            SettingsField::KittySize.command(&settings),
            GameAction::SetKittySize(Some(8))
        );
        assert_eq!(
            SettingsField::SpecialDecks.command(&settings),
            GameAction::SetSpecialDecks(vec![])
        );
    }

    #[test]
    fn test_is_default_tracks_baseline() {
        let mut settings = GameSettings::default();
        assert!(SettingsField::KittySize.is_default(&settings));
        settings.kitty_size = Some(8);
        assert!(!SettingsField::KittySize.is_default(&settings));
        assert!(SettingsField::BidPolicy.is_default(&settings));
    }

    #[test]
    fn test_validate_tractor_requirements() {
        let mut settings = GameSettings {
            num_decks: Some(3),
            ..GameSettings::default()
        };
        settings.tractor_requirements = TractorRequirements {
            min_count: 3,
            min_length: 12,
        };
        assert!(SettingsField::TractorRequirements.validate(&settings, 6));

        settings.tractor_requirements.min_count = 4;
        assert!(!SettingsField::TractorRequirements.validate(&settings, 6));

        settings.tractor_requirements = TractorRequirements {
            min_count: 2,
            min_length: 13,
        };
        assert!(!SettingsField::TractorRequirements.validate(&settings, 6));
    }

    #[test]
    fn test_validate_kitty_size_against_deck_math() {
        let settings = GameSettings {
            kitty_size: Some(8),
            ..GameSettings::default()
        };
        // Two decks, four players: 108 cards, 8 in the kitty deals evenly
        assert!(SettingsField::KittySize.validate(&settings, 4));
        let settings = GameSettings {
            kitty_size: Some(9),
            ..settings
        };
        assert!(!SettingsField::KittySize.validate(&settings, 4));
    }

    #[test]
    fn test_validate_num_friends_range() {
        let settings = GameSettings {
            game_mode: crate::settings::GameMode::FindingFriends {
                num_friends: Some(2),
            },
            ..GameSettings::default()
        };
        // Six players allow at most two friends
        assert!(SettingsField::GameMode.validate(&settings, 6));
        assert!(!SettingsField::GameMode.validate(&settings, 4));
    }

    #[test]
    fn test_validate_special_decks() {
        let mut settings = GameSettings {
            num_decks: Some(2),
            ..GameSettings::default()
        };
        settings.special_decks = vec![Deck {
            min: Rank::Five,
            ..Deck::default()
        }];
        assert!(SettingsField::SpecialDecks.validate(&settings, 4));

        // A default record must never appear in the override list
        settings.special_decks.push(Deck::default());
        assert!(!SettingsField::SpecialDecks.validate(&settings, 4));
    }
}
