//! Canonical game settings snapshot and its building-block types.
//!
//! [`GameSettings`] is the complete, serializable configuration mirrored
//! from the server session. It is constructed from the defaults baseline at
//! session creation, mutated field-by-field through discrete commands, and
//! occasionally replaced wholesale by a load/reset flow.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{deck, validation};

pub mod policies;
pub mod scoring;

mod saved;

pub use policies::*;
pub use saved::SavedSettings;
pub use scoring::{BonusLevelPolicy, GameScoringParameters};

/// Bid ranks, two through ace. Jokers are never a minimum bid rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    #[default]
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

impl Rank {
    /// Number of ranks strictly below this one
    pub fn ranks_below(self) -> usize {
        self as usize
    }
}

/// Per-deck composition override.
///
/// Indexed implicitly by position, 1..=effective deck count. A deck equal to
/// the baseline (`min` of two, both jokers included) is never persisted or
/// transmitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub exclude_big_joker: bool,
    pub exclude_small_joker: bool,
    pub min: Rank,
}

impl Deck {
    /// Whether this deck matches the schema baseline
    pub fn is_default(&self) -> bool {
        *self == Deck::default()
    }

    /// Physical cards contributed by this deck after exclusions
    pub fn num_cards(&self) -> usize {
        let mut cards = deck::CARDS_PER_DECK;
        if self.exclude_big_joker {
            cards -= 1;
        }
        if self.exclude_small_joker {
            cards -= 1;
        }
        cards - deck::CARDS_PER_RANK * self.min.ranks_below()
    }
}

/// Game variant being configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Tractor,
    FindingFriends {
        /// `None` lets the server pick based on player count
        num_friends: Option<usize>,
    },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Tractor
    }
}

/// Minimum shape a tractor (consecutive tuples) must have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TractorRequirements {
    /// Cards per tuple, 2..=number of decks
    pub min_count: usize,
    /// Tuples in a row, 2..=12
    pub min_length: usize,
}

impl Default for TractorRequirements {
    fn default() -> Self {
        Self {
            min_count: validation::MIN_TRACTOR_WIDTH,
            min_length: validation::MIN_TRACTOR_LENGTH,
        }
    }
}

/// The complete configuration snapshot mirrored from the session.
///
/// Session membership (players, observers, landlord) is owned by other
/// flows; where deck math needs the table size, it takes a `player_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub game_mode: GameMode,
    /// `None` derives the deck count from the player count
    pub num_decks: Option<usize>,
    /// Non-default per-deck overrides only, positionally indexed
    pub special_decks: Vec<Deck>,
    /// `None` lets the server derive the kitty size
    pub kitty_size: Option<usize>,
    pub friend_selection_policy: FriendSelectionPolicy,
    pub multiple_join_policy: MultipleJoinPolicy,
    pub first_landlord_selection_policy: FirstLandlordSelectionPolicy,
    /// `None` shows the default landlord label
    pub landlord_emoji: Option<String>,
    pub hide_landlord_points: bool,
    pub hide_played_cards: bool,
    pub advancement_policy: AdvancementPolicy,
    pub kitty_bid_policy: KittyBidPolicy,
    pub kitty_penalty: KittyPenalty,
    pub kitty_theft_policy: KittyTheftPolicy,
    pub throw_penalty: ThrowPenalty,
    pub trick_draw_policy: TrickDrawPolicy,
    pub throw_evaluation_policy: ThrowEvaluationPolicy,
    pub bid_policy: BidPolicy,
    pub bid_reinforcement_policy: BidReinforcementPolicy,
    pub joker_bid_policy: JokerBidPolicy,
    pub should_reveal_kitty_at_end_of_game: bool,
    pub hide_throw_halting_player: bool,
    pub game_scoring_parameters: GameScoringParameters,
    pub play_takeback_policy: PlayTakebackPolicy,
    pub bid_takeback_policy: BidTakebackPolicy,
    pub game_shadowing_policy: GameShadowingPolicy,
    pub game_start_policy: GameStartPolicy,
    pub tractor_requirements: TractorRequirements,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            game_mode: GameMode::default(),
            num_decks: None,
            special_decks: Vec::new(),
            kitty_size: None,
            friend_selection_policy: FriendSelectionPolicy::default(),
            multiple_join_policy: MultipleJoinPolicy::default(),
            first_landlord_selection_policy: FirstLandlordSelectionPolicy::default(),
            landlord_emoji: None,
            hide_landlord_points: false,
            hide_played_cards: false,
            advancement_policy: AdvancementPolicy::default(),
            kitty_bid_policy: KittyBidPolicy::default(),
            kitty_penalty: KittyPenalty::default(),
            kitty_theft_policy: KittyTheftPolicy::default(),
            throw_penalty: ThrowPenalty::default(),
            trick_draw_policy: TrickDrawPolicy::default(),
            throw_evaluation_policy: ThrowEvaluationPolicy::default(),
            bid_policy: BidPolicy::default(),
            bid_reinforcement_policy: BidReinforcementPolicy::default(),
            joker_bid_policy: JokerBidPolicy::default(),
            should_reveal_kitty_at_end_of_game: false,
            hide_throw_halting_player: false,
            game_scoring_parameters: GameScoringParameters::default(),
            play_takeback_policy: PlayTakebackPolicy::default(),
            bid_takeback_policy: BidTakebackPolicy::default(),
            game_shadowing_policy: GameShadowingPolicy::default(),
            game_start_policy: GameStartPolicy::default(),
            tractor_requirements: TractorRequirements::default(),
        }
    }
}

impl GameSettings {
    /// Number of physical decks in play: the explicit setting, or half the
    /// player count rounded down, minimum one.
    pub fn effective_num_decks(&self, player_count: usize) -> usize {
        self.num_decks
            .filter(|&n| n > 0)
            .unwrap_or_else(|| (player_count / 2).max(1))
    }

    /// Deck list for display and editing: overrides padded with baseline
    /// decks, truncated to the effective deck count. The padding is computed
    /// on every read and never persisted.
    pub fn display_decks(&self, player_count: usize) -> Vec<Deck> {
        let count = self.effective_num_decks(player_count);
        let mut decks = self.special_decks.clone();
        decks.resize(count, Deck::default());
        decks.truncate(count);
        decks
    }

    /// Replace the deck overrides from an edited display list, filtering out
    /// decks equal to the baseline so only real overrides are kept.
    pub fn set_special_decks(&mut self, decks: Vec<Deck>) {
        self.special_decks = decks.into_iter().filter(|d| !d.is_default()).collect();
    }

    /// Total physical cards in play for the given player count
    pub fn total_cards(&self, player_count: usize) -> usize {
        self.display_decks(player_count)
            .iter()
            .map(Deck::num_cards)
            .sum()
    }

    /// Whether a kitty of `size` cards deals evenly to `player_count` hands
    pub fn kitty_size_is_valid(&self, size: usize, player_count: usize) -> bool {
        if player_count == 0 {
            return false;
        }
        let total = self.total_cards(player_count);
        size < total && (total - size) % player_count == 0
    }

    /// Largest number of friends the host may request for the player count
    pub fn max_num_friends(player_count: usize) -> usize {
        (player_count / 2).saturating_sub(1)
    }

    /// Clamp rehydrated values into their domains, warning on each fix.
    /// Called after wholesale replacement (load/reset); discrete edits are
    /// validated at the point of construction instead.
    pub fn validate_and_clamp(&mut self, player_count: usize) {
        let num_decks = self.effective_num_decks(player_count);

        if self.tractor_requirements.min_count < validation::MIN_TRACTOR_WIDTH {
            warn!(
                min_count = self.tractor_requirements.min_count,
                min = validation::MIN_TRACTOR_WIDTH,
                "tractor min_count below minimum, clamping"
            );
            self.tractor_requirements.min_count = validation::MIN_TRACTOR_WIDTH;
        } else if self.tractor_requirements.min_count > num_decks.max(validation::MIN_TRACTOR_WIDTH)
        {
            warn!(
                min_count = self.tractor_requirements.min_count,
                num_decks, "tractor min_count exceeds deck count, clamping"
            );
            self.tractor_requirements.min_count = num_decks.max(validation::MIN_TRACTOR_WIDTH);
        }

        if self.tractor_requirements.min_length < validation::MIN_TRACTOR_LENGTH {
            warn!(
                min_length = self.tractor_requirements.min_length,
                min = validation::MIN_TRACTOR_LENGTH,
                "tractor min_length below minimum, clamping"
            );
            self.tractor_requirements.min_length = validation::MIN_TRACTOR_LENGTH;
        } else if self.tractor_requirements.min_length > validation::MAX_TRACTOR_LENGTH {
            warn!(
                min_length = self.tractor_requirements.min_length,
                max = validation::MAX_TRACTOR_LENGTH,
                "tractor min_length exceeds maximum, clamping"
            );
            self.tractor_requirements.min_length = validation::MAX_TRACTOR_LENGTH;
        }

        if let Some(0) = self.num_decks {
            warn!("explicit num_decks of zero, falling back to derived count");
            self.num_decks = None;
        }

        if let GameMode::FindingFriends {
            num_friends: Some(n),
        } = self.game_mode
        {
            let max = Self::max_num_friends(player_count);
            if n == 0 || n > max {
                warn!(num_friends = n, max, "num_friends out of range, using automatic");
                self.game_mode = GameMode::FindingFriends { num_friends: None };
            }
        }

        if let Some(size) = self.kitty_size {
            if !self.kitty_size_is_valid(size, player_count) {
                warn!(
                    kitty_size = size,
                    player_count, "kitty size inconsistent with deck count, using derived"
                );
                self.kitty_size = None;
            }
        }

        self.special_decks.retain(|d| {
            if d.is_default() {
                warn!("dropping default deck record from overrides");
            }
            !d.is_default()
        });
        if self.special_decks.len() > num_decks {
            warn!(
                overrides = self.special_decks.len(),
                num_decks, "more deck overrides than decks, truncating"
            );
            self.special_decks.truncate(num_decks);
        }
    }
}
