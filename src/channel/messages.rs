//! Outbound wire messages for the session channel.
//!
//! Serialization relies on serde's externally tagged enum form to produce
//! the session protocol shapes: a field mutation is a single-key wrapper
//! (`{"Action": {"SetNumDecks": 3}}`), zero-argument actions are bare
//! strings (`{"Action": "StartGame"}`, top-level `"ReadyCheck"`), and the
//! membership action is `{"Kick": <player id>}`.

use serde::{Deserialize, Serialize};

use crate::settings::{
    AdvancementPolicy, BidPolicy, BidReinforcementPolicy, BidTakebackPolicy, Deck,
    FirstLandlordSelectionPolicy, FriendSelectionPolicy, GameMode, GameScoringParameters,
    GameShadowingPolicy, GameStartPolicy, JokerBidPolicy, KittyBidPolicy, KittyPenalty,
    KittyTheftPolicy, MultipleJoinPolicy, PlayTakebackPolicy, ThrowEvaluationPolicy, ThrowPenalty,
    TractorRequirements, TrickDrawPolicy,
};

/// Server-assigned player identifier
pub type PlayerId = usize;

/// Top-level message accepted by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LobbyMessage {
    /// A game-state mutation or zero-argument game action
    Action(GameAction),
    /// Remove a player from the session
    Kick(PlayerId),
    /// Ask every player to confirm readiness
    ReadyCheck,
}

/// One discrete mutation command, one per configurable field, plus the
/// game-lifecycle and per-player actions issued from the lobby screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameAction {
    SetGameMode(GameMode),
    SetNumDecks(Option<usize>),
    SetSpecialDecks(Vec<Deck>),
    SetKittySize(Option<usize>),
    SetFriendSelectionPolicy(FriendSelectionPolicy),
    SetMultipleJoinPolicy(MultipleJoinPolicy),
    SetFirstLandlordSelectionPolicy(FirstLandlordSelectionPolicy),
    SetLandlord(Option<PlayerId>),
    SetLandlordEmoji(Option<String>),
    SetRank(String),
    SetHideLandlordsPoints(bool),
    SetHidePlayedCards(bool),
    SetAdvancementPolicy(AdvancementPolicy),
    SetKittyBidPolicy(KittyBidPolicy),
    SetKittyPenalty(KittyPenalty),
    SetKittyTheftPolicy(KittyTheftPolicy),
    SetThrowPenalty(ThrowPenalty),
    SetTrickDrawPolicy(TrickDrawPolicy),
    SetThrowEvaluationPolicy(ThrowEvaluationPolicy),
    SetBidPolicy(BidPolicy),
    SetBidReinforcementPolicy(BidReinforcementPolicy),
    SetJokerBidPolicy(JokerBidPolicy),
    SetShouldRevealKittyAtEndOfGame(bool),
    SetHideThrowHaltingPlayer(bool),
    SetGameScoringParameters(GameScoringParameters),
    SetPlayTakebackPolicy(PlayTakebackPolicy),
    SetBidTakebackPolicy(BidTakebackPolicy),
    SetGameShadowingPolicy(GameShadowingPolicy),
    SetGameStartPolicy(GameStartPolicy),
    SetTractorRequirements(TractorRequirements),
    StartGame,
}
