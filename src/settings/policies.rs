//! Closed rule-policy enums.
//!
//! Each policy is a fixed set of variants understood by the game server;
//! wire and persisted forms are the bare variant name. The default variant
//! of each enum is the schema baseline.

use serde::{Deserialize, Serialize};

/// Which cards may be called as friends in Finding Friends mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FriendSelectionPolicy {
    #[default]
    Unrestricted,
    TrumpsIncluded,
    HighestCardNotAllowed,
    PointCardNotAllowed,
}

/// Whether a player may join the defending team more than once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultipleJoinPolicy {
    #[default]
    Unrestricted,
    NoDoubleJoin,
}

/// How the first landlord is determined at game start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstLandlordSelectionPolicy {
    #[default]
    ByWinningBid,
    ByFirstBid,
}

/// Which ranks must be defended before advancing past them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvancementPolicy {
    #[default]
    Unrestricted,
    FullyUnrestricted,
    DefendPoints,
}

/// What it takes to outbid an existing bid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidPolicy {
    #[default]
    JokerOrHigherSuit,
    JokerOrGreaterLength,
    GreaterLength,
}

/// Who may reinforce or overturn a standing bid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidReinforcementPolicy {
    #[default]
    ReinforceWhileWinning,
    ReinforceWhileEquivalent,
    OverturnOrReinforceWhileWinning,
}

/// Joker counts required for a no-trump bid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JokerBidPolicy {
    #[default]
    BothTwoOrMore,
    BothNumDecks,
    LJNumDecksHJNumDecksLessOne,
}

/// How trump is picked when nobody bids and the kitty is revealed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KittyBidPolicy {
    #[default]
    FirstCard,
    FirstCardOfLevelOrHighest,
}

/// Whether the kitty may be stolen by outbidding after the deal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KittyTheftPolicy {
    #[default]
    AllowKittyTheft,
    NoKittyTheft,
}

/// Format-matching requirements when following a trick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrickDrawPolicy {
    NoProtections,
    #[default]
    LongerTuplesProtected,
    OnlyDrawTractorOnTractor,
    NoFormatBasedDraw,
}

/// How a throw is compared against responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrowEvaluationPolicy {
    #[default]
    All,
    Highest,
    TrickUnitLength,
}

/// Penalty applied for a failed throw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrowPenalty {
    None,
    #[default]
    TenPointsPerAttempt,
}

/// Multiplier applied to points buried in the kitty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KittyPenalty {
    #[default]
    Times,
    Power,
}

/// Whether a played card may be taken back before the trick completes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayTakebackPolicy {
    AllowPlayTakeback,
    #[default]
    NoPlayTakeback,
}

/// Whether a bid may be taken back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidTakebackPolicy {
    #[default]
    AllowBidTakeback,
    NoBidTakeback,
}

/// Who may press the start button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStartPolicy {
    #[default]
    AllowAnyPlayer,
    AllowLandlordOnly,
}

/// Whether a second session may shadow a seated player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameShadowingPolicy {
    #[default]
    AllowMultipleSessions,
    SingleSessionOnly,
}
