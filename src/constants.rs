//! Application-wide constants
//!
//! Single source of truth for storage locations, deck arithmetic, and
//! validation bounds used throughout the crate.

/// Local persistence locations
pub mod storage {
    /// Directory under the user config dir holding lobby state
    pub const APP_DIR: &str = "tractor-lobby";

    /// Well-known file name for the saved game settings snapshot
    pub const SETTINGS_FILE: &str = "game_settings.json";
}

/// Defaults resource
pub mod defaults {
    /// Relative path of the static defaults document
    pub const RESOURCE: &str = "default_settings.json";
}

/// Physical deck arithmetic
pub mod deck {
    /// Cards in a full deck including both jokers
    pub const CARDS_PER_DECK: usize = 54;

    /// Cards of each rank per deck (one per suit)
    pub const CARDS_PER_RANK: usize = 4;
}

/// Validation bounds for configurable values
pub mod validation {
    /// Minimum tractor width (cards per tuple)
    pub const MIN_TRACTOR_WIDTH: usize = 2;

    /// Minimum tractor length (tuples)
    pub const MIN_TRACTOR_LENGTH: usize = 2;

    /// Maximum tractor length (tuples)
    pub const MAX_TRACTOR_LENGTH: usize = 12;
}

/// Session channel framing
pub mod channel {
    /// Maximum framed message size (1 MB) to prevent unbounded allocation
    pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

    /// Socket file name for the framed local transport
    pub const SOCKET_FILE: &str = "session.sock";
}
