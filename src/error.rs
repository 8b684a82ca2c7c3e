//! Error taxonomy for the lobby subsystem.
//!
//! Every error here is recoverable: the worst case for any of these
//! failures is a settings load/reset silently not happening. Malformed
//! persisted snapshots and unknown schema fields never surface as errors at
//! all; the store self-heals and serde ignores unknown keys.

use thiserror::Error;

/// Failure to retrieve or parse the defaults resource.
///
/// Callers must treat this as a non-fatal no-op: the triggering load/reset
/// action is abandoned and prior state is left unchanged.
#[derive(Debug, Error)]
pub enum DefaultsError {
    #[error("defaults resource unavailable: {0}")]
    Unavailable(#[source] std::io::Error),

    #[error("defaults resource malformed: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Transport-level failure while sending a message to the session.
///
/// Per-command success on the server side is owned by the channel protocol,
/// not by this crate; only encode and I/O failures are visible here.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("channel i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("message too large: {len} bytes (max {max})")]
    TooLarge { len: usize, max: usize },
}

/// Umbrella error for the lobby controller flows.
#[derive(Debug, Error)]
pub enum LobbyError {
    #[error(transparent)]
    Defaults(#[from] DefaultsError),

    #[error(transparent)]
    Channel(#[from] ChannelError),
}
