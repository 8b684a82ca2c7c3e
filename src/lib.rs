#![forbid(unsafe_code)]

//! Lobby and settings synchronization for a multiplayer Tractor
//! (Finding Friends) card game client.
//!
//! The session holds the canonical game configuration and accepts one
//! discrete field-mutation command at a time. This crate turns a complete
//! desired snapshot (loaded from storage, fetched defaults, or a merge of
//! both) into the correctly ordered command sequence that converges the
//! session, including the re-send of fields clobbered by another field's
//! remote side effect.
//!
//! The pieces, leaf to root:
//! - [`settings`]: the typed [`settings::GameSettings`] snapshot and its
//!   persisted, all-optional [`settings::SavedSettings`] form;
//! - [`schema`]: the declared field table with the fixed synchronization
//!   order, side-effect couplings, per-field commands and domain checks;
//! - [`sync`]: the two-pass synchronization engine;
//! - [`store`] and [`defaults`]: injected ports for durable snapshots and
//!   the defaults baseline;
//! - [`channel`]: the outbound message types and an order-preserving
//!   framed transport;
//! - [`lobby`]: the controller wiring the user flows together.

pub mod channel;
pub mod constants;
pub mod defaults;
pub mod error;
pub mod lobby;
pub mod schema;
pub mod settings;
pub mod store;
pub mod sync;

pub use channel::{GameAction, LobbyMessage, PlayerId, RecordingChannel, SessionChannel};
pub use defaults::{DefaultsSource, FileDefaults, StaticDefaults};
pub use error::{ChannelError, DefaultsError, LobbyError};
pub use lobby::{LoadOutcome, Lobby};
pub use schema::SettingsField;
pub use settings::{GameSettings, SavedSettings};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use sync::SyncEngine;
