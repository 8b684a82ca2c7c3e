//! Lobby controller: the user-triggered settings flows.
//!
//! Single-threaded and event-driven: every method corresponds to one
//! discrete user action (edit a field, save, load, reset, start the game).
//! The controller owns the three injected ports and wires them through the
//! synchronization engine; it never holds the canonical snapshot itself,
//! since that is mirrored from the server by the surrounding view.

use tracing::{error, info};

use crate::channel::SessionChannel;
use crate::channel::messages::{GameAction, LobbyMessage, PlayerId};
use crate::defaults::DefaultsSource;
use crate::error::{ChannelError, LobbyError};
use crate::schema::SettingsField;
use crate::settings::GameSettings;
use crate::store::SettingsStore;
use crate::sync::SyncEngine;

/// What a load flow did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A saved snapshot was merged with defaults and synchronized
    Applied,
    /// Nothing saved yet; the flow was a no-op
    NoSavedSettings,
}

/// Lobby-side coordinator for one session.
pub struct Lobby<C, S, D>
where
    C: SessionChannel,
    S: SettingsStore,
    D: DefaultsSource,
{
    channel: C,
    store: S,
    defaults: D,
}

impl<C, S, D> Lobby<C, S, D>
where
    C: SessionChannel,
    S: SettingsStore,
    D: DefaultsSource,
{
    pub fn new(channel: C, store: S, defaults: D) -> Self {
        Self {
            channel,
            store,
            defaults,
        }
    }

    /// Persist the current snapshot wholesale.
    pub fn save_settings(&mut self, current: &GameSettings) {
        self.store.save(current);
    }

    /// Rehydrate saved settings: load, complete against fetched defaults,
    /// then converge the session to the merged snapshot.
    ///
    /// A defaults failure abandons the flow with no state change; a
    /// malformed saved snapshot was already healed by the store and reports
    /// as absent.
    pub fn load_settings(
        &mut self,
        current: &GameSettings,
        player_count: usize,
    ) -> Result<LoadOutcome, LobbyError> {
        let Some(saved) = self.store.load(current) else {
            info!("No saved game settings to load");
            return Ok(LoadOutcome::NoSavedSettings);
        };

        let baseline = match self.defaults.fetch() {
            Ok(baseline) => baseline,
            Err(e) => {
                error!(error = %e, "Cannot load settings, defaults unavailable");
                return Err(e.into());
            }
        };

        let mut merged = saved.merge_over(baseline);
        merged.validate_and_clamp(player_count);
        SyncEngine::new(&mut self.channel).synchronize(&merged)?;
        Ok(LoadOutcome::Applied)
    }

    /// Reset the session to the fetched defaults.
    pub fn reset_settings(&mut self, player_count: usize) -> Result<(), LobbyError> {
        let mut baseline = match self.defaults.fetch() {
            Ok(baseline) => baseline,
            Err(e) => {
                error!(error = %e, "Cannot reset settings, defaults unavailable");
                return Err(e.into());
            }
        };

        baseline.validate_and_clamp(player_count);
        SyncEngine::new(&mut self.channel).synchronize(&baseline)?;
        Ok(())
    }

    /// Send one field's command from a direct edit.
    pub fn apply_field(
        &mut self,
        field: SettingsField,
        settings: &GameSettings,
    ) -> Result<(), ChannelError> {
        self.channel
            .send(&LobbyMessage::Action(field.command(settings)))
    }

    pub fn start_game(&mut self) -> Result<(), ChannelError> {
        self.channel.send(&LobbyMessage::Action(GameAction::StartGame))
    }

    pub fn ready_check(&mut self) -> Result<(), ChannelError> {
        self.channel.send(&LobbyMessage::ReadyCheck)
    }

    pub fn kick(&mut self, player: PlayerId) -> Result<(), ChannelError> {
        self.channel.send(&LobbyMessage::Kick(player))
    }

    pub fn set_landlord(&mut self, landlord: Option<PlayerId>) -> Result<(), ChannelError> {
        self.channel
            .send(&LobbyMessage::Action(GameAction::SetLandlord(landlord)))
    }

    pub fn set_rank(&mut self, rank: impl Into<String>) -> Result<(), ChannelError> {
        self.channel
            .send(&LobbyMessage::Action(GameAction::SetRank(rank.into())))
    }

    /// The channel, for flows owned by the surrounding view
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::RecordingChannel;
    use crate::defaults::StaticDefaults;
    use crate::error::DefaultsError;
    use crate::settings::KittyPenalty;
    use crate::store::MemoryStore;

    struct UnavailableDefaults;

    impl DefaultsSource for UnavailableDefaults {
        fn fetch(&self) -> Result<GameSettings, DefaultsError> {
            Err(DefaultsError::Unavailable(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "defaults missing",
            )))
        }
    }

    fn lobby_with(
        store: MemoryStore,
    ) -> Lobby<RecordingChannel, MemoryStore, StaticDefaults> {
        Lobby::new(RecordingChannel::new(), store, StaticDefaults::default())
    }

    #[test]
    fn test_load_without_saved_settings_is_noop() {
        let mut lobby = lobby_with(MemoryStore::new());
        let outcome = lobby
            .load_settings(&GameSettings::default(), 4)
            .unwrap();
        assert_eq!(outcome, LoadOutcome::NoSavedSettings);
        assert!(lobby.channel_mut().sent.is_empty());
    }

    #[test]
    fn test_load_merges_and_synchronizes() {
        let saved = GameSettings {
            num_decks: Some(3),
            kitty_size: Some(6),
            kitty_penalty: KittyPenalty::Power,
            ..GameSettings::default()
        };
        let mut store = MemoryStore::new();
        store.save(&saved);

        let mut lobby = lobby_with(store);
        let outcome = lobby
            .load_settings(&GameSettings::default(), 6)
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Applied);

        let sent = &lobby.channel_mut().sent;
        assert_eq!(sent.len(), SettingsField::ORDER.len());
        let decks = sent
            .iter()
            .position(|m| matches!(m, LobbyMessage::Action(GameAction::SetNumDecks(Some(3)))))
            .unwrap();
        // Three decks, six players: 162 cards, kitty of 6 deals evenly
        let kitty = sent
            .iter()
            .position(|m| matches!(m, LobbyMessage::Action(GameAction::SetKittySize(Some(6)))))
            .unwrap();
        assert!(decks < kitty);
        assert!(sent.iter().any(|m| matches!(
            m,
            LobbyMessage::Action(GameAction::SetKittyPenalty(KittyPenalty::Power))
        )));
    }

    #[test]
    fn test_load_abandoned_when_defaults_unavailable() {
        let mut store = MemoryStore::new();
        store.save(&GameSettings::default());

        let mut lobby = Lobby::new(RecordingChannel::new(), store, UnavailableDefaults);
        let result = lobby.load_settings(&GameSettings::default(), 4);
        assert!(matches!(
            result,
            Err(LobbyError::Defaults(DefaultsError::Unavailable(_)))
        ));
        // No commands were emitted: prior state unchanged
        assert!(lobby.channel_mut().sent.is_empty());
    }

    #[test]
    fn test_load_clamps_out_of_domain_saved_values() {
        let mut store = MemoryStore::with_value(
            r#"{"tractor_requirements": {"min_count": 9, "min_length": 40}}"#,
        );
        // Pre-parse the stored value to prove it is well-formed JSON
        assert!(store.load(&GameSettings::default()).is_some());

        let mut lobby = lobby_with(store);
        lobby.load_settings(&GameSettings::default(), 4).unwrap();

        let sent = &lobby.channel_mut().sent;
        let req = sent.iter().find_map(|m| match m {
            LobbyMessage::Action(GameAction::SetTractorRequirements(req)) => Some(*req),
            _ => None,
        });
        let req = req.unwrap();
        assert_eq!(req.min_count, 2);
        assert_eq!(req.min_length, 12);
    }

    #[test]
    fn test_reset_synchronizes_defaults() {
        let baseline = GameSettings {
            hide_played_cards: true,
            ..GameSettings::default()
        };
        let mut lobby = Lobby::new(
            RecordingChannel::new(),
            MemoryStore::new(),
            StaticDefaults(baseline),
        );
        lobby.reset_settings(4).unwrap();

        let sent = &lobby.channel_mut().sent;
        assert_eq!(sent.len(), SettingsField::ORDER.len());
        assert!(sent.iter().any(|m| matches!(
            m,
            LobbyMessage::Action(GameAction::SetHidePlayedCards(true))
        )));
    }

    #[test]
    fn test_reset_abandoned_when_defaults_unavailable() {
        let mut lobby = Lobby::new(
            RecordingChannel::new(),
            MemoryStore::new(),
            UnavailableDefaults,
        );
        assert!(lobby.reset_settings(4).is_err());
        assert!(lobby.channel_mut().sent.is_empty());
    }

    #[test]
    fn test_save_persists_current_snapshot() {
        let current = GameSettings {
            num_decks: Some(2),
            ..GameSettings::default()
        };
        let mut lobby = lobby_with(MemoryStore::new());
        lobby.save_settings(&current);

        let saved = lobby.store.load(&GameSettings::default()).unwrap();
        assert_eq!(saved.num_decks, Some(2));
    }

    #[test]
    fn test_single_field_edit_sends_one_command() {
        let settings = GameSettings {
            num_decks: Some(3),
            ..GameSettings::default()
        };
        let mut lobby = lobby_with(MemoryStore::new());
        lobby
            .apply_field(SettingsField::NumDecks, &settings)
            .unwrap();
        assert_eq!(
            lobby.channel_mut().sent,
            vec![LobbyMessage::Action(GameAction::SetNumDecks(Some(3)))]
        );
    }

    #[test]
    fn test_lifecycle_and_membership_actions() {
        let mut lobby = lobby_with(MemoryStore::new());
        lobby.start_game().unwrap();
        lobby.ready_check().unwrap();
        lobby.kick(7).unwrap();
        lobby.set_landlord(Some(2)).unwrap();
        lobby.set_rank("Q").unwrap();

        assert_eq!(
            lobby.channel_mut().sent,
            vec![
                LobbyMessage::Action(GameAction::StartGame),
                LobbyMessage::ReadyCheck,
                LobbyMessage::Kick(7),
                LobbyMessage::Action(GameAction::SetLandlord(Some(2))),
                LobbyMessage::Action(GameAction::SetRank("Q".to_string())),
            ]
        );
    }
}
