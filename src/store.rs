//! Durable storage for the settings snapshot.
//!
//! One snapshot lives under one well-known location. Failures never surface
//! to the user: a save that cannot complete is logged and absorbed, and a
//! snapshot that no longer parses is healed by overwriting it with the
//! caller's current live snapshot.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::settings::{GameSettings, SavedSettings};

/// Injected persistence port, so tests and headless hosts can substitute an
/// in-memory store.
pub trait SettingsStore {
    /// Persist the full snapshot. Failures are absorbed, never returned.
    fn save(&mut self, settings: &GameSettings);

    /// Load the previously saved snapshot, if any. On a parse failure the
    /// store self-heals: it overwrites the stored value with `current` and
    /// reports absent.
    fn load(&mut self, current: &GameSettings) -> Option<SavedSettings>;
}

/// File-backed store keeping the snapshot as pretty-printed JSON under the
/// user config directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store under the well-known config path
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Store under a specific file path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::storage::APP_DIR);
        path.push(crate::constants::storage::SETTINGS_FILE);
        path
    }

    fn try_save(&self, settings: &GameSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context(format!(
                "Failed to create settings directory: {}",
                parent.display()
            ))?;
        }
        let contents = serde_json::to_vec_pretty(&SavedSettings::from(settings))
            .context("Failed to serialize settings to JSON")?;
        fs::write(&self.path, contents).context(format!(
            "Failed to write settings file to {}",
            self.path.display()
        ))?;
        Ok(())
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for JsonFileStore {
    fn save(&mut self, settings: &GameSettings) {
        match self.try_save(settings) {
            Ok(()) => info!(path = %self.path.display(), "Saved game settings"),
            Err(e) => error!(error = ?e, "Failed to save game settings"),
        }
    }

    fn load(&mut self, current: &GameSettings) -> Option<SavedSettings> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                error!(path = %self.path.display(), error = ?e, "Failed to read settings file");
                return None;
            }
        };

        match serde_json::from_str::<SavedSettings>(&contents) {
            Ok(saved) => Some(saved),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Stored settings are malformed, overwriting with current snapshot"
                );
                self.save(current);
                None
            }
        }
    }
}

/// In-memory store holding the serialized snapshot, used in tests and by
/// hosts without durable storage. Serializes for real so the load path
/// exercises the same parse/heal logic as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the stored value, valid JSON or not
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    /// Raw stored value, if any
    pub fn raw(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl SettingsStore for MemoryStore {
    fn save(&mut self, settings: &GameSettings) {
        match serde_json::to_string(&SavedSettings::from(settings)) {
            Ok(json) => self.value = Some(json),
            Err(e) => error!(error = %e, "Failed to serialize game settings"),
        }
    }

    fn load(&mut self, current: &GameSettings) -> Option<SavedSettings> {
        let contents = self.value.clone()?;
        match serde_json::from_str::<SavedSettings>(&contents) {
            Ok(saved) => Some(saved),
            Err(e) => {
                warn!(error = %e, "Stored settings are malformed, overwriting with current snapshot");
                self.save(current);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let settings = GameSettings {
            num_decks: Some(3),
            ..GameSettings::default()
        };
        let mut store = MemoryStore::new();
        store.save(&settings);

        let saved = store.load(&GameSettings::default()).unwrap();
        assert_eq!(saved.num_decks, Some(3));
    }

    #[test]
    fn test_memory_store_empty_loads_absent() {
        let mut store = MemoryStore::new();
        assert!(store.load(&GameSettings::default()).is_none());
    }

    #[test]
    fn test_memory_store_self_heals_on_corruption() {
        let current = GameSettings {
            kitty_size: Some(6),
            ..GameSettings::default()
        };
        let mut store = MemoryStore::with_value("{not json");

        assert!(store.load(&current).is_none());

        // Storage now holds exactly the live snapshot
        let healed: SavedSettings = serde_json::from_str(store.raw().unwrap()).unwrap();
        assert_eq!(healed, SavedSettings::from(&current));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::with_path(dir.path().join("settings.json"));

        let settings = GameSettings {
            num_decks: Some(2),
            hide_played_cards: true,
            ..GameSettings::default()
        };
        store.save(&settings);

        let saved = store.load(&GameSettings::default()).unwrap();
        assert_eq!(saved.num_decks, Some(2));
        assert_eq!(saved.hide_played_cards, Some(true));
    }

    #[test]
    fn test_file_store_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::with_path(dir.path().join("missing.json"));
        assert!(store.load(&GameSettings::default()).is_none());
    }

    #[test]
    fn test_file_store_self_heals_on_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "]]garbage[[").unwrap();

        let current = GameSettings {
            num_decks: Some(4),
            ..GameSettings::default()
        };
        let mut store = JsonFileStore::with_path(path.clone());
        assert!(store.load(&current).is_none());

        let healed: SavedSettings =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(healed, SavedSettings::from(&current));
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/settings.json");
        let mut store = JsonFileStore::with_path(path.clone());
        store.save(&GameSettings::default());
        assert!(path.exists());
    }
}
