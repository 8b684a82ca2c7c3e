//! Baseline settings provider.
//!
//! Load and reset flows need a complete baseline snapshot to merge against.
//! The canonical source is a static JSON document shipped next to the
//! application, the same shape as the persisted snapshot. If it cannot be
//! read or parsed the flow is abandoned: [`crate::error::DefaultsError`] is
//! surfaced, logged by the caller, and prior state is left unchanged.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::error::DefaultsError;
use crate::settings::{GameSettings, SavedSettings};

/// Injected defaults port.
pub trait DefaultsSource {
    /// Retrieve the complete baseline snapshot.
    fn fetch(&self) -> Result<GameSettings, DefaultsError>;
}

/// Reads the defaults document from a file path (relative by default, so the
/// resource resolves next to the running application).
pub struct FileDefaults {
    path: PathBuf,
}

impl FileDefaults {
    /// Use the well-known relative resource path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(crate::constants::defaults::RESOURCE),
        }
    }

    /// Use a specific document path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for FileDefaults {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultsSource for FileDefaults {
    fn fetch(&self) -> Result<GameSettings, DefaultsError> {
        let contents = fs::read_to_string(&self.path).map_err(DefaultsError::Unavailable)?;
        // The document may predate newer schema fields; parse it as the
        // partial form and complete it against the built-in baseline
        let saved: SavedSettings =
            serde_json::from_str(&contents).map_err(DefaultsError::Malformed)?;
        info!(path = %self.path.display(), "Fetched settings defaults");
        Ok(saved.merge_over(GameSettings::default()))
    }
}

/// Fixed in-memory baseline, for tests and embedded hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticDefaults(pub GameSettings);

impl DefaultsSource for StaticDefaults {
    fn fetch(&self) -> Result<GameSettings, DefaultsError> {
        Ok(self.0.clone())
    }
}
