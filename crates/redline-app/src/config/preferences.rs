//! Persisted user preferences (`preferences.toml`)
//!
//! Holds the explicit theme choice and the remembered API base. Writes are
//! atomic: the file is written to a temp sibling and renamed into place.

use std::path::{Path, PathBuf};

use redline_core::prelude::*;
use redline_core::Theme;

use super::settings::config_dir;
use super::types::UserPreferences;

/// Preferences file name inside the config directory
pub const PREFERENCES_FILENAME: &str = "preferences.toml";

/// Where a malformed preferences file is moved before it is rewritten
pub const PREFERENCES_BACKUP_FILENAME: &str = "preferences.toml.bak";

/// Handle to the preferences file
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store at `<dir>/preferences.toml`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(PREFERENCES_FILENAME),
        }
    }

    /// Store in the platform config directory; `None` when the platform has
    /// no config directory
    pub fn default_location() -> Option<Self> {
        config_dir().map(|dir| Self::in_dir(&dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the preferences. A missing file is an empty set of preferences;
    /// an unreadable or malformed file is an error.
    pub fn load(&self) -> Result<UserPreferences> {
        if !self.path.exists() {
            debug!("No preferences file at {:?}", self.path);
            return Ok(UserPreferences::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::config(format!("Failed to read {:?}: {}", self.path, e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {:?}: {}", self.path, e)))
    }

    /// Write the preferences atomically
    pub fn save(&self, prefs: &UserPreferences) -> Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| Error::config("Preferences path has no parent directory"))?;

        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::config(format!("Failed to create {:?}: {}", dir, e)))?;
        }

        let header = "# Redline user preferences\n\
                      # Written by redline; `t` in the app updates the theme\n\n";
        let content = toml::to_string_pretty(prefs)
            .map_err(|e| Error::config(format!("Failed to serialize preferences: {}", e)))?;

        let temp_path = dir.join(".preferences.toml.tmp");
        std::fs::write(&temp_path, format!("{}{}", header, content))
            .with_context(|| format!("Writing {:?}", temp_path))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Replacing {:?}", self.path))?;

        debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }

    /// The explicitly persisted theme, if any
    pub fn stored_theme(&self) -> Result<Option<Theme>> {
        Ok(self.load()?.theme())
    }

    /// Persist a theme choice, keeping the other preferences
    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        let mut prefs = self.load_or_default();
        prefs.theme = Some(theme.as_str().to_string());
        self.save(&prefs)
    }

    /// Persist an API base override, keeping the other preferences
    pub fn set_api_base(&self, api_base: &str) -> Result<()> {
        let mut prefs = self.load_or_default();
        prefs.api_base = Some(api_base.trim().trim_end_matches('/').to_string());
        self.save(&prefs)
    }

    /// Load for a read-modify-write.
    ///
    /// A malformed file is moved to `preferences.toml.bak` and whatever
    /// string keys can still be read from it are carried over.
    fn load_or_default(&self) -> UserPreferences {
        match self.load() {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("Replacing unreadable preferences: {}", e);
                let salvaged = self.salvage();
                let backup = self.path.with_file_name(PREFERENCES_BACKUP_FILENAME);
                match std::fs::rename(&self.path, &backup) {
                    Ok(()) => info!("Moved malformed preferences to {:?}", backup),
                    Err(e) => warn!("Could not back up {:?}: {}", self.path, e),
                }
                salvaged
            }
        }
    }

    /// Recover the string keys of a file that does not deserialize cleanly
    fn salvage(&self) -> UserPreferences {
        let table = std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| content.parse::<toml::Table>().ok());
        let Some(table) = table else {
            return UserPreferences::default();
        };
        let string_key = |key: &str| {
            table
                .get(key)
                .and_then(|value| value.as_str())
                .map(str::to_string)
        };
        UserPreferences {
            api_base: string_key("api_base"),
            theme: string_key("theme"),
        }
    }
}
