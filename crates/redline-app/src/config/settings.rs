//! Settings loading and API base resolution

use std::path::{Path, PathBuf};

use redline_core::prelude::*;

use super::types::{Settings, UserPreferences, DEFAULT_API_BASE};

/// Settings file name inside the config directory
pub const CONFIG_FILENAME: &str = "config.toml";

/// API base baked in at build time, if any
const BUILD_API_BASE: Option<&str> = option_env!("REDLINE_API_BASE");

/// Redline's directory under the platform config dir
/// (`~/.config/redline` on Linux)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("redline"))
}

/// Load settings from `<dir>/config.toml`.
///
/// A missing file yields defaults. An unreadable or invalid file is logged
/// and also yields defaults.
pub fn load_settings(dir: &Path) -> Settings {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Pick the API base. First match wins:
/// CLI flag, persisted override, `config.toml`, build-time value, default.
///
/// Blank values are skipped and a trailing `/` is trimmed.
pub fn resolve_api_base(
    cli: Option<&str>,
    prefs: &UserPreferences,
    settings: &Settings,
) -> String {
    [
        cli,
        prefs.api_base.as_deref(),
        settings.api.base_url.as_deref(),
        BUILD_API_BASE,
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|candidate| !candidate.is_empty())
    .unwrap_or(DEFAULT_API_BASE)
    .trim_end_matches('/')
    .to_string()
}
