//! Configuration types for Redline
//!
//! Defines:
//! - `Settings` - values read from `config.toml`
//! - `UserPreferences` - values written to `preferences.toml`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use redline_core::Theme;

/// API base used when nothing else is configured
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Application settings from `config.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

/// Review service connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL of the review service
    #[serde(default)]
    pub base_url: Option<String>,

    /// Seconds between health probes
    #[serde(default = "default_health_interval")]
    pub health_interval_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            health_interval_secs: default_health_interval(),
        }
    }
}

fn default_health_interval() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// Seconds between system appearance checks
    #[serde(default = "default_appearance_poll")]
    pub appearance_poll_secs: u64,

    /// Show the raw JSON panel on startup
    #[serde(default)]
    pub show_raw: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            appearance_poll_secs: default_appearance_poll(),
            show_raw: false,
        }
    }
}

fn default_appearance_poll() -> u64 {
    10
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Where `e`/`h` exports are written (default: working directory)
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// User choices persisted across runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserPreferences {
    /// API base override (`--remember-api-base`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Explicit theme choice; unrecognised values are ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl UserPreferences {
    /// The persisted theme, if it is a recognised value
    pub fn theme(&self) -> Option<Theme> {
        self.theme.as_deref().and_then(Theme::parse)
    }
}
