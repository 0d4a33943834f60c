//! Configuration for Redline
//!
//! Supports:
//! - `<config_dir>/redline/config.toml` - settings (optional, read-only)
//! - `<config_dir>/redline/preferences.toml` - persisted user choices
//!   (theme, API base override)

pub mod preferences;
pub mod settings;
pub mod types;

pub use preferences::{PreferenceStore, PREFERENCES_FILENAME};
pub use settings::{config_dir, load_settings, resolve_api_base, CONFIG_FILENAME};
pub use types::*;
