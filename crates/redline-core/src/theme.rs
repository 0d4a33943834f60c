//! Light/dark theme preference

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a persisted value; anything other than `light`/`dark` is invalid
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the theme to start with.
///
/// A persisted choice wins; without one the system appearance decides. If the
/// preference store could not be read at all, start light.
pub fn initial_theme(stored: Result<Option<Theme>>, system: Option<Theme>) -> Theme {
    match stored {
        Ok(Some(theme)) => theme,
        Ok(None) => system.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Preference store unavailable, using light theme: {}", e);
            Theme::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_stored_theme_wins() {
        assert_eq!(initial_theme(Ok(Some(Theme::Light)), Some(Theme::Dark)), Theme::Light);
    }

    #[test]
    fn test_falls_back_to_system_preference() {
        assert_eq!(initial_theme(Ok(None), Some(Theme::Dark)), Theme::Dark);
        assert_eq!(initial_theme(Ok(None), None), Theme::Light);
    }

    #[test]
    fn test_storage_failure_returns_light() {
        let stored = Err(Error::config("permission denied"));
        assert_eq!(initial_theme(stored, Some(Theme::Dark)), Theme::Light);
    }

    #[test]
    fn test_parse_and_toggle() {
        assert_eq!(Theme::parse("DARK"), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.to_string(), "light");
    }
}
