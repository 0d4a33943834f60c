//! System light/dark appearance detection
//!
//! Two sources, in order:
//! - `COLORFGBG` (set by rxvt, Konsole, iTerm2 and others): `fg;bg`, where a
//!   background of 0-6 or 8 is dark
//! - macOS `defaults read -g AppleInterfaceStyle`, which prints `Dark` in dark
//!   mode and fails when the key is unset (light mode)

use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;

use redline_core::prelude::*;
use redline_core::Theme;

static COLORFGBG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9a-z]+;)*(\d+)$").expect("Invalid COLORFGBG regex"));

/// Probe function signature, so pollers can be driven by a fake in tests
pub type AppearanceProbe = fn() -> Option<Theme>;

/// Detect the system appearance; `None` when no source gives an answer
pub fn detect_system_theme() -> Option<Theme> {
    if let Some(theme) = std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(parse_colorfgbg)
    {
        return Some(theme);
    }

    if cfg!(target_os = "macos") {
        return macos_appearance();
    }

    None
}

/// Map a `COLORFGBG` value to a theme from its background field
pub fn parse_colorfgbg(value: &str) -> Option<Theme> {
    let captures = COLORFGBG_PATTERN.captures(value.trim())?;
    let bg: u8 = captures.get(1)?.as_str().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(Theme::Dark),
        7 | 9..=15 => Some(Theme::Light),
        _ => None,
    }
}

fn macos_appearance() -> Option<Theme> {
    match Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
    {
        Ok(output) if output.status.success() => {
            let style = String::from_utf8_lossy(&output.stdout);
            if style.trim().eq_ignore_ascii_case("dark") {
                Some(Theme::Dark)
            } else {
                Some(Theme::Light)
            }
        }
        // The key is absent in light mode
        Ok(_) => Some(Theme::Light),
        Err(e) => {
            debug!("Could not query macOS appearance: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_colorfgbg_dark_background() {
        assert_eq!(parse_colorfgbg("15;0"), Some(Theme::Dark));
        assert_eq!(parse_colorfgbg("15;default;0"), Some(Theme::Dark));
        assert_eq!(parse_colorfgbg("7;8"), Some(Theme::Dark));
    }

    #[test]
    fn test_colorfgbg_light_background() {
        assert_eq!(parse_colorfgbg("0;15"), Some(Theme::Light));
        assert_eq!(parse_colorfgbg("0;7"), Some(Theme::Light));
    }

    #[test]
    fn test_colorfgbg_unusable() {
        assert_eq!(parse_colorfgbg(""), None);
        assert_eq!(parse_colorfgbg("0;default"), None);
        assert_eq!(parse_colorfgbg("0;200"), None);
    }

    #[test]
    #[serial]
    fn test_detect_system_theme_reads_colorfgbg() {
        let previous = std::env::var("COLORFGBG").ok();

        std::env::set_var("COLORFGBG", "15;0");
        assert_eq!(detect_system_theme(), Some(Theme::Dark));

        std::env::set_var("COLORFGBG", "0;15");
        assert_eq!(detect_system_theme(), Some(Theme::Light));

        match previous {
            Some(value) => std::env::set_var("COLORFGBG", value),
            None => std::env::remove_var("COLORFGBG"),
        }
    }
}
