//! Cleanup for paths pasted or dropped onto the terminal
//!
//! Terminals deliver a dropped file as pasted text, decorated differently
//! depending on the emulator: quoted (`'/tmp/a b.pdf'`), shell-escaped
//! (`/tmp/a\ b.pdf`) or as a URI (`file:///tmp/a%20b.pdf`).

use std::path::PathBuf;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

/// Backslash escapes a shell would add to a path
static SHELL_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\\([ '"()\[\]{}&;!$#*?<>|`])"#).expect("valid regex"));

/// Turn pasted text into a path. Only the first non-blank line is used.
/// Returns `None` for blank input.
pub fn clean_pasted_path(raw: &str) -> Option<PathBuf> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let unquoted = strip_quotes(line);

    let path = if let Some(rest) = unquoted.strip_prefix("file://") {
        let rest = rest.strip_prefix("localhost").unwrap_or(rest);
        percent_decode_str(rest).decode_utf8_lossy().into_owned()
    } else {
        SHELL_ESCAPE.replace_all(unquoted, "$1").into_owned()
    };

    if path.is_empty() {
        return None;
    }
    Some(expand_tilde(&path))
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
