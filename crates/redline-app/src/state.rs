//! Application state (Model in TEA pattern)

use std::path::PathBuf;
use std::time::{Duration, Instant};

use redline_core::{file_stem, HealthReport, NormalizedResult, SelectedFile, Theme};

use crate::config::Settings;
use crate::result_view_state::ResultViewState;

/// How long a footer notice stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Result view with the file panel and keybinding footer
    #[default]
    Normal,

    /// Path prompt open, capturing typed text
    PathInput,
}

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Where the current upload is. Submit is disabled unless `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    /// Body is being sent
    Uploading { percent: u8 },
    /// Body fully sent, waiting for the service
    Analyzing,
}

impl UploadState {
    pub fn is_in_flight(&self) -> bool {
        !matches!(self, UploadState::Idle)
    }

    /// Percent for the progress gauge, if an upload is running
    pub fn percent(&self) -> Option<u8> {
        match self {
            UploadState::Idle => None,
            UploadState::Uploading { percent } => Some(*percent),
            UploadState::Analyzing => Some(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient one-line message in the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub shown_at: Instant,
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub ui_mode: UiMode,
    pub phase: AppPhase,

    /// The file chosen for review; zero or one at a time
    pub selected: Option<SelectedFile>,
    pub upload: UploadState,

    /// Normalized result of the last completed review
    pub result: Option<NormalizedResult>,
    /// Name of the file the current result (or in-flight upload) belongs to
    pub result_source: Option<String>,

    /// Inline error for the last failed action
    pub last_error: Option<String>,
    pub notice: Option<Notice>,

    pub theme: Theme,
    /// An explicit theme is persisted; system appearance changes are ignored
    pub theme_locked: bool,

    /// Latest health probe; `None` until the first answer
    pub health: Option<HealthReport>,

    /// Text typed into the path prompt
    pub path_input: String,

    /// Raw JSON panel visible
    pub show_raw: bool,
    pub result_view: ResultViewState,

    /// Resolved review service base URL (display only)
    pub api_base: String,
    /// Directory exports are written to
    pub export_dir: PathBuf,
    pub settings: Settings,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let export_dir = settings
            .export
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            ui_mode: UiMode::Normal,
            phase: AppPhase::Running,
            selected: None,
            upload: UploadState::Idle,
            result: None,
            result_source: None,
            last_error: None,
            notice: None,
            theme: Theme::Light,
            theme_locked: false,
            health: None,
            path_input: String::new(),
            show_raw: settings.ui.show_raw,
            result_view: ResultViewState::new(),
            api_base: String::new(),
            export_dir,
            settings,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Submit is possible: a file is selected and nothing is in flight
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.upload.is_in_flight()
    }

    /// Replace the selection and clear the last error
    pub fn set_picked(&mut self, file: SelectedFile) {
        self.selected = Some(file);
        self.last_error = None;
    }

    /// Drop the selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.last_error = None;
    }

    pub fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            level: NoticeLevel::Info,
            shown_at: Instant::now(),
        });
    }

    pub fn set_error_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            level: NoticeLevel::Error,
            shown_at: Instant::now(),
        });
    }

    /// Drop the notice once it has been shown for [`NOTICE_TTL`]
    pub fn expire_notice(&mut self, now: Instant) {
        if let Some(notice) = &self.notice {
            if now.duration_since(notice.shown_at) >= NOTICE_TTL {
                self.notice = None;
            }
        }
    }

    /// Stem used to name exports (`deal` for `deal.docx`)
    pub fn export_stem(&self) -> Option<&str> {
        self.result_source.as_deref().map(file_stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_file(name: &str) -> SelectedFile {
        SelectedFile {
            path: PathBuf::from(format!("/tmp/{name}")),
            name: name.to_string(),
            size: 10,
            mime: "text/plain".to_string(),
        }
    }

    #[test]
    fn test_new_state_defaults() {
        let state = AppState::new();
        assert_eq!(state.ui_mode, UiMode::Normal);
        assert!(!state.should_quit());
        assert!(!state.can_submit());
        assert_eq!(state.theme, Theme::Light);
        assert!(state.health.is_none());
        assert_eq!(state.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_set_picked_enables_submit_and_clears_error() {
        let mut state = AppState::new();
        state.last_error = Some("old".into());
        state.set_picked(sample_file("a.txt"));
        assert!(state.can_submit());
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_clear_disables_submit() {
        let mut state = AppState::new();
        state.set_picked(sample_file("a.txt"));
        state.clear_selection();
        assert!(!state.can_submit());
    }

    #[test]
    fn test_in_flight_blocks_submit() {
        let mut state = AppState::new();
        state.set_picked(sample_file("a.txt"));
        state.upload = UploadState::Uploading { percent: 40 };
        assert!(!state.can_submit());
        state.upload = UploadState::Analyzing;
        assert!(!state.can_submit());
        assert_eq!(state.upload.percent(), Some(100));
    }

    #[test]
    fn test_notice_expiry() {
        let mut state = AppState::new();
        state.set_notice("Copied summary");
        let shown = state.notice.as_ref().unwrap().shown_at;

        state.expire_notice(shown + Duration::from_secs(1));
        assert!(state.notice.is_some());

        state.expire_notice(shown + NOTICE_TTL);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_export_stem() {
        let mut state = AppState::new();
        assert_eq!(state.export_stem(), None);
        state.result_source = Some("deal.v2.docx".into());
        assert_eq!(state.export_stem(), Some("deal.v2"));
        state.result_source = Some(".env".into());
        assert_eq!(state.export_stem(), Some(".env"));
    }

    #[test]
    fn test_show_raw_from_settings() {
        let mut settings = Settings::default();
        settings.ui.show_raw = true;
        settings.export.directory = Some(PathBuf::from("/tmp/out"));
        let state = AppState::with_settings(settings);
        assert!(state.show_raw);
        assert_eq!(state.export_dir, PathBuf::from("/tmp/out"));
    }
}
