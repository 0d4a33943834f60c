//! Engine - orchestration state for the TUI runner
//!
//! The Engine owns the TEA state, the message channel, the shutdown signal
//! and the review client, and starts the background pollers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use redline_client::ReviewClient;
use redline_core::prelude::*;
use redline_core::{initial_theme, Theme};

use crate::actions::{spawn_appearance_poller, spawn_health_poller, ActionContext};
use crate::appearance::{detect_system_theme, AppearanceProbe};
use crate::config::{PreferenceStore, Settings};
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Capacity of the message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Everything the engine needs, resolved by the binary
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub api_base: String,
    pub settings: Settings,
    pub preferences: Option<PreferenceStore>,
    /// File to pick at startup
    pub initial_file: Option<PathBuf>,
    pub appearance_probe: AppearanceProbe,
}

impl EngineOptions {
    pub fn new(api_base: String, settings: Settings, preferences: Option<PreferenceStore>) -> Self {
        Self {
            api_base,
            settings,
            preferences,
            initial_file: None,
            appearance_probe: detect_system_theme,
        }
    }
}

/// Orchestration engine for Redline.
pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to stop background tasks.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    ctx: ActionContext<ReviewClient>,
}

impl Engine {
    /// Create the engine and start its background tasks.
    ///
    /// Must be called inside a tokio runtime. Fails only when the API base is
    /// not a usable URL.
    pub fn new(options: EngineOptions) -> Result<Self> {
        let EngineOptions {
            api_base,
            settings,
            preferences,
            initial_file,
            appearance_probe,
        } = options;

        let client = Arc::new(ReviewClient::new(&api_base)?);

        let stored = match &preferences {
            Some(store) => store.stored_theme(),
            None => Err(Error::config("no config directory on this system")),
        };
        let theme_locked = matches!(stored, Ok(Some(_)));
        let system = appearance_probe();
        let theme = initial_theme(stored, system);

        let mut state = AppState::with_settings(settings.clone());
        state.api_base = client.base_url().to_string();
        state.theme = theme;
        state.theme_locked = theme_locked;

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        signals::spawn_signal_handler(msg_tx.clone());

        spawn_health_poller(
            client.clone(),
            msg_tx.clone(),
            shutdown_rx.clone(),
            interval_secs(settings.api.health_interval_secs),
        );
        spawn_appearance_poller(
            appearance_probe,
            system,
            msg_tx.clone(),
            shutdown_rx.clone(),
            interval_secs(settings.ui.appearance_poll_secs),
        );

        if let Some(path) = initial_file {
            if msg_tx.try_send(Message::PickPath(path)).is_err() {
                warn!("Could not queue the initial file");
            }
        }

        info!("Engine started against {} (theme {})", state.api_base, theme);

        let ctx = ActionContext {
            api: client,
            preferences,
            msg_tx: msg_tx.clone(),
        };

        Ok(Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            ctx,
        })
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.ctx);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    /// Signal background tasks to stop
    pub fn shutdown(&mut self) {
        let _ = self.shutdown_tx.send(true);
        info!("Engine shut down");
    }
}

fn interval_secs(secs: u64) -> Duration {
    Duration::from_secs(secs.max(1))
}
