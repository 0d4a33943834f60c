//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every spawned task reports back through the message channel. Nothing here
//! touches `AppState`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use redline_client::ReviewApi;
use redline_core::prelude::*;
use redline_core::{HealthReport, SelectedFile, Theme};

use crate::appearance::AppearanceProbe;
use crate::clipboard;
use crate::config::PreferenceStore;
use crate::message::Message;
use crate::UpdateAction;

/// What background tasks need from the engine
pub struct ActionContext<A> {
    pub api: Arc<A>,
    pub preferences: Option<PreferenceStore>,
    pub msg_tx: mpsc::Sender<Message>,
}

impl<A> Clone for ActionContext<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            preferences: self.preferences.clone(),
            msg_tx: self.msg_tx.clone(),
        }
    }
}

/// Execute an action by spawning a background task
pub fn handle_action<A>(action: UpdateAction, ctx: &ActionContext<A>)
where
    A: ReviewApi + Send + Sync + 'static,
{
    let msg_tx = ctx.msg_tx.clone();
    match action {
        UpdateAction::InspectFile { path } => spawn_inspect_file(path, msg_tx),
        UpdateAction::StartReview { file } => {
            spawn_review(ctx.api.clone(), file, msg_tx);
        }
        UpdateAction::PersistTheme(theme) => {
            spawn_persist_theme(ctx.preferences.clone(), theme, msg_tx)
        }
        UpdateAction::CopyToClipboard { text, what } => spawn_clipboard_copy(text, what, msg_tx),
        UpdateAction::WriteExport { path, contents } => spawn_export_write(path, contents, msg_tx),
    }
}

/// Send a message from a background task; a closed channel means the engine
/// is shutting down
async fn report(msg_tx: &mpsc::Sender<Message>, message: Message) {
    if msg_tx.send(message).await.is_err() {
        debug!("Message channel closed; dropping background result");
    }
}

fn spawn_inspect_file(path: PathBuf, msg_tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let inspected = tokio::task::spawn_blocking(move || SelectedFile::from_path(&path)).await;
        let message = match inspected {
            Ok(Ok(file)) => Message::FilePicked(file),
            Ok(Err(e)) => Message::FilePickFailed {
                error: e.to_string(),
            },
            Err(e) => Message::FilePickFailed {
                error: format!("File inspection failed: {}", e),
            },
        };
        report(&msg_tx, message).await;
    });
}

/// Run one review upload.
///
/// The upload runs in its own task so a panic inside it is observed as a
/// join error. Whatever happens, exactly one `ReviewCompleted` or
/// `ReviewFailed` is sent, after all progress messages.
pub fn spawn_review<A>(api: Arc<A>, file: SelectedFile, msg_tx: mpsc::Sender<Message>) -> JoinHandle<()>
where
    A: ReviewApi + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
        let name = file.name.clone();

        let upload = tokio::spawn(async move { api.review(&file, progress_tx).await });

        let progress_msg_tx = msg_tx.clone();
        let forwarder = tokio::spawn(async move {
            let mut last_percent = None;
            while let Some(progress) = progress_rx.recv().await {
                let percent = progress.percent();
                if last_percent != Some(percent) || progress.is_complete() {
                    last_percent = Some(percent);
                    report(&progress_msg_tx, Message::UploadProgress(progress)).await;
                }
            }
        });

        let outcome = upload.await;
        // Ends once the upload has dropped its progress sender
        let _ = forwarder.await;

        let message = match outcome {
            Ok(Ok(body)) => {
                info!("Review of {} completed", name);
                Message::ReviewCompleted { body }
            }
            Ok(Err(e)) => {
                warn!("Review of {} failed: {}", name, e);
                Message::ReviewFailed {
                    unreachable: matches!(e, Error::Transport { .. }),
                    error: e.to_string(),
                }
            }
            Err(e) => {
                error!("Review task for {} aborted: {}", name, e);
                Message::ReviewFailed {
                    error: format!("Upload failed unexpectedly: {}", e),
                    unreachable: false,
                }
            }
        };
        report(&msg_tx, message).await;
    })
}

fn spawn_persist_theme(
    preferences: Option<PreferenceStore>,
    theme: Theme,
    msg_tx: mpsc::Sender<Message>,
) {
    tokio::spawn(async move {
        let Some(store) = preferences else {
            report(
                &msg_tx,
                Message::PreferenceSaveFailed {
                    error: "no config directory on this system".to_string(),
                },
            )
            .await;
            return;
        };

        let saved = tokio::task::spawn_blocking(move || store.set_theme(theme)).await;
        let error = match saved {
            Ok(Ok(())) => {
                debug!("Persisted theme {}", theme);
                return;
            }
            Ok(Err(e)) => e.to_string(),
            Err(e) => e.to_string(),
        };
        warn!("Failed to persist theme: {}", error);
        report(&msg_tx, Message::PreferenceSaveFailed { error }).await;
    });
}

fn spawn_clipboard_copy(text: String, what: String, msg_tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let copied = tokio::task::spawn_blocking(move || clipboard::copy_to_clipboard(&text)).await;
        let message = match copied {
            Ok(Ok(())) => Message::Copied { what },
            Ok(Err(e)) => Message::ClipboardFailed {
                error: e.to_string(),
            },
            Err(e) => Message::ClipboardFailed {
                error: format!("Clipboard task failed: {}", e),
            },
        };
        report(&msg_tx, message).await;
    });
}

fn spawn_export_write(path: PathBuf, contents: String, msg_tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let message = match write_export(&path, &contents).await {
            Ok(()) => {
                info!("Exported review to {:?}", path);
                Message::Exported { path }
            }
            Err(e) => Message::ExportFailed {
                error: e.to_string(),
            },
        };
        report(&msg_tx, message).await;
    });
}

async fn write_export(path: &std::path::Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Creating export directory {:?}", parent))?;
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Writing export {:?}", path))?;
    Ok(())
}

/// Probe `/health` immediately, then every `interval`, until shutdown.
///
/// Fixed interval: no backoff, no jitter. A probe that has not answered
/// within one interval is reported as unreachable so the next tick still
/// fires on time.
pub fn spawn_health_poller<A>(
    api: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
    interval: Duration,
) -> JoinHandle<()>
where
    A: ReviewApi + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                    continue;
                }
            }

            let health = tokio::select! {
                probed = tokio::time::timeout(interval, api.health()) => {
                    probed.unwrap_or_else(|_| {
                        debug!("Health probe timed out after {:?}", interval);
                        HealthReport::unreachable()
                    })
                }
                _ = shutdown_rx.changed() => break,
            };
            if msg_tx.send(Message::HealthChecked(health)).await.is_err() {
                break;
            }
        }
        debug!("Health poller stopped");
    })
}

/// Re-check the system appearance every `interval` and report changes.
///
/// `last_seen` is the value detected at startup; only differences from the
/// previous observation produce a message.
pub fn spawn_appearance_poller(
    probe: AppearanceProbe,
    mut last_seen: Option<Theme>,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The startup value is already known
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let detected = match tokio::task::spawn_blocking(probe).await {
                        Ok(detected) => detected,
                        Err(e) => {
                            debug!("Appearance probe failed: {}", e);
                            continue;
                        }
                    };
                    if detected == last_seen {
                        continue;
                    }
                    last_seen = detected;
                    if let Some(theme) = detected {
                        debug!("System appearance changed to {}", theme);
                        if msg_tx.send(Message::SystemThemeChanged(theme)).await.is_err() {
                            break;
                        }
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("Appearance poller stopped");
    })
}
