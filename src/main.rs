//! Redline - a terminal client for the contract review service
//!
//! This is the binary entry point: argument parsing, logging, configuration
//! and the choice between the TUI and headless mode.

mod headless;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use tracing::{info, warn};

use redline_app::config::{config_dir, load_settings, resolve_api_base, PreferenceStore, Settings};
use redline_app::EngineOptions;
use redline_client::ReviewClient;

/// Redline - review contracts from the terminal
#[derive(Parser, Debug)]
#[command(name = "redline", version)]
#[command(about = "A terminal client for the contract review service", long_about = None)]
struct Args {
    /// Document to pick at startup (PDF, DOCX or plain text)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Review service base URL, e.g. http://127.0.0.1:8000
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,

    /// Save --api-base as the default for future runs
    #[arg(long, requires = "api_base")]
    remember_api_base: bool,

    /// Run without the TUI and print NDJSON events
    #[arg(long)]
    headless: bool,

    /// With --headless: print only the normalized review document
    #[arg(long, requires = "headless")]
    json: bool,

    /// With --headless: probe the service health once and exit
    #[arg(long, requires = "headless")]
    health: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    redline_core::logging::init()?;

    let settings = config_dir()
        .map(|dir| load_settings(&dir))
        .unwrap_or_else(Settings::default);
    let preferences = PreferenceStore::default_location();
    let prefs = match &preferences {
        Some(store) => store.load().unwrap_or_else(|e| {
            warn!("Ignoring preferences: {}", e);
            Default::default()
        }),
        None => Default::default(),
    };

    let api_base = resolve_api_base(args.api_base.as_deref(), &prefs, &settings);
    info!("API base: {}", api_base);

    if args.remember_api_base {
        // Only a usable URL is persisted
        redline_client::normalize_base_url(&api_base)?;
        match &preferences {
            Some(store) => {
                store.set_api_base(&api_base)?;
                info!("Remembered API base in {:?}", store.path());
            }
            None => return Err(eyre!("No config directory to remember the API base in")),
        }
    }

    if args.headless {
        let client = ReviewClient::new(&api_base)?;
        let mut stdout = std::io::stdout();

        let ok = if args.health {
            headless::run_health(&client, &mut stdout).await
        } else {
            let file = args
                .file
                .ok_or_else(|| eyre!("--headless needs a FILE to review (or --health)"))?;
            headless::run_review(&client, &file, args.json, &mut stdout).await
        };

        info!("Headless run finished (ok: {})", ok);
        if !ok {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut options = EngineOptions::new(api_base, settings, preferences);
    options.initial_file = args.file;
    redline_tui::run(options).await?;

    Ok(())
}
