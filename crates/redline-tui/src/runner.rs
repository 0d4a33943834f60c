//! Main TUI runner - entry point and event loop

use redline_app::{Engine, EngineOptions};
use redline_core::prelude::*;

use super::{event, render, terminal};

/// Run the TUI until the user quits
pub async fn run(options: EngineOptions) -> Result<()> {
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    // Build the engine before taking over the terminal
    let mut engine = Engine::new(options)?;

    let mut term = ratatui::init();
    if let Err(e) = terminal::enable_paste() {
        warn!("{}; dropped files will arrive as keystrokes", e);
    }

    let result = run_loop(&mut term, &mut engine);

    engine.shutdown();
    terminal::disable_paste();
    ratatui::restore();

    result
}

/// Main event loop
fn run_loop(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        // Process background messages (upload progress, health, signals)
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &mut engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    info!("Leaving the event loop");
    Ok(())
}
