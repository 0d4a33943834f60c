//! redline-app - Application state and orchestration for Redline
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management, the Engine that owns the message loop and background pollers,
//! configuration and preference persistence, and the platform glue for
//! clipboard access, system appearance and dropped-file paths.

pub mod actions;
pub mod appearance;
pub mod clipboard;
pub mod config;
pub mod engine;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod paste;
pub mod process;
pub mod result_view_state;
pub mod signals;
pub mod state;

// Re-export primary types
pub use engine::{Engine, EngineOptions};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use state::{AppState, UiMode, UploadState};
