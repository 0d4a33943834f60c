//! # redline-core - Core Domain Types
//!
//! Foundation crate for Redline. Provides the selected document and its
//! validation, review response normalization, health states, the theme
//! preference, HTML escaping, export naming and error handling.
//!
//! This crate has **zero internal dependencies** and performs no network I/O.
//!
//! ## Public API
//!
//! ### Documents (`document`)
//! - [`SelectedFile`] - The file chosen for review (name, size, reported MIME)
//! - [`validate()`] - Size limit and type allow-list check
//!
//! ### Reviews (`review`)
//! - [`ReviewResponse`] - Classification of a response body (structured / raw / opaque)
//! - [`normalize()`] - Total reduction of any body to a [`NormalizedResult`]
//! - [`Flag`], [`Severity`] - Flagged issues
//!
//! ### Health (`health`)
//! - [`HealthStatus`], [`HealthReport`] - Badge state from a `/health` body
//!
//! ### Output (`markup`, `export`)
//! - [`escape_html()`] - Escaping for any model text placed in HTML
//! - [`html_report()`], [`json_export()`], [`export_file_name()`]
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use redline_core::prelude::*;
//! ```

pub mod document;
pub mod error;
pub mod export;
pub mod health;
pub mod logging;
pub mod markup;
pub mod prelude;
pub mod review;
pub mod theme;

// Re-export commonly used types at crate root for convenience
pub use document::{
    file_stem, format_size, validate, SelectedFile, ValidationError, ALLOWED_EXTENSIONS,
    ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES,
};
pub use error::{Error, Result, ResultExt};
pub use export::{export_file_name, json_export};
pub use health::{HealthReport, HealthStatus};
pub use markup::{escape_html, html_report};
pub use review::{normalize, Flag, NormalizedResult, ReviewReport, ReviewResponse, Severity};
pub use theme::{initial_theme, Theme};
