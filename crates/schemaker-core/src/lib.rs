//! # schemaker-core
//!
//! Foundation types for schemaker: the error enum, the [`Value`] type,
//! settings and their loading, logging setup, and text helpers.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`value`] - Schema-level values
//! - [`settings`] - Settings and global configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`utils`] - Label helpers

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use error::{Invalid, SchemakerError, SchemakerResult};
pub use settings::{GlobalSettings, InputSizing, Settings, SETTINGS};
pub use value::Value;
