//! Reading [`Settings`] from configuration documents and the environment.
//!
//! Sources are layered: built-in defaults, then a TOML or JSON document,
//! then `SCHEMAKER_*` environment variables. A document only needs the keys
//! it changes; everything else, nested `[sizing]` keys included, keeps its
//! default.
//!
//! | Variable | Field |
//! |---|---|
//! | `SCHEMAKER_DEBUG` | `debug` |
//! | `SCHEMAKER_LOG_LEVEL` | `log_level` |
//! | `SCHEMAKER_MAX_INPUT_SIZE` | `sizing.max_size` |
//!
//! ```rust,no_run
//! use schemaker_core::settings_loader;
//!
//! let settings = settings_loader::load(Some(std::path::Path::new("config/schemaker.toml"))).unwrap();
//! schemaker_core::SETTINGS.install(settings).unwrap();
//! ```

use std::fmt::Display;
use std::path::Path;

use crate::error::{SchemakerError, SchemakerResult};
use crate::settings::Settings;

const ENV_DEBUG: &str = "SCHEMAKER_DEBUG";
const ENV_LOG_LEVEL: &str = "SCHEMAKER_LOG_LEVEL";
const ENV_MAX_INPUT_SIZE: &str = "SCHEMAKER_MAX_INPUT_SIZE";

/// Parses settings from a TOML document.
pub fn from_toml_str(document: &str) -> SchemakerResult<Settings> {
    toml::from_str(document).map_err(|e| parse_error("TOML", e))
}

/// Parses settings from a JSON document.
pub fn from_json_str(document: &str) -> SchemakerResult<Settings> {
    serde_json::from_str(document).map_err(|e| parse_error("JSON", e))
}

/// Reads settings from a file; `.json` files are parsed as JSON, anything
/// else as TOML.
pub fn from_file(path: &Path) -> SchemakerResult<Settings> {
    let document = std::fs::read_to_string(path).map_err(|e| {
        SchemakerError::ConfigurationError(format!("cannot read {}: {e}", path.display()))
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        from_json_str(&document)
    } else {
        from_toml_str(&document)
    }
}

/// Builds settings from the defaults, an optional file and the environment.
pub fn load(path: Option<&Path>) -> SchemakerResult<Settings> {
    let mut settings = match path {
        Some(path) => from_file(path)?,
        None => Settings::default(),
    };
    apply_env_overrides(&mut settings);
    tracing::debug!(
        file = ?path,
        debug = settings.debug,
        log_level = %settings.log_level,
        "settings loaded"
    );
    Ok(settings)
}

/// The defaults with environment overrides applied.
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies the `SCHEMAKER_*` environment variables to `settings`.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides(settings, |name| std::env::var(name).ok());
}

/// Applies overrides read through `lookup`.
///
/// `SCHEMAKER_DEBUG` is true for `true`, `1` or `yes` (any case) and false
/// otherwise. An unparsable `SCHEMAKER_MAX_INPUT_SIZE` is logged and skipped.
pub fn apply_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(debug) = lookup(ENV_DEBUG) {
        settings.debug = ["true", "1", "yes"]
            .iter()
            .any(|t| debug.eq_ignore_ascii_case(t));
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        settings.log_level = level;
    }
    if let Some(raw) = lookup(ENV_MAX_INPUT_SIZE) {
        match raw.trim().parse::<usize>() {
            Ok(max_size) => settings.sizing.max_size = max_size,
            Err(e) => {
                tracing::warn!(variable = ENV_MAX_INPUT_SIZE, value = %raw, error = %e, "ignoring override");
            }
        }
    }
}

fn parse_error(format: &str, err: impl Display) -> SchemakerError {
    SchemakerError::ConfigurationError(format!("invalid {format} settings: {err}"))
}
