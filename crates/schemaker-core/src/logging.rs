//! Logging integration.
//!
//! Provides a helper for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and a span for grouping the
//! events emitted while a model's schema is being built.

use tracing_subscriber::{fmt, EnvFilter};

use crate::settings::Settings;

/// Installs the global tracing subscriber described by `settings`.
///
/// Debug mode logs pretty, multi-line events with source locations; otherwise
/// each event is one flattened JSON object. An unparsable `log_level` falls
/// back to `info` and is reported once the subscriber is up.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case that subscriber stays in place.
pub fn setup_logging(settings: &Settings) -> bool {
    let (filter, rejected) = match EnvFilter::try_new(&settings.log_level) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("info"), Some(e)),
    };
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if settings.debug {
        builder
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .is_ok()
    } else {
        builder.json().flatten_event(true).try_init().is_ok()
    };

    if let Some(e) = rejected {
        tracing::warn!(directive = %settings.log_level, error = %e, "invalid log level, using info");
    }
    installed
}

/// Creates a span covering the schema construction for one model.
///
/// # Examples
///
/// ```
/// use schemaker_core::logging::model_span;
///
/// let span = model_span("Contact");
/// let _guard = span.enter();
/// tracing::debug!("building schema");
/// ```
pub fn model_span(model: &str) -> tracing::Span {
    tracing::debug_span!("schema", model = model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_setup_keeps_first_subscriber() {
        let settings = Settings {
            log_level: "not a [valid directive".into(),
            ..Settings::default()
        };
        setup_logging(&settings);
        assert!(!setup_logging(&Settings::default()));
    }

    #[test]
    fn test_model_span_enters() {
        let span = model_span("Contact");
        let _guard = span.enter();
        tracing::debug!("inside span");
    }
}
