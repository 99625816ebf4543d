//! Process configuration.
//!
//! [`Settings`] covers logging and the text-input sizing rule. The
//! process-wide copy lives in [`SETTINGS`]: install it once at startup, and
//! every reader that runs earlier (or in a process that never installs one)
//! sees the built-in defaults.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{SchemakerError, SchemakerResult};

/// Parameters of the text-input sizing rule.
///
/// Inputs for short fields are as wide as their maximum length. Past the
/// `breakpoint`, every `divisor` extra characters add one column, and the
/// result never exceeds `max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSizing {
    /// Lengths up to this value map to themselves.
    pub breakpoint: usize,
    /// Growth rate past the breakpoint.
    pub divisor: usize,
    /// Upper clamp for the computed size.
    pub max_size: usize,
}

impl Default for InputSizing {
    fn default() -> Self {
        Self {
            breakpoint: 35,
            divisor: 4,
            max_size: 60,
        }
    }
}

impl InputSizing {
    /// Computes the display size for an input accepting `max_length` characters.
    ///
    /// An explicit `size` skips the computation but is still clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use schemaker_core::settings::InputSizing;
    ///
    /// let sizing = InputSizing::default();
    /// assert_eq!(sizing.size_for(35, None), 35);
    /// assert_eq!(sizing.size_for(99, None), 51);
    /// assert_eq!(sizing.size_for(1000, None), 60);
    /// ```
    pub fn size_for(&self, max_length: usize, size: Option<usize>) -> usize {
        let size = size.unwrap_or_else(|| {
            if max_length <= self.breakpoint {
                max_length
            } else {
                self.breakpoint + (max_length - self.breakpoint) / self.divisor.max(1)
            }
        });
        size.min(self.max_size)
    }
}

/// Logging and sizing configuration.
///
/// Every field has a default, so configuration documents only need the keys
/// they change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Human-readable logs when `true`, JSON lines otherwise.
    pub debug: bool,
    /// `EnvFilter` directive, e.g. `info` or `schemaker_forms=debug`.
    pub log_level: String,
    /// Text-input sizing rule.
    pub sizing: InputSizing,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: String::from("info"),
            sizing: InputSizing::default(),
        }
    }
}

/// A settings slot that can be filled once.
///
/// # Examples
///
/// ```
/// use schemaker_core::settings::{GlobalSettings, Settings};
///
/// let slot = GlobalSettings::new();
/// assert_eq!(slot.current().log_level, "info");
///
/// let custom = Settings { log_level: "debug".into(), ..Settings::default() };
/// slot.install(custom).unwrap();
/// assert_eq!(slot.current().log_level, "debug");
/// assert!(slot.install(Settings::default()).is_err());
/// ```
#[derive(Debug, Default)]
pub struct GlobalSettings {
    installed: OnceLock<Settings>,
}

impl GlobalSettings {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self {
            installed: OnceLock::new(),
        }
    }

    /// Fills the slot.
    ///
    /// # Errors
    ///
    /// Returns [`SchemakerError::ConfigurationError`] if settings were
    /// already installed; the installed settings are left unchanged.
    pub fn install(&self, settings: Settings) -> SchemakerResult<()> {
        self.installed.set(settings).map_err(|_| {
            SchemakerError::ConfigurationError("settings are already installed".to_string())
        })?;
        tracing::debug!("settings installed");
        Ok(())
    }

    /// The installed settings, or the defaults when nothing was installed.
    pub fn current(&self) -> &Settings {
        static DEFAULTS: OnceLock<Settings> = OnceLock::new();
        self.installed
            .get()
            .unwrap_or_else(|| DEFAULTS.get_or_init(Settings::default))
    }

    /// The installed settings, if any.
    pub fn installed(&self) -> Option<&Settings> {
        self.installed.get()
    }
}

/// The process-wide settings.
pub static SETTINGS: GlobalSettings = GlobalSettings::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.debug);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.sizing, InputSizing::default());
    }

    #[test]
    fn test_size_boundaries() {
        let sizing = InputSizing::default();
        assert_eq!(sizing.size_for(35, None), 35);
        assert_eq!(sizing.size_for(36, None), 35);
        assert_eq!(sizing.size_for(39, None), 36);
        assert_eq!(sizing.size_for(99, None), 51);
        assert_eq!(sizing.size_for(135, None), 60);
        assert_eq!(sizing.size_for(1000, None), 60);
        assert_eq!(sizing.size_for(0, None), 0);
    }

    #[test]
    fn test_explicit_size_is_clamped() {
        let sizing = InputSizing::default();
        assert_eq!(sizing.size_for(10, Some(20)), 20);
        assert_eq!(sizing.size_for(10, Some(80)), 60);
    }

    #[test]
    fn test_custom_sizing() {
        let sizing = InputSizing {
            breakpoint: 10,
            divisor: 2,
            max_size: 20,
        };
        assert_eq!(sizing.size_for(14, None), 12);
        assert_eq!(sizing.size_for(100, None), 20);
    }

    #[test]
    fn test_zero_divisor_does_not_panic() {
        let sizing = InputSizing {
            divisor: 0,
            ..InputSizing::default()
        };
        assert_eq!(sizing.size_for(40, None), 40);
    }

    #[test]
    fn test_slot_falls_back_to_defaults() {
        let slot = GlobalSettings::new();
        assert!(slot.installed().is_none());
        assert_eq!(slot.current(), &Settings::default());
    }

    #[test]
    fn test_slot_install_once() {
        let slot = GlobalSettings::new();
        let quiet = Settings {
            debug: false,
            ..Settings::default()
        };
        slot.install(quiet.clone()).unwrap();
        assert_eq!(slot.installed(), Some(&quiet));

        let err = slot.install(Settings::default()).unwrap_err();
        assert!(matches!(err, SchemakerError::ConfigurationError(_)));
        assert!(!slot.current().debug);
    }
}
