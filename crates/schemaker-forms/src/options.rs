//! Schema options: the per-column overrides declared on the model and the
//! overrides passed at call time.
//!
//! Both are plain [`Options`] maps. [`Options::merged`] combines them with
//! call-time entries winning. The transformer then *takes* entries as it
//! resolves each aspect of the node, so an option consumed by one step is
//! not seen by later steps.

use std::collections::HashMap;

use schemaker_core::Value;

use crate::schema::{MissingPolicy, SchemaType};
use crate::validators::Validator;
use crate::widgets::Widget;

/// Recognised option names.
pub mod keys {
    /// Explicit schema type; also switches `validators` to replace the
    /// type's own validators.
    pub const TYP: &str = "typ";
    /// Extra validators.
    pub const VALIDATORS: &str = "validators";
    /// Node name.
    pub const NAME: &str = "name";
    /// Node title.
    pub const TITLE: &str = "title";
    /// Node description.
    pub const DESCRIPTION: &str = "description";
    /// Node default.
    pub const DEFAULT: &str = "default";
    /// Missing policy.
    pub const MISSING: &str = "missing";
    /// Maximum length, overriding the column's.
    pub const MAXLENGTH: &str = "maxlength";
    /// Text input size.
    pub const SIZE: &str = "size";
    /// Text input type.
    pub const INPUT_TYPE: &str = "input_type";
    /// Text input mask.
    pub const MASK: &str = "mask";
    /// Text input placeholder.
    pub const PLACEHOLDER: &str = "placeholder";
    /// Explicit widget.
    pub const WIDGET: &str = "widget";
}

/// A single option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Text (names, titles, placeholders, ...).
    Text(String),
    /// A count (lengths, sizes).
    Size(usize),
    /// A schema value (defaults, missing fallbacks).
    Value(Value),
    /// A schema type.
    Type(SchemaType),
    /// Validators.
    Validators(Vec<Validator>),
    /// A missing policy.
    Missing(MissingPolicy),
    /// A widget.
    Widget(Widget),
}

impl OptionValue {
    /// Interprets the option as a schema value.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Text(s) => Some(Value::String(s)),
            Self::Size(n) => i64::try_from(n).ok().map(Value::Int),
            _ => None,
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Size(_) => "size",
            Self::Value(_) => "value",
            Self::Type(_) => "type",
            Self::Validators(_) => "validators",
            Self::Missing(_) => "missing",
            Self::Widget(_) => "widget",
        }
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<usize> for OptionValue {
    fn from(v: usize) -> Self {
        Self::Size(v)
    }
}

impl From<Value> for OptionValue {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<SchemaType> for OptionValue {
    fn from(v: SchemaType) -> Self {
        Self::Type(v)
    }
}

impl From<Vec<Validator>> for OptionValue {
    fn from(v: Vec<Validator>) -> Self {
        Self::Validators(v)
    }
}

impl From<Validator> for OptionValue {
    fn from(v: Validator) -> Self {
        Self::Validators(vec![v])
    }
}

impl From<MissingPolicy> for OptionValue {
    fn from(v: MissingPolicy) -> Self {
        Self::Missing(v)
    }
}

impl From<Widget> for OptionValue {
    fn from(v: Widget) -> Self {
        Self::Widget(v)
    }
}

/// A map from option name to value.
///
/// # Examples
///
/// ```
/// use schemaker_forms::options::{keys, Options};
///
/// let info = Options::new().with(keys::TITLE, "E-mail").with(keys::SIZE, 20_usize);
/// let call = Options::new().with(keys::TITLE, "Email address");
///
/// let mut merged = Options::merged(&info, &call);
/// assert_eq!(merged.take_text(keys::TITLE).as_deref(), Some("Email address"));
/// assert_eq!(merged.get_size(keys::SIZE), Some(20));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: HashMap<String, OptionValue>,
}

impl Options {
    /// Creates an empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `base` overlaid with `overrides`; `overrides` wins on collisions.
    pub fn merged(base: &Self, overrides: &Self) -> Self {
        let mut entries = base.entries.clone();
        entries.extend(overrides.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { entries }
    }

    /// Sets an option and returns the map.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets an option.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Looks up an option.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    /// Returns `true` if the option is set.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes and returns an option.
    pub fn take(&mut self, key: &str) -> Option<OptionValue> {
        self.entries.remove(key)
    }

    /// Returns the number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no option is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads a count without consuming it.
    pub fn get_size(&self, key: &str) -> Option<usize> {
        match self.get(key)? {
            OptionValue::Size(n) => Some(*n),
            OptionValue::Value(Value::Int(n)) => usize::try_from(*n).ok(),
            other => mismatched(key, other, "size"),
        }
    }

    /// Takes a count.
    pub fn take_size(&mut self, key: &str) -> Option<usize> {
        let size = self.get_size(key);
        self.take(key);
        size
    }

    /// Takes a text option.
    pub fn take_text(&mut self, key: &str) -> Option<String> {
        match self.take(key)? {
            OptionValue::Text(s) | OptionValue::Value(Value::String(s)) => Some(s),
            other => mismatched(key, &other, "text"),
        }
    }

    /// Takes a schema type.
    pub fn take_type(&mut self, key: &str) -> Option<SchemaType> {
        match self.take(key)? {
            OptionValue::Type(t) => Some(t),
            other => mismatched(key, &other, "type"),
        }
    }

    /// Takes a validator list.
    pub fn take_validators(&mut self, key: &str) -> Option<Vec<Validator>> {
        match self.take(key)? {
            OptionValue::Validators(v) => Some(v),
            other => mismatched(key, &other, "validators"),
        }
    }

    /// Takes a schema value.
    pub fn take_value(&mut self, key: &str) -> Option<Value> {
        let option = self.take(key)?;
        let kind = option.kind();
        option
            .into_value()
            .or_else(|| mismatched_kind(key, kind, "value"))
    }

    /// Takes a missing policy; plain values become `Null` or a fallback value.
    pub fn take_missing(&mut self, key: &str) -> Option<MissingPolicy> {
        match self.take(key)? {
            OptionValue::Missing(policy) => Some(policy),
            other => {
                let kind = other.kind();
                other
                    .into_value()
                    .map(MissingPolicy::from)
                    .or_else(|| mismatched_kind(key, kind, "missing"))
            }
        }
    }

    /// Takes a widget.
    pub fn take_widget(&mut self, key: &str) -> Option<Widget> {
        match self.take(key)? {
            OptionValue::Widget(w) => Some(w),
            other => mismatched(key, &other, "widget"),
        }
    }
}

fn mismatched<T>(key: &str, found: &OptionValue, expected: &str) -> Option<T> {
    mismatched_kind(key, found.kind(), expected)
}

fn mismatched_kind<T>(key: &str, found: &str, expected: &str) -> Option<T> {
    tracing::warn!(option = key, found, expected, "ignoring option of unexpected kind");
    None
}
