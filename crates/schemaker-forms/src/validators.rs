//! Validators attached to schema nodes.
//!
//! A [`Validator`] is both a description (so generated schemas can be
//! inspected and compared) and an executable rule via
//! [`Validator::validate`]. Deferred validators are resolved against a
//! [`BindContext`] when a schema is bound to request-specific data.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use schemaker_core::{Invalid, SchemakerError, SchemakerResult, Value};

/// Signature of a caller-supplied validation rule.
pub type ValidatorFn = dyn Fn(&str, &Value) -> Result<(), Invalid> + Send + Sync;

/// Signature of a deferred validator's bind-time computation.
pub type DeferredFn = dyn Fn(&BindContext) -> SchemakerResult<Validator> + Send + Sync;

/// Key/value data a schema is bound with (e.g. the current time).
///
/// # Examples
///
/// ```
/// use schemaker_core::Value;
/// use schemaker_forms::validators::BindContext;
///
/// let ctx = BindContext::new().with("tenant", Value::from("acme"));
/// assert_eq!(ctx.get("tenant"), Some(&Value::from("acme")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindContext {
    values: HashMap<String, Value>,
}

impl BindContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding and returns the context.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a binding.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Looks up a binding.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Looks up a binding that must be present.
    pub fn require(&self, key: &str) -> SchemakerResult<&Value> {
        self.get(key)
            .ok_or_else(|| SchemakerError::MissingBinding(key.to_string()))
    }
}

/// An opaque, caller-supplied validator.
#[derive(Clone)]
pub struct CustomValidator {
    /// Name used in debug output and comparisons.
    pub name: String,
    func: Arc<ValidatorFn>,
}

impl CustomValidator {
    /// Wraps a validation function.
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&str, &Value) -> Result<(), Invalid> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }
}

impl fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomValidator").field(&self.name).finish()
    }
}

impl PartialEq for CustomValidator {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.func, &other.func)
    }
}

/// A validator whose concrete rule is only known at bind time.
#[derive(Clone)]
pub struct DeferredValidator {
    /// Name used in debug output and in the `Unbound` error.
    pub name: String,
    func: Arc<DeferredFn>,
}

impl DeferredValidator {
    /// Wraps a bind-time computation.
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&BindContext) -> SchemakerResult<Validator> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }
}

impl fmt::Debug for DeferredValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DeferredValidator").field(&self.name).finish()
    }
}

impl PartialEq for DeferredValidator {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.func, &other.func)
    }
}

/// A validation rule for a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// String length (in characters) within `min..=max`.
    LengthBound {
        /// Minimum length.
        min: usize,
        /// Maximum length, if bounded.
        max: Option<usize>,
    },
    /// The value's string form must be one of the listed choices.
    OneOf(Vec<String>),
    /// The value must lie within an ordered range.
    Range {
        /// Inclusive lower bound.
        min: Option<Value>,
        /// Inclusive upper bound.
        max: Option<Value>,
        /// Message template used when below `min` (`${val}`, `${min}`).
        min_err: Option<String>,
        /// Message template used when above `max` (`${val}`, `${max}`).
        max_err: Option<String>,
    },
    /// The value must compile as a regular expression.
    RegexCompiles,
    /// Every child must pass; failures of all children are reported together.
    CompiledAll(Vec<Validator>),
    /// A caller-supplied rule.
    Custom(CustomValidator),
    /// A rule computed at bind time.
    Deferred(DeferredValidator),
}

const LENGTH_MIN_ERR: &str = "Shorter than minimum length ${min}";
const LENGTH_MAX_ERR: &str = "Longer than maximum length ${max}";
const RANGE_MIN_ERR: &str = "${val} is less than minimum value ${min}";
const RANGE_MAX_ERR: &str = "${val} is greater than maximum value ${max}";

impl Validator {
    /// A length bound with only a maximum.
    pub const fn max_length(max: usize) -> Self {
        Self::LengthBound { min: 0, max: Some(max) }
    }

    /// A range with default messages.
    pub const fn range(min: Option<Value>, max: Option<Value>) -> Self {
        Self::Range {
            min,
            max,
            min_err: None,
            max_err: None,
        }
    }

    /// Wraps a caller-supplied function.
    pub fn custom(
        name: impl Into<String>,
        func: impl Fn(&str, &Value) -> Result<(), Invalid> + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(CustomValidator::new(name, func))
    }

    /// Wraps a bind-time computation.
    pub fn deferred(
        name: impl Into<String>,
        func: impl Fn(&BindContext) -> SchemakerResult<Self> + Send + Sync + 'static,
    ) -> Self {
        Self::Deferred(DeferredValidator::new(name, func))
    }

    /// Returns `true` if this validator (or any child) still needs binding.
    pub fn is_deferred(&self) -> bool {
        match self {
            Self::Deferred(_) => true,
            Self::CompiledAll(children) => children.iter().any(Self::is_deferred),
            _ => false,
        }
    }

    /// Replaces every deferred validator with the rule it computes from `ctx`.
    ///
    /// Children of `CompiledAll` are resolved in place, preserving order.
    /// Resolution is one level deep: a computed rule that is itself deferred
    /// is kept as is and fails validation with [`SchemakerError::Unbound`].
    pub fn resolve(&self, ctx: &BindContext) -> SchemakerResult<Self> {
        match self {
            Self::Deferred(deferred) => {
                tracing::trace!(validator = %deferred.name, "resolving deferred validator");
                (deferred.func)(ctx)
            }
            Self::CompiledAll(children) => children
                .iter()
                .map(|child| child.resolve(ctx))
                .collect::<SchemakerResult<Vec<_>>>()
                .map(Self::CompiledAll),
            other => Ok(other.clone()),
        }
    }

    /// Checks `value` against this rule.
    ///
    /// Failures are reported as [`SchemakerError::Invalid`] keyed by `key`.
    /// An unresolved deferred validator fails with [`SchemakerError::Unbound`].
    pub fn validate(&self, key: &str, value: &Value) -> SchemakerResult<()> {
        match self {
            Self::LengthBound { min, max } => {
                let Value::String(s) = value else {
                    return Ok(());
                };
                let len = s.chars().count();
                if len < *min {
                    return Err(invalid(key, LENGTH_MIN_ERR, &[("min", min.to_string())]).into());
                }
                if let Some(max) = max {
                    if len > *max {
                        return Err(
                            invalid(key, LENGTH_MAX_ERR, &[("max", max.to_string())]).into()
                        );
                    }
                }
                Ok(())
            }
            Self::OneOf(choices) => {
                let candidate = value.to_string();
                if choices.iter().any(|c| *c == candidate) {
                    Ok(())
                } else {
                    Err(invalid(
                        key,
                        "\"${val}\" is not one of ${choices}",
                        &[("val", candidate), ("choices", choices.join(", "))],
                    )
                    .into())
                }
            }
            Self::Range {
                min,
                max,
                min_err,
                max_err,
            } => {
                if let Some(min) = min {
                    check_bound(key, value, min, Ordering::Less, min_err.as_deref(), "min")?;
                }
                if let Some(max) = max {
                    check_bound(key, value, max, Ordering::Greater, max_err.as_deref(), "max")?;
                }
                Ok(())
            }
            Self::RegexCompiles => {
                let Value::String(pattern) = value else {
                    return Ok(());
                };
                regex::Regex::new(pattern).map(|_| ()).map_err(|e| {
                    Invalid::new(key, format!("Invalid regular expression: {e}")).into()
                })
            }
            Self::CompiledAll(children) => {
                let mut collected = Invalid::node(key);
                for child in children {
                    match child.validate(key, value) {
                        Ok(()) => {}
                        Err(SchemakerError::Invalid(err)) => {
                            collected.messages.extend(err.messages);
                            collected.params.extend(err.params);
                        }
                        Err(other) => return Err(other),
                    }
                }
                if collected.messages.is_empty() {
                    Ok(())
                } else {
                    Err(collected.into())
                }
            }
            Self::Custom(custom) => (custom.func)(key, value).map_err(Into::into),
            Self::Deferred(deferred) => Err(SchemakerError::Unbound(deferred.name.clone())),
        }
    }
}

/// Folds a list of validators into at most one validator.
///
/// Zero validators yield `None`, one yields that validator unchanged, and
/// two or more yield a `CompiledAll` preserving their order.
pub fn collapse(mut validators: Vec<Validator>) -> Option<Validator> {
    match validators.len() {
        0 => None,
        1 => validators.pop(),
        _ => Some(Validator::CompiledAll(validators)),
    }
}

/// A deferred validator that only accepts values at or after the bound `now`.
///
/// The bind context must carry a `now` entry (typically a
/// [`Value::DateTime`]); binding without it fails with `MissingBinding`.
///
/// # Examples
///
/// ```
/// use schemaker_core::Value;
/// use schemaker_forms::validators::{from_now_on, BindContext};
///
/// let now = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
/// let bound = from_now_on().resolve(&BindContext::new().with("now", now)).unwrap();
///
/// let earlier = now - chrono::Duration::hours(1);
/// assert!(bound.validate("scheduled", &Value::from(earlier)).is_err());
/// assert!(bound.validate("scheduled", &Value::from(now)).is_ok());
/// ```
pub fn from_now_on() -> Validator {
    Validator::deferred("from_now_on", |ctx| {
        let now = ctx.require("now")?.clone();
        Ok(Validator::Range {
            min: Some(now),
            max: None,
            min_err: Some("Cannot be in the past. Current time is ${min}".to_string()),
            max_err: None,
        })
    })
}

fn check_bound(
    key: &str,
    value: &Value,
    bound: &Value,
    failing: Ordering,
    template: Option<&str>,
    bound_name: &str,
) -> SchemakerResult<()> {
    let default_template = if failing == Ordering::Less {
        RANGE_MIN_ERR
    } else {
        RANGE_MAX_ERR
    };
    match value.compare(bound) {
        Some(ordering) if ordering == failing => Err(invalid(
            key,
            template.unwrap_or(default_template),
            &[("val", value.to_string()), (bound_name, bound.to_string())],
        )
        .into()),
        Some(_) => Ok(()),
        None => Err(invalid(
            key,
            "${val} cannot be compared with ${bound}",
            &[("val", value.to_string()), ("bound", bound.to_string())],
        )
        .into()),
    }
}

/// Builds an `Invalid` whose message is `template` with `${name}`
/// placeholders filled from `params`.
fn invalid(key: &str, template: &str, params: &[(&str, String)]) -> Invalid {
    let mut message = template.to_string();
    let mut err = Invalid::node(key);
    for (name, value) in params {
        message = message.replace(&format!("${{{name}}}"), value);
        err = err.with_param(*name, value.clone());
    }
    err.with_message(message)
}
