//! Schema types and schema nodes.
//!
//! A [`SchemaNode`] describes one form field: its [`SchemaType`], its
//! validator, its default, what happens when input is missing, and how it
//! is displayed. Nodes are usually produced by
//! [`ColumnSchemaTransformer`](crate::transformer::ColumnSchemaTransformer),
//! but can be built by hand.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use schemaker_core::{Invalid, SchemakerResult, Value};

use crate::validators::{BindContext, Validator};
use crate::widgets::Widget;

/// String form of the null sentinel as it may arrive from older serialized
/// forms. Deserializing it yields null.
pub const NULL_MARKER: &str = "<colander.null>";

/// The target type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    /// `true`/`false`.
    Boolean,
    /// `YYYY-MM-DD`.
    Date,
    /// `YYYY-MM-DDTHH:MM[:SS[.fff]]`.
    DateTime,
    /// `HH:MM[:SS]`.
    Time,
    /// Fixed-point decimal, kept in textual form.
    Decimal,
    /// Floating-point number.
    Float,
    /// Signed integer.
    Integer,
    /// Free text.
    String,
    /// `true`/`false`/null.
    Trilean,
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "Boolean",
            Self::Date => "Date",
            Self::DateTime => "DateTime",
            Self::Time => "Time",
            Self::Decimal => "Decimal",
            Self::Float => "Float",
            Self::Integer => "Integer",
            Self::String => "String",
            Self::Trilean => "Trilean",
        };
        write!(f, "{name}")
    }
}

impl SchemaType {
    /// Converts raw submitted text into a typed value.
    ///
    /// Failures are reported against `key`.
    pub fn deserialize(self, key: &str, raw: &str) -> Result<Value, Invalid> {
        match self {
            Self::String => Ok(Value::String(raw.to_string())),
            Self::Boolean => Ok(Value::Bool(!is_false_literal(raw))),
            Self::Trilean => Ok(Trilean.deserialize(&Value::from(raw)).into()),
            Self::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| not_a_number(key, raw)),
            Self::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| not_a_number(key, raw)),
            Self::Decimal => Decimal::from_str(raw.trim())
                .map(Value::Decimal)
                .map_err(|_| not_a_number(key, raw)),
            Self::Date => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|_| Invalid::new(key, "Invalid date")),
            Self::DateTime => parse_datetime(raw.trim())
                .map(Value::DateTime)
                .ok_or_else(|| Invalid::new(key, "Invalid date")),
            Self::Time => ["%H:%M:%S", "%H:%M"]
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(raw.trim(), fmt).ok())
                .map(Value::Time)
                .ok_or_else(|| Invalid::new(key, "Invalid time")),
        }
    }
}

fn is_false_literal(raw: &str) -> bool {
    matches!(raw.to_lowercase().as_str(), "false" | "0")
}

fn not_a_number(key: &str, raw: &str) -> Invalid {
    Invalid::new(key, format!("\"{raw}\" is not a number")).with_param("val", raw)
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// A boolean that can also be unset.
///
/// Useful for questions where "no answer" differs from "no".
///
/// # Examples
///
/// ```
/// use schemaker_core::Value;
/// use schemaker_forms::schema::Trilean;
///
/// assert_eq!(Trilean.serialize(Some(true)), Value::from("true"));
/// assert_eq!(Trilean.serialize(None), Value::Null);
/// assert_eq!(Trilean.deserialize(&Value::from("0")), Some(false));
/// assert_eq!(Trilean.deserialize(&Value::from("<colander.null>")), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trilean;

impl Trilean {
    /// Serializes to `"true"`, `"false"` or null.
    pub fn serialize(self, value: Option<bool>) -> Value {
        match value {
            None => Value::Null,
            Some(true) => Value::from("true"),
            Some(false) => Value::from("false"),
        }
    }

    /// Deserializes a submitted value.
    ///
    /// Null and [`NULL_MARKER`] yield `None`; `"false"` and `"0"`
    /// (case-insensitive) yield `Some(false)`; anything else is `Some(true)`.
    pub fn deserialize(self, value: &Value) -> Option<bool> {
        let text = match value {
            Value::Null => return None,
            other => other.to_string(),
        };
        if text == NULL_MARKER {
            return None;
        }
        Some(!is_false_literal(&text))
    }
}

/// What a node yields when input is absent.
#[derive(Debug, Clone, PartialEq)]
pub enum MissingPolicy {
    /// Absent input is an error.
    Required,
    /// Absent input yields [`Value::Null`].
    Null,
    /// Absent input yields this value.
    Value(Value),
}

impl From<Value> for MissingPolicy {
    fn from(value: Value) -> Self {
        if value.is_null() {
            Self::Null
        } else {
            Self::Value(value)
        }
    }
}

/// A description of one form field.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    /// The field name.
    pub name: String,
    /// Human-readable label.
    pub title: String,
    /// Help text.
    pub description: Option<String>,
    /// The target type.
    pub schema_type: SchemaType,
    /// The validator, if any.
    pub validator: Option<Validator>,
    /// Value shown when the form is first rendered; `Null` for none.
    pub default: Value,
    /// Behaviour when input is absent.
    pub missing: MissingPolicy,
    /// Display widget; `None` leaves the choice to the renderer.
    pub widget: Option<Widget>,
}

impl SchemaNode {
    /// Creates a required node without validator, default or widget.
    ///
    /// The title is derived from the name.
    pub fn new(name: impl Into<String>, schema_type: SchemaType) -> Self {
        let name = name.into();
        let title = schemaker_core::utils::text::humanize_key(&name);
        Self {
            name,
            title,
            description: None,
            schema_type,
            validator: None,
            default: Value::Null,
            missing: MissingPolicy::Required,
            widget: None,
        }
    }

    /// Sets the missing policy.
    #[must_use]
    pub fn missing(mut self, missing: impl Into<MissingPolicy>) -> Self {
        self.missing = missing.into();
        self
    }

    /// Sets the validator.
    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Sets the widget.
    #[must_use]
    pub fn widget(mut self, widget: impl Into<Widget>) -> Self {
        self.widget = Some(widget.into());
        self
    }

    /// Returns `true` if absent input is an error.
    pub const fn is_required(&self) -> bool {
        matches!(self.missing, MissingPolicy::Required)
    }

    /// Returns a copy of this node with its deferred validators resolved.
    pub fn bind(&self, ctx: &BindContext) -> SchemakerResult<Self> {
        let mut bound = self.clone();
        bound.validator = self
            .validator
            .as_ref()
            .map(|v| v.resolve(ctx))
            .transpose()?;
        Ok(bound)
    }

    /// Converts raw submitted input into a validated value.
    ///
    /// Absent or empty input, and input that deserializes to null, follow the
    /// missing policy without running the validator.
    pub fn deserialize(&self, raw: Option<&str>) -> SchemakerResult<Value> {
        let value = match raw {
            Some(raw) if !raw.is_empty() => self.schema_type.deserialize(&self.name, raw)?,
            _ => Value::Null,
        };
        if value.is_null() {
            return match &self.missing {
                MissingPolicy::Required => Err(Invalid::new(&self.name, "Required").into()),
                MissingPolicy::Null => Ok(Value::Null),
                MissingPolicy::Value(v) => Ok(v.clone()),
            };
        }
        if let Some(validator) = &self.validator {
            validator.validate(&self.name, &value)?;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::from_now_on;
    use schemaker_core::SchemakerError;

    #[test]
    fn test_deserialize_scalars() {
        assert_eq!(SchemaType::Integer.deserialize("n", " 42 ").unwrap(), Value::Int(42));
        assert_eq!(SchemaType::Float.deserialize("n", "1.5").unwrap(), Value::Float(1.5));
        assert_eq!(
            SchemaType::Decimal.deserialize("n", "12.50").unwrap(),
            Value::Decimal(Decimal::new(1250, 2))
        );
        assert_eq!(SchemaType::Boolean.deserialize("b", "FALSE").unwrap(), Value::Bool(false));
        assert_eq!(SchemaType::Boolean.deserialize("b", "yes").unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_deserialize_number_errors() {
        let err = SchemaType::Integer.deserialize("age", "abc").unwrap_err();
        assert_eq!(err.messages, vec!["\"abc\" is not a number"]);
        assert!(SchemaType::Decimal.deserialize("price", "1.2.3").is_err());
    }

    #[test]
    fn test_decimal_range_uses_full_precision() {
        let min = Decimal::from_str("0.30000000000000001").unwrap();
        let node = SchemaNode::new("price", SchemaType::Decimal)
            .validator(Validator::range(Some(Value::Decimal(min)), None));

        match node.deserialize(Some("0.3")) {
            Err(SchemakerError::Invalid(err)) => assert_eq!(
                err.messages,
                vec!["0.3 is less than minimum value 0.30000000000000001"]
            ),
            other => panic!("unexpected {other:?}"),
        }
        assert!(node.deserialize(Some("0.30000000000000002")).is_ok());
        assert!(node.deserialize(Some("1")).is_ok());
    }

    #[test]
    fn test_deserialize_dates() {
        assert_eq!(
            SchemaType::Date.deserialize("d", "2024-02-29").unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert!(SchemaType::Date.deserialize("d", "2023-02-29").is_err());
        let dt = SchemaType::DateTime.deserialize("dt", "2024-01-01T10:30").unwrap();
        assert_eq!(
            dt,
            Value::DateTime(
                NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(10, 30, 0)
                    .unwrap()
            )
        );
        assert!(SchemaType::DateTime.deserialize("dt", "2024-01-01").is_ok());
        assert_eq!(
            SchemaType::Time.deserialize("t", "08:15").unwrap(),
            Value::Time(NaiveTime::from_hms_opt(8, 15, 0).unwrap())
        );
        assert!(SchemaType::Time.deserialize("t", "25:00").is_err());
    }

    #[test]
    fn test_trilean_round_trip() {
        for value in [Some(true), Some(false), None] {
            let serialized = Trilean.serialize(value);
            assert_eq!(Trilean.deserialize(&serialized), value);
        }
    }

    #[test]
    fn test_trilean_literals() {
        assert_eq!(Trilean.deserialize(&Value::from(NULL_MARKER)), None);
        assert_eq!(Trilean.deserialize(&Value::from("False")), Some(false));
        assert_eq!(Trilean.deserialize(&Value::Int(0)), Some(false));
        assert_eq!(Trilean.deserialize(&Value::from("anything")), Some(true));
    }

    #[test]
    fn test_trilean_node_marker_follows_missing() {
        let node = SchemaNode::new("male", SchemaType::Trilean).missing(MissingPolicy::Null);
        assert_eq!(node.deserialize(Some(NULL_MARKER)).unwrap(), Value::Null);
        assert_eq!(node.deserialize(Some("true")).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_node_required() {
        let node = SchemaNode::new("name", SchemaType::String);
        assert!(node.is_required());
        match node.deserialize(None).unwrap_err() {
            SchemakerError::Invalid(err) => {
                assert_eq!(err.key.as_deref(), Some("name"));
                assert_eq!(err.messages, vec!["Required"]);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(node.deserialize(Some("")).is_err());
    }

    #[test]
    fn test_node_missing_value() {
        let node = SchemaNode::new("qty", SchemaType::Integer).missing(Value::Int(1));
        assert_eq!(node.deserialize(None).unwrap(), Value::Int(1));
    }

    #[test]
    fn test_node_runs_validator() {
        let node =
            SchemaNode::new("code", SchemaType::String).validator(Validator::max_length(3));
        assert!(node.deserialize(Some("abc")).is_ok());
        assert!(node.deserialize(Some("abcd")).is_err());
    }

    #[test]
    fn test_node_bind() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let node = SchemaNode::new("scheduled", SchemaType::DateTime)
            .missing(MissingPolicy::Null)
            .validator(from_now_on());
        assert!(matches!(
            node.deserialize(Some("2024-06-01T00:00")),
            Err(SchemakerError::Unbound(_))
        ));

        let bound = node.bind(&BindContext::new().with("now", now)).unwrap();
        assert!(bound.deserialize(Some("2024-06-01T00:00")).is_ok());
        assert!(bound.deserialize(Some("2023-06-01T00:00")).is_err());
        assert_eq!(bound.deserialize(None).unwrap(), Value::Null);
    }

    #[test]
    fn test_new_derives_title() {
        assert_eq!(SchemaNode::new("first_name", SchemaType::String).title, "First name");
    }
}
