//! Values carried by schema nodes: defaults, missing fallbacks, deserialized
//! input and validator bounds.
//!
//! [`Value::Null`] doubles as the "no value" sentinel: a node whose default
//! resolves to `Null` has no default, and a missing policy of `Null` means
//! absent input deserializes to `Null`.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A schema-level value.
///
/// Serialized adjacently tagged, e.g. `{"kind": "Int", "data": 7}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Value {
    /// No value.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Fixed-point decimal; the scale is kept, so `12.50` displays as such.
    Decimal(Decimal),
    /// Text.
    String(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Local date and time.
    DateTime(NaiveDateTime),
    /// Local time of day.
    Time(NaiveTime),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Date(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{v}"),
            Self::Time(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                #[allow(clippy::useless_conversion)]
                fn from(v: $source) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i32 => Int,
    i64 => Int,
    u32 => Int,
    f64 => Float,
    Decimal => Decimal,
    String => String,
    &str => String,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    NaiveTime => Time,
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Orders two values of compatible kinds.
    ///
    /// Integers, floats and decimals compare numerically with each other;
    /// dates, datetimes, times and strings compare only with their own kind.
    /// Returns `None` for incompatible kinds.
    ///
    /// Integer and decimal pairs compare exactly. Only a comparison that
    /// involves a float goes through `f64`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Decimal(a), Self::Decimal(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Decimal(b)) => Some(Decimal::from(*a).cmp(b)),
            (Self::Decimal(a), Self::Int(b)) => Some(a.cmp(&Decimal::from(*b))),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            (Self::Time(a), Self::Time(b)) => Some(a.cmp(b)),
            _ => self.numeric()?.partial_cmp(&other.numeric()?),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn numeric(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Decimal(v) => v.to_f64(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Value {
        Value::Decimal(Decimal::from_str(s).unwrap())
    }

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(7_i32), Value::Int(7));
        assert_eq!(Value::from(7_u32), Value::Int(7));
        assert_eq!(Value::from("x"), Value::String("x".into()));
        assert_eq!(Value::from(noon(2024, 1, 15)), Value::DateTime(noon(2024, 1, 15)));
        assert_eq!(Value::from(Some(false)), Value::Bool(false));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_display_matches_submitted_form() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Float(10.5).to_string(), "10.5");
        assert_eq!(dec("1.50").to_string(), "1.50");
        assert_eq!(Value::from(noon(2024, 1, 2)).to_string(), "2024-01-02 12:00:00");
        assert_eq!(
            Value::from(NaiveTime::from_hms_opt(8, 5, 0).unwrap()).to_string(),
            "08:05:00"
        );
    }

    #[test]
    fn test_numeric_kinds_compare_with_each_other() {
        assert_eq!(Value::Int(2).compare(&Value::Float(2.5)), Some(Ordering::Less));
        assert_eq!(
            dec("10.0").compare(&Value::Int(3)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            dec("3").compare(&dec("3.00")),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_decimal_compare_is_exact() {
        assert_eq!(
            dec("12345678901234567891").compare(&dec("12345678901234567890")),
            Some(Ordering::Greater)
        );
        assert_eq!(
            dec("0.3").compare(&dec("0.30000000000000001")),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::Int(9_007_199_254_740_993).compare(&dec("9007199254740992.5")),
            Some(Ordering::Greater)
        );
        assert_eq!(dec("2.5").compare(&Value::Float(2.25)), Some(Ordering::Greater));
    }

    #[test]
    fn test_decimal_serde_keeps_scale() {
        let json = serde_json::to_value(dec("12.50")).unwrap();
        let back: Value = serde_json::from_value(json).unwrap();
        assert_eq!(back.to_string(), "12.50");
    }

    #[test]
    fn test_temporal_compare() {
        assert_eq!(
            Value::from(noon(2024, 1, 1)).compare(&Value::from(noon(2024, 6, 1))),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_incompatible_kinds_do_not_compare() {
        assert_eq!(Value::from("a").compare(&Value::Int(1)), None);
        assert_eq!(Value::Null.compare(&Value::Null), None);
        assert_eq!(
            Value::from(noon(2024, 1, 1)).compare(&Value::from(noon(2024, 1, 1).date())),
            None
        );
    }

    #[test]
    fn test_serde_adjacent_tag() {
        let json = serde_json::to_value(Value::Int(7)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "Int", "data": 7}));
        let back: Value = serde_json::from_value(json).unwrap();
        assert_eq!(back, Value::Int(7));
    }
}
