//! Column metadata read from a relational model.
//!
//! A [`ColumnDescriptor`] is what the ORM layer hands over for one mapped
//! column. It is read-only input to the
//! [`ColumnSchemaTransformer`](crate::transformer::ColumnSchemaTransformer).

use std::fmt;
use std::sync::Arc;

use schemaker_core::Value;

use crate::options::{OptionValue, Options};

/// The SQL type of a column.
///
/// `Unknown` carries the name of a type outside the built-in set; a
/// transformer can still handle it if a mapping is registered for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// `BOOLEAN`.
    Boolean,
    /// `DATE`.
    Date,
    /// `TIMESTAMP`.
    DateTime,
    /// `TIME`.
    Time,
    /// `DECIMAL`.
    Decimal,
    /// `NUMERIC`.
    Numeric,
    /// `FLOAT` / `DOUBLE PRECISION`.
    Float,
    /// `INTEGER`.
    Integer,
    /// `VARCHAR`.
    String,
    /// `NVARCHAR`.
    Unicode,
    /// `ENUM`.
    Enum,
    /// Any other type, by name.
    Unknown(String),
}

impl SqlType {
    /// Returns `true` for integer types.
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer)
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "Boolean",
            Self::Date => "Date",
            Self::DateTime => "DateTime",
            Self::Time => "Time",
            Self::Decimal => "Decimal",
            Self::Numeric => "Numeric",
            Self::Float => "Float",
            Self::Integer => "Integer",
            Self::String => "String",
            Self::Unicode => "Unicode",
            Self::Enum => "Enum",
            Self::Unknown(name) => name,
        };
        write!(f, "{name}")
    }
}

/// A column's default: a literal, or a producer invoked each time a default
/// is needed.
#[derive(Clone)]
pub enum ColumnDefault {
    /// A fixed value.
    Literal(Value),
    /// A zero-argument function (e.g. "now").
    Producer(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl ColumnDefault {
    /// Returns the literal, or invokes the producer.
    pub fn evaluate(&self) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Producer(produce) => produce(),
        }
    }
}

impl fmt::Debug for ColumnDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Producer(_) => f.write_str("Producer(<fn>)"),
        }
    }
}

/// Metadata of one mapped column.
///
/// Columns are nullable by default, like in most ORMs; primary keys are not.
///
/// # Examples
///
/// ```
/// use schemaker_forms::column::{ColumnDescriptor, SqlType};
///
/// let col = ColumnDescriptor::new("email", SqlType::Unicode)
///     .length(120)
///     .not_null()
///     .info("placeholder", "you@example.com");
/// assert_eq!(col.length, Some(120));
/// assert!(!col.nullable);
/// ```
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    /// The mapped attribute name.
    pub key: String,
    /// The SQL type.
    pub sql_type: SqlType,
    /// Maximum length for bounded string types.
    pub length: Option<usize>,
    /// Allowed values for `Enum` columns, in declaration order.
    pub enum_values: Vec<String>,
    /// Whether NULL is allowed.
    pub nullable: bool,
    /// Whether this is an autoincrementing primary key.
    pub autoincrement_primary_key: bool,
    /// Column default.
    pub default: Option<ColumnDefault>,
    /// Schema options declared on the model column.
    pub info: Options,
}

impl ColumnDescriptor {
    /// Creates a nullable column without length, default or options.
    pub fn new(key: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            key: key.into(),
            sql_type,
            length: None,
            enum_values: Vec::new(),
            nullable: true,
            autoincrement_primary_key: false,
            default: None,
            info: Options::new(),
        }
    }

    /// Creates an `Enum` column with the given allowed values.
    pub fn enumeration<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut col = Self::new(key, SqlType::Enum);
        col.enum_values = values.into_iter().map(Into::into).collect();
        col
    }

    /// Sets the maximum length.
    #[must_use]
    pub const fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Disallows NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as an autoincrementing primary key (implies NOT NULL).
    #[must_use]
    pub const fn autoincrement_primary_key(mut self) -> Self {
        self.autoincrement_primary_key = true;
        self.nullable = false;
        self
    }

    /// Sets a literal default.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(ColumnDefault::Literal(value.into()));
        self
    }

    /// Sets a producer default.
    #[must_use]
    pub fn default_with(mut self, produce: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(ColumnDefault::Producer(Arc::new(produce)));
        self
    }

    /// Declares a schema option on the column.
    #[must_use]
    pub fn info(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.info.insert(key, value);
        self
    }

    /// Returns `true` for autoincrementing integer primary keys, which never
    /// get a computed default and are never required.
    pub const fn is_autoincrement_integer_pk(&self) -> bool {
        self.autoincrement_primary_key && self.sql_type.is_integer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let col = ColumnDescriptor::new("bio", SqlType::String);
        assert_eq!(col.key, "bio");
        assert!(col.nullable);
        assert!(col.length.is_none());
        assert!(col.default.is_none());
        assert!(col.info.is_empty());
        assert!(!col.autoincrement_primary_key);
    }

    #[test]
    fn test_enumeration() {
        let col = ColumnDescriptor::enumeration("color", ["red", "green"]);
        assert_eq!(col.sql_type, SqlType::Enum);
        assert_eq!(col.enum_values, vec!["red", "green"]);
    }

    #[test]
    fn test_autoincrement_pk() {
        let col = ColumnDescriptor::new("id", SqlType::Integer).autoincrement_primary_key();
        assert!(!col.nullable);
        assert!(col.is_autoincrement_integer_pk());

        let col = ColumnDescriptor::new("code", SqlType::String).autoincrement_primary_key();
        assert!(!col.is_autoincrement_integer_pk());
    }

    #[test]
    fn test_default_evaluate() {
        let literal = ColumnDescriptor::new("n", SqlType::Integer).default(5);
        assert_eq!(literal.default.unwrap().evaluate(), Value::Int(5));

        let produced = ColumnDescriptor::new("n", SqlType::Integer).default_with(|| Value::Int(7));
        assert_eq!(produced.default.unwrap().evaluate(), Value::Int(7));
    }

    #[test]
    fn test_default_debug() {
        let col = ColumnDescriptor::new("n", SqlType::Integer).default_with(|| Value::Null);
        assert!(format!("{col:?}").contains("Producer(<fn>)"));
    }

    #[test]
    fn test_sql_type_display() {
        assert_eq!(SqlType::Unicode.to_string(), "Unicode");
        assert_eq!(SqlType::Unknown("Geometry".into()).to_string(), "Geometry");
    }
}
