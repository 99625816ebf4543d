//! Core error types for schemaker.
//!
//! [`SchemakerError`] is the single error enum used across the workspace.
//! [`Invalid`] is the validation failure tree: one node per schema node that
//! failed, with child failures nested below their parent.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A validation failure for one schema node, possibly carrying child failures.
///
/// A leaf `Invalid` usually carries one or more messages. A parent may carry
/// messages of its own (for cross-field failures) as well as children.
///
/// # Examples
///
/// ```
/// use schemaker_core::error::Invalid;
///
/// let err = Invalid::new("email", "Invalid email address.");
/// assert_eq!(err.key.as_deref(), Some("email"));
///
/// let parent = Invalid::node("contact").with_child(err);
/// assert_eq!(parent.paths().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invalid {
    /// The key of the node that failed. `None` for an anonymous root.
    pub key: Option<String>,
    /// Messages attached to this node.
    pub messages: Vec<String>,
    /// Parameters interpolated into the messages (e.g. `min`, `max`).
    pub params: HashMap<String, String>,
    /// Failures of child nodes.
    pub children: Vec<Self>,
}

impl Invalid {
    /// Creates a failure for `key` with a single message.
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            messages: vec![message.into()],
            ..Self::default()
        }
    }

    /// Creates a failure for `key` without messages, to hold children.
    pub fn node(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Adds a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Adds a child failure.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Returns every path from this node down to a leaf.
    ///
    /// A node without children is a path of length one.
    pub fn paths(&self) -> Vec<Vec<&Self>> {
        if self.children.is_empty() {
            return vec![vec![self]];
        }
        self.children
            .iter()
            .flat_map(Self::paths)
            .map(|tail| {
                let mut path = Vec::with_capacity(tail.len() + 1);
                path.push(self);
                path.extend(tail);
                path
            })
            .collect()
    }
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for message in &self.messages {
            if !first {
                write!(f, "; ")?;
            }
            match &self.key {
                Some(key) => write!(f, "{key}: {message}")?,
                None => write!(f, "{message}")?,
            }
            first = false;
        }
        for child in &self.children {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{child}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for Invalid {}

/// The error type for schemaker.
#[derive(Error, Debug)]
pub enum SchemakerError {
    // ── Schema construction ──────────────────────────────────────────

    /// No schema type was supplied and the column's SQL type has no mapping.
    #[error("Unknown type for column '{column}': {sql_type}")]
    UnsupportedColumnType {
        /// The column key.
        column: String,
        /// The SQL type name that could not be mapped.
        sql_type: String,
    },

    /// A helper was called with arguments it cannot work with.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── Validation ───────────────────────────────────────────────────

    /// A value failed validation.
    #[error("Invalid: {0}")]
    Invalid(Invalid),

    /// A deferred validator was used before the schema was bound.
    #[error("Deferred validator '{0}' used before binding")]
    Unbound(String),

    /// The bind context lacks a key a deferred validator needs.
    #[error("Missing binding: {0}")]
    MissingBinding(String),

    // ── Configuration ────────────────────────────────────────────────

    /// Settings could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<Invalid> for SchemakerError {
    fn from(invalid: Invalid) -> Self {
        Self::Invalid(invalid)
    }
}

/// A convenience type alias for `Result<T, SchemakerError>`.
pub type SchemakerResult<T> = Result<T, SchemakerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display_simple() {
        let err = Invalid::new("name", "Required");
        assert_eq!(err.to_string(), "name: Required");
    }

    #[test]
    fn test_invalid_display_nested() {
        let err = Invalid::node("contact")
            .with_child(Invalid::new("email", "Invalid email."))
            .with_child(Invalid::new("age", "Too small."));
        let rendered = err.to_string();
        assert!(rendered.contains("email: Invalid email."));
        assert!(rendered.contains("age: Too small."));
    }

    #[test]
    fn test_invalid_with_param() {
        let err = Invalid::new("name", "Too short.").with_param("min", "8");
        assert_eq!(err.params.get("min").unwrap(), "8");
    }

    #[test]
    fn test_paths_leaf() {
        let err = Invalid::new("name", "Required");
        let paths = err.paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 1);
    }

    #[test]
    fn test_paths_nested() {
        let err = Invalid::node("form")
            .with_child(Invalid::node("address").with_child(Invalid::new("zip", "Bad zip")))
            .with_child(Invalid::new("name", "Required"));
        let paths = err.paths();
        assert_eq!(paths.len(), 2);
        let keys: Vec<Vec<&str>> = paths
            .iter()
            .map(|p| p.iter().filter_map(|i| i.key.as_deref()).collect())
            .collect();
        assert_eq!(keys[0], vec!["form", "address", "zip"]);
        assert_eq!(keys[1], vec!["form", "name"]);
    }

    #[test]
    fn test_unsupported_column_type_display() {
        let err = SchemakerError::UnsupportedColumnType {
            column: "geom".into(),
            sql_type: "Geometry".into(),
        };
        assert_eq!(err.to_string(), "Unknown type for column 'geom': Geometry");
    }

    #[test]
    fn test_invalid_conversion() {
        let err: SchemakerError = Invalid::new("x", "bad").into();
        assert!(matches!(err, SchemakerError::Invalid(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SchemakerError = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }
}
