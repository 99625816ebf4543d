//! Helpers for building schema nodes by hand.
//!
//! [`lengthen`] produces a sized text input and a matching length validator
//! for a field, from either a plain maximum or the column it is stored in.

use schemaker_core::{InputSizing, SchemakerError, SchemakerResult, SETTINGS};

use crate::column::ColumnDescriptor;
use crate::validators::Validator;
use crate::widgets::{TextInput, Widget};

/// Where the maximum length comes from.
#[derive(Debug, Clone, Copy)]
pub enum MaxLength<'a> {
    /// A number of characters.
    Chars(usize),
    /// The length declared on a column.
    Column(&'a ColumnDescriptor),
}

impl From<usize> for MaxLength<'_> {
    fn from(max: usize) -> Self {
        Self::Chars(max)
    }
}

impl<'a> From<&'a ColumnDescriptor> for MaxLength<'a> {
    fn from(column: &'a ColumnDescriptor) -> Self {
        Self::Column(column)
    }
}

impl MaxLength<'_> {
    fn resolve(self) -> SchemakerResult<usize> {
        match self {
            Self::Chars(max) => Ok(max),
            Self::Column(column) => column.length.ok_or_else(|| {
                SchemakerError::ImproperlyConfigured(format!(
                    "column '{}' has no length to derive a maximum from",
                    column.key
                ))
            }),
        }
    }
}

/// The widget and validator returned by [`Lengthen::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct Lengthened {
    /// A text input sized for the maximum length.
    pub widget: Widget,
    /// The length bound, combined with any extra validators.
    pub validator: Validator,
}

/// Builder for [`lengthen`] with the optional parameters.
///
/// # Examples
///
/// ```
/// use schemaker_forms::column::{ColumnDescriptor, SqlType};
/// use schemaker_forms::helpers::Lengthen;
/// use schemaker_forms::validators::Validator;
///
/// let name = ColumnDescriptor::new("name", SqlType::Unicode).length(80);
/// let built = Lengthen::new(&name).min(2).placeholder("Jane Doe").build().unwrap();
/// assert_eq!(built.validator, Validator::LengthBound { min: 2, max: Some(80) });
/// ```
#[derive(Debug, Clone)]
pub struct Lengthen<'a> {
    max: MaxLength<'a>,
    min: usize,
    size: Option<usize>,
    input_type: String,
    placeholder: Option<String>,
    validators: Vec<Validator>,
    sizing: Option<InputSizing>,
}

impl<'a> Lengthen<'a> {
    /// Starts a builder for the given maximum.
    pub fn new(max: impl Into<MaxLength<'a>>) -> Self {
        Self {
            max: max.into(),
            min: 0,
            size: None,
            input_type: "text".to_string(),
            placeholder: None,
            validators: Vec::new(),
            sizing: None,
        }
    }

    /// Sets the minimum length.
    #[must_use]
    pub const fn min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    /// Sets the input size instead of computing it. A size of 0 keeps the
    /// computed size.
    #[must_use]
    pub const fn size(mut self, size: usize) -> Self {
        self.size = if size == 0 { None } else { Some(size) };
        self
    }

    /// Sets the HTML input type.
    #[must_use]
    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Adds a validator run after the length bound.
    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Uses an explicit sizing rule instead of the configured one.
    #[must_use]
    pub const fn sizing(mut self, sizing: InputSizing) -> Self {
        self.sizing = Some(sizing);
        self
    }

    /// Builds the widget and validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemakerError::ImproperlyConfigured`] when the maximum is
    /// taken from a column that declares no length.
    pub fn build(self) -> SchemakerResult<Lengthened> {
        let max = self.max.resolve()?;
        let sizing = self.sizing.unwrap_or_else(|| SETTINGS.current().sizing);

        let widget = Widget::TextInput(TextInput {
            size: Some(sizing.size_for(max, self.size)),
            max_length: Some(max),
            input_type: self.input_type,
            mask: None,
            placeholder: self.placeholder,
        });

        let bound = Validator::LengthBound {
            min: self.min,
            max: Some(max),
        };
        let validator = if self.validators.is_empty() {
            bound
        } else {
            let mut all = Vec::with_capacity(self.validators.len() + 1);
            all.push(bound);
            all.extend(self.validators);
            Validator::CompiledAll(all)
        };

        Ok(Lengthened { widget, validator })
    }
}

/// Builds a sized text input and a length bound for `max`, with default
/// minimum (0), input type (`text`) and no placeholder.
///
/// # Errors
///
/// See [`Lengthen::build`].
///
/// # Examples
///
/// ```
/// use schemaker_forms::helpers::lengthen;
/// use schemaker_forms::widgets::Widget;
///
/// let built = lengthen(99_usize).unwrap();
/// match built.widget {
///     Widget::TextInput(input) => assert_eq!(input.size, Some(51)),
///     _ => unreachable!(),
/// }
/// ```
pub fn lengthen<'a>(max: impl Into<MaxLength<'a>>) -> SchemakerResult<Lengthened> {
    Lengthen::new(max).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::SqlType;

    fn input(built: &Lengthened) -> &TextInput {
        match &built.widget {
            Widget::TextInput(input) => input,
            other => panic!("unexpected widget {other:?}"),
        }
    }

    #[test]
    fn test_lengthen_sizes() {
        for (max, size) in [(10_usize, 10), (35, 35), (36, 35), (99, 51), (1000, 60)] {
            let built = lengthen(max).unwrap();
            assert_eq!(input(&built).size, Some(size), "max {max}");
            assert_eq!(input(&built).max_length, Some(max));
        }
    }

    #[test]
    fn test_lengthen_validator() {
        let built = lengthen(40_usize).unwrap();
        assert_eq!(built.validator, Validator::max_length(40));
    }

    #[test]
    fn test_explicit_size_is_clamped() {
        let built = Lengthen::new(20_usize).size(8).build().unwrap();
        assert_eq!(input(&built).size, Some(8));
        let built = Lengthen::new(20_usize).size(80).build().unwrap();
        assert_eq!(input(&built).size, Some(60));
    }

    #[test]
    fn test_zero_size_falls_back_to_computed() {
        let built = Lengthen::new(99_usize).size(0).build().unwrap();
        assert_eq!(input(&built).size, Some(51));
    }

    #[test]
    fn test_extra_validators_follow_bound() {
        let built = Lengthen::new(30_usize)
            .min(1)
            .validator(Validator::RegexCompiles)
            .build()
            .unwrap();
        assert_eq!(
            built.validator,
            Validator::CompiledAll(vec![
                Validator::LengthBound { min: 1, max: Some(30) },
                Validator::RegexCompiles,
            ])
        );
    }

    #[test]
    fn test_input_type_and_placeholder() {
        let built = Lengthen::new(64_usize)
            .input_type("email")
            .placeholder("you@example.com")
            .build()
            .unwrap();
        assert_eq!(input(&built).input_type, "email");
        assert_eq!(input(&built).placeholder.as_deref(), Some("you@example.com"));
    }

    #[test]
    fn test_from_column() {
        let col = ColumnDescriptor::new("city", SqlType::Unicode).length(50);
        let built = lengthen(&col).unwrap();
        assert_eq!(input(&built).max_length, Some(50));
        assert_eq!(input(&built).size, Some(38));
    }

    #[test]
    fn test_column_without_length() {
        let col = ColumnDescriptor::new("notes", SqlType::String);
        assert!(matches!(
            lengthen(&col),
            Err(SchemakerError::ImproperlyConfigured(msg)) if msg.contains("notes")
        ));
    }

    #[test]
    fn test_custom_sizing() {
        let sizing = InputSizing {
            breakpoint: 10,
            divisor: 1,
            max_size: 15,
        };
        let built = Lengthen::new(12_usize).sizing(sizing).build().unwrap();
        assert_eq!(input(&built).size, Some(12));
    }
}
