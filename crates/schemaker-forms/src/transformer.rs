//! Column-to-schema transformation.
//!
//! [`ColumnSchemaTransformer`] turns a [`ColumnDescriptor`] plus call-time
//! [`Options`] into a [`SchemaNode`]. The mapping from SQL types to schema
//! types and the widget strategies are public maps, so callers can replace
//! or extend them after construction.
//!
//! Options are resolved in a fixed order (type, name, title, description,
//! default, missing, validator, widget). Each step takes the options it
//! uses from a working copy of the merged options.

use std::collections::HashMap;
use std::sync::Arc;

use schemaker_core::logging::model_span;
use schemaker_core::utils::text::humanize_key;
use schemaker_core::{InputSizing, SchemakerError, SchemakerResult, Value, SETTINGS};

use crate::column::{ColumnDefault, ColumnDescriptor, SqlType};
use crate::options::{keys, Options};
use crate::schema::{MissingPolicy, SchemaNode, SchemaType};
use crate::validators::{collapse, Validator};
use crate::widgets::{TextInput, Widget};

/// Maps a column to its schema type and initial validators.
pub type TypeMapper = Arc<dyn Fn(&ColumnDescriptor) -> (SchemaType, Vec<Validator>) + Send + Sync>;

/// Builds a widget for a column, taking the options it consumes.
pub type WidgetStrategy = Arc<dyn Fn(&ColumnDescriptor, &mut Options) -> Widget + Send + Sync>;

/// Builds schema nodes from column metadata.
///
/// # Examples
///
/// ```
/// use schemaker_forms::column::{ColumnDescriptor, SqlType};
/// use schemaker_forms::options::Options;
/// use schemaker_forms::transformer::ColumnSchemaTransformer;
/// use schemaker_forms::widgets::Widget;
///
/// let transformer = ColumnSchemaTransformer::new();
/// let col = ColumnDescriptor::new("full_name", SqlType::Unicode).length(99).not_null();
/// let node = transformer.transform(&col, &Options::new()).unwrap();
///
/// assert_eq!(node.title, "Full name");
/// assert!(node.is_required());
/// match node.widget {
///     Some(Widget::TextInput(input)) => assert_eq!(input.size, Some(51)),
///     other => panic!("unexpected widget {other:?}"),
/// }
/// ```
#[derive(Clone)]
pub struct ColumnSchemaTransformer {
    /// SQL type to schema type (and initial validators).
    pub type_map: HashMap<SqlType, TypeMapper>,
    /// SQL type to widget strategy.
    pub widget_strategies: HashMap<SqlType, WidgetStrategy>,
    sizing: InputSizing,
}

impl Default for ColumnSchemaTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ColumnSchemaTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut mapped: Vec<String> = self.type_map.keys().map(ToString::to_string).collect();
        mapped.sort();
        let mut widgets: Vec<String> = self
            .widget_strategies
            .keys()
            .map(ToString::to_string)
            .collect();
        widgets.sort();
        f.debug_struct("ColumnSchemaTransformer")
            .field("type_map", &mapped)
            .field("widget_strategies", &widgets)
            .field("sizing", &self.sizing)
            .finish()
    }
}

impl ColumnSchemaTransformer {
    /// Creates a transformer with the default maps.
    ///
    /// Input sizing comes from the process-wide settings.
    pub fn new() -> Self {
        Self::with_sizing(SETTINGS.current().sizing)
    }

    /// Creates a transformer with the default maps and explicit input sizing.
    pub fn with_sizing(sizing: InputSizing) -> Self {
        Self {
            type_map: default_type_map(),
            widget_strategies: default_widget_strategies(sizing),
            sizing,
        }
    }

    /// Returns the input sizing rule.
    pub const fn sizing(&self) -> InputSizing {
        self.sizing
    }

    /// Builds the schema node for one column.
    ///
    /// `overrides` take precedence over the options declared on the column.
    ///
    /// # Errors
    ///
    /// Returns [`SchemakerError::UnsupportedColumnType`] when the column's SQL
    /// type has no entry in the type map and no `typ` option is given.
    pub fn transform(
        &self,
        column: &ColumnDescriptor,
        overrides: &Options,
    ) -> SchemakerResult<SchemaNode> {
        let mut opts = Options::merged(&column.info, overrides);

        let (schema_type, validators) = self.resolve_type(column, &mut opts)?;
        let name = non_empty(opts.take_text(keys::NAME)).unwrap_or_else(|| column.key.clone());
        let title = non_empty(opts.take_text(keys::TITLE)).unwrap_or_else(|| self.label(column));
        let description = opts.take_text(keys::DESCRIPTION);
        let default = self.resolve_default(column, &mut opts);
        let missing = self.resolve_missing(column, &mut opts);
        let validator = self.resolve_validator(column, &mut opts, validators);
        let widget = self.resolve_widget(column, &mut opts);

        tracing::debug!(
            column = %column.key,
            sql_type = %column.sql_type,
            schema_type = %schema_type,
            required = matches!(missing, MissingPolicy::Required),
            widget = widget.as_ref().map(Widget::template),
            "built schema node"
        );

        Ok(SchemaNode {
            name,
            title,
            description,
            schema_type,
            validator,
            default,
            missing,
            widget,
        })
    }

    /// Builds the schema nodes for every column of a model, in order.
    ///
    /// `overrides` holds call-time options keyed by column key; columns
    /// without an entry use only their declared options.
    ///
    /// # Errors
    ///
    /// Fails on the first column whose type is unsupported.
    pub fn transform_all(
        &self,
        model: &str,
        columns: &[ColumnDescriptor],
        overrides: &HashMap<String, Options>,
    ) -> SchemakerResult<Vec<SchemaNode>> {
        let span = model_span(model);
        let _guard = span.enter();
        let empty = Options::new();
        columns
            .iter()
            .map(|col| self.transform(col, overrides.get(&col.key).unwrap_or(&empty)))
            .collect()
    }

    /// Resolves the schema type and the initial validators.
    ///
    /// An explicit `typ` option wins and takes its validators from the
    /// `validators` option; otherwise the type map is consulted.
    ///
    /// # Errors
    ///
    /// Returns [`SchemakerError::UnsupportedColumnType`] when neither applies.
    pub fn resolve_type(
        &self,
        column: &ColumnDescriptor,
        opts: &mut Options,
    ) -> SchemakerResult<(SchemaType, Vec<Validator>)> {
        if let Some(schema_type) = opts.take_type(keys::TYP) {
            let validators = opts.take_validators(keys::VALIDATORS).unwrap_or_default();
            return Ok((schema_type, validators));
        }
        match self.type_map.get(&column.sql_type) {
            Some(mapper) => Ok(mapper(column)),
            None => {
                tracing::warn!(
                    column = %column.key,
                    sql_type = %column.sql_type,
                    "no schema type registered for column"
                );
                Err(SchemakerError::UnsupportedColumnType {
                    column: column.key.clone(),
                    sql_type: column.sql_type.to_string(),
                })
            }
        }
    }

    /// Derives a label from the column key: `first_name` becomes `First name`.
    pub fn label(&self, column: &ColumnDescriptor) -> String {
        humanize_key(&column.key)
    }

    /// Resolves the value shown when the form is first rendered.
    pub fn resolve_default(&self, column: &ColumnDescriptor, opts: &mut Options) -> Value {
        if let Some(value) = opts.take_value(keys::DEFAULT) {
            return value;
        }
        if column.is_autoincrement_integer_pk() {
            return Value::Null;
        }
        column
            .default
            .as_ref()
            .map_or(Value::Null, ColumnDefault::evaluate)
    }

    /// Resolves what an absent input yields.
    ///
    /// Non-nullable columns are required, except autoincrementing integer
    /// primary keys, which the database fills in.
    pub fn resolve_missing(&self, column: &ColumnDescriptor, opts: &mut Options) -> MissingPolicy {
        if let Some(policy) = opts.take_missing(keys::MISSING) {
            return policy;
        }
        if column.is_autoincrement_integer_pk() {
            return MissingPolicy::Null;
        }
        if !column.nullable {
            return MissingPolicy::Required;
        }
        column
            .default
            .as_ref()
            .map_or(MissingPolicy::Null, |d| MissingPolicy::from(d.evaluate()))
    }

    /// Adds the implicit length bound and any extra validators, then
    /// collapses the list.
    ///
    /// `maxlength` is read, not taken; the text widget strategy consumes it.
    pub fn resolve_validator(
        &self,
        column: &ColumnDescriptor,
        opts: &mut Options,
        mut validators: Vec<Validator>,
    ) -> Option<Validator> {
        if let Some(max) = opts.get_size(keys::MAXLENGTH).or(column.length) {
            validators.push(Validator::max_length(max));
        }
        if let Some(more) = opts.take_validators(keys::VALIDATORS) {
            validators.extend(more);
        }
        collapse(validators)
    }

    /// Resolves the widget: an explicit `widget` option, else the strategy
    /// registered for the column's SQL type, else none.
    pub fn resolve_widget(&self, column: &ColumnDescriptor, opts: &mut Options) -> Option<Widget> {
        if let Some(widget) = opts.take_widget(keys::WIDGET) {
            return Some(widget);
        }
        self.widget_strategies
            .get(&column.sql_type)
            .map(|strategy| strategy(column, opts))
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|s| !s.is_empty())
}

/// The built-in SQL type mapping.
pub fn default_type_map() -> HashMap<SqlType, TypeMapper> {
    fn plain(schema_type: SchemaType) -> TypeMapper {
        Arc::new(move |_: &ColumnDescriptor| (schema_type, Vec::new()))
    }

    let mut map: HashMap<SqlType, TypeMapper> = HashMap::new();
    map.insert(SqlType::Boolean, plain(SchemaType::Boolean));
    map.insert(SqlType::Date, plain(SchemaType::Date));
    map.insert(SqlType::DateTime, plain(SchemaType::DateTime));
    map.insert(SqlType::Time, plain(SchemaType::Time));
    map.insert(SqlType::Decimal, plain(SchemaType::Decimal));
    map.insert(SqlType::Numeric, plain(SchemaType::Decimal));
    map.insert(SqlType::Float, plain(SchemaType::Float));
    map.insert(SqlType::Integer, plain(SchemaType::Integer));
    map.insert(SqlType::String, plain(SchemaType::String));
    map.insert(SqlType::Unicode, plain(SchemaType::String));
    map.insert(
        SqlType::Enum,
        Arc::new(|col: &ColumnDescriptor| {
            (
                SchemaType::String,
                vec![Validator::OneOf(col.enum_values.clone())],
            )
        }),
    );
    map
}

/// The built-in widget strategies: sized text inputs for string columns,
/// radio buttons for enums.
pub fn default_widget_strategies(sizing: InputSizing) -> HashMap<SqlType, WidgetStrategy> {
    let text: WidgetStrategy = Arc::new(move |col: &ColumnDescriptor, opts: &mut Options| {
        string_widget(sizing, col, opts)
    });
    let mut map: HashMap<SqlType, WidgetStrategy> = HashMap::new();
    map.insert(SqlType::String, Arc::clone(&text));
    map.insert(SqlType::Unicode, text);
    map.insert(SqlType::Enum, Arc::new(enum_widget));
    map
}

/// A text input sized from the maximum length.
///
/// Takes `maxlength`, `size`, `input_type`, `mask` and `placeholder`.
pub fn string_widget(sizing: InputSizing, column: &ColumnDescriptor, opts: &mut Options) -> Widget {
    let max_length = opts.take_size(keys::MAXLENGTH).or(column.length);
    let size = opts.take_size(keys::SIZE);
    let size = match max_length {
        Some(max) => Some(sizing.size_for(max, size)),
        None => size.map(|s| s.min(sizing.max_size)),
    };
    Widget::TextInput(TextInput {
        size,
        max_length,
        input_type: opts
            .take_text(keys::INPUT_TYPE)
            .unwrap_or_else(|| "text".to_string()),
        mask: opts.take_text(keys::MASK),
        placeholder: opts.take_text(keys::PLACEHOLDER),
    })
}

/// Radio buttons over the enum values, labelled in title case.
pub fn enum_widget(column: &ColumnDescriptor, _opts: &mut Options) -> Widget {
    Widget::radio_from_values(&column.enum_values)
}
