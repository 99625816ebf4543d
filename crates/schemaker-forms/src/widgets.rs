//! Widget descriptors.
//!
//! A [`Widget`] tells the rendering layer which template to use for a field
//! and with which parameters. Rendering itself happens elsewhere; these
//! types only describe the input.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Enumerates the widget kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WidgetType {
    /// `<input type="...">` with size and maxlength.
    TextInput,
    /// A set of `<input type="radio">` elements.
    RadioChoice,
    /// A text input enhanced into a tag editor.
    Tags,
    /// A widget supplied by the caller.
    Custom,
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "TextInput",
            Self::RadioChoice => "RadioChoice",
            Self::Tags => "Tags",
            Self::Custom => "Custom",
        };
        write!(f, "{name}")
    }
}

/// A single-line text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextInput {
    /// Visible width in characters.
    pub size: Option<usize>,
    /// Maximum number of characters accepted.
    pub max_length: Option<usize>,
    /// The HTML input type (`text`, `email`, `password`, ...).
    pub input_type: String,
    /// Input mask, e.g. `999-9999`.
    pub mask: Option<String>,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for TextInput {
    fn default() -> Self {
        Self {
            size: None,
            max_length: None,
            input_type: "text".to_string(),
            mask: None,
            placeholder: None,
        }
    }
}

/// Radio buttons, one per `(value, label)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadioChoice {
    /// Choices as `(value, label)` pairs, in display order.
    pub values: Vec<(String, String)>,
}

/// A text input whose comma-separated content is edited as tags.
///
/// Rendered with the `xoxco_tags` template, which expects the
/// jQuery Tags Input plugin on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagsInput {
    /// The underlying text input.
    pub input: TextInput,
    /// Endpoint queried for tag suggestions.
    pub autocomplete_url: Option<String>,
    /// CSS height of the tag box.
    pub height: String,
    /// CSS width of the tag box.
    pub width: String,
}

impl TagsInput {
    /// Creates a tag editor with automatic height and width.
    pub fn new(autocomplete_url: Option<String>) -> Self {
        Self {
            input: TextInput::default(),
            autocomplete_url,
            height: "auto".to_string(),
            width: "auto".to_string(),
        }
    }
}

/// A widget supplied by the caller, identified by its template name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomWidget {
    /// Template used to render the widget.
    pub template: String,
    /// Template parameters.
    pub attrs: BTreeMap<String, String>,
}

impl CustomWidget {
    /// Creates a custom widget without parameters.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            attrs: BTreeMap::new(),
        }
    }

    /// Adds a template parameter.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }
}

/// A widget descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "widget")]
pub enum Widget {
    /// See [`TextInput`].
    TextInput(TextInput),
    /// See [`RadioChoice`].
    RadioChoice(RadioChoice),
    /// See [`TagsInput`].
    Tags(TagsInput),
    /// See [`CustomWidget`].
    Custom(CustomWidget),
}

impl Widget {
    /// Returns the widget kind.
    pub const fn widget_type(&self) -> WidgetType {
        match self {
            Self::TextInput(_) => WidgetType::TextInput,
            Self::RadioChoice(_) => WidgetType::RadioChoice,
            Self::Tags(_) => WidgetType::Tags,
            Self::Custom(_) => WidgetType::Custom,
        }
    }

    /// Returns the name of the template that renders this widget.
    pub fn template(&self) -> &str {
        match self {
            Self::TextInput(_) => "textinput",
            Self::RadioChoice(_) => "radio_choice",
            Self::Tags(_) => "xoxco_tags",
            Self::Custom(custom) => &custom.template,
        }
    }

    /// Builds radio choices whose labels are the title-cased values.
    ///
    /// # Examples
    ///
    /// ```
    /// use schemaker_forms::widgets::Widget;
    ///
    /// let w = Widget::radio_from_values(&["red".to_string(), "dark blue".to_string()]);
    /// match w {
    ///     Widget::RadioChoice(r) => assert_eq!(r.values[1].1, "Dark Blue"),
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn radio_from_values(values: &[String]) -> Self {
        Self::RadioChoice(RadioChoice {
            values: values
                .iter()
                .map(|v| (v.clone(), schemaker_core::utils::text::title_case(v)))
                .collect(),
        })
    }
}

impl From<TextInput> for Widget {
    fn from(w: TextInput) -> Self {
        Self::TextInput(w)
    }
}

impl From<TagsInput> for Widget {
    fn from(w: TagsInput) -> Self {
        Self::Tags(w)
    }
}

impl From<CustomWidget> for Widget {
    fn from(w: CustomWidget) -> Self {
        Self::Custom(w)
    }
}
