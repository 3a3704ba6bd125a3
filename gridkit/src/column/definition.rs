//! Column definitions.

use std::fmt;
use std::sync::Arc;

use crate::accessor::Accessor;
use crate::accessor::ValueFn;
use crate::error::FormatError;
use crate::format;
use crate::model::TypeTag;
use crate::model::Value;
use crate::options::FormatOptions;

/// Shared footer aggregation function.
pub(crate) type FooterFn<R> = Arc<dyn Fn(&[R]) -> Value + Send + Sync>;

/// A named cell attribute whose value is computed per record.
pub struct ColumnAttribute<R> {
    pub(crate) name: String,
    pub(crate) value: ValueFn<R>,
}

impl<R> ColumnAttribute<R> {
    /// Attribute name, e.g. `"class"` or `"data-id"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Computes the attribute value for a record.
    pub fn evaluate(&self, record: &R) -> Value {
        (self.value)(record)
    }
}

impl<R> Clone for ColumnAttribute<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            value: Arc::clone(&self.value),
        }
    }
}

impl<R> fmt::Debug for ColumnAttribute<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnAttribute")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Description of one column: how to extract, format and aggregate it.
///
/// Definitions are created and customised through
/// [`ColumnBuilder`](super::ColumnBuilder). Once the builder is finished they
/// are shared read-only; nothing outside this crate can change them.
pub struct ColumnDefinition<R> {
    pub(crate) key: String,
    pub(crate) declared_type: TypeTag,
    pub(crate) accessor: Accessor<R>,
    pub(crate) title: String,
    pub(crate) footer: Option<FooterFn<R>>,
    pub(crate) format: Option<String>,
    pub(crate) template: Option<String>,
    pub(crate) template_placeholder: String,
    pub(crate) is_header: bool,
    pub(crate) css_class: Option<String>,
    pub(crate) header_css_class: Option<String>,
    pub(crate) footer_css_class: Option<String>,
    pub(crate) true_text: String,
    pub(crate) false_text: String,
    pub(crate) attributes: Vec<ColumnAttribute<R>>,
    pub(crate) options: Arc<FormatOptions>,
}

impl<R> ColumnDefinition<R> {
    /// Creates a definition from an accessor.
    ///
    /// Key and declared type are fixed here. A property accessor also
    /// provides the initial title and format.
    pub(crate) fn new(accessor: Accessor<R>, options: Arc<FormatOptions>) -> Self {
        let (title, format) = match accessor.metadata() {
            Some(property) => (
                property.title().to_string(),
                property.display_format.map(str::to_string),
            ),
            None => (String::new(), None),
        };

        Self {
            key: accessor.key().to_string(),
            declared_type: accessor.type_tag(),
            title,
            format,
            footer: None,
            template: None,
            template_placeholder: options.template_placeholder.clone(),
            is_header: false,
            css_class: None,
            header_css_class: None,
            footer_css_class: None,
            true_text: options.true_text.clone(),
            false_text: options.false_text.clone(),
            attributes: Vec::new(),
            options,
            accessor,
        }
    }

    /// Stable identity: the property name, or empty for computed columns.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Title shown in the header.
    ///
    /// Computed columns without an explicit title fall back to their key.
    pub fn title(&self) -> &str {
        if self.title.is_empty() {
            &self.key
        } else {
            &self.title
        }
    }

    /// Declared type used by the row path.
    pub fn declared_type(&self) -> TypeTag {
        self.declared_type
    }

    /// The accessor.
    pub fn accessor(&self) -> &Accessor<R> {
        &self.accessor
    }

    /// Format pattern for row values.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Cell template.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Marker replaced by the rendered value in the template.
    pub fn template_placeholder(&self) -> &str {
        &self.template_placeholder
    }

    /// Whether cells are header cells rather than data cells.
    pub fn is_header(&self) -> bool {
        self.is_header
    }

    /// CSS class for body cells.
    pub fn css_class(&self) -> Option<&str> {
        self.css_class.as_deref()
    }

    /// CSS class for the header cell.
    pub fn header_css_class(&self) -> Option<&str> {
        self.header_css_class.as_deref()
    }

    /// CSS class for the footer cell.
    pub fn footer_css_class(&self) -> Option<&str> {
        self.footer_css_class.as_deref()
    }

    /// Text rendered for `true`.
    pub fn true_text(&self) -> &str {
        &self.true_text
    }

    /// Text rendered for `false`.
    pub fn false_text(&self) -> &str {
        &self.false_text
    }

    /// Extra attributes, in the order they were added.
    pub fn attributes(&self) -> &[ColumnAttribute<R>] {
        &self.attributes
    }

    /// Options this column was built with.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Whether a footer aggregator is set.
    pub fn has_footer(&self) -> bool {
        self.footer.is_some()
    }

    /// Runs the footer aggregator, if any.
    pub fn aggregate(&self, records: &[R]) -> Option<Value> {
        self.footer.as_ref().map(|footer| footer(records))
    }

    /// Renders the value for one record. See [`format::evaluate`].
    pub fn evaluate(&self, record: &R) -> Result<Option<String>, FormatError> {
        format::evaluate(self, record)
    }

    /// Renders the footer value. See [`format::evaluate_footer`].
    pub fn evaluate_footer(&self, records: &[R]) -> Option<String> {
        format::evaluate_footer(self, records)
    }

    /// Renders the value for one record and applies the template.
    pub fn render(&self, record: &R) -> Result<Option<String>, FormatError> {
        Ok(self.evaluate(record)?.map(|text| self.apply_template(&text)))
    }

    /// Substitutes a rendered value into the template.
    ///
    /// Without a template the value is returned unchanged.
    pub fn apply_template(&self, rendered: &str) -> String {
        match &self.template {
            Some(template) if !self.template_placeholder.is_empty() => {
                template.replace(&self.template_placeholder, rendered)
            }
            Some(template) => template.clone(),
            None => rendered.to_string(),
        }
    }

    /// Attributes to emit on a body cell for one record.
    ///
    /// The CSS class comes first when set, followed by every added attribute
    /// in insertion order. Names are not merged: an added `class` attribute
    /// appears next to the CSS class.
    pub fn cell_attributes(&self, record: &R) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(self.attributes.len() + 1);
        if let Some(class) = &self.css_class {
            out.push(("class".to_string(), class.clone()));
        }
        for attribute in &self.attributes {
            out.push((attribute.name.clone(), attribute.evaluate(record).to_string()));
        }
        out
    }
}

impl<R> fmt::Debug for ColumnDefinition<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDefinition")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("declared_type", &self.declared_type)
            .field("format", &self.format)
            .field("template", &self.template)
            .field("is_header", &self.is_header)
            .field("has_footer", &self.footer.is_some())
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
