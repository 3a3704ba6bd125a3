//! Format options

use serde::Deserialize;
use serde::Serialize;

/// Options controlling default conversions and column defaults.
///
/// New columns copy `template_placeholder`, `true_text` and `false_text`
/// from the options their builder was created with. Separators and default
/// date patterns apply whenever a value is rendered.
///
/// # Example
///
/// ```
/// use gridkit::FormatOptions;
///
/// let options = FormatOptions::default()
///     .with_decimal_separator(",")
///     .with_group_separator(".")
///     .with_date_format("%d.%m.%Y");
///
/// let options = FormatOptions::from_json(r#"{ "true_text": "Yes" }"#).unwrap();
/// assert_eq!(options.true_text, "Yes");
/// assert_eq!(options.false_text, "False");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Separator between integer and fractional digits.
    ///
    /// Default: `"."`
    pub decimal_separator: String,

    /// Separator between digit groups of grouped numeric patterns.
    ///
    /// Default: `","`
    pub group_separator: String,

    /// Default strftime pattern for dates.
    ///
    /// Default: `"%Y-%m-%d"`
    pub date_format: String,

    /// Default strftime pattern for date-times.
    ///
    /// Default: `"%Y-%m-%d %H:%M:%S"`
    pub date_time_format: String,

    /// Default substitution marker in column templates.
    ///
    /// Default: `"{value}"`
    pub template_placeholder: String,

    /// Default text for `true`.
    ///
    /// Default: `"True"`
    pub true_text: String,

    /// Default text for `false`.
    ///
    /// Default: `"False"`
    pub false_text: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            date_time_format: "%Y-%m-%d %H:%M:%S".to_string(),
            template_placeholder: "{value}".to_string(),
            true_text: "True".to_string(),
            false_text: "False".to_string(),
        }
    }
}

impl FormatOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the decimal separator.
    pub fn with_decimal_separator(mut self, separator: impl Into<String>) -> Self {
        self.decimal_separator = separator.into();
        self
    }

    /// Sets the group separator.
    pub fn with_group_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_separator = separator.into();
        self
    }

    /// Sets the default date pattern.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Sets the default date-time pattern.
    pub fn with_date_time_format(mut self, format: impl Into<String>) -> Self {
        self.date_time_format = format.into();
        self
    }

    /// Sets the default template placeholder.
    pub fn with_template_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.template_placeholder = placeholder.into();
        self
    }

    /// Sets the default boolean texts.
    pub fn with_boolean_text(
        mut self,
        true_text: impl Into<String>,
        false_text: impl Into<String>,
    ) -> Self {
        self.true_text = true_text.into();
        self.false_text = false_text.into();
        self
    }
}
