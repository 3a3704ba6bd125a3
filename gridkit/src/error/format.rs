//! FormatError for value formatting

/// Error raised when a configured format pattern cannot format a value.
///
/// The evaluator never swallows these: a column configured with a bad
/// pattern fails the cell that uses it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The numeric pattern is malformed.
    #[error("Invalid numeric format '{pattern}': {reason}")]
    InvalidNumericPattern { pattern: String, reason: String },

    /// The pattern is well-formed but does not apply to this kind of value.
    #[error("Format specifier '{specifier}' cannot be applied to a {type_name} value")]
    UnsupportedSpecifier {
        specifier: String,
        type_name: &'static str,
    },

    /// The date pattern contains an unknown specifier.
    #[error("Invalid date format '{pattern}'")]
    InvalidDatePattern { pattern: String },
}

impl FormatError {
    /// Creates a new invalid numeric pattern error.
    pub fn invalid_numeric(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNumericPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new unsupported specifier error.
    pub fn unsupported(specifier: impl Into<String>, type_name: &'static str) -> Self {
        Self::UnsupportedSpecifier {
            specifier: specifier.into(),
            type_name,
        }
    }

    /// Creates a new invalid date pattern error.
    pub fn invalid_date(pattern: impl Into<String>) -> Self {
        Self::InvalidDatePattern {
            pattern: pattern.into(),
        }
    }
}
