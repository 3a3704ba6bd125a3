//! BuildError for column configuration

/// Error raised while building column definitions.
///
/// These are configuration mistakes and surface at build time, never while
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// No property with the requested name exists on the record type.
    #[error("Property '{name}' not found on record '{record}'")]
    UnknownProperty { record: &'static str, name: String },

    /// Two columns resolved to the same non-empty key.
    #[error("Column '{key}' is defined more than once")]
    DuplicateColumn { key: String },
}

impl BuildError {
    /// Creates a new unknown property error.
    pub fn unknown_property(record: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownProperty {
            record,
            name: name.into(),
        }
    }

    /// Creates a new duplicate column error.
    pub fn duplicate_column(key: impl Into<String>) -> Self {
        Self::DuplicateColumn { key: key.into() }
    }
}
