//! Property metadata types

use crate::model::TypeTag;

/// Static metadata for a record property read directly by an accessor.
///
/// Produced by `#[derive(Record)]` for each field. A column built from a
/// property accessor takes its key from `name`, its declared type from
/// `type_tag`, its default title from `display_name` (falling back to
/// `name`) and its default format from `display_format`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMetadata {
    /// The property (field) name, e.g. `"unit_price"`.
    pub name: &'static str,

    /// The declared type of the property.
    pub type_tag: TypeTag,

    /// Human display name, e.g. `"Unit price"`.
    pub display_name: Option<&'static str>,

    /// Default format pattern for the property's values.
    pub display_format: Option<&'static str>,

    /// Longer description of the property.
    pub description: Option<&'static str>,
}

impl PropertyMetadata {
    /// Creates metadata with only a name and type.
    pub const fn new(name: &'static str, type_tag: TypeTag) -> Self {
        Self {
            name,
            type_tag,
            display_name: None,
            display_format: None,
            description: None,
        }
    }

    /// Sets the display name.
    pub const fn with_display_name(mut self, display_name: &'static str) -> Self {
        self.display_name = Some(display_name);
        self
    }

    /// Sets the default display format.
    pub const fn with_display_format(mut self, format: &'static str) -> Self {
        self.display_format = Some(format);
        self
    }

    /// Sets the description.
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// The title a column shows for this property when none is given.
    pub fn title(&self) -> &'static str {
        self.display_name.unwrap_or(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_falls_back_to_name() {
        let meta = PropertyMetadata::new("quantity", TypeTag::Integer);
        assert_eq!(meta.title(), "quantity");

        let meta = meta.with_display_name("Qty");
        assert_eq!(meta.title(), "Qty");
    }
}
