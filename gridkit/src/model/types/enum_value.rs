//! Enum member value types

use std::borrow::Cow;

/// A single enum member together with its display annotations.
///
/// The member name is what the code calls the variant. The display name and
/// description are optional human labels; the display name wins, the
/// description is the older annotation kept for records that only carry
/// that one.
///
/// # Example
///
/// ```
/// use gridkit::model::types::EnumValue;
///
/// // Just the member name
/// let status = EnumValue::new("Pending");
/// assert_eq!(status.label(), "Pending");
///
/// // With a display name
/// let status = EnumValue::new("InTransit").with_display_name("In transit");
/// assert_eq!(status.label(), "In transit");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    member: Cow<'static, str>,
    display_name: Option<Cow<'static, str>>,
    description: Option<Cow<'static, str>>,
}

impl EnumValue {
    /// Creates a new enum value with no annotations.
    pub fn new(member: impl Into<Cow<'static, str>>) -> Self {
        Self {
            member: member.into(),
            display_name: None,
            description: None,
        }
    }

    /// Creates an enum value from statically known annotations.
    ///
    /// This is what `#[derive(DisplayEnum)]` expands to.
    pub const fn from_static(
        member: &'static str,
        display_name: Option<&'static str>,
        description: Option<&'static str>,
    ) -> Self {
        Self {
            member: Cow::Borrowed(member),
            display_name: match display_name {
                Some(name) => Some(Cow::Borrowed(name)),
                None => None,
            },
            description: match description {
                Some(text) => Some(Cow::Borrowed(text)),
                None => None,
            },
        }
    }

    /// Sets the display name annotation.
    pub fn with_display_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the description annotation.
    pub fn with_description(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// The member's own name.
    pub fn member(&self) -> &str {
        &self.member
    }

    /// The display name annotation, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// The description annotation, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Human label: display name, then description, then the member name.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or(&self.member)
    }
}

/// Enums whose members can be shown with a human label.
///
/// Usually derived:
///
/// ```
/// use gridkit::DisplayEnum;
///
/// #[derive(DisplayEnum)]
/// enum Priority {
///     #[display(name = "Low priority")]
///     Low,
///     #[description("Needs attention")]
///     High,
///     Critical,
/// }
///
/// assert_eq!(Priority::Low.enum_value().label(), "Low priority");
/// assert_eq!(Priority::High.enum_value().label(), "Needs attention");
/// assert_eq!(Priority::Critical.enum_value().label(), "Critical");
/// ```
pub trait DisplayEnum {
    /// Returns the member together with its annotations.
    fn enum_value(&self) -> EnumValue;
}
