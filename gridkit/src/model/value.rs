//! Value enum for dynamic cell values

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::EnumValue;

/// The closed set of value categories that drive formatting.
///
/// A column's declared tag is fixed when the column is constructed; a footer
/// aggregate is dispatched on the tag of the value it actually produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// 32 or 64-bit integers.
    Integer,
    /// Arbitrary precision decimal.
    Decimal,
    /// 64-bit floating point.
    Float,
    /// Dates and date-times, with or without timezone.
    DateTime,
    /// Boolean.
    Boolean,
    /// Enum member with optional display labels.
    Enumeration,
    /// Anything else (strings, GUIDs).
    Other,
}

impl TypeTag {
    /// Returns `true` for integer, decimal and float tags.
    pub fn is_numeric(self) -> bool {
        matches!(self, TypeTag::Integer | TypeTag::Decimal | TypeTag::Float)
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeTag::Integer => "integer",
            TypeTag::Decimal => "decimal",
            TypeTag::Float => "float",
            TypeTag::DateTime => "date-time",
            TypeTag::Boolean => "boolean",
            TypeTag::Enumeration => "enumeration",
            TypeTag::Other => "other",
        };
        f.write_str(name)
    }
}

/// A dynamic value extracted from a record.
///
/// Accessors produce a `Value` per record and footer aggregators produce one
/// per collection. The evaluator turns it into display text.
///
/// # Type Mapping
///
/// | Rust type | Variant | Tag |
/// |-----------|---------|-----|
/// | `None` | `Null` | - |
/// | `bool` | `Bool` | `Boolean` |
/// | `i32` | `Int` | `Integer` |
/// | `i64`, `usize` | `Long` | `Integer` |
/// | `f64` | `Float` | `Float` |
/// | `Decimal` | `Decimal` | `Decimal` |
/// | `String`, `&str` | `String` | `Other` |
/// | `Uuid` | `Guid` | `Other` |
/// | `NaiveDate` | `Date` | `DateTime` |
/// | `NaiveDateTime` | `DateTime` | `DateTime` |
/// | `DateTime<Utc>` | `DateTimeUtc` | `DateTime` |
/// | `#[derive(DisplayEnum)]` | `Enum` | `Enumeration` |
///
/// # Example
///
/// ```
/// use gridkit::model::Value;
///
/// let name = Value::from("Contoso");
/// let quantity = Value::from(12i32);
/// let active = Value::from(true);
/// let empty = Value::from(None::<i32>);
/// assert!(empty.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time without timezone.
    DateTime(NaiveDateTime),
    /// Date and time in UTC.
    DateTimeUtc(DateTime<Utc>),
    /// Enum member.
    Enum(EnumValue),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the runtime type tag, or `None` for `Null`.
    pub fn type_tag(&self) -> Option<TypeTag> {
        let tag = match self {
            Value::Null => return None,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Int(_) | Value::Long(_) => TypeTag::Integer,
            Value::Float(_) => TypeTag::Float,
            Value::Decimal(_) => TypeTag::Decimal,
            Value::Date(_) | Value::DateTime(_) | Value::DateTimeUtc(_) => TypeTag::DateTime,
            Value::Enum(_) => TypeTag::Enumeration,
            Value::String(_) | Value::Guid(_) => TypeTag::Other,
        };
        Some(tag)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Guid(_) => "guid",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::DateTimeUtc(_) => "datetime_utc",
            Value::Enum(_) => "enum",
        }
    }
}

/// Plain string conversion, without any pattern or options applied.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Guid(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{v}"),
            Value::DateTimeUtc(v) => write!(f, "{v}"),
            Value::Enum(v) => f.write_str(v.member()),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Long(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTimeUtc(v)
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Value::Enum(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
