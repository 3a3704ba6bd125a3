//! Accessors: compiled value extraction plus static metadata.
//!
//! An [`Accessor`] is how a column reads its value from a record. There are
//! two kinds:
//!
//! - **Property accessors** read one field directly. They carry
//!   [`PropertyMetadata`], so a column built from one gets its key, declared
//!   type, title and default format for free. `#[derive(Record)]` generates
//!   one per field.
//! - **Computed accessors** run an arbitrary closure. Only the closure's
//!   static return type is known (through [`ColumnValue::TYPE_TAG`]); key and
//!   title stay empty unless the caller supplies them.

use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::model::TypeTag;
use crate::model::Value;
use crate::model::metadata::PropertyMetadata;
use crate::model::types::EnumValue;

/// Shared extraction function from a record to a [`Value`].
pub(crate) type ValueFn<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// Types that can be the result of an accessor.
///
/// The associated tag is the static declared type used for formatting
/// dispatch when a column is built.
pub trait ColumnValue {
    /// Declared type of values of this type.
    const TYPE_TAG: TypeTag;

    /// Converts to a dynamic value.
    fn to_value(&self) -> Value;
}

macro_rules! column_value {
    ($ty:ty, $tag:ident, |$v:ident| $conv:expr) => {
        impl ColumnValue for $ty {
            const TYPE_TAG: TypeTag = TypeTag::$tag;

            fn to_value(&self) -> Value {
                let $v = self;
                $conv
            }
        }
    };
}

column_value!(bool, Boolean, |v| Value::Bool(*v));
column_value!(i32, Integer, |v| Value::Int(*v));
column_value!(i64, Integer, |v| Value::Long(*v));
column_value!(u32, Integer, |v| Value::Long(i64::from(*v)));
column_value!(usize, Integer, |v| Value::from(*v));
column_value!(f32, Float, |v| Value::Float(f64::from(*v)));
column_value!(f64, Float, |v| Value::Float(*v));
column_value!(Decimal, Decimal, |v| Value::Decimal(*v));
column_value!(String, Other, |v| Value::String(v.clone()));
column_value!(&'static str, Other, |v| Value::String((*v).to_string()));
column_value!(Uuid, Other, |v| Value::Guid(*v));
column_value!(NaiveDate, DateTime, |v| Value::Date(*v));
column_value!(NaiveDateTime, DateTime, |v| Value::DateTime(*v));
column_value!(DateTime<Utc>, DateTime, |v| Value::DateTimeUtc(*v));
column_value!(EnumValue, Enumeration, |v| Value::Enum(v.clone()));

impl<T: ColumnValue> ColumnValue for Option<T> {
    const TYPE_TAG: TypeTag = T::TYPE_TAG;

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

/// A compiled value extractor with optional property metadata.
///
/// # Example
///
/// ```
/// use gridkit::Accessor;
/// use gridkit::model::TypeTag;
///
/// struct Line {
///     quantity: i32,
///     unit_price: f64,
/// }
///
/// let total = Accessor::computed(|line: &Line| f64::from(line.quantity) * line.unit_price);
/// assert_eq!(total.type_tag(), TypeTag::Float);
/// assert!(total.metadata().is_none());
/// ```
pub struct Accessor<R> {
    extract: ValueFn<R>,
    property: Option<PropertyMetadata>,
    type_tag: TypeTag,
}

impl<R> Accessor<R> {
    /// Creates a direct property accessor.
    ///
    /// The declared type is taken from the metadata.
    pub fn property<F>(metadata: PropertyMetadata, extract: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        Self {
            extract: Arc::new(extract),
            type_tag: metadata.type_tag,
            property: Some(metadata),
        }
    }

    /// Creates a computed accessor from a closure.
    ///
    /// The declared type is the closure's static return type.
    pub fn computed<T, F>(extract: F) -> Self
    where
        R: 'static,
        T: ColumnValue,
        F: Fn(&R) -> T + Send + Sync + 'static,
    {
        Self {
            extract: Arc::new(move |record: &R| extract(record).to_value()),
            property: None,
            type_tag: T::TYPE_TAG,
        }
    }

    /// Extracts the value from a record.
    pub fn extract(&self, record: &R) -> Value {
        (self.extract)(record)
    }

    /// Property metadata, present only for direct property accessors.
    pub fn metadata(&self) -> Option<&PropertyMetadata> {
        self.property.as_ref()
    }

    /// The declared type of the extracted values.
    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// The property name, or an empty key for computed accessors.
    pub fn key(&self) -> &'static str {
        self.property.as_ref().map_or("", |p| p.name)
    }
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        Self {
            extract: Arc::clone(&self.extract),
            property: self.property.clone(),
            type_tag: self.type_tag,
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("property", &self.property)
            .field("type_tag", &self.type_tag)
            .finish_non_exhaustive()
    }
}

/// Record types whose properties can be resolved by name.
///
/// Derive it with `#[derive(Record)]`:
///
/// ```
/// use gridkit::Record;
///
/// #[derive(Record)]
/// struct Product {
///     #[column(name = "Product name")]
///     name: String,
///     #[column(format = "N2")]
///     price: f64,
/// }
///
/// let price = Product::price_accessor();
/// assert_eq!(price.key(), "price");
/// assert!(Product::accessor("name").is_some());
/// assert!(Product::accessor("missing").is_none());
/// ```
pub trait Record: Sized + 'static {
    /// Name of the record type, used in error messages.
    fn record_name() -> &'static str;

    /// Metadata for every exposed property, in declaration order.
    fn properties() -> &'static [PropertyMetadata];

    /// Resolves a property accessor by name.
    fn accessor(name: &str) -> Option<Accessor<Self>>;
}
