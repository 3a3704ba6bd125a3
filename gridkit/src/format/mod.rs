//! Type-dispatched value evaluation.
//!
//! The row path dispatches on the column's declared type and honours the
//! column's format pattern. The footer path dispatches on the runtime type
//! of the aggregate and only ever uses default conversions, since an
//! aggregate (say, a count over a date column) need not have the column's
//! shape.

mod datetime;
mod numeric;

use log::trace;
use log::warn;

use crate::column::ColumnDefinition;
use crate::error::FormatError;
use crate::model::TypeTag;
use crate::model::Value;
use crate::options::FormatOptions;

use numeric::Number;

/// Per-call dispatch inputs.
struct Dispatch<'a> {
    format: Option<&'a str>,
    true_text: &'a str,
    false_text: &'a str,
    options: &'a FormatOptions,
}

impl Dispatch<'_> {
    fn format(&self, value: &Value, tag: TypeTag) -> Result<String, FormatError> {
        let text = match tag {
            TypeTag::Integer | TypeTag::Decimal | TypeTag::Float => match Number::from_value(value) {
                Some(number) => Some(numeric::format_number(number, self.format, self.options)?),
                None => None,
            },
            TypeTag::DateTime => datetime::format_date(value, self.format, self.options)?,
            TypeTag::Boolean => match value {
                Value::Bool(true) => Some(self.true_text.to_string()),
                Value::Bool(false) => Some(self.false_text.to_string()),
                _ => None,
            },
            TypeTag::Enumeration => match value {
                Value::Enum(member) => Some(member.label().to_string()),
                _ => None,
            },
            TypeTag::Other => Some(default_text(value, self.options)),
        };

        Ok(text.unwrap_or_else(|| {
            warn!(
                "declared type {tag} does not match {} value; using default conversion",
                value.type_name()
            );
            default_text(value, self.options)
        }))
    }
}

/// Default string conversion of any value.
fn default_text(value: &Value, options: &FormatOptions) -> String {
    if let Some(number) = Number::from_value(value) {
        return numeric::default_text(number, options);
    }
    match datetime::format_date(value, None, options) {
        Ok(Some(text)) => text,
        _ => value.to_string(),
    }
}

/// Renders one column for one record.
///
/// Returns `Ok(None)` when the accessor yields an absent value; no
/// formatting is attempted then. Otherwise:
///
/// - numeric columns use the column format as a numeric pattern, else the
///   default conversion;
/// - date-time columns use the column format as a strftime pattern, else
///   the default date or date-time pattern;
/// - boolean columns render the column's true/false text and ignore the
///   format;
/// - enumeration columns render the member's display name, then its
///   description, then its name;
/// - everything else uses the default conversion.
///
/// A bad format pattern is returned as an error, never swallowed.
///
/// # Example
///
/// ```
/// use gridkit::{Accessor, ColumnBuilder};
///
/// struct Line {
///     price: f64,
///     note: Option<String>,
/// }
///
/// let mut builder = ColumnBuilder::new();
/// builder.column(Accessor::computed(|l: &Line| l.price)).format("N2");
/// builder.column(Accessor::computed(|l: &Line| l.note.clone()));
/// let columns = builder.build().unwrap();
///
/// let line = Line { price: 1234.5, note: None };
/// let cells: Vec<_> = columns.iter().map(|c| gridkit::format::evaluate(c, &line).unwrap()).collect();
/// assert_eq!(cells, vec![Some("1,234.50".to_string()), None]);
/// ```
pub fn evaluate<R>(column: &ColumnDefinition<R>, record: &R) -> Result<Option<String>, FormatError> {
    let value = column.accessor().extract(record);
    if value.is_null() {
        return Ok(None);
    }

    trace!(
        "evaluating column '{}' as {} ({})",
        column.key(),
        column.declared_type(),
        value.type_name()
    );

    let dispatch = Dispatch {
        format: column.format(),
        true_text: column.true_text(),
        false_text: column.false_text(),
        options: column.options(),
    };
    dispatch.format(&value, column.declared_type()).map(Some)
}

/// Renders the footer of one column over all records.
///
/// Returns `None` when the column has no aggregator or the aggregate is
/// absent. The aggregate is dispatched on its own runtime type and the
/// column's format pattern is never applied; boolean and enum handling is
/// the same as on the row path.
pub fn evaluate_footer<R>(column: &ColumnDefinition<R>, records: &[R]) -> Option<String> {
    let value = column.aggregate(records)?;
    let tag = value.type_tag()?;

    trace!("evaluating footer of column '{}' as {tag}", column.key());

    let dispatch = Dispatch {
        format: None,
        true_text: column.true_text(),
        false_text: column.false_text(),
        options: column.options(),
    };
    match dispatch.format(&value, tag) {
        Ok(text) => Some(text),
        Err(err) => {
            warn!("footer of column '{}': {err}", column.key());
            Some(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::accessor::Accessor;
    use crate::column::ColumnBuilder;
    use crate::column::Columns;
    use crate::model::types::EnumValue;

    #[derive(Clone)]
    struct Shipment {
        weight: Option<f64>,
        cost: Decimal,
        shipped: NaiveDate,
        express: bool,
        status: EnumValue,
    }

    fn shipments() -> Vec<Shipment> {
        vec![
            Shipment {
                weight: Some(12.5),
                cost: Decimal::new(10050, 2),
                shipped: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                express: true,
                status: EnumValue::new("InTransit").with_display_name("In transit"),
            },
            Shipment {
                weight: None,
                cost: Decimal::new(2000, 2),
                shipped: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
                express: false,
                status: EnumValue::new("Delivered"),
            },
        ]
    }

    fn single(build: impl FnOnce(&mut ColumnBuilder<Shipment>)) -> Columns<Shipment> {
        let mut builder = ColumnBuilder::new();
        build(&mut builder);
        builder.build().unwrap()
    }

    #[test]
    fn test_absent_value_is_none_regardless_of_format() {
        let columns = single(|b| {
            b.column(Accessor::computed(|s: &Shipment| s.weight)).format("Q9");
        });
        let column = columns.iter().next().unwrap();

        assert_eq!(evaluate(column, &shipments()[1]).unwrap(), None);
        assert!(evaluate(column, &shipments()[0]).is_err());
    }

    #[test]
    fn test_numeric_format_applies_on_row_path() {
        let columns = single(|b| {
            b.column(Accessor::computed(|s: &Shipment| s.cost)).format("N1");
        });
        let column = columns.iter().next().unwrap();
        assert_eq!(evaluate(column, &shipments()[0]).unwrap().as_deref(), Some("100.5"));
    }

    #[test]
    fn test_boolean_ignores_format() {
        let columns = single(|b| {
            b.column(Accessor::computed(|s: &Shipment| s.express))
                .format("N2")
                .boolean_text("Express", "Standard");
        });
        let column = columns.iter().next().unwrap();
        let records = shipments();
        assert_eq!(evaluate(column, &records[0]).unwrap().as_deref(), Some("Express"));
        assert_eq!(evaluate(column, &records[1]).unwrap().as_deref(), Some("Standard"));
    }

    #[test]
    fn test_enum_labels() {
        let columns = single(|b| {
            b.column(Accessor::computed(|s: &Shipment| s.status.clone()));
        });
        let column = columns.iter().next().unwrap();
        let records = shipments();
        assert_eq!(evaluate(column, &records[0]).unwrap().as_deref(), Some("In transit"));
        assert_eq!(evaluate(column, &records[1]).unwrap().as_deref(), Some("Delivered"));
    }

    #[test]
    fn test_date_format() {
        let columns = single(|b| {
            b.column(Accessor::computed(|s: &Shipment| s.shipped)).format("%d %b %Y");
        });
        let column = columns.iter().next().unwrap();
        assert_eq!(
            evaluate(column, &shipments()[0]).unwrap().as_deref(),
            Some("01 May 2024")
        );
    }

    #[test]
    fn test_footer_ignores_row_format() {
        let columns = single(|b| {
            b.column(Accessor::computed(|s: &Shipment| s.cost))
                .format("N4")
                .footer(|all: &[Shipment]| all.iter().map(|s| s.cost).sum::<Decimal>());
        });
        let column = columns.iter().next().unwrap();
        assert_eq!(evaluate_footer(column, &shipments()).as_deref(), Some("120.50"));
    }

    #[test]
    fn test_footer_dispatches_on_runtime_type() {
        let columns = single(|b| {
            b.column(Accessor::computed(|s: &Shipment| s.shipped))
                .format("%Y")
                .footer(|all: &[Shipment]| all.len());
        });
        let column = columns.iter().next().unwrap();
        assert_eq!(evaluate_footer(column, &shipments()).as_deref(), Some("2"));
    }

    #[test]
    fn test_footer_absent() {
        let columns = single(|b| {
            b.column(Accessor::computed(|s: &Shipment| s.weight))
                .footer(|_: &[Shipment]| None::<f64>);
            b.column(Accessor::computed(|s: &Shipment| s.cost));
        });
        let mut iter = columns.iter();
        assert_eq!(evaluate_footer(iter.next().unwrap(), &shipments()), None);
        assert_eq!(evaluate_footer(iter.next().unwrap(), &shipments()), None);
    }

    #[test]
    fn test_footer_boolean_uses_column_text() {
        let columns = single(|b| {
            b.column(Accessor::computed(|s: &Shipment| s.express))
                .boolean_text("yes", "no")
                .footer(|all: &[Shipment]| all.iter().all(|s| s.express));
        });
        let column = columns.iter().next().unwrap();
        assert_eq!(evaluate_footer(column, &shipments()).as_deref(), Some("no"));
    }
}
