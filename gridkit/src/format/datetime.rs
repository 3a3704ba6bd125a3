//! Date and date-time formatting with strftime patterns.

use std::fmt::Display;
use std::fmt::Write;

use chrono::format::Item;
use chrono::format::StrftimeItems;

use crate::error::FormatError;
use crate::model::Value;
use crate::options::FormatOptions;

fn parse(pattern: &str) -> Result<Vec<Item<'_>>, FormatError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(FormatError::invalid_date(pattern));
    }
    Ok(items)
}

fn write_formatted(pattern: &str, formatted: impl Display) -> Result<String, FormatError> {
    // chrono reports specifiers the value cannot satisfy (e.g. `%H` on a
    // plain date) as a fmt::Error while writing.
    let mut out = String::new();
    write!(out, "{formatted}").map_err(|_| FormatError::invalid_date(pattern))?;
    Ok(out)
}

/// Formats a date value with `pattern`, or with the default pattern from
/// the options. Returns `Ok(None)` when the value is not a date.
pub(crate) fn format_date(
    value: &Value,
    pattern: Option<&str>,
    options: &FormatOptions,
) -> Result<Option<String>, FormatError> {
    let text = match value {
        Value::Date(date) => {
            let pattern = pattern.unwrap_or(&options.date_format);
            let items = parse(pattern)?;
            write_formatted(pattern, date.format_with_items(items.iter()))?
        }
        Value::DateTime(date_time) => {
            let pattern = pattern.unwrap_or(&options.date_time_format);
            let items = parse(pattern)?;
            write_formatted(pattern, date_time.format_with_items(items.iter()))?
        }
        Value::DateTimeUtc(date_time) => {
            let pattern = pattern.unwrap_or(&options.date_time_format);
            let items = parse(pattern)?;
            write_formatted(pattern, date_time.format_with_items(items.iter()))?
        }
        _ => return Ok(None),
    };
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn date() -> Value {
        Value::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
    }

    fn date_time() -> Value {
        Value::DateTime(
            NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(14, 5, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_default_patterns() {
        let options = FormatOptions::default();
        assert_eq!(
            format_date(&date(), None, &options).unwrap().as_deref(),
            Some("2024-03-09")
        );
        assert_eq!(
            format_date(&date_time(), None, &options).unwrap().as_deref(),
            Some("2024-03-09 14:05:00")
        );
    }

    #[test]
    fn test_custom_pattern() {
        let options = FormatOptions::default();
        let text = format_date(&date_time(), Some("%d/%m/%Y %H:%M"), &options).unwrap();
        assert_eq!(text.as_deref(), Some("09/03/2024 14:05"));

        let utc = Value::DateTimeUtc(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        let text = format_date(&utc, Some("%Y-%m-%dT%H:%M:%S%:z"), &options).unwrap();
        assert_eq!(text.as_deref(), Some("2024-01-02T03:04:05+00:00"));
    }

    #[test]
    fn test_invalid_specifier() {
        let err = format_date(&date(), Some("%Q"), &FormatOptions::default()).unwrap_err();
        assert_eq!(err, FormatError::invalid_date("%Q"));
    }

    #[test]
    fn test_time_specifier_on_plain_date() {
        let err = format_date(&date(), Some("%H:%M"), &FormatOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::InvalidDatePattern { .. }));
    }

    #[test]
    fn test_non_date_value() {
        let result = format_date(&Value::Int(1), None, &FormatOptions::default()).unwrap();
        assert_eq!(result, None);
    }
}
