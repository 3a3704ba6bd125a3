//! Numeric format patterns.
//!
//! Two pattern families are understood:
//!
//! - Standard specifiers: a letter with an optional precision of up to two
//!   digits. `N` grouped fixed-point, `F` fixed-point, `D` integer with
//!   minimum digits, `E` scientific, `P` percent, `X`/`x` hexadecimal, `G`
//!   default conversion. `N`, `F` and `P` default to 2 decimals, `E` to 6.
//! - Custom patterns: a contiguous run of `0` (required digit), `#`
//!   (optional digit), `,` (grouping) and `.` (decimal point), optionally
//!   surrounded by literal text. A `%` anywhere scales the value by 100.
//!
//! Any other pattern is rejected.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::ToPrimitive;

use crate::error::FormatError;
use crate::model::Value;
use crate::options::FormatOptions;

const MAX_PRECISION: u32 = 28;

/// A numeric value in one of the representations the evaluator formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    Decimal(Decimal),
    Float(f64),
}

impl Number {
    /// Extracts a number from a value, or `None` if it is not numeric.
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(Number::Int(i64::from(*v))),
            Value::Long(v) => Some(Number::Int(*v)),
            Value::Decimal(v) => Some(Number::Decimal(*v)),
            Value::Float(v) => Some(Number::Float(*v)),
            _ => None,
        }
    }

    fn type_name(self) -> &'static str {
        match self {
            Number::Int(_) => "integer",
            Number::Decimal(_) => "decimal",
            Number::Float(_) => "float",
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Decimal(v) => v.to_f64().unwrap_or(f64::NAN),
            Number::Float(v) => v,
        }
    }

    fn times_hundred(self) -> Self {
        match self {
            Number::Int(v) => match v.checked_mul(100) {
                Some(scaled) => Number::Int(scaled),
                None => Number::Decimal(Decimal::from(v) * Decimal::ONE_HUNDRED),
            },
            Number::Decimal(v) => match v.checked_mul(Decimal::ONE_HUNDRED) {
                Some(scaled) => Number::Decimal(scaled),
                None => Number::Float(v.to_f64().unwrap_or(f64::NAN) * 100.0),
            },
            Number::Float(v) => Number::Float(v * 100.0),
        }
    }

    /// Text for values that have no digits to format.
    fn special(self) -> Option<&'static str> {
        match self {
            Number::Float(v) if v.is_nan() => Some("NaN"),
            Number::Float(v) if v == f64::INFINITY => Some("Infinity"),
            Number::Float(v) if v == f64::NEG_INFINITY => Some("-Infinity"),
            _ => None,
        }
    }

    /// Rounds to `scale` decimals and splits into sign, integer digits and
    /// exactly `scale` fractional digits.
    fn fixed_parts(self, scale: u32) -> FixedParts {
        let (negative, text) = match self {
            Number::Int(v) => (v < 0, v.unsigned_abs().to_string()),
            Number::Decimal(v) => {
                let rounded = v.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
                (rounded.is_sign_negative(), rounded.abs().to_string())
            }
            Number::Float(v) => match Decimal::from_f64_retain(v) {
                Some(exact) => {
                    let rounded =
                        exact.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
                    (v < 0.0, rounded.abs().to_string())
                }
                // Outside the decimal range there are no fractional digits left to tie on.
                None => (v < 0.0, format!("{:.*}", scale as usize, v.abs())),
            },
        };

        let (int_digits, frac_digits) = match text.split_once('.') {
            Some((int, frac)) => (int.to_string(), frac.to_string()),
            None => (text, String::new()),
        };
        let mut frac_digits = frac_digits;
        while frac_digits.len() < scale as usize {
            frac_digits.push('0');
        }
        frac_digits.truncate(scale as usize);

        let is_zero = int_digits.bytes().chain(frac_digits.bytes()).all(|b| b == b'0');
        FixedParts {
            negative: negative && !is_zero,
            int_digits,
            frac_digits,
        }
    }
}

#[derive(Debug)]
struct FixedParts {
    negative: bool,
    int_digits: String,
    frac_digits: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Standard {
    Number,
    Fixed,
    Decimal,
    Exponential,
    Percent,
    Hex { upper: bool },
    General,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Custom {
    prefix: String,
    suffix: String,
    min_int: usize,
    min_frac: usize,
    max_frac: usize,
    grouped: bool,
    percent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Default,
    Standard {
        kind: Standard,
        precision: Option<u32>,
    },
    Custom(Custom),
}

fn parse(pattern: &str) -> Result<Pattern, FormatError> {
    if pattern.is_empty() {
        return Ok(Pattern::Default);
    }

    let mut chars = pattern.chars();
    let first = chars.next().unwrap_or_default();
    let rest = chars.as_str();
    if first.is_ascii_alphabetic() && rest.chars().all(|c| c.is_ascii_digit()) {
        return parse_standard(pattern, first, rest);
    }

    parse_custom(pattern).map(Pattern::Custom)
}

fn parse_standard(pattern: &str, letter: char, digits: &str) -> Result<Pattern, FormatError> {
    let kind = match letter {
        'N' | 'n' => Standard::Number,
        'F' | 'f' => Standard::Fixed,
        'D' | 'd' => Standard::Decimal,
        'E' | 'e' => Standard::Exponential,
        'P' | 'p' => Standard::Percent,
        'X' => Standard::Hex { upper: true },
        'x' => Standard::Hex { upper: false },
        'G' | 'g' => Standard::General,
        other => {
            return Err(FormatError::invalid_numeric(
                pattern,
                format!("unknown specifier '{other}'"),
            ));
        }
    };

    if digits.len() > 2 {
        return Err(FormatError::invalid_numeric(pattern, "precision has more than two digits"));
    }
    let precision = if digits.is_empty() {
        None
    } else {
        let precision: u32 = digits
            .parse()
            .map_err(|_| FormatError::invalid_numeric(pattern, "precision is not a number"))?;
        if precision > MAX_PRECISION {
            return Err(FormatError::invalid_numeric(
                pattern,
                format!("precision exceeds {MAX_PRECISION}"),
            ));
        }
        Some(precision)
    };

    Ok(Pattern::Standard { kind, precision })
}

fn is_placeholder(c: char) -> bool {
    matches!(c, '0' | '#' | ',' | '.')
}

fn parse_custom(pattern: &str) -> Result<Custom, FormatError> {
    let Some(start) = pattern.find(['0', '#']) else {
        return Err(FormatError::invalid_numeric(pattern, "no digit placeholder"));
    };
    // A leading '.' belongs to the body, as in ".00".
    let start = if pattern[..start].ends_with('.') { start - 1 } else { start };
    let end = pattern[start..]
        .find(|c: char| !is_placeholder(c))
        .map_or(pattern.len(), |offset| start + offset);

    let prefix = &pattern[..start];
    let body = &pattern[start..end];
    let suffix = &pattern[end..];

    if suffix.contains(['0', '#']) {
        return Err(FormatError::invalid_numeric(
            pattern,
            "digit placeholders must be contiguous",
        ));
    }

    let (int_part, frac_part) = match body.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (body, ""),
    };
    if frac_part.contains('.') {
        return Err(FormatError::invalid_numeric(pattern, "more than one decimal point"));
    }
    if frac_part.contains(',') {
        return Err(FormatError::invalid_numeric(
            pattern,
            "group separator after the decimal point",
        ));
    }

    let min_frac = frac_part.chars().filter(|&c| c == '0').count();
    let max_frac = frac_part.chars().count();
    if max_frac > MAX_PRECISION as usize {
        return Err(FormatError::invalid_numeric(
            pattern,
            format!("more than {MAX_PRECISION} decimals"),
        ));
    }

    Ok(Custom {
        prefix: prefix.to_string(),
        suffix: suffix.to_string(),
        min_int: int_part.chars().filter(|&c| c == '0').count(),
        min_frac,
        max_frac,
        grouped: int_part.contains(','),
        percent: prefix.contains('%') || suffix.contains('%'),
    })
}

fn group(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

fn fixed(number: Number, scale: u32, grouped: bool, options: &FormatOptions) -> String {
    let parts = number.fixed_parts(scale);
    let mut out = String::new();
    if parts.negative {
        out.push('-');
    }
    if grouped {
        out.push_str(&group(&parts.int_digits, &options.group_separator));
    } else {
        out.push_str(&parts.int_digits);
    }
    if !parts.frac_digits.is_empty() {
        out.push_str(&options.decimal_separator);
        out.push_str(&parts.frac_digits);
    }
    out
}

fn exponential(number: Number, precision: u32, upper: bool, options: &FormatOptions) -> String {
    let value = number.to_f64();
    if let Some(special) = Number::Float(value).special() {
        return special.to_string();
    }

    let text = format!("{:.*e}", precision as usize, value.abs());
    let (mantissa, exponent) = text.split_once('e').unwrap_or((&text, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&mantissa.replace('.', &options.decimal_separator));
    out.push(if upper { 'E' } else { 'e' });
    out.push(if exponent < 0 { '-' } else { '+' });
    out.push_str(&format!("{:03}", exponent.unsigned_abs()));
    out
}

/// Type's default string conversion with the configured decimal separator.
pub(crate) fn default_text(number: Number, options: &FormatOptions) -> String {
    if let Some(special) = number.special() {
        return special.to_string();
    }
    let text = match number {
        Number::Int(v) => return v.to_string(),
        Number::Decimal(v) => v.to_string(),
        Number::Float(v) => v.to_string(),
    };
    text.replace('.', &options.decimal_separator)
}

fn custom(number: Number, pattern: &Custom, options: &FormatOptions) -> String {
    let number = if pattern.percent {
        number.times_hundred()
    } else {
        number
    };

    let parts = number.fixed_parts(pattern.max_frac as u32);

    let mut frac = parts.frac_digits;
    while frac.len() > pattern.min_frac && frac.ends_with('0') {
        frac.pop();
    }

    let mut int = parts.int_digits.trim_start_matches('0').to_string();
    while int.len() < pattern.min_int {
        int.insert(0, '0');
    }
    if pattern.grouped {
        int = group(&int, &options.group_separator);
    }

    let mut out = String::new();
    if parts.negative {
        out.push('-');
    }
    out.push_str(&pattern.prefix);
    out.push_str(&int);
    if !frac.is_empty() {
        out.push_str(&options.decimal_separator);
        out.push_str(&frac);
    }
    out.push_str(&pattern.suffix);
    out
}

/// Formats a number with an optional pattern.
///
/// `None` and `G` give the default conversion.
pub(crate) fn format_number(
    number: Number,
    pattern: Option<&str>,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let Some(pattern_text) = pattern else {
        return Ok(default_text(number, options));
    };

    let parsed = parse(pattern_text)?;
    if let Some(special) = number.special() {
        return Ok(special.to_string());
    }

    let text = match parsed {
        Pattern::Default => default_text(number, options),
        Pattern::Custom(custom_pattern) => custom(number, &custom_pattern, options),
        Pattern::Standard { kind, precision } => match kind {
            Standard::General => default_text(number, options),
            Standard::Number => fixed(number, precision.unwrap_or(2), true, options),
            Standard::Fixed => fixed(number, precision.unwrap_or(2), false, options),
            Standard::Percent => {
                let mut text = fixed(number.times_hundred(), precision.unwrap_or(2), true, options);
                text.push('%');
                text
            }
            Standard::Exponential => exponential(
                number,
                precision.unwrap_or(6),
                pattern_text.starts_with('E'),
                options,
            ),
            Standard::Decimal => {
                let Number::Int(v) = number else {
                    return Err(FormatError::unsupported(pattern_text, number.type_name()));
                };
                let width = precision.unwrap_or(0) as usize;
                let digits = format!("{:0width$}", v.unsigned_abs());
                if v < 0 { format!("-{digits}") } else { digits }
            }
            Standard::Hex { upper } => {
                let Number::Int(v) = number else {
                    return Err(FormatError::unsupported(pattern_text, number.type_name()));
                };
                let width = precision.unwrap_or(0) as usize;
                if upper {
                    format!("{v:0width$X}")
                } else {
                    format!("{v:0width$x}")
                }
            }
        },
    };

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(number: Number, pattern: &str) -> String {
        format_number(number, Some(pattern), &FormatOptions::default()).unwrap()
    }

    fn dec(num: i64, scale: u32) -> Number {
        Number::Decimal(Decimal::new(num, scale))
    }

    #[test]
    fn test_default_conversion() {
        let options = FormatOptions::default();
        assert_eq!(format_number(Number::Int(-42), None, &options).unwrap(), "-42");
        assert_eq!(format_number(dec(150, 2), None, &options).unwrap(), "1.50");
        assert_eq!(format_number(Number::Float(0.25), None, &options).unwrap(), "0.25");
        assert_eq!(fmt(Number::Float(2.5), "G"), "2.5");
    }

    #[test]
    fn test_number_specifier() {
        assert_eq!(fmt(Number::Int(1234567), "N"), "1,234,567.00");
        assert_eq!(fmt(dec(-12345678, 3), "N1"), "-12,345.7");
        assert_eq!(fmt(Number::Float(999.999), "N0"), "1,000");
        assert_eq!(fmt(Number::Int(12), "n0"), "12");
    }

    #[test]
    fn test_fixed_rounds_away_from_zero_for_decimals() {
        assert_eq!(fmt(dec(125, 2), "F1"), "1.3");
        assert_eq!(fmt(dec(-125, 2), "F1"), "-1.3");
        assert_eq!(fmt(dec(1, 3), "F2"), "0.00");
        assert_eq!(fmt(dec(-1, 3), "F2"), "0.00");
    }

    #[test]
    fn test_floats_round_like_decimals() {
        assert_eq!(fmt(Number::Float(2.5), "F0"), "3");
        assert_eq!(fmt(Number::Float(-2.5), "F0"), "-3");
        assert_eq!(fmt(Number::Float(0.125), "N2"), "0.13");
        assert_eq!(fmt(Number::Float(0.5), "0"), "1");
        for (float, decimal) in [(2.5, dec(25, 1)), (0.125, dec(125, 3)), (1.5, dec(15, 1))] {
            for pattern in ["F0", "N2", "0", "#,##0.0"] {
                assert_eq!(fmt(Number::Float(float), pattern), fmt(decimal, pattern));
            }
        }
    }

    #[test]
    fn test_decimal_and_hex_specifiers() {
        assert_eq!(fmt(Number::Int(42), "D5"), "00042");
        assert_eq!(fmt(Number::Int(-42), "D4"), "-0042");
        assert_eq!(fmt(Number::Int(255), "X"), "FF");
        assert_eq!(fmt(Number::Int(255), "x4"), "00ff");
    }

    #[test]
    fn test_integer_only_specifiers_reject_fractions() {
        let err = format_number(Number::Float(1.5), Some("D2"), &FormatOptions::default())
            .unwrap_err();
        assert!(matches!(err, FormatError::UnsupportedSpecifier { .. }));

        let err = format_number(dec(15, 1), Some("X"), &FormatOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::UnsupportedSpecifier { .. }));
    }

    #[test]
    fn test_percent_and_exponential() {
        assert_eq!(fmt(Number::Float(0.1234), "P1"), "12.3%");
        assert_eq!(fmt(dec(5, 1), "P0"), "50%");
        assert_eq!(fmt(Number::Float(1234.5678), "E2"), "1.23E+003");
        assert_eq!(fmt(Number::Float(-0.00012), "e1"), "-1.2e-004");
    }

    #[test]
    fn test_custom_patterns() {
        assert_eq!(fmt(Number::Float(1234.5), "#,##0.00"), "1,234.50");
        assert_eq!(fmt(Number::Int(7), "000"), "007");
        assert_eq!(fmt(Number::Float(0.5), "#.##"), ".5");
        assert_eq!(fmt(dec(12345, 2), "0.#"), "123.5");
        assert_eq!(fmt(Number::Int(3), "0.0 kg"), "3.0 kg");
        assert_eq!(fmt(dec(-995, 1), "$#,##0"), "-$100");
        assert_eq!(fmt(Number::Float(0.256), "0.0%"), "25.6%");
        assert_eq!(fmt(Number::Float(0.5), ".00"), ".50");
    }

    #[test]
    fn test_separators_from_options() {
        let options = FormatOptions::default()
            .with_decimal_separator(",")
            .with_group_separator(".");
        let text = format_number(Number::Float(1234.5), Some("N2"), &options).unwrap();
        assert_eq!(text, "1.234,50");
        let text = format_number(dec(25, 1), None, &options).unwrap();
        assert_eq!(text, "2,5");
    }

    #[test]
    fn test_invalid_patterns() {
        for pattern in ["Q2", "N123", "kg", "0.0.0", "0.0,0", "0 and 0"] {
            let result = format_number(Number::Int(1), Some(pattern), &FormatOptions::default());
            assert!(
                matches!(result, Err(FormatError::InvalidNumericPattern { .. })),
                "pattern {pattern:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_special_floats() {
        assert_eq!(fmt(Number::Float(f64::NAN), "N2"), "NaN");
        assert_eq!(fmt(Number::Float(f64::NEG_INFINITY), "F0"), "-Infinity");
    }
}
