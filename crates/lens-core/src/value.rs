//! Coercion rules for semi-structured field values.
//!
//! Every stage reads fields through these helpers so that filtering, sorting
//! and aggregation agree on what counts as a number, a text, or a date.
//!
//! - **Numeric**: JSON numbers, and strings that parse to a finite `f64`
//!   after trimming. Everything else is non-numeric.
//! - **Text**: strings verbatim; numbers and booleans via their JSON display.
//!   `null`, arrays and objects have no text form.
//! - **Date**: strings in `YYYY-MM-DD`, RFC 3339, or `YYYY-MM-DD HH:MM:SS`
//!   form, reduced to a calendar date.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Read a value as a finite number.
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Read a JSON number as an integer. Integral floats such as `1.0` count;
/// fractional and out-of-range values do not.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
            .map(|v| v as i64)
    })
}

/// Read an optional value as a number, treating missing and non-numeric as `0`.
#[must_use]
pub fn number_or_zero(value: Option<&Value>) -> f64 {
    value.and_then(as_number).unwrap_or(0.0)
}

/// Read a value as text.
#[must_use]
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Whether a string value is present but cannot be read as a number.
#[must_use]
pub fn is_non_numeric_text(value: &Value) -> bool {
    matches!(value, Value::String(_)) && as_number(value).is_none()
}

/// Read a date-string as a calendar date.
#[must_use]
pub fn as_date(value: &Value) -> Option<NaiveDate> {
    let Value::String(raw) = value else {
        return None;
    };
    parse_date(raw)
}

/// Parse the date formats emitted by the analytics feeds.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    const FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Equality used by set-membership: numbers compare numerically, everything
/// else structurally.
///
/// Integers compare exactly; any other pair compares as `f64`, so `1 == 1.0`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (exact_integer(x), exact_integer(y)) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64().zip(y.as_f64()).is_some_and(|(x, y)| x == y),
        },
        _ => a == b,
    }
}

fn exact_integer(n: &serde_json::Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}
