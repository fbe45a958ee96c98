//! Sparkline series from paired `dates[]` / `values[]` arrays.
//!
//! Product and seller records carry their history inline as two parallel
//! arrays. A series is only produced when both arrays exist and have the same
//! non-zero length; anything else yields [`TimeSeries::no_data`] rather than a
//! misaligned chart.

use lens_core::value::{as_number, as_text};
use lens_core::{Degradation, FieldSource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shapes::TimeSeries;

/// Names of the paired arrays inside a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SeriesFields {
    pub dates: String,
    pub values: String,
}

impl Default for SeriesFields {
    fn default() -> Self {
        Self {
            dates: "dates".to_string(),
            values: "values".to_string(),
        }
    }
}

impl SeriesFields {
    pub fn new(dates: impl Into<String>, values: impl Into<String>) -> Self {
        Self {
            dates: dates.into(),
            values: values.into(),
        }
    }
}

/// Series from the record's `dates` and `values` arrays.
pub fn build_time_series<T: FieldSource>(record: &T) -> TimeSeries {
    build_time_series_with(record, &SeriesFields::default())
}

/// Series from custom array names. Non-numeric values read as `0`.
pub fn build_time_series_with<T: FieldSource>(record: &T, fields: &SeriesFields) -> TimeSeries {
    let (Some(Value::Array(dates)), Some(Value::Array(values))) =
        (record.field(&fields.dates), record.field(&fields.values))
    else {
        Degradation::MalformedSeries.report(&format!(
            "`{}` / `{}` missing or not arrays",
            fields.dates, fields.values
        ));
        return TimeSeries::no_data();
    };

    if dates.is_empty() || dates.len() != values.len() {
        Degradation::MalformedSeries.report(&format!(
            "{} dates vs {} values",
            dates.len(),
            values.len()
        ));
        return TimeSeries::no_data();
    }

    TimeSeries {
        has_data: true,
        labels: dates
            .iter()
            .map(|d| as_text(d).map(|t| t.into_owned()).unwrap_or_default())
            .collect(),
        values: values.iter().map(|v| as_number(v).unwrap_or(0.0)).collect(),
    }
}

/// One sparkline per record, aligned with the input.
pub fn sparklines<T: FieldSource>(records: &[T], fields: &SeriesFields) -> Vec<TimeSeries> {
    records
        .iter()
        .map(|record| build_time_series_with(record, fields))
        .collect()
}
