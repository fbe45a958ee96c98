//! Data shapes handed to the charting layer.
//!
//! The charting UI only needs labels, datasets and a `has_data` flag deciding
//! between the chart and an empty-state message. Colors, legends and tooltips
//! are the renderer's business.

use lens_core::Bucket;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One series of a bar, line, pie or radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Labels plus one or more aligned datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartView {
    pub has_data: bool,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartView {
    /// Nothing to render.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single-dataset chart from buckets.
    ///
    /// `has_data` is false when there are no buckets or every value is zero,
    /// since a pie of zeros draws nothing.
    #[must_use]
    pub fn from_buckets(series_label: impl Into<String>, buckets: &[Bucket]) -> Self {
        let has_data = buckets.iter().any(|b| b.value != 0.0);
        Self {
            has_data,
            labels: buckets.iter().map(|b| b.label.clone()).collect(),
            datasets: vec![Dataset {
                label: series_label.into(),
                data: buckets.iter().map(|b| b.value).collect(),
            }],
        }
    }
}

/// A date-indexed series for sparklines and line charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimeSeries {
    pub has_data: bool,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    /// The `{has_data: false}` sentinel.
    #[must_use]
    pub fn no_data() -> Self {
        Self::default()
    }

    /// Wrap the series as a one-dataset line chart.
    #[must_use]
    pub fn to_chart(&self, series_label: impl Into<String>) -> ChartView {
        if !self.has_data {
            return ChartView::empty();
        }
        ChartView {
            has_data: true,
            labels: self.labels.clone(),
            datasets: vec![Dataset {
                label: series_label.into(),
                data: self.values.clone(),
            }],
        }
    }
}

/// Dense month × weekday matrix for calendar heatmaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HeatmapView {
    pub has_data: bool,
    /// Row captions, `1` (January) ..= `12`.
    pub months: Vec<u8>,
    /// Column captions, `1` (Monday) ..= `7`.
    pub weekdays: Vec<u8>,
    /// `values[month_index][weekday_index]`, 12 × 7, unobserved cells `0`.
    pub values: Vec<Vec<f64>>,
    /// Smallest populated cell, for color-scale calibration.
    pub min: f64,
    /// Largest populated cell.
    pub max: f64,
    /// Points whose weekday fell back to its input position.
    pub unrecognized_weekdays: usize,
    /// Points dropped because their month could not be resolved.
    pub dropped_points: usize,
}

impl HeatmapView {
    /// An all-zero matrix with `has_data == false`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            has_data: false,
            months: (1..=12).collect(),
            weekdays: (1..=7).collect(),
            values: vec![vec![0.0; 7]; 12],
            min: 0.0,
            max: 0.0,
            unrecognized_weekdays: 0,
            dropped_points: 0,
        }
    }

    /// Value at a canonical cell, `0` outside the matrix.
    #[must_use]
    pub fn cell(&self, month_index: usize, weekday_index: usize) -> f64 {
        self.values
            .get(month_index)
            .and_then(|row| row.get(weekday_index))
            .copied()
            .unwrap_or(0.0)
    }
}
