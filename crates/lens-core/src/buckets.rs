//! Units of aggregated chart data.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One labelled value of a categorical or ranking aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bucket {
    pub label: String,
    pub value: f64,
}

impl Bucket {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// One canonical cell of the month × weekday heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HeatmapCell {
    /// `0` (January) ..= `11` (December).
    pub month_index: u8,
    /// `0` (Monday) ..= `6` (Sunday).
    pub weekday_index: u8,
    pub value: f64,
}

impl HeatmapCell {
    /// Whether both indices fall inside the 12 × 7 matrix.
    #[must_use]
    pub const fn in_bounds(&self) -> bool {
        self.month_index < 12 && self.weekday_index < 7
    }
}
