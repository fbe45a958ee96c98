//! Axis definitions for radar-style multi-metric comparison.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One axis of a multi-axis comparison.
///
/// The axis reads `field` from each record and scales it against `ceiling`,
/// so metrics on wildly different scales (revenue vs. percentages) share one
/// `[0, 100]` chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AxisSpec {
    /// Axis caption shown by the chart.
    pub label: String,
    /// Record field holding the raw metric.
    pub field: String,
    /// Raw value that maps to `100`.
    pub ceiling: f64,
}

impl AxisSpec {
    #[must_use]
    pub fn new(label: impl Into<String>, field: impl Into<String>, ceiling: f64) -> Self {
        Self {
            label: label.into(),
            field: field.into(),
            ceiling,
        }
    }
}

/// The seller-comparison axes: revenue, growth %, monopoly %, ad %, item count.
#[must_use]
pub fn default_axes() -> Vec<AxisSpec> {
    vec![
        AxisSpec::new("Revenue", "revenue", 10_000_000.0),
        AxisSpec::new("Growth, %", "growth_percent", 100.0),
        AxisSpec::new("Monopoly, %", "monopoly_percent", 100.0),
        AxisSpec::new("Ads, %", "ad_percent", 100.0),
        AxisSpec::new("Items", "items_count", 1_000.0),
    ]
}
