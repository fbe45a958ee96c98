//! Radar charts comparing metrics that live on different scales.
//!
//! Revenue in the millions and percentages in `0..100` cannot share an axis
//! as-is. Each axis has a fixed ceiling; values are scaled to a percentage of
//! it and clamped to `[0, 100]`.

use lens_core::value::number_or_zero;
use lens_core::{AxisSpec, Degradation, FieldSource};

use crate::shapes::{ChartView, Dataset};

/// `value / ceiling * 100`, clamped to `[0, 100]`.
///
/// A non-positive or non-finite ceiling, or a non-finite value, scales to `0`.
#[must_use]
pub fn scale_to_ceiling(value: f64, ceiling: f64) -> f64 {
    if !ceiling.is_finite() || ceiling <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value * 100.0 / ceiling).clamp(0.0, 100.0)
}

/// One dataset per record, one point per axis.
///
/// `label_fn` names each dataset (usually the brand or seller name).
pub fn normalize_multi_axis<T, L>(records: &[T], axes: &[AxisSpec], label_fn: L) -> ChartView
where
    T: FieldSource,
    L: Fn(&T) -> String,
{
    if records.is_empty() || axes.is_empty() {
        Degradation::EmptyInput.report("radar without records or axes");
        return ChartView::empty();
    }

    let datasets: Vec<Dataset> = records
        .iter()
        .map(|record| Dataset {
            label: label_fn(record),
            data: axes
                .iter()
                .map(|axis| {
                    scale_to_ceiling(number_or_zero(record.field(&axis.field)), axis.ceiling)
                })
                .collect(),
        })
        .collect();

    ChartView {
        has_data: datasets.iter().any(|d| d.data.iter().any(|v| *v > 0.0)),
        labels: axes.iter().map(|axis| axis.label.clone()).collect(),
        datasets,
    }
}
