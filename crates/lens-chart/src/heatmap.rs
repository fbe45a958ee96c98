//! Dense month × weekday heatmaps.
//!
//! Sales-by-day feeds arrive as sparse `(weekday, month, value)` tuples with
//! weekday labels in whatever form the backend produced. Weekdays go through
//! [`WeekdayNormalizer`]; months accept numbers (per [`MonthConvention`]),
//! month names, or date strings. Duplicate cells are summed and unobserved
//! cells stay at a neutral `0`.

use chrono::Datelike;
use lens_core::value::{as_integer, number_or_zero, parse_date};
use lens_core::{Degradation, FieldSource, HeatmapCell, IndexConvention, MonthConvention};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shapes::HeatmapView;
use crate::weekday::WeekdayNormalizer;

const MONTH_NAMES: &[(&str, u8)] = &[
    ("январь", 0),
    ("января", 0),
    ("янв", 0),
    ("февраль", 1),
    ("февраля", 1),
    ("фев", 1),
    ("март", 2),
    ("марта", 2),
    ("мар", 2),
    ("апрель", 3),
    ("апреля", 3),
    ("апр", 3),
    ("май", 4),
    ("мая", 4),
    ("июнь", 5),
    ("июня", 5),
    ("июн", 5),
    ("июль", 6),
    ("июля", 6),
    ("июл", 6),
    ("август", 7),
    ("августа", 7),
    ("авг", 7),
    ("сентябрь", 8),
    ("сентября", 8),
    ("сен", 8),
    ("октябрь", 9),
    ("октября", 9),
    ("окт", 9),
    ("ноябрь", 10),
    ("ноября", 10),
    ("ноя", 10),
    ("декабрь", 11),
    ("декабря", 11),
    ("дек", 11),
    ("january", 0),
    ("jan", 0),
    ("february", 1),
    ("feb", 1),
    ("march", 2),
    ("mar", 2),
    ("april", 3),
    ("apr", 3),
    ("may", 4),
    ("june", 5),
    ("jun", 5),
    ("july", 6),
    ("jul", 6),
    ("august", 7),
    ("aug", 7),
    ("september", 8),
    ("sep", 8),
    ("sept", 8),
    ("october", 9),
    ("oct", 9),
    ("november", 10),
    ("nov", 10),
    ("december", 11),
    ("dec", 11),
];

/// One raw observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HeatmapPoint {
    pub weekday: Value,
    pub month: Value,
    pub value: f64,
}

impl HeatmapPoint {
    pub fn new(weekday: impl Into<Value>, month: impl Into<Value>, value: f64) -> Self {
        Self {
            weekday: weekday.into(),
            month: month.into(),
            value,
        }
    }
}

/// How raw weekday and month numbers are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HeatmapOptions {
    pub index_convention: IndexConvention,
    pub month_convention: MonthConvention,
}

impl HeatmapOptions {
    #[must_use]
    pub const fn new(index_convention: IndexConvention, month_convention: MonthConvention) -> Self {
        Self {
            index_convention,
            month_convention,
        }
    }

    /// Matrix row `0..=11` for a raw month.
    #[must_use]
    pub fn month_index(&self, month: &Value) -> Option<u8> {
        match month {
            Value::Number(_) => as_integer(month).and_then(|m| self.month_convention.to_index(m)),
            Value::String(raw) => self.month_from_str(raw),
            _ => None,
        }
    }

    fn month_from_str(&self, raw: &str) -> Option<u8> {
        let cleaned = raw.trim().trim_end_matches('.').trim().to_lowercase();
        if cleaned.is_empty() {
            return None;
        }
        if let Ok(n) = cleaned.parse::<i64>() {
            return self.month_convention.to_index(n);
        }
        if let Some((_, idx)) = MONTH_NAMES.iter().find(|(name, _)| *name == cleaned) {
            return Some(*idx);
        }
        parse_date(raw).and_then(|date| u8::try_from(date.month0()).ok())
    }
}

/// Extract heatmap points from records by field name.
///
/// Missing values read as `0`; missing weekdays and months stay `null` and are
/// resolved (or dropped) by [`build_heatmap`].
pub fn heatmap_points<T: FieldSource>(
    records: &[T],
    weekday_field: &str,
    month_field: &str,
    value_field: &str,
) -> Vec<HeatmapPoint> {
    records
        .iter()
        .map(|record| HeatmapPoint {
            weekday: record.field(weekday_field).cloned().unwrap_or(Value::Null),
            month: record.field(month_field).cloned().unwrap_or(Value::Null),
            value: number_or_zero(record.field(value_field)),
        })
        .collect()
}

/// Canonicalize raw points and build the dense matrix.
#[must_use]
pub fn build_heatmap(points: &[HeatmapPoint], options: &HeatmapOptions) -> HeatmapView {
    let normalizer = WeekdayNormalizer::new(options.index_convention);
    let mut cells = Vec::with_capacity(points.len());
    let mut unrecognized = 0;
    let mut dropped = 0;

    for (position, point) in points.iter().enumerate() {
        let weekday = normalizer.classify(&point.weekday, position);
        if !weekday.is_recognized() {
            unrecognized += 1;
        }
        let Some(month_index) = options.month_index(&point.month) else {
            Degradation::SchemaMismatch.report(&format!(
                "unresolvable month {} at position {position}",
                point.month
            ));
            dropped += 1;
            continue;
        };
        cells.push(HeatmapCell {
            month_index,
            weekday_index: weekday.index() - 1,
            value: point.value,
        });
    }

    let mut view = build_heatmap_cells(&cells);
    view.unrecognized_weekdays = unrecognized;
    view.dropped_points += dropped;
    tracing::debug!(
        points = points.len(),
        unrecognized_weekdays = view.unrecognized_weekdays,
        dropped_points = view.dropped_points,
        "heatmap built"
    );
    view
}

/// Build the dense matrix from already-canonical cells.
///
/// Out-of-bounds cells are counted in `dropped_points`. Non-finite values
/// count as `0`.
#[must_use]
pub fn build_heatmap_cells(cells: &[HeatmapCell]) -> HeatmapView {
    let mut view = HeatmapView::empty();
    let mut populated = [[false; 7]; 12];

    for cell in cells {
        if !cell.in_bounds() {
            view.dropped_points += 1;
            continue;
        }
        let m = usize::from(cell.month_index);
        let w = usize::from(cell.weekday_index);
        if cell.value.is_finite() {
            view.values[m][w] += cell.value;
        }
        populated[m][w] = true;
    }

    let observed: Vec<f64> = populated
        .iter()
        .enumerate()
        .flat_map(|(m, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, hit)| **hit)
                .map(move |(w, _)| (m, w))
        })
        .map(|(m, w)| view.values[m][w])
        .collect();

    if observed.is_empty() {
        Degradation::EmptyInput.report("heatmap without populated cells");
        return view;
    }

    view.has_data = true;
    view.min = observed.iter().copied().fold(f64::INFINITY, f64::min);
    view.max = observed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    view
}
