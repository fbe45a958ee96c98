//! # lens-chart
//!
//! Aggregation engine for Marketlens charts.
//!
//! Turns a [`lens_core::RecordSet`] (or any slice of [`lens_core::FieldSource`]s)
//! into chart-ready data:
//! - categorical distributions and top-N rankings ([`categorical`])
//! - percentage shares that always add up ([`shares`])
//! - sparkline / line series from paired date and value arrays ([`series`])
//! - radar comparison of metrics on different scales ([`radar`])
//! - dense month × weekday heatmaps ([`heatmap`]) with weekday labels
//!   canonicalized by [`weekday`]
//!
//! Every function is pure and total. Malformed or empty input never errors;
//! it yields an empty dataset with `has_data == false`.

pub mod categorical;
pub mod heatmap;
pub mod radar;
pub mod series;
pub mod shapes;
pub mod shares;
pub mod weekday;

pub use categorical::{
    UNKNOWN_LABEL, aggregate_categorical, aggregate_weighted, field_key, field_measure, top_n,
    top_n_weighted,
};
pub use heatmap::{HeatmapOptions, HeatmapPoint, build_heatmap, build_heatmap_cells, heatmap_points};
pub use radar::{normalize_multi_axis, scale_to_ceiling};
pub use series::{SeriesFields, build_time_series, build_time_series_with, sparklines};
pub use shapes::{ChartView, Dataset, HeatmapView, TimeSeries};
pub use shares::{percentage_shares, percentage_shares_with};
pub use weekday::{
    WeekdayInput, WeekdayMatch, WeekdayNormalizer, classify_weekday, normalize_weekday,
};
