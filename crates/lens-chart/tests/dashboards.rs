//! Charts and tables derived from the same snapshot must tell the same story.

use lens_chart::{
    ChartView, HeatmapOptions, aggregate_categorical, build_heatmap, field_key, heatmap_points,
    normalize_weekday, percentage_shares, top_n,
};
use lens_core::{FieldSource, Record, RecordSet};
use lens_view::{FilterCriterion, SortSpec, ViewConfig, derive_rows, derive_table};
use pretty_assertions::assert_eq;
use serde_json::json;

fn brand_feed() -> RecordSet {
    let brands = ["A", "B", "B", "A", "B", "B", "A", "B", "B", "B"];
    brands
        .iter()
        .enumerate()
        .map(|(i, brand)| {
            Record::default()
                .with("id", i)
                .with("brand", *brand)
                .with("revenue", (i + 1) * 1000)
        })
        .collect()
}

fn share_of(buckets: &[lens_core::Bucket], label: &str) -> f64 {
    buckets
        .iter()
        .find(|b| b.label == label)
        .map_or(f64::NAN, |b| b.value)
}

#[test]
fn brand_share_scenario() {
    let set = brand_feed();
    let counts = aggregate_categorical(set.records(), field_key("brand"));
    let shares = percentage_shares(&counts);

    assert!((share_of(&shares, "A") - 30.0).abs() < 1e-9);
    assert!((share_of(&shares, "B") - 70.0).abs() < 1e-9);

    let chart = ChartView::from_buckets("Share, %", &shares);
    assert!(chart.has_data);
    assert_eq!(chart.labels, vec!["B", "A"]);
}

#[test]
fn chart_over_filtered_rows_matches_table_total() {
    let set = brand_feed();
    let config = ViewConfig::with_page_size(3)
        .filter(FilterCriterion::range("revenue", Some(4000.0), None))
        .sorted(SortSpec::desc("revenue"));

    let rows = derive_rows(&set, &config);
    let page = derive_table(&set, &config);
    let buckets = aggregate_categorical(&rows, field_key("brand"));

    let counted: f64 = buckets.iter().map(|b| b.value).sum();
    let total = f64::from(u32::try_from(page.total_items).unwrap());
    assert!((counted - total).abs() < 1e-9);
}

#[test]
fn top_n_ignores_table_sort() {
    let set = brand_feed();
    let rows = derive_rows(&set, &ViewConfig::default().sorted(SortSpec::asc("brand")));
    let top = top_n(&rows, field_key("brand"), 1);
    assert_eq!(top[0].label, "B");
}

#[test]
fn weekday_normalization_is_total() {
    let inputs = [
        json!("Пн"),
        json!("Понедельник"),
        json!("пн"),
        json!(0),
        json!(1),
        json!("unknown"),
    ];
    for (position, input) in inputs.iter().enumerate() {
        assert!((1..=7).contains(&normalize_weekday(input, position)));
    }
}

#[test]
fn heatmap_from_sales_feed() {
    let set = RecordSet::from_json(json!([
        {"weekday": "Пн", "month": "2024-01-08", "orders": 4},
        {"weekday": "пн", "month": "2024-01-15", "orders": 6},
        {"weekday": "Сб", "month": 6, "orders": 2},
        {"weekday": "??", "month": 6, "orders": 1}
    ]))
    .unwrap();

    let points = heatmap_points(set.records(), "weekday", "month", "orders");
    let view = build_heatmap(&points, &HeatmapOptions::default());

    assert!((view.cell(0, 0) - 10.0).abs() < 1e-9);
    assert!((view.cell(5, 5) - 2.0).abs() < 1e-9);
    // position 3 falls back to Thursday.
    assert!((view.cell(5, 3) - 1.0).abs() < 1e-9);
    assert_eq!(view.unrecognized_weekdays, 1);
    assert!((view.max - 10.0).abs() < 1e-9);
    assert!((view.min - 1.0).abs() < 1e-9);
    assert_eq!(set.records()[0].text("weekday").as_deref(), Some("Пн"));
}
