//! Algebraic properties of the table pipeline over a realistic product feed.

use lens_core::{FieldSource, Record, RecordSet, SortDirection};
use lens_view::{
    FilterCriterion, Page, SortSpec, ViewConfig, derive_table, filter_records, paginate,
    sort_records, sort_records_by,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn feed() -> Vec<Record> {
    serde_json::from_value(json!([
        {"id": 1, "name": "Крем для рук", "brand": "Nivea", "revenue": 120000, "rating": 4.8, "fbs": true},
        {"id": 2, "name": "Шампунь", "brand": "Head&Shoulders", "revenue": 98000, "rating": 4.5, "fbs": false},
        {"id": 3, "name": "Крем для лица", "brand": "Nivea", "revenue": null, "rating": 4.9, "fbs": true},
        {"id": 4, "name": "Бальзам", "brand": "Pantene", "revenue": 98000, "fbs": true},
        {"id": 5, "name": "Крем-мыло", "brand": "Dove", "revenue": "45000", "rating": 4.1},
        {"id": 6, "name": "Гель для душа", "brand": "Dove", "revenue": 300000, "rating": 4.5, "fbs": false}
    ]))
    .unwrap()
}

fn ids(records: &[Record]) -> Vec<f64> {
    records.iter().filter_map(|r| r.number("id")).collect()
}

fn criteria_a() -> Vec<FilterCriterion> {
    vec![FilterCriterion::contains("name", "крем")]
}

fn criteria_b() -> Vec<FilterCriterion> {
    vec![
        FilterCriterion::one_of("brand", ["Nivea", "Dove"]),
        FilterCriterion::range("rating", Some(4.5), None),
    ]
}

#[test]
fn filtering_twice_equals_filtering_by_the_conjunction() {
    let r = feed();
    let sequential = filter_records(&filter_records(&r, &criteria_a()), &criteria_b());
    let combined: Vec<FilterCriterion> = criteria_a().into_iter().chain(criteria_b()).collect();
    assert_eq!(sequential, filter_records(&r, &combined));
    assert_eq!(ids(&sequential), vec![1.0, 3.0]);
}

#[test]
fn filter_order_does_not_matter() {
    let r = feed();
    let ab = filter_records(&filter_records(&r, &criteria_a()), &criteria_b());
    let ba = filter_records(&filter_records(&r, &criteria_b()), &criteria_a());
    assert_eq!(ab, ba);
}

#[test]
fn empty_criteria_is_identity() {
    let r = feed();
    assert_eq!(filter_records(&r, &[]), r);
}

#[test]
fn sort_scenario_null_is_zero() {
    let input: Vec<Record> =
        serde_json::from_value(json!([{"x": 5}, {"x": null}, {"x": 2}])).unwrap();
    let expected: Vec<Record> =
        serde_json::from_value(json!([{"x": 5}, {"x": 2}, {"x": null}])).unwrap();
    assert_eq!(sort_records_by(&input, "x", SortDirection::Desc), expected);
}

#[rstest]
#[case("revenue")]
#[case("rating")]
#[case("brand")]
#[case("missing")]
fn sort_is_idempotent(#[case] field: &str) {
    let r = feed();
    for direction in [SortDirection::Asc, SortDirection::Desc] {
        let once = sort_records_by(&r, field, direction);
        assert_eq!(sort_records_by(&once, field, direction), once);
    }
}

#[test]
fn reversing_direction_reverses_only_untied_order() {
    let r = feed();
    let asc = sort_records_by(&r, "revenue", SortDirection::Asc);
    let desc = sort_records_by(&r, "revenue", SortDirection::Desc);

    // null reads as 0; "45000" is numeric; ids 2 and 4 tie at 98000.
    assert_eq!(ids(&asc), vec![3.0, 5.0, 2.0, 4.0, 1.0, 6.0]);
    assert_eq!(ids(&desc), vec![6.0, 1.0, 2.0, 4.0, 5.0, 3.0]);
}

#[test]
fn text_sort_is_stable_on_ties() {
    let r = feed();
    let out = sort_records(&r, &SortSpec::asc("brand"));
    assert_eq!(ids(&out), vec![5.0, 6.0, 2.0, 1.0, 3.0, 4.0]);
}

#[rstest]
#[case(i64::MIN)]
#[case(-1)]
#[case(0)]
#[case(1)]
#[case(3)]
#[case(4)]
#[case(1_000_000)]
fn paginate_always_clamps(#[case] page: i64) {
    let r = feed();
    let result = paginate(&r, page, 4);
    assert_eq!(result.total_pages, 2);
    assert!((1..=2).contains(&result.current_page));
    assert!(!result.items.is_empty());
}

#[test]
fn paginate_empty_scenario() {
    let empty: Vec<Record> = Vec::new();
    let page = paginate(&empty, 5, 10);
    assert_eq!(
        page,
        Page {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            page_size: 10,
        }
    );
}

#[test]
fn table_view_never_disagrees_with_its_snapshot() {
    let set = RecordSet::new(feed());
    let config = ViewConfig::with_page_size(2)
        .filter(FilterCriterion::contains("name", "крем"))
        .sorted(SortSpec::desc("rating"));
    let page = derive_table(&set, &config);
    assert_eq!(ids(&page.items), vec![3.0, 1.0]);
    assert_eq!(page.total_items, 3);

    let names: Vec<Value> = page
        .items
        .iter()
        .map(|r| r.field("name").cloned().unwrap_or(Value::Null))
        .collect();
    assert_eq!(names, vec![json!("Крем для лица"), json!("Крем для рук")]);
}
