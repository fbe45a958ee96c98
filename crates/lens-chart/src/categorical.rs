//! Categorical distributions and top-N rankings.
//!
//! Keys come from caller-supplied extractors, so a chart can group by a field
//! ([`field_key`]) or by anything derived from a record (a price band, a
//! brand prefix). Buckets are ordered by descending value; ties keep the order
//! in which each key was first seen.

use std::collections::HashMap;

use lens_core::{Bucket, Degradation, FieldSource};
use lens_core::value::{as_text, number_or_zero};

/// Label given to records whose grouping field is missing or null.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Key extractor reading `name` as text, with missing values grouped under
/// [`UNKNOWN_LABEL`].
pub fn field_key<T: FieldSource>(name: &str) -> impl Fn(&T) -> String + '_ {
    move |record: &T| {
        record
            .field(name)
            .and_then(as_text)
            .map_or_else(|| UNKNOWN_LABEL.to_string(), |text| text.into_owned())
    }
}

/// Measure extractor reading `name` as a number, `0` when missing or non-numeric.
pub fn field_measure<T: FieldSource>(name: &str) -> impl Fn(&T) -> f64 + '_ {
    move |record: &T| number_or_zero(record.field(name))
}

/// Count records per key.
pub fn aggregate_categorical<T, K>(records: &[T], key_fn: K) -> Vec<Bucket>
where
    K: Fn(&T) -> String,
{
    aggregate_weighted(records, key_fn, |_| 1.0)
}

/// Sum `value_fn` per key. Non-finite measures count as `0`.
pub fn aggregate_weighted<T, K, V>(records: &[T], key_fn: K, value_fn: V) -> Vec<Bucket>
where
    K: Fn(&T) -> String,
    V: Fn(&T) -> f64,
{
    if records.is_empty() {
        Degradation::EmptyInput.report("categorical aggregation over no records");
        return Vec::new();
    }

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<Bucket> = Vec::new();

    for record in records {
        let label = key_fn(record);
        let measure = value_fn(record);
        let measure = if measure.is_finite() { measure } else { 0.0 };

        if let Some(&idx) = positions.get(&label) {
            buckets[idx].value += measure;
        } else {
            positions.insert(label.clone(), buckets.len());
            buckets.push(Bucket::new(label, measure));
        }
    }

    // Stable: equal values keep first-seen order.
    buckets.sort_by(|a, b| b.value.total_cmp(&a.value));
    buckets
}

/// The `n` most frequent keys.
///
/// Ranking is computed here and never reuses a table's sort configuration.
pub fn top_n<T, K>(records: &[T], key_fn: K, n: usize) -> Vec<Bucket>
where
    K: Fn(&T) -> String,
{
    let mut buckets = aggregate_categorical(records, key_fn);
    buckets.truncate(n);
    buckets
}

/// The `n` keys with the largest summed measure.
pub fn top_n_weighted<T, K, V>(records: &[T], key_fn: K, value_fn: V, n: usize) -> Vec<Bucket>
where
    K: Fn(&T) -> String,
    V: Fn(&T) -> f64,
{
    let mut buckets = aggregate_weighted(records, key_fn, value_fn);
    buckets.truncate(n);
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_core::Record;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sellers() -> Vec<Record> {
        serde_json::from_value(json!([
            {"brand": "B", "revenue": 10},
            {"brand": "A", "revenue": 50},
            {"brand": "B", "revenue": 5},
            {"brand": null, "revenue": 7},
            {"brand": "C", "revenue": "20"},
            {"revenue": 1},
            {"brand": "A"}
        ]))
        .unwrap()
    }

    #[test]
    fn counts_sum_to_record_count() {
        let records = sellers();
        let buckets = aggregate_categorical(&records, field_key("brand"));
        let total: f64 = buckets.iter().map(|b| b.value).sum();
        assert!((total - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let buckets = aggregate_categorical(&sellers(), field_key("brand"));
        assert_eq!(
            buckets,
            vec![
                Bucket::new("B", 2.0),
                Bucket::new("A", 2.0),
                Bucket::new(UNKNOWN_LABEL, 2.0),
                Bucket::new("C", 1.0),
            ]
        );
    }

    #[test]
    fn weighted_sums_measure() {
        let buckets = aggregate_weighted(&sellers(), field_key("brand"), field_measure("revenue"));
        assert_eq!(
            buckets,
            vec![
                Bucket::new("A", 50.0),
                Bucket::new("C", 20.0),
                Bucket::new("B", 15.0),
                Bucket::new(UNKNOWN_LABEL, 8.0),
            ]
        );
    }

    #[test]
    fn closure_keys() {
        let records = sellers();
        let band = |r: &Record| {
            if r.number("revenue").unwrap_or(0.0) >= 10.0 {
                "high".to_string()
            } else {
                "low".to_string()
            }
        };
        let buckets = aggregate_categorical(&records, band);
        assert_eq!(
            buckets,
            vec![Bucket::new("low", 4.0), Bucket::new("high", 3.0)]
        );
    }

    #[test]
    fn top_n_truncates() {
        let records = sellers();
        assert_eq!(top_n(&records, field_key("brand"), 2).len(), 2);
        assert_eq!(top_n(&records, field_key("brand"), 0), Vec::new());
        assert_eq!(top_n(&records, field_key("brand"), 99).len(), 4);

        let top = top_n_weighted(&records, field_key("brand"), field_measure("revenue"), 1);
        assert_eq!(top, vec![Bucket::new("A", 50.0)]);
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        let none: Vec<Record> = Vec::new();
        assert!(aggregate_categorical(&none, field_key("brand")).is_empty());
    }

    #[test]
    fn non_finite_measures_count_as_zero() {
        let records = sellers();
        let buckets = aggregate_weighted(&records[..1], field_key("brand"), |_| f64::NAN);
        assert_eq!(buckets, vec![Bucket::new("B", 0.0)]);
    }
}
