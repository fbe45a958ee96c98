//! Stable total ordering of records by one field.
//!
//! Rules carried over from the dashboard tables:
//! - numeric comparison reads missing and non-numeric values as `0`;
//! - text comparison is codepoint order unless [`TextCase::Insensitive`] is
//!   requested, and reads missing values as the empty string;
//! - `desc` is the mirror of `asc`, and the sort is stable, so equal keys keep
//!   their original relative order in both directions.
//!
//! With [`SortKind::Auto`] the comparator is chosen once per column, never per
//! pair, so mixed columns still get a total order.

use std::cmp::Ordering;

use lens_core::value::{as_number, is_non_numeric_text};
use lens_core::{FieldSource, SortDirection, TextCase};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which comparator a sort uses.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    /// Numeric if any present value reads as a number, text if the column only
    /// holds non-numeric strings.
    #[default]
    Auto,
    Numeric,
    Text,
}

/// Field, direction and comparator of a table sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub kind: SortKind,
    #[serde(default)]
    pub case: TextCase,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
            kind: SortKind::Auto,
            case: TextCase::Sensitive,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: SortKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn ignore_case(mut self) -> Self {
        self.case = TextCase::Insensitive;
        self
    }

    /// Parse `field`, `field:asc` or `field:desc`.
    ///
    /// # Errors
    ///
    /// Returns a message when the field is empty or the direction is unknown.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (field, direction) = match raw.rsplit_once(':') {
            Some((field, dir)) => (field, dir.parse::<SortDirection>()?),
            None => (raw, SortDirection::Asc),
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(format!("sort spec '{raw}' has no field"));
        }
        Ok(Self::new(field, direction))
    }
}

enum SortKey {
    Number(f64),
    Text(String),
}

fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        // Keys come from `as_number`, which only yields finite values.
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    }
}

const fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn resolve_kind<T: FieldSource>(records: &[T], spec: &SortSpec) -> SortKind {
    match spec.kind {
        SortKind::Auto => {
            let values = || records.iter().filter_map(|r| r.field(&spec.field));
            let numeric = values().any(|v| as_number(v).is_some());
            if !numeric && values().any(is_non_numeric_text) {
                SortKind::Text
            } else {
                SortKind::Numeric
            }
        }
        explicit => explicit,
    }
}

fn key_for<T: FieldSource>(record: &T, spec: &SortSpec, kind: SortKind) -> SortKey {
    if kind == SortKind::Text {
        let text = record.text(&spec.field).unwrap_or_default();
        return SortKey::Text(match spec.case {
            TextCase::Sensitive => text.into_owned(),
            TextCase::Insensitive => text.to_lowercase(),
        });
    }
    SortKey::Number(record.number(&spec.field).unwrap_or(0.0))
}

/// Return a new sequence ordered by `spec`. The input is untouched.
#[must_use]
pub fn sort_records<T: FieldSource + Clone>(records: &[T], spec: &SortSpec) -> Vec<T> {
    let kind = resolve_kind(records, spec);
    let mut keyed: Vec<(SortKey, &T)> = records
        .iter()
        .map(|r| (key_for(r, spec, kind), r))
        .collect();

    // `sort_by` is stable; ties keep input order.
    keyed.sort_by(|(a, _), (b, _)| directed(compare_keys(a, b), spec.direction));
    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

/// Sort by `field` in `direction`, choosing the comparator automatically.
#[must_use]
pub fn sort_records_by<T: FieldSource + Clone>(
    records: &[T],
    field: &str,
    direction: SortDirection,
) -> Vec<T> {
    sort_records(records, &SortSpec::new(field, direction))
}

/// Sort by a caller-supplied key.
pub fn sort_by_key_fn<T: Clone, K: Ord>(
    records: &[T],
    key_fn: impl Fn(&T) -> K,
    direction: SortDirection,
) -> Vec<T> {
    let mut keyed: Vec<(K, &T)> = records.iter().map(|r| (key_fn(r), r)).collect();
    keyed.sort_by(|(a, _), (b, _)| directed(a.cmp(b), direction));
    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

/// Sort by a caller-supplied numeric key; `None` and non-finite read as `0`.
pub fn sort_by_number<T: Clone>(
    records: &[T],
    key_fn: impl Fn(&T) -> Option<f64>,
    direction: SortDirection,
) -> Vec<T> {
    let mut keyed: Vec<(SortKey, &T)> = records
        .iter()
        .map(|r| {
            let n = key_fn(r).filter(|v| v.is_finite()).unwrap_or(0.0);
            (SortKey::Number(n), r)
        })
        .collect();
    keyed.sort_by(|(a, _), (b, _)| directed(compare_keys(a, b), direction));
    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}
