//! Field-level predicates combined by logical AND.
//!
//! A record is kept when it satisfies every criterion. The result is a stable
//! subsequence of the input. Criteria with an empty operand are inactive and
//! match everything, which is how a cleared search box or an untouched range
//! input behaves. An active criterion on a field the record lacks simply
//! fails; heterogeneous endpoint schemas are expected, not errors.

use chrono::NaiveDate;
use lens_core::value::{as_date, as_number, as_text, values_equal};
use lens_core::{Degradation, FieldSource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One predicate over a named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "operator", rename_all = "snake_case")]
pub enum FilterCriterion {
    /// Case-insensitive substring containment in the field's text form.
    Substring { field: String, needle: String },
    /// Inclusive numeric range; either bound may be omitted.
    Range {
        field: String,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    /// Exact membership in an allowed set (enum and boolean fields).
    OneOf { field: String, values: Vec<Value> },
    /// Inclusive calendar-date range over date-string fields.
    DateRange {
        field: String,
        #[serde(default)]
        from: Option<NaiveDate>,
        #[serde(default)]
        to: Option<NaiveDate>,
    },
}

enum Verdict {
    Pass,
    Fail,
    Missing,
}

impl FilterCriterion {
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::Substring {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::Range {
            field: field.into(),
            min,
            max,
        }
    }

    pub fn one_of<V: Into<Value>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::OneOf {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn date_range(
        field: impl Into<String>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        Self::DateRange {
            field: field.into(),
            from,
            to,
        }
    }

    /// The field this criterion reads.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Substring { field, .. }
            | Self::Range { field, .. }
            | Self::OneOf { field, .. }
            | Self::DateRange { field, .. } => field,
        }
    }

    /// Whether the operand constrains anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Substring { needle, .. } => !needle.trim().is_empty(),
            Self::Range { min, max, .. } => min.is_some() || max.is_some(),
            Self::OneOf { values, .. } => !values.is_empty(),
            Self::DateRange { from, to, .. } => from.is_some() || to.is_some(),
        }
    }

    /// Whether `record` satisfies this criterion.
    pub fn matches(&self, record: &impl FieldSource) -> bool {
        matches!(self.evaluate(record), Verdict::Pass)
    }

    fn evaluate(&self, record: &impl FieldSource) -> Verdict {
        if !self.is_active() {
            return Verdict::Pass;
        }
        let Some(value) = record.field(self.field()) else {
            return Verdict::Missing;
        };

        let pass = match self {
            Self::Substring { needle, .. } => {
                contains_ignore_case(value, &needle.trim().to_lowercase())
            }
            Self::Range { min, max, .. } => as_number(value).is_some_and(|v| {
                min.is_none_or(|lo| v >= lo) && max.is_none_or(|hi| v <= hi)
            }),
            Self::OneOf { values, .. } => values.iter().any(|allowed| values_equal(value, allowed)),
            Self::DateRange { from, to, .. } => as_date(value)
                .is_some_and(|d| from.is_none_or(|lo| d >= lo) && to.is_none_or(|hi| d <= hi)),
        };

        if pass { Verdict::Pass } else { Verdict::Fail }
    }
}

fn contains_ignore_case(value: &Value, needle: &str) -> bool {
    match value {
        Value::Array(items) => items.iter().any(|item| contains_ignore_case(item, needle)),
        other => as_text(other).is_some_and(|text| text.to_lowercase().contains(needle)),
    }
}

/// Keep the records that satisfy every criterion, in their original order.
///
/// An empty criteria list returns the input unchanged.
#[must_use]
pub fn filter_records<T: FieldSource + Clone>(
    records: &[T],
    criteria: &[FilterCriterion],
) -> Vec<T> {
    if criteria.is_empty() {
        return records.to_vec();
    }

    let mut missing = 0usize;
    let kept: Vec<T> = records
        .iter()
        .filter(|record| {
            criteria.iter().all(|criterion| match criterion.evaluate(*record) {
                Verdict::Pass => true,
                Verdict::Fail => false,
                Verdict::Missing => {
                    missing += 1;
                    false
                }
            })
        })
        .cloned()
        .collect();

    if missing > 0 {
        Degradation::SchemaMismatch
            .report(&format!("{missing} record(s) lacked a filtered field"));
    }
    tracing::trace!(input = records.len(), kept = kept.len(), "filter applied");
    kept
}

/// Keep the records accepted by a caller-supplied predicate.
pub fn filter_with<T: Clone>(records: &[T], predicate: impl Fn(&T) -> bool) -> Vec<T> {
    records.iter().filter(|r| predicate(r)).cloned().collect()
}
