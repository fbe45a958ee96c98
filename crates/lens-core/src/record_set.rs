//! Immutable snapshot of one query's result.

use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;

use crate::errors::{CoreError, json_kind};
use crate::record::Record;

static NEXT_SNAPSHOT_ID: AtomicU64 = AtomicU64::new(1);

/// The records returned by one fetch.
///
/// A `RecordSet` is never mutated: a new fetch produces a new set with a new
/// identity. Clones share the same snapshot and the same identity, which is
/// what memoized views key on.
#[derive(Debug, Clone)]
pub struct RecordSet {
    id: u64,
    records: Arc<[Record]>,
}

impl RecordSet {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            id: NEXT_SNAPSHOT_ID.fetch_add(1, Ordering::Relaxed),
            records: records.into(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Build a snapshot from a parsed JSON array of objects.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotAnArray`] if `value` is not an array and
    /// [`CoreError::NotAnObject`] if any element is not an object.
    pub fn from_json(value: Value) -> Result<Self, CoreError> {
        records_from_json(value).map(Self::new)
    }

    /// Parse a JSON document holding an array of objects.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`] on malformed JSON, otherwise see [`Self::from_json`].
    pub fn from_json_str(raw: &str) -> Result<Self, CoreError> {
        Self::from_json(serde_json::from_str(raw)?)
    }

    /// Process-unique identity of this snapshot.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Whether two handles point at the same snapshot.
    #[must_use]
    pub fn same_snapshot(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Convert a JSON array of objects into records without building a snapshot.
///
/// # Errors
///
/// Returns [`CoreError::NotAnArray`] if `value` is not an array and
/// [`CoreError::NotAnObject`] if any element is not an object.
pub fn records_from_json(value: Value) -> Result<Vec<Record>, CoreError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(CoreError::NotAnArray {
                found: json_kind(&other),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(Record::new(map)),
            other => Err(CoreError::NotAnObject {
                index,
                found: json_kind(&other),
            }),
        })
        .collect()
}

impl Default for RecordSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for RecordSet {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for RecordSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records().serialize(serializer)
    }
}
