//! Semi-structured records and by-name field access.

use std::borrow::Cow;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::value;

/// Anything that exposes named fields.
///
/// Implemented for [`Record`], raw JSON values and maps, and references to any
/// implementor, so every stage works equally on owned records and on borrowed
/// views of a [`crate::RecordSet`]. Domain structs can implement it to plug
/// typed data into the field-name based stages.
pub trait FieldSource {
    /// Look up a field by name. Dotted paths (`stats.revenue`) descend into
    /// nested objects.
    fn field(&self, name: &str) -> Option<&Value>;

    /// Read a field as a finite number.
    fn number(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(value::as_number)
    }

    /// Read a field as text.
    fn text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.field(name).and_then(value::as_text)
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn field(&self, name: &str) -> Option<&Value> {
        (**self).field(name)
    }
}

impl FieldSource for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        lookup(self, name)
    }
}

impl FieldSource for Value {
    fn field(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|map| lookup(map, name))
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    if let Some(found) = map.get(name) {
        return Some(found);
    }
    let (head, rest) = name.split_once('.')?;
    map.get(head)?.as_object().and_then(|inner| lookup(inner, rest))
}

/// One row of a fetched collection.
///
/// The schema varies by endpoint (products, sellers, bloggers, ...) so the
/// record keeps the raw JSON object and leaves interpretation to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Borrow the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Builder-style field insertion, mostly for tests and fixtures.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FieldSource for Record {
    fn field(&self, name: &str) -> Option<&Value> {
        lookup(&self.0, name)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn flat_and_nested_lookup() {
        let r = record(json!({"brand": "Nike", "stats": {"revenue": 1200}}));
        assert_eq!(r.text("brand").as_deref(), Some("Nike"));
        assert_eq!(r.number("stats.revenue"), Some(1200.0));
        assert!(r.field("stats.orders").is_none());
        assert!(r.field("missing").is_none());
    }

    #[test]
    fn literal_dotted_key_wins_over_path() {
        let r = record(json!({"a.b": 1, "a": {"b": 2}}));
        assert_eq!(r.number("a.b"), Some(1.0));
    }

    #[test]
    fn references_are_field_sources() {
        let r = Record::default().with("x", 3);
        let borrowed: &Record = &r;
        assert_eq!(FieldSource::number(&borrowed, "x"), Some(3.0));
    }

    #[test]
    fn raw_values_are_field_sources() {
        let v = json!({"name": "Ozon"});
        assert_eq!(v.text("name").as_deref(), Some("Ozon"));
        assert!(json!([1, 2]).field("name").is_none());
    }
}
