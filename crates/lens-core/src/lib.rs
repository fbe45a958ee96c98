//! # lens-core
//!
//! Core record model, enums, and error types for Marketlens.
//!
//! This crate provides the foundational types shared across all Marketlens crates:
//! - `Record` and the `FieldSource` trait for by-name field access
//! - `RecordSet`, the immutable snapshot of one query's result
//! - Value coercion rules shared by the filter, sort and aggregation stages
//! - Aggregation units (`Bucket`, `HeatmapCell`) and radar `AxisSpec`s
//! - Direction and convention enums
//! - The non-fatal degradation taxonomy and cross-cutting error types

pub mod axes;
pub mod buckets;
pub mod diagnostics;
pub mod enums;
pub mod errors;
pub mod record;
pub mod record_set;
pub mod value;

pub use axes::{AxisSpec, default_axes};
pub use buckets::{Bucket, HeatmapCell};
pub use diagnostics::Degradation;
pub use enums::{IndexConvention, MonthConvention, SortDirection, TextCase};
pub use errors::CoreError;
pub use record::{FieldSource, Record};
pub use record_set::{RecordSet, records_from_json};
