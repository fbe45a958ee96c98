//! # lens-view
//!
//! Table-view derivation for Marketlens.
//!
//! A table view is `RecordSet → filter → sort → paginate`. Each stage is a
//! pure function over borrowed records; [`view::ViewState`] ties them together
//! for one page of the dashboard and keeps the current page clamped as filters
//! and datasets change.
//!
//! - [`filter`]: conjunction of field predicates (substring, range, set, date range)
//! - [`sort`]: stable total order by a field or a caller-supplied key
//! - [`paginate`]: clamped fixed-size pages
//! - [`view`]: per-view configuration and state
//! - [`memo`]: single-entry cache of the last derived page

pub mod filter;
pub mod memo;
pub mod paginate;
pub mod sort;
pub mod view;

pub use filter::{FilterCriterion, filter_records, filter_with};
pub use memo::MemoizedView;
pub use paginate::{Page, PageState, paginate};
pub use sort::{SortKind, SortSpec, sort_by_key_fn, sort_by_number, sort_records, sort_records_by};
pub use view::{ViewConfig, ViewState, derive_rows, derive_table};
