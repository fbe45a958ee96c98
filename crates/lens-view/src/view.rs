//! Per-view configuration and state.
//!
//! Every dashboard page instantiates one [`ViewState`] instead of keeping its
//! own filter/sort/page logic. The state owns the current [`RecordSet`] and a
//! [`ViewConfig`]; the table is always re-derived from the snapshot, so it can
//! never drift from the charts built over the same snapshot.
//!
//! ```text
//! set_filters / set_sort  → page reset to 1
//! replace_records         → page re-clamped to the new filtered length
//! set_page                → clamped to the current filtered length
//! ```

use lens_core::{Record, RecordSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::filter::{FilterCriterion, filter_records};
use crate::paginate::{Page, PageState, paginate};
use crate::sort::{SortSpec, sort_records};

/// Filters, sort and paging of one table view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewConfig {
    #[serde(default)]
    pub filters: Vec<FilterCriterion>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub page: PageState,
}

impl ViewConfig {
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page: PageState::with_page_size(page_size),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn filter(mut self, criterion: FilterCriterion) -> Self {
        self.filters.push(criterion);
        self
    }

    #[must_use]
    pub fn sorted(mut self, spec: SortSpec) -> Self {
        self.sort = Some(spec);
        self
    }

    #[must_use]
    pub const fn on_page(mut self, page: usize) -> Self {
        self.page.current_page = page;
        self
    }
}

/// Filter and sort a snapshot, borrowing its records.
#[must_use]
pub fn derive_rows<'a>(records: &'a RecordSet, config: &ViewConfig) -> Vec<&'a Record> {
    let rows: Vec<&Record> = records.iter().collect();
    let filtered = filter_records(&rows, &config.filters);
    match &config.sort {
        Some(spec) => sort_records(&filtered, spec),
        None => filtered,
    }
}

/// Run filter → sort → paginate over a snapshot.
#[must_use]
pub fn derive_table(records: &RecordSet, config: &ViewConfig) -> Page<Record> {
    let rows = derive_rows(records, config);
    let requested = i64::try_from(config.page.current_page).unwrap_or(i64::MAX);
    let page = paginate(&rows, requested, config.page.page_size).map(Clone::clone);
    tracing::debug!(
        snapshot = records.id(),
        records = records.len(),
        matched = page.total_items,
        page = page.current_page,
        total_pages = page.total_pages,
        "table view derived"
    );
    page
}

/// Mutable view state for one dashboard page.
#[derive(Debug, Clone)]
pub struct ViewState {
    name: String,
    config: ViewConfig,
    records: RecordSet,
    matched: usize,
}

impl ViewState {
    pub fn new(name: impl Into<String>, config: ViewConfig) -> Self {
        Self {
            name: name.into(),
            config,
            records: RecordSet::empty(),
            matched: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    #[must_use]
    pub const fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Number of records passing the current filters.
    #[must_use]
    pub const fn matched(&self) -> usize {
        self.matched
    }

    /// Swap in a freshly fetched snapshot and re-clamp the page.
    pub fn replace_records(&mut self, records: RecordSet) {
        self.records = records;
        self.refresh_matched();
        if self.config.page.reclamp(self.matched) {
            tracing::debug!(
                view = %self.name,
                page = self.config.page.current_page,
                "page re-clamped after new dataset"
            );
        }
    }

    pub fn set_filters(&mut self, filters: Vec<FilterCriterion>) {
        self.config.filters = filters;
        self.config.page.reset();
        self.refresh_matched();
    }

    pub fn add_filter(&mut self, criterion: FilterCriterion) {
        self.config.filters.push(criterion);
        self.config.page.reset();
        self.refresh_matched();
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(Vec::new());
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.config.sort = sort;
        self.config.page.reset();
    }

    /// Request a page; out-of-range requests are clamped.
    pub fn set_page(&mut self, page: i64) {
        self.config.page.go_to(page, self.matched);
    }

    /// Change the page size and re-clamp.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.config.page.page_size = page_size.max(1);
        self.config.page.reclamp(self.matched);
    }

    /// Derive the current page.
    #[must_use]
    pub fn table(&self) -> Page<Record> {
        derive_table(&self.records, &self.config)
    }

    fn refresh_matched(&mut self) {
        self.matched = if self.config.filters.is_empty() {
            self.records.len()
        } else {
            let rows: Vec<&Record> = self.records.iter().collect();
            filter_records(&rows, &self.config.filters).len()
        };
    }
}
