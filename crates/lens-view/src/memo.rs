//! Single-entry cache for table derivation.
//!
//! Derivation is cheap for dashboard-sized snapshots. Past a few thousand
//! rows, re-running filter and sort on every repaint adds up, so views can
//! keep the last page keyed by snapshot identity and configuration.

use lens_core::{Record, RecordSet};

use crate::paginate::Page;
use crate::view::{ViewConfig, derive_table};

struct Entry {
    snapshot: u64,
    config: ViewConfig,
    page: Page<Record>,
}

/// Remembers the last derived page.
#[derive(Default)]
pub struct MemoizedView {
    last: Option<Entry>,
    hits: u64,
    misses: u64,
}

impl MemoizedView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached page when `records` and `config` match the previous
    /// call, deriving it otherwise.
    pub fn table(&mut self, records: &RecordSet, config: &ViewConfig) -> &Page<Record> {
        let fresh = self
            .last
            .as_ref()
            .is_some_and(|e| e.snapshot == records.id() && e.config == *config);

        if fresh {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.last = None;
        }

        let entry = self.last.get_or_insert_with(|| Entry {
            snapshot: records.id(),
            config: config.clone(),
            page: derive_table(records, config),
        });
        &entry.page
    }

    /// `(hits, misses)` since creation.
    #[must_use]
    pub const fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
