//! Table view defaults.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default rows per page.
const fn default_page_size() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ViewsConfig {
    /// Rows per page for views without an override.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Per-view page size overrides, keyed by view name (e.g. `sellers = 25`).
    #[serde(default)]
    pub page_sizes: BTreeMap<String, usize>,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            page_sizes: BTreeMap::new(),
        }
    }
}

impl ViewsConfig {
    /// Page size for `view`, falling back to the default.
    pub fn page_size_for(&self, view: &str) -> usize {
        self.page_sizes
            .get(view)
            .copied()
            .unwrap_or(self.default_page_size)
    }
}
