//! Calendar index conventions of the upstream feed.

use lens_core::{IndexConvention, MonthConvention};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct WeekdayConfig {
    /// How numeric weekdays are read. Defaults to `sunday_zero`.
    #[serde(default)]
    pub index_convention: IndexConvention,

    /// How numeric months are read. Defaults to `one_based`.
    #[serde(default)]
    pub month_convention: MonthConvention,
}
