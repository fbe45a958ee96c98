//! Radar chart axes.

use lens_core::{AxisSpec, default_axes};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct RadarConfig {
    /// Axes in display order.
    #[serde(default = "default_axes")]
    pub axes: Vec<AxisSpec>,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            axes: default_axes(),
        }
    }
}
