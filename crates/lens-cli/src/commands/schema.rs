use lens_chart::{ChartView, HeatmapView, TimeSeries};
use lens_config::LensConfig;
use lens_core::Record;
use lens_view::{Page, ViewConfig};
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaKind};
use crate::output;

/// Handle `lens schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output::output(&schema_for_kind(args.kind), flags.format)
}

/// JSON Schema of the shape a command emits.
#[must_use]
pub fn schema_for_kind(kind: SchemaKind) -> Schema {
    match kind {
        SchemaKind::Page => schema_for!(Page<Record>),
        SchemaKind::View => schema_for!(ViewConfig),
        SchemaKind::Chart => schema_for!(ChartView),
        SchemaKind::Heatmap => schema_for!(HeatmapView),
        SchemaKind::Series => schema_for!(TimeSeries),
        SchemaKind::Config => schema_for!(LensConfig),
    }
}
