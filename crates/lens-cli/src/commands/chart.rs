use anyhow::bail;
use lens_chart::{
    ChartView, HeatmapOptions, HeatmapView, SeriesFields, TimeSeries, aggregate_categorical,
    aggregate_weighted, build_heatmap, build_time_series_with, field_key, field_measure,
    heatmap_points, normalize_multi_axis, percentage_shares_with, sparklines,
};
use lens_config::LensConfig;
use lens_core::Record;

use super::shared::source::load_records;
use crate::cli::root_commands::{
    CategoricalArgs, ChartCommands, HeatmapArgs, RadarArgs, SeriesArgs,
};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output;

/// Handle `lens chart <kind>`.
pub async fn handle(
    action: &ChartCommands,
    config: &LensConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let rendered = match action {
        ChartCommands::Categorical(args) => {
            let records = load_records(&args.source, config).await?;
            output::render_chart(&categorical(&records, args), flags.format)?
        }
        ChartCommands::Series(args) => {
            let records = load_records(&args.source, config).await?;
            render_series(&records, args, flags.format)?
        }
        ChartCommands::Radar(args) => {
            let records = load_records(&args.source, config).await?;
            output::render_chart(&radar(&records, args, config), flags.format)?
        }
        ChartCommands::Heatmap(args) => {
            let records = load_records(&args.source, config).await?;
            output::render_heatmap(&heatmap(&records, args, config), flags.format)?
        }
    };
    output::print(&rendered);
    Ok(())
}

/// Counts (or sums) per key, optionally turned into shares and cut to the top N.
///
/// Shares are taken against the whole collection before truncation, so the
/// top buckets keep their true share of the total.
pub fn categorical(records: &[Record], args: &CategoricalArgs) -> ChartView {
    let key = field_key::<Record>(&args.key);
    let buckets = match args.weight.as_deref() {
        None => aggregate_categorical(records, key),
        Some(weight) => aggregate_weighted(records, key, field_measure::<Record>(weight)),
    };

    let (label, mut buckets) = if args.shares {
        ("share", percentage_shares_with(&buckets, args.decimals))
    } else {
        (args.weight.as_deref().unwrap_or("count"), buckets)
    };
    if let Some(n) = args.top {
        buckets.truncate(n);
    }
    ChartView::from_buckets(label, &buckets)
}

/// One record's series, or one series per record.
pub fn series(records: &[Record], args: &SeriesArgs) -> anyhow::Result<Vec<TimeSeries>> {
    let fields = SeriesFields::new(args.dates.as_str(), args.values.as_str());
    match args.index {
        Some(index) => {
            let Some(record) = records.get(index) else {
                bail!(
                    "--index {index} is out of range ({} records)",
                    records.len()
                );
            };
            Ok(vec![build_time_series_with(record, &fields)])
        }
        None => Ok(sparklines(records, &fields)),
    }
}

fn render_series(
    records: &[Record],
    args: &SeriesArgs,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let series = series(records, args)?;
    match (args.index, series.as_slice()) {
        (Some(_), [single]) if format == OutputFormat::Table => {
            output::render_chart(&single.to_chart(args.values.as_str()), format)
        }
        (Some(_), [single]) => output::render(single, format),
        _ => output::render(&series, format),
    }
}

pub fn radar(records: &[Record], args: &RadarArgs, config: &LensConfig) -> ChartView {
    let label = field_key::<Record>(&args.label);
    normalize_multi_axis(records, &config.radar.axes, label)
}

pub fn heatmap(records: &[Record], args: &HeatmapArgs, config: &LensConfig) -> HeatmapView {
    let points = heatmap_points(records, &args.weekday, &args.month, &args.value);
    let options = HeatmapOptions::new(
        config.weekday.index_convention,
        config.weekday.month_convention,
    );
    build_heatmap(&points, &options)
}
