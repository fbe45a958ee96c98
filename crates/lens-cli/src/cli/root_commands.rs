use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Filter, sort and paginate a collection.
    Table(TableArgs),
    /// Build chart datasets from a collection.
    Chart {
        #[command(subcommand)]
        action: ChartCommands,
    },
    /// Print the JSON schema of an output shape.
    Schema(SchemaArgs),
}

/// Where the collection comes from.
#[derive(Clone, Debug, Default, Args)]
pub struct SourceArgs {
    /// Read records from a local JSON file (array or `{"data": [...]}`).
    #[arg(long, conflicts_with = "endpoint")]
    pub input: Option<PathBuf>,

    /// Fetch records from this API endpoint (relative to `api.base_url`).
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Query parameter for `--endpoint`, as `key=value`. Repeatable.
    #[arg(long = "param", value_name = "KEY=VALUE", requires = "endpoint")]
    pub params: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct TableArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Case-insensitive substring match, as `field=text`. Repeatable.
    #[arg(long, value_name = "FIELD=TEXT")]
    pub contains: Vec<String>,

    /// Inclusive numeric range, as `field=min..max` (either bound optional).
    #[arg(long, value_name = "FIELD=MIN..MAX")]
    pub range: Vec<String>,

    /// Set membership, as `field=a,b,c`. Repeatable.
    #[arg(long = "one-of", value_name = "FIELD=A,B")]
    pub one_of: Vec<String>,

    /// Lower date bound, as `field=YYYY-MM-DD`.
    #[arg(long, value_name = "FIELD=DATE")]
    pub since: Vec<String>,

    /// Upper date bound, as `field=YYYY-MM-DD`.
    #[arg(long, value_name = "FIELD=DATE")]
    pub until: Vec<String>,

    /// Sort column, as `field`, `field:asc` or `field:desc`.
    #[arg(long, value_name = "FIELD[:DIR]")]
    pub sort: Option<String>,

    /// Compare text case-insensitively when sorting.
    #[arg(long)]
    pub ignore_case: bool,

    /// Page to show (1-based, clamped to the available pages).
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Rows per page. Defaults to the view's configured size.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Named view whose configured page size applies (e.g. `sellers`).
    #[arg(long)]
    pub view: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum ChartCommands {
    /// Count or sum records per key (bar and pie charts).
    Categorical(CategoricalArgs),
    /// Sparkline from a record's paired date/value arrays.
    Series(SeriesArgs),
    /// Multi-axis comparison scaled to each axis ceiling.
    Radar(RadarArgs),
    /// Month × weekday matrix.
    Heatmap(HeatmapArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CategoricalArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Field to group by.
    #[arg(long)]
    pub key: String,

    /// Numeric field to sum instead of counting records.
    #[arg(long)]
    pub weight: Option<String>,

    /// Keep only the N largest buckets.
    #[arg(long)]
    pub top: Option<usize>,

    /// Convert bucket values to percentage shares.
    #[arg(long)]
    pub shares: bool,

    /// Decimal places for `--shares` (0 to 4).
    #[arg(long, default_value_t = 2)]
    pub decimals: u32,
}

#[derive(Clone, Debug, Args)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Record whose series to extract (0-based). Omit for one series per record.
    #[arg(long)]
    pub index: Option<usize>,

    /// Field holding the dates array.
    #[arg(long, default_value = "dates")]
    pub dates: String,

    /// Field holding the values array.
    #[arg(long, default_value = "values")]
    pub values: String,
}

#[derive(Clone, Debug, Args)]
pub struct RadarArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Field naming each dataset (e.g. brand name).
    #[arg(long, default_value = "name")]
    pub label: String,
}

#[derive(Clone, Debug, Args)]
pub struct HeatmapArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, default_value = "weekday")]
    pub weekday: String,

    #[arg(long, default_value = "month")]
    pub month: String,

    #[arg(long, default_value = "value")]
    pub value: String,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Output shape to describe.
    #[arg(value_enum)]
    pub kind: SchemaKind,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaKind {
    Page,
    View,
    Chart,
    Heatmap,
    Series,
    Config,
}
