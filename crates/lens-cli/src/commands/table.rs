use lens_config::LensConfig;
use lens_view::{SortSpec, ViewConfig, derive_table};

use super::shared::{parse, source::load_records};
use crate::cli::GlobalFlags;
use crate::cli::root_commands::TableArgs;
use crate::output;

/// Handle `lens table`.
pub async fn handle(
    args: &TableArgs,
    config: &LensConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let records = load_records(&args.source, config).await?;
    let view = build_view(args, config)?;
    let page = derive_table(&records, &view);
    output::print(&output::render_page(&page, flags.format)?);
    Ok(())
}

/// Translate flags into a view. `--page-size` wins over the named view's size.
pub fn build_view(args: &TableArgs, config: &LensConfig) -> anyhow::Result<ViewConfig> {
    let page_size = args.page_size.unwrap_or_else(|| {
        args.view.as_deref().map_or(config.views.default_page_size, |name| {
            config.views.page_size_for(name)
        })
    });

    let mut view = ViewConfig::with_page_size(page_size);
    for criterion in parse::filters(args)? {
        view = view.filter(criterion);
    }
    if let Some(raw) = &args.sort {
        let spec = SortSpec::parse(raw).map_err(anyhow::Error::msg)?;
        let spec = if args.ignore_case {
            spec.ignore_case()
        } else {
            spec
        };
        view = view.sorted(spec);
    }

    // Out-of-range pages are clamped when the table is derived.
    Ok(view.on_page(usize::try_from(args.page).unwrap_or(0)))
}
