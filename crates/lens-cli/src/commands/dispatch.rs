use lens_config::LensConfig;

use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: &LensConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Table(args) => super::table::handle(&args, config, flags).await,
        Commands::Chart { action } => super::chart::handle(&action, config, flags).await,
        Commands::Schema(args) => super::schema::handle(&args, flags),
    }
}
