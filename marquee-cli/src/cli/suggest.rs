use anyhow::Result;
use clap::Args;

use super::{CatalogArg, load_catalog, load_config};

#[derive(Debug, Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub catalog: CatalogArg,
    /// Partial query
    pub query: String,
}

pub async fn run(args: SuggestArgs) -> Result<()> {
    let (config, _) = load_config()?;
    let catalog = load_catalog(args.catalog.catalog.as_deref()).await?;

    for suggestion in marquee_core::suggest(&catalog, &args.query, config.suggestion_limit) {
        println!("{suggestion}");
    }
    Ok(())
}
