pub mod output;
pub mod search;
pub mod suggest;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use marquee_core::{Catalog, SearchConfig, SearchConfigSource};
use marquee_model::prelude::{SortBy, SortOrder};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "marquee",
    version,
    about = "Search, filter and rank a movie catalog"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a search and print the loaded pages
    Search(search::SearchArgs),
    /// Autocomplete a partial query from titles, genres and people
    Suggest(suggest::SuggestArgs),
    /// Print the effective configuration and where it came from
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Relevance,
    Rating,
    Year,
    Title,
}

impl From<SortArg> for SortBy {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Relevance => SortBy::Relevance,
            SortArg::Rating => SortBy::Rating,
            SortArg::Year => SortBy::Year,
            SortArg::Title => SortBy::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Asc => SortOrder::Ascending,
            OrderArg::Desc => SortOrder::Descending,
        }
    }
}

/// Catalog from `path`, or the bundled demo catalog.
pub async fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load_from_file(path)
            .await
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => {
            debug!("no --catalog given, using the bundled demo catalog");
            marquee_core::demo::demo_catalog().context("bundled demo catalog is invalid")
        }
    }
}

pub fn load_config() -> Result<(SearchConfig, SearchConfigSource)> {
    let (config, source) = SearchConfig::load_from_env()?;
    debug!("search config loaded from {}", source);
    Ok((config, source))
}

pub fn show_config() -> Result<()> {
    let (config, source) = load_config()?;
    println!("# source: {source}");
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Shared `--catalog` flag.
#[derive(Debug, Clone, clap::Args)]
pub struct CatalogArg {
    /// JSON catalog file; defaults to the bundled demo catalog
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}
