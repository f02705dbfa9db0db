use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Args;
use marquee_core::{JsonFileHistoryRepository, SearchSession};
use marquee_model::prelude::FilterPatch;
use tracing::warn;

use super::output::{SearchReport, print_table};
use super::{CatalogArg, OrderArg, SortArg, load_catalog, load_config};

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub catalog: CatalogArg,
    /// Free-text query matched against titles, genres, cast and directors
    #[arg(long, short)]
    pub query: Option<String>,
    /// Restrict to a genre (repeatable)
    #[arg(long = "genre", value_name = "GENRE")]
    pub genres: Vec<String>,
    /// Restrict to cast names containing this fragment (repeatable)
    #[arg(long = "actor", value_name = "NAME")]
    pub actors: Vec<String>,
    #[arg(long)]
    pub year_min: Option<u16>,
    #[arg(long)]
    pub year_max: Option<u16>,
    #[arg(long)]
    pub rating_min: Option<f32>,
    #[arg(long)]
    pub rating_max: Option<f32>,
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,
    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: usize,
    /// List the whole catalog when no criteria are given
    #[arg(long)]
    pub browse: bool,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    fn patch(&self, reference_year: u16) -> FilterPatch {
        let mut patch = FilterPatch::new();
        if let Some(query) = &self.query {
            patch = patch.query(query.clone());
        }
        if !self.genres.is_empty() {
            patch = patch.genres(self.genres.iter().cloned());
        }
        if !self.actors.is_empty() {
            patch = patch.actors(self.actors.iter().cloned());
        }
        if self.year_min.is_some() || self.year_max.is_some() {
            patch = patch.year_range(
                self.year_min.unwrap_or(marquee_model::MIN_YEAR),
                self.year_max.unwrap_or(reference_year),
            );
        }
        if self.rating_min.is_some() || self.rating_max.is_some() {
            patch = patch.rating_range(
                self.rating_min.unwrap_or(marquee_model::MIN_RATING),
                self.rating_max.unwrap_or(marquee_model::MAX_RATING),
            );
        }
        if let Some(sort) = self.sort {
            patch = patch.sort_field(sort.into());
        }
        if let Some(order) = self.order {
            patch = patch.sort_order(order.into());
        }
        patch
    }
}

pub async fn run(args: SearchArgs) -> Result<()> {
    let (mut config, _) = load_config()?;
    if args.browse {
        config.require_criteria = false;
    }
    let catalog = load_catalog(args.catalog.catalog.as_deref()).await?;

    let mut builder = SearchSession::builder(catalog);
    if let Some(path) = &config.history_path {
        builder = builder.history_repository(Arc::new(JsonFileHistoryRepository::new(path)));
    }
    let session = builder.config(config).build();
    session.restore_history().await;

    session.set_filters(args.patch(session.reference_year()));
    session.search(false).await;
    for _ in 1..args.pages {
        if !session.state().has_more {
            break;
        }
        session.load_more().await;
    }

    let state = session.state();
    if let Some(err) = &state.last_error {
        bail!("search failed: {err}");
    }
    if let Err(err) = session.save_history().await {
        warn!("failed to save search history: {}", err);
    }

    let report = SearchReport::from_state(&state);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }
    Ok(())
}
