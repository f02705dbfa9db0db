//! `marquee`: search a movie catalog from the command line.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `--json` output stays machine readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let opts = Cli::parse();

    match opts.command {
        Command::Search(args) => cli::search::run(args).await,
        Command::Suggest(args) => cli::suggest::run(args).await,
        Command::Config => cli::show_config(),
    }
}
