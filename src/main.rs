//! gfscast - GFS weather forecasts grouped by day
//!
//! A command-line tool that fetches the Infoclimat GFS forecast feed for a
//! coordinate pair, groups the entries by calendar day, and keeps fetched
//! data in a local store for offline reuse.

mod cache;
mod cli;
mod data;
mod display;
mod repository;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cache::ForecastStore;
use cli::{Cli, FetchMode};
use data::GfsClient;
use repository::ForecastsRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    cli.validate()?;

    let repository = ForecastsRepository::new(GfsClient::new(), ForecastStore::new());

    let forecasts = match cli.fetch_mode() {
        FetchMode::StoreThenRemote => repository.fetch(cli.lat, cli.lon).await,
        FetchMode::LocalOnly => repository.fetch_locally(cli.lat, cli.lon),
        FetchMode::RemoteOnly => repository.fetch_remotely(cli.lat, cli.lon).await,
    };

    print!("{}", display::render_forecasts(&forecasts));

    Ok(())
}
