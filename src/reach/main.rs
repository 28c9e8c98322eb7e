//! Reachability polygon CLI.
//!
//! Builds an isochrone around a point, either from the Mapbox Isochrone API or by
//! sampling Google Routes travel times on a grid, and prints it as WKT.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use catchment::config::{Config, GOOGLE_KEY_ENV, MAPBOX_TOKEN_ENV};
use catchment::google::GoogleRoutes;
use catchment::isochrone::{GridIsochroneBuilder, ProviderIsochroneBuilder};
use catchment::mapbox::MapboxIsochrone;
use catchment::models::{RoutingProfile, TravelMode};
use catchment::{wkt, IsochroneResult, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Polygon from the isochrone provider
    Provider,
    /// Convex hull of grid-sampled travel times
    Grid,
}

#[derive(Parser, Debug)]
#[command(name = "reach")]
#[command(about = "Generate a travel-time reachability polygon")]
struct Args {
    /// Origin latitude
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Origin longitude
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,

    /// Time budget in minutes
    #[arg(short, long)]
    minutes: u32,

    #[arg(short, long, value_enum, default_value = "provider")]
    strategy: Strategy,

    /// Routing profile (provider strategy)
    #[arg(long, value_enum, default_value = "driving")]
    profile: RoutingProfile,

    /// Departure time, ISO 8601 (provider strategy)
    #[arg(long)]
    depart_at: Option<String>,

    /// Primary travel mode (grid strategy)
    #[arg(long, value_enum, default_value = "drive")]
    mode: TravelMode,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mapbox token (overrides config and environment)
    #[arg(long)]
    token: Option<String>,

    /// Google Maps API key (overrides config and environment)
    #[arg(long)]
    api_key: Option<String>,

    /// Print the full result as JSON instead of WKT
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    }
    .with_env_overrides();

    let center = Vertex::new(args.lat, args.lng);

    let result = match args.strategy {
        Strategy::Provider => provider_isochrone(&args, &config, center).await?,
        Strategy::Grid => grid_isochrone(&args, &config, center).await?,
    };

    info!(
        "Isochrone for {} min has {} vertices",
        result.minutes,
        result.polygon.len()
    );

    if args.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("{}", wkt::serialize(&result.polygon));
    }

    Ok(())
}

async fn provider_isochrone(args: &Args, config: &Config, center: Vertex) -> Result<IsochroneResult> {
    let token = args.token.clone().unwrap_or_else(|| config.mapbox.token.clone());
    if token.trim().is_empty() {
        bail!("Mapbox token is required (--token, config [mapbox] token or {})", MAPBOX_TOKEN_ENV);
    }

    let mapbox = MapboxIsochrone::new(token, Duration::from_secs(config.mapbox.timeout_secs))
        .context("Failed to create HTTP client")?
        .with_base_url(&config.mapbox.base_url)
        .with_retry(config.mapbox.retry_policy());
    let builder = ProviderIsochroneBuilder::new(mapbox)
        .with_smoothing(config.mapbox.denoise, config.mapbox.generalize_meters);

    let result = builder
        .build(center, args.minutes, args.profile, args.depart_at.clone())
        .await
        .context("Mapbox isochrone failed")?;
    Ok(result)
}

async fn grid_isochrone(args: &Args, config: &Config, center: Vertex) -> Result<IsochroneResult> {
    let api_key = args.api_key.clone().unwrap_or_else(|| config.google.api_key.clone());
    if api_key.trim().is_empty() {
        bail!("Google Maps API key is required (--api-key, config [google] api_key or {})", GOOGLE_KEY_ENV);
    }

    let routes = GoogleRoutes::new(
        api_key,
        Duration::from_secs(config.google.routes_timeout_secs),
        Duration::from_secs(config.google.probe_timeout_secs),
    )
    .context("Failed to create HTTP client")?
    .with_url(&config.google.routes_url);
    let builder = GridIsochroneBuilder::new(routes, config.grid.options());

    let result = builder
        .build(center, args.minutes, args.mode)
        .await
        .context("Grid isochrone failed")?;
    Ok(result)
}
