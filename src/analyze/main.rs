//! Polygon analysis CLI.
//!
//! Counts eateries, offices, apartments, PGs, gyms and salons inside WKT
//! polygons using Google Places, one JSON line per polygon on stdout.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use catchment::batch::PolygonTable;
use catchment::config::{Config, GOOGLE_KEY_ENV};
use catchment::google::GooglePlaces;
use catchment::places::PlaceSearch;
use catchment::{Analyzer, Category};

#[derive(Parser, Debug)]
#[command(name = "analyze")]
#[command(about = "Count categorised places inside WKT polygons")]
struct Args {
    /// CSV file with 'WKT' and 'name' columns
    #[arg(short, long, conflicts_with = "wkt")]
    input: Option<PathBuf>,

    /// Single WKT polygon to analyze
    #[arg(long, required_unless_present = "input")]
    wkt: Option<String>,

    /// Name reported for --wkt
    #[arg(long, default_value = "Polygon_1")]
    name: String,

    /// Write the input table with count columns appended
    #[arg(short, long, requires = "input")]
    output: Option<PathBuf>,

    /// Categories to count (default: all)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    categories: Vec<Category>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Google Maps API key (overrides config and environment)
    #[arg(long)]
    api_key: Option<String>,

    /// Pause between polygons in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,

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

    let api_key = args.api_key.clone().unwrap_or_else(|| config.google.api_key.clone());
    if api_key.trim().is_empty() {
        bail!("Google Maps API key is required (--api-key, config [google] api_key or {})", GOOGLE_KEY_ENV);
    }

    let categories = if args.categories.is_empty() {
        Category::all().to_vec()
    } else {
        args.categories.clone()
    };

    let places = GooglePlaces::new(api_key, Duration::from_secs(config.google.search_timeout_secs))
        .context("Failed to create HTTP client")?
        .with_base_url(&config.google.places_url);
    let analyzer = Analyzer::new(PlaceSearch::new(places, config.google.search_options()));

    let table = args.input.as_deref().map(PolygonTable::load).transpose()?;
    let polygons: Vec<(String, String)> = match (&table, &args.wkt) {
        (Some(table), _) => table
            .polygons()
            .map(|(name, wkt)| (name.to_string(), wkt.to_string()))
            .collect(),
        (None, Some(wkt)) => vec![(args.name.clone(), wkt.clone())],
        (None, None) => bail!("either --input or --wkt is required"),
    };

    info!("Catchment polygon analysis");
    info!(
        "{} polygons, categories: {}",
        polygons.len(),
        categories.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
    );

    let pb = ProgressBar::new(polygons.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let delay = Duration::from_millis(args.delay_ms);
    let mut records = Vec::with_capacity(polygons.len());

    for (i, (name, wkt)) in polygons.iter().enumerate() {
        pb.set_message(name.clone());
        let record = analyzer.analyze_wkt(name, wkt, &categories).await;
        let line = serde_json::to_string(&record)?;
        pb.suspend(|| println!("{}", line));
        records.push(record);
        pb.inc(1);

        if i + 1 < polygons.len() && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    pb.finish_and_clear();

    let skipped = records.iter().filter(|r| !r.analyzable).count();
    info!(
        "Analyzed {} polygons ({} not analyzable)",
        records.len() - skipped,
        skipped
    );

    if let (Some(table), Some(output)) = (&table, &args.output) {
        table.save_with_counts(output, &records, &categories)?;
    }

    Ok(())
}
