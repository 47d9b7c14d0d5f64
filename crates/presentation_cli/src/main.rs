//! FoodRadar CLI
//!
//! Finds food venues near a place or coordinate using OpenStreetMap data.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use application::ports::GeocodingPort;
use application::services::{
    DiscoveryService, NearbyPoi, SearchCache, SearchCacheConfig, SearchOutcome, SearchRequest,
    TokenKeywordExpander, rank_by_distance,
};
use clap::{ArgGroup, Args, Parser, Subcommand};
use domain::value_objects::{GeoLocation, TravelMode};
use infrastructure::{AppConfig, NominatimGeocoder, OverpassPoiSource, SearchConfig, init_tracing};
use serde::Serialize;
use tracing::debug;

/// FoodRadar CLI
#[derive(Parser)]
#[command(name = "foodradar")]
#[command(author, version, about = "Find food venues nearby from OpenStreetMap", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./foodradar.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for venues matching a dish, cuisine or name
    ///
    /// Example: foodradar search "bún bò" --place "Hồ Gươm"
    /// Example: foodradar search pho --lat 21.0285 --lon 105.8542 --radius 1500
    Search(SearchArgs),

    /// Resolve a place name to a coordinate
    Geocode {
        /// Place name
        place: String,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("origin").required(true).args(["place", "lat"])))]
struct SearchArgs {
    /// What to look for (separate alternatives with commas)
    query: String,

    /// Search around this place (geocoded)
    #[arg(short, long)]
    place: Option<String>,

    /// Latitude of the search center
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude of the search center
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Search radius in meters (default from configuration)
    #[arg(short, long)]
    radius: Option<u32>,

    /// Travel mode for time estimates (walking, cycling, driving)
    #[arg(short, long, default_value = "walking")]
    mode: TravelMode,

    /// Maximum number of results to print
    #[arg(short = 'n', long, default_value_t = 10)]
    limit: usize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Render a distance for humans
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_distance(distance_m: f64) -> String {
    if distance_m < 1000.0 {
        format!("{} m", distance_m.round() as u64)
    } else {
        format!("{:.1} km", distance_m / 1000.0)
    }
}

/// Cache settings for a process that runs exactly one search
///
/// Nothing outlives the process, so storing the outcome would only cost
/// a clone. The `search.cache_*` settings apply to long-lived hosts that
/// keep a `DiscoveryService` around.
fn one_shot_cache_config(search: &SearchConfig) -> SearchCacheConfig {
    SearchCacheConfig {
        max_entries: 0,
        ..search.cache_config()
    }
}

/// Search origin as shown to the user
#[derive(Debug, Serialize)]
struct Origin {
    label: String,
    location: GeoLocation,
}

#[derive(Debug, Serialize)]
struct JsonResult<'a> {
    #[serde(flatten)]
    venue: &'a NearbyPoi,
    travel_minutes: u32,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    query: &'a str,
    origin: &'a Origin,
    radius_m: u32,
    mode: TravelMode,
    results: Vec<JsonResult<'a>>,
}

fn render_text(query: &str, origin: &Origin, radius_m: u32, mode: TravelMode, venues: &[NearbyPoi]) -> String {
    let mut out = format!(
        "🍜 {} result(s) for \"{query}\" within {radius_m} m of {}\n",
        venues.len(),
        origin.label
    );

    for (index, venue) in venues.iter().enumerate() {
        let poi = &venue.poi;
        out.push_str(&format!("\n{:>2}. {}\n", index + 1, poi.display_name()));
        out.push_str(&format!("    📍 {}\n", poi.address));
        out.push_str(&format!(
            "    🧭 {} · ~{} min {}\n",
            format_distance(venue.distance_m),
            venue.travel_minutes(mode),
            mode
        ));
        if !poi.cuisine.is_empty() {
            out.push_str(&format!("    🍽️  {}\n", poi.cuisine));
        }
        if let Some(hours) = poi.opening_hours() {
            out.push_str(&format!("    🕐 {hours}\n"));
        }
        out.push_str(&format!("    🔗 {}\n", poi.id.url()));
    }

    out
}

fn render_json(
    query: &str,
    origin: &Origin,
    radius_m: u32,
    mode: TravelMode,
    venues: &[NearbyPoi],
) -> serde_json::Result<String> {
    let report = JsonReport {
        query,
        origin,
        radius_m,
        mode,
        results: venues
            .iter()
            .map(|venue| JsonResult {
                venue,
                travel_minutes: venue.travel_minutes(mode),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

async fn resolve_origin(
    args: &SearchArgs,
    geocoder: &dyn GeocodingPort,
) -> anyhow::Result<Origin> {
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        let location = GeoLocation::new(lat, lon)?;
        return Ok(Origin {
            label: location.to_string(),
            location,
        });
    }

    let Some(place) = args.place.as_deref() else {
        bail!("either --place or --lat/--lon is required");
    };

    match geocoder.geocode(place).await? {
        Some(found) => Ok(Origin {
            label: found.name,
            location: found.location,
        }),
        None => bail!("place not found: {place}"),
    }
}

async fn run_search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let radius_m = args.radius.unwrap_or(config.search.default_radius_m);

    let geocoder = NominatimGeocoder::from_config(&config.nominatim)?;
    let origin = resolve_origin(&args, &geocoder).await?;
    debug!(origin = %origin.location, radius_m, "Resolved search origin");

    let request =
        SearchRequest::bounded(origin.location, radius_m, args.query.as_str(), config.search.max_radius_m)?;

    let service = DiscoveryService::new(
        Arc::new(OverpassPoiSource::from_config(&config.overpass)?),
        Arc::new(TokenKeywordExpander::new()),
        SearchCache::new(one_shot_cache_config(&config.search)),
    );

    let pois = match service.search(&request).await {
        SearchOutcome::Failed(reason) => bail!("search failed: {reason}"),
        outcome => outcome.into_pois(),
    };

    let mut venues = rank_by_distance(pois, &origin.location);
    venues.truncate(args.limit);

    let output = if args.json {
        render_json(&args.query, &origin, radius_m, args.mode, &venues)?
    } else {
        render_text(&args.query, &origin, radius_m, args.mode, &venues)
    };
    println!("{output}");

    Ok(())
}

async fn run_geocode(config: &AppConfig, place: &str) -> anyhow::Result<()> {
    let geocoder = NominatimGeocoder::from_config(&config.nominatim)?;

    match geocoder.geocode(place).await? {
        Some(found) => {
            println!("📍 {}", found.name);
            println!("   {}", found.location);
            Ok(())
        },
        None => bail!("place not found: {place}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => AppConfig::load().context("failed to load configuration")?,
    };
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // -v overrides the configured filter
    let telemetry = if cli.verbose > 0 {
        config
            .telemetry
            .clone()
            .with_log_filter(log_filter_from_verbosity(cli.verbose))
    } else {
        config.telemetry.clone()
    };
    init_tracing(&telemetry)?;

    match cli.command {
        Commands::Search(args) => run_search(&config, args).await,
        Commands::Geocode { place } => run_geocode(&config, &place).await,
    }
}
