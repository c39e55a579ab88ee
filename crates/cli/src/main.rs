//! PrecipTech CLI - Precipitation estimation from gauge stations

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use preciptech_algorithms::estimate;
use preciptech_core::io::read_stations_csv;
use preciptech_core::{
    Auxiliary, EstimationOptions, EstimationResult, GeoPoint, Method, Station, StationSummary,
};

#[derive(Parser)]
#[command(name = "preciptech")]
#[command(author, version, about = "Precipitation estimation from gauge stations", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a station CSV file
    Info {
        /// Station file (lat,lng,precip[,name])
        input: PathBuf,
    },
    /// Estimate precipitation at a target location
    Estimate {
        /// Station file (lat,lng,precip[,name])
        input: PathBuf,
        /// Target latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Target longitude
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Method: arithmetic, normal-ratio, idw, thiessen, isohyetal
        #[arg(short, long, default_value = "idw")]
        method: String,
        /// Normal annual precipitation (normal-ratio)
        #[arg(long)]
        normal: Option<f64>,
        /// IDW power parameter
        #[arg(long)]
        power: Option<f64>,
        /// Isohyetal grid resolution (samples per axis)
        #[arg(long)]
        grid_size: Option<usize>,
        /// Number of isohyets
        #[arg(long)]
        contours: Option<usize>,
        /// Thiessen bounding box margin (degrees)
        #[arg(long)]
        padding: Option<f64>,
        /// JSON file with estimation options; flags override its values
        #[arg(long)]
        options: Option<PathBuf>,
        /// Print the full result, including geometry, as JSON
        #[arg(long)]
        json: bool,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_stations(path: &Path) -> Result<Vec<Station>> {
    let pb = spinner("Reading stations...");
    let result = read_stations_csv(path);
    pb.finish_and_clear();
    let stations =
        result.with_context(|| format!("Failed to read stations from {}", path.display()))?;
    info!("Loaded {} stations", stations.len());
    Ok(stations)
}

fn load_options(path: Option<&Path>) -> Result<EstimationOptions> {
    let Some(path) = path else {
        return Ok(EstimationOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read options from {}", path.display()))?;
    let options = serde_json::from_str(&text).context("Invalid options file")?;
    debug!("Options loaded from {}", path.display());
    Ok(options)
}

fn print_result(result: &EstimationResult, elapsed: std::time::Duration) {
    println!("Method: {}", result.method.label());
    println!("Estimated precipitation: {:.3}", result.value);
    match &result.auxiliary {
        Some(Auxiliary::Polygons(polygons)) => {
            println!("Thiessen cells: {}", polygons.len());
        }
        Some(Auxiliary::Contours(contours)) => {
            println!("Isohyets:");
            for c in contours {
                println!(
                    "  {:>10.3}  {} ring(s), area {:.6}",
                    c.value,
                    c.rings.len(),
                    c.exterior_area()
                );
            }
        }
        None => {}
    }
    println!("  Processing time: {:.2?}", elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Info { input } => {
            let stations = read_stations(&input)?;
            let Some(summary) = StationSummary::of(&stations) else {
                anyhow::bail!("No stations in {}", input.display());
            };
            let b = summary.bounds;

            println!("File: {}", input.display());
            println!("Stations: {}", summary.count);
            println!(
                "Bounds: lat [{:.6}, {:.6}], lng [{:.6}, {:.6}]",
                b.min_lat, b.max_lat, b.min_lng, b.max_lng
            );
            println!("\nPrecipitation:");
            println!("  Min: {:.4}", summary.min_precipitation);
            println!("  Max: {:.4}", summary.max_precipitation);
            println!("  Mean: {:.4}", summary.mean_precipitation);

            let available: Vec<&str> = Method::ALL
                .iter()
                .filter(|m| summary.count >= m.min_stations())
                .map(|m| m.as_str())
                .collect();
            println!("\nApplicable methods: {}", available.join(", "));
        }

        Commands::Estimate {
            input,
            lat,
            lng,
            method,
            normal,
            power,
            grid_size,
            contours,
            padding,
            options,
            json,
        } => {
            let method: Method = method.parse().context("Invalid method")?;
            let target = GeoPoint::new(lat, lng).context("Invalid target")?;

            let mut opts = load_options(options.as_deref())?;
            if let Some(n) = normal {
                opts.normal_precipitation = Some(n);
            }
            if let Some(p) = power {
                opts.power = p;
            }
            if let Some(g) = grid_size {
                opts.grid_size = g;
            }
            if let Some(c) = contours {
                opts.contour_count = c;
            }
            if let Some(p) = padding {
                opts.padding = p;
            }

            let stations = read_stations(&input)?;

            let pb = spinner(&format!("Estimating ({})...", method));
            let start = Instant::now();
            let result = estimate(method, &stations, target, &opts);
            let elapsed = start.elapsed();
            pb.finish_and_clear();
            let result =
                result.with_context(|| format!("{} estimation failed", method.label()))?;

            if json {
                let out = serde_json::to_string_pretty(&result)
                    .context("Failed to serialize result")?;
                println!("{}", out);
            } else {
                print_result(&result, elapsed);
            }
        }
    }

    Ok(())
}
