//! CLI entry point for the flight route builder.
//!
//! Provides subcommands for materializing the reference lookup tables,
//! generating the GeoJSON route collection from a raw flight list, and
//! summarizing a generated collection by destination country.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flight_routes::config::{
    AIRLINE_INFO_FILE, AIRPORT_CODES_FILE, ANTIMERIDIAN_WRAP_THRESHOLD, COUNTRY_CODES_FILE,
    DEFAULT_HOME_AIRPORT, FLIGHT_LIST_FILE, PipelineConfig,
};
use flight_routes::geojson::FeatureCollection;
use flight_routes::output::{append_record, print_json, write_json_atomic};
use flight_routes::pipeline::generate;
use flight_routes::reference::{ReferenceTables, generate_mapping, projections};
use flight_routes::summary::RouteIndex;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "flight_routes")]
#[command(about = "Builds a GeoJSON map of international routes from one airport", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the reference CSVs into the JSON lookup tables
    References {
        /// Country list with `Code` and `Name` columns
        #[arg(long, default_value = "raw_data/isolist.csv")]
        countries: PathBuf,

        /// Airport list with `ident`, `name` and `iso_country` columns
        #[arg(long, default_value = "raw_data/airports.csv")]
        airports: PathBuf,

        /// Call-sign registry: prefix in the first column, `OPERATOR` column
        #[arg(long, default_value = "raw_data/callsign.csv")]
        airlines: PathBuf,

        /// Directory to write the JSON tables to
        #[arg(short, long, default_value = "public/data")]
        out_dir: PathBuf,
    },
    /// Generate the route collection from a flight list
    Generate {
        /// Path or URL of the flight list (CSV, optionally gzipped)
        #[arg(short, long, value_name = "FILE_OR_URL")]
        input: String,

        /// Directory holding the JSON lookup tables
        #[arg(short, long, default_value = "public/data")]
        reference_dir: PathBuf,

        /// GeoJSON file to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ICAO code of the departure airport
        #[arg(long, env = "HOME_AIRPORT", default_value = DEFAULT_HOME_AIRPORT)]
        home_airport: String,

        /// Country treated as domestic (default: the home airport's country)
        #[arg(long, env = "HOME_COUNTRY")]
        home_country: Option<String>,

        /// Destination longitudes below this get 360 added
        #[arg(long, env = "ANTIMERIDIAN_THRESHOLD", default_value_t = ANTIMERIDIAN_WRAP_THRESHOLD, allow_hyphen_values = true)]
        antimeridian_threshold: f64,

        /// Optional CSV file to append run statistics to
        #[arg(long)]
        stats_csv: Option<PathBuf>,
    },
    /// Summarize a route collection by destination country
    Summarize {
        /// GeoJSON route collection
        #[arg(short, long, default_value = "public/data/flightlist.geojson")]
        input: PathBuf,

        /// JSON file to write the index to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only show countries whose name contains this word
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/flight_routes.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("flight_routes.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::References {
            countries,
            airports,
            airlines,
            out_dir,
        } => {
            generate_mapping(
                &countries,
                &out_dir.join(COUNTRY_CODES_FILE),
                projections::country,
            )?;
            generate_mapping(
                &airports,
                &out_dir.join(AIRPORT_CODES_FILE),
                projections::airport,
            )?;
            generate_mapping(
                &airlines,
                &out_dir.join(AIRLINE_INFO_FILE),
                projections::airline,
            )?;
            info!(out_dir = %out_dir.display(), "Reference tables generated");
        }
        Commands::Generate {
            input,
            reference_dir,
            output,
            home_airport,
            home_country,
            antimeridian_threshold,
            stats_csv,
        } => {
            let mut config = PipelineConfig::new(&home_airport)
                .with_antimeridian_threshold(antimeridian_threshold);
            if let Some(country) = home_country {
                config = config.with_home_country(&country);
            }

            let tables = ReferenceTables::load(&reference_dir)?;
            let output = output.unwrap_or_else(|| reference_dir.join(FLIGHT_LIST_FILE));

            let stats = generate(&config, &tables, &input, &output).await?;

            if let Some(path) = stats_csv {
                append_record(&path, &stats)?;
            }
        }
        Commands::Summarize {
            input,
            output,
            search,
        } => {
            let content = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let collection: FeatureCollection = serde_json::from_str(&content)
                .with_context(|| format!("invalid route collection {}", input.display()))?;

            let index = RouteIndex::from_collection(&collection);
            info!(
                routes = index.total_routes,
                countries = index.countries.len(),
                airlines = index.airline_count(),
                "Route index built"
            );

            match search {
                Some(word) => {
                    for country in index.search(&word) {
                        print_json(country)?;
                    }
                }
                None => {
                    for country in &index.countries {
                        info!(
                            country = %country.country,
                            routes = country.routes,
                            airlines = country.airlines.len(),
                            "Country"
                        );
                    }
                }
            }

            if let Some(path) = output {
                write_json_atomic(&path, &index)?;
                info!(path = %path.display(), "Route index written");
            }
        }
    }

    Ok(())
}
