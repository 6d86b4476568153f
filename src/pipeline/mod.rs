//! Route pipeline: one streaming pass over a flight list producing the
//! GeoJSON route collection.
//!
//! Each row goes through [`RouteFilter`] → [`Deduplicator`] →
//! [`CoordinateNormalizer`] + [`FeatureAssembler`]. Rows that fall out at any
//! stage are counted by [`Rejection`] kind; none of them is an error.

pub mod assemble;
pub mod dedup;
pub mod filter;
pub mod normalize;

pub use assemble::FeatureAssembler;
pub use dedup::Deduplicator;
pub use filter::RouteFilter;
pub use normalize::CoordinateNormalizer;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::geojson::{Feature, FeatureCollection};
use crate::output::write_json_atomic;
use crate::record::{FlightRecord, REQUIRED_COLUMNS};
use crate::reference::ReferenceTables;
use crate::source::open_source;
use crate::stats::RunStats;

/// Why a row produced no feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Unparsable row, or a required coordinate is missing.
    Malformed,
    NotFromHome,
    NoDestination,
    /// Destination absent from the airport table.
    UnmappedDestination,
    DomesticDestination,
    /// Same callsign and destination as an earlier row.
    Duplicate,
    /// Call-sign prefix absent from the airline table.
    UnmappedAirline,
}

/// Everything one run produces.
#[derive(Debug)]
pub struct RunOutput {
    pub collection: FeatureCollection,
    pub stats: RunStats,
}

/// Mutable state owned by a single run.
struct RunState {
    dedup: Deduplicator,
    collection: FeatureCollection,
    stats: RunStats,
}

/// Configured pipeline over a set of reference tables.
///
/// Holds no per-run state, so [`Pipeline::run`] can be called repeatedly.
pub struct Pipeline<'a> {
    home_airport: String,
    home_country: String,
    filter: RouteFilter<'a>,
    assembler: FeatureAssembler<'a>,
}

impl<'a> Pipeline<'a> {
    /// # Errors
    ///
    /// Fails if the home country cannot be resolved, see
    /// [`PipelineConfig::resolve_home_country`].
    pub fn new(config: &PipelineConfig, tables: &'a ReferenceTables) -> Result<Self> {
        let home_country = config.resolve_home_country(tables)?;
        let normalizer = CoordinateNormalizer::new(config.antimeridian_threshold);

        Ok(Self {
            filter: RouteFilter::new(&config.home_airport, &home_country, tables),
            assembler: FeatureAssembler::new(tables, normalizer),
            home_airport: config.home_airport.clone(),
            home_country,
        })
    }

    pub fn home_country(&self) -> &str {
        &self.home_country
    }

    /// Streams a flight-list CSV and collects one feature per new route.
    ///
    /// Features keep the order in which their first valid row appears.
    ///
    /// # Errors
    ///
    /// Fails on an I/O error from `reader`, or when the header lacks one of
    /// [`REQUIRED_COLUMNS`]. Bad rows are skipped.
    pub fn run<R: Read>(&self, reader: R) -> Result<RunOutput> {
        let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);

        let headers = rdr.headers().context("failed to read flight list header")?;
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            bail!("flight list is missing required columns: {}", missing.join(", "));
        }

        let mut state = RunState {
            dedup: Deduplicator::new(),
            collection: FeatureCollection::new(),
            stats: RunStats::new(&self.home_airport, &self.home_country),
        };

        for result in rdr.deserialize::<FlightRecord>() {
            state.stats.rows_read += 1;

            let outcome = match result {
                Ok(record) => self.process(&mut state.dedup, &record),
                Err(e) if e.is_io_error() => {
                    return Err(e).context("failed to read flight list");
                }
                Err(e) => {
                    debug!(error = %e, "Malformed flight row");
                    Err(Rejection::Malformed)
                }
            };

            match outcome {
                Ok(feature) => {
                    state.stats.features += 1;
                    state.collection.features.push(feature);
                }
                Err(rejection) => state.stats.record(rejection),
            }
        }

        if state.stats.malformed > 0 {
            warn!(malformed = state.stats.malformed, "Skipped malformed flight rows");
        }
        debug!(legs = state.dedup.len(), "Distinct legs seen");

        Ok(RunOutput {
            collection: state.collection,
            stats: state.stats,
        })
    }

    fn process(
        &self,
        dedup: &mut Deduplicator,
        record: &FlightRecord,
    ) -> Result<Feature, Rejection> {
        let destination = self.filter.check(record)?;

        // an incomplete observation must not claim the leg
        let (departure, arrival) = record
            .departure()
            .zip(record.arrival())
            .ok_or(Rejection::Malformed)?;

        if !dedup.should_process(record) {
            return Err(Rejection::Duplicate);
        }

        self.assembler
            .assemble(record, destination, departure, arrival)
            .inspect_err(|_| {
                debug!(callsign = %record.callsign, "No airline registered for call-sign prefix")
            })
    }
}

/// Runs the pipeline over `input` (path or URL) and atomically writes the
/// collection to `output`. Nothing is written if the run fails.
#[tracing::instrument(skip(config, tables), fields(home_airport = %config.home_airport, output = %output.display()))]
pub async fn generate(
    config: &PipelineConfig,
    tables: &ReferenceTables,
    input: &str,
    output: &Path,
) -> Result<RunStats> {
    let pipeline = Pipeline::new(config, tables)?;
    let reader = open_source(input).await?;

    info!(home_country = pipeline.home_country(), "Processing flight list");
    let RunOutput { collection, stats } = pipeline
        .run(reader)
        .with_context(|| format!("failed to process flight list {input}"))?;

    write_json_atomic(output, &collection)?;

    info!(
        rows = stats.rows_read,
        features = stats.features,
        duplicates = stats.duplicate,
        unmapped_airline = stats.unmapped_airline,
        acceptance_pct = stats.acceptance_pct(),
        "Route collection written"
    );

    Ok(stats.with_input(input))
}
