use tracing::debug;

use crate::geojson::{Feature, LineString, RouteProperties};
use crate::pipeline::Rejection;
use crate::pipeline::normalize::CoordinateNormalizer;
use crate::record::{FlightRecord, Position};
use crate::reference::{AirportEntry, ReferenceTables};

/// Joins a validated record with the reference tables into a route feature.
pub struct FeatureAssembler<'a> {
    tables: &'a ReferenceTables,
    normalizer: CoordinateNormalizer,
}

impl<'a> FeatureAssembler<'a> {
    pub fn new(tables: &'a ReferenceTables, normalizer: CoordinateNormalizer) -> Self {
        Self { tables, normalizer }
    }

    /// Builds the feature for `record`, whose destination already resolved to `destination`.
    ///
    /// Fails with [`Rejection::UnmappedAirline`] when the call-sign prefix is not
    /// registered. A country code without a display name is emitted as the code.
    pub fn assemble(
        &self,
        record: &FlightRecord,
        destination: &AirportEntry,
        departure: Position,
        arrival: Position,
    ) -> Result<Feature, Rejection> {
        let airline = self
            .tables
            .airline(record.airline_prefix())
            .ok_or(Rejection::UnmappedAirline)?;

        let country = match self.tables.country_name(&destination.country) {
            Some(name) => name,
            None => {
                debug!(country = %destination.country, "No display name for country");
                destination.country.as_str()
            }
        };

        Ok(Feature {
            properties: RouteProperties {
                origin: record.origin.clone(),
                destination: record.destination.clone(),
                airline: airline.to_string(),
                airport: destination.airport.clone(),
                country: country.to_string(),
            },
            geometry: LineString {
                coordinates: [
                    self.normalizer.origin(departure),
                    self.normalizer.destination(arrival),
                ],
            },
        })
    }
}
