use crate::pipeline::Rejection;
use crate::record::FlightRecord;
use crate::reference::{AirportEntry, ReferenceTables};

/// Keeps international departures from the home airport.
pub struct RouteFilter<'a> {
    home_airport: String,
    home_country: String,
    tables: &'a ReferenceTables,
}

impl<'a> RouteFilter<'a> {
    pub fn new(home_airport: &str, home_country: &str, tables: &'a ReferenceTables) -> Self {
        Self {
            home_airport: home_airport.to_string(),
            home_country: home_country.to_string(),
            tables,
        }
    }

    /// Returns the destination airport if the record is an international
    /// departure from the home airport.
    ///
    /// A destination missing from the airport table, or listed there without
    /// a country, is rejected as unmapped.
    pub fn check(&self, record: &FlightRecord) -> Result<&'a AirportEntry, Rejection> {
        if record.origin != self.home_airport {
            return Err(Rejection::NotFromHome);
        }
        if record.destination.is_empty() {
            return Err(Rejection::NoDestination);
        }

        let destination = self
            .tables
            .airport(&record.destination)
            .filter(|entry| !entry.country.is_empty())
            .ok_or(Rejection::UnmappedDestination)?;

        if destination.country == self.home_country {
            return Err(Rejection::DomesticDestination);
        }

        Ok(destination)
    }

    pub fn is_valid(&self, record: &FlightRecord) -> bool {
        self.check(record).is_ok()
    }
}
