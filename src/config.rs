//! Pipeline configuration and the dataset-specific constants it defaults to.

use anyhow::{Result, anyhow};

use crate::reference::ReferenceTables;

/// ICAO code of the airport every emitted route departs from.
pub const DEFAULT_HOME_AIRPORT: &str = "RKSI";

/// Country of [`DEFAULT_HOME_AIRPORT`], used when the airport table does not
/// list the home airport itself.
pub const DEFAULT_HOME_COUNTRY: &str = "KR";

/// Destination longitudes west of this meridian get 360 added so the route
/// is drawn eastward across the Pacific instead of wrapping the whole map.
///
/// Tuned for departures from North-East Asia; flights landing just west of
/// the threshold (Iceland, Cape Verde) or near ±180° exactly have not been
/// checked against it.
pub const ANTIMERIDIAN_WRAP_THRESHOLD: f64 = -20.0;

/// Number of decimal places kept in every output coordinate.
pub const COORDINATE_PRECISION: usize = 4;

pub const COUNTRY_CODES_FILE: &str = "countryCodes.json";
pub const AIRPORT_CODES_FILE: &str = "airportCodes.json";
pub const AIRLINE_INFO_FILE: &str = "airlineInfo.json";
pub const FLIGHT_LIST_FILE: &str = "flightlist.geojson";

/// Business rules for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub home_airport: String,
    /// Overrides the country looked up from the airport table.
    pub home_country: Option<String>,
    pub antimeridian_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            home_airport: DEFAULT_HOME_AIRPORT.to_string(),
            home_country: None,
            antimeridian_threshold: ANTIMERIDIAN_WRAP_THRESHOLD,
        }
    }
}

impl PipelineConfig {
    pub fn new(home_airport: &str) -> Self {
        Self {
            home_airport: normalize_code(home_airport),
            ..Default::default()
        }
    }

    pub fn with_home_country(mut self, country: &str) -> Self {
        let country = normalize_code(country);
        self.home_country = (!country.is_empty()).then_some(country);
        self
    }

    pub fn with_antimeridian_threshold(mut self, threshold: f64) -> Self {
        self.antimeridian_threshold = threshold;
        self
    }

    /// Returns the country whose airports count as domestic.
    ///
    /// # Errors
    ///
    /// Fails when no override is set and a non-default home airport is
    /// missing from the airport table (or has no country there).
    pub fn resolve_home_country(&self, tables: &ReferenceTables) -> Result<String> {
        if let Some(country) = &self.home_country {
            return Ok(country.clone());
        }

        let listed = tables
            .airports
            .get(&self.home_airport)
            .map(|entry| entry.country.trim())
            .filter(|country| !country.is_empty());

        match listed {
            Some(country) => Ok(country.to_string()),
            None if self.home_airport == DEFAULT_HOME_AIRPORT => {
                Ok(DEFAULT_HOME_COUNTRY.to_string())
            }
            None => Err(anyhow!(
                "home airport '{}' has no country in the airport table; pass --home-country",
                self.home_airport
            )),
        }
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::AirportEntry;

    fn tables_with(code: &str, country: &str) -> ReferenceTables {
        let mut tables = ReferenceTables::default();
        tables.airports.insert(
            code.to_string(),
            AirportEntry {
                airport: "Incheon International Airport".to_string(),
                country: country.to_string(),
            },
        );
        tables
    }

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.home_airport, "RKSI");
        assert_eq!(config.home_country, None);
        assert_eq!(config.antimeridian_threshold, -20.0);
    }

    #[test]
    fn test_codes_are_trimmed_and_uppercased() {
        let config = PipelineConfig::new(" rksi ").with_home_country("kr");
        assert_eq!(config.home_airport, "RKSI");
        assert_eq!(config.home_country.as_deref(), Some("KR"));
    }

    #[test]
    fn test_blank_home_country_means_lookup() {
        let config = PipelineConfig::default().with_home_country("  ");
        assert_eq!(config.home_country, None);
    }

    #[test]
    fn test_home_country_resolved_from_airport_table() {
        let tables = tables_with("RKSI", "KR");
        let config = PipelineConfig::default();
        assert_eq!(config.resolve_home_country(&tables).unwrap(), "KR");
    }

    #[test]
    fn test_home_country_override_wins() {
        let tables = tables_with("RKSI", "KR");
        let config = PipelineConfig::default().with_home_country("JP");
        assert_eq!(config.resolve_home_country(&tables).unwrap(), "JP");
    }

    #[test]
    fn test_default_home_airport_falls_back_to_default_country() {
        let tables = tables_with("RJAA", "JP");
        let config = PipelineConfig::default();
        assert_eq!(config.resolve_home_country(&tables).unwrap(), DEFAULT_HOME_COUNTRY);
    }

    #[test]
    fn test_unknown_home_airport_is_an_error() {
        let tables = ReferenceTables::default();
        let err = PipelineConfig::new("ZZZZ")
            .resolve_home_country(&tables)
            .unwrap_err();
        assert!(err.to_string().contains("ZZZZ"));
    }
}
