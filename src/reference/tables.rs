use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::config::{AIRLINE_INFO_FILE, AIRPORT_CODES_FILE, COUNTRY_CODES_FILE};

/// Value stored per airport code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportEntry {
    pub airport: String,
    /// ISO 3166 alpha-2 country code.
    pub country: String,
}

/// The three lookup mappings, read-only for the duration of a pipeline run.
///
/// Stored on disk as plain JSON objects:
/// ```json
/// { "RJAA": { "airport": "Narita International Airport", "country": "JP" } }
/// { "JP": "Japan" }
/// { "KAL": "KOREAN AIR" }
/// ```
#[derive(Debug, Default, Clone)]
pub struct ReferenceTables {
    pub airports: HashMap<String, AirportEntry>,
    pub countries: HashMap<String, String>,
    pub airlines: HashMap<String, String>,
}

impl ReferenceTables {
    /// Loads `airportCodes.json`, `countryCodes.json` and `airlineInfo.json` from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let tables = Self {
            airports: read_json(&dir.join(AIRPORT_CODES_FILE))?,
            countries: read_json(&dir.join(COUNTRY_CODES_FILE))?,
            airlines: read_json(&dir.join(AIRLINE_INFO_FILE))?,
        };

        info!(
            dir = %dir.display(),
            airports = tables.airports.len(),
            countries = tables.countries.len(),
            airlines = tables.airlines.len(),
            "Reference tables loaded"
        );

        Ok(tables)
    }

    /// Returns the airport entry for an ICAO code.
    pub fn airport(&self, code: &str) -> Option<&AirportEntry> {
        self.airports.get(code)
    }

    /// Returns the display name for an ISO country code.
    pub fn country_name(&self, iso: &str) -> Option<&str> {
        self.countries.get(iso).map(String::as_str)
    }

    /// Returns the airline registered for a call-sign prefix. Case-sensitive.
    pub fn airline(&self, prefix: &str) -> Option<&str> {
        self.airlines.get(prefix).map(String::as_str)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read reference mapping {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid reference mapping {}", path.display()))
}
