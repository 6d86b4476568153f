//! Row projections for the three reference sources.
//!
//! | Source          | Key                  | Value                    |
//! |-----------------|----------------------|--------------------------|
//! | `isolist.csv`   | `Code`               | `Name`                   |
//! | `airports.csv`  | `ident`              | `{airport: name, country: iso_country}` |
//! | `callsign.csv`  | first column         | `OPERATOR`               |

use super::{AirportEntry, RawRow};

/// Country code → display name.
pub fn country(row: &RawRow<'_>) -> Option<(String, String)> {
    let code = non_empty(row.get("Code")?)?;
    let name = row.get("Name")?;
    Some((code.to_string(), name.to_string()))
}

/// Airport ICAO code → airport name and ISO country.
pub fn airport(row: &RawRow<'_>) -> Option<(String, AirportEntry)> {
    let code = non_empty(row.get("ident")?)?;
    let entry = AirportEntry {
        airport: row.get("name")?.to_string(),
        country: row.get("iso_country")?.trim().to_string(),
    };
    Some((code.to_string(), entry))
}

/// Call-sign prefix → airline name.
///
/// The prefix column's header varies between registry exports, so the key
/// is taken by position.
pub fn airline(row: &RawRow<'_>) -> Option<(String, String)> {
    let prefix = non_empty(row.first()?)?;
    let operator = row.get("OPERATOR")?;
    Some((prefix.to_string(), operator.to_string()))
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
