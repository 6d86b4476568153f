//! Raw flight rows as published in OpenSky flight lists.

use serde::Deserialize;

/// Header columns a flight list must carry to be processed.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "callsign",
    "origin",
    "destination",
    "longitude_1",
    "latitude_1",
    "altitude_1",
    "longitude_2",
    "latitude_2",
    "altitude_2",
];

/// One row of the flight list.
///
/// * `callsign`: identifier shown on ATC screens; the first three letters
///   usually name the airline (`AFR` for Air France, `DLH` for Lufthansa).
/// * `origin` / `destination`: four-letter ICAO airport codes, empty when unknown.
/// * `firstseen` / `lastseen`: UTC timestamps of the first and last message received.
/// * `*_1` / `*_2`: first and last detected position of the aircraft.
///
/// Any other columns in the file are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightRecord {
    pub callsign: String,
    pub origin: String,
    pub destination: String,
    pub firstseen: Option<String>,
    pub lastseen: Option<String>,
    pub longitude_1: Option<f64>,
    pub latitude_1: Option<f64>,
    pub altitude_1: Option<f64>,
    pub longitude_2: Option<f64>,
    pub latitude_2: Option<f64>,
    pub altitude_2: Option<f64>,
}

/// A geographic position; altitude is carried but never emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: Option<f64>,
}

impl FlightRecord {
    /// First detected position, if both coordinates are present.
    pub fn departure(&self) -> Option<Position> {
        Some(Position {
            longitude: self.longitude_1?,
            latitude: self.latitude_1?,
            altitude: self.altitude_1,
        })
    }

    /// Last detected position, if both coordinates are present.
    pub fn arrival(&self) -> Option<Position> {
        Some(Position {
            longitude: self.longitude_2?,
            latitude: self.latitude_2?,
            altitude: self.altitude_2,
        })
    }

    /// First three characters of the call-sign (fewer if the call-sign is shorter).
    pub fn airline_prefix(&self) -> &str {
        match self.callsign.char_indices().nth(3) {
            Some((idx, _)) => &self.callsign[..idx],
            None => &self.callsign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "callsign,number,icao24,registration,typecode,origin,destination,firstseen,lastseen,day,latitude_1,longitude_1,altitude_1,latitude_2,longitude_2,altitude_2";

    fn parse(row: &str) -> csv::Result<FlightRecord> {
        let data = format!("{HEADER}\n{row}\n");
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        rdr.deserialize().next().unwrap()
    }

    #[test]
    fn test_deserialize_opensky_row() {
        let record = parse(
            "KAL123,KE123,71be12,HL7630,B77W,RKSI,RJAA,2020-07-01 00:01:02+00:00,2020-07-01 02:10:00+00:00,2020-07-01 00:00:00+00:00,37.46,126.45,100,35.76,140.38,50",
        )
        .unwrap();

        assert_eq!(record.callsign, "KAL123");
        assert_eq!(record.origin, "RKSI");
        assert_eq!(record.destination, "RJAA");
        assert_eq!(record.firstseen.as_deref(), Some("2020-07-01 00:01:02+00:00"));

        let departure = record.departure().unwrap();
        assert_eq!(departure.longitude, 126.45);
        assert_eq!(departure.latitude, 37.46);
        assert_eq!(departure.altitude, Some(100.0));
    }

    #[test]
    fn test_empty_fields_deserialize_as_missing() {
        let record = parse("KAL123,,,,,RKSI,,,,,,,,,,").unwrap();

        assert_eq!(record.destination, "");
        assert!(record.departure().is_none());
        assert!(record.arrival().is_none());
    }

    #[test]
    fn test_non_numeric_coordinate_is_an_error() {
        let result = parse("KAL123,,,,,RKSI,RJAA,,,,north,126.45,100,35.76,140.38,50");
        assert!(result.is_err());
    }

    #[test]
    fn test_airline_prefix() {
        let mut record = FlightRecord {
            callsign: "KAL123".to_string(),
            ..Default::default()
        };
        assert_eq!(record.airline_prefix(), "KAL");

        record.callsign = "KE".to_string();
        assert_eq!(record.airline_prefix(), "KE");

        record.callsign = String::new();
        assert_eq!(record.airline_prefix(), "");
    }
}
