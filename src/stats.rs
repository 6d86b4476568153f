use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pipeline::Rejection;

/// Counters for one pipeline run, appended as a CSV row to the stats log.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    pub timestamp: DateTime<Utc>,
    pub input: String,
    pub home_airport: String,
    pub home_country: String,
    pub rows_read: usize,
    pub features: usize,

    // rejections
    pub malformed: usize,
    pub not_from_home: usize,
    pub no_destination: usize,
    pub unmapped_destination: usize,
    pub domestic_destination: usize,
    pub duplicate: usize,
    pub unmapped_airline: usize,
}

impl RunStats {
    pub fn new(home_airport: &str, home_country: &str) -> Self {
        RunStats {
            timestamp: Utc::now(),
            home_airport: home_airport.to_string(),
            home_country: home_country.to_string(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, rejection: Rejection) {
        let counter = match rejection {
            Rejection::Malformed => &mut self.malformed,
            Rejection::NotFromHome => &mut self.not_from_home,
            Rejection::NoDestination => &mut self.no_destination,
            Rejection::UnmappedDestination => &mut self.unmapped_destination,
            Rejection::DomesticDestination => &mut self.domestic_destination,
            Rejection::Duplicate => &mut self.duplicate,
            Rejection::UnmappedAirline => &mut self.unmapped_airline,
        };
        *counter += 1;
    }

    pub fn rejected(&self) -> usize {
        self.malformed
            + self.not_from_home
            + self.no_destination
            + self.unmapped_destination
            + self.domestic_destination
            + self.duplicate
            + self.unmapped_airline
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    /// Share of rows that became a feature.
    pub fn acceptance_pct(&self) -> f64 {
        Self::pct(self.features, self.rows_read)
    }

    /// Set the input the run consumed
    pub fn with_input(mut self, input: &str) -> Self {
        self.input = input.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(RunStats::pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(RunStats::pct(50, 100), 50.0);
        assert_eq!(RunStats::pct(1, 4), 25.0);
    }

    #[test]
    fn test_record_rejections() {
        let mut stats = RunStats::new("RKSI", "KR");
        stats.record(Rejection::Duplicate);
        stats.record(Rejection::Duplicate);
        stats.record(Rejection::UnmappedAirline);
        stats.record(Rejection::Malformed);

        assert_eq!(stats.duplicate, 2);
        assert_eq!(stats.unmapped_airline, 1);
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.rejected(), 4);
    }

    #[test]
    fn test_acceptance_pct() {
        let mut stats = RunStats::default();
        stats.rows_read = 200;
        stats.features = 50;

        assert_eq!(stats.acceptance_pct(), 25.0);
    }

    #[test]
    fn test_with_input() {
        let stats = RunStats::new("RKSI", "KR").with_input("flightlist.csv.gz");
        assert_eq!(stats.input, "flightlist.csv.gz");
        assert_eq!(stats.home_airport, "RKSI");
    }
}
