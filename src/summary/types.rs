//! Data types of the route index.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One airline flying to a country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirlineSummary {
    pub name: String,
    pub cargo: bool,
    pub routes: usize,
}

/// A destination country and the airlines that serve it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySummary {
    pub country: String,
    pub routes: usize,
    /// In order of first appearance in the collection.
    pub airlines: Vec<AirlineSummary>,
}

/// Country listing for a route collection, written as JSON next to the map data.
#[derive(Debug, Clone, Serialize)]
pub struct RouteIndex {
    pub generated_at: DateTime<Utc>,
    pub total_routes: usize,
    /// In order of first appearance in the collection.
    pub countries: Vec<CountrySummary>,
}
