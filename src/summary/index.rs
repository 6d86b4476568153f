use chrono::Utc;
use std::collections::HashMap;

use crate::geojson::FeatureCollection;
use crate::summary::cargo::is_cargo;
use crate::summary::types::{AirlineSummary, CountrySummary, RouteIndex};

impl RouteIndex {
    /// Groups the routes of `collection` by destination country, then airline.
    pub fn from_collection(collection: &FeatureCollection) -> Self {
        let mut countries: Vec<CountrySummary> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for feature in &collection.features {
            let props = &feature.properties;

            let idx = *positions.entry(props.country.as_str()).or_insert_with(|| {
                countries.push(CountrySummary {
                    country: props.country.clone(),
                    routes: 0,
                    airlines: Vec::new(),
                });
                countries.len() - 1
            });

            let country = &mut countries[idx];
            country.routes += 1;

            match country.airlines.iter_mut().find(|a| a.name == props.airline) {
                Some(airline) => airline.routes += 1,
                None => country.airlines.push(AirlineSummary {
                    name: props.airline.clone(),
                    cargo: is_cargo(&props.airline),
                    routes: 1,
                }),
            }
        }

        RouteIndex {
            generated_at: Utc::now(),
            total_routes: collection.len(),
            countries,
        }
    }

    /// Countries whose name contains `word`, ignoring case and surrounding
    /// whitespace. An empty word matches every country.
    pub fn search(&self, word: &str) -> Vec<&CountrySummary> {
        let needle = word.trim().to_lowercase();
        self.countries
            .iter()
            .filter(|c| c.country.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn country(&self, name: &str) -> Option<&CountrySummary> {
        self.countries.iter().find(|c| c.country == name)
    }

    /// Number of distinct airlines across all countries.
    pub fn airline_count(&self) -> usize {
        let mut names: Vec<&str> = self
            .countries
            .iter()
            .flat_map(|c| c.airlines.iter().map(|a| a.name.as_str()))
            .collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }
}
