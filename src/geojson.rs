//! GeoJSON shapes of the route artifact consumed by the map.
//!
//! Coordinates are fixed-precision decimal strings, not numbers.

use serde::{Deserialize, Serialize};

/// `[longitude, latitude]`, each formatted to a fixed number of decimals.
pub type CoordinatePair = [String; 2];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub properties: RouteProperties,
    pub geometry: LineString,
}

/// Attributes the map filters and labels routes by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteProperties {
    pub origin: String,
    pub destination: String,
    pub airline: String,
    pub airport: String,
    pub country: String,
}

/// Two-point line from the departure to the arrival position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "LineString")]
pub struct LineString {
    pub coordinates: [CoordinatePair; 2],
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(lng: &str, lat: &str) -> CoordinatePair {
        [lng.to_string(), lat.to_string()]
    }

    #[test]
    fn test_feature_collection_shape() {
        let collection = FeatureCollection {
            features: vec![Feature {
                properties: RouteProperties {
                    origin: "RKSI".into(),
                    destination: "RJAA".into(),
                    airline: "Korean Air".into(),
                    airport: "Narita".into(),
                    country: "Japan".into(),
                },
                geometry: LineString {
                    coordinates: [pair("126.4500", "37.4600"), pair("140.3800", "35.7600")],
                },
            }],
        };

        let json = serde_json::to_string(&collection).unwrap();

        assert_eq!(
            json,
            concat!(
                r#"{"type":"FeatureCollection","features":[{"type":"Feature","#,
                r#""properties":{"origin":"RKSI","destination":"RJAA","airline":"Korean Air","airport":"Narita","country":"Japan"},"#,
                r#""geometry":{"type":"LineString","coordinates":[["126.4500","37.4600"],["140.3800","35.7600"]]}}]}"#
            )
        );
    }

    #[test]
    fn test_empty_collection_reads_back() {
        let parsed: FeatureCollection =
            serde_json::from_str(r#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        assert!(parsed.is_empty());
    }
}
