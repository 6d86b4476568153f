use crate::config::{ANTIMERIDIAN_WRAP_THRESHOLD, COORDINATE_PRECISION};
use crate::geojson::CoordinatePair;
use crate::record::Position;

/// Enough fractional digits to print any finite `f64` exactly.
const EXACT_DIGITS: usize = 1074;

/// Formats a coordinate to [`COORDINATE_PRECISION`] decimal places.
///
/// Values exactly halfway between two outputs round away from zero.
pub fn round_decimal(value: f64) -> String {
    let value = if is_exact_tie(value) {
        value + value.signum() * 0.5 * 10f64.powi(-(COORDINATE_PRECISION as i32))
    } else {
        value
    };
    format!("{:.*}", COORDINATE_PRECISION, value)
}

fn is_exact_tie(value: f64) -> bool {
    if !value.is_finite() {
        return false;
    }
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    exact
        .split_once('.')
        .and_then(|(_, frac)| frac.get(COORDINATE_PRECISION..))
        .is_some_and(|tail| tail.trim_end_matches('0') == "5")
}

/// Rounds `[longitude, latitude]` component-wise.
pub fn round_pair(longitude: f64, latitude: f64) -> CoordinatePair {
    [round_decimal(longitude), round_decimal(latitude)]
}

/// Rounds positions for output and re-projects destinations across the antimeridian.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateNormalizer {
    antimeridian_threshold: f64,
}

impl Default for CoordinateNormalizer {
    fn default() -> Self {
        Self::new(ANTIMERIDIAN_WRAP_THRESHOLD)
    }
}

impl CoordinateNormalizer {
    pub fn new(antimeridian_threshold: f64) -> Self {
        Self {
            antimeridian_threshold,
        }
    }

    /// Shifts a longitude west of the threshold by a full turn.
    pub fn unwrap_longitude(&self, longitude: f64) -> f64 {
        if longitude < self.antimeridian_threshold {
            longitude + 360.0
        } else {
            longitude
        }
    }

    pub fn origin(&self, position: Position) -> CoordinatePair {
        round_pair(position.longitude, position.latitude)
    }

    pub fn destination(&self, position: Position) -> CoordinatePair {
        round_pair(self.unwrap_longitude(position.longitude), position.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(longitude: f64, latitude: f64) -> Position {
        Position {
            longitude,
            latitude,
            altitude: None,
        }
    }

    #[test]
    fn test_round_decimal_pads_and_truncates() {
        assert_eq!(round_decimal(126.45), "126.4500");
        assert_eq!(round_decimal(37.123456), "37.1235");
        assert_eq!(round_decimal(0.0), "0.0000");
        assert_eq!(round_decimal(-73.77890), "-73.7789");
    }

    #[test]
    fn test_exact_ties_round_away_from_zero() {
        assert_eq!(round_decimal(126.03125), "126.0313");
        assert_eq!(round_decimal(-0.03125), "-0.0313");
        assert_eq!(round_decimal(1.40625), "1.4063");
        assert_eq!(round_decimal(0.03124), "0.0312");
    }

    #[test]
    fn test_rounding_is_idempotent() {
        for formatted in ["126.4500", "-118.4081", "0.0001", "359.9999"] {
            let value: f64 = formatted.parse().unwrap();
            assert_eq!(round_decimal(value), formatted);
        }
    }

    #[test]
    fn test_antimeridian_threshold() {
        let normalizer = CoordinateNormalizer::default();

        assert_eq!(normalizer.unwrap_longitude(-25.0), 335.0);
        assert_eq!(normalizer.unwrap_longitude(-15.0), -15.0);
        assert_eq!(normalizer.unwrap_longitude(-20.0), -20.0);
        assert_eq!(normalizer.unwrap_longitude(140.38), 140.38);
    }

    #[test]
    fn test_only_destination_is_unwrapped() {
        let normalizer = CoordinateNormalizer::default();
        let los_angeles = at(-118.4081, 33.9425);

        assert_eq!(normalizer.origin(los_angeles), ["-118.4081", "33.9425"]);
        assert_eq!(normalizer.destination(los_angeles), ["241.5919", "33.9425"]);
    }

    #[test]
    fn test_custom_threshold() {
        let normalizer = CoordinateNormalizer::new(-30.0);

        assert_eq!(normalizer.unwrap_longitude(-25.0), -25.0);
        assert_eq!(normalizer.destination(at(-25.0, 10.0)), ["-25.0000", "10.0000"]);
    }
}
