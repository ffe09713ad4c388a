//! Identity-key helpers.
//!
//! A query's identity is the endpoint plus every input value that affects
//! its response. Coordinates are quantized so float noise doesn't split
//! cache entries; structured inputs (profile, observation) are folded into
//! a digest.

use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Coordinates quantized to 1e-4 degrees (about 11 m), hashable and
/// comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    lat_e4: i64,
    lon_e4: i64,
}

impl CoordKey {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat_e4: (lat * 1e4).round() as i64,
            lon_e4: (lon * 1e4).round() as i64,
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat_e4 as f64 / 1e4
    }

    pub fn lon(&self) -> f64 {
        self.lon_e4 as f64 / 1e4
    }
}

/// Stable digest of any serializable input, for folding structured values
/// into a query identity. Changing any field changes the digest.
pub fn digest<T: Serialize>(value: &T) -> u64 {
    // Serialization of our input types is infallible; fall back to an
    // empty string rather than poisoning the key on a pathological value.
    let json = serde_json::to_string(value).unwrap_or_default();
    let mut hasher = DefaultHasher::new();
    json.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn coord_key_ignores_float_noise() {
        assert_eq!(CoordKey::new(40.70001, -74.0), CoordKey::new(40.70001, -74.0));
        assert_eq!(
            CoordKey::new(40.7, -74.0),
            CoordKey::new(40.700004, -74.000004)
        );
    }

    #[test]
    fn coord_key_separates_distinct_places() {
        assert_ne!(CoordKey::new(40.7, -74.0), CoordKey::new(51.5, -0.12));
    }

    #[test]
    fn coord_key_round_trips_within_quantum() {
        let key = CoordKey::new(40.7128, -74.006);
        assert!((key.lat() - 40.7128).abs() < 1e-4);
        assert!((key.lon() - (-74.006)).abs() < 1e-4);
    }

    #[test]
    fn digest_changes_with_any_field() {
        #[derive(Serialize)]
        struct Input {
            a: u32,
            b: &'static str,
        }
        let d1 = digest(&Input { a: 1, b: "x" });
        let d2 = digest(&Input { a: 2, b: "x" });
        let d3 = digest(&Input { a: 1, b: "y" });
        assert_ne!(d1, d2);
        assert_ne!(d1, d3);
        assert_eq!(d1, digest(&Input { a: 1, b: "x" }));
    }
}
