use clima_core::{AppError, NetworkError};
use serde::{Deserialize, Serialize};

/// A resolved geographic location.
///
/// Produced by auto-detection, suggestion selection or manual search, and
/// replaced wholesale on every new selection. Everything downstream
/// (weather, forecast, AI) gates on one of these existing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Coordinates within the valid WGS84 range.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// "City, Country" label shown in the location input.
    pub fn display(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// One ranked entry in the suggestion dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub display: String,
}

impl PlaceSuggestion {
    /// Turn a chosen suggestion into a Location. No network involved.
    pub fn into_location(self) -> Location {
        Location {
            city: self.city,
            country: self.country,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Location service errors.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Service returned status {status}")]
    Http { status: u16 },

    #[error("No results for query: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Fold into the app-wide taxonomy; user-facing messages come from there.
impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::Network(e) => AppError::Network(e.into()),
            LocationError::Http { status } => AppError::Network(NetworkError::ServerError {
                status,
                message: format!("location service returned status {}", status),
            }),
            LocationError::NotFound(query) => AppError::NotFound(query),
            LocationError::Parse(detail) => AppError::MalformedResponse(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn loc(lat: f64, lon: f64) -> Location {
        Location {
            city: "Test".to_string(),
            country: "Nowhere".to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn coordinates_in_range_are_valid() {
        assert!(loc(40.7, -74.0).is_valid());
        assert!(loc(-90.0, 180.0).is_valid());
        assert!(loc(90.0, -180.0).is_valid());
    }

    #[test]
    fn coordinates_out_of_range_are_invalid() {
        assert!(!loc(90.1, 0.0).is_valid());
        assert!(!loc(0.0, -180.5).is_valid());
    }

    #[test]
    fn display_joins_city_and_country() {
        assert_eq!(loc(1.0, 2.0).display(), "Test, Nowhere");
    }

    #[test]
    fn suggestion_maps_to_location_without_losing_coordinates() {
        let suggestion = PlaceSuggestion {
            city: "London".to_string(),
            country: "United Kingdom".to_string(),
            latitude: 51.5074,
            longitude: -0.1278,
            display: "London, United Kingdom".to_string(),
        };
        let location = suggestion.into_location();
        assert_eq!(location.city, "London");
        assert_eq!(location.latitude, 51.5074);
        assert_eq!(location.longitude, -0.1278);
    }

    #[test]
    fn errors_fold_into_app_taxonomy() {
        let not_found: AppError = LocationError::NotFound("atlantis".to_string()).into();
        assert!(matches!(not_found, AppError::NotFound(_)));
        assert!(!not_found.is_retryable());

        let parse: AppError = LocationError::Parse("bad body".to_string()).into();
        assert!(matches!(parse, AppError::MalformedResponse(_)));
        assert!(parse.is_retryable());

        let http: AppError = LocationError::Http { status: 503 }.into();
        assert!(matches!(http, AppError::Network(_)));
        assert!(http.user_message().contains("server"));
    }
}
