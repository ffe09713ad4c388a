//! Forward geocoding: convert typed place names to coordinates.
//! Uses a Nominatim-compatible (OpenStreetMap) endpoint - free, no API key.

use crate::types::{Location, LocationError, PlaceSuggestion};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Clima/0.1.0 (https://github.com/clima)";
const SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    name: Option<String>,
    display_name: String,
    #[serde(rename = "type", default)]
    place_type: String,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    country: Option<String>,
}

impl NominatimPlace {
    /// Only settlement-level results are useful as dashboard locations.
    fn is_settlement(&self) -> bool {
        matches!(self.place_type.as_str(), "city" | "town" | "administrative")
    }

    fn city(&self) -> String {
        let from_address = self
            .address
            .as_ref()
            .and_then(|a| a.city.clone().or_else(|| a.town.clone()));

        from_address
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| {
                self.display_name
                    .split(',')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string()
            })
    }

    fn country(&self) -> String {
        self.address
            .as_ref()
            .and_then(|a| a.country.clone())
            .unwrap_or_else(|| {
                self.display_name
                    .split(',')
                    .next_back()
                    .unwrap_or_default()
                    .trim()
                    .to_string()
            })
    }

    fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.lat.parse().ok()?;
        let lon = self.lon.parse().ok()?;
        Some((lat, lon))
    }
}

/// Client for a Nominatim-compatible geocoding endpoint.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(base_url: &str) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<NominatimPlace>, LocationError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json"),
                ("q", query),
                ("limit", &limit.to_string()),
                ("addressdetails", "1"),
                ("type", "city"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LocationError::Http {
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| LocationError::Parse(e.to_string()))
    }

    /// Ranked city suggestions for a partial query, at most five.
    ///
    /// Failures are not surfaced: an unreachable or misbehaving geocoder
    /// degrades to an empty dropdown, never an error banner.
    pub async fn suggestions(&self, query: &str) -> Vec<PlaceSuggestion> {
        let places = match self.search(query, SUGGESTION_LIMIT).await {
            Ok(places) => places,
            Err(e) => {
                tracing::debug!("Suggestion search failed: {}", e);
                return Vec::new();
            }
        };

        places
            .into_iter()
            .filter(NominatimPlace::is_settlement)
            .filter_map(|place| {
                let (latitude, longitude) = place.coordinates()?;
                let city = place.city();
                let country = place.country();
                let display = format!("{}, {}", city, country);
                Some(PlaceSuggestion {
                    city,
                    country,
                    latitude,
                    longitude,
                    display,
                })
            })
            .take(SUGGESTION_LIMIT)
            .collect()
    }

    /// Resolve a full query to its single best match.
    pub async fn manual_search(&self, query: &str) -> Result<Location, LocationError> {
        let places = self.search(query, 1).await?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| LocationError::NotFound(query.to_string()))?;

        let (latitude, longitude) = place
            .coordinates()
            .ok_or_else(|| LocationError::Parse("unparseable coordinates".to_string()))?;

        let location = Location {
            city: place.city(),
            country: place.country(),
            latitude,
            longitude,
        };

        tracing::info!("Geocoded '{}' to {}", query, location.display());
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn place(ty: &str, name: &str, lat: &str, lon: &str) -> NominatimPlace {
        NominatimPlace {
            lat: lat.to_string(),
            lon: lon.to_string(),
            name: Some(name.to_string()),
            display_name: format!("{}, Some County, Testland", name),
            place_type: ty.to_string(),
            address: None,
        }
    }

    #[test]
    fn settlement_filter_accepts_cities_and_towns() {
        assert!(place("city", "London", "51.5", "-0.12").is_settlement());
        assert!(place("town", "Slough", "51.5", "-0.59").is_settlement());
        assert!(place("administrative", "Greater London", "51.5", "-0.12").is_settlement());
        assert!(!place("peak", "Ben Nevis", "56.8", "-5.0").is_settlement());
    }

    #[test]
    fn city_falls_back_to_display_name_head() {
        let mut p = place("city", "London", "51.5", "-0.12");
        p.name = None;
        assert_eq!(p.city(), "London");
    }

    #[test]
    fn country_falls_back_to_display_name_tail() {
        let p = place("city", "London", "51.5", "-0.12");
        assert_eq!(p.country(), "Testland");
    }

    #[test]
    fn unparseable_coordinates_are_none() {
        let p = place("city", "Bad", "fifty-one", "-0.12");
        assert!(p.coordinates().is_none());
    }
}
