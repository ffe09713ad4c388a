//! IP-based location auto-detection.
//!
//! Best-effort: good enough to seed the dashboard with a city, not a
//! substitute for the user picking their own location.

use crate::types::{Location, LocationError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    city: Option<String>,
    country_name: Option<String>,
    latitude: f64,
    longitude: f64,
}

/// Client for an ipapi.co-style IP geolocation endpoint.
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: Client,
    base_url: String,
}

impl IpLocator {
    pub fn new(base_url: &str) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Detect the user's approximate location from their public IP.
    pub async fn detect(&self) -> Result<Location, LocationError> {
        let url = format!("{}/json/", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(LocationError::Http {
                status: response.status().as_u16(),
            });
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Parse(e.to_string()))?;

        let location = Location {
            city: body.city.unwrap_or_default(),
            country: body.country_name.unwrap_or_default(),
            latitude: body.latitude,
            longitude: body.longitude,
        };

        if !location.is_valid() {
            return Err(LocationError::Parse(format!(
                "coordinates out of range: {}, {}",
                location.latitude, location.longitude
            )));
        }

        tracing::info!("Detected location: {}", location.display());
        Ok(location)
    }
}
