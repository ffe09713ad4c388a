//! HTTP client for the weather/forecast backend.

use crate::types::{ForecastPeriod, ForecastSeries, WeatherError, WeatherReport};
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for the weather backend. Single source of truth for current
/// observations; everything risk- or AI-related hangs off its output.
#[derive(Debug, Clone)]
pub struct WeatherGateway {
    client: Client,
    base_url: String,
}

impl WeatherGateway {
    pub fn new(base_url: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current weather and server-side risk axes for a coordinate pair.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("lat", lat.to_string()), ("lon", lon.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Http {
                status: response.status().as_u16(),
            });
        }

        let report: WeatherReport = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        tracing::debug!(
            "Weather for ({}, {}): {}°C, UV {}",
            lat,
            lon,
            report.weather.temperature,
            report.weather.uv_index
        );
        Ok(report)
    }

    /// Fetch the forecast series for one aggregation period.
    pub async fn forecast(
        &self,
        lat: f64,
        lon: f64,
        period: ForecastPeriod,
    ) -> Result<ForecastSeries, WeatherError> {
        let url = format!("{}/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("period", period.as_str().to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Http {
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))
    }
}
