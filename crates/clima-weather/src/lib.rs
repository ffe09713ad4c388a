//! Weather data and risk derivation for Clima
//!
//! Fetches current observations and forecasts from the weather backend and
//! derives the dashboard's four-axis risk assessment.

pub mod gateway;
pub mod risk;
pub mod types;

pub use gateway::WeatherGateway;
pub use risk::{assess, celsius_to_fahrenheit, uv_label};
pub use types::*;
