use chrono::NaiveDate;
use clima_core::{AppError, NetworkError};
use serde::{Deserialize, Serialize};

/// Climate-risk severity, the unit used across all four axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Moderate,
    High,
    Extreme,
    /// Neutral default; unknown tiers from the server land here.
    #[default]
    #[serde(other)]
    Low,
}

impl RiskTier {
    /// Capitalized display label. Total over the enum.
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
            RiskTier::Extreme => "Extreme",
        }
    }

    /// Accent color for cards and badges.
    pub fn color(self) -> &'static str {
        match self {
            RiskTier::Low => "green",
            RiskTier::Moderate => "amber",
            RiskTier::High => "orange",
            RiskTier::Extreme => "red",
        }
    }
}

/// Current weather conditions at one coordinate pair.
///
/// A value object: re-fetched rather than mutated. Temperatures are °C,
/// humidity and rain probability percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub uv_index: f64,
    pub rain_probability: u8,
    pub wind_speed: f64,
    pub pressure: f64,
    pub visibility: f64,
}

/// One server-supplied risk axis. The backend owns the rain and air-quality
/// tiers; the client formats them but never re-derives them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerRiskAxis {
    pub value: f64,
    #[serde(default)]
    pub risk: RiskTier,
    #[serde(default)]
    pub description: String,
}

/// Risk axes as delivered by the weather backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerRisks {
    pub rain: ServerRiskAxis,
    pub uv: ServerRiskAxis,
    pub aqi: ServerRiskAxis,
}

/// Full payload of a current-weather fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub weather: WeatherObservation,
    pub risks: ServerRisks,
}

/// Temperature axis of the derived assessment. Value is whole °F.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureRisk {
    pub value: i32,
    pub risk: RiskTier,
    pub description: String,
}

/// Rain axis. Probability in percent, tier straight from the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainRisk {
    pub probability: u8,
    pub risk: RiskTier,
    pub description: String,
}

/// UV axis. The label accompanies, but is independent of, the tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UvRisk {
    pub index: f64,
    pub label: &'static str,
    pub risk: RiskTier,
    pub description: String,
}

/// Air-quality axis. Subtitle is fixed wording; the server tier is
/// authoritative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AqiRisk {
    pub value: f64,
    pub subtitle: &'static str,
    pub risk: RiskTier,
    pub description: String,
}

/// The four derived risk axes shown on the dashboard cards.
///
/// Recomputed from every weather fetch, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub temperature: TemperatureRisk,
    pub rain: RainRisk,
    pub uv: UvRisk,
    pub aqi: AqiRisk,
}

/// Forecast aggregation period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ForecastPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ForecastPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            ForecastPeriod::Daily => "daily",
            ForecastPeriod::Weekly => "weekly",
            ForecastPeriod::Monthly => "monthly",
            ForecastPeriod::Yearly => "yearly",
        }
    }
}

/// One projected point in a forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub temperature: f64,
    pub description: String,
}

/// Multi-horizon forecast for one (lat, lon, period) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub period: ForecastPeriod,
    #[serde(rename = "data")]
    pub points: Vec<ForecastPoint>,
    pub confidence: u8,
}

/// Weather backend errors.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather service returned status {status}")]
    Http { status: u16 },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Fold into the app-wide taxonomy; user-facing messages come from there.
impl From<WeatherError> for AppError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::Network(e) => AppError::Network(e.into()),
            WeatherError::Http { status } => AppError::Network(NetworkError::ServerError {
                status,
                message: format!("weather service returned status {}", status),
            }),
            WeatherError::Parse(detail) => AppError::MalformedResponse(detail),
        }
    }
}
