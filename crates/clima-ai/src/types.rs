use chrono::{DateTime, Utc};
use clima_core::{AppError, ConfigError, NetworkError};
use serde::{Deserialize, Serialize};

/// Category of a personalized suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Energy,
    Health,
    Safety,
    Timing,
    /// Catch-all; unrecognized kinds from the model land here.
    #[default]
    #[serde(other)]
    General,
}

impl SuggestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionKind::Energy => "energy",
            SuggestionKind::Health => "health",
            SuggestionKind::Safety => "safety",
            SuggestionKind::Timing => "timing",
            SuggestionKind::General => "general",
        }
    }
}

/// One AI-generated recommendation. Ephemeral: the whole list is replaced
/// on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    Warning,
    Critical,
    #[default]
    #[serde(other)]
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Precipitation,
    Seasonal,
    Anomaly,
    Longterm,
    #[default]
    #[serde(other)]
    Temperature,
}

/// One AI-generated climate insight, richer than a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub content: String,
    pub severity: InsightSeverity,
    pub category: InsightCategory,
    /// 0-100
    pub confidence: u8,
    pub timeframe: String,
}

/// Insights plus the moment they were generated, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightBundle {
    pub insights: Vec<Insight>,
    pub generated: DateTime<Utc>,
}

const TEMPERATURE_CHANGE_RANGE: std::ops::RangeInclusive<i32> = -20..=20;
const RAINFALL_CHANGE_RANGE: std::ops::RangeInclusive<i32> = -50..=50;

/// A what-if climate delta chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationInput {
    /// Whole °F, within [-20, 20]
    pub temperature_change_f: i32,
    /// Percent, within [-50, 50]
    pub rainfall_change_pct: i32,
}

impl SimulationInput {
    /// Validate the delta against the slider ranges. Out-of-range input is
    /// rejected here so a simulation request is never issued for it.
    pub fn new(temperature_change_f: i32, rainfall_change_pct: i32) -> Result<Self, String> {
        if !TEMPERATURE_CHANGE_RANGE.contains(&temperature_change_f) {
            return Err(format!(
                "temperature change {}°F outside [-20, 20]",
                temperature_change_f
            ));
        }
        if !RAINFALL_CHANGE_RANGE.contains(&rainfall_change_pct) {
            return Err(format!(
                "rainfall change {}% outside [-50, 50]",
                rainfall_change_pct
            ));
        }
        Ok(Self {
            temperature_change_f,
            rainfall_change_pct,
        })
    }
}

/// Result of a scenario run. Never cached; each run is fresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub impact: String,
    pub recommendations: Vec<String>,
    pub health_risks: Vec<String>,
}

/// AI advisor errors.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("AI service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    #[error("No API key configured")]
    MissingApiKey,
}

impl AiError {
    /// Malformed responses are treated identically to network failures by
    /// callers: retryable, never cached as success.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AiError::Network(_) | AiError::MalformedResponse(_))
    }
}

/// Fold into the app-wide taxonomy; user-facing messages come from there.
impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Network(e) => AppError::Network(e.into()),
            AiError::Api { status, message } => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            AiError::MalformedResponse(detail) => AppError::MalformedResponse(detail),
            AiError::MissingApiKey => {
                AppError::Config(ConfigError::MissingSetting("ai.api_key".to_string()))
            }
        }
    }
}
