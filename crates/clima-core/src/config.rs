use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Weather backend settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Geocoding (place search) settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// IP geolocation settings
    #[serde(default)]
    pub geolocation: GeolocationConfig,

    /// AI advisor (chat completion) settings
    #[serde(default)]
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the weather/forecast backend
    pub api_url: String,

    /// Staleness window for AI climate insights, in minutes
    #[serde(default = "default_insights_stale_minutes")]
    pub insights_stale_minutes: u32,
}

fn default_insights_stale_minutes() -> u32 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8787/api".to_string(),
            insights_stale_minutes: default_insights_stale_minutes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the Nominatim-compatible geocoding service
    pub api_url: String,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_url: "https://nominatim.openstreetmap.org".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Base URL of the IP geolocation service
    pub api_url: String,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            api_url: "https://ipapi.co".to_string(),
        }
    }
}

/// Chat-completion (LLM) backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Base URL of an OpenAI-compatible chat completion API
    pub api_url: String,

    /// Model name to request
    pub model: String,

    /// API key. Falls back to the CLIMA_AI_API_KEY environment variable
    /// when unset, so keys don't have to live in the config file.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama3-70b-8192".to_string(),
            api_key: std::env::var("CLIMA_AI_API_KEY").ok(),
        }
    }
}

impl AiConfig {
    /// Check if the advisor can be used (a key is available)
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clima");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            geocoding: GeocodingConfig::default(),
            geolocation: GeolocationConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("clima");
        Ok(config_dir.join("config.toml"))
    }

    /// Validate the configuration, collecting errors and warnings
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        for (field, value) in [
            ("weather.api_url", &self.weather.api_url),
            ("geocoding.api_url", &self.geocoding.api_url),
            ("geolocation.api_url", &self.geolocation.api_url),
            ("ai.api_url", &self.ai.api_url),
        ] {
            if let Err(e) = Url::parse(value) {
                result.add_error(field, format!("not a valid URL: {}", e));
            }
        }

        if self.weather.insights_stale_minutes == 0 {
            result.add_warning(
                "weather.insights_stale_minutes",
                "staleness window of 0 disables insight caching",
            );
        }

        if !self.ai.is_configured() {
            result.add_warning(
                "ai.api_key",
                "no API key configured; AI suggestions and insights are unavailable",
            );
        }

        if self.ai.model.is_empty() {
            result.add_error("ai.model", "model name must not be empty");
        }

        result
    }
}
