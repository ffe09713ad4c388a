//! Clima command-line dashboard.
//!
//! Resolves a location (argument or IP auto-detect), fetches the current
//! weather, derives the risk axes and, when a profile and an AI key are
//! available, prints personalized recommendations.

mod dashboard;

use anyhow::{bail, Context, Result};
use chrono::Utc;

use clima_ai::{AiAdvisor, ChatClient};
use clima_core::{AppError, Config, ProfileStore};
use clima_location::{Geocoder, IpLocator};
use clima_query::FetchPlan;
use clima_weather::{ForecastPeriod, WeatherGateway};

use dashboard::Dashboard;

#[tokio::main]
async fn main() -> Result<()> {
    clima_core::init()?;

    let config = Config::load().context("Failed to load configuration")?;
    let validation = config.validate();
    for warning in &validation.warnings {
        tracing::warn!("Config: {}", warning);
    }
    if !validation.is_valid() {
        bail!("Invalid configuration: {}", validation.error_summary());
    }

    let store = ProfileStore::new(&config.config_dir);
    let profile = store.load().context("Failed to load profile")?;

    let mut dashboard = Dashboard::new(&config);
    dashboard.set_profile(profile);

    // Location: explicit query argument wins over IP auto-detection.
    let location = match std::env::args().nth(1) {
        Some(query) => {
            let geocoder = Geocoder::new(&config.geocoding.api_url)?;
            geocoder
                .manual_search(&query)
                .await
                .with_context(|| format!("No location found for '{}'", query))?
        }
        None => {
            let locator = IpLocator::new(&config.geolocation.api_url)?;
            locator
                .detect()
                .await
                .context("Failed to auto-detect location")?
        }
    };
    println!("Location: {}", location.display());
    dashboard.set_location(location);

    let gateway = WeatherGateway::new(&config.weather.api_url)?;

    // Current conditions and the derived risk axes.
    if let Some((key, FetchPlan::Start(token))) = dashboard.plan_weather(Utc::now()) {
        let result = gateway
            .current(key.lat(), key.lon())
            .await
            .map_err(|e| AppError::from(e).user_message().to_string());
        dashboard.resolve_weather(key, token, result, Utc::now());
    }

    let Some(report) = dashboard.current_report() else {
        bail!("Weather data is unavailable right now. Try again later.");
    };
    println!(
        "Now: {:.0}\u{b0}C (feels like {:.0}\u{b0}C), humidity {}%, wind {:.0} km/h",
        report.weather.temperature,
        report.weather.feels_like,
        report.weather.humidity,
        report.weather.wind_speed,
    );

    if let Some(assessment) = dashboard.risk_assessment() {
        println!(
            "Temperature  {:>4}\u{b0}F  [{}]  {}",
            assessment.temperature.value,
            assessment.temperature.risk.label(),
            assessment.temperature.description,
        );
        println!(
            "Rain         {:>4}%  [{}]  {}",
            assessment.rain.probability,
            assessment.rain.risk.label(),
            assessment.rain.description,
        );
        println!(
            "UV    {:>6.1} ({})  [{}]  {}",
            assessment.uv.index,
            assessment.uv.label,
            assessment.uv.risk.label(),
            assessment.uv.description,
        );
        println!(
            "AQI   {:>6.0} ({})  [{}]  {}",
            assessment.aqi.value,
            assessment.aqi.subtitle,
            assessment.aqi.risk.label(),
            assessment.aqi.description,
        );
    }

    // Daily forecast summary.
    if let Some((key, FetchPlan::Start(token))) =
        dashboard.plan_forecast(ForecastPeriod::Daily, Utc::now())
    {
        let result = gateway
            .forecast(key.0.lat(), key.0.lon(), key.1)
            .await
            .map_err(|e| AppError::from(e).user_message().to_string());
        dashboard.resolve_forecast(key, token, result, Utc::now());
    }
    if let Some(series) = dashboard.forecast_for(ForecastPeriod::Daily) {
        println!(
            "Forecast: {} days, {}% confidence",
            series.points.len(),
            series.confidence
        );
    }

    // AI recommendations run only when the profile is complete and a key is
    // configured; otherwise the query stays disabled.
    if !dashboard.profile().is_complete() {
        println!("Complete your profile to receive personalized recommendations.");
        return Ok(());
    }
    if !config.ai.is_configured() {
        tracing::info!("AI advisor not configured; skipping recommendations");
        return Ok(());
    }

    let advisor = AiAdvisor::new(ChatClient::new(&config.ai)?);
    if let Some((key, FetchPlan::Start(token))) = dashboard.plan_suggestions(Utc::now()) {
        let weather = dashboard
            .current_report()
            .map(|r| r.weather.clone())
            .context("weather vanished mid-run")?;
        let result = advisor
            .suggestions(&key.profile, &weather)
            .await
            .map_err(|e| AppError::from(e).user_message().to_string());
        dashboard.resolve_suggestions(key, token, result, Utc::now());
    }

    match (dashboard.suggestions(), dashboard.suggestions_error()) {
        (Some(suggestions), _) => {
            println!("Recommendations:");
            for suggestion in suggestions {
                println!("  [{}] {}: {}", suggestion.kind.as_str(), suggestion.title, suggestion.content);
            }
        }
        (None, Some(error)) => println!("Recommendations unavailable: {}", error),
        (None, None) => {}
    }

    Ok(())
}
