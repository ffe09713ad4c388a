//! Personalized suggestions and climate insights from the chat backend.
//!
//! The model is asked for strict JSON. Anything that doesn't parse as the
//! expected structure fails with `MalformedResponse` - callers treat that
//! exactly like a network failure, never as partial data.

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use clima_core::Profile;
use clima_weather::{celsius_to_fahrenheit, WeatherObservation};

use crate::client::{ChatClient, ChatMessage};
use crate::types::{
    AiError, Insight, InsightBundle, InsightCategory, InsightSeverity, Suggestion, SuggestionKind,
};

/// The model echoes suggestions without ids; we assign them on arrival.
#[derive(Debug, Deserialize)]
struct RawSuggestion {
    #[serde(rename = "type", default)]
    kind: SuggestionKind,
    title: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct RawInsight {
    title: String,
    content: String,
    #[serde(default)]
    severity: InsightSeverity,
    #[serde(default)]
    category: InsightCategory,
    #[serde(default)]
    confidence: u8,
    #[serde(default)]
    timeframe: String,
}

/// AI advisor: formats profile + weather context into prompts and parses
/// the structured answers.
#[derive(Debug, Clone)]
pub struct AiAdvisor {
    chat: ChatClient,
}

impl AiAdvisor {
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }

    /// 3-4 personalized recommendations for the current conditions.
    pub async fn suggestions(
        &self,
        profile: &Profile,
        weather: &WeatherObservation,
    ) -> Result<Vec<Suggestion>, AiError> {
        let prompt = suggestions_prompt(profile, weather);
        let content = self.chat.complete(&[ChatMessage::user(prompt)]).await?;

        let raw: Vec<RawSuggestion> = serde_json::from_str(&content)
            .map_err(|e| AiError::MalformedResponse(e.to_string()))?;

        let suggestions = raw
            .into_iter()
            .map(|s| Suggestion {
                id: Uuid::new_v4().to_string(),
                kind: s.kind,
                title: s.title,
                content: s.content,
            })
            .collect();

        Ok(suggestions)
    }

    /// Longer-horizon climate insights for a coordinate pair.
    pub async fn insights(
        &self,
        lat: f64,
        lon: f64,
        weather: &WeatherObservation,
        profile: &Profile,
    ) -> Result<InsightBundle, AiError> {
        let prompt = insights_prompt(lat, lon, weather, profile);
        let content = self.chat.complete(&[ChatMessage::user(prompt)]).await?;

        let raw: Vec<RawInsight> = serde_json::from_str(&content)
            .map_err(|e| AiError::MalformedResponse(e.to_string()))?;

        let insights = raw
            .into_iter()
            .map(|i| Insight {
                id: Uuid::new_v4().to_string(),
                title: i.title,
                content: i.content,
                severity: i.severity,
                category: i.category,
                confidence: i.confidence.min(100),
                timeframe: i.timeframe,
            })
            .collect();

        Ok(InsightBundle {
            insights,
            generated: Utc::now(),
        })
    }
}

fn suggestions_prompt(profile: &Profile, weather: &WeatherObservation) -> String {
    format!(
        "You are a climate intelligence AI assistant. Based on the user profile and \
current weather conditions, provide 3-4 personalized climate recommendations.\n\n\
User Profile:\n\
- Age: {age}\n\
- Gender: {gender}\n\
- Occupation: {occupation}\n\n\
Current Weather:\n\
- Temperature: {temp}\u{b0}C ({temp_f}\u{b0}F)\n\
- UV Index: {uv}\n\
- Rain Probability: {rain}%\n\
- Humidity: {humidity}%\n\n\
Respond with only a JSON array in the following format:\n\
[\n  {{\n    \"type\": \"energy|health|safety|timing|general\",\n    \
\"title\": \"Brief title\",\n    \"content\": \"Detailed recommendation\"\n  }}\n]\n\n\
Focus on:\n\
1. Health and safety recommendations\n\
2. Energy efficiency tips\n\
3. Optimal timing for activities\n\
4. Occupation-specific advice",
        age = profile.age.as_str(),
        gender = profile.gender.as_str(),
        occupation = profile.occupation.as_str(),
        temp = weather.temperature,
        temp_f = celsius_to_fahrenheit(weather.temperature),
        uv = weather.uv_index,
        rain = weather.rain_probability,
        humidity = weather.humidity,
    )
}

fn insights_prompt(lat: f64, lon: f64, weather: &WeatherObservation, profile: &Profile) -> String {
    format!(
        "Analyze the climate situation at latitude {lat}, longitude {lon} and produce \
climate insights for the user.\n\n\
Current Weather:\n\
- Temperature: {temp}\u{b0}C\n\
- UV Index: {uv}\n\
- Rain Probability: {rain}%\n\
- Humidity: {humidity}%\n\n\
User Profile:\n\
- Age: {age}\n\
- Occupation: {occupation}\n\n\
Respond with only a JSON array of 3-6 insights in the following format:\n\
[\n  {{\n    \"title\": \"Brief title\",\n    \"content\": \"Insight text\",\n    \
\"severity\": \"info|warning|critical\",\n    \
\"category\": \"temperature|precipitation|seasonal|anomaly|longterm\",\n    \
\"confidence\": 0,\n    \"timeframe\": \"e.g. next 7 days\"\n  }}\n]",
        lat = lat,
        lon = lon,
        temp = weather.temperature,
        uv = weather.uv_index,
        rain = weather.rain_probability,
        humidity = weather.humidity,
        age = profile.age.as_str(),
        occupation = profile.occupation.as_str(),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use clima_core::{AgeBracket, Gender, Occupation};

    fn profile() -> Profile {
        Profile {
            age: AgeBracket::Age30To44,
            gender: Gender::Female,
            occupation: Occupation::OutdoorWork,
        }
    }

    fn weather() -> WeatherObservation {
        WeatherObservation {
            temperature: 22.0,
            feels_like: 24.0,
            humidity: 65,
            uv_index: 7.0,
            rain_probability: 20,
            wind_speed: 12.0,
            pressure: 1013.0,
            visibility: 10.0,
        }
    }

    #[test]
    fn suggestions_prompt_includes_both_temperature_units() {
        let prompt = suggestions_prompt(&profile(), &weather());
        assert!(prompt.contains("22°C"));
        assert!(prompt.contains("72°F"));
        assert!(prompt.contains("outdoor work"));
    }

    #[test]
    fn insights_prompt_includes_coordinates() {
        let prompt = insights_prompt(40.7, -74.0, &weather(), &profile());
        assert!(prompt.contains("40.7"));
        assert!(prompt.contains("-74"));
        assert!(prompt.contains("temperature|precipitation|seasonal|anomaly|longterm"));
    }

    #[test]
    fn raw_suggestion_defaults_unknown_kind_to_general() {
        let raw: RawSuggestion = serde_json::from_str(
            r#"{ "type": "astrology", "title": "T", "content": "C" }"#,
        )
        .unwrap();
        assert_eq!(raw.kind, SuggestionKind::General);
    }
}
