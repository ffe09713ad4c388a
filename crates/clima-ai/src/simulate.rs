//! What-if climate scenario runs.
//!
//! Stateless per call and never cached: every invocation is a fresh run.
//! A malformed response fails the run; the caller keeps whatever result it
//! was already showing.

use clima_core::Profile;
use clima_weather::WeatherObservation;

use crate::client::{ChatClient, ChatMessage};
use crate::types::{AiError, SimulationInput, SimulationResult};

#[derive(Debug, Clone)]
pub struct ScenarioSimulator {
    chat: ChatClient,
}

impl ScenarioSimulator {
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }

    /// Project the impact of a temperature/rainfall delta on the baseline.
    pub async fn run(
        &self,
        baseline: &WeatherObservation,
        input: SimulationInput,
        profile: &Profile,
    ) -> Result<SimulationResult, AiError> {
        let prompt = simulation_prompt(baseline, input, profile);
        let content = self.chat.complete(&[ChatMessage::user(prompt)]).await?;

        serde_json::from_str(&content).map_err(|e| AiError::MalformedResponse(e.to_string()))
    }
}

fn signed(value: i32) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

fn simulation_prompt(
    weather: &WeatherObservation,
    input: SimulationInput,
    profile: &Profile,
) -> String {
    format!(
        "Analyze the climate impact simulation scenario and provide recommendations.\n\n\
Current Weather:\n\
- Temperature: {temp}\u{b0}C\n\
- UV Index: {uv}\n\
- Humidity: {humidity}%\n\n\
Simulation Changes:\n\
- Temperature change: {temp_change}\u{b0}F\n\
- Rainfall change: {rain_change}%\n\n\
User Profile:\n\
- Age: {age}\n\
- Occupation: {occupation}\n\n\
Respond with only a JSON object:\n\
{{\n  \"impact\": \"Brief description of the climate impact\",\n  \
\"recommendations\": [\"recommendation 1\", \"recommendation 2\", \"recommendation 3\"],\n  \
\"healthRisks\": [\"health risk 1\", \"health risk 2\"]\n}}",
        temp = weather.temperature,
        uv = weather.uv_index,
        humidity = weather.humidity,
        temp_change = signed(input.temperature_change_f),
        rain_change = signed(input.rainfall_change_pct),
        age = profile.age.as_str(),
        occupation = profile.occupation.as_str(),
    )
}
