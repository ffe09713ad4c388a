//! Dashboard state: owns the resolved location and the profile, and routes
//! every dependent query through keyed tables.
//!
//! Prerequisite gating happens here: a query whose inputs are missing gets
//! no identity key, so it is never planned, never executed and reports no
//! error. Changing the location or the profile changes the keys, which is
//! what retires in-flight responses for the old identity.

use chrono::{DateTime, Duration, Utc};

use clima_ai::{InsightBundle, SimulationResult, Suggestion};
use clima_core::{Config, Profile};
use clima_location::{Location, SuggestionDebouncer};
use clima_query::{digest, CoordKey, FetchPlan, QueryStatus, QueryTable};
use clima_weather::{assess, ForecastPeriod, ForecastSeries, RiskAssessment, WeatherReport};

/// Identity of a forecast query: coordinates plus aggregation period.
pub type ForecastKey = (CoordKey, ForecastPeriod);

/// Identity of an AI suggestions query: everything that shapes the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdviceKey {
    pub profile: Profile,
    pub weather_digest: u64,
}

/// Identity of an insights query; location matters for these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InsightKey {
    pub coord: CoordKey,
    pub profile: Profile,
    pub weather_digest: u64,
}

/// Top-level dashboard state.
pub struct Dashboard {
    location: Option<Location>,
    profile: Profile,
    pub debouncer: SuggestionDebouncer,

    weather: QueryTable<CoordKey, WeatherReport>,
    forecast: QueryTable<ForecastKey, ForecastSeries>,
    suggestions: QueryTable<AdviceKey, Vec<Suggestion>>,
    insights: QueryTable<InsightKey, InsightBundle>,

    simulation: Option<SimulationResult>,
    simulation_pending: bool,
}

impl Dashboard {
    pub fn new(config: &Config) -> Self {
        let insights_window = Duration::minutes(i64::from(config.weather.insights_stale_minutes));
        Self {
            location: None,
            profile: Profile::default(),
            debouncer: SuggestionDebouncer::new(),
            weather: QueryTable::new(),
            forecast: QueryTable::new(),
            suggestions: QueryTable::new(),
            insights: QueryTable::with_staleness(Some(insights_window)),
            simulation: None,
            simulation_pending: false,
        }
    }

    // --- location & profile -------------------------------------------------

    /// Replace the current location wholesale. Invalid coordinates are
    /// treated as unresolved and keep everything downstream disabled.
    pub fn set_location(&mut self, location: Location) {
        self.debouncer.confirm(&location.display());
        self.location = Some(location);
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Atomic whole-record profile replacement. Readers only ever see the
    /// old record or the new one.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    // --- weather ------------------------------------------------------------

    /// Identity of the weather query, present once a location is resolved.
    pub fn weather_key(&self) -> Option<CoordKey> {
        let location = self.location.as_ref()?;
        if !location.is_valid() {
            return None;
        }
        Some(CoordKey::new(location.latitude, location.longitude))
    }

    pub fn plan_weather(&mut self, now: DateTime<Utc>) -> Option<(CoordKey, FetchPlan)> {
        let key = self.weather_key()?;
        Some((key, self.weather.plan(key, now)))
    }

    pub fn refresh_weather(&mut self) -> Option<(CoordKey, u64)> {
        let key = self.weather_key()?;
        let token = self.weather.refresh(key)?;
        Some((key, token))
    }

    pub fn resolve_weather(
        &mut self,
        key: CoordKey,
        token: u64,
        result: Result<WeatherReport, String>,
        now: DateTime<Utc>,
    ) -> bool {
        self.weather.resolve(&key, token, result, now)
    }

    /// Current report for the current location, if any has landed.
    pub fn current_report(&self) -> Option<&WeatherReport> {
        let key = self.weather_key()?;
        self.weather.data(&key)
    }

    pub fn weather_status(&self) -> QueryStatus {
        self.weather_key()
            .map(|key| self.weather.status(&key))
            .unwrap_or_default()
    }

    /// Risk assessment derived from the current report. Recomputed on every
    /// call; never stored.
    pub fn risk_assessment(&self) -> Option<RiskAssessment> {
        self.current_report().map(assess)
    }

    // --- forecast -----------------------------------------------------------

    pub fn forecast_key(&self, period: ForecastPeriod) -> Option<ForecastKey> {
        Some((self.weather_key()?, period))
    }

    pub fn plan_forecast(
        &mut self,
        period: ForecastPeriod,
        now: DateTime<Utc>,
    ) -> Option<(ForecastKey, FetchPlan)> {
        let key = self.forecast_key(period)?;
        Some((key, self.forecast.plan(key, now)))
    }

    pub fn resolve_forecast(
        &mut self,
        key: ForecastKey,
        token: u64,
        result: Result<ForecastSeries, String>,
        now: DateTime<Utc>,
    ) -> bool {
        self.forecast.resolve(&key, token, result, now)
    }

    pub fn forecast_for(&self, period: ForecastPeriod) -> Option<&ForecastSeries> {
        let key = self.forecast_key(period)?;
        self.forecast.data(&key)
    }

    // --- AI suggestions -----------------------------------------------------

    /// Identity of the suggestions query. `None` until the profile is
    /// complete and weather data exists - the query stays disabled and
    /// reports nothing.
    pub fn suggestions_key(&self) -> Option<AdviceKey> {
        if !self.profile.is_complete() {
            return None;
        }
        let report = self.current_report()?;
        Some(AdviceKey {
            profile: self.profile,
            weather_digest: digest(&report.weather),
        })
    }

    pub fn plan_suggestions(&mut self, now: DateTime<Utc>) -> Option<(AdviceKey, FetchPlan)> {
        let key = self.suggestions_key()?;
        Some((key, self.suggestions.plan(key, now)))
    }

    pub fn refresh_suggestions(&mut self) -> Option<(AdviceKey, u64)> {
        let key = self.suggestions_key()?;
        let token = self.suggestions.refresh(key)?;
        Some((key, token))
    }

    pub fn resolve_suggestions(
        &mut self,
        key: AdviceKey,
        token: u64,
        result: Result<Vec<Suggestion>, String>,
        now: DateTime<Utc>,
    ) -> bool {
        self.suggestions.resolve(&key, token, result, now)
    }

    pub fn suggestions(&self) -> Option<&Vec<Suggestion>> {
        let key = self.suggestions_key()?;
        self.suggestions.data(&key)
    }

    pub fn suggestions_error(&self) -> Option<&str> {
        let key = self.suggestions_key()?;
        self.suggestions.error(&key)
    }

    // --- AI insights --------------------------------------------------------

    /// Insights need a location and weather; the profile rides along in the
    /// identity so edits retire stale bundles.
    pub fn insights_key(&self) -> Option<InsightKey> {
        let coord = self.weather_key()?;
        let report = self.current_report()?;
        Some(InsightKey {
            coord,
            profile: self.profile,
            weather_digest: digest(&report.weather),
        })
    }

    pub fn plan_insights(&mut self, now: DateTime<Utc>) -> Option<(InsightKey, FetchPlan)> {
        let key = self.insights_key()?;
        Some((key, self.insights.plan(key, now)))
    }

    pub fn resolve_insights(
        &mut self,
        key: InsightKey,
        token: u64,
        result: Result<InsightBundle, String>,
        now: DateTime<Utc>,
    ) -> bool {
        self.insights.resolve(&key, token, result, now)
    }

    pub fn insights(&self) -> Option<&InsightBundle> {
        let key = self.insights_key()?;
        self.insights.data(&key)
    }

    // --- simulation ---------------------------------------------------------

    /// Mark a scenario run as started. The previous result stays visible
    /// next to the loading indicator.
    pub fn begin_simulation(&mut self) {
        self.simulation_pending = true;
    }

    /// Land a scenario result. On failure the previous result, if any, is
    /// left unchanged and the error is handed back for display.
    pub fn apply_simulation(
        &mut self,
        result: Result<SimulationResult, String>,
    ) -> Result<(), String> {
        self.simulation_pending = false;
        match result {
            Ok(outcome) => {
                self.simulation = Some(outcome);
                Ok(())
            }
            Err(message) => Err(message),
        }
    }

    pub fn simulation_result(&self) -> Option<&SimulationResult> {
        self.simulation.as_ref()
    }

    pub fn simulation_pending(&self) -> bool {
        self.simulation_pending
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use clima_ai::SuggestionKind;
    use clima_core::{AgeBracket, Gender, Occupation};
    use clima_weather::{
        RiskTier, ServerRiskAxis, ServerRisks, WeatherObservation,
    };

    fn config() -> Config {
        Config::default()
    }

    fn new_york() -> Location {
        Location {
            city: "New York".to_string(),
            country: "United States".to_string(),
            latitude: 40.7,
            longitude: -74.0,
        }
    }

    fn complete_profile() -> Profile {
        Profile {
            age: AgeBracket::Age30To44,
            gender: Gender::Female,
            occupation: Occupation::OutdoorWork,
        }
    }

    fn report(temp_c: f64) -> WeatherReport {
        WeatherReport {
            weather: WeatherObservation {
                temperature: temp_c,
                feels_like: temp_c,
                humidity: 65,
                uv_index: 7.0,
                rain_probability: 20,
                wind_speed: 12.0,
                pressure: 1013.0,
                visibility: 10.0,
            },
            risks: ServerRisks {
                rain: ServerRiskAxis {
                    value: 20.0,
                    risk: RiskTier::Low,
                    description: String::new(),
                },
                uv: ServerRiskAxis {
                    value: 7.0,
                    risk: RiskTier::High,
                    description: String::new(),
                },
                aqi: ServerRiskAxis {
                    value: 42.0,
                    risk: RiskTier::Low,
                    description: String::new(),
                },
            },
        }
    }

    fn land_weather(dashboard: &mut Dashboard, temp_c: f64) {
        let now = Utc::now();
        let (key, plan) = dashboard.plan_weather(now).unwrap();
        let FetchPlan::Start(token) = plan else {
            panic!("expected start");
        };
        assert!(dashboard.resolve_weather(key, token, Ok(report(temp_c)), now));
    }

    #[test]
    fn no_location_disables_everything() {
        let mut dashboard = Dashboard::new(&config());
        dashboard.set_profile(complete_profile());

        assert!(dashboard.weather_key().is_none());
        assert!(dashboard.plan_weather(Utc::now()).is_none());
        assert!(dashboard.forecast_key(ForecastPeriod::Daily).is_none());
        assert!(dashboard.suggestions_key().is_none());
        assert!(dashboard.insights_key().is_none());
        assert_eq!(dashboard.weather_status(), QueryStatus::Idle);
    }

    #[test]
    fn invalid_coordinates_stay_unresolved() {
        let mut dashboard = Dashboard::new(&config());
        dashboard.set_location(Location {
            city: "Broken".to_string(),
            country: "Nowhere".to_string(),
            latitude: 120.0,
            longitude: 0.0,
        });
        assert!(dashboard.weather_key().is_none());
    }

    #[test]
    fn suggestions_disabled_until_profile_complete_and_weather_present() {
        let mut dashboard = Dashboard::new(&config());
        dashboard.set_location(new_york());

        // Weather alone is not enough.
        land_weather(&mut dashboard, 22.0);
        assert!(dashboard.suggestions_key().is_none());

        // Two of three profile fields: still disabled.
        dashboard.set_profile(Profile {
            age: AgeBracket::Age30To44,
            gender: Gender::Female,
            occupation: Occupation::Unset,
        });
        assert!(dashboard.suggestions_key().is_none());

        // All three set: enabled immediately.
        dashboard.set_profile(complete_profile());
        assert!(dashboard.suggestions_key().is_some());
    }

    #[test]
    fn complete_profile_without_weather_is_still_disabled() {
        let mut dashboard = Dashboard::new(&config());
        dashboard.set_location(new_york());
        dashboard.set_profile(complete_profile());
        assert!(dashboard.suggestions_key().is_none());
    }

    #[test]
    fn end_to_end_weather_risk_and_suggestions() {
        let mut dashboard = Dashboard::new(&config());
        dashboard.set_location(new_york());
        dashboard.set_profile(complete_profile());

        land_weather(&mut dashboard, 22.0);

        // 22°C derives to 72°F on the temperature axis.
        let assessment = dashboard.risk_assessment().unwrap();
        assert_eq!(assessment.temperature.value, 72);

        // The suggestions query is now enabled; land a response.
        let now = Utc::now();
        let (key, plan) = dashboard.plan_suggestions(now).unwrap();
        let FetchPlan::Start(token) = plan else {
            panic!("expected start");
        };
        let suggestions = vec![
            Suggestion {
                id: "1".to_string(),
                kind: SuggestionKind::Health,
                title: "Hydrate".to_string(),
                content: "Drink water regularly.".to_string(),
            },
            Suggestion {
                id: "2".to_string(),
                kind: SuggestionKind::Timing,
                title: "Go early".to_string(),
                content: "UV peaks at midday.".to_string(),
            },
        ];
        assert!(dashboard.resolve_suggestions(key, token, Ok(suggestions), now));

        let listed = dashboard.suggestions().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].kind, SuggestionKind::Health);
    }

    #[test]
    fn editing_profile_changes_suggestion_identity() {
        let mut dashboard = Dashboard::new(&config());
        dashboard.set_location(new_york());
        dashboard.set_profile(complete_profile());
        land_weather(&mut dashboard, 22.0);

        let first_key = dashboard.suggestions_key().unwrap();

        let mut edited = complete_profile();
        edited.occupation = Occupation::OfficeWork;
        dashboard.set_profile(edited);

        let second_key = dashboard.suggestions_key().unwrap();
        assert_ne!(first_key, second_key);
        // The new identity has no cached data to reuse.
        assert!(dashboard.suggestions().is_none());
    }

    #[test]
    fn switching_location_discards_late_weather_response() {
        let mut dashboard = Dashboard::new(&config());
        dashboard.set_location(new_york());

        let now = Utc::now();
        let (old_key, plan) = dashboard.plan_weather(now).unwrap();
        let FetchPlan::Start(old_token) = plan else {
            panic!("expected start");
        };

        // User switches city before the fetch resolves.
        dashboard.set_location(Location {
            city: "London".to_string(),
            country: "United Kingdom".to_string(),
            latitude: 51.5,
            longitude: -0.12,
        });
        let (new_key, plan) = dashboard.plan_weather(now).unwrap();
        let FetchPlan::Start(new_token) = plan else {
            panic!("expected start");
        };

        // The old response arrives late: it lands in the old identity and
        // the current location still shows nothing.
        assert!(dashboard.resolve_weather(old_key, old_token, Ok(report(30.0)), now));
        assert!(dashboard.current_report().is_none());

        assert!(dashboard.resolve_weather(new_key, new_token, Ok(report(18.0)), now));
        assert_eq!(dashboard.current_report().unwrap().weather.temperature, 18.0);
    }

    #[test]
    fn forecast_periods_cache_independently() {
        let mut dashboard = Dashboard::new(&config());
        dashboard.set_location(new_york());

        let now = Utc::now();
        let (daily_key, plan) = dashboard.plan_forecast(ForecastPeriod::Daily, now).unwrap();
        let FetchPlan::Start(token) = plan else {
            panic!("expected start");
        };
        let series = ForecastSeries {
            period: ForecastPeriod::Daily,
            points: vec![],
            confidence: 90,
        };
        dashboard.resolve_forecast(daily_key, token, Ok(series), now);

        assert!(dashboard.forecast_for(ForecastPeriod::Daily).is_some());
        assert!(dashboard.forecast_for(ForecastPeriod::Weekly).is_none());

        // Planning weekly doesn't disturb the daily cache.
        let (_, plan) = dashboard.plan_forecast(ForecastPeriod::Weekly, now).unwrap();
        assert!(matches!(plan, FetchPlan::Start(_)));
        assert!(dashboard.forecast_for(ForecastPeriod::Daily).is_some());
    }

    #[test]
    fn double_refresh_suggestions_is_one_call() {
        let mut dashboard = Dashboard::new(&config());
        dashboard.set_location(new_york());
        dashboard.set_profile(complete_profile());
        land_weather(&mut dashboard, 22.0);

        let first = dashboard.refresh_suggestions();
        let second = dashboard.refresh_suggestions();
        assert!(first.is_some());
        assert!(second.is_none());
    }

    #[test]
    fn failed_simulation_keeps_previous_result() {
        let mut dashboard = Dashboard::new(&config());

        dashboard.begin_simulation();
        let outcome = SimulationResult {
            impact: "Hotter".to_string(),
            recommendations: vec!["Shade".to_string()],
            health_risks: vec![],
        };
        dashboard.apply_simulation(Ok(outcome)).unwrap();
        assert!(dashboard.simulation_result().is_some());

        dashboard.begin_simulation();
        assert!(dashboard.simulation_pending());
        // Prior result remains on screen while pending.
        assert!(dashboard.simulation_result().is_some());

        let err = dashboard
            .apply_simulation(Err("malformed AI response".to_string()))
            .unwrap_err();
        assert!(err.contains("malformed"));
        assert_eq!(dashboard.simulation_result().unwrap().impact, "Hotter");
        assert!(!dashboard.simulation_pending());
    }

    #[test]
    fn weather_error_leaves_suggestions_cache_alone() {
        let mut dashboard = Dashboard::new(&config());
        dashboard.set_location(new_york());
        dashboard.set_profile(complete_profile());
        land_weather(&mut dashboard, 22.0);

        let now = Utc::now();
        let (skey, plan) = dashboard.plan_suggestions(now).unwrap();
        let FetchPlan::Start(token) = plan else {
            panic!("expected start");
        };
        dashboard.resolve_suggestions(
            skey,
            token,
            Ok(vec![Suggestion {
                id: "1".to_string(),
                kind: SuggestionKind::General,
                title: "T".to_string(),
                content: "C".to_string(),
            }]),
            now,
        );

        // A weather refresh fails; the suggestion list stays visible.
        let (wkey, wtoken) = dashboard.refresh_weather().unwrap();
        dashboard.resolve_weather(wkey, wtoken, Err("offline".to_string()), now);

        assert_eq!(dashboard.weather_status(), QueryStatus::Error);
        assert!(dashboard.suggestions().is_some());
    }
}
