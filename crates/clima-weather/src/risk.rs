//! Pure derivation of the dashboard's risk assessment from a weather report.
//!
//! No I/O, deterministic: the same report always produces the same
//! assessment, and every axis is always populated. The client owns the
//! temperature tier and the UV exposure label; rain and air-quality tiers
//! come from the server and are only formatted here.

use crate::types::{
    AqiRisk, RainRisk, RiskAssessment, RiskTier, TemperatureRisk, UvRisk, WeatherReport,
};

/// `round(C * 9/5 + 32)`, the conversion used everywhere a °F value is shown.
pub fn celsius_to_fahrenheit(celsius: f64) -> i32 {
    (celsius * 9.0 / 5.0 + 32.0).round() as i32
}

/// Exposure label for a UV index. Strict greater-than at each boundary:
/// an index of exactly 8 is still "High".
pub fn uv_label(index: f64) -> &'static str {
    if index > 8.0 {
        "Very High"
    } else if index > 6.0 {
        "High"
    } else if index > 3.0 {
        "Moderate"
    } else {
        "Low"
    }
}

/// Temperature tier from the whole-°F value.
fn temperature_tier(fahrenheit: i32) -> RiskTier {
    match fahrenheit {
        f if f >= 100 || f <= 10 => RiskTier::Extreme,
        f if f >= 90 || f <= 20 => RiskTier::High,
        f if f >= 80 || f <= 32 => RiskTier::Moderate,
        _ => RiskTier::Low,
    }
}

fn temperature_description(fahrenheit: i32) -> String {
    match temperature_tier(fahrenheit) {
        RiskTier::Low => "Comfortable temperature range".to_string(),
        RiskTier::Moderate if fahrenheit >= 80 => {
            "Warm; stay hydrated during outdoor activity".to_string()
        }
        RiskTier::Moderate => "Chilly; dress in layers".to_string(),
        RiskTier::High if fahrenheit >= 90 => {
            "Hot; limit strenuous activity in the afternoon".to_string()
        }
        RiskTier::High => "Cold; limit time outdoors".to_string(),
        RiskTier::Extreme if fahrenheit >= 100 => {
            "Extreme heat; avoid outdoor exertion".to_string()
        }
        RiskTier::Extreme => "Extreme cold; risk of frostbite".to_string(),
    }
}

/// Derive the four risk axes from a weather report.
pub fn assess(report: &WeatherReport) -> RiskAssessment {
    let fahrenheit = celsius_to_fahrenheit(report.weather.temperature);

    let rain = &report.risks.rain;
    let uv = &report.risks.uv;
    let aqi = &report.risks.aqi;

    RiskAssessment {
        temperature: TemperatureRisk {
            value: fahrenheit,
            risk: temperature_tier(fahrenheit),
            description: temperature_description(fahrenheit),
        },
        rain: RainRisk {
            probability: report.weather.rain_probability,
            risk: rain.risk,
            description: if rain.description.is_empty() {
                format!("{}% chance of rain", report.weather.rain_probability)
            } else {
                rain.description.clone()
            },
        },
        uv: UvRisk {
            index: report.weather.uv_index,
            label: uv_label(report.weather.uv_index),
            risk: uv.risk,
            description: if uv.description.is_empty() {
                format!("{} UV exposure expected", uv_label(report.weather.uv_index))
            } else {
                uv.description.clone()
            },
        },
        aqi: AqiRisk {
            value: aqi.value,
            // Fixed wording; the server tier stays authoritative.
            subtitle: "AQI Good",
            risk: aqi.risk,
            description: aqi.description.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::types::{ServerRiskAxis, ServerRisks, WeatherObservation};

    fn report(temp_c: f64, uv_index: f64, rain_prob: u8) -> WeatherReport {
        WeatherReport {
            weather: WeatherObservation {
                temperature: temp_c,
                feels_like: temp_c,
                humidity: 60,
                uv_index,
                rain_probability: rain_prob,
                wind_speed: 10.0,
                pressure: 1013.0,
                visibility: 10.0,
            },
            risks: ServerRisks {
                rain: ServerRiskAxis {
                    value: rain_prob as f64,
                    risk: RiskTier::Moderate,
                    description: "Showers possible this afternoon".to_string(),
                },
                uv: ServerRiskAxis {
                    value: uv_index,
                    risk: RiskTier::High,
                    description: String::new(),
                },
                aqi: ServerRiskAxis {
                    value: 42.0,
                    risk: RiskTier::Low,
                    description: "Air quality is satisfactory".to_string(),
                },
            },
        }
    }

    #[test]
    fn fahrenheit_conversion_rounds_to_nearest() {
        assert_eq!(celsius_to_fahrenheit(20.0), 68);
        assert_eq!(celsius_to_fahrenheit(-5.0), 23);
        assert_eq!(celsius_to_fahrenheit(0.0), 32);
        assert_eq!(celsius_to_fahrenheit(22.0), 72);
        assert_eq!(celsius_to_fahrenheit(37.8), 100);
    }

    #[test]
    fn uv_label_boundaries() {
        assert_eq!(uv_label(8.0), "High");
        assert_eq!(uv_label(9.0), "Very High");
        assert_eq!(uv_label(6.0), "Moderate");
        assert_eq!(uv_label(7.0), "High");
        assert_eq!(uv_label(3.0), "Low");
        assert_eq!(uv_label(4.0), "Moderate");
        assert_eq!(uv_label(0.0), "Low");
    }

    #[test]
    fn assessment_is_deterministic() {
        let r = report(22.0, 7.0, 20);
        assert_eq!(assess(&r), assess(&r));
    }

    #[test]
    fn temperature_axis_is_in_fahrenheit() {
        let assessment = assess(&report(22.0, 5.0, 10));
        assert_eq!(assessment.temperature.value, 72);
        assert_eq!(assessment.temperature.risk, RiskTier::Low);
    }

    #[test]
    fn every_axis_is_populated() {
        let assessment = assess(&report(35.0, 9.5, 80));
        assert!(!assessment.temperature.description.is_empty());
        assert!(!assessment.rain.description.is_empty());
        assert!(!assessment.uv.description.is_empty());
        assert_eq!(assessment.aqi.subtitle, "AQI Good");
    }

    #[test]
    fn server_tiers_pass_through_unchanged() {
        let assessment = assess(&report(22.0, 7.0, 20));
        assert_eq!(assessment.rain.risk, RiskTier::Moderate);
        assert_eq!(assessment.aqi.risk, RiskTier::Low);
        assert_eq!(assessment.uv.risk, RiskTier::High);
    }

    #[test]
    fn uv_label_accompanies_independent_tier() {
        // Server says High, index says Moderate label; both are kept.
        let assessment = assess(&report(22.0, 5.0, 20));
        assert_eq!(assessment.uv.label, "Moderate");
        assert_eq!(assessment.uv.risk, RiskTier::High);
    }

    #[test]
    fn extreme_heat_and_cold_classify_as_extreme() {
        assert_eq!(assess(&report(40.0, 5.0, 0)).temperature.risk, RiskTier::Extreme); // 104°F
        assert_eq!(assess(&report(-15.0, 0.0, 0)).temperature.risk, RiskTier::Extreme); // 5°F
    }

    #[test]
    fn empty_server_descriptions_get_formatted_fallbacks() {
        let mut r = report(22.0, 9.5, 45);
        r.risks.rain.description = String::new();
        let assessment = assess(&r);
        assert_eq!(assessment.rain.description, "45% chance of rain");
        assert_eq!(assessment.uv.description, "Very High UV exposure expected");
    }
}
