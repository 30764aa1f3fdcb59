//! Good/bad weather classification for a single forecast day.
//!
//! Severe rules are checked first, in table order, and any single match
//! makes the day bad. Otherwise the moderate rules are counted and two or
//! more matches make the day bad. All comparisons are strict and inputs are
//! not range checked.

use serde::Serialize;
use std::fmt;

use crate::models::ForecastDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Good,
    Bad,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }

    /// Bad if any verdict in the window is bad, good otherwise
    pub fn worst(verdicts: impl IntoIterator<Item = Verdict>) -> Self {
        if verdicts.into_iter().any(|v| v == Self::Bad) {
            Self::Bad
        } else {
            Self::Good
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Rule = fn(&Conditions) -> bool;

/// The five inputs the rules look at
struct Conditions {
    temperature_max: f64,
    temperature_min: f64,
    humidity: f64,
    wind_speed: f64,
    rain_probability: f64,
}

const SEVERE_RULES: [Rule; 4] = [
    |c| c.temperature_max > 35.0 || c.temperature_min < -10.0,
    |c| c.wind_speed > 50.0,
    |c| c.rain_probability > 80.0,
    |c| c.humidity > 90.0,
];

const MODERATE_RULES: [Rule; 4] = [
    |c| c.temperature_max > 30.0 || c.temperature_min < 0.0,
    |c| c.wind_speed > 30.0,
    |c| c.rain_probability > 60.0,
    |c| c.humidity > 70.0,
];

const MODERATE_LIMIT: usize = 2;

/// Classifies one day of weather.
///
/// Temperatures in °C, humidity and rain probability in percent, wind speed
/// in km/h.
pub fn classify(
    temperature_max: f64,
    temperature_min: f64,
    humidity: f64,
    wind_speed: f64,
    rain_probability: f64,
) -> Verdict {
    let conditions = Conditions {
        temperature_max,
        temperature_min,
        humidity,
        wind_speed,
        rain_probability,
    };

    if SEVERE_RULES.iter().any(|rule| rule(&conditions)) {
        return Verdict::Bad;
    }

    let moderate = MODERATE_RULES
        .iter()
        .filter(|rule| rule(&conditions))
        .count();

    if moderate >= MODERATE_LIMIT {
        Verdict::Bad
    } else {
        Verdict::Good
    }
}

impl ForecastDay {
    pub fn verdict(&self) -> Verdict {
        classify(
            self.temperature_max,
            self.temperature_min,
            self.humidity,
            self.wind_speed,
            self.rain_probability,
        )
    }
}
