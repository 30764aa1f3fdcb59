use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classifier::Verdict;
use crate::constants::DEFAULT_FORECAST_DAYS;

// ============================================================================
// AccuWeather API Models
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutocompleteLocation {
    pub key: String,
    pub localized_name: String,
    pub country: Option<NamedArea>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NamedArea {
    pub localized_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DailyForecastResponse {
    #[serde(rename = "DailyForecasts", default)]
    pub daily_forecasts: Vec<DailyForecast>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyForecast {
    pub date: String,
    pub temperature: TemperatureRange,
    pub day: DayConditions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemperatureRange {
    pub minimum: Measurement,
    pub maximum: Measurement,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Measurement {
    pub value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DayConditions {
    pub relative_humidity: RelativeHumidity,
    pub wind: Wind,
    pub precipitation_probability: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RelativeHumidity {
    pub average: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Wind {
    pub speed: Measurement,
}

// ============================================================================
// Unsplash API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PhotoSearchResponse {
    #[serde(default)]
    pub results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
pub struct Photo {
    pub urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
pub struct PhotoUrls {
    pub regular: String,
}

// ============================================================================
// Forecast Models
// ============================================================================

/// One day of forecast, flattened out of the provider's nested shape.
///
/// Temperatures are in °C, wind speed in km/h, humidity and rain
/// probability in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub rain_probability: f64,
}

impl From<DailyForecast> for ForecastDay {
    fn from(forecast: DailyForecast) -> Self {
        Self {
            date: forecast.date,
            temperature_max: forecast.temperature.maximum.value,
            temperature_min: forecast.temperature.minimum.value,
            humidity: forecast.day.relative_humidity.average,
            wind_speed: forecast.day.wind.speed.value,
            rain_probability: forecast.day.precipitation_probability,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedDay {
    #[serde(flatten)]
    pub day: ForecastDay,
    pub verdict: Verdict,
}

impl From<ForecastDay> for ClassifiedDay {
    fn from(day: ForecastDay) -> Self {
        let verdict = day.verdict();
        Self { day, verdict }
    }
}

/// A resolved provider location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub key: String,
    pub name: String,
    pub country: Option<String>,
}

impl From<AutocompleteLocation> for Location {
    fn from(location: AutocompleteLocation) -> Self {
        Self {
            key: location.key,
            name: location.localized_name,
            country: location.country.map(|c| c.localized_name),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CityForecast {
    pub city: String,
    pub location: Location,
    pub verdict: Verdict,
    pub days: Vec<ClassifiedDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteForecast {
    pub start: CityForecast,
    pub end: CityForecast,
    pub verdict: Verdict,
}

/// Parallel per-day arrays for one city, the shape a chart front end plots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub day: Vec<usize>,
    pub temp_max: Vec<f64>,
    pub temp_min: Vec<f64>,
    pub rain_prob: Vec<f64>,
    pub wind_speed: Vec<f64>,
    pub verdict: Vec<Verdict>,
}

impl ChartSeries {
    pub fn from_days(days: &[ClassifiedDay]) -> Self {
        Self {
            day: (1..=days.len()).collect(),
            temp_max: days.iter().map(|d| d.day.temperature_max).collect(),
            temp_min: days.iter().map(|d| d.day.temperature_min).collect(),
            rain_prob: days.iter().map(|d| d.day.rain_probability).collect(),
            wind_speed: days.iter().map(|d| d.day.wind_speed).collect(),
            verdict: days.iter().map(|d| d.verdict).collect(),
        }
    }
}

// ============================================================================
// Request Models (HTTP bodies and MCP tool parameters)
// ============================================================================

fn default_days() -> Option<i64> {
    Some(DEFAULT_FORECAST_DAYS.into())
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CityForecastRequest {
    /// City name, e.g. "Moscow"
    pub city: String,
    /// Number of forecast days: 1, 5, 10 or 15 (default 5)
    #[serde(default = "default_days")]
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct RouteForecastRequest {
    /// City the trip starts in
    pub start_city: String,
    /// City the trip ends in
    pub end_city: String,
    /// Number of forecast days: 1, 5, 10 or 15 (default 5)
    #[serde(default = "default_days")]
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct MultipleForecastRequest {
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default = "default_days")]
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ClassifyRequest {
    /// Maximum temperature in °C
    pub temperature_max: f64,
    /// Minimum temperature in °C
    pub temperature_min: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Probability of precipitation in percent
    pub rain_probability: f64,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub verdict: Verdict,
}
