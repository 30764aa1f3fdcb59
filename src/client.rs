use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::{ALLOWED_FORECAST_DAYS, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{WeatherError, WeatherResult};
use crate::models::{AutocompleteLocation, DailyForecastResponse, ForecastDay, Location};

/// Forecast length accepted by the daily forecast endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastDays(u8);

impl ForecastDays {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for ForecastDays {
    type Error = WeatherError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        u8::try_from(days)
            .ok()
            .filter(|d| ALLOWED_FORECAST_DAYS.contains(d))
            .map(Self)
            .ok_or(WeatherError::InvalidDayCount(days))
    }
}

/// Client for the AccuWeather location and daily forecast endpoints
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    language: String,
}

impl ForecastClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        language: impl Into<String>,
    ) -> WeatherResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| WeatherError::upstream("client setup", e))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            language: language.into(),
        })
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> WeatherResult<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::info!("Sending GET request to {}", endpoint);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                // the url carries the api key
                let e = e.without_url();
                tracing::error!("GET request to {} failed: {}", endpoint, e);
                WeatherError::upstream(endpoint, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("API error from {}: {} - {}", endpoint, status, body);
            return Err(WeatherError::upstream(
                endpoint,
                format!("status {}: {}", status, body),
            ));
        }

        let data = response.json::<T>().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Could not decode response from {}: {}", endpoint, e);
            WeatherError::upstream(endpoint, e)
        })?;

        tracing::info!("GET request to {} succeeded with status {}", endpoint, status);
        Ok(data)
    }

    /// Lists provider locations matching a (partial) city name
    pub async fn cities_autocomplete(&self, city: &str) -> WeatherResult<Vec<AutocompleteLocation>> {
        self.make_request(
            "locations/v1/cities/autocomplete",
            &[("q", city), ("language", self.language.as_str())],
        )
        .await
    }

    /// Resolves a city name to the first location the provider suggests
    pub async fn resolve_location(&self, city: &str) -> WeatherResult<Location> {
        self.cities_autocomplete(city)
            .await?
            .into_iter()
            .next()
            .map(Location::from)
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))
    }

    /// Fetches the daily forecast for a location, one flat record per day
    pub async fn forecast_daily(
        &self,
        days: ForecastDays,
        location_key: &str,
    ) -> WeatherResult<Vec<ForecastDay>> {
        let endpoint = format!("forecasts/v1/daily/{}day/{}", days.get(), location_key);
        let response: DailyForecastResponse = self
            .make_request(
                &endpoint,
                &[
                    ("language", self.language.as_str()),
                    ("details", "true"),
                    ("metric", "true"),
                ],
            )
            .await?;

        Ok(response
            .daily_forecasts
            .into_iter()
            .map(ForecastDay::from)
            .collect())
    }

    /// Resolves a city and fetches its forecast
    pub async fn forecast_for_city(
        &self,
        city: &str,
        days: ForecastDays,
    ) -> WeatherResult<(Location, Vec<ForecastDay>)> {
        let location = self.resolve_location(city).await?;
        tracing::debug!("Resolved {} to location key {}", city, location.key);
        let forecast = self.forecast_daily(days, &location.key).await?;
        Ok((location, forecast))
    }
}
