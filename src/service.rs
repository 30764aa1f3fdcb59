use futures::future::join_all;
use std::collections::BTreeMap;

use crate::classifier::Verdict;
use crate::client::{ForecastClient, ForecastDays};
use crate::constants::DEFAULT_FORECAST_DAYS;
use crate::error::{WeatherError, WeatherResult};
use crate::models::{ChartSeries, CityForecast, ClassifiedDay, RouteForecast};
use crate::photos::PhotoClient;

/// Fetches forecasts and classifies them.
///
/// Holds only the upstream clients; every result is built per call and
/// handed back to the caller.
#[derive(Debug, Clone)]
pub struct WeatherService {
    forecasts: ForecastClient,
    photos: Option<PhotoClient>,
}

impl WeatherService {
    pub fn new(forecasts: ForecastClient, photos: Option<PhotoClient>) -> Self {
        Self { forecasts, photos }
    }

    /// Validates the requested day count, falling back to the default
    fn forecast_days(days: Option<i64>) -> WeatherResult<ForecastDays> {
        ForecastDays::try_from(days.unwrap_or(DEFAULT_FORECAST_DAYS.into()))
    }

    fn checked_city(city: &str) -> WeatherResult<&str> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCityName);
        }
        Ok(city)
    }

    /// Forecast and verdict for one city
    pub async fn city_forecast(&self, city: &str, days: Option<i64>) -> WeatherResult<CityForecast> {
        let days = Self::forecast_days(days)?;
        self.fetch_city(Self::checked_city(city)?, days).await
    }

    async fn fetch_city(&self, city: &str, days: ForecastDays) -> WeatherResult<CityForecast> {
        tracing::info!("Getting {}-day forecast for {}", days.get(), city);

        let forecast = self.forecasts.forecast_for_city(city, days);
        let photo = async {
            match &self.photos {
                Some(photos) => photos.city_photo(city).await,
                None => None,
            }
        };
        let (forecast, photo_url) = tokio::join!(forecast, photo);
        let (location, days) = forecast?;

        let days: Vec<ClassifiedDay> = days.into_iter().map(ClassifiedDay::from).collect();
        let verdict = Verdict::worst(days.iter().map(|d| d.verdict));
        tracing::info!("Weather in {} is {}", city, verdict);

        Ok(CityForecast {
            city: city.to_string(),
            location,
            verdict,
            days,
            photo_url,
        })
    }

    /// Forecasts for both ends of a trip, fetched concurrently
    pub async fn route_forecast(
        &self,
        start_city: &str,
        end_city: &str,
        days: Option<i64>,
    ) -> WeatherResult<RouteForecast> {
        let days = Self::forecast_days(days)?;
        let (start_city, end_city) = (Self::checked_city(start_city)?, Self::checked_city(end_city)?);

        let (start, end) = tokio::try_join!(
            self.fetch_city(start_city, days),
            self.fetch_city(end_city, days)
        )?;
        let verdict = Verdict::worst([start.verdict, end.verdict]);

        Ok(RouteForecast { start, end, verdict })
    }

    /// Chart series for several cities at once.
    ///
    /// Cities the provider does not know are left out of the result; any
    /// other failure fails the whole request.
    pub async fn multiple_forecast(
        &self,
        cities: &[String],
        days: Option<i64>,
    ) -> WeatherResult<BTreeMap<String, ChartSeries>> {
        let days = Self::forecast_days(days)?;
        let cities: Vec<&str> = cities
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        if cities.is_empty() {
            return Err(WeatherError::NoCities);
        }

        let results = join_all(cities.iter().map(|city| async move {
            let result = self.forecasts.forecast_for_city(city, days).await;
            (*city, result)
        }))
        .await;

        let mut series = BTreeMap::new();
        for (city, result) in results {
            match result {
                Ok((_, days)) => {
                    let days: Vec<ClassifiedDay> = days.into_iter().map(ClassifiedDay::from).collect();
                    series.insert(city.to_string(), ChartSeries::from_days(&days));
                }
                Err(WeatherError::CityNotFound(_)) => {
                    tracing::warn!("Skipping {}: city not found", city);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{mount_city, mount_unknown_city, provider_day};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(server: &MockServer, photos: Option<&MockServer>) -> WeatherService {
        let forecasts = ForecastClient::new(server.uri(), "test-key", "ru-ru").unwrap();
        let photos = photos.map(|p| PhotoClient::new(p.uri(), "photo-key").unwrap());
        WeatherService::new(forecasts, photos)
    }

    fn five_days(bad_day: bool) -> Vec<serde_json::Value> {
        (1..=5)
            .map(|i| {
                let temp_max = if bad_day && i == 3 { 36.0 } else { 20.0 };
                provider_day(&format!("2024-07-0{}", i), temp_max, 10.0, 50.0, 10.0, 10.0)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_city_forecast_classifies_each_day() {
        let server = MockServer::start().await;
        mount_city(&server, "Sochi", "293687", five_days(true)).await;

        let forecast = service(&server, None).city_forecast("Sochi", None).await.unwrap();

        assert_eq!(forecast.days.len(), 5);
        assert_eq!(forecast.days[2].verdict, Verdict::Bad);
        assert_eq!(forecast.days[0].verdict, Verdict::Good);
        assert_eq!(forecast.verdict, Verdict::Bad);
        assert!(forecast.photo_url.is_none());
    }

    #[tokio::test]
    async fn test_city_forecast_attaches_photo() {
        let server = MockServer::start().await;
        let photo_server = MockServer::start().await;
        mount_city(&server, "Sochi", "293687", five_days(false)).await;
        Mock::given(method("GET"))
            .and(path("/search/photos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{ "urls": { "regular": "https://images.example/sochi.jpg" } }]
            })))
            .mount(&photo_server)
            .await;

        let forecast = service(&server, Some(&photo_server))
            .city_forecast("  Sochi ", Some(5))
            .await
            .unwrap();

        assert_eq!(forecast.city, "Sochi");
        assert_eq!(forecast.verdict, Verdict::Good);
        assert_eq!(forecast.photo_url.as_deref(), Some("https://images.example/sochi.jpg"));
    }

    #[tokio::test]
    async fn test_invalid_day_count_is_rejected_before_any_request() {
        let server = MockServer::start().await;

        let err = service(&server, None).city_forecast("Sochi", Some(7)).await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidDayCount(7)));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_route_forecast_takes_worse_end() {
        let server = MockServer::start().await;
        mount_city(&server, "Moscow", "294021", vec![provider_day("2024-07-01", 20.0, 10.0, 50.0, 10.0, 10.0)]).await;
        mount_city(&server, "Omsk", "294459", vec![provider_day("2024-07-01", 20.0, 10.0, 50.0, 55.0, 10.0)]).await;

        let route = service(&server, None)
            .route_forecast("Moscow", "Omsk", Some(1))
            .await
            .unwrap();

        assert_eq!(route.start.verdict, Verdict::Good);
        assert_eq!(route.end.verdict, Verdict::Bad);
        assert_eq!(route.verdict, Verdict::Bad);
    }

    #[tokio::test]
    async fn test_route_forecast_unknown_end() {
        let server = MockServer::start().await;
        mount_city(&server, "Moscow", "294021", vec![provider_day("2024-07-01", 20.0, 10.0, 50.0, 10.0, 10.0)]).await;
        mount_unknown_city(&server, "Atlantis").await;

        let err = service(&server, None)
            .route_forecast("Moscow", "Atlantis", Some(1))
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::CityNotFound(ref c) if c == "Atlantis"));
    }

    #[tokio::test]
    async fn test_multiple_forecast_skips_unknown_cities() {
        let server = MockServer::start().await;
        mount_city(&server, "Moscow", "294021", five_days(false)).await;
        mount_city(&server, "Kazan", "295954", five_days(true)).await;
        mount_unknown_city(&server, "Atlantis").await;

        let cities = vec!["Moscow".to_string(), "Atlantis".to_string(), "Kazan".to_string()];
        let series = service(&server, None).multiple_forecast(&cities, None).await.unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series["Moscow"].day, vec![1, 2, 3, 4, 5]);
        assert_eq!(series["Kazan"].temp_max[2], 36.0);
        assert_eq!(series["Kazan"].verdict[2], Verdict::Bad);
        assert!(!series.contains_key("Atlantis"));
    }

    #[tokio::test]
    async fn test_multiple_forecast_needs_cities() {
        let server = MockServer::start().await;
        let cities = vec!["  ".to_string()];

        let err = service(&server, None).multiple_forecast(&cities, None).await.unwrap_err();
        assert!(matches!(err, WeatherError::NoCities));
    }

    #[tokio::test]
    async fn test_multiple_forecast_propagates_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/locations/v1/cities/autocomplete"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let cities = vec!["Moscow".to_string()];
        let err = service(&server, None).multiple_forecast(&cities, None).await.unwrap_err();
        assert!(matches!(err, WeatherError::UpstreamRequestFailed { .. }));
    }
}
